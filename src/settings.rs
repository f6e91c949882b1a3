use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;
use crate::time::{TimeReference, Timestamp};

pub const DEFAULT_SETTINGS_FILE: &str = "bitemporal";

/// Settings read from an optional `bitemporal.toml` (or any other format the
/// config crate recognizes), overridden by `BITEMPORAL_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// A tracing filter directive, such as `info` or `bitemporal=debug`.
    pub log_filter: String,
    /// Pins the reference time of the process, as an RFC 3339 instant.
    pub reference: Option<Timestamp>,
}

impl Settings {
    pub fn load(file: &str) -> Result<Self> {
        let settings = Config::builder()
            .set_default("log_filter", "info")?
            .add_source(File::with_name(file).required(false))
            .add_source(Environment::with_prefix("BITEMPORAL"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
    pub fn time_reference(&self) -> TimeReference {
        match self.reference {
            Some(at) => TimeReference::pinned(at),
            None => TimeReference::new(),
        }
    }
}
