use thiserror::Error;

use crate::time::Timestamp;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BitemporalError {
    #[error("Invalid interval: start {start} must lie before end {end}")]
    InvalidInterval { start: Timestamp, end: Timestamp },
    #[error("Causality violation: trace contains knowledge recorded on {recorded}, which is in the future relative to the reference time {now}")]
    Causality { recorded: Timestamp, now: Timestamp },
    #[error("Internal invariant violated: {0}")]
    Invariant(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, BitemporalError>;

// Helper conversions
impl From<config::ConfigError> for BitemporalError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
