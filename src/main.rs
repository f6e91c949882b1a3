//! Plays the temporal database scenario from Wikipedia against a person
//! with two bitemporally tracked properties, then prints what was recorded.
//!
//! https://en.wikipedia.org/wiki/Temporal_database
//!
//! - 3/4/1975 John Doe is born
//! - 4/4/1975 his father registers the birth
//! - 26/8/1994 John moves to Bigtown, but forgets to register
//! - 27/12/1994 John registers his move
//! - 1/4/2001 John dies in an accident, reported by the coroner that same day
//!
//! Settings come from an optional `bitemporal.toml` and `BITEMPORAL_*`
//! environment variables; `BITEMPORAL_REFERENCE` pins the instant the final
//! report is made on.
use std::fmt;

use bitemporal::property::{Property, Wrapped};
use bitemporal::settings::{Settings, DEFAULT_SETTINGS_FILE};
use bitemporal::store::{MemoryStore, RecordRow, TraceStore};
use bitemporal::time::{day, Clock, Interval, TimeReference};
use bitemporal::trace::Trace;
use bitemporal::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
struct Address {
    street: String,
    city: String,
    state: String,
}
impl Address {
    fn new(street: &str, city: &str, state: &str) -> Self {
        Self {
            street: street.to_owned(),
            city: city.to_owned(),
            state: state.to_owned(),
        }
    }
}
impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}, {}, {}", self.street, self.city, self.state)
    }
}

struct Person {
    name: String,
    address: Trace<Address>,
    alive: Trace<bool>,
}
impl Person {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            address: Trace::new(),
            alive: Trace::new(),
        }
    }
    fn address<'a, C: Clock>(&'a mut self, clock: &'a C) -> Property<'a, Wrapped<Address>, C> {
        Property::wrapped(&mut self.address, clock)
    }
    fn alive<'a, C: Clock>(&'a mut self, clock: &'a C) -> Property<'a, Wrapped<bool>, C> {
        Property::wrapped(&mut self.alive, clock)
    }
}

fn scenario(report_on: TimeReference) -> Result<()> {
    let mut clock = TimeReference::pinned(day(4, 4, 1975));
    let mut john = Person::new("John Doe");
    john.alive(&clock).set_for(true, Interval::since(day(3, 4, 1975))?)?;
    john.address(&clock).set_for(
        Address::new("Some Street 8", "Smallville", "FL, USA"),
        Interval::since(day(3, 4, 1975))?,
    )?;

    clock.set_reference(day(27, 12, 1994));
    john.address(&clock).set_for(
        Address::new("Some Avenue 773", "Bigtown", "FL, USA"),
        Interval::since(day(26, 8, 1994))?,
    )?;

    clock.set_reference(day(1, 4, 2001));
    john.alive(&clock).set(false)?;

    let clock = report_on;
    let name = john.name.clone();
    info!(person = %name, on = %clock.now(), "report");
    println!("{} is alive: {}", name, john.alive(&clock));
    println!("{} lives at: {}", name, john.address(&clock));
    println!(
        "On 26/8/1994 we knew {} lived at: {}",
        name,
        john.address(&clock)
            .on_known(day(26, 8, 1994), day(26, 8, 1994))
            .map(|a| a.to_string())
            .unwrap_or_else(|| "nowhere".to_owned())
    );

    let mut store = MemoryStore::new();
    store.save(&name, "address", &john.address)?;
    println!("\nThe address trace now looks like this:\n");
    print!("{}", john.address);
    println!("\nStored as rows:\n");
    for row in store.rows(&name, "address") {
        print_row(row);
    }
    Ok(())
}

fn print_row(row: &RecordRow<Address>) {
    match serde_json::to_string(row) {
        Ok(json) => println!("{}", json),
        Err(e) => error!(error = %e, "cannot serialize row"),
    }
}

fn main() {
    let settings = match Settings::load(DEFAULT_SETTINGS_FILE) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .init();
    if let Err(e) = scenario(settings.time_reference()) {
        error!(error = %e, "scenario failed");
        std::process::exit(1);
    }
}
