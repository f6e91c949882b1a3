//! Bitemporal – tracking values along two independent time axes.
//!
//! Every fact kept by this crate carries two intervals:
//! * A *validity* interval: when the fact is true in the modeled world.
//! * A *recording* interval: when we believed the fact to be true.
//!
//! Keeping both lets you answer questions along the lines of "on January
//! 2nd 1999, what did we think the value was for September 1st 1980?".
//!
//! ## Modules
//! * [`time`] – Instants, half open [`time::Interval`]s, the sentinel end of
//!   time and the [`time::Clock`] capability providing "now".
//! * [`record`] – The [`record::Record`]: a value with its validity and its
//!   recording, which can be closed exactly once.
//! * [`trace`] – The [`trace::Trace`] of records for one property. It owns the
//!   reconciliation that splits and supersedes records as new facts arrive,
//!   and the `get`/`history`/`evolution` queries.
//! * [`property`] – The value level [`property::Property`] facade and the
//!   [`property::ValueAdapter`] plugging arbitrary value types into it.
//! * [`store`] – The row layout and the load/save contract with storage.
//! * [`settings`] – Layered settings for the demonstration binary.
//!
//! ## Time
//! Nothing in the crate reads an ambient "now". Operations needing the
//! current instant take a [`time::Clock`]. A [`time::TimeReference`] follows
//! the wall clock until a reference instant is pinned, which is how tests
//! (or requests replaying the past) run with their own simulated time
//! without disturbing each other.
//!
//! ## Quick Start
//! ```
//! use bitemporal::property::Property;
//! use bitemporal::time::{day, Interval, TimeReference};
//! use bitemporal::trace::Trace;
//!
//! let mut clock = TimeReference::pinned(day(4, 4, 1975));
//! let mut address = Trace::new();
//! Property::wrapped(&mut address, &clock)
//!     .set_for("Smallville".to_string(), Interval::since(day(3, 4, 1975)).unwrap())
//!     .unwrap();
//!
//! clock.set_reference(day(27, 12, 1994));
//! Property::wrapped(&mut address, &clock)
//!     .set_for("Bigtown".to_string(), Interval::since(day(26, 8, 1994)).unwrap())
//!     .unwrap();
//!
//! let property = Property::wrapped(&mut address, &clock);
//! assert_eq!(property.on(day(1, 1, 1990)), Some("Smallville".to_string()));
//! assert_eq!(property.on_known(day(1, 9, 1994), day(1, 9, 1994)), Some("Smallville".to_string()));
//! assert_eq!(property.on(day(1, 9, 1994)), Some("Bigtown".to_string()));
//! ```
//!
//! ## Concurrency
//! A trace is a plain owned collection without internal locking. Writers
//! must be serialized by whoever shares it, for instance with one lock per
//! owning entity.
//!
//! ## License
//! Dual licensed under Apache-2.0 and MIT (see included `LICENSE.*` files).

pub mod error;
pub mod property;
pub mod record;
pub mod settings;
pub mod store;
pub mod time;
pub mod trace;

pub use error::{BitemporalError, Result};
