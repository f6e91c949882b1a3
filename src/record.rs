// used to print out readable forms of a record
use std::fmt;

use tracing::trace;

use crate::error::{BitemporalError, Result};
use crate::time::{end_of_time, Clock, Interval, Timestamp};

// ------------- Recording -------------
/// When a record was believed. This is the only part of a record that ever
/// changes, and it changes once: from `Open` to `Closed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Recording {
    /// Currently believed, since the given instant.
    Open { since: Timestamp },
    /// Believed during the interval, superseded or retracted at its end.
    Closed(Interval),
}

impl Recording {
    pub fn interval(&self) -> Interval {
        match *self {
            Recording::Open { since } => Interval::unchecked(since, end_of_time()),
            Recording::Closed(interval) => interval,
        }
    }
}

// ------------- Record -------------
/// A value tracked along two time axes.
///
/// The validity interval says when the value holds in the modeled world, the
/// recording says when we believed so. Since a record is never rewritten,
/// only superseded, the wrapped value should be immutable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record<V> {
    value: V,
    validity: Interval,
    recording: Recording,
}

impl<V> Record<V> {
    /// Wrap a value valid during `validity`, recorded from now on.
    pub fn new<C: Clock + ?Sized>(value: V, validity: Interval, clock: &C) -> Self {
        Self::opened_at(value, validity, clock.now())
    }
    pub(crate) fn opened_at(value: V, validity: Interval, since: Timestamp) -> Self {
        Self {
            value,
            validity,
            recording: Recording::Open { since },
        }
    }
    /// Rebuild a record from what a storage collaborator kept. A recording
    /// interval running till the end of time makes an open record.
    pub fn restore(value: V, validity: Interval, recorded: Interval) -> Self {
        let recording = if recorded.is_open_ended() {
            Recording::Open {
                since: recorded.start(),
            }
        } else {
            Recording::Closed(recorded)
        };
        Self {
            value,
            validity,
            recording,
        }
    }
    pub fn value(&self) -> &V {
        &self.value
    }
    pub fn into_value(self) -> V {
        self.value
    }
    pub fn validity_interval(&self) -> Interval {
        self.validity
    }
    pub fn record_interval(&self) -> Interval {
        self.recording.interval()
    }
    pub fn recording(&self) -> Recording {
        self.recording
    }
    pub fn is_open(&self) -> bool {
        matches!(self.recording, Recording::Open { .. })
    }
    /// Stop believing this record as of now, because it has been superseded
    /// or turned out to be wrong. Ending a closed record changes nothing.
    pub fn end<C: Clock + ?Sized>(&mut self, clock: &C) -> Result<()> {
        self.close_at(clock.now())
    }
    pub(crate) fn close_at(&mut self, now: Timestamp) -> Result<()> {
        if let Recording::Open { since } = self.recording {
            if now < since {
                return Err(BitemporalError::Causality {
                    recorded: since,
                    now,
                });
            }
            let closed = Interval::recorded(since, now)?;
            trace!(validity = %self.validity, recording = %closed, "closing record");
            self.recording = Recording::Closed(closed);
        }
        Ok(())
    }
}

impl<V: Clone> Record<V> {
    /// A new record for the same value with the given validity, recorded from now on.
    pub fn copy_with<C: Clock + ?Sized>(&self, validity: Interval, clock: &C) -> Self {
        self.copy_at(validity, clock.now())
    }
    pub(crate) fn copy_at(&self, validity: Interval, since: Timestamp) -> Self {
        Self::opened_at(self.value.clone(), validity, since)
    }
}

impl<V: fmt::Display> fmt::Display for Record<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}  ~  {}  ~  {}", self.validity, self.record_interval(), self.value)
    }
}
