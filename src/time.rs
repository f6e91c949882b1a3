// used for all instants on both time axes
use chrono::{DateTime, TimeZone, Utc};
// the sentinel end of time is computed once
use lazy_static::lazy_static;

// used to print out readable forms of intervals
use std::fmt;

use crate::error::{BitemporalError, Result};

/// An instant on either time axis.
pub type Timestamp = DateTime<Utc>;

lazy_static! {
    // Far enough in the future to outlast any realistic horizon, yet well
    // inside the range that storage back ends tend to support.
    static ref END_OF_TIME: Timestamp = Utc
        .with_ymd_and_hms(9999, 12, 31, 23, 59, 59)
        .single()
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
}

/// The sentinel instant marking an interval as open ended.
pub fn end_of_time() -> Timestamp {
    *END_OF_TIME
}

/// Midnight (UTC) of the given day of the given month in the given year.
///
/// # Panics
/// When the date does not exist in the calendar, e.g. `day(30, 2, 2000)`.
pub fn day(day: u32, month: u32, year: i32) -> Timestamp {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_else(|| panic!("There is no day {}/{}/{}", day, month, year))
}

// ------------- Clock -------------
/// Source of "now", threaded explicitly through every operation that needs it.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Always answers with the wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct WallClock;

impl Clock for WallClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// A fixed instant is a clock that never moves.
impl Clock for Timestamp {
    fn now(&self) -> Timestamp {
        *self
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// The time frame of one logical context, such as a test or a request.
///
/// Unless a reference has been set, `now()` follows the wall clock. Every
/// context owns its own `TimeReference`, so pinning time in one of them
/// never shifts "now" for another.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TimeReference {
    reference: Option<Timestamp>,
}

impl TimeReference {
    pub fn new() -> Self {
        Self { reference: None }
    }
    pub fn pinned(at: Timestamp) -> Self {
        Self {
            reference: Some(at),
        }
    }
    pub fn set_reference(&mut self, at: Timestamp) {
        self.reference = Some(at);
    }
    pub fn clear_reference(&mut self) {
        self.reference = None;
    }
    pub fn is_reference_set(&self) -> bool {
        self.reference.is_some()
    }
    pub fn reference(&self) -> Option<Timestamp> {
        self.reference
    }
}

impl Clock for TimeReference {
    fn now(&self) -> Timestamp {
        self.reference.unwrap_or_else(Utc::now)
    }
}

// ------------- Interval -------------
/// A half open interval `[start, end)`: the start is included, the end is not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    start: Timestamp,
    end: Timestamp,
}

impl Interval {
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self> {
        if start >= end {
            return Err(BitemporalError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }
    /// Runs from `start` till the end of time.
    pub fn since(start: Timestamp) -> Result<Self> {
        Self::new(start, end_of_time())
    }
    /// Runs from the clock's current instant till the end of time.
    pub fn from_now<C: Clock + ?Sized>(clock: &C) -> Result<Self> {
        Self::since(clock.now())
    }
    // Recording intervals may be empty: a belief retracted at the very
    // instant it was recorded was never held at all.
    pub(crate) fn recorded(start: Timestamp, end: Timestamp) -> Result<Self> {
        if start > end {
            return Err(BitemporalError::InvalidInterval { start, end });
        }
        Ok(Self::unchecked(start, end))
    }
    pub(crate) fn unchecked(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }
    pub fn start(&self) -> Timestamp {
        self.start
    }
    pub fn end(&self) -> Timestamp {
        self.end
    }
    pub fn contains(&self, instant: Timestamp) -> bool {
        self.start <= instant && instant < self.end
    }
    /// Abutting intervals, such as `[a, b)` and `[b, c)`, do not overlap.
    /// Neither does an empty interval, since it holds no instant.
    pub fn overlaps(&self, other: &Interval) -> bool {
        !self.is_empty() && !other.is_empty() && self.start < other.end && other.start < self.end
    }
    pub fn is_open_ended(&self) -> bool {
        self.end == end_of_time()
    }
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_open_ended() {
            write!(f, "[{}, ∞)", self.start)
        } else {
            write!(f, "[{}, {})", self.start, self.end)
        }
    }
}
