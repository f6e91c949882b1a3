// used to print out readable forms of a trace
use std::fmt;

use tracing::{debug, warn};

use crate::error::{BitemporalError, Result};
use crate::record::Record;
use crate::time::{Clock, Interval, Timestamp};

/// The records bitemporally tracking one property, for instance the name of
/// a person.
///
/// A trace owns its records. It never drops one: history only grows, by
/// appending new records and by closing the recording of superseded ones.
/// After every successful [`Trace::add`], the records believed at any given
/// instant of knowledge have pairwise non-overlapping validity.
///
/// A trace is not synchronized. Mutations take `&mut self`; callers sharing
/// a trace between threads must serialize writers themselves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trace<V> {
    records: Vec<Record<V>>,
}

impl<V> Default for Trace<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Trace<V> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }
    /// Work on top of records supplied by a storage collaborator.
    pub fn from_records(records: Vec<Record<V>>) -> Self {
        Self { records }
    }
    pub fn records(&self) -> &[Record<V>] {
        &self.records
    }
    pub fn into_records(self) -> Vec<Record<V>> {
        self.records
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Record<V>> {
        self.records.iter()
    }
    pub fn len(&self) -> usize {
        self.records.len()
    }
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The records valid on `valid_on` as known on `known_on`.
    pub fn get(&self, valid_on: Timestamp, known_on: Timestamp) -> Vec<&Record<V>> {
        self.records
            .iter()
            .filter(|r| r.validity_interval().contains(valid_on) && r.record_interval().contains(known_on))
            .collect()
    }
    /// How the valid value changed over time, as known on `known_on`.
    pub fn history(&self, known_on: Timestamp) -> Vec<&Record<V>> {
        self.records
            .iter()
            .filter(|r| r.record_interval().contains(known_on))
            .collect()
    }
    /// How our knowledge about the value valid on `valid_on` evolved.
    pub fn evolution(&self, valid_on: Timestamp) -> Vec<&Record<V>> {
        self.records
            .iter()
            .filter(|r| r.validity_interval().contains(valid_on))
            .collect()
    }

    /// Stop believing whatever is valid on `valid_on`, as of now.
    /// Returns the number of records that were closed.
    pub fn retract<C: Clock + ?Sized>(&mut self, valid_on: Timestamp, clock: &C) -> Result<usize> {
        let now = clock.now();
        self.check_causality(now)?;
        let mut closed = 0;
        for record in self.records.iter_mut() {
            if record.validity_interval().contains(valid_on) && record.record_interval().contains(now) {
                record.close_at(now)?;
                closed += 1;
            }
        }
        debug!(%valid_on, %now, closed, "retracted");
        Ok(closed)
    }

    /// Fails when two records were believed at the same instant while their
    /// validity overlaps. Reconciliation never lets this happen, so an error
    /// here points at a bug or at corrupt stored data.
    pub fn check_invariant(&self) -> Result<()> {
        for (i, a) in self.records.iter().enumerate() {
            for b in &self.records[i + 1..] {
                if a.record_interval().overlaps(&b.record_interval())
                    && a.validity_interval().overlaps(&b.validity_interval())
                {
                    return Err(BitemporalError::Invariant(format!(
                        "validity {} and {} overlap while recorded during {} and {}",
                        a.validity_interval(),
                        b.validity_interval(),
                        a.record_interval(),
                        b.record_interval()
                    )));
                }
            }
        }
        Ok(())
    }

    // Refuse to touch a trace holding knowledge from the future, which happens
    // when the reference time has been moved back.
    fn check_causality(&self, now: Timestamp) -> Result<()> {
        for record in &self.records {
            let recorded = record.record_interval();
            let from_the_future = if recorded.start() > now {
                Some(recorded.start())
            } else if !record.is_open() && recorded.end() > now {
                Some(recorded.end())
            } else {
                None
            };
            if let Some(recorded) = from_the_future {
                warn!(%recorded, %now, "trace contains knowledge from the future");
                return Err(BitemporalError::Causality { recorded, now });
            }
        }
        Ok(())
    }
}

impl<V: Clone> Trace<V> {
    /// Add a record to the trace, superseding what it contradicts.
    ///
    /// Every currently known record whose validity overlaps the new one is
    /// closed. The parts of those records lying before or after the new
    /// validity are preserved as fresh records, and the new record itself
    /// is added with a recording starting now. Either everything is applied
    /// or, on error, nothing is.
    pub fn add<C: Clock + ?Sized>(&mut self, record: Record<V>, clock: &C) -> Result<()> {
        let now = clock.now();
        self.check_causality(now)?;

        let validity = record.validity_interval();
        let mut to_end = Vec::new();
        let mut to_add = Vec::new();

        for (position, known) in self.records.iter().enumerate() {
            if !known.record_interval().contains(now) {
                continue;
            }
            let known_validity = known.validity_interval();
            if validity.overlaps(&known_validity) {
                to_end.push(position);
            }
            // leading remainder of a record the new one starts within
            let start = validity.start();
            if known_validity.contains(start) && start > known_validity.start() {
                to_add.push(known.copy_at(Interval::new(known_validity.start(), start)?, now));
            }
            // trailing remainder of a record the new one ends within
            let end = validity.end();
            if !validity.is_open_ended() && known_validity.contains(end) && end > known_validity.start() {
                to_add.push(known.copy_at(Interval::new(end, known_validity.end())?, now));
            }
        }

        debug!(
            %validity,
            %now,
            superseded = to_end.len(),
            fragments = to_add.len(),
            "adding record"
        );
        for position in to_end {
            self.records[position].close_at(now)?;
        }
        self.records.extend(to_add);
        self.records.push(record.copy_at(validity, now));
        Ok(())
    }
}

impl<V: fmt::Display> fmt::Display for Trace<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for record in &self.records {
            writeln!(f, "{}", record)?;
        }
        Ok(())
    }
}
