//! The contract with whatever keeps traces between runs.
//!
//! A trace is stored as one [`RecordRow`] per record. Open intervals are
//! stored with the sentinel [`end_of_time`](crate::time::end_of_time) as
//! their end, never as a missing value, so stored intervals compare like
//! any others.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BitemporalError, Result};
use crate::record::Record;
use crate::time::{Interval, Timestamp};
use crate::trace::Trace;

// ------------- RecordRow -------------
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRow<V> {
    pub value: V,
    pub validity_start: Timestamp,
    pub validity_end: Timestamp,
    pub record_start: Timestamp,
    pub record_end: Timestamp,
}

impl<V: Clone> From<&Record<V>> for RecordRow<V> {
    fn from(record: &Record<V>) -> Self {
        let validity = record.validity_interval();
        let recorded = record.record_interval();
        Self {
            value: record.value().clone(),
            validity_start: validity.start(),
            validity_end: validity.end(),
            record_start: recorded.start(),
            record_end: recorded.end(),
        }
    }
}

impl<V> TryFrom<RecordRow<V>> for Record<V> {
    type Error = BitemporalError;
    fn try_from(row: RecordRow<V>) -> Result<Self> {
        let validity = Interval::new(row.validity_start, row.validity_end)
            .map_err(|e| BitemporalError::Storage(format!("corrupt validity: {}", e)))?;
        let recorded = Interval::recorded(row.record_start, row.record_end)
            .map_err(|e| BitemporalError::Storage(format!("corrupt recording: {}", e)))?;
        Ok(Record::restore(row.value, validity, recorded))
    }
}

// ------------- TraceStore -------------
/// Loads the live records of a tracked property and keeps what the trace
/// did to them: appended records as well as closed recordings.
pub trait TraceStore<V> {
    fn load(&self, owner: &str, property: &str) -> Result<Trace<V>>;
    fn save(&mut self, owner: &str, property: &str, trace: &Trace<V>) -> Result<()>;
}

/// Keeps rows in memory, keyed by owner and property name.
#[derive(Debug)]
pub struct MemoryStore<V> {
    rows: HashMap<(String, String), Vec<RecordRow<V>>>,
}

impl<V> Default for MemoryStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> MemoryStore<V> {
    pub fn new() -> Self {
        Self {
            rows: HashMap::new(),
        }
    }
    pub fn rows(&self, owner: &str, property: &str) -> &[RecordRow<V>] {
        self.rows
            .get(&(owner.to_owned(), property.to_owned()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
    pub fn len(&self) -> usize {
        self.rows.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<V: Clone> TraceStore<V> for MemoryStore<V> {
    fn load(&self, owner: &str, property: &str) -> Result<Trace<V>> {
        let records = self
            .rows(owner, property)
            .iter()
            .cloned()
            .map(Record::try_from)
            .collect::<Result<Vec<_>>>()?;
        debug!(owner, property, records = records.len(), "restored trace");
        Ok(Trace::from_records(records))
    }
    fn save(&mut self, owner: &str, property: &str, trace: &Trace<V>) -> Result<()> {
        let rows: Vec<RecordRow<V>> = trace.iter().map(RecordRow::from).collect();
        debug!(owner, property, rows = rows.len(), "persisted trace");
        self.rows.insert((owner.to_owned(), property.to_owned()), rows);
        Ok(())
    }
}
