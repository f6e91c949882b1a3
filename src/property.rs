//! A value-level API on top of a [`Trace`].
//!
//! Where a trace speaks in [`Record`]s, a [`Property`] speaks in the values
//! an application actually cares about (a name, an address, a flag). A
//! [`ValueAdapter`] does the translation in both directions. Properties are
//! cheap: create one whenever the owning entity is asked for it.

use std::fmt;
use std::marker::PhantomData;

use tracing::debug;

use crate::error::Result;
use crate::record::Record;
use crate::time::{Clock, Interval, Timestamp};
use crate::trace::Trace;

// ------------- ValueAdapter -------------
/// Converts between application values and the records kept in a trace.
///
/// Implementations must be stateless and free of side effects. The absence
/// of a record is handled by [`Property`], never by the adapter.
pub trait ValueAdapter {
    type Value;
    type Stored;
    fn extract_value(&self, record: &Record<Self::Stored>) -> Self::Value;
    fn wrap_value<C: Clock + ?Sized>(
        &self,
        value: Self::Value,
        validity: Interval,
        clock: &C,
    ) -> Record<Self::Stored>;
}

/// Keeps values in records as they are.
pub struct Wrapped<V>(PhantomData<fn() -> V>);

impl<V> Wrapped<V> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}
impl<V> Default for Wrapped<V> {
    fn default() -> Self {
        Self::new()
    }
}
impl<V> Clone for Wrapped<V> {
    fn clone(&self) -> Self {
        Self::new()
    }
}
impl<V> Copy for Wrapped<V> {}

impl<V: Clone> ValueAdapter for Wrapped<V> {
    type Value = V;
    type Stored = V;
    fn extract_value(&self, record: &Record<V>) -> V {
        record.value().clone()
    }
    fn wrap_value<C: Clock + ?Sized>(&self, value: V, validity: Interval, clock: &C) -> Record<V> {
        Record::new(value, validity, clock)
    }
}

// ------------- Property -------------
/// A bitemporally tracked property of an entity, such as the address of a
/// person. Lookups assume the property is single valued: when several
/// records match, the first one wins.
pub struct Property<'a, A: ValueAdapter, C: Clock + ?Sized> {
    trace: &'a mut Trace<A::Stored>,
    adapter: A,
    clock: &'a C,
}

impl<'a, V: Clone, C: Clock + ?Sized> Property<'a, Wrapped<V>, C> {
    pub fn wrapped(trace: &'a mut Trace<V>, clock: &'a C) -> Self {
        Self::new(trace, Wrapped::new(), clock)
    }
}

impl<'a, A, C> Property<'a, A, C>
where
    A: ValueAdapter,
    A::Stored: Clone,
    C: Clock + ?Sized,
{
    pub fn new(trace: &'a mut Trace<A::Stored>, adapter: A, clock: &'a C) -> Self {
        Self {
            trace,
            adapter,
            clock,
        }
    }
    pub fn trace(&self) -> &Trace<A::Stored> {
        &*self.trace
    }

    /// The value valid now, as currently known.
    pub fn now(&self) -> Option<A::Value> {
        self.on(self.clock.now())
    }
    /// The value valid on `valid_on`, as currently known.
    pub fn on(&self, valid_on: Timestamp) -> Option<A::Value> {
        self.on_known(valid_on, self.clock.now())
    }
    /// The value valid on `valid_on`, as known on `known_on`.
    pub fn on_known(&self, valid_on: Timestamp, known_on: Timestamp) -> Option<A::Value> {
        self.get_on_known(valid_on, known_on)
            .map(|record| self.adapter.extract_value(record))
    }

    pub fn get(&self) -> Option<&Record<A::Stored>> {
        self.get_on(self.clock.now())
    }
    pub fn get_on(&self, valid_on: Timestamp) -> Option<&Record<A::Stored>> {
        self.get_on_known(valid_on, self.clock.now())
    }
    pub fn get_on_known(&self, valid_on: Timestamp, known_on: Timestamp) -> Option<&Record<A::Stored>> {
        let found = self.trace.get(valid_on, known_on);
        if found.len() > 1 {
            debug!(%valid_on, %known_on, matches = found.len(), "property is not single valued");
        }
        found.into_iter().next()
    }

    /// Set the value, valid from now on.
    pub fn set(&mut self, value: A::Value) -> Result<()> {
        let validity = Interval::from_now(self.clock)?;
        self.set_for(value, validity)
    }
    /// Set the value for the given validity.
    pub fn set_for(&mut self, value: A::Value, validity: Interval) -> Result<()> {
        let record = self.adapter.wrap_value(value, validity, self.clock);
        self.trace.add(record, self.clock)
    }

    /// Forget the value valid now.
    pub fn end(&mut self) -> Result<usize> {
        self.end_on(self.clock.now())
    }
    /// Forget the value valid on `valid_on`.
    pub fn end_on(&mut self, valid_on: Timestamp) -> Result<usize> {
        self.trace.retract(valid_on, self.clock)
    }

    /// How the value changed over time, as currently known.
    pub fn history(&self) -> Vec<&Record<A::Stored>> {
        self.history_known_on(self.clock.now())
    }
    pub fn history_known_on(&self, known_on: Timestamp) -> Vec<&Record<A::Stored>> {
        self.trace.history(known_on)
    }
    /// How our knowledge about the value valid now evolved.
    pub fn evolution(&self) -> Vec<&Record<A::Stored>> {
        self.evolution_of(self.clock.now())
    }
    pub fn evolution_of(&self, valid_on: Timestamp) -> Vec<&Record<A::Stored>> {
        self.trace.evolution(valid_on)
    }

    pub fn has_value(&self) -> bool {
        self.has_value_on(self.clock.now())
    }
    pub fn has_value_on(&self, valid_on: Timestamp) -> bool {
        self.has_value_on_known(valid_on, self.clock.now())
    }
    pub fn has_value_on_known(&self, valid_on: Timestamp, known_on: Timestamp) -> bool {
        !self.trace.get(valid_on, known_on).is_empty()
    }
}

impl<A, C> fmt::Display for Property<'_, A, C>
where
    A: ValueAdapter,
    A::Stored: Clone,
    A::Value: fmt::Display,
    C: Clock + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.now() {
            Some(value) => write!(f, "{}", value),
            None => write!(f, "none"),
        }
    }
}
