use bitemporal::property::{Property, ValueAdapter, Wrapped};
use bitemporal::record::Record;
use bitemporal::time::{day, Clock, Interval, TimeReference, Timestamp};
use bitemporal::trace::Trace;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Address {
    line1: String,
    line2: String,
    line3: String,
}

fn address(line1: &str, line2: &str, line3: &str) -> Address {
    Address {
        line1: line1.to_owned(),
        line2: line2.to_owned(),
        line3: line3.to_owned(),
    }
}

struct Person {
    address: Trace<Address>,
    alive: Trace<bool>,
}

impl Person {
    fn new() -> Self {
        Self {
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

// The example scenario described on Wikipedia:
// https://en.wikipedia.org/wiki/Temporal_database
fn john_doe() -> Person {
    // 3/4/1975 John Doe is born, nothing happens
    // 4/4/1975 John's father registers the baby
    let mut clock = TimeReference::pinned(day(4, 4, 1975));
    let mut john = Person::new();
    john.alive(&clock)
        .set_for(true, Interval::since(day(3, 4, 1975)).unwrap())
        .unwrap();
    john.address(&clock)
        .set_for(
            address("Some Street 8", "Smallville", "FL, USA"),
            Interval::since(day(3, 4, 1975)).unwrap(),
        )
        .unwrap();

    // 26/8/1994 John moves to Bigtown, but forgets to register
    // 27/12/1994 John registers his move
    clock.set_reference(day(27, 12, 1994));
    john.address(&clock)
        .set_for(
            address("Some Avenue 773", "Bigtown", "FL, USA"),
            Interval::since(day(26, 8, 1994)).unwrap(),
        )
        .unwrap();

    // 1/4/2001 John is killed in an accident, reported by the coroner that same day
    clock.set_reference(day(1, 4, 2001));
    john.alive(&clock).set(false).unwrap();
    john
}

#[test]
fn scenario() {
    let mut john = john_doe();
    let clock = TimeReference::pinned(day(1, 1, 2007));

    let alive = john.alive(&clock);
    assert!(!alive.has_value_on(day(1, 1, 1975)));
    assert_eq!(alive.on(day(3, 4, 1975)), Some(true));
    assert!(!alive.has_value_on_known(day(3, 4, 1975), day(3, 4, 1975)));
    assert_eq!(alive.now(), Some(false));

    let smallville = address("Some Street 8", "Smallville", "FL, USA");
    let bigtown = address("Some Avenue 773", "Bigtown", "FL, USA");
    let home = john.address(&clock);
    assert_eq!(home.on(day(3, 4, 1975)), Some(smallville.clone()));
    assert_eq!(home.on(day(26, 8, 1994)), Some(bigtown.clone()));
    assert_eq!(home.on_known(day(26, 8, 1994), day(26, 8, 1994)), Some(smallville));
    assert_eq!(home.on_known(day(26, 8, 1994), day(27, 12, 1994)), Some(bigtown.clone()));
    assert_eq!(home.now(), Some(bigtown));
    assert_eq!(home.trace().len(), 3);
    home.trace().check_invariant().unwrap();
}

#[test]
fn ending_the_current_value() {
    let mut john = john_doe();
    let mut clock = TimeReference::pinned(day(1, 4, 2001));
    assert_eq!(john.address(&clock).end().unwrap(), 1);

    clock.set_reference(day(1, 1, 2007));
    let home = john.address(&clock);
    assert_eq!(home.on(day(3, 4, 1975)).map(|a| a.line2), Some("Smallville".to_owned()));
    assert_eq!(home.on_known(day(26, 8, 1994), day(26, 8, 1994)).map(|a| a.line2), Some("Smallville".to_owned()));
    assert_eq!(home.on_known(day(26, 8, 1994), day(27, 12, 1994)).map(|a| a.line2), Some("Bigtown".to_owned()));
    assert_eq!(home.now(), None);
    assert!(!home.has_value());
}

#[test]
fn history_and_evolution() {
    let mut john = john_doe();
    let clock = TimeReference::pinned(day(1, 1, 2007));
    let home = john.address(&clock);

    let mut history: Vec<_> = home.history().into_iter().map(|r| r.value().line2.clone()).collect();
    history.sort();
    assert_eq!(history, vec!["Bigtown", "Smallville"]);
    assert_eq!(home.history_known_on(day(1, 1, 1990)).len(), 1);
    assert!(home.history_known_on(day(1, 1, 1970)).is_empty());

    // what we believed about 1/1/2000 changed when the move was registered
    let mut evolution = home.evolution_of(day(1, 1, 2000));
    evolution.sort_by_key(|r| r.record_interval().start());
    let cities: Vec<_> = evolution.iter().map(|r| r.value().line2.as_str()).collect();
    assert_eq!(cities, vec!["Smallville", "Bigtown"]);
    assert_eq!(home.evolution().len(), 2);
}

#[test]
fn non_temporal_api_usage() {
    let clock = TimeReference::new();
    let mut trace = Trace::new();
    let mut pete = Property::wrapped(&mut trace, &clock);
    pete.set(address("Foostreet", "Bartown", "USA")).unwrap();
    assert!(pete.has_value());
    assert_eq!(pete.now().map(|a| a.line1), Some("Foostreet".to_owned()));
}

#[test]
fn temporal_api_usage() {
    let clock = TimeReference::new();
    let mut trace = Trace::new();
    let mut pete = Property::wrapped(&mut trace, &clock);
    pete.set_for(address("Foostreet", "Bartown", "USA"), Interval::since(day(1, 1, 2000)).unwrap())
        .unwrap();
    assert!(pete.has_value_on(day(1, 1, 2001)));
    assert_eq!(pete.on(day(1, 1, 2001)).map(|a| a.line1), Some("Foostreet".to_owned()));
    assert_eq!(
        pete.get().map(|r| r.validity_interval()),
        Some(Interval::since(day(1, 1, 2000)).unwrap())
    );
}

// Stores names upper cased, hands them back as they are stored.
struct UpperCase;

impl ValueAdapter for UpperCase {
    type Value = String;
    type Stored = String;
    fn extract_value(&self, record: &Record<String>) -> String {
        record.value().clone()
    }
    fn wrap_value<C: Clock + ?Sized>(&self, value: String, validity: Interval, clock: &C) -> Record<String> {
        Record::new(value.to_uppercase(), validity, clock)
    }
}

#[test]
fn custom_adapter() {
    let clock = TimeReference::pinned(day(1, 1, 2000));
    let mut trace = Trace::new();
    let mut name = Property::new(&mut trace, UpperCase, &clock);
    name.set("john doe".to_owned()).unwrap();
    assert_eq!(name.now(), Some("JOHN DOE".to_owned()));
    assert_eq!(name.to_string(), "JOHN DOE");
    assert_eq!(name.get_on_known(day(1, 1, 2000), day(1, 1, 2000)).map(|r| r.is_open()), Some(true));
}

#[test]
fn time_references_are_independent() {
    let pinned_on: Vec<Timestamp> = vec![day(1, 1, 1980), day(1, 1, 1990), day(1, 1, 2000)];
    let seen: Vec<Timestamp> = std::thread::scope(|scope| {
        let handles: Vec<_> = pinned_on
            .iter()
            .map(|at| {
                scope.spawn(move || {
                    let mut clock = TimeReference::new();
                    assert!(!clock.is_reference_set());
                    clock.set_reference(*at);
                    assert!(clock.is_reference_set());
                    let mut trace = Trace::new();
                    Property::wrapped(&mut trace, &clock).set(*at).unwrap();
                    trace.records()[0].record_interval().start()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(seen, pinned_on);

    let mut clock = TimeReference::pinned(day(1, 1, 1980));
    assert_eq!(clock.reference(), Some(day(1, 1, 1980)));
    clock.clear_reference();
    assert!(!clock.is_reference_set());
    assert!(clock.now() > day(1, 1, 2020));
}
