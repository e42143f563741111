use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;

use proptest::prelude::*;
use proptest::strategy::Strategy;
use test_strategy::proptest;

use crate::AnyOf;

pub(crate) type Value = AnyOf<(u32, String, Vec<u8>)>;

/// The same values as [`Value`], as a native enum, to check our behavior against.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum Control {
    Number(u32),
    Text(String),
    Bytes(Vec<u8>),
}

impl Control {
    pub(crate) fn index(&self) -> usize {
        match self {
            Control::Number(_) => 0,
            Control::Text(_) => 1,
            Control::Bytes(_) => 2,
        }
    }

    pub(crate) fn to_value(&self) -> Value {
        match self {
            Control::Number(n) => Value::new(*n),
            Control::Text(s) => Value::new(s.clone()),
            Control::Bytes(b) => Value::new(b.clone()),
        }
    }
}

// generates random unicode strings, upto 40 chars long
pub(crate) fn rand_unicode() -> impl Strategy<Value = String> {
    proptest::collection::vec(proptest::char::any(), 0..40).prop_map(|v| v.into_iter().collect())
}

pub(crate) fn rand_control() -> impl Strategy<Value = Control> {
    prop_oneof![
        any::<u32>().prop_map(Control::Number),
        rand_unicode().prop_map(Control::Text),
        proptest::collection::vec(any::<u8>(), 0..64).prop_map(Control::Bytes),
    ]
}

fn matches(value: &Value, control: &Control) -> bool {
    match control {
        Control::Number(n) => value.get::<u32, _>() == Some(n),
        Control::Text(s) => value.get::<String, _>() == Some(s),
        Control::Bytes(b) => value.get::<Vec<u8>, _>() == Some(b),
    }
}

#[proptest]
#[cfg_attr(miri, ignore)]
fn proptest_single_occupancy(#[strategy(rand_control())] control: Control) {
    let value = control.to_value();

    let live = [
        value.is::<u32, _>(),
        value.is::<String, _>(),
        value.is::<Vec<u8>, _>(),
    ];
    prop_assert_eq!(live.iter().filter(|is| **is).count(), 1);
    prop_assert!(live[control.index()]);
    prop_assert_eq!(value.index(), control.index());
    prop_assert!(matches(&value, &control));
}

#[proptest]
#[cfg_attr(miri, ignore)]
fn proptest_clone_roundtrip(#[strategy(rand_control())] control: Control) {
    let value = control.to_value();
    let copy = value.clone();

    prop_assert!(matches(&copy, &control));
    prop_assert!(matches(&value, &control));
    prop_assert_eq!(&copy, &value);
}

#[proptest]
#[cfg_attr(miri, ignore)]
fn proptest_take_invalidates(#[strategy(rand_control())] control: Control) {
    let mut value = control.to_value();
    let taken = value.take();

    prop_assert!(!value.is_valid());
    prop_assert!(matches(&taken, &control));
}

#[proptest]
#[cfg_attr(miri, ignore)]
fn proptest_insert_after_invalid(
    #[strategy(rand_control())] before: Control,
    #[strategy(rand_control())] after: Control,
) {
    let mut value = before.to_value();
    let _ = value.take();

    match &after {
        Control::Number(n) => {
            value.insert(*n);
        }
        Control::Text(s) => {
            value.insert(s.clone());
        }
        Control::Bytes(b) => {
            value.insert(b.clone());
        }
    }

    prop_assert_eq!(&value, &after.to_value());
}

#[proptest]
#[cfg_attr(miri, ignore)]
fn proptest_ordering_matches_control(
    #[strategy(rand_control())] a: Control,
    #[strategy(rand_control())] b: Control,
) {
    let ordering: Ordering = a.to_value().cmp(&b.to_value());
    prop_assert_eq!(ordering, a.cmp(&b));
    prop_assert_eq!(a.to_value() == b.to_value(), a == b);
}
