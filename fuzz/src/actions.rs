//! Various actions we take on a [`Value`] and its "control", asserting invariants along the way.

use std::cmp::Ordering;

use any_of::Visitor;
use arbitrary::Arbitrary;

use crate::{
    assert_matches,
    Control,
    Value,
};

#[derive(Arbitrary, Debug)]
pub enum Action<'a> {
    /// Assign a new value with [`Value::insert`]
    Insert(Control),
    /// Construct a new value in place with [`Value::emplace`]
    Emplace(Control),
    /// Swap in a new value with [`Value::replace`]
    Replace(Control),
    /// Move the value out with [`Value::take`], leaving it invalid
    Take,
    /// Move the text out with [`Value::take_as`], destroying any other alternative
    TakeAsText,
    /// Move the bytes out with [`Value::into_as`]
    IntoAsBytes,
    /// Push a `&str` onto the text alternative through [`Value::get_mut`]
    PushStr(&'a str),
    /// Extend the bytes alternative through [`Value::match_mut`]
    ExtendBytes(&'a [u8]),
    /// Add to the number alternative through [`Value::visit_mut`]
    Add(u32),
    /// Overwrite with [`Clone::clone_from`]
    CloneFrom(Control),
    /// Compare against another value
    Compare(Control),
    /// Measure the value through [`Value::visit`]
    Measure,
}

impl Action<'_> {
    pub fn perform(self, control: &mut Option<Control>, value: &mut Value) {
        use Action::*;

        match self {
            Insert(next) => {
                match next.clone() {
                    Control::Number(n) => assert_eq!(*value.insert(n), n),
                    Control::Text(s) => assert_eq!(*value.insert(s.clone()), s),
                    Control::Bytes(b) => assert_eq!(*value.insert(b.clone()), b),
                }
                *control = Some(next);
            }
            Emplace(next) => {
                match next.clone() {
                    Control::Number(n) => assert_eq!(*value.emplace(|| n), n),
                    Control::Text(s) => assert_eq!(*value.emplace(|| s.clone()), s),
                    Control::Bytes(b) => assert_eq!(*value.emplace(|| b.clone()), b),
                }
                *control = Some(next);
            }
            Replace(next) => {
                let previous = match next.clone() {
                    Control::Number(n) => value.replace(n),
                    Control::Text(s) => value.replace(s),
                    Control::Bytes(b) => value.replace(b),
                };
                assert_matches(&previous, control.as_ref());
                *control = Some(next);
            }
            Take => {
                // reading an invalid value is a violation
                if control.is_some() {
                    let taken = value.take();
                    assert_matches(&taken, control.take().as_ref());
                }
            }
            TakeAsText => {
                if let Some(expected) = control.take() {
                    let taken = value.take_as::<String, _>();
                    match expected {
                        Control::Text(s) => assert_eq!(taken, Some(s)),
                        _ => assert_eq!(taken, None),
                    }
                }
            }
            IntoAsBytes => {
                if let Some(expected) = control.take() {
                    let bytes = value.take().into_as::<Vec<u8>, _>();
                    match expected {
                        Control::Bytes(b) => assert_eq!(bytes, Some(b)),
                        _ => assert_eq!(bytes, None),
                    }
                }
            }
            PushStr(s) => {
                if let Some(Control::Text(text)) = control {
                    text.push_str(s);
                    value
                        .get_mut::<String, _>()
                        .expect("the text alternative is live")
                        .push_str(s);
                }
            }
            ExtendBytes(extra) => {
                if let Some(current) = control {
                    let touched = value.match_mut((
                        |_: &mut u32| false,
                        |_: &mut String| false,
                        |b: &mut Vec<u8>| {
                            b.extend_from_slice(extra);
                            true
                        },
                    ));
                    assert_eq!(touched, current.index() == 2);

                    if let Control::Bytes(b) = current {
                        b.extend_from_slice(extra);
                    }
                }
            }
            Add(amount) => {
                if let Some(current) = control {
                    value.visit_mut(AddTo(amount));
                    if let Control::Number(n) = current {
                        *n = n.wrapping_add(amount);
                    }
                }
            }
            CloneFrom(source) => {
                value.clone_from(&source.clone().into_value());
                *control = Some(source);
            }
            Compare(other) => {
                if let Some(current) = control.as_ref() {
                    let other_value = other.clone().into_value();
                    let expected = current
                        .index()
                        .cmp(&other.index())
                        .then_with(|| current.cmp(&other));

                    assert_eq!(Ord::cmp(&*value, &other_value), expected);
                    assert_eq!(*value == other_value, expected == Ordering::Equal);
                }
            }
            Measure => {
                if let Some(current) = control {
                    let expected = match current {
                        Control::Number(_) => 4,
                        Control::Text(s) => s.len(),
                        Control::Bytes(b) => b.len(),
                    };
                    assert_eq!(value.visit(Length), expected);
                }
            }
        }

        assert_matches(value, control.as_ref());
    }
}

/// Adds to the number alternative, leaving the others untouched.
struct AddTo(u32);

impl Visitor<&mut u32> for AddTo {
    type Output = ();

    fn visit(self, n: &mut u32) {
        *n = n.wrapping_add(self.0);
    }
}

impl Visitor<&mut String> for AddTo {
    type Output = ();

    fn visit(self, _: &mut String) {}
}

impl Visitor<&mut Vec<u8>> for AddTo {
    type Output = ();

    fn visit(self, _: &mut Vec<u8>) {}
}

/// Length in bytes of the live alternative.
struct Length;

impl Visitor<&String> for Length {
    type Output = usize;

    fn visit(self, s: &String) -> usize {
        s.len()
    }
}

impl Visitor<&Vec<u8>> for Length {
    type Output = usize;

    fn visit(self, b: &Vec<u8>) -> usize {
        b.len()
    }
}

impl Visitor<&u32> for Length {
    type Output = usize;

    fn visit(self, _: &u32) -> usize {
        std::mem::size_of::<u32>()
    }
}
