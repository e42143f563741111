use any_of::AnyOf;
use arbitrary::Arbitrary;

mod actions;
mod creation;

pub use actions::Action;
pub use creation::Creation;

/// The value under test.
pub type Value = AnyOf<(u32, String, Vec<u8>)>;

/// A framework to generate a [`Value`] and a "control" [`Option<Control>`], and then run a series
/// of actions and assert they stay in agreement
///
/// Used for fuzz testing
#[derive(Arbitrary, Debug)]
pub struct Scenario<'a> {
    pub creation: Creation<'a>,
    pub actions: Vec<Action<'a>>,
}

impl Scenario<'_> {
    /// Run the provided scenario, asserting for correct behavior
    pub fn run(self) {
        let (mut value, mut control) = self.creation.create();
        assert_matches(&value, control.as_ref());

        self.actions
            .into_iter()
            .for_each(|a| a.perform(&mut control, &mut value));

        assert_matches(&value, control.as_ref());
    }
}

/// The same values as [`Value`], as a native enum. An invalid [`Value`] is modeled as `None`.
#[derive(Arbitrary, Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Control {
    Number(u32),
    Text(String),
    Bytes(Vec<u8>),
}

impl Control {
    pub fn index(&self) -> usize {
        match self {
            Control::Number(_) => 0,
            Control::Text(_) => 1,
            Control::Bytes(_) => 2,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Control::Number(n) => Value::new(n),
            Control::Text(s) => Value::new(s),
            Control::Bytes(b) => Value::new(b),
        }
    }

    /// Reads the live alternative of a valid [`Value`] back into a [`Control`].
    pub fn of(value: &Value) -> Control {
        value.match_ref((
            |n: &u32| Control::Number(*n),
            |s: &String| Control::Text(s.clone()),
            |b: &Vec<u8>| Control::Bytes(b.clone()),
        ))
    }
}

/// Asserts every read-only view of `value` agrees with `control`.
pub fn assert_matches(value: &Value, control: Option<&Control>) {
    let Some(control) = control else {
        assert!(!value.is_valid());
        assert_eq!(format!("{value:?}"), "AnyOf(<invalid>)");
        return;
    };

    assert!(value.is_valid());
    assert_eq!(value.index(), control.index());
    assert_eq!(&Control::of(value), control);

    match control {
        Control::Number(n) => {
            assert_eq!(value.get::<u32, _>(), Some(n));
            assert_eq!(format!("{value:?}"), format!("AnyOf({n:?})"));
        }
        Control::Text(s) => {
            assert_eq!(value.get::<String, _>(), Some(s));
            assert_eq!(format!("{value:?}"), format!("AnyOf({s:?})"));
        }
        Control::Bytes(b) => {
            assert_eq!(value.get::<Vec<u8>, _>(), Some(b));
            assert_eq!(format!("{value:?}"), format!("AnyOf({b:?})"));
        }
    }

    assert_eq!(value.is::<u32, _>(), control.index() == 0);
    assert_eq!(value.is::<String, _>(), control.index() == 1);
    assert_eq!(value.is::<Vec<u8>, _>(), control.index() == 2);
}
