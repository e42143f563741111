//! Different ways in which we can create a [`Value`] and its "control". We then run various actions
//! on them, which are defined in the [`super::actions`] module.

use arbitrary::Arbitrary;

use crate::{
    assert_matches,
    Control,
    Value,
};

#[derive(Arbitrary, Debug)]
pub enum Creation<'a> {
    /// Create using [`AnyOf::new`]
    New(Control),
    /// Create using [`AnyOf::from_type`]
    FromType(Control),
    /// Create the text alternative using [`AnyOf::from_index`]
    FromIndexText(&'a str),
    /// Create the bytes alternative using [`AnyOf::from_index`]
    FromIndexBytes(&'a [u8]),
    /// Create through a `clone` of another creation
    Cloned(Box<Creation<'a>>),
    /// Create using [`AnyOf::take`] on another creation, leaving the source invalid
    Taken(Box<Creation<'a>>),
    /// Create another value, then take everything out of it, leaving an invalid value
    Invalid(Control),
}

impl Creation<'_> {
    pub fn create(self) -> (Value, Option<Control>) {
        use Creation::*;

        match self {
            New(control) => (control.clone().into_value(), Some(control)),
            FromType(control) => {
                let value = match control.clone() {
                    Control::Number(n) => Value::from_type::<u32, _>(n),
                    Control::Text(s) => Value::from_type::<String, _>(s),
                    Control::Bytes(b) => Value::from_type::<Vec<u8>, _>(b),
                };
                (value, Some(control))
            }
            FromIndexText(s) => {
                let value = Value::from_index::<1, _>(s.to_string());
                (value, Some(Control::Text(s.to_string())))
            }
            FromIndexBytes(b) => {
                let value = Value::from_index::<2, _>(b.to_vec());
                (value, Some(Control::Bytes(b.to_vec())))
            }
            Cloned(creation) => {
                let (source, control) = creation.create();
                if control.is_none() {
                    // cloning an invalid value is a violation
                    return (source, control);
                }

                let clone = source.clone();
                assert_eq!(clone, source);
                drop(source);

                (clone, control)
            }
            Taken(creation) => {
                let (mut source, control) = creation.create();
                if control.is_none() {
                    return (source, control);
                }

                let taken = source.take();
                assert_matches(&source, None);

                (taken, control)
            }
            Invalid(control) => {
                let mut value = control.into_value();
                let _ = value.take();
                (value, None)
            }
        }
    }
}
