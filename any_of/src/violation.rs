use core::fmt;
use core::panic::Location;

use crate::hooks;

/// What an [`AnyOf`](crate::AnyOf) was asked to do that its contract forbids.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ViolationKind {
    /// A value was read from an instance that doesn't hold one, e.g. after it was moved out.
    InvalidRead {
        /// The method that attempted the read.
        operation: &'static str,
    },
    /// An unchecked access named a different alternative than the live one.
    ///
    /// Only detected when `debug_assertions` are enabled.
    AlternativeMismatch {
        /// Index of the alternative the caller asked for.
        expected: u8,
        /// Index of the live alternative.
        found: u8,
    },
}

/// A contract violation, and where in the calling program it happened.
///
/// This is handed to the hook installed with [`set_violation_hook`](crate::hooks::set_violation_hook),
/// its [`Display`](fmt::Display) impl is the message of the panic that follows.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    kind: ViolationKind,
    location: &'static Location<'static>,
}

impl Violation {
    #[track_caller]
    pub(crate) fn new(kind: ViolationKind) -> Self {
        Violation {
            kind,
            location: Location::caller(),
        }
    }

    #[inline]
    pub fn kind(&self) -> ViolationKind {
        self.kind
    }

    /// The caller of the public [`AnyOf`](crate::AnyOf) method that detected the violation.
    #[inline]
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::InvalidRead { operation } => {
                write!(f, "called `AnyOf::{operation}` on an invalid (moved-from) value")
            }
            ViolationKind::AlternativeMismatch { expected, found } => write!(
                f,
                "unchecked access to alternative {expected}, but alternative {found} is live"
            ),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.location)
    }
}

impl core::error::Error for Violation {}

/// Reports `kind` as a violation at the caller's location.
///
/// Emits a `tracing` event, runs the installed hook, then panics with the violation's message.
#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn report(kind: ViolationKind) -> ! {
    let violation = Violation::new(kind);

    tracing::error!(
        target: "any_of::violation",
        kind = ?violation.kind,
        location = %violation.location,
        "{violation}",
    );
    hooks::invoke(&violation);

    panic!("{violation}")
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::ViolationKind;

    #[test]
    fn test_display() {
        let kind = ViolationKind::InvalidRead { operation: "get" };
        assert_eq!(kind.to_string(), "called `AnyOf::get` on an invalid (moved-from) value");

        let kind = ViolationKind::AlternativeMismatch {
            expected: 0,
            found: 2,
        };
        assert_eq!(kind.to_string(), "unchecked access to alternative 0, but alternative 2 is live");
    }

    #[test]
    #[should_panic(expected = "called `AnyOf::take` on an invalid (moved-from) value at ")]
    fn test_report_panics() {
        super::report(ViolationKind::InvalidRead { operation: "take" });
    }
}
