use core::cmp::Ordering;
use core::fmt;
use core::hash::{
    Hash,
    Hasher,
};

use crate::alternatives::{
    Alternatives,
    CloneAlternatives,
};
use crate::dispatch::Visitor;
use crate::macros::for_each_arity;
use crate::repr::{
    Buffer,
    Slot,
};
use crate::AnyOf;

impl<L: CloneAlternatives> Clone for AnyOf<L> {
    #[inline]
    #[track_caller]
    fn clone(&self) -> Self {
        AnyOf {
            repr: self.repr.clone(),
        }
    }

    #[inline]
    #[track_caller]
    fn clone_from(&mut self, source: &Self) {
        self.repr.clone_from(&source.repr)
    }
}

/// Formats the live alternative as `AnyOf(value)`.
struct DebugValue<'f, 'g>(&'f mut fmt::Formatter<'g>);

impl<T: fmt::Debug> Visitor<&T> for DebugValue<'_, '_> {
    type Output = fmt::Result;

    #[inline]
    fn visit(self, value: &T) -> fmt::Result {
        self.0.debug_tuple("AnyOf").field(value).finish()
    }
}

/// Compares the live alternative with the same alternative held in another buffer.
///
/// Only ever built after checking both sides hold the same index.
struct CompareWith<'o, U>(&'o Buffer<U>);

impl<'o, U> CompareWith<'o, U> {
    /// # Safety
    /// `self.0` must hold a live `T`.
    #[inline(always)]
    unsafe fn other<T>(&self) -> &'o T {
        Slot::<T>::as_ref(self.0)
    }
}

struct Equal<'o, U>(CompareWith<'o, U>);

impl<U, T: PartialEq> Visitor<&T> for Equal<'_, U> {
    type Output = bool;

    #[inline]
    fn visit(self, value: &T) -> bool {
        // SAFETY: we're only dispatched with the alternative that's live in both
        value == unsafe { self.0.other::<T>() }
    }
}

struct PartialCompare<'o, U>(CompareWith<'o, U>);

impl<U, T: PartialOrd> Visitor<&T> for PartialCompare<'_, U> {
    type Output = Option<Ordering>;

    #[inline]
    fn visit(self, value: &T) -> Option<Ordering> {
        // SAFETY: we're only dispatched with the alternative that's live in both
        value.partial_cmp(unsafe { self.0.other::<T>() })
    }
}

struct Compare<'o, U>(CompareWith<'o, U>);

impl<U, T: Ord> Visitor<&T> for Compare<'_, U> {
    type Output = Ordering;

    #[inline]
    fn visit(self, value: &T) -> Ordering {
        // SAFETY: we're only dispatched with the alternative that's live in both
        value.cmp(unsafe { self.0.other::<T>() })
    }
}

struct HashValue<'h, H>(&'h mut H);

impl<H: Hasher, T: Hash> Visitor<&T> for HashValue<'_, H> {
    type Output = ();

    #[inline]
    fn visit(self, value: &T) {
        value.hash(self.0)
    }
}

impl<L: Alternatives> AnyOf<L> {
    /// Returns the live index of both sides, if they're the same alternative.
    #[inline]
    #[track_caller]
    fn same_alternative(&self, other: &Self, operation: &'static str) -> Result<u8, Ordering> {
        let ours = self.repr.index(operation);
        let theirs = other.repr.index(operation);

        match ours.cmp(&theirs) {
            Ordering::Equal => Ok(ours),
            ordering => Err(ordering),
        }
    }

    #[inline(always)]
    fn compare_with(&self) -> CompareWith<'_, L::Overlay> {
        CompareWith(self.repr.buffer())
    }
}

macro_rules! impl_std_traits {
    ($overlay:ident; $len:literal; $($name:ident $f:ident $field:ident $idx:tt),+) => {
        impl<$($name: fmt::Debug),+> fmt::Debug for AnyOf<($($name,)+)> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if !self.is_valid() {
                    return f.write_str("AnyOf(<invalid>)");
                }
                self.visit(DebugValue(f))
            }
        }

        impl<$($name: PartialEq),+> PartialEq for AnyOf<($($name,)+)> {
            #[track_caller]
            fn eq(&self, other: &Self) -> bool {
                match self.same_alternative(other, "eq") {
                    Ok(_) => self.visit(Equal(other.compare_with())),
                    Err(_) => false,
                }
            }
        }

        impl<$($name: Eq),+> Eq for AnyOf<($($name,)+)> {}

        impl<$($name: PartialOrd),+> PartialOrd for AnyOf<($($name,)+)> {
            #[track_caller]
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                match self.same_alternative(other, "partial_cmp") {
                    Ok(_) => self.visit(PartialCompare(other.compare_with())),
                    Err(ordering) => Some(ordering),
                }
            }
        }

        impl<$($name: Ord),+> Ord for AnyOf<($($name,)+)> {
            #[track_caller]
            fn cmp(&self, other: &Self) -> Ordering {
                match self.same_alternative(other, "cmp") {
                    Ok(_) => self.visit(Compare(other.compare_with())),
                    Err(ordering) => ordering,
                }
            }
        }

        impl<$($name: Hash),+> Hash for AnyOf<($($name,)+)> {
            #[track_caller]
            fn hash<H: Hasher>(&self, state: &mut H) {
                state.write_u8(self.repr.index("hash"));
                self.visit(HashValue(state))
            }
        }
    };
}

for_each_arity!(impl_std_traits);
