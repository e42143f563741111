//! Describes the closed set of types an [`AnyOf`](crate::AnyOf) can hold.
//!
//! An alternative set is a tuple `(A0, A1, ..)` with between 1 and 12 elements. The tuple itself is
//! never stored, it only names the alternatives, their positions, and the overlay union whose size
//! and alignment cover every one of them.
//!
//! No alternative may repeat. A set with a repeated type can be named, but no value of it can ever
//! be built, every constructor fails to compile:
//!
//! ```compile_fail
//! use any_of::AnyOf;
//!
//! let value = AnyOf::<(u32, u32)>::from_index::<1, _>(1_u32);
//! ```
//!
//! ```compile_fail
//! use any_of::AnyOf;
//!
//! let value: AnyOf<(u32, String, u32)> = AnyOf::new(String::new());
//! ```
//!
//! Only tuples are alternative sets, and there is no empty set:
//!
//! ```compile_fail
//! use any_of::AnyOf;
//!
//! let value: AnyOf<()> = todo!();
//! ```

use crate::macros::for_each_arity;
use crate::repr::{
    Buffer,
    Discriminant,
    Slot,
};

mod sealed {
    pub trait Sealed {}
    pub trait Select<T, I> {}
    pub trait Distinct<P> {}
    pub trait Position<T, I> {}

    /// Position marker only this crate can name, so a position list can't be spelled out by hand.
    pub struct Index<const N: usize>;
}

/// A closed set of alternative types, implemented for tuples of 1 to 12 elements.
///
/// # Safety
/// This trait is sealed, it's only implemented by this crate.
pub unsafe trait Alternatives: sealed::Sealed + Sized {
    /// The number of alternatives in the set.
    const COUNT: u8;

    /// A union of every alternative, used as the storage buffer.
    #[doc(hidden)]
    type Overlay;

    /// Runs the destructor of the alternative at `index`.
    #[doc(hidden)]
    unsafe fn destroy(buffer: &mut Buffer<Self::Overlay>, index: u8);

    /// Moves the alternative at `index` from `from` into the vacant `to`.
    #[doc(hidden)]
    unsafe fn relocate(from: &Buffer<Self::Overlay>, to: &mut Buffer<Self::Overlay>, index: u8);
}

/// An alternative set whose every alternative implements [`Clone`].
///
/// # Safety
/// Only implemented by this crate.
pub unsafe trait CloneAlternatives: Alternatives {
    #[doc(hidden)]
    unsafe fn copy(from: &Buffer<Self::Overlay>, to: &mut Buffer<Self::Overlay>, index: u8);

    #[doc(hidden)]
    unsafe fn copy_assign(from: &Buffer<Self::Overlay>, to: &mut Buffer<Self::Overlay>, index: u8);
}

/// Position marker for [`Member`], `At<N>` is the `N`-th slot of a set.
///
/// You'll rarely name this yourself, it's inferred from the type you ask for, which is why methods
/// like [`AnyOf::is`](crate::AnyOf::is) take `_` as their second generic argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct At<const N: usize>;

/// Every alternative of the set is a distinct type.
///
/// `P` lists the position of each alternative and is always inferred. When a type repeats its
/// position is ambiguous, so `P` can't be inferred and the set is rejected.
pub trait Unique<P>: Alternatives + sealed::Distinct<P> {}

/// `T` is one of the alternatives of this set.
///
/// `I` is `(At<N>, P)`, the position of `T` and the positions [`Unique`] infers, so membership
/// only holds for sets without repeated types.
pub trait Member<T, I>: Alternatives + sealed::Select<T, I> {
    /// Zero-based position of `T` within the set.
    const INDEX: u8;
}

/// The alternative at position `N`.
pub trait Nth<const N: usize>: Alternatives {
    type Type;
}

/// The type of the `N`-th alternative of the set `L`.
pub type Alternative<L, const N: usize> = <L as Nth<N>>::Type;

/// Overlay unions, one per supported arity.
#[doc(hidden)]
pub mod overlay {
    use core::mem::ManuallyDrop;

    use crate::macros::for_each_arity;

    macro_rules! overlay_union {
        ($overlay:ident; $len:literal; $($name:ident $f:ident $field:ident $idx:tt),+) => {
            #[repr(C)]
            #[allow(dead_code)]
            pub union $overlay<$($name),+> {
                $($field: ManuallyDrop<$name>,)+
            }
        };
    }

    for_each_arity!(overlay_union);
}

macro_rules! impl_alternatives {
    ($overlay:ident; $len:literal; $($name:ident $f:ident $field:ident $idx:tt),+) => {
        impl<$($name),+> sealed::Sealed for ($($name,)+) {}

        unsafe impl<$($name),+> Alternatives for ($($name,)+) {
            const COUNT: u8 = $len;

            type Overlay = overlay::$overlay<$($name),+>;

            #[inline]
            unsafe fn destroy(buffer: &mut Buffer<Self::Overlay>, index: u8) {
                let table: [unsafe fn(&mut Buffer<Self::Overlay>); $len] =
                    [$(Slot::<$name>::destroy),+];
                table[usize::from(index)](buffer)
            }

            #[inline]
            unsafe fn relocate(
                from: &Buffer<Self::Overlay>,
                to: &mut Buffer<Self::Overlay>,
                index: u8,
            ) {
                let table: [unsafe fn(&Buffer<Self::Overlay>, &mut Buffer<Self::Overlay>); $len] =
                    [$(Slot::<$name>::relocate),+];
                table[usize::from(index)](from, to)
            }
        }

        unsafe impl<$($name: Clone),+> CloneAlternatives for ($($name,)+) {
            #[inline]
            unsafe fn copy(from: &Buffer<Self::Overlay>, to: &mut Buffer<Self::Overlay>, index: u8) {
                let table: [unsafe fn(&Buffer<Self::Overlay>, &mut Buffer<Self::Overlay>); $len] =
                    [$(Slot::<$name>::copy),+];
                table[usize::from(index)](from, to)
            }

            #[inline]
            unsafe fn copy_assign(
                from: &Buffer<Self::Overlay>,
                to: &mut Buffer<Self::Overlay>,
                index: u8,
            ) {
                let table: [unsafe fn(&Buffer<Self::Overlay>, &mut Buffer<Self::Overlay>); $len] =
                    [$(Slot::<$name>::copy_assign),+];
                table[usize::from(index)](from, to)
            }
        }

        static_assertions::const_assert!($len < Discriminant::INVALID as usize);

        impl<$($name,)+ $($f,)+> sealed::Distinct<($($f,)+)> for ($($name,)+)
        where
            Self: $(sealed::Position<$name, $f> +)+
        {
        }

        impl<$($name,)+ $($f,)+> Unique<($($f,)+)> for ($($name,)+)
        where
            Self: $(sealed::Position<$name, $f> +)+
        {
        }

        impl_alternatives!(@positions [$($name),+]; $($name $idx),+);
    };
    (@positions $all:tt; $($name:ident $idx:tt),+) => {
        $(impl_alternatives!(@position $all; $name $idx);)+
    };
    (@position [$($all:ident),+]; $name:ident $idx:tt) => {
        impl<$($all),+> sealed::Position<$name, sealed::Index<$idx>> for ($($all,)+) {}

        impl<$($all,)+ P> sealed::Select<$name, (At<$idx>, P)> for ($($all,)+) where Self: Unique<P> {}

        impl<$($all,)+ P> Member<$name, (At<$idx>, P)> for ($($all,)+)
        where
            Self: Unique<P>,
        {
            const INDEX: u8 = $idx;
        }

        impl<$($all),+> Nth<$idx> for ($($all,)+) {
            type Type = $name;
        }
    };
}

for_each_arity!(impl_alternatives);
