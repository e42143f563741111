//! Runs exactly one handler, the one for the live alternative.
//!
//! Handlers are supplied either as a tuple of closures, one per alternative in order, or as a type
//! implementing [`Visitor`] for every alternative, wrapped in [`Visiting`]. Either way, coverage is
//! checked by the compiler: a tuple that's missing a closure, or a visitor missing an impl, doesn't
//! satisfy [`Handlers`].
//!
//! ```
//! use any_of::AnyOf;
//!
//! let value: AnyOf<(u32, String)> = AnyOf::new(String::from("hello"));
//! let length = value.match_ref((|n: &u32| *n as usize, |s: &String| s.len()));
//! assert_eq!(length, 5);
//! ```
//!
//! ```compile_fail
//! use any_of::AnyOf;
//!
//! let value: AnyOf<(u32, String)> = AnyOf::new(12_u32);
//! // there's no handler for `String`
//! let doubled = value.match_ref((|n: &u32| *n * 2,));
//! ```
//!
//! Internally each instantiation builds a table with one non-capturing thunk per alternative, the
//! live index selects the thunk, which recovers the concrete type and calls its handler.

use core::ptr::NonNull;

use crate::alternatives::Alternatives;
use crate::macros::for_each_arity;
use crate::repr::{
    Buffer,
    Slot,
};

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Shared {}
    impl Sealed for super::Exclusive {}
    impl Sealed for super::Owned {}
}

/// How a handler receives the live alternative.
///
/// # Safety
/// Only implemented by this crate.
pub unsafe trait Access<'a>: sealed::Sealed {
    /// The argument passed to a handler for the alternative `T`.
    type Arg<T: 'a>;

    /// # Safety
    /// `buffer` must hold a live `T`, and be valid for this mode of access for `'a`. For
    /// [`Owned`] the buffer must be treated as vacant afterwards.
    #[doc(hidden)]
    unsafe fn extract<T: 'a, U: 'a>(buffer: NonNull<Buffer<U>>) -> Self::Arg<T>;
}

/// Handlers receive `&'a T`.
pub enum Shared {}

/// Handlers receive `&'a mut T`.
pub enum Exclusive {}

/// Handlers receive `T` by value.
pub enum Owned {}

unsafe impl<'a> Access<'a> for Shared {
    type Arg<T: 'a> = &'a T;

    #[inline(always)]
    unsafe fn extract<T: 'a, U: 'a>(buffer: NonNull<Buffer<U>>) -> &'a T {
        Slot::<T>::as_ref(buffer.as_ref())
    }
}

unsafe impl<'a> Access<'a> for Exclusive {
    type Arg<T: 'a> = &'a mut T;

    #[inline(always)]
    unsafe fn extract<T: 'a, U: 'a>(mut buffer: NonNull<Buffer<U>>) -> &'a mut T {
        Slot::<T>::as_mut(buffer.as_mut())
    }
}

unsafe impl<'a> Access<'a> for Owned {
    type Arg<T: 'a> = T;

    #[inline(always)]
    unsafe fn extract<T: 'a, U: 'a>(buffer: NonNull<Buffer<U>>) -> T {
        Slot::<T>::read(buffer.as_ref())
    }
}

/// Handles a value of type `T`.
///
/// Implement this once per alternative, for the argument type of the access mode you dispatch
/// with, e.g. `&T` for [`AnyOf::visit`](crate::AnyOf::visit). Every impl must agree on `Output`.
///
/// ```
/// use any_of::{AnyOf, Visitor};
///
/// struct Describe;
///
/// impl Visitor<&u8> for Describe {
///     type Output = &'static str;
///     fn visit(self, _: &u8) -> Self::Output { "byte" }
/// }
///
/// impl Visitor<&char> for Describe {
///     type Output = &'static str;
///     fn visit(self, _: &char) -> Self::Output { "char" }
/// }
///
/// let value: AnyOf<(u8, char)> = AnyOf::new('x');
/// assert_eq!(value.visit(Describe), "char");
/// ```
pub trait Visitor<T> {
    type Output;

    fn visit(self, value: T) -> Self::Output;
}

/// Adapts a [`Visitor`] into [`Handlers`].
#[derive(Debug, Clone, Copy)]
pub struct Visiting<V>(pub V);

/// A complete set of handlers for the alternatives of `L`, called with access mode `M`.
///
/// # Safety
/// [`Handlers::dispatch`] must call the handler for the alternative at `index`, extracting it
/// with `M`, and nothing else.
pub unsafe trait Handlers<'a, L: Alternatives, M: Access<'a>>: Sized {
    type Output;

    /// # Safety
    /// `buffer` must hold the live alternative at `index`, valid for access mode `M` for `'a`.
    #[doc(hidden)]
    unsafe fn dispatch(self, buffer: NonNull<Buffer<L::Overlay>>, index: u8) -> Self::Output;
}

macro_rules! impl_handlers {
    ($overlay:ident; $len:literal; $($name:ident $f:ident $field:ident $idx:tt),+) => {
        impl_handlers!(
            @impl ($($name,)+), $crate::alternatives::overlay::$overlay<$($name),+>;
            $len; $($name $f $idx),+
        );
    };
    (@impl $tuple:ty, $buffer:ty; $len:literal; $($name:ident $f:ident $idx:tt),+) => {
        unsafe impl<'a, M, $($name,)+ $($f,)+ R> Handlers<'a, $tuple, M> for ($($f,)+)
        where
            M: Access<'a>,
            $($name: 'a,)+
            $($f: FnOnce(<M as Access<'a>>::Arg<$name>) -> R,)+
        {
            type Output = R;

            #[inline]
            unsafe fn dispatch(self, buffer: NonNull<Buffer<$buffer>>, index: u8) -> R {
                let table: [unsafe fn(Self, NonNull<Buffer<$buffer>>) -> R; $len] = [$(
                    |cases: Self, buffer: NonNull<Buffer<$buffer>>| {
                        (cases.$idx)(unsafe { <M as Access<'a>>::extract::<$name, $buffer>(buffer) })
                    },
                )+];
                table[usize::from(index)](self, buffer)
            }
        }

        unsafe impl<'a, M, $($name,)+ V, R> Handlers<'a, $tuple, M> for Visiting<V>
        where
            M: Access<'a>,
            $($name: 'a,)+
            $(V: Visitor<<M as Access<'a>>::Arg<$name>, Output = R>,)+
        {
            type Output = R;

            #[inline]
            unsafe fn dispatch(self, buffer: NonNull<Buffer<$buffer>>, index: u8) -> R {
                let table: [unsafe fn(Self, NonNull<Buffer<$buffer>>) -> R; $len] = [$(
                    |visiting: Self, buffer: NonNull<Buffer<$buffer>>| {
                        let value = unsafe { <M as Access<'a>>::extract::<$name, $buffer>(buffer) };
                        <V as Visitor<<M as Access<'a>>::Arg<$name>>>::visit(visiting.0, value)
                    },
                )+];
                table[usize::from(index)](self, buffer)
            }
        }
    };
}

for_each_arity!(impl_handlers);
