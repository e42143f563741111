use core::marker::PhantomData;
use core::ptr;

use super::Buffer;

/// The storage policy for a single alternative `T` living inside a [`Buffer`].
///
/// Every function is `unsafe` for the same reason: a [`Buffer`] doesn't track what it holds. The
/// caller must know, usually by checking a `Discriminant`, that the buffer holds a live `T`, or
/// that it's vacant when we're about to construct into it.
///
/// # Reference alternatives
/// An alternative like `&'a R` or `&'a mut R` is stored as a single non-null address, it never
/// contributes the size of `R` to the buffer, and it has no drop glue, so [`Slot::destroy`] never
/// touches the referent.
pub(crate) struct Slot<T>(PhantomData<T>);

impl<T> Slot<T> {
    /// Writes `value` into the vacant `buffer`.
    #[inline(always)]
    pub(crate) unsafe fn construct<U>(buffer: &mut Buffer<U>, value: T) {
        buffer.as_mut_ptr::<T>().write(value)
    }

    /// Runs the destructor of the `T` held in `buffer`, leaving it vacant.
    #[inline(always)]
    pub(crate) unsafe fn destroy<U>(buffer: &mut Buffer<U>) {
        ptr::drop_in_place(buffer.as_mut_ptr::<T>())
    }

    /// Moves the `T` out of `buffer`. Afterwards the buffer must be treated as vacant.
    #[inline(always)]
    pub(crate) unsafe fn read<U>(buffer: &Buffer<U>) -> T {
        buffer.as_ptr::<T>().read()
    }

    /// Moves the `T` held in `from` into the vacant `to`. `from` must then be treated as vacant,
    /// the caller is responsible for marking it as such.
    #[inline(always)]
    pub(crate) unsafe fn relocate<U>(from: &Buffer<U>, to: &mut Buffer<U>) {
        ptr::copy_nonoverlapping(from.as_ptr::<T>(), to.as_mut_ptr::<T>(), 1)
    }

    /// Replaces the `T` held in `buffer` with `value`, reusing the storage.
    ///
    /// If the previous `T`'s destructor panics the buffer is left vacant and `value` is dropped
    /// while unwinding.
    #[inline(always)]
    pub(crate) unsafe fn move_assign<U>(buffer: &mut Buffer<U>, value: T) {
        Self::destroy(buffer);
        Self::construct(buffer, value)
    }

    #[inline(always)]
    pub(crate) unsafe fn as_ref<U>(buffer: &Buffer<U>) -> &T {
        &*buffer.as_ptr::<T>()
    }

    #[inline(always)]
    pub(crate) unsafe fn as_mut<U>(buffer: &mut Buffer<U>) -> &mut T {
        &mut *buffer.as_mut_ptr::<T>()
    }
}

impl<T: Clone> Slot<T> {
    /// Clones the `T` held in `from` into the vacant `to`.
    #[inline]
    pub(crate) unsafe fn copy<U>(from: &Buffer<U>, to: &mut Buffer<U>) {
        Self::construct(to, Self::as_ref(from).clone())
    }

    /// Clones the `T` held in `from` into the `T` held by `to`, reusing its resources.
    #[inline]
    pub(crate) unsafe fn copy_assign<U>(from: &Buffer<U>, to: &mut Buffer<U>) {
        Self::as_mut(to).clone_from(Self::as_ref(from))
    }
}

static_assertions::const_assert!(!core::mem::needs_drop::<&'static [u8; 1024]>());
static_assertions::const_assert!(!core::mem::needs_drop::<&'static mut [u64; 1024]>());
