use core::marker::PhantomData;
use core::ptr::NonNull;

use crate::alternatives::{
    Alternatives,
    CloneAlternatives,
    Member,
};
use crate::dispatch::{
    Exclusive,
    Handlers,
    Owned,
    Shared,
};
use crate::violation::{
    self,
    ViolationKind,
};

mod buffer;
mod discriminant;
mod slot;

pub use buffer::Buffer;
pub(crate) use discriminant::Discriminant;
pub(crate) use slot::Slot;

/// The storage engine behind [`AnyOf`](crate::AnyOf): a buffer large enough for every alternative
/// of `L`, and a [`Discriminant`] naming the alternative that's live within it.
///
/// Every operation which could run user code, i.e. a destructor or a clone, first marks the
/// discriminant invalid, so a panic never leaves us claiming a value that's already been dropped.
pub(crate) struct Repr<L: Alternatives> {
    buffer: Buffer<L::Overlay>,
    discriminant: Discriminant,
    alternatives: PhantomData<L>,
}

impl<L: Alternatives> Repr<L> {
    /// Rejects alternative sets that can't be indexed by a [`Discriminant`].
    const WELL_FORMED: () = assert!(
        L::COUNT > 0 && L::COUNT < Discriminant::INVALID,
        "an alternative set needs between 1 and 254 alternatives"
    );

    #[inline]
    pub(crate) fn new<T, I>(value: T) -> Self
    where
        L: Member<T, I>,
    {
        // SAFETY: `Member` guarantees the alternative at `INDEX` has type `T`
        unsafe { Self::from_raw_parts(<L as Member<T, I>>::INDEX, value) }
    }

    /// Creates a [`Repr`] holding `value` as the alternative at `index`.
    ///
    /// # Safety
    /// The alternative at `index` must have type `T`.
    #[inline]
    pub(crate) unsafe fn from_raw_parts<T>(index: u8, value: T) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::WELL_FORMED;

        let mut repr = Self::invalid();
        repr.construct(index, value);
        repr
    }

    #[inline(always)]
    const fn invalid() -> Self {
        Repr {
            buffer: Buffer::uninit(),
            discriminant: Discriminant::invalid(),
            alternatives: PhantomData,
        }
    }

    /// Writes `value` into our vacant buffer and marks it live.
    ///
    /// # Safety
    /// * The buffer must be vacant, i.e. the discriminant is invalid
    /// * The alternative at `index` must have type `T`
    #[inline(always)]
    unsafe fn construct<T>(&mut self, index: u8, value: T) {
        debug_assert!(!self.discriminant.is_valid());
        Slot::<T>::construct(&mut self.buffer, value);
        self.discriminant = Discriminant::new(index);
    }

    #[inline(always)]
    pub(crate) fn is_valid(&self) -> bool {
        self.discriminant.is_valid()
    }

    /// Returns the index of the live alternative, reporting an invalid read on behalf of
    /// `operation` if there isn't one.
    #[inline]
    #[track_caller]
    pub(crate) fn index(&self, operation: &'static str) -> u8 {
        match self.discriminant.get() {
            Some(index) => index,
            None => violation::report(ViolationKind::InvalidRead { operation }),
        }
    }

    #[inline]
    #[track_caller]
    pub(crate) fn is<T, I>(&self, operation: &'static str) -> bool
    where
        L: Member<T, I>,
    {
        self.index(operation) == <L as Member<T, I>>::INDEX
    }

    #[inline]
    #[track_caller]
    pub(crate) fn get<T, I>(&self) -> Option<&T>
    where
        L: Member<T, I>,
    {
        if self.is::<T, I>("get") {
            // SAFETY: we just checked the live alternative is a `T`
            Some(unsafe { Slot::<T>::as_ref(&self.buffer) })
        } else {
            None
        }
    }

    #[inline]
    #[track_caller]
    pub(crate) fn get_mut<T, I>(&mut self) -> Option<&mut T>
    where
        L: Member<T, I>,
    {
        if self.is::<T, I>("get_mut") {
            // SAFETY: we just checked the live alternative is a `T`
            Some(unsafe { Slot::<T>::as_mut(&mut self.buffer) })
        } else {
            None
        }
    }

    /// # Safety
    /// The live alternative must be a `T`.
    #[inline]
    #[track_caller]
    pub(crate) unsafe fn get_unchecked<T, I>(&self) -> &T
    where
        L: Member<T, I>,
    {
        self.check_alternative::<T, I>("get_unchecked");
        Slot::<T>::as_ref(&self.buffer)
    }

    /// # Safety
    /// The live alternative must be a `T`.
    #[inline]
    #[track_caller]
    pub(crate) unsafe fn get_unchecked_mut<T, I>(&mut self) -> &mut T
    where
        L: Member<T, I>,
    {
        self.check_alternative::<T, I>("get_unchecked_mut");
        Slot::<T>::as_mut(&mut self.buffer)
    }

    /// An invalid read is always reported, a mismatched alternative only with debug assertions.
    #[inline(always)]
    #[track_caller]
    fn check_alternative<T, I>(&self, operation: &'static str)
    where
        L: Member<T, I>,
    {
        let found = self.index(operation);

        cfg_if::cfg_if! {
            if #[cfg(debug_assertions)] {
                let expected = <L as Member<T, I>>::INDEX;
                if found != expected {
                    violation::report(ViolationKind::AlternativeMismatch { expected, found });
                }
            } else {
                let _ = found;
            }
        }
    }

    /// Moves the live alternative out if it's a `T`. In either case we're left invalid.
    #[inline]
    #[track_caller]
    pub(crate) fn take_as<T, I>(&mut self) -> Option<T>
    where
        L: Member<T, I>,
    {
        let index = self.index("take_as");
        self.discriminant.invalidate();

        if index == <L as Member<T, I>>::INDEX {
            // SAFETY: the live alternative was a `T`, and we've marked the buffer vacant
            Some(unsafe { Slot::<T>::read(&self.buffer) })
        } else {
            // SAFETY: `index` was the live alternative
            unsafe { L::destroy(&mut self.buffer, index) };
            None
        }
    }

    /// Stores `value`, reusing the live `T` if there is one, and returns a reference to it.
    #[inline]
    pub(crate) fn insert<T, I>(&mut self, value: T) -> &mut T
    where
        L: Member<T, I>,
    {
        let index = <L as Member<T, I>>::INDEX;

        if self.discriminant.get() == Some(index) {
            // dropping the previous `T` might panic, which leaves us vacant
            self.discriminant.invalidate();
            // SAFETY: the buffer holds a live `T`
            unsafe { Slot::<T>::move_assign(&mut self.buffer, value) };
            self.discriminant = Discriminant::new(index);
        } else {
            self.clear();
            // SAFETY: `clear` left the buffer vacant, and `Member` guarantees the type of `index`
            unsafe { self.construct(index, value) };
        }

        // SAFETY: we just stored a `T`
        unsafe { Slot::<T>::as_mut(&mut self.buffer) }
    }

    /// Destroys the live alternative, then stores the `T` returned by `make`.
    ///
    /// If `make` panics we're left invalid.
    #[inline]
    pub(crate) fn emplace<T, I, F>(&mut self, make: F) -> &mut T
    where
        L: Member<T, I>,
        F: FnOnce() -> T,
    {
        self.clear();
        let value = make();

        // SAFETY: `clear` left the buffer vacant, and `Member` guarantees the type of `INDEX`
        unsafe {
            self.construct(<L as Member<T, I>>::INDEX, value);
            Slot::<T>::as_mut(&mut self.buffer)
        }
    }

    /// Stores `value` and returns a [`Repr`] with whatever we held before, which may be invalid.
    #[inline]
    pub(crate) fn replace<T, I>(&mut self, value: T) -> Self
    where
        L: Member<T, I>,
    {
        let previous = self.relocate_out();

        // SAFETY: `relocate_out` left the buffer vacant, and `Member` guarantees the type
        unsafe { self.construct(<L as Member<T, I>>::INDEX, value) };
        previous
    }

    /// Moves the live alternative into a new [`Repr`], leaving us invalid.
    #[inline]
    #[track_caller]
    pub(crate) fn take(&mut self) -> Self {
        self.index("take");
        self.relocate_out()
    }

    #[inline]
    fn relocate_out(&mut self) -> Self {
        let mut other = Self::invalid();

        if let Some(index) = self.discriminant.get() {
            self.discriminant.invalidate();
            // SAFETY: `index` was live, `other` is vacant, and we've marked ourselves vacant
            unsafe {
                L::relocate(&self.buffer, &mut other.buffer, index);
            }
            other.discriminant = Discriminant::new(index);
        }

        other
    }

    /// Destroys the live alternative, if any, leaving us invalid.
    #[inline]
    pub(crate) fn clear(&mut self) {
        if let Some(index) = self.discriminant.get() {
            self.discriminant.invalidate();
            // SAFETY: `index` was the live alternative
            unsafe { L::destroy(&mut self.buffer, index) }
        }
    }

    #[inline]
    #[track_caller]
    pub(crate) fn dispatch_ref<'a, H>(&'a self, handlers: H, operation: &'static str) -> H::Output
    where
        H: Handlers<'a, L, Shared>,
    {
        let index = self.index(operation);
        // SAFETY: `index` is live, and the buffer is borrowed for `'a`
        unsafe { handlers.dispatch(NonNull::from(&self.buffer), index) }
    }

    #[inline]
    #[track_caller]
    pub(crate) fn dispatch_mut<'a, H>(
        &'a mut self,
        handlers: H,
        operation: &'static str,
    ) -> H::Output
    where
        H: Handlers<'a, L, Exclusive>,
    {
        let index = self.index(operation);
        // SAFETY: `index` is live, and the buffer is exclusively borrowed for `'a`
        unsafe { handlers.dispatch(NonNull::from(&mut self.buffer), index) }
    }

    /// Moves the live alternative into its handler, leaving us invalid.
    #[inline]
    #[track_caller]
    pub(crate) fn dispatch_into<'a, H>(&mut self, handlers: H, operation: &'static str) -> H::Output
    where
        H: Handlers<'a, L, Owned>,
    {
        let index = self.index(operation);
        self.discriminant.invalidate();
        // SAFETY: `index` was live, and we've marked the buffer vacant before moving out of it
        unsafe { handlers.dispatch(NonNull::from(&mut self.buffer), index) }
    }

    /// Returns the buffer, for callers that know which alternative is live.
    #[inline(always)]
    pub(crate) fn buffer(&self) -> &Buffer<L::Overlay> {
        &self.buffer
    }
}

impl<L: CloneAlternatives> Clone for Repr<L> {
    #[inline]
    #[track_caller]
    fn clone(&self) -> Self {
        let index = self.index("clone");
        let mut repr = Self::invalid();

        // SAFETY: `index` is live in `self`, and `repr` is vacant
        unsafe {
            L::copy(&self.buffer, &mut repr.buffer, index);
        }
        repr.discriminant = Discriminant::new(index);

        repr
    }

    #[inline]
    #[track_caller]
    fn clone_from(&mut self, source: &Self) {
        let index = source.index("clone_from");

        if self.discriminant.get() == Some(index) {
            // SAFETY: `index` is live in both
            unsafe { L::copy_assign(&source.buffer, &mut self.buffer, index) }
        } else {
            self.clear();
            // SAFETY: `index` is live in `source`, and `clear` left us vacant
            unsafe { L::copy(&source.buffer, &mut self.buffer, index) }
            self.discriminant = Discriminant::new(index);
        }
    }
}

impl<L: Alternatives> Drop for Repr<L> {
    #[inline]
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use core::cell::Cell;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::Repr;

    type Set = (u32, String, Vec<u8>);

    #[test]
    fn test_take_as_other_alternative() {
        let mut repr = Repr::<Set>::new(String::from("hello"));
        assert_eq!(repr.take_as::<u32, _>(), None);
        assert!(!repr.is_valid());
    }

    #[test]
    fn test_insert_returns_stored() {
        let mut repr = Repr::<Set>::new(vec![1_u8, 2, 3]);

        repr.insert(vec![4_u8, 5]).push(6);
        assert_eq!(repr.index("test"), 2);
        assert_eq!(repr.get::<Vec<u8>, _>(), Some(&vec![4, 5, 6]));

        *repr.insert(5_u32) += 1;
        assert_eq!(repr.get::<u32, _>(), Some(&6));
        assert_eq!(repr.get::<Vec<u8>, _>(), None);
    }

    #[test]
    fn test_replace_on_invalid() {
        let mut repr = Repr::<Set>::new(1_u32);
        let taken = repr.take();
        assert!(taken.is_valid());
        assert!(!repr.is_valid());

        let previous = repr.replace(String::from("world"));
        assert!(!previous.is_valid());
        assert_eq!(repr.get::<String, _>().map(String::as_str), Some("world"));
    }

    #[test]
    fn test_drop_runs_once() {
        let counter = Rc::new(());

        {
            let repr = Repr::<(u8, Rc<()>)>::new(Rc::clone(&counter));
            let mut copy = repr.clone();
            assert_eq!(Rc::strong_count(&counter), 3);

            copy.clear();
            assert_eq!(Rc::strong_count(&counter), 2);
        }

        assert_eq!(Rc::strong_count(&counter), 1);
    }

    #[test]
    fn test_clone_from_other_alternative() {
        let source = Repr::<Set>::new(String::from("source"));
        let mut target = Repr::<Set>::new(7_u32);

        target.clone_from(&source);
        assert_eq!(target.get::<String, _>().map(String::as_str), Some("source"));
        assert_eq!(source.get::<String, _>().map(String::as_str), Some("source"));
    }

    #[test]
    fn test_emplace_panic_leaves_invalid() {
        let mut repr = Repr::<Set>::new(String::from("gone"));
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            repr.emplace::<u32, _, _>(|| panic!("boom"));
        }));

        assert!(result.is_err());
        assert!(!repr.is_valid());
    }

    /// Counts its drops, and panics while being dropped if `explode` is set.
    struct Fuse<'a> {
        drops: &'a Cell<usize>,
        explode: bool,
    }

    impl Drop for Fuse<'_> {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
            if self.explode {
                panic!("exploded");
            }
        }
    }

    #[test]
    fn test_insert_panicking_drop() {
        let drops = Cell::new(0);
        let mut repr = Repr::<(u8, Fuse<'_>)>::new(Fuse {
            drops: &drops,
            explode: true,
        });

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            repr.insert(Fuse {
                drops: &drops,
                explode: false,
            });
        }));

        // the previous value was dropped, and so was the one we never stored
        assert!(result.is_err());
        assert!(!repr.is_valid());
        assert_eq!(drops.get(), 2);

        drop(repr);
        assert_eq!(drops.get(), 2);
    }
}
