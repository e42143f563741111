//! Single-address containers for one reference alternative.
//!
//! A reference is never null, so "holds nothing" can be encoded as the null address and no
//! separate discriminant byte is needed. [`AnyRef`] and [`AnyMut`] are exactly the size of the
//! reference they hold:
//!
//! ```
//! use core::mem::size_of;
//! use any_of::AnyRef;
//!
//! assert_eq!(size_of::<AnyRef<'_, u64>>(), size_of::<&u64>());
//! assert_eq!(size_of::<AnyRef<'_, str>>(), size_of::<&str>());
//! ```

use core::fmt;

use crate::dispatch::Visitor;
use crate::violation::{
    self,
    ViolationKind,
};

/// Holds a `&'a T`, or nothing after the reference was taken out.
#[derive(Copy, Clone)]
pub struct AnyRef<'a, T: ?Sized> {
    address: Option<&'a T>,
}

impl<'a, T: ?Sized> AnyRef<'a, T> {
    /// The number of alternatives, a reference container only ever has one.
    pub const COUNT: usize = 1;

    #[inline]
    pub const fn new(reference: &'a T) -> Self {
        AnyRef {
            address: Some(reference),
        }
    }

    /// Returns `true` if we hold a reference.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.address.is_some()
    }

    /// Returns the index of the live alternative, which is always `0`.
    ///
    /// # Panics
    /// If we don't hold a reference.
    #[inline]
    #[track_caller]
    pub fn index(&self) -> usize {
        self.expect("index");
        0
    }

    /// Returns the reference we hold.
    ///
    /// # Panics
    /// If we don't hold a reference.
    #[inline]
    #[track_caller]
    pub fn get(&self) -> &'a T {
        self.expect("get")
    }

    /// Stores `reference`, replacing whatever we held.
    #[inline]
    pub fn insert(&mut self, reference: &'a T) -> &'a T {
        self.address = Some(reference);
        reference
    }

    /// Moves the reference into a new container, leaving us invalid.
    ///
    /// # Panics
    /// If we don't hold a reference.
    #[inline]
    #[track_caller]
    pub fn take(&mut self) -> Self {
        AnyRef::new(self.take_for("take"))
    }

    /// Moves the reference out, leaving us invalid.
    ///
    /// # Panics
    /// If we don't hold a reference.
    #[inline]
    #[track_caller]
    pub fn take_ref(&mut self) -> &'a T {
        self.take_for("take_ref")
    }

    /// Returns the reference we hold.
    ///
    /// # Panics
    /// If we don't hold a reference.
    #[inline]
    #[track_caller]
    pub fn into_inner(self) -> &'a T {
        self.expect("into_inner")
    }

    #[inline]
    #[track_caller]
    pub fn visit<V: Visitor<&'a T>>(&self, visitor: V) -> V::Output {
        visitor.visit(self.expect("visit"))
    }

    #[inline(always)]
    #[track_caller]
    fn expect(&self, operation: &'static str) -> &'a T {
        match self.address {
            Some(reference) => reference,
            None => violation::report(ViolationKind::InvalidRead { operation }),
        }
    }

    #[inline(always)]
    #[track_caller]
    fn take_for(&mut self, operation: &'static str) -> &'a T {
        match self.address.take() {
            Some(reference) => reference,
            None => violation::report(ViolationKind::InvalidRead { operation }),
        }
    }
}

impl<'a, T: ?Sized> From<&'a T> for AnyRef<'a, T> {
    #[inline]
    fn from(reference: &'a T) -> Self {
        AnyRef::new(reference)
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for AnyRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.address {
            Some(reference) => f.debug_tuple("AnyRef").field(&reference).finish(),
            None => f.write_str("AnyRef(<invalid>)"),
        }
    }
}

/// Holds a `&'a mut T`, or nothing after the reference was taken out.
pub struct AnyMut<'a, T: ?Sized> {
    address: Option<&'a mut T>,
}

impl<'a, T: ?Sized> AnyMut<'a, T> {
    /// The number of alternatives, a reference container only ever has one.
    pub const COUNT: usize = 1;

    #[inline]
    pub fn new(reference: &'a mut T) -> Self {
        AnyMut {
            address: Some(reference),
        }
    }

    /// Returns `true` if we hold a reference.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.address.is_some()
    }

    /// Returns the index of the live alternative, which is always `0`.
    ///
    /// # Panics
    /// If we don't hold a reference.
    #[inline]
    #[track_caller]
    pub fn index(&self) -> usize {
        if self.address.is_none() {
            violation::report(ViolationKind::InvalidRead { operation: "index" });
        }
        0
    }

    /// # Panics
    /// If we don't hold a reference.
    #[inline]
    #[track_caller]
    pub fn get(&self) -> &T {
        match &self.address {
            Some(reference) => reference,
            None => violation::report(ViolationKind::InvalidRead { operation: "get" }),
        }
    }

    /// # Panics
    /// If we don't hold a reference.
    #[inline]
    #[track_caller]
    pub fn get_mut(&mut self) -> &mut T {
        self.expect_mut("get_mut")
    }

    /// Stores `reference`, replacing whatever we held, and returns it reborrowed.
    #[inline]
    pub fn insert(&mut self, reference: &'a mut T) -> &mut T {
        self.address.insert(reference)
    }

    /// Moves the reference into a new container, leaving us invalid.
    ///
    /// # Panics
    /// If we don't hold a reference.
    #[inline]
    #[track_caller]
    pub fn take(&mut self) -> Self {
        AnyMut::new(self.take_for("take"))
    }

    /// Moves the reference out, leaving us invalid.
    ///
    /// # Panics
    /// If we don't hold a reference.
    #[inline]
    #[track_caller]
    pub fn take_ref(&mut self) -> &'a mut T {
        self.take_for("take_ref")
    }

    /// # Panics
    /// If we don't hold a reference.
    #[inline]
    #[track_caller]
    pub fn into_inner(self) -> &'a mut T {
        match self.address {
            Some(reference) => reference,
            None => violation::report(ViolationKind::InvalidRead {
                operation: "into_inner",
            }),
        }
    }

    #[inline]
    #[track_caller]
    pub fn visit<'s, V: Visitor<&'s mut T>>(&'s mut self, visitor: V) -> V::Output {
        visitor.visit(self.expect_mut("visit"))
    }

    #[inline(always)]
    #[track_caller]
    fn expect_mut(&mut self, operation: &'static str) -> &mut T {
        match &mut self.address {
            Some(reference) => reference,
            None => violation::report(ViolationKind::InvalidRead { operation }),
        }
    }

    #[inline(always)]
    #[track_caller]
    fn take_for(&mut self, operation: &'static str) -> &'a mut T {
        match self.address.take() {
            Some(reference) => reference,
            None => violation::report(ViolationKind::InvalidRead { operation }),
        }
    }
}

impl<'a, T: ?Sized> From<&'a mut T> for AnyMut<'a, T> {
    #[inline]
    fn from(reference: &'a mut T) -> Self {
        AnyMut::new(reference)
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for AnyMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.address {
            Some(reference) => f.debug_tuple("AnyMut").field(reference).finish(),
            None => f.write_str("AnyMut(<invalid>)"),
        }
    }
}

static_assertions::assert_eq_size!(AnyRef<'static, u64>, &'static u64);
static_assertions::assert_eq_size!(AnyRef<'static, str>, &'static str);
static_assertions::assert_eq_size!(AnyRef<'static, [u8]>, &'static [u8]);
static_assertions::assert_eq_size!(AnyMut<'static, u64>, &'static mut u64);
static_assertions::assert_eq_size!(AnyMut<'static, str>, &'static mut str);
