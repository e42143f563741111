#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

extern crate alloc;
#[cfg(any(test, feature = "std"))]
#[cfg_attr(test, macro_use)]
extern crate std;

mod macros;

pub mod alternatives;
pub use alternatives::{
    Alternative,
    Alternatives,
    At,
    CloneAlternatives,
    Member,
    Nth,
    Unique,
};

pub mod dispatch;
pub use dispatch::{
    Exclusive,
    Handlers,
    Owned,
    Shared,
    Visiting,
    Visitor,
};

pub mod hooks;

mod reference;
pub use reference::{
    AnyMut,
    AnyRef,
};

mod repr;
use repr::Repr;

mod traits;

mod violation;
pub use violation::{
    Violation,
    ViolationKind,
};

#[cfg(test)]
mod tests;

/// Holds exactly one value whose type is one of the alternatives `L`, stored inline.
///
/// `L` is a tuple naming the alternatives, e.g. `AnyOf<(u32, String)>` holds either a `u32` or a
/// `String`. The [`AnyOf!`](crate::AnyOf!) macro spells the same type as `AnyOf![u32, String]`.
///
/// ## Using `AnyOf`
/// ```
/// use any_of::AnyOf;
///
/// // the alternative is selected by the type of the value
/// let mut value: AnyOf<(i32, String)> = AnyOf::new(10);
/// assert!(value.is::<i32, _>());
/// assert_eq!(value.get::<i32, _>(), Some(&10));
/// assert_eq!(value.get::<String, _>(), None);
///
/// // storing a different alternative destroys the previous one
/// value.insert(String::from("hello"));
/// assert_eq!(value.index(), 1);
///
/// // exactly one handler runs, the one for the live alternative
/// let description = value.match_ref((
///     |n: &i32| format!("number {n}"),
///     |s: &String| format!("text {s}"),
/// ));
/// assert_eq!(description, "text hello");
/// ```
///
/// ## Moving out
/// Taking the value out leaves an `AnyOf` *invalid*. An invalid instance can only be dropped or
/// given a new value, reading from it is a contract violation, which is reported to the
/// [`hooks`] and then panics.
/// ```
/// use any_of::AnyOf;
///
/// let mut a: AnyOf<(i32, String)> = AnyOf::new(42);
/// let b = a.take();
///
/// assert!(!a.is_valid());
/// assert_eq!(b.get::<i32, _>(), Some(&42));
///
/// // giving it a new value makes it valid again
/// a.insert(7);
/// assert_eq!(a.get::<i32, _>(), Some(&7));
/// ```
pub struct AnyOf<L: Alternatives> {
    repr: Repr<L>,
}

impl<L: Alternatives> AnyOf<L> {
    /// The number of alternatives.
    pub const COUNT: usize = L::COUNT as usize;

    /// Creates an [`AnyOf`] holding `value`, the alternative is selected by the type `T`.
    ///
    /// # Examples
    /// ```
    /// use any_of::AnyOf;
    ///
    /// let value: AnyOf<(u8, &str)> = AnyOf::new("sf");
    /// assert_eq!(value.index(), 1);
    /// ```
    ///
    /// A type that isn't an alternative doesn't compile:
    /// ```compile_fail
    /// use any_of::AnyOf;
    ///
    /// let value: AnyOf<(u8, &str)> = AnyOf::new(1.5_f64);
    /// ```
    #[inline]
    pub fn new<T, I>(value: T) -> Self
    where
        L: Member<T, I>,
    {
        AnyOf {
            repr: Repr::new(value),
        }
    }

    /// Creates an [`AnyOf`] holding `value`, explicitly naming the alternative `T`.
    ///
    /// # Examples
    /// ```
    /// use any_of::AnyOf;
    ///
    /// let value = AnyOf::<(u64, String)>::from_type::<String, _>("chicago".into());
    /// assert!(value.is::<String, _>());
    /// ```
    #[inline]
    pub fn from_type<T, I>(value: T) -> Self
    where
        L: Member<T, I>,
    {
        AnyOf::new(value)
    }

    /// Creates an [`AnyOf`] holding `value` as the alternative at position `N`.
    ///
    /// The second generic argument is inferred, see [`Unique`].
    ///
    /// # Examples
    /// ```
    /// use any_of::AnyOf;
    ///
    /// let value = AnyOf::<(u32, char)>::from_index::<1, _>('x');
    /// assert_eq!(value.index(), 1);
    /// ```
    #[inline]
    pub fn from_index<const N: usize, P>(value: Alternative<L, N>) -> Self
    where
        L: Nth<N> + Unique<P>,
    {
        // `Nth` is only implemented for positions that exist, which always fit in a `u8`
        let index = N as u8;

        // SAFETY: `Nth` guarantees the alternative at `N` has the type of `value`
        AnyOf {
            repr: unsafe { Repr::from_raw_parts(index, value) },
        }
    }

    /// Returns the position of the alternative `T`.
    ///
    /// # Examples
    /// ```
    /// use any_of::AnyOf;
    ///
    /// type Value = AnyOf<(u8, char, bool)>;
    /// const BOOL: usize = Value::index_of::<bool, _>();
    /// assert_eq!(BOOL, 2);
    /// ```
    #[inline]
    pub const fn index_of<T, I>() -> usize
    where
        L: Member<T, I>,
    {
        <L as Member<T, I>>::INDEX as usize
    }

    /// Returns `false` if the value was moved out. Legal in every state.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.repr.is_valid()
    }

    /// Returns the position of the live alternative.
    ///
    /// # Panics
    /// If `self` is invalid.
    #[inline]
    #[track_caller]
    pub fn index(&self) -> usize {
        usize::from(self.repr.index("index"))
    }

    /// Returns `true` if the live alternative is a `T`.
    ///
    /// # Panics
    /// If `self` is invalid.
    #[inline]
    #[track_caller]
    pub fn is<T, I>(&self) -> bool
    where
        L: Member<T, I>,
    {
        self.repr.is::<T, I>("is")
    }

    /// Returns a reference to the value if the live alternative is a `T`.
    ///
    /// # Panics
    /// If `self` is invalid.
    #[inline]
    #[track_caller]
    pub fn get<T, I>(&self) -> Option<&T>
    where
        L: Member<T, I>,
    {
        self.repr.get::<T, I>()
    }

    /// Returns a mutable reference to the value if the live alternative is a `T`.
    ///
    /// # Panics
    /// If `self` is invalid.
    #[inline]
    #[track_caller]
    pub fn get_mut<T, I>(&mut self) -> Option<&mut T>
    where
        L: Member<T, I>,
    {
        self.repr.get_mut::<T, I>()
    }

    /// Returns a reference to the value without checking it's a `T`.
    ///
    /// With `debug_assertions` enabled a mismatch is still reported.
    ///
    /// # Safety
    /// The live alternative must be a `T`.
    ///
    /// # Panics
    /// If `self` is invalid.
    #[inline]
    #[track_caller]
    pub unsafe fn get_unchecked<T, I>(&self) -> &T
    where
        L: Member<T, I>,
    {
        self.repr.get_unchecked::<T, I>()
    }

    /// Returns a mutable reference to the value without checking it's a `T`.
    ///
    /// # Safety
    /// The live alternative must be a `T`.
    ///
    /// # Panics
    /// If `self` is invalid.
    #[inline]
    #[track_caller]
    pub unsafe fn get_unchecked_mut<T, I>(&mut self) -> &mut T
    where
        L: Member<T, I>,
    {
        self.repr.get_unchecked_mut::<T, I>()
    }

    /// Moves the value out if the live alternative is a `T`, otherwise destroys it. Either way
    /// `self` is left invalid.
    ///
    /// # Examples
    /// ```
    /// use any_of::AnyOf;
    ///
    /// let mut value: AnyOf<(u8, String)> = AnyOf::new(String::from("sea"));
    /// assert_eq!(value.take_as::<String, _>().as_deref(), Some("sea"));
    /// assert!(!value.is_valid());
    /// ```
    ///
    /// # Panics
    /// If `self` is invalid.
    #[inline]
    #[track_caller]
    pub fn take_as<T, I>(&mut self) -> Option<T>
    where
        L: Member<T, I>,
    {
        self.repr.take_as::<T, I>()
    }

    /// Consumes `self`, returning the value if the live alternative is a `T`.
    ///
    /// # Panics
    /// If `self` is invalid.
    #[inline]
    #[track_caller]
    pub fn into_as<T, I>(mut self) -> Option<T>
    where
        L: Member<T, I>,
    {
        self.repr.take_as::<T, I>()
    }

    /// Stores `value`, returning a mutable reference to it.
    ///
    /// If a `T` is already live it's assigned to, otherwise the live alternative is destroyed
    /// first. Legal on an invalid `AnyOf`.
    ///
    /// # Examples
    /// ```
    /// use any_of::AnyOf;
    ///
    /// let mut value: AnyOf<(u8, Vec<u8>)> = AnyOf::new(1_u8);
    /// value.insert(vec![1, 2]).push(3);
    /// assert_eq!(value.get::<Vec<u8>, _>(), Some(&vec![1, 2, 3]));
    /// ```
    #[inline]
    pub fn insert<T, I>(&mut self, value: T) -> &mut T
    where
        L: Member<T, I>,
    {
        self.repr.insert::<T, I>(value)
    }

    /// Destroys the live alternative, then stores the `T` built by `make`.
    ///
    /// If `make` panics, `self` is left invalid.
    #[inline]
    pub fn emplace<T, I, F>(&mut self, make: F) -> &mut T
    where
        L: Member<T, I>,
        F: FnOnce() -> T,
    {
        self.repr.emplace::<T, I, F>(make)
    }

    /// Stores `value`, returning the previous [`AnyOf`], which is invalid if `self` was.
    ///
    /// # Examples
    /// ```
    /// use any_of::AnyOf;
    ///
    /// let mut value: AnyOf<(u8, char)> = AnyOf::new(1_u8);
    /// let previous = value.replace('a');
    /// assert_eq!(previous.get::<u8, _>(), Some(&1));
    /// assert_eq!(value.get::<char, _>(), Some(&'a'));
    /// ```
    #[inline]
    pub fn replace<T, I>(&mut self, value: T) -> Self
    where
        L: Member<T, I>,
    {
        AnyOf {
            repr: self.repr.replace::<T, I>(value),
        }
    }

    /// Moves the value into a new [`AnyOf`], leaving `self` invalid.
    ///
    /// # Panics
    /// If `self` is invalid.
    #[inline]
    #[track_caller]
    #[must_use = "the taken value is dropped if unused, use `take_as` to destroy it in place"]
    pub fn take(&mut self) -> Self {
        AnyOf {
            repr: self.repr.take(),
        }
    }

    /// Calls the handler for the live alternative with a shared reference to it.
    ///
    /// `cases` is a tuple with one closure per alternative, in order, each closure's argument
    /// must be annotated with its type.
    ///
    /// # Panics
    /// If `self` is invalid.
    #[inline]
    #[track_caller]
    pub fn match_ref<'a, H>(&'a self, cases: H) -> H::Output
    where
        H: Handlers<'a, L, Shared>,
    {
        self.repr.dispatch_ref(cases, "match_ref")
    }

    /// Calls the handler for the live alternative with a mutable reference to it.
    ///
    /// # Examples
    /// ```
    /// use any_of::AnyOf;
    ///
    /// let mut value: AnyOf<(u32, String)> = AnyOf::new(String::from("a"));
    /// value.match_mut((|n: &mut u32| *n += 1, |s: &mut String| s.push('b')));
    /// assert_eq!(value.get::<String, _>().map(String::as_str), Some("ab"));
    /// ```
    ///
    /// # Panics
    /// If `self` is invalid.
    #[inline]
    #[track_caller]
    pub fn match_mut<'a, H>(&'a mut self, cases: H) -> H::Output
    where
        H: Handlers<'a, L, Exclusive>,
    {
        self.repr.dispatch_mut(cases, "match_mut")
    }

    /// Consumes `self`, moving the live alternative into its handler.
    ///
    /// # Panics
    /// If `self` is invalid.
    #[inline]
    #[track_caller]
    pub fn match_into<'a, H>(mut self, cases: H) -> H::Output
    where
        H: Handlers<'a, L, Owned>,
    {
        self.repr.dispatch_into(cases, "match_into")
    }

    /// Calls `visitor` with a shared reference to the live alternative.
    ///
    /// # Panics
    /// If `self` is invalid.
    #[inline]
    #[track_caller]
    pub fn visit<'a, V>(&'a self, visitor: V) -> <Visiting<V> as Handlers<'a, L, Shared>>::Output
    where
        Visiting<V>: Handlers<'a, L, Shared>,
    {
        self.repr.dispatch_ref(Visiting(visitor), "visit")
    }

    /// Calls `visitor` with a mutable reference to the live alternative.
    ///
    /// # Panics
    /// If `self` is invalid.
    #[inline]
    #[track_caller]
    pub fn visit_mut<'a, V>(
        &'a mut self,
        visitor: V,
    ) -> <Visiting<V> as Handlers<'a, L, Exclusive>>::Output
    where
        Visiting<V>: Handlers<'a, L, Exclusive>,
    {
        self.repr.dispatch_mut(Visiting(visitor), "visit_mut")
    }

    /// Consumes `self`, moving the live alternative into `visitor`.
    ///
    /// # Panics
    /// If `self` is invalid.
    #[inline]
    #[track_caller]
    pub fn visit_into<'a, V>(mut self, visitor: V) -> <Visiting<V> as Handlers<'a, L, Owned>>::Output
    where
        Visiting<V>: Handlers<'a, L, Owned>,
    {
        self.repr.dispatch_into(Visiting(visitor), "visit_into")
    }
}

static_assertions::assert_eq_size!(AnyOf<(u8,)>, [u8; 2]);
static_assertions::assert_eq_size!(AnyOf<(u32, u8)>, [u32; 2]);
static_assertions::assert_eq_size!(AnyOf<(&'static u8, &'static str)>, [usize; 3]);
static_assertions::assert_not_impl_any!(AnyOf<(u8, u16)>: Copy);
static_assertions::assert_impl_all!(AnyOf<(u8, alloc::string::String)>: Send, Sync, Clone);
static_assertions::assert_not_impl_any!(AnyOf<(u8, alloc::rc::Rc<u8>)>: Send, Sync);
