/// Identifies which alternative of a set is live, or that none is.
///
/// Valid indices are `0..Alternatives::COUNT`, the value [`Discriminant::INVALID`] is reserved to
/// mark a partially-formed container, e.g. one whose value was moved out.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct Discriminant(u8);

impl Discriminant {
    /// Sentinel stored when no alternative is live.
    pub(crate) const INVALID: u8 = u8::MAX;

    #[inline(always)]
    pub(crate) const fn new(index: u8) -> Self {
        debug_assert!(index != Self::INVALID);
        Discriminant(index)
    }

    #[inline(always)]
    pub(crate) const fn invalid() -> Self {
        Discriminant(Self::INVALID)
    }

    #[inline(always)]
    pub(crate) const fn is_valid(self) -> bool {
        self.0 != Self::INVALID
    }

    /// Returns the live index, or `None` if the discriminant is the invalid sentinel.
    #[inline(always)]
    pub(crate) const fn get(self) -> Option<u8> {
        if self.is_valid() {
            Some(self.0)
        } else {
            None
        }
    }

    /// Marks the discriminant invalid. Doesn't run any destructor.
    #[inline(always)]
    pub(crate) fn invalidate(&mut self) {
        self.0 = Self::INVALID;
    }
}

static_assertions::assert_eq_size!(Discriminant, u8);
