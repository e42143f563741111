use core::mem::MaybeUninit;

/// Uninitialized storage for exactly one alternative of a set.
///
/// `U` is the overlay union generated for the alternative set, so a `Buffer` is as large as the
/// largest alternative and as aligned as the most strictly aligned one. All of the union's fields
/// live at offset 0, which lets us reinterpret the storage as any single alternative.
///
/// A `Buffer` knows nothing about which alternative is live, it only hands out pointers. Reading
/// through those pointers is only sound when the caller knows what is stored, see `super::Slot`.
#[repr(transparent)]
pub struct Buffer<U> {
    bytes: MaybeUninit<U>,
}

impl<U> Buffer<U> {
    #[inline(always)]
    pub(crate) const fn uninit() -> Self {
        Buffer {
            bytes: MaybeUninit::uninit(),
        }
    }

    #[inline(always)]
    pub(crate) const fn as_ptr<T>(&self) -> *const T {
        self.bytes.as_ptr().cast()
    }

    #[inline(always)]
    pub(crate) fn as_mut_ptr<T>(&mut self) -> *mut T {
        self.bytes.as_mut_ptr().cast()
    }
}

#[cfg(test)]
mod tests {
    use core::mem;

    use super::Buffer;

    #[repr(C)]
    #[allow(dead_code)]
    union Overlay {
        small: u8,
        wide: u64,
        array: [u16; 7],
    }

    #[test]
    fn test_layout() {
        assert_eq!(mem::size_of::<Buffer<Overlay>>(), 16);
        assert_eq!(mem::align_of::<Buffer<Overlay>>(), mem::align_of::<u64>());
    }

    #[test]
    fn test_pointers_alias_storage() {
        let mut buffer = Buffer::<Overlay>::uninit();

        let start = buffer.as_mut_ptr::<u8>() as usize;
        assert_eq!(buffer.as_ptr::<u64>() as usize, start);
        assert_eq!(buffer.as_ptr::<[u16; 7]>() as usize, start);
        assert_eq!(start % mem::align_of::<u64>(), 0);

        unsafe {
            buffer.as_mut_ptr::<u64>().write(u64::MAX);
            assert_eq!(buffer.as_ptr::<u64>().read(), u64::MAX);
        }
    }
}
