use std::{iter::FusedIterator, mem::transmute_copy, ops::RangeInclusive};

/// Trait for enums that represent a contiguous sequence.
///
/// # Safety
///
/// Must only be implemented for primitive `#[repr(u8)]` enums with contiguous variants.
pub unsafe trait Enum: Copy + Ord {
    /// A contiguous range of variants.
    const RANGE: RangeInclusive<Self>;

    /// Casts to integer.
    fn repr(&self) -> u8;

    /// Casts from integer, or returns `None` if out of range.
    #[inline(always)]
    fn try_from_repr(i: u8) -> Option<Self> {
        if (Self::RANGE.start().repr()..=Self::RANGE.end().repr()).contains(&i) {
            Some(unsafe { transmute_copy(&i) })
        } else {
            None
        }
    }

    /// Casts from integer.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    #[inline(always)]
    fn from_repr(i: u8) -> Self {
        match Self::try_from_repr(i) {
            Some(v) => v,
            None => panic!("`{i}` is out of range"),
        }
    }

    /// An iterator over all variants.
    #[inline(always)]
    fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator + FusedIterator {
        (Self::RANGE.start().repr()..=Self::RANGE.end().repr()).map(Self::from_repr)
    }
}
