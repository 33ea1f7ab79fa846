// This file is part of dynamic-array.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Indexing support for [`DynamicArray`](crate::DynamicArray).
//!
//! `Index` and `IndexMut` mirror slice behavior:
//! - panic on out-of-bounds or inverted ranges;
//! - support all standard range forms, including inclusive ranges;
//! - views are restricted to the live prefix `[0..len)`.
//!
//! The unchecked-access contract lives on
//! [`DynamicArray::get_unchecked`](crate::DynamicArray::get_unchecked)
//! instead; the operators are always checked.

// Crate imports
use crate::{source::MemorySource, vec::DynamicArray};

// Core imports
use core::ops::{
    Index, IndexMut, Range, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive,
};

impl<T, M: MemorySource> Index<usize> for DynamicArray<T, M> {
    type Output = T;
    fn index(&self, i: usize) -> &Self::Output {
        &self.as_slice()[i]
    }
}

// Read-only ranges
impl<T, M: MemorySource> Index<Range<usize>> for DynamicArray<T, M> {
    type Output = [T];
    fn index(&self, r: Range<usize>) -> &Self::Output {
        &self.as_slice()[r]
    }
}
impl<T, M: MemorySource> Index<RangeFrom<usize>> for DynamicArray<T, M> {
    type Output = [T];
    fn index(&self, r: RangeFrom<usize>) -> &Self::Output {
        &self.as_slice()[r]
    }
}
impl<T, M: MemorySource> Index<RangeTo<usize>> for DynamicArray<T, M> {
    type Output = [T];
    fn index(&self, r: RangeTo<usize>) -> &Self::Output {
        &self.as_slice()[r]
    }
}
impl<T, M: MemorySource> Index<RangeToInclusive<usize>> for DynamicArray<T, M> {
    type Output = [T];
    fn index(&self, r: RangeToInclusive<usize>) -> &Self::Output {
        &self.as_slice()[r]
    }
}
impl<T, M: MemorySource> Index<RangeInclusive<usize>> for DynamicArray<T, M> {
    type Output = [T];
    fn index(&self, r: RangeInclusive<usize>) -> &Self::Output {
        &self.as_slice()[r]
    }
}
impl<T, M: MemorySource> Index<RangeFull> for DynamicArray<T, M> {
    type Output = [T];
    fn index(&self, _: RangeFull) -> &Self::Output {
        self.as_slice()
    }
}

// Mutable ranges
impl<T, M: MemorySource> IndexMut<usize> for DynamicArray<T, M> {
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.as_mut_slice()[i]
    }
}
impl<T, M: MemorySource> IndexMut<Range<usize>> for DynamicArray<T, M> {
    fn index_mut(&mut self, r: Range<usize>) -> &mut Self::Output {
        &mut self.as_mut_slice()[r]
    }
}
impl<T, M: MemorySource> IndexMut<RangeFrom<usize>> for DynamicArray<T, M> {
    fn index_mut(&mut self, r: RangeFrom<usize>) -> &mut Self::Output {
        &mut self.as_mut_slice()[r]
    }
}
impl<T, M: MemorySource> IndexMut<RangeTo<usize>> for DynamicArray<T, M> {
    fn index_mut(&mut self, r: RangeTo<usize>) -> &mut Self::Output {
        &mut self.as_mut_slice()[r]
    }
}
impl<T, M: MemorySource> IndexMut<RangeToInclusive<usize>> for DynamicArray<T, M> {
    fn index_mut(&mut self, r: RangeToInclusive<usize>) -> &mut Self::Output {
        &mut self.as_mut_slice()[r]
    }
}
impl<T, M: MemorySource> IndexMut<RangeInclusive<usize>> for DynamicArray<T, M> {
    fn index_mut(&mut self, r: RangeInclusive<usize>) -> &mut Self::Output {
        &mut self.as_mut_slice()[r]
    }
}
impl<T, M: MemorySource> IndexMut<RangeFull> for DynamicArray<T, M> {
    fn index_mut(&mut self, _: RangeFull) -> &mut Self::Output {
        self.as_mut_slice()
    }
}

#[cfg(test)]
mod tests {
    // Imports
    use super::DynamicArray;

    #[test]
    fn test_indexing_and_ranges() {
        let mut v = DynamicArray::from([0, 1, 2, 3, 4]);

        assert_eq!(v[0], 0);
        assert_eq!(&v[1..3], &[1, 2]);
        assert_eq!(&v[2..], &[2, 3, 4]);
        assert_eq!(&v[..3], &[0, 1, 2]);
        assert_eq!(&v[..=2], &[0, 1, 2]);
        assert_eq!(&v[1..=3], &[1, 2, 3]);
        assert_eq!(&v[..], &[0, 1, 2, 3, 4]);

        v[1..3].copy_from_slice(&[10, 20]);
        assert_eq!(v.as_slice(), &[0, 10, 20, 3, 4]);
    }

    #[test]
    fn test_index_mut_single_and_full() {
        let mut v = DynamicArray::from([1, 2, 3]);
        v[1] = 20;
        assert_eq!(v.as_slice(), &[1, 20, 3]);

        let all: &mut [i32] = &mut v[..];
        all.copy_from_slice(&[7, 8, 9]);
        assert_eq!(v.as_slice(), &[7, 8, 9]);
    }

    #[test]
    fn test_index_past_len_within_capacity_panics() {
        // Reserved capacity is raw storage: indexing must respect len,
        // not capacity.
        let mut v: DynamicArray<i32> = DynamicArray::with_capacity(8);
        v.push(1);
        let v = std::panic::AssertUnwindSafe(v);
        assert!(std::panic::catch_unwind(|| v[1]).is_err());
    }

    #[test]
    fn test_empty_ranges_work() {
        let v = DynamicArray::from([1, 2, 3]);
        assert_eq!(&v[1..1], &[] as &[i32]);
        assert_eq!(&v[..0], &[] as &[i32]);
        assert_eq!(&v[3..3], &[] as &[i32]);
    }

    #[test]
    #[should_panic]
    fn test_oob_panics() {
        let v: DynamicArray<i32> = DynamicArray::new();
        let _ = v[0];
    }

    #[test]
    #[should_panic]
    #[allow(clippy::reversed_empty_ranges)]
    fn test_inverted_range_panics() {
        let v = DynamicArray::from([1, 2, 3]);
        let _ = &v[2..1];
    }

    #[test]
    #[should_panic]
    fn test_inclusive_upper_oob_panics() {
        let v = DynamicArray::from([1, 2, 3]);
        let _ = &v[..=3];
    }

    #[test]
    fn test_mut_inclusive_range() {
        let mut v = DynamicArray::from([0, 1, 2, 3]);
        v[1..=2].copy_from_slice(&[9, 8]);
        assert_eq!(v.as_slice(), &[0, 9, 8, 3]);
    }
}
