// This file is part of dynamic-array.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Iterator support for [`DynamicArray`](crate::DynamicArray).
//!
//! - `IntoIter<T, M>` yields by value and supports `DoubleEndedIterator`,
//!   `ExactSizeIterator`, and `FusedIterator`. It owns the block: elements
//!   not yet yielded are destroyed when the iterator drops, and the block
//!   goes back to the memory source afterwards.
//! - `&DynamicArray` and `&mut DynamicArray` iterate as slices.

// Crate imports
use crate::{raw::RawBuf, source::MemorySource, vec::DynamicArray};

// Core imports
use core::{iter::FusedIterator, ptr, slice};

/// Owned iterator returned by `DynamicArray::into_iter()`.
///
/// Yields elements by value from front to back and supports double-ended
/// iteration via [`DoubleEndedIterator`].
pub struct IntoIter<T, M: MemorySource> {
    pub(crate) buf: RawBuf<T, M>,
    pub(crate) front: usize,
    pub(crate) back: usize, // exclusive
}

impl<T, M: MemorySource> IntoIter<T, M> {
    /// Views the elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: [front, back) is the initialized, unyielded range.
        unsafe { slice::from_raw_parts(self.buf.ptr().add(self.front), self.back - self.front) }
    }
}

impl<T, M: MemorySource> Iterator for IntoIter<T, M> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front < self.back {
            let i = self.front;
            self.front += 1;
            // SAFETY: slot i was initialized and is yielded exactly once;
            // advancing front excludes it from the drop range.
            Some(unsafe { self.buf.ptr().add(i).read() })
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = self.back - self.front;
        (rem, Some(rem))
    }
}

impl<T, M: MemorySource> DoubleEndedIterator for IntoIter<T, M> {
    fn next_back(&mut self) -> Option<T> {
        if self.front < self.back {
            self.back -= 1;
            // SAFETY: as for next(); shrinking back excludes the slot.
            Some(unsafe { self.buf.ptr().add(self.back).read() })
        } else {
            None
        }
    }
}

impl<T, M: MemorySource> FusedIterator for IntoIter<T, M> {}
impl<T, M: MemorySource> ExactSizeIterator for IntoIter<T, M> {}

impl<T, M: MemorySource> Drop for IntoIter<T, M> {
    fn drop(&mut self) {
        // SAFETY: [front, back) holds the elements never yielded; the
        // buffer releases the block afterwards.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.buf.ptr().add(self.front),
                self.back - self.front,
            ));
        }
    }
}

impl<'a, T, M: MemorySource> IntoIterator for &'a DynamicArray<T, M> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}
impl<'a, T, M: MemorySource> IntoIterator for &'a mut DynamicArray<T, M> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}
impl<T, M: MemorySource> IntoIterator for DynamicArray<T, M> {
    type Item = T;
    type IntoIter = IntoIter<T, M>;
    fn into_iter(self) -> Self::IntoIter {
        let (buf, len) = self.into_raw_parts();
        IntoIter {
            buf,
            front: 0,
            back: len,
        }
    }
}

#[cfg(test)]
mod tests {
    // Imports
    use super::DynamicArray;
    use core::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_yields_in_order() {
        let v = DynamicArray::from([10, 20, 30, 40]);
        let collected: Vec<_> = v.into_iter().collect();
        assert_eq!(collected, [10, 20, 30, 40]);
    }

    #[test]
    fn test_double_ended_and_nth() {
        let v = DynamicArray::from([10, 20, 30, 40]);
        let mut it = v.into_iter();
        assert_eq!(it.next(), Some(10));
        assert_eq!(it.next_back(), Some(40));
        assert_eq!(it.nth(1), Some(30));
        assert_eq!(it.next(), None);
    }

    #[test]
    fn test_size_hint_tracks_consumption() {
        let v = DynamicArray::from([10, 20, 30, 40]);
        let mut it = v.into_iter();
        assert_eq!(it.size_hint(), (4, Some(4)));
        assert_eq!(it.next(), Some(10));
        assert_eq!(it.size_hint(), (3, Some(3)));
        assert_eq!(it.next_back(), Some(40));
        assert_eq!(it.size_hint(), (2, Some(2)));
        assert_eq!(it.len(), 2);
        assert_eq!(it.next(), Some(20));
        assert_eq!(it.next(), Some(30));
        assert_eq!(it.size_hint(), (0, Some(0)));
        assert_eq!(it.next(), None);
    }

    #[test]
    fn test_as_slice_shrinks_from_both_ends() {
        let v = DynamicArray::from([1, 2, 3, 4, 5]);
        let mut it = v.into_iter();
        it.next();
        it.next_back();
        assert_eq!(it.as_slice(), &[2, 3, 4]);
    }

    #[test]
    fn test_unyielded_elements_are_destroyed() {
        struct Counted(Rc<Cell<usize>>);
        impl Drop for Counted {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }

        let drops = Rc::new(Cell::new(0));
        let mut v: DynamicArray<Counted> = DynamicArray::new();
        for _ in 0..5 {
            v.push(Counted(Rc::clone(&drops)));
        }

        let mut it = v.into_iter();
        drop(it.next()); // yielded: dropped by us
        assert_eq!(drops.get(), 1);
        drop(it); // remaining four: dropped by the iterator
        assert_eq!(drops.get(), 5);
    }

    #[test]
    fn test_non_copy_elements_by_value() {
        let v = DynamicArray::from(["a".to_string(), "b".to_string()]);
        let mut it = v.into_iter();
        let owned: String = it.next().unwrap();
        assert_eq!(owned, "a");
        assert_eq!(it.next_back().as_deref(), Some("b"));
        assert_eq!(it.next(), None);
    }

    #[test]
    fn test_into_iter_shared_and_mut_refs() {
        let mut v = DynamicArray::from([1, 2, 3]);

        let mut collected = Vec::new();
        for x in &v {
            collected.push(*x);
        }
        assert_eq!(collected, [1, 2, 3]);

        for x in &mut v {
            *x *= 10;
        }
        assert_eq!(v.as_slice(), &[10, 20, 30]);
    }

    #[test]
    fn test_into_iter_empty() {
        let v: DynamicArray<u8> = DynamicArray::new();
        let mut it = v.into_iter();
        assert_eq!(it.next(), None);
        assert_eq!(it.size_hint(), (0, Some(0)));
    }

    #[test]
    fn test_into_iter_zero_sized_type() {
        let v = DynamicArray::from([(), (), ()]);
        let it = v.into_iter();
        assert_eq!(it.size_hint(), (3, Some(3)));
        assert_eq!(it.count(), 3);
    }
}
