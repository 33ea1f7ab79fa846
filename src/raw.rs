// This file is part of dynamic-array.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The owning raw block behind a `DynamicArray`.
//!
//! `RawBuf<T, M>` pairs a pointer and a capacity with the memory source the
//! block came from. It deals exclusively in *raw* storage: it allocates,
//! grows, and releases blocks, but never constructs or destroys a `T`.
//! Element liveness is the container's job, which is what keeps
//! unconstructed storage and live elements from ever being confused.

// Crate imports
use crate::{error::Error, source::MemorySource};

// Core imports
use core::{alloc::Layout, mem, ptr, ptr::NonNull};

/// An owned block of raw storage for `cap` elements of `T`.
///
/// Zero-sized element types never allocate: the pointer stays dangling and
/// the capacity reports `usize::MAX`, so growth is a no-op.
pub(crate) struct RawBuf<T, M: MemorySource> {
    ptr: NonNull<T>,
    cap: usize,
    source: M,
}

/// Smallest capacity reachable by doubling from `current` (starting at 1)
/// that is `>= needed`.
pub(crate) fn next_capacity(current: usize, needed: usize) -> Result<usize, Error> {
    let mut cap = if current == 0 { 1 } else { current };
    while cap < needed {
        cap = cap.checked_mul(2).ok_or(Error::CapacityOverflow)?;
    }
    Ok(cap)
}

fn array_layout<T>(cap: usize) -> Result<Layout, Error> {
    Layout::array::<T>(cap).map_err(|_| Error::CapacityOverflow)
}

impl<T, M: MemorySource> RawBuf<T, M> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    /// An empty buffer: no block, capacity 0 (or unbounded for ZSTs).
    pub(crate) const fn new_in(source: M) -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: if Self::IS_ZST { usize::MAX } else { 0 },
            source,
        }
    }

    /// Allocates a block for exactly `cap` elements up front.
    pub(crate) fn with_capacity_in(cap: usize, source: M) -> Result<Self, Error> {
        if Self::IS_ZST || cap == 0 {
            return Ok(Self::new_in(source));
        }
        let ptr = Self::allocate_block(&source, cap)?;
        Ok(Self { ptr, cap, source })
    }

    pub(crate) fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    pub(crate) fn cap(&self) -> usize {
        self.cap
    }

    pub(crate) fn source(&self) -> &M {
        &self.source
    }

    /// Whether this buffer currently owns an allocated block.
    ///
    /// ZSTs never own a block; their capacity is purely logical.
    pub(crate) fn has_block(&self) -> bool {
        !Self::IS_ZST && self.cap != 0
    }

    fn allocate_block(source: &M, cap: usize) -> Result<NonNull<T>, Error> {
        let layout = array_layout::<T>(cap)?;
        Ok(source.allocate(layout)?.cast())
    }

    /// Grows the block to hold exactly `new_cap` elements, transferring the
    /// first `live` slots into the new block by bitwise move.
    ///
    /// The new block is acquired before anything is touched, so a failure
    /// leaves the buffer (and every live element) exactly as it was. The
    /// transfer itself cannot fail. No-op if `new_cap <= cap`.
    ///
    /// # Safety
    ///
    /// `live <= self.cap()` and slots `[0, live)` must hold initialized
    /// elements. Existing element pointers are invalidated on success.
    pub(crate) unsafe fn grow_to(&mut self, live: usize, new_cap: usize) -> Result<(), Error> {
        if Self::IS_ZST || new_cap <= self.cap {
            return Ok(());
        }
        debug_assert!(live <= self.cap);
        let new_ptr = Self::allocate_block(&self.source, new_cap)?;
        if self.has_block() {
            // SAFETY: both blocks are distinct allocations sized for at
            // least `live` elements; the old prefix is initialized per the
            // caller contract.
            unsafe {
                ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), live);
            }
            self.release_block();
        }
        self.ptr = new_ptr;
        self.cap = new_cap;
        Ok(())
    }

    fn release_block(&mut self) {
        let Ok(layout) = array_layout::<T>(self.cap) else {
            // The layout was validated when the block was allocated.
            return;
        };
        // SAFETY: has_block() callers only; ptr came from this source with
        // this layout.
        unsafe { self.source.deallocate(self.ptr.cast(), layout) };
    }
}

impl<T, M: MemorySource> Drop for RawBuf<T, M> {
    fn drop(&mut self) {
        if self.has_block() {
            self.release_block();
        }
    }
}

// The buffer owns its block exclusively; sending it moves sole ownership.
unsafe impl<T: Send, M: MemorySource + Send> Send for RawBuf<T, M> {}
unsafe impl<T: Sync, M: MemorySource + Sync> Sync for RawBuf<T, M> {}

#[cfg(test)]
mod tests {
    // Imports
    use super::{next_capacity, RawBuf};
    use crate::{Error, Global};

    #[test]
    fn test_next_capacity_doubles_from_one() {
        assert_eq!(next_capacity(0, 1), Ok(1));
        assert_eq!(next_capacity(1, 2), Ok(2));
        assert_eq!(next_capacity(2, 3), Ok(4));
        assert_eq!(next_capacity(4, 5), Ok(8));
        assert_eq!(next_capacity(8, 100), Ok(128));
    }

    #[test]
    fn test_next_capacity_no_shrink_or_jump() {
        // Already sufficient: unchanged.
        assert_eq!(next_capacity(8, 3), Ok(8));
        // Reaches the threshold by doubling, not by jumping to `needed`.
        assert_eq!(next_capacity(4, 9), Ok(16));
    }

    #[test]
    fn test_next_capacity_overflow() {
        let huge = usize::MAX / 2 + 2;
        assert_eq!(next_capacity(1, huge), Err(Error::CapacityOverflow));
    }

    #[test]
    fn test_empty_buf_owns_nothing() {
        let buf: RawBuf<u32, Global> = RawBuf::new_in(Global);
        assert_eq!(buf.cap(), 0);
        assert!(!buf.has_block());
    }

    #[test]
    fn test_with_capacity_and_grow() {
        let mut buf: RawBuf<u32, Global> = RawBuf::with_capacity_in(4, Global).unwrap();
        assert_eq!(buf.cap(), 4);
        assert!(buf.has_block());

        unsafe {
            for i in 0..4 {
                buf.ptr().add(i).write(i as u32);
            }
            buf.grow_to(4, 16).unwrap();
            assert_eq!(buf.cap(), 16);
            for i in 0..4 {
                assert_eq!(buf.ptr().add(i).read(), i as u32);
            }
        }
    }

    #[test]
    fn test_grow_to_smaller_is_noop() {
        let mut buf: RawBuf<u8, Global> = RawBuf::with_capacity_in(8, Global).unwrap();
        unsafe { buf.grow_to(0, 4).unwrap() };
        assert_eq!(buf.cap(), 8);
    }

    #[test]
    fn test_zst_never_allocates() {
        let buf: RawBuf<(), Global> = RawBuf::with_capacity_in(100, Global).unwrap();
        assert_eq!(buf.cap(), usize::MAX);
        assert!(!buf.has_block());

        let mut buf: RawBuf<(), Global> = RawBuf::new_in(Global);
        unsafe { buf.grow_to(0, 1 << 40).unwrap() };
        assert!(!buf.has_block());
    }

    #[test]
    fn test_layout_overflow_reported() {
        let res: Result<RawBuf<u64, Global>, _> =
            RawBuf::with_capacity_in(usize::MAX / 2, Global);
        assert_eq!(res.err(), Some(Error::CapacityOverflow));
    }
}
