// This file is part of dynamic-array.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Memory sources: where raw blocks come from.
//!
//! A [`MemorySource`] hands out and takes back *raw* (unconstructed) blocks
//! of memory. It knows nothing about element types or liveness; the
//! container is responsible for constructing and destroying elements within
//! the blocks it acquires. Holding the source by composition lets arena,
//! pool, or instrumented strategies replace the system heap without
//! touching any growth logic.

// Crate imports
use crate::error::Error;

// Core imports
use core::{alloc::Layout, ptr::NonNull};

/// A strategy for acquiring and releasing raw memory blocks.
///
/// Implementations must hand out blocks that satisfy the requested layout
/// and stay valid until returned via [`deallocate`](Self::deallocate).
/// Allocation failure is reported as [`Error::AllocFailed`], never by
/// panicking, so containers can offer fallible operations on top.
///
/// Zero-sized requests are never made: the container only calls the source
/// for layouts with a non-zero size.
pub trait MemorySource {
    /// Acquires a block satisfying `layout`.
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, Error>;

    /// Releases a block previously acquired from this source.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by [`allocate`](Self::allocate) on this
    /// same source with the same `layout`, and must not be used afterwards.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

/// The default memory source: the global allocator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Global;

impl MemorySource for Global {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, Error> {
        debug_assert!(layout.size() > 0);
        // SAFETY: layout has non-zero size, as required by alloc.
        let ptr = unsafe { alloc::alloc::alloc(layout) };
        NonNull::new(ptr).ok_or(Error::AllocFailed)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: forwarded caller contract; ptr came from alloc with layout.
        unsafe { alloc::alloc::dealloc(ptr.as_ptr(), layout) }
    }
}

// Sources are often shared by reference between helpers.
impl<M: MemorySource + ?Sized> MemorySource for &M {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, Error> {
        (**self).allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: forwarded caller contract.
        unsafe { (**self).deallocate(ptr, layout) }
    }
}

#[cfg(test)]
mod tests {
    // Imports
    use super::{Global, MemorySource};
    use core::alloc::Layout;

    #[test]
    fn test_global_roundtrip() {
        let layout = Layout::array::<u64>(8).unwrap();
        let ptr = Global.allocate(layout).unwrap();
        unsafe {
            ptr.as_ptr().cast::<u64>().write(0xDEAD_BEEF);
            assert_eq!(ptr.as_ptr().cast::<u64>().read(), 0xDEAD_BEEF);
            Global.deallocate(ptr, layout);
        }
    }

    #[test]
    fn test_source_by_reference() {
        let source = &Global;
        let layout = Layout::array::<u8>(16).unwrap();
        let ptr = source.allocate(layout).unwrap();
        unsafe { source.deallocate(ptr, layout) };
    }
}
