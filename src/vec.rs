// This file is part of dynamic-array.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `DynamicArray` type and its inherent API.
//!
//! `DynamicArray<T, M>` is a growable vector over a raw block acquired from
//! a pluggable memory source. Methods generally mirror slice/vector
//! semantics, with explicit growth, in-place construction/destruction of
//! elements, and fallible variants wherever allocation can fail.

// Crate imports
use crate::{
    error::Error,
    iter::IntoIter,
    raw::{next_capacity, RawBuf},
    source::{Global, MemorySource},
};

// Core imports
use core::{
    borrow::{Borrow, BorrowMut},
    fmt,
    hash::{Hash, Hasher},
    mem::{self, ManuallyDrop},
    ops::{Deref, DerefMut},
    ptr, slice,
};

/// A growable, heap-allocated vector with a pluggable memory source.
///
/// `DynamicArray<T, M>` owns a single contiguous block sized to `capacity`
/// elements and tracks a logical length `len <= capacity`. Only the prefix
/// `[0..len)` holds live, constructed elements; the rest of the block is
/// raw storage that safe APIs never read, drop, or expose.
///
/// # Layout and invariants
///
/// - No allocated block implies `len == 0` and `capacity() == 0`.
/// - An allocated block implies `capacity() > 0` and `len <= capacity()`;
///   `len == 0` with reserved storage is legal (it arises from
///   [`reserve`](Self::reserve) and from popping to empty).
/// - The block is exclusively owned; it is released only on drop or when a
///   reallocation replaces it.
/// - Zero-sized element types never allocate; `capacity()` reports
///   `usize::MAX` and growth is a no-op.
///
/// [`satisfies_invariant`](Self::satisfies_invariant) checks these
/// structural properties and exists for tests and diagnostics.
///
/// # Growth
///
/// When an operation needs more room, capacity doubles (starting at 1)
/// until it reaches the required size, which amortizes repeated pushes to
/// O(1) each. The new block is acquired *before* anything is moved or
/// released, so an allocation failure leaves the container observably
/// unchanged. [`reserve`](Self::reserve) requests an exact capacity
/// instead; only growth triggered by `push`/`insert`/`resize` doubles.
///
/// # Reference invalidation
///
/// Any operation that reallocates (growth past capacity) invalidates
/// references and pointers to elements. Non-reallocating pushes and reads
/// leave them valid. The container must not be mutated concurrently from
/// multiple threads without external synchronization.
///
/// # Fallible vs infallible operations
///
/// Every growing operation has a `try_` form returning [`Error`] and
/// leaving the container unchanged on failure: [`try_push`](Self::try_push),
/// [`try_reserve`](Self::try_reserve), [`try_insert`](Self::try_insert),
/// [`try_resize`](Self::try_resize), [`try_extend_from_slice`](Self::try_extend_from_slice),
/// [`try_from_slice_in`](Self::try_from_slice_in),
/// [`try_with_capacity_in`](Self::try_with_capacity_in). The plain forms
/// panic on allocation failure or capacity overflow, which is the right
/// default when the source is the global allocator.
///
/// # Example
///
/// ```rust
/// use dynamic_array::DynamicArray;
///
/// let mut v = DynamicArray::from([1, 2, 3]);
/// v.push(4);
/// v.insert(0, 0);
/// assert_eq!(v.as_slice(), &[0, 1, 2, 3, 4]);
/// assert_eq!(v.pop(), Some(4));
/// ```
pub struct DynamicArray<T, M: MemorySource = Global> {
    buf: RawBuf<T, M>,
    len: usize,
}

#[cold]
#[inline(never)]
fn grow_failed(err: Error) -> ! {
    panic!("{err}")
}

/// Tracks elements constructed into fresh storage so an unwinding clone
/// destroys exactly the prefix it managed to build.
struct InitGuard<T> {
    ptr: *mut T,
    initialized: usize,
}

impl<T> Drop for InitGuard<T> {
    fn drop(&mut self) {
        // SAFETY: exactly `initialized` elements were constructed at `ptr`.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr, self.initialized));
        }
    }
}

impl<T> DynamicArray<T, Global> {
    /// An empty array backed by the global allocator. Does not allocate.
    pub const fn new() -> Self {
        Self::new_in(Global)
    }

    /// An empty array with at least `cap` slots reserved up front.
    ///
    /// # Panics
    ///
    /// Panics on allocation failure or capacity overflow.
    pub fn with_capacity(cap: usize) -> Self {
        match Self::try_with_capacity_in(cap, Global) {
            Ok(v) => v,
            Err(e) => grow_failed(e),
        }
    }

    /// Clones the elements of `items`, in order.
    ///
    /// # Panics
    ///
    /// Panics on allocation failure or capacity overflow.
    pub fn from_slice(items: &[T]) -> Self
    where
        T: Clone,
    {
        match Self::try_from_slice_in(items, Global) {
            Ok(v) => v,
            Err(e) => grow_failed(e),
        }
    }

    /// Fallible collect: builds an array from `iter`, reporting allocation
    /// failure instead of panicking.
    pub fn try_from_iter<I: IntoIterator<Item = T>>(iter: I) -> Result<Self, Error> {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        let mut out = Self::new();
        out.grow_amortized(lower)?;
        for item in iter {
            out.try_push(item)?;
        }
        Ok(out)
    }
}

impl<T, M: MemorySource> DynamicArray<T, M> {
    /// An empty array drawing its storage from `source`. Does not allocate.
    pub const fn new_in(source: M) -> Self {
        Self {
            buf: RawBuf::new_in(source),
            len: 0,
        }
    }

    /// An empty array with exactly `cap` slots reserved from `source`.
    pub fn try_with_capacity_in(cap: usize, source: M) -> Result<Self, Error> {
        Ok(Self {
            buf: RawBuf::with_capacity_in(cap, source)?,
            len: 0,
        })
    }

    /// Clones the elements of `items` into storage drawn from `source`.
    ///
    /// A panicking element clone releases the partially constructed block;
    /// nothing leaks.
    pub fn try_from_slice_in(items: &[T], source: M) -> Result<Self, Error>
    where
        T: Clone,
    {
        let mut out = Self::try_with_capacity_in(items.len(), source)?;
        out.append_cloned(items);
        Ok(out)
    }

    /// Returns the current logical length.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if `len == 0`.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of element slots currently reserved.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.cap()
    }

    /// Returns `capacity() - len()`, the room left before a reallocation.
    #[inline]
    pub fn spare_capacity(&self) -> usize {
        self.capacity() - self.len
    }

    /// Returns a reference to the memory source.
    #[inline]
    pub fn source(&self) -> &M {
        self.buf.source()
    }

    /// Views the live prefix as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: [0, len) is initialized; the pointer is aligned and
        // dangling only when len == 0 or T is zero-sized, both valid here.
        unsafe { slice::from_raw_parts(self.buf.ptr(), self.len) }
    }

    /// Views the live prefix as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as for `as_slice`, with exclusive access through &mut.
        unsafe { slice::from_raw_parts_mut(self.buf.ptr(), self.len) }
    }

    /// Raw pointer to the start of the block.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buf.ptr()
    }

    /// Raw mutable pointer to the start of the block.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.ptr()
    }

    /// Returns `Some(&T)` if `i < len`, otherwise `None`.
    #[inline]
    pub fn get(&self, i: usize) -> Option<&T> {
        self.as_slice().get(i)
    }

    /// Returns `Some(&mut T)` if `i < len`, otherwise `None`.
    #[inline]
    pub fn get_mut(&mut self, i: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(i)
    }

    /// Unchecked access to element `i`.
    ///
    /// # Safety
    ///
    /// `i < self.len()`; anything else is undefined behavior. This is the
    /// caller-contract counterpart of the checked accessors.
    #[inline]
    pub unsafe fn get_unchecked(&self, i: usize) -> &T {
        debug_assert!(i < self.len);
        // SAFETY: caller contract.
        unsafe { &*self.buf.ptr().add(i) }
    }

    /// Unchecked mutable access to element `i`.
    ///
    /// # Safety
    ///
    /// `i < self.len()`; anything else is undefined behavior.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, i: usize) -> &mut T {
        debug_assert!(i < self.len);
        // SAFETY: caller contract.
        unsafe { &mut *self.buf.ptr().add(i) }
    }

    /// Returns the first element, if any.
    #[inline]
    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Returns the last element, if any.
    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Returns the first element mutably, if any.
    #[inline]
    pub fn first_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    /// Returns the last element mutably, if any.
    #[inline]
    pub fn last_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Shorthand for `self.as_slice().iter()`.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Shorthand for `self.as_mut_slice().iter_mut()`.
    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Reserves capacity for at least `cap` elements, exactly as requested.
    ///
    /// Size and element values are unchanged; a no-op when the capacity is
    /// already sufficient. On failure the container is untouched.
    pub fn try_reserve(&mut self, cap: usize) -> Result<(), Error> {
        // SAFETY: self.len live elements occupy the prefix.
        unsafe { self.buf.grow_to(self.len, cap) }
    }

    /// Panicking form of [`try_reserve`](Self::try_reserve).
    pub fn reserve(&mut self, cap: usize) {
        if let Err(e) = self.try_reserve(cap) {
            grow_failed(e);
        }
    }

    /// Grows to the next doubled capacity that fits `needed` elements.
    fn grow_amortized(&mut self, needed: usize) -> Result<(), Error> {
        if needed <= self.capacity() {
            return Ok(());
        }
        let target = next_capacity(self.capacity(), needed)?;
        // SAFETY: self.len live elements occupy the prefix.
        unsafe { self.buf.grow_to(self.len, target) }
    }

    /// Appends `value`, growing by doubling when full.
    ///
    /// On a non-growth path the element is constructed directly in the next
    /// free slot and no existing reference is invalidated. On failure the
    /// container is unchanged; `value` is consumed either way.
    pub fn try_push(&mut self, value: T) -> Result<(), Error> {
        let needed = self.len.checked_add(1).ok_or(Error::CapacityOverflow)?;
        self.grow_amortized(needed)?;
        // SAFETY: len < capacity after growth; the slot is raw storage.
        unsafe {
            self.buf.ptr().add(self.len).write(value);
        }
        self.len += 1;
        Ok(())
    }

    /// Appends `value`.
    ///
    /// # Panics
    ///
    /// Panics on allocation failure or capacity overflow.
    pub fn push(&mut self, value: T) {
        if let Err(e) = self.try_push(value) {
            grow_failed(e);
        }
    }

    /// Removes and returns the last element, or `None` when empty.
    ///
    /// Capacity is never reduced by popping.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the slot was the last live element; len now excludes it,
        // so it will not be dropped again.
        Some(unsafe { self.buf.ptr().add(self.len).read() })
    }

    /// Inserts `value` at `index`, shifting `[index, len)` one slot right.
    ///
    /// The shift happens whether or not the insertion triggered a
    /// reallocation, so the element always ends up at `index`.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), Error> {
        if index > self.len {
            return Err(Error::OutOfBounds);
        }
        let needed = self.len.checked_add(1).ok_or(Error::CapacityOverflow)?;
        self.grow_amortized(needed)?;
        // SAFETY: capacity holds len + 1 elements; the shifted range and
        // the target slot stay within the block.
        unsafe {
            let p = self.buf.ptr().add(index);
            ptr::copy(p, p.add(1), self.len - index);
            p.write(value);
        }
        self.len += 1;
        Ok(())
    }

    /// Inserts `value` at `index`, shifting the suffix right.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`, on allocation failure, or on capacity
    /// overflow.
    pub fn insert(&mut self, index: usize, value: T) {
        match self.try_insert(index, value) {
            Ok(()) => {}
            Err(Error::OutOfBounds) => {
                panic!("insertion index (is {index}) should be <= len (is {len})", len = self.len)
            }
            Err(e) => grow_failed(e),
        }
    }

    /// Removes and returns the element at `index`, shifting the suffix
    /// left. Returns `None` if `index >= len`.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.len {
            return None;
        }
        // SAFETY: index < len; the removed slot is read out before the
        // suffix is shifted over it.
        unsafe {
            let p = self.buf.ptr().add(index);
            let value = p.read();
            ptr::copy(p.add(1), p, self.len - index - 1);
            self.len -= 1;
            Some(value)
        }
    }

    /// Removes and returns the element at `index`, replacing it with the
    /// last element. O(1), does not preserve order. Returns `None` if
    /// `index >= len`.
    pub fn swap_remove(&mut self, index: usize) -> Option<T> {
        if index >= self.len {
            return None;
        }
        let last = self.len - 1;
        self.as_mut_slice().swap(index, last);
        self.pop()
    }

    /// Shrinks to `new_len` if smaller, destroying the excluded elements.
    /// Capacity is unchanged.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        let tail = self.len - new_len;
        // Length is reduced first so an unwinding element drop cannot lead
        // back to the dying tail.
        self.len = new_len;
        // SAFETY: [new_len, new_len + tail) held live elements excluded
        // from len above.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.buf.ptr().add(new_len),
                tail,
            ));
        }
    }

    /// Destroys all elements. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Resizes to `new_len`: grows by default-constructing new slots, or
    /// shrinks by destroying the excluded elements.
    pub fn try_resize(&mut self, new_len: usize) -> Result<(), Error>
    where
        T: Default,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }
        self.grow_amortized(new_len)?;
        while self.len < new_len {
            // Construct-then-count each slot, so an unwinding default
            // leaves a valid container holding the prefix built so far.
            // SAFETY: len < capacity; the slot is raw storage.
            unsafe {
                self.buf.ptr().add(self.len).write(T::default());
            }
            self.len += 1;
        }
        Ok(())
    }

    /// Panicking form of [`try_resize`](Self::try_resize).
    pub fn resize(&mut self, new_len: usize)
    where
        T: Default,
    {
        if let Err(e) = self.try_resize(new_len) {
            grow_failed(e);
        }
    }

    /// Clones and appends every element of `items`, in order.
    ///
    /// All-or-nothing: on allocation failure nothing is appended.
    pub fn try_extend_from_slice(&mut self, items: &[T]) -> Result<(), Error>
    where
        T: Clone,
    {
        let needed = self
            .len
            .checked_add(items.len())
            .ok_or(Error::CapacityOverflow)?;
        self.grow_amortized(needed)?;
        self.append_cloned(items);
        Ok(())
    }

    /// Panicking form of [`try_extend_from_slice`](Self::try_extend_from_slice).
    pub fn extend_from_slice(&mut self, items: &[T])
    where
        T: Clone,
    {
        if let Err(e) = self.try_extend_from_slice(items) {
            grow_failed(e);
        }
    }

    /// Clones `items` into the spare capacity. Requires room for all of
    /// them; guarded so a panicking clone destroys only what it built.
    fn append_cloned(&mut self, items: &[T])
    where
        T: Clone,
    {
        debug_assert!(self.spare_capacity() >= items.len());
        // SAFETY: the guard's range starts at the first raw slot.
        let mut guard = InitGuard {
            ptr: unsafe { self.buf.ptr().add(self.len) },
            initialized: 0,
        };
        for item in items {
            // SAFETY: items.len() <= spare capacity; each write targets a
            // distinct raw slot.
            unsafe {
                guard.ptr.add(guard.initialized).write(item.clone());
            }
            guard.initialized += 1;
        }
        self.len += guard.initialized;
        mem::forget(guard);
    }

    /// Yields the whole contents by value and leaves `self` empty with no
    /// reserved storage.
    pub fn drain_all(&mut self) -> IntoIter<T, M>
    where
        M: Clone,
    {
        let source = self.buf.source().clone();
        let buf = mem::replace(&mut self.buf, RawBuf::new_in(source));
        let len = mem::replace(&mut self.len, 0);
        IntoIter {
            buf,
            front: 0,
            back: len,
        }
    }

    /// Reports whether the structural invariants hold. Diagnostic query
    /// for tests; `true` after every public operation.
    ///
    /// Unlike the strictest reading of the layout rules, reserved storage
    /// with `len == 0` is considered valid: it is the documented state
    /// after `reserve` on an empty container or after popping to empty.
    pub fn satisfies_invariant(&self) -> bool {
        if self.buf.has_block() {
            self.capacity() > 0 && self.len <= self.capacity()
        } else if mem::size_of::<T>() == 0 {
            // ZSTs carry logical capacity without a block.
            self.len <= self.capacity()
        } else {
            self.len == 0 && self.capacity() == 0
        }
    }

    pub(crate) fn into_raw_parts(self) -> (RawBuf<T, M>, usize) {
        let me = ManuallyDrop::new(self);
        // SAFETY: self's Drop is suppressed; the buffer is moved out
        // exactly once and the live prefix travels with it.
        (unsafe { ptr::read(&me.buf) }, me.len)
    }
}

impl<T, M: MemorySource> Drop for DynamicArray<T, M> {
    fn drop(&mut self) {
        let live: *mut [T] = self.as_mut_slice();
        // SAFETY: exactly the live prefix is destroyed; RawBuf then
        // releases the block without touching elements.
        unsafe { ptr::drop_in_place(live) };
    }
}

impl<T, M: MemorySource + Default> Default for DynamicArray<T, M> {
    fn default() -> Self {
        Self::new_in(M::default())
    }
}

impl<T: Clone, M: MemorySource + Clone> Clone for DynamicArray<T, M> {
    /// Deep-copies the live elements into a fresh block sized to the
    /// source container's *capacity*, so capacity and length both match.
    fn clone(&self) -> Self {
        let mut out =
            match Self::try_with_capacity_in(self.capacity(), self.buf.source().clone()) {
                Ok(v) => v,
                Err(e) => grow_failed(e),
            };
        out.append_cloned(self.as_slice());
        out
    }
}

impl<T: fmt::Debug, M: MemorySource> fmt::Debug for DynamicArray<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicArray")
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .field("elements", &self.as_slice())
            .finish()
    }
}

impl<T: PartialEq, M: MemorySource, M2: MemorySource> PartialEq<DynamicArray<T, M2>>
    for DynamicArray<T, M>
{
    fn eq(&self, other: &DynamicArray<T, M2>) -> bool {
        self.as_slice() == other.as_slice()
    }
}
impl<T: Eq, M: MemorySource> Eq for DynamicArray<T, M> {}
impl<T: Ord, M: MemorySource> Ord for DynamicArray<T, M> {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}
impl<T: PartialOrd, M: MemorySource> PartialOrd for DynamicArray<T, M> {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}
impl<T: Hash, M: MemorySource> Hash for DynamicArray<T, M> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}

impl<T, M: MemorySource> Deref for DynamicArray<T, M> {
    type Target = [T];
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}
impl<T, M: MemorySource> DerefMut for DynamicArray<T, M> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T, M: MemorySource> AsRef<[T]> for DynamicArray<T, M> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}
impl<T, M: MemorySource> AsMut<[T]> for DynamicArray<T, M> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

// Borrow ergonomics (treat as a slice)
impl<T, M: MemorySource> Borrow<[T]> for DynamicArray<T, M> {
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}
impl<T, M: MemorySource> BorrowMut<[T]> for DynamicArray<T, M> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, M: MemorySource> Extend<T> for DynamicArray<T, M> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        if let Some(needed) = self.len.checked_add(lower) {
            if let Err(e) = self.grow_amortized(needed) {
                grow_failed(e);
            }
        }
        for item in iter {
            self.push(item);
        }
    }
}

impl<T> FromIterator<T> for DynamicArray<T, Global> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut out = Self::new();
        out.extend(iter);
        out
    }
}

impl<T, const N: usize> From<[T; N]> for DynamicArray<T, Global> {
    /// Takes ownership of a fixed list of elements, in order.
    fn from(items: [T; N]) -> Self {
        let mut out = Self::with_capacity(N);
        let items = ManuallyDrop::new(items);
        // SAFETY: the array's elements are moved into the block exactly
        // once; ManuallyDrop keeps the originals from dropping.
        unsafe {
            ptr::copy_nonoverlapping(items.as_ptr(), out.as_mut_ptr(), N);
        }
        out.len = N;
        out
    }
}

impl<T: Clone> From<&[T]> for DynamicArray<T, Global> {
    fn from(items: &[T]) -> Self {
        Self::from_slice(items)
    }
}
