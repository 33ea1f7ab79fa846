// This file is part of dynamic-array.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # `dynamic-array`
//!
//! A `no_std` (plus `alloc`), growable, heap-allocated vector type with a
//! pluggable memory source and a strict separation between raw storage and
//! live elements.
//!
//! The core type, [`DynamicArray<T, M>`], owns a single contiguous block
//! capable of holding `capacity` elements, of which only the prefix
//! `[0..len)` holds live, fully constructed values. The remainder is raw,
//! unconstructed storage that is never read, dropped, or exposed through
//! safe APIs.
//!
//! ## When to use this crate
//!
//! This crate may be useful when:
//!
//! - You want to substitute where the memory behind a vector comes from
//!   (system heap, arena, pool) without changing any container logic.
//! - You want fallible allocation: every growing operation has a `try_`
//!   variant that reports [`Error::AllocFailed`] instead of panicking.
//! - You care about the construction/destruction discipline for non-trivial
//!   element types: growth, cloning, and unwinding never touch
//!   unconstructed slots and never leak constructed ones.
//!
//! It may not be the best fit if:
//!
//! - You just need a vector: use `alloc::vec::Vec`.
//! - You need inline/small-buffer storage; this container always
//!   heap-allocates when capacity is needed.
//!
//! ## Memory sources
//!
//! The container holds a [`MemorySource`] by composition. [`Global`] (the
//! default) forwards to the global allocator; tests substitute counting and
//! failing sources to exercise allocation-failure paths. Raw blocks are
//! acquired and released exclusively through the source; element
//! construction and destruction happen in place within those blocks.
//!
//! ## Growth
//!
//! Capacity grows by doubling (starting at 1) until it reaches the
//! requested size, which keeps repeated pushes amortized O(1). A
//! reallocation acquires the new block *first*, so an allocation failure
//! leaves the container exactly as it was (strong guarantee). Live elements
//! are transferred by bitwise move, which cannot fail; the paths that
//! genuinely clone elements ([`Clone`], slice construction) hold drop
//! guards so a panicking element clone releases the partial block and
//! leaves the original untouched.
//!
//! ## Errors and panics
//!
//! Capacity-sensitive operations come in two flavors:
//!
//! - **Fallible**: [`DynamicArray::try_push`], [`DynamicArray::try_reserve`],
//!   [`DynamicArray::try_insert`], [`DynamicArray::try_resize`],
//!   [`DynamicArray::try_from_iter`], [`DynamicArray::try_from_slice_in`].
//!   These return an [`Error`] and leave the container unchanged.
//! - **Infallible**: [`DynamicArray::push`], [`DynamicArray::reserve`],
//!   [`DynamicArray::insert`], [`DynamicArray::resize`], plus the standard
//!   traits (`Clone`, `Extend`, `FromIterator`). These panic if the memory
//!   source fails or the capacity computation overflows.
//!
//! Indexing (`v[i]`, `v[a..b]`, …) panics on out-of-bounds exactly like
//! slices. The unchecked-access contract of the underlying design is
//! exposed through the `unsafe` accessors
//! [`DynamicArray::get_unchecked`] / [`DynamicArray::get_unchecked_mut`]
//! rather than through a safe operator.
//!
//! ## Features
//!
//! - `serde`: `Serialize` / `Deserialize` for `DynamicArray<T>` as a plain
//!   sequence of elements.
//!
//! ## Example
//!
//! ```rust
//! use dynamic_array::DynamicArray;
//!
//! let mut v: DynamicArray<i32> = DynamicArray::new();
//! v.push(1);
//! v.extend([2, 3]);
//! assert_eq!(v.as_slice(), &[1, 2, 3]);
//! assert!(v.satisfies_invariant());
//! ```
//!
//! See [`DynamicArray`] for detailed semantics, complexity, and the
//! reference-invalidation rules.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_op_in_unsafe_fn)]

extern crate alloc;

// Modules
mod error;
mod index;
mod iter;
mod raw;
#[cfg(feature = "serde")]
mod serde;
mod source;
mod vec;

// Public exports (crate API surface)
pub use error::Error;
pub use iter::IntoIter;
pub use source::{Global, MemorySource};
pub use vec::DynamicArray;
