// This file is part of dynamic-array.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for `DynamicArray`.
//!
//! These errors represent allocation and bounds conditions.
//! They are `Copy` and implement `core::error::Error`.

// Core imports
use core::{error::Error as CoreError, fmt};

/// Errors returned by fallible operations on
/// [`DynamicArray`](crate::DynamicArray).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The memory source could not satisfy an allocation request.
    ///
    /// The container is left unchanged: new blocks are always acquired
    /// before any live element is moved or any old block is released.
    AllocFailed,
    /// The requested capacity exceeds what a single contiguous block of
    /// this element type can address.
    CapacityOverflow,
    /// An index or position was out of the current logical bounds.
    OutOfBounds,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocFailed => f.write_str("memory source failed to allocate"),
            Self::CapacityOverflow => f.write_str("capacity overflow"),
            Self::OutOfBounds => f.write_str("index out of bounds"),
        }
    }
}

impl CoreError for Error {}
