// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! A manually managed, growable byte buffer with a typed overlay.
//!
//! [`BufferController`] owns a single contiguous byte store whose capacity
//! grows in powers of two. Bytes can be inserted and removed at arbitrary
//! offsets, and any plain-bytes element type can be written, read, and
//! iterated over the same store without the store knowing about it.
//! [`TypedInterface`] binds one element type to a controller so callers don't
//! repeat it at every call site.
//!
//! ```
//! use memctrl::{BufferController, TypedInterface};
//!
//! let mut buffer = BufferController::new();
//! buffer.reserve_for::<u32>(4);
//! for value in 0u32..4 {
//!     buffer.push_back_value(&value);
//! }
//!
//! let view = TypedInterface::<u32>::new(&mut buffer);
//! assert_eq!(view.iter().collect::<Vec<_>>(), [0, 1, 2, 3]);
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

#[macro_use]
mod macros;

pub mod buffer;
pub mod error;
pub mod growth;
pub mod typed;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use buffer::{BufferController, Element, STORE_ALIGN};
pub use error::{Error, ErrorKind, Result};
pub use typed::TypedInterface;
