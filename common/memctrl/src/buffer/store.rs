// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! The raw allocation behind a [`BufferController`](super::BufferController)
//!
//! This is the only module that talks to the allocator or dereferences the
//! store pointer. Every byte in `[0, capacity)` is kept initialized: fresh
//! allocations are zeroed and grown tails are zero-filled, so the whole
//! capacity can be handed out as a plain `&[u8]`.

use super::STORE_ALIGN;
use alloc::alloc::{alloc_zeroed, dealloc, handle_alloc_error, realloc, Layout};
use core::{fmt, ptr::NonNull, slice};

/// Used to produce a dangling pointer that satisfies [`STORE_ALIGN`]
#[allow(dead_code)]
#[repr(align(16))]
struct Align;

const _: () = assert!(core::mem::align_of::<Align>() == STORE_ALIGN);

pub(super) struct Store {
    ptr: NonNull<u8>,
    capacity: usize,
}

// SAFETY: the store exclusively owns its allocation, the same as a `Box<[u8]>`
unsafe impl Send for Store {}
// SAFETY: shared references only ever hand out `&[u8]`
unsafe impl Sync for Store {}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl Store {
    #[inline]
    pub const fn new() -> Self {
        Self {
            ptr: NonNull::<Align>::dangling().cast(),
            capacity: 0,
        }
    }

    #[cfg(test)]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut store = Self::new();
        store.reallocate(capacity);
        store
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the entire capacity of the store
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        unsafe {
            // SAFETY: `ptr` is valid for `capacity` initialized bytes, or dangling and
            // aligned with a capacity of 0
            slice::from_raw_parts(self.ptr.as_ptr(), self.capacity)
        }
    }

    /// Returns the entire capacity of the store
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        unsafe {
            // SAFETY: see `as_slice`; `&mut self` guarantees exclusive access
            slice::from_raw_parts_mut(self.ptr.as_ptr(), self.capacity)
        }
    }

    /// Moves the store to an allocation of exactly `capacity` bytes
    ///
    /// Bytes up to `min(old, new)` capacity are preserved. A capacity of 0
    /// frees the allocation.
    pub fn reallocate(&mut self, capacity: usize) {
        ensure!(self.capacity != capacity);

        if capacity == 0 {
            self.release();
            return;
        }

        trace!(
            target: "memctrl::buffer::store",
            old_capacity = self.capacity,
            new_capacity = capacity,
            "reallocate"
        );

        let new_layout = layout(capacity);

        let ptr = if self.capacity == 0 {
            unsafe {
                // SAFETY: `new_layout` has a non-zero size
                alloc_zeroed(new_layout)
            }
        } else {
            unsafe {
                // SAFETY: `ptr` was allocated with `layout(self.capacity)` and `new_layout`
                // already validated the new size against the alignment
                realloc(self.ptr.as_ptr(), layout(self.capacity), capacity)
            }
        };

        let Some(ptr) = NonNull::new(ptr) else {
            handle_alloc_error(new_layout)
        };

        // realloc leaves the grown tail uninitialized
        if self.capacity > 0 && capacity > self.capacity {
            unsafe {
                // SAFETY: `[self.capacity, capacity)` lies within the new allocation
                ptr.as_ptr()
                    .add(self.capacity)
                    .write_bytes(0, capacity - self.capacity);
            }
        }

        self.ptr = ptr;
        self.capacity = capacity;
    }

    /// Frees the allocation, leaving an empty store
    pub fn release(&mut self) {
        ensure!(self.capacity > 0);

        trace!(
            target: "memctrl::buffer::store",
            capacity = self.capacity,
            "release"
        );

        unsafe {
            // SAFETY: `ptr` was allocated with `layout(self.capacity)`
            dealloc(self.ptr.as_ptr(), layout(self.capacity));
        }

        self.ptr = NonNull::<Align>::dangling().cast();
        self.capacity = 0;
    }
}

impl Drop for Store {
    #[inline]
    fn drop(&mut self) {
        self.release();
    }
}

#[inline]
fn layout(capacity: usize) -> Layout {
    match Layout::from_size_align(capacity, STORE_ALIGN) {
        Ok(layout) => layout,
        Err(_) => capacity_overflow(),
    }
}

#[cold]
#[inline(never)]
pub(crate) fn capacity_overflow() -> ! {
    panic!("capacity overflow")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_aligned() {
        let store = Store::new();
        assert_eq!(store.capacity(), 0);
        assert!(store.as_slice().is_empty());
        assert_eq!(store.as_slice().as_ptr() as usize % STORE_ALIGN, 0);
    }

    #[test]
    fn grown_bytes_are_zeroed() {
        let mut store = Store::with_capacity(4);
        store.as_mut_slice().fill(0xff);
        store.reallocate(16);
        assert_eq!(&store.as_slice()[..4], &[0xff; 4]);
        assert_eq!(&store.as_slice()[4..], &[0; 12]);
        assert_eq!(store.as_slice().as_ptr() as usize % STORE_ALIGN, 0);
    }

    #[test]
    fn shrink_preserves_prefix() {
        let mut store = Store::with_capacity(8);
        store.as_mut_slice().copy_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
        store.reallocate(3);
        assert_eq!(store.as_slice(), &[1, 2, 3]);
        store.reallocate(0);
        assert_eq!(store.capacity(), 0);
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn overflow() {
        let _ = layout(usize::MAX);
    }
}
