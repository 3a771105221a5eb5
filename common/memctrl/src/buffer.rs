// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    error::{Error, Result},
    growth,
};
use alloc::vec::Vec;
use core::{
    fmt,
    ops::{Bound, Range, RangeBounds},
    slice,
};

mod iter;
mod ops;
mod store;
mod typed;


pub use iter::Iter;
pub use typed::Element;

use store::{capacity_overflow, Store};

/// Alignment of every store allocation, in bytes
///
/// Element offsets that are a multiple of `align_of::<T>()` can be borrowed as
/// `&T` for any `T` with an alignment up to this value.
pub const STORE_ALIGN: usize = 16;

/// A growable byte buffer with manual control over its length and capacity
///
/// Capacity grows to the next power of two of the requested length, and is
/// never given back unless [`Self::shrink_to_fit`] or [`Self::release`] is
/// called. Removing bytes only shrinks the length.
///
/// Fallible operations return an [`Error`] and leave the buffer untouched; none
/// of them panic.
pub struct BufferController {
    store: Store,
    len: usize,
}

impl fmt::Debug for BufferController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferController")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl Default for BufferController {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl BufferController {
    /// Creates an empty buffer without allocating
    #[inline]
    pub const fn new() -> Self {
        Self {
            store: Store::new(),
            len: 0,
        }
    }

    /// Creates a buffer holding `len` zeroed bytes
    ///
    /// ```
    /// # use memctrl::BufferController;
    /// let buffer = BufferController::with_len(100);
    /// assert_eq!(buffer.len(), 100);
    /// assert_eq!(buffer.capacity(), 128);
    /// ```
    #[inline]
    pub fn with_len(len: usize) -> Self {
        let mut buffer = Self::new();
        buffer.resize(len);
        buffer
    }

    /// Creates an empty buffer able to hold at least `capacity` bytes
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut buffer = Self::new();
        buffer.reserve(capacity);
        buffer
    }

    /// Creates a buffer holding a copy of `bytes`
    #[inline]
    pub fn from_slice(bytes: &[u8]) -> Self {
        let mut buffer = Self::new();
        buffer.push_back(bytes);
        buffer
    }

    /// Returns the number of bytes in use
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of allocated bytes
    #[inline]
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Returns `true` if no store is allocated
    #[inline]
    pub fn is_capacity_empty(&self) -> bool {
        self.capacity() == 0
    }

    #[inline]
    pub fn remaining_capacity(&self) -> usize {
        self.capacity() - self.len
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.store.as_slice()[..self.len]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        let len = self.len;
        &mut self.store.as_mut_slice()[..len]
    }

    #[inline]
    pub fn to_vec(&self) -> Vec<u8> {
        self.as_slice().to_vec()
    }

    /// Sets the length of the buffer
    ///
    /// Shrinking, or growing within the current capacity, only updates the
    /// length. The value of bytes exposed by growing within capacity is
    /// unspecified. Growing past the capacity reallocates to
    /// `next_pow2(new_len)`, preserving the existing bytes.
    ///
    /// # Panics
    ///
    /// Panics if the required capacity overflows.
    #[inline]
    pub fn resize(&mut self, new_len: usize) {
        if new_len > self.capacity() {
            let capacity = growth::capacity_for(new_len).unwrap_or_else(|| capacity_overflow());
            self.store.reallocate(capacity);
        }

        self.len = new_len;

        self.postconditions();
    }

    /// Ensures the capacity is at least `new_capacity`
    ///
    /// Does nothing if the capacity is already large enough, otherwise
    /// reallocates to `next_pow2(new_capacity)`.
    ///
    /// # Panics
    ///
    /// Panics if the required capacity overflows.
    #[inline]
    pub fn reserve(&mut self, new_capacity: usize) {
        ensure!(self.capacity() < new_capacity);

        let capacity = growth::capacity_for(new_capacity).unwrap_or_else(|| capacity_overflow());
        self.store.reallocate(capacity);
        self.len = self.len.min(capacity);

        self.postconditions();
    }

    /// Reallocates the store so the capacity equals the length exactly
    ///
    /// An empty buffer frees its store.
    #[inline]
    pub fn shrink_to_fit(&mut self) {
        self.store.reallocate(self.len);
        self.postconditions();
    }

    /// Sets the length to zero, keeping the store
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Frees the store, leaving an empty buffer without capacity
    #[inline]
    pub fn release(&mut self) {
        self.len = 0;
        self.store.release();
        self.postconditions();
    }

    /// Grows the length by `additional` bytes and returns the previous length
    #[inline]
    fn grow(&mut self, additional: usize) -> usize {
        let len = self.len;
        let new_len = len
            .checked_add(additional)
            .unwrap_or_else(|| capacity_overflow());
        self.resize(new_len);
        len
    }

    /// Grows the buffer by `additional` bytes at the back
    ///
    /// Returns the new bytes, which hold unspecified values.
    #[inline]
    pub fn add_len_to_back(&mut self, additional: usize) -> &mut [u8] {
        let offset = self.grow(additional);
        &mut self.as_mut_slice()[offset..]
    }

    /// Grows the buffer by `additional` bytes at the front
    ///
    /// The existing bytes are shifted right. Returns the new bytes, which hold
    /// unspecified values.
    #[inline]
    pub fn add_len_to_front(&mut self, additional: usize) -> &mut [u8] {
        let len = self.grow(additional);
        let bytes = self.as_mut_slice();
        bytes.copy_within(..len, additional);
        &mut bytes[..additional]
    }

    /// Grows the buffer by `additional` bytes at `offset`
    ///
    /// The bytes in `[offset, len)` are shifted right. Returns the new bytes,
    /// which hold unspecified values.
    #[inline]
    pub fn add_len_at(&mut self, offset: usize, additional: usize) -> Result<&mut [u8]> {
        ensure!(offset <= self.len, Err(Error::OUT_OF_RANGE));

        let len = self.grow(additional);
        let bytes = self.as_mut_slice();
        bytes.copy_within(offset..len, offset + additional);
        Ok(&mut bytes[offset..offset + additional])
    }

    /// Shrinks the length by `amount` bytes from the back
    #[inline]
    pub fn sub_len_back(&mut self, amount: usize) -> Result<()> {
        ensure!(amount <= self.len, Err(Error::OUT_OF_RANGE));

        self.len -= amount;

        self.postconditions();
        Ok(())
    }

    /// Shrinks the length by `amount` bytes from the front, shifting the rest left
    #[inline]
    pub fn sub_len_front(&mut self, amount: usize) -> Result<()> {
        self.sub_len_from(0, amount)
    }

    /// Removes `amount` bytes at `offset`, shifting the bytes after them left
    #[inline]
    pub fn sub_len_from(&mut self, offset: usize, amount: usize) -> Result<()> {
        let end = self.range_end(offset, amount)?;

        let len = self.len;
        self.as_mut_slice().copy_within(end..len, offset);
        self.len -= amount;

        self.postconditions();
        Ok(())
    }

    /// Appends `bytes`, returning the offset they were written to
    #[inline]
    pub fn push_back(&mut self, bytes: &[u8]) -> usize {
        let offset = self.len;
        self.add_len_to_back(bytes.len()).copy_from_slice(bytes);
        offset
    }

    /// Prepends `bytes`, returning the offset they were written to
    #[inline]
    pub fn push_front(&mut self, bytes: &[u8]) -> usize {
        self.add_len_to_front(bytes.len()).copy_from_slice(bytes);
        0
    }

    /// Inserts `bytes` at `offset`, returning the offset they were written to
    #[inline]
    pub fn insert(&mut self, offset: usize, bytes: &[u8]) -> Result<usize> {
        self.add_len_at(offset, bytes.len())?.copy_from_slice(bytes);
        Ok(offset)
    }

    /// Appends a copy of another buffer's bytes
    #[inline]
    pub fn push_back_buffer(&mut self, other: &Self) -> usize {
        self.push_back(other.as_slice())
    }

    /// Prepends a copy of another buffer's bytes
    #[inline]
    pub fn push_front_buffer(&mut self, other: &Self) -> usize {
        self.push_front(other.as_slice())
    }

    /// Inserts a copy of another buffer's bytes at `offset`
    #[inline]
    pub fn insert_buffer(&mut self, offset: usize, other: &Self) -> Result<usize> {
        self.insert(offset, other.as_slice())
    }

    /// Moves all of the bytes of `other` to the back of `self`, leaving `other` empty
    ///
    /// If `self` has no store, the store of `other` is taken over as is.
    #[inline]
    pub fn append(&mut self, other: &mut Self) -> usize {
        if self.is_capacity_empty() {
            core::mem::swap(self, other);
            return 0;
        }

        let offset = self.push_back(other.as_slice());
        other.clear();
        offset
    }

    /// Appends a copy of `range` of the buffer's own bytes
    ///
    /// ```
    /// # use memctrl::BufferController;
    /// let mut buffer = BufferController::from_slice(b"abc");
    /// buffer.extend_from_within(..).unwrap();
    /// assert_eq!(buffer, &b"abcabc"[..]);
    /// ```
    #[inline]
    pub fn extend_from_within<R: RangeBounds<usize>>(&mut self, range: R) -> Result<usize> {
        let Range { start, end } = self.bounds(range)?;

        let offset = self.grow(end - start);
        self.as_mut_slice().copy_within(start..end, offset);
        Ok(offset)
    }

    /// Removes `count` bytes at `at`, shifting the bytes after them left
    ///
    /// Removing every byte is equivalent to `resize(0)`.
    #[inline]
    pub fn remove(&mut self, at: usize, count: usize) -> Result<()> {
        if at == 0 && count == self.len {
            self.resize(0);
            return Ok(());
        }

        self.sub_len_from(at, count)
    }

    /// Replaces the contents of `self` with the bytes of `other`, leaving `other` empty
    #[inline]
    pub fn assign(&mut self, other: &mut Self) {
        self.clear();
        self.append(other);
    }

    /// Returns the byte at `at`
    ///
    /// Reports [`ErrorKind::NullPointer`](crate::ErrorKind::NullPointer) for an empty
    /// buffer and [`ErrorKind::OutOfRange`](crate::ErrorKind::OutOfRange) past the end.
    #[inline]
    pub fn get(&self, at: usize) -> Result<&u8> {
        ensure!(!self.is_empty(), Err(Error::NULL_POINTER));
        self.as_slice().get(at).ok_or(Error::OUT_OF_RANGE)
    }

    #[inline]
    pub fn get_mut(&mut self, at: usize) -> Result<&mut u8> {
        ensure!(!self.is_empty(), Err(Error::NULL_POINTER));
        self.as_mut_slice().get_mut(at).ok_or(Error::OUT_OF_RANGE)
    }

    /// Returns the byte at `at`, or the last byte if `at` is out of range
    ///
    /// Returns `None` only if the buffer is empty.
    #[inline]
    pub fn get_or_last(&self, at: usize) -> Option<&u8> {
        let bytes = self.as_slice();
        bytes.get(at).or_else(|| bytes.last())
    }

    #[inline]
    pub fn first(&self) -> Result<&u8> {
        self.get(0)
    }

    #[inline]
    pub fn last(&self) -> Result<&u8> {
        ensure!(!self.is_empty(), Err(Error::NULL_POINTER));
        self.get(self.len - 1)
    }

    /// Removes the last `len` bytes and returns them in a new buffer
    #[inline]
    pub fn take_back(&mut self, len: usize) -> Result<Self> {
        ensure!(!self.is_empty(), Err(Error::NULL_POINTER));
        ensure!(len <= self.len, Err(Error::OUT_OF_RANGE));

        self.take_from(self.len - len, len)
    }

    /// Removes the first `len` bytes and returns them in a new buffer
    #[inline]
    pub fn take_front(&mut self, len: usize) -> Result<Self> {
        self.take_from(0, len)
    }

    /// Removes `len` bytes at `offset` and returns them in a new buffer
    #[inline]
    pub fn take_from(&mut self, offset: usize, len: usize) -> Result<Self> {
        ensure!(!self.is_empty(), Err(Error::NULL_POINTER));
        let end = self.range_end(offset, len)?;

        let taken = Self::from_slice(&self.as_slice()[offset..end]);
        self.sub_len_from(offset, len)?;
        Ok(taken)
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, u8> {
        self.as_slice().iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, u8> {
        self.as_mut_slice().iter_mut()
    }

    /// Returns the end of `[offset, offset + len)` if it lies within the buffer
    #[inline]
    fn range_end(&self, offset: usize, len: usize) -> Result<usize> {
        offset
            .checked_add(len)
            .filter(|end| *end <= self.len)
            .ok_or(Error::OUT_OF_RANGE)
    }

    #[inline]
    fn bounds<R: RangeBounds<usize>>(&self, range: R) -> Result<Range<usize>> {
        let start = match range.start_bound() {
            Bound::Included(start) => *start,
            Bound::Excluded(start) => start.checked_add(1).ok_or(Error::OUT_OF_RANGE)?,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(end) => end.checked_add(1).ok_or(Error::OUT_OF_RANGE)?,
            Bound::Excluded(end) => *end,
            Bound::Unbounded => self.len,
        };

        ensure!(start <= end && end <= self.len, Err(Error::OUT_OF_RANGE));

        Ok(start..end)
    }

    #[inline(always)]
    fn postconditions(&self) {
        debug_assert!(self.len <= self.capacity());
    }
}
