// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Element-typed operations on a [`BufferController`]
//!
//! Elements are addressed with an `index` in units of `size_of::<T>()` plus a
//! byte `shift`, so regions of different types can share one store.

use super::{capacity_overflow, BufferController, Iter};
use crate::{
    error::{Error, ErrorKind, Result},
    typed::TypedInterface,
};
use core::{mem::size_of, ops::Range};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// A type that can be overlaid on the bytes of a buffer
///
/// Any bit pattern must be a valid value and the value must have no padding, so
/// elements can be copied in and out of the store as plain bytes. Derive the
/// `zerocopy` traits to implement it for a struct:
///
/// ```
/// use memctrl::BufferController;
/// use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
///
/// #[derive(Clone, Copy, Debug, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout)]
/// #[repr(C)]
/// struct Point {
///     x: u32,
///     y: u32,
/// }
///
/// let mut buffer = BufferController::new();
/// buffer.push_back_value(&Point { x: 1, y: 2 });
/// assert_eq!(buffer.read::<Point>(0, 0), Ok(Point { x: 1, y: 2 }));
/// ```
///
/// Zero-sized types satisfy the bound but have no position in the store, so every
/// operation that addresses an element rejects them at compile time:
///
/// ```compile_fail
/// # use memctrl::BufferController;
/// let buffer = BufferController::new();
/// let _ = buffer.as_typed::<()>();
/// ```
pub trait Element: FromBytes + IntoBytes + Immutable + KnownLayout + Sized {}

impl<T: FromBytes + IntoBytes + Immutable + KnownLayout> Element for T {}

/// Returns `size_of::<T>()`, failing the build for zero-sized types
#[inline(always)]
pub(super) const fn element_size<T>() -> usize {
    const { assert!(size_of::<T>() > 0, "zero-sized types cannot be addressed in a buffer") };
    size_of::<T>()
}

/// Computes `index * size_of::<T>() + shift`
#[inline]
fn offset_of<T>(index: usize, shift: usize) -> Result<usize> {
    index
        .checked_mul(element_size::<T>())
        .and_then(|offset| offset.checked_add(shift))
        .ok_or(Error::OUT_OF_RANGE)
}

#[inline]
fn bytes_for<T>(count: usize) -> usize {
    count
        .checked_mul(size_of::<T>())
        .unwrap_or_else(|| capacity_overflow())
}

/// Initializes `bytes` as a `T`, in place when the address allows it
#[inline]
fn construct<T: Element, F: FnOnce(&mut T)>(bytes: &mut [u8], init: F) {
    bytes.fill(0);

    if let Ok(value) = T::mut_from_bytes(bytes) {
        init(value);
        return;
    }

    let mut value = T::new_zeroed();
    init(&mut value);
    bytes.copy_from_slice(value.as_bytes());
}

impl BufferController {
    /// Returns the number of whole `T` elements in the buffer
    ///
    /// Zero-sized types always have a count of 0. They are accepted here and by
    /// the other sizing methods, but not by operations that address an element.
    #[inline]
    pub fn count<T>(&self) -> usize {
        self.len
            .checked_div(size_of::<T>())
            .unwrap_or_default()
    }

    /// Returns the number of whole `T` elements the capacity can hold
    #[inline]
    pub fn capacity_of<T>(&self) -> usize {
        self.capacity()
            .checked_div(size_of::<T>())
            .unwrap_or_default()
    }

    /// Sets the length to `count` elements of `T`
    #[inline]
    pub fn resize_for<T>(&mut self, count: usize) {
        self.resize(bytes_for::<T>(count))
    }

    /// Ensures the capacity can hold at least `count` elements of `T`
    #[inline]
    pub fn reserve_for<T>(&mut self, count: usize) {
        self.reserve(bytes_for::<T>(count))
    }

    /// Creates a buffer holding the bytes of `values`, in order
    #[inline]
    pub fn from_values<T: Element>(values: &[T]) -> Self {
        Self::from_slice(values.as_bytes())
    }

    /// Returns a view of the buffer as a sequence of `T`
    #[inline]
    pub fn typed<T: Element>(&mut self) -> TypedInterface<'_, T> {
        TypedInterface::new(self)
    }

    /// Returns the byte range of `count` elements of `T` if it lies within the buffer
    #[inline]
    fn element_range<T>(&self, index: usize, shift: usize, count: usize) -> Result<Range<usize>> {
        let start = offset_of::<T>(index, shift)?;
        let len = count
            .checked_mul(element_size::<T>())
            .ok_or(Error::OUT_OF_RANGE)?;
        let end = self.range_end(start, len)?;
        Ok(start..end)
    }

    /// Appends the bytes of `value`, returning the offset they were written to
    #[inline]
    pub fn push_back_value<T: Element>(&mut self, value: &T) -> usize {
        self.push_back(value.as_bytes())
    }

    /// Prepends the bytes of `value`, returning the offset they were written to
    #[inline]
    pub fn push_front_value<T: Element>(&mut self, value: &T) -> usize {
        self.push_front(value.as_bytes())
    }

    /// Inserts the bytes of `value` at `index * size_of::<T>() + shift`
    #[inline]
    pub fn insert_value<T: Element>(&mut self, index: usize, shift: usize, value: &T) -> Result<usize> {
        let offset = offset_of::<T>(index, shift)?;
        self.insert(offset, value.as_bytes())
    }

    /// Constructs a `T` at the back of the buffer
    ///
    /// The element starts out zeroed and is passed to `init` to be filled in.
    /// Returns the offset of the element.
    ///
    /// ```
    /// # use memctrl::BufferController;
    /// let mut buffer = BufferController::new();
    /// buffer.emplace_back(|value: &mut u32| *value = 7);
    /// assert_eq!(buffer.read::<u32>(0, 0), Ok(7));
    /// ```
    #[inline]
    pub fn emplace_back<T: Element, F: FnOnce(&mut T)>(&mut self, init: F) -> usize {
        let offset = self.len;
        construct(self.add_len_to_back(element_size::<T>()), init);
        offset
    }

    /// Constructs a `T` at the front of the buffer
    #[inline]
    pub fn emplace_front<T: Element, F: FnOnce(&mut T)>(&mut self, init: F) -> usize {
        construct(self.add_len_to_front(element_size::<T>()), init);
        0
    }

    /// Constructs a `T` at `index * size_of::<T>() + shift`, shifting later bytes right
    ///
    /// Reports [`ErrorKind::OutOfRange`](crate::ErrorKind::OutOfRange) if the offset is
    /// past the end of the buffer.
    #[inline]
    pub fn emplace_at<T: Element, F: FnOnce(&mut T)>(
        &mut self,
        index: usize,
        shift: usize,
        init: F,
    ) -> Result<usize> {
        let offset = offset_of::<T>(index, shift)?;
        construct(self.add_len_at(offset, element_size::<T>())?, init);
        Ok(offset)
    }

    /// Overwrites the element at `index * size_of::<T>() + shift` with `value`
    #[inline]
    pub fn write<T: Element>(&mut self, index: usize, shift: usize, value: &T) -> Result<()> {
        let range = self.element_range::<T>(index, shift, 1)?;
        self.as_mut_slice()[range].copy_from_slice(value.as_bytes());
        Ok(())
    }

    /// Ends the lifetime of `count` elements of `T` starting at `index * size_of::<T>() + shift`
    ///
    /// Each element is read out and dropped, then its bytes are zeroed. The length
    /// of the buffer is not changed; remove the bytes separately if they are no
    /// longer needed.
    #[inline]
    pub fn destruct<T: Element>(&mut self, index: usize, shift: usize, count: usize) -> Result<()> {
        let range = self.element_range::<T>(index, shift, count)?;

        for bytes in self.as_mut_slice()[range].chunks_exact_mut(element_size::<T>()) {
            drop(T::read_from_bytes(bytes));
            bytes.fill(0);
        }

        Ok(())
    }

    #[inline]
    pub fn destruct_first<T: Element>(&mut self) -> Result<()> {
        self.destruct::<T>(0, 0, 1)
    }

    #[inline]
    pub fn destruct_last<T: Element>(&mut self) -> Result<()> {
        let index = self.count::<T>().checked_sub(1).ok_or(Error::OUT_OF_RANGE)?;
        self.destruct::<T>(index, 0, 1)
    }

    #[inline]
    pub fn destruct_all<T: Element>(&mut self) -> Result<()> {
        self.destruct::<T>(0, 0, self.count::<T>())
    }

    /// Removes `count` elements of `T` at `index * size_of::<T>() + shift`
    #[inline]
    pub fn remove_elements<T>(&mut self, index: usize, shift: usize, count: usize) -> Result<()> {
        let range = self.element_range::<T>(index, shift, count)?;
        self.remove(range.start, range.len())
    }

    /// Returns a copy of the element at `index * size_of::<T>() + shift`
    ///
    /// Unlike [`Self::get_as`], the element does not need to be aligned.
    #[inline]
    pub fn read<T: Element>(&self, index: usize, shift: usize) -> Result<T> {
        ensure!(!self.is_empty(), Err(Error::NULL_POINTER));
        let range = self.element_range::<T>(index, shift, 1)?;
        T::read_from_bytes(&self.as_slice()[range]).map_err(|_| Error::OUT_OF_RANGE)
    }

    /// Borrows the element at `index * size_of::<T>() + shift`
    ///
    /// Reports [`ErrorKind::NullPointer`](crate::ErrorKind::NullPointer) for an empty
    /// buffer, [`ErrorKind::OutOfRange`](crate::ErrorKind::OutOfRange) if the element
    /// extends past the end, and [`ErrorKind::Misaligned`](crate::ErrorKind::Misaligned)
    /// if its address is not aligned for `T`.
    #[inline]
    pub fn get_as<T: Element>(&self, index: usize, shift: usize) -> Result<&T> {
        ensure!(!self.is_empty(), Err(Error::NULL_POINTER));
        let range = self.element_range::<T>(index, shift, 1)?;
        T::ref_from_bytes(&self.as_slice()[range]).map_err(|_| Error::MISALIGNED)
    }

    #[inline]
    pub fn get_as_mut<T: Element>(&mut self, index: usize, shift: usize) -> Result<&mut T> {
        ensure!(!self.is_empty(), Err(Error::NULL_POINTER));
        let range = self.element_range::<T>(index, shift, 1)?;
        T::mut_from_bytes(&mut self.as_mut_slice()[range]).map_err(|_| Error::MISALIGNED)
    }

    #[inline]
    pub fn first_as<T: Element>(&self) -> Result<&T> {
        self.get_as::<T>(0, 0)
    }

    #[inline]
    pub fn last_as<T: Element>(&self) -> Result<&T> {
        ensure!(!self.is_empty(), Err(Error::NULL_POINTER));
        let index = self.count::<T>().checked_sub(1).ok_or(Error::OUT_OF_RANGE)?;
        self.get_as::<T>(index, 0)
    }

    /// Borrows the element at `index * size_of::<T>() + shift`, or the last whole
    /// element if that one extends past the end
    ///
    /// Returns `None` if the buffer holds no whole `T`, or if the element that would
    /// be returned is not aligned for `T`.
    ///
    /// ```
    /// # use memctrl::BufferController;
    /// let buffer = BufferController::from_values(&[1u32, 2, 3]);
    /// assert_eq!(buffer.get_as_or_last::<u32>(1, 0), Some(&2));
    /// assert_eq!(buffer.get_as_or_last::<u32>(10, 0), Some(&3));
    /// ```
    #[inline]
    pub fn get_as_or_last<T: Element>(&self, index: usize, shift: usize) -> Option<&T> {
        match self.get_as::<T>(index, shift) {
            Ok(value) => Some(value),
            Err(error) if error == ErrorKind::OutOfRange => self.last_as::<T>().ok(),
            Err(_) => None,
        }
    }

    /// Borrows every whole `T` in the buffer as a slice
    ///
    /// A trailing partial element is left out.
    #[inline]
    pub fn as_typed<T: Element>(&self) -> Result<&[T]> {
        let len = self.count::<T>() * element_size::<T>();
        <[T]>::ref_from_bytes(&self.as_slice()[..len]).map_err(|_| Error::MISALIGNED)
    }

    #[inline]
    pub fn as_typed_mut<T: Element>(&mut self) -> Result<&mut [T]> {
        let len = self.count::<T>() * element_size::<T>();
        <[T]>::mut_from_bytes(&mut self.as_mut_slice()[..len]).map_err(|_| Error::MISALIGNED)
    }

    /// Iterates over copies of every whole `T` in the buffer
    ///
    /// ```
    /// # use memctrl::BufferController;
    /// let buffer = BufferController::from_values(&[1u16, 2, 3]);
    /// assert_eq!(buffer.iter_as::<u16>().rev().collect::<Vec<_>>(), [3, 2, 1]);
    /// ```
    #[inline]
    pub fn iter_as<T: Element>(&self) -> Iter<'_, T> {
        let len = self.count::<T>() * element_size::<T>();
        Iter::new(&self.as_slice()[..len])
    }
}
