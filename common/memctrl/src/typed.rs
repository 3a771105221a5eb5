// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    buffer::{BufferController, Element, Iter},
    error::Result,
};
use core::{fmt, marker::PhantomData};

#[cfg(test)]
mod tests;

/// A view of a [`BufferController`] as a sequence of `T`
///
/// The view holds no state of its own. Every call is forwarded to the buffer with
/// `size_of::<T>()` as the unit, so the element count always follows the length of
/// the buffer.
pub struct TypedInterface<'a, T> {
    buffer: &'a mut BufferController,
    element: PhantomData<T>,
}

impl<T> fmt::Debug for TypedInterface<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedInterface")
            .field("element", &core::any::type_name::<T>())
            .field("count", &self.buffer.count::<T>())
            .field("buffer", &self.buffer)
            .finish()
    }
}

impl<'a, T: Element> TypedInterface<'a, T> {
    #[inline]
    pub fn new(buffer: &'a mut BufferController) -> Self {
        Self {
            buffer,
            element: PhantomData,
        }
    }

    /// Returns the underlying buffer
    #[inline]
    pub fn buffer(&mut self) -> &mut BufferController {
        &mut *self.buffer
    }

    #[inline]
    pub fn resize(&mut self, count: usize) {
        self.buffer.resize_for::<T>(count)
    }

    #[inline]
    pub fn reserve(&mut self, count: usize) {
        self.buffer.reserve_for::<T>(count)
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.buffer.count::<T>()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity_of::<T>()
    }

    #[inline]
    pub fn emplace_back<F: FnOnce(&mut T)>(&mut self, init: F) -> usize {
        self.buffer.emplace_back::<T, F>(init)
    }

    #[inline]
    pub fn emplace_at<F: FnOnce(&mut T)>(
        &mut self,
        index: usize,
        shift: usize,
        init: F,
    ) -> Result<usize> {
        self.buffer.emplace_at::<T, F>(index, shift, init)
    }

    #[inline]
    pub fn emplace_front<F: FnOnce(&mut T)>(&mut self, init: F) -> usize {
        self.buffer.emplace_front::<T, F>(init)
    }

    #[inline]
    pub fn destruct(&mut self, index: usize, shift: usize, count: usize) -> Result<()> {
        self.buffer.destruct::<T>(index, shift, count)
    }

    #[inline]
    pub fn push_back(&mut self, value: &T) -> usize {
        self.buffer.push_back_value(value)
    }

    #[inline]
    pub fn push_front(&mut self, value: &T) -> usize {
        self.buffer.push_front_value(value)
    }

    #[inline]
    pub fn insert(&mut self, index: usize, shift: usize, value: &T) -> Result<usize> {
        self.buffer.insert_value(index, shift, value)
    }

    #[inline]
    pub fn remove(&mut self, index: usize, shift: usize, count: usize) -> Result<()> {
        self.buffer.remove_elements::<T>(index, shift, count)
    }

    #[inline]
    pub fn read(&self, index: usize, shift: usize) -> Result<T> {
        self.buffer.read::<T>(index, shift)
    }

    #[inline]
    pub fn get(&self, index: usize, shift: usize) -> Result<&T> {
        self.buffer.get_as::<T>(index, shift)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize, shift: usize) -> Result<&mut T> {
        self.buffer.get_as_mut::<T>(index, shift)
    }

    /// Borrows the element at `index`, or the last element if `index` is out of range
    #[inline]
    pub fn get_or_last(&self, index: usize, shift: usize) -> Option<&T> {
        self.buffer.get_as_or_last::<T>(index, shift)
    }

    #[inline]
    pub fn first(&self) -> Result<&T> {
        self.buffer.first_as::<T>()
    }

    #[inline]
    pub fn last(&self) -> Result<&T> {
        self.buffer.last_as::<T>()
    }

    #[inline]
    pub fn as_slice(&self) -> Result<&[T]> {
        self.buffer.as_typed::<T>()
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> Result<&mut [T]> {
        self.buffer.as_typed_mut::<T>()
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        self.buffer.iter_as::<T>()
    }
}

impl<'b, T: Element> IntoIterator for &'b TypedInterface<'_, T> {
    type Item = T;
    type IntoIter = Iter<'b, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
