// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use super::{typed::element_size, Element};
use core::{fmt, iter::FusedIterator, marker::PhantomData, slice::ChunksExact};

/// Iterator over copies of the elements of a buffer
///
/// Created by [`BufferController::iter_as`](super::BufferController::iter_as).
pub struct Iter<'a, T> {
    chunks: ChunksExact<'a, u8>,
    element: PhantomData<T>,
}

impl<'a, T: Element> Iter<'a, T> {
    #[inline]
    pub(super) fn new(bytes: &'a [u8]) -> Self {
        let chunks = bytes.chunks_exact(element_size::<T>());
        Self {
            chunks,
            element: PhantomData,
        }
    }

    #[inline]
    fn read(chunk: &[u8]) -> Option<T> {
        T::read_from_bytes(chunk).ok()
    }
}

impl<T> Clone for Iter<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            chunks: self.chunks.clone(),
            element: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.chunks.len())
            .finish()
    }
}

impl<T: Element> Iterator for Iter<'_, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.chunks.next().and_then(Self::read)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<T> {
        self.chunks.nth(n).and_then(Self::read)
    }
}

impl<T: Element> DoubleEndedIterator for Iter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.chunks.next_back().and_then(Self::read)
    }
}

impl<T: Element> ExactSizeIterator for Iter<'_, T> {}

impl<T: Element> FusedIterator for Iter<'_, T> {}
