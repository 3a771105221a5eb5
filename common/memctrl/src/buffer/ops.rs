// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Whole-buffer operators and conversions

use super::BufferController;
use alloc::vec::Vec;
use core::{
    hash::{Hash, Hasher},
    ops::{Add, AddAssign},
    slice,
};

impl Clone for BufferController {
    /// Copies the bytes into a fresh store sized to the next power of two of the length
    #[inline]
    fn clone(&self) -> Self {
        Self::from_slice(self.as_slice())
    }

    /// Copy assignment: clears `self`, keeping its store, and appends the bytes of `source`
    #[inline]
    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.push_back_buffer(source);
    }
}

impl PartialEq for BufferController {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for BufferController {}

impl PartialEq<[u8]> for BufferController {
    #[inline]
    fn eq(&self, other: &[u8]) -> bool {
        self.as_slice() == other
    }
}

impl PartialEq<&[u8]> for BufferController {
    #[inline]
    fn eq(&self, other: &&[u8]) -> bool {
        self.as_slice() == *other
    }
}

impl PartialEq<Vec<u8>> for BufferController {
    #[inline]
    fn eq(&self, other: &Vec<u8>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Hash for BufferController {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}

impl AddAssign<&BufferController> for BufferController {
    #[inline]
    fn add_assign(&mut self, other: &BufferController) {
        self.push_back_buffer(other);
    }
}

impl AddAssign<BufferController> for BufferController {
    #[inline]
    fn add_assign(&mut self, mut other: BufferController) {
        self.append(&mut other);
    }
}

impl Add<&BufferController> for &BufferController {
    type Output = BufferController;

    #[inline]
    fn add(self, other: &BufferController) -> BufferController {
        let mut buffer = BufferController::with_capacity(self.len() + other.len());
        buffer.push_back_buffer(self);
        buffer.push_back_buffer(other);
        buffer
    }
}

impl Add<&BufferController> for BufferController {
    type Output = BufferController;

    #[inline]
    fn add(mut self, other: &BufferController) -> BufferController {
        self += other;
        self
    }
}

impl Add<BufferController> for BufferController {
    type Output = BufferController;

    #[inline]
    fn add(mut self, other: BufferController) -> BufferController {
        self += other;
        self
    }
}

impl AsRef<[u8]> for BufferController {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl AsMut<[u8]> for BufferController {
    #[inline]
    fn as_mut(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }
}

impl From<&[u8]> for BufferController {
    #[inline]
    fn from(bytes: &[u8]) -> Self {
        Self::from_slice(bytes)
    }
}

impl From<Vec<u8>> for BufferController {
    #[inline]
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_slice(&bytes)
    }
}

impl From<&BufferController> for Vec<u8> {
    #[inline]
    fn from(buffer: &BufferController) -> Self {
        buffer.to_vec()
    }
}

impl From<BufferController> for Vec<u8> {
    #[inline]
    fn from(buffer: BufferController) -> Self {
        buffer.to_vec()
    }
}

impl Extend<u8> for BufferController {
    #[inline]
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.reserve(self.len().saturating_add(lower));
        for byte in iter {
            self.push_back(&[byte]);
        }
    }
}

impl<'a> Extend<&'a u8> for BufferController {
    #[inline]
    fn extend<I: IntoIterator<Item = &'a u8>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

/// Concatenates the buffers in order
impl FromIterator<BufferController> for BufferController {
    #[inline]
    fn from_iter<I: IntoIterator<Item = BufferController>>(iter: I) -> Self {
        let mut buffer = Self::new();
        for other in iter {
            buffer += other;
        }
        buffer
    }
}

impl<'a> FromIterator<&'a BufferController> for BufferController {
    #[inline]
    fn from_iter<I: IntoIterator<Item = &'a BufferController>>(iter: I) -> Self {
        let mut buffer = Self::new();
        for other in iter {
            buffer += other;
        }
        buffer
    }
}

impl<'a> IntoIterator for &'a BufferController {
    type Item = &'a u8;
    type IntoIter = slice::Iter<'a, u8>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a mut BufferController {
    type Item = &'a mut u8;
    type IntoIter = slice::IterMut<'a, u8>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(feature = "bytes")]
mod bytes_impls {
    use super::BufferController;
    use bytes::{buf::UninitSlice, BufMut, Bytes, BytesMut};

    impl From<BufferController> for Bytes {
        #[inline]
        fn from(buffer: BufferController) -> Self {
            Bytes::copy_from_slice(buffer.as_slice())
        }
    }

    impl From<Bytes> for BufferController {
        #[inline]
        fn from(bytes: Bytes) -> Self {
            Self::from_slice(&bytes)
        }
    }

    impl From<BytesMut> for BufferController {
        #[inline]
        fn from(bytes: BytesMut) -> Self {
            Self::from_slice(&bytes)
        }
    }

    unsafe impl BufMut for BufferController {
        #[inline]
        fn remaining_mut(&self) -> usize {
            isize::MAX as usize - self.len()
        }

        #[inline]
        unsafe fn advance_mut(&mut self, cnt: usize) {
            let len = self.len() + cnt;
            assert!(
                len <= self.capacity(),
                "cannot advance past the capacity of the buffer"
            );
            self.len = len;
        }

        #[inline]
        fn chunk_mut(&mut self) -> &mut UninitSlice {
            if self.remaining_capacity() == 0 {
                // grow by at least a small chunk so single byte writes don't reallocate each time
                self.reserve(self.len().saturating_add(64));
            }

            let len = self.len();
            UninitSlice::new(&mut self.store.as_mut_slice()[len..])
        }

        #[inline]
        fn put_slice(&mut self, src: &[u8]) {
            self.push_back(src);
        }
    }
}
