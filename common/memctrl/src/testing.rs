// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Model-based testing support
//!
//! [`Model`] applies [`Op`]s to a [`BufferController`] and to a `Vec<u8>` oracle
//! side by side, checking after every step that the bytes match and the
//! capacity rules hold.

use crate::{BufferController, Error};
use alloc::vec::Vec;

#[derive(Clone, Copy, Debug)]
#[cfg_attr(any(test, feature = "generator"), derive(bolero_generator::TypeGenerator))]
pub enum Op {
    PushBack { len: u8, byte: u8 },
    PushFront { len: u8, byte: u8 },
    Insert { offset: u16, len: u8, byte: u8 },
    Remove { at: u16, count: u16 },
    Resize { len: u16 },
    Reserve { capacity: u16 },
    ShrinkToFit,
    TakeBack { len: u16 },
    TakeFront { len: u16 },
    TakeFrom { offset: u16, len: u16 },
    PushBackValue { value: u32 },
    InsertValue { index: u8, shift: u8, value: u32 },
    ExtendFromWithin { start: u16, end: u16 },
    Clear,
    Release,
}

#[derive(Debug, Default)]
pub struct Model {
    oracle: Vec<u8>,
    subject: BufferController,
    /// Set by `shrink_to_fit` until the next reallocation
    shrunk: bool,
    reallocations: usize,
}

impl Model {
    pub fn subject(&self) -> &BufferController {
        &self.subject
    }

    pub fn oracle(&self) -> &[u8] {
        &self.oracle
    }

    /// Returns the number of times the store was reallocated
    pub fn reallocations(&self) -> usize {
        self.reallocations
    }

    pub fn apply_all(&mut self, ops: &[Op]) {
        for op in ops {
            self.apply(*op);
        }
    }

    pub fn apply(&mut self, op: Op) {
        let capacity = self.subject.capacity();

        match op {
            Op::PushBack { len, byte } => {
                let bytes = [byte; u8::MAX as usize];
                let bytes = &bytes[..len as usize];
                let offset = self.subject.push_back(bytes);
                assert_eq!(offset, self.oracle.len());
                self.oracle.extend_from_slice(bytes);
            }
            Op::PushFront { len, byte } => {
                let bytes = [byte; u8::MAX as usize];
                let bytes = &bytes[..len as usize];
                assert_eq!(self.subject.push_front(bytes), 0);
                self.oracle.splice(..0, bytes.iter().copied());
            }
            Op::Insert { offset, len, byte } => {
                let offset = offset as usize;
                let bytes = [byte; u8::MAX as usize];
                let bytes = &bytes[..len as usize];
                let result = self.subject.insert(offset, bytes);
                if offset <= self.oracle.len() {
                    assert_eq!(result, Ok(offset));
                    self.oracle.splice(offset..offset, bytes.iter().copied());
                } else {
                    assert_eq!(result, Err(Error::OUT_OF_RANGE));
                }
            }
            Op::Remove { at, count } => {
                let (at, count) = (at as usize, count as usize);
                let result = self.subject.remove(at, count);
                if at + count <= self.oracle.len() {
                    assert_eq!(result, Ok(()));
                    self.oracle.drain(at..at + count);
                } else {
                    assert_eq!(result, Err(Error::OUT_OF_RANGE));
                }
            }
            Op::Resize { len } => {
                let len = len as usize;
                self.subject.resize(len);
                if len <= self.oracle.len() {
                    self.oracle.truncate(len);
                } else {
                    // the value of the exposed bytes is unspecified
                    let start = self.oracle.len();
                    self.oracle.extend_from_slice(&self.subject.as_slice()[start..]);
                }
            }
            Op::Reserve { capacity } => {
                self.subject.reserve(capacity as usize);
                assert!(self.subject.capacity() >= capacity as usize);
            }
            Op::ShrinkToFit => {
                self.subject.shrink_to_fit();
                assert_eq!(self.subject.capacity(), self.subject.len());
                self.shrunk = true;
            }
            Op::TakeBack { len } => {
                let len = len as usize;
                let result = self.subject.take_back(len);
                self.check_take(result, self.oracle.len().wrapping_sub(len), len);
            }
            Op::TakeFront { len } => {
                let result = self.subject.take_front(len as usize);
                self.check_take(result, 0, len as usize);
            }
            Op::TakeFrom { offset, len } => {
                let result = self.subject.take_from(offset as usize, len as usize);
                self.check_take(result, offset as usize, len as usize);
            }
            Op::PushBackValue { value } => {
                let offset = self.subject.push_back_value(&value);
                assert_eq!(offset, self.oracle.len());
                self.oracle.extend_from_slice(&value.to_ne_bytes());
            }
            Op::InsertValue {
                index,
                shift,
                value,
            } => {
                let offset = index as usize * 4 + shift as usize;
                let result = self
                    .subject
                    .insert_value(index as usize, shift as usize, &value);
                if offset <= self.oracle.len() {
                    assert_eq!(result, Ok(offset));
                    self.oracle.splice(offset..offset, value.to_ne_bytes());
                    assert_eq!(
                        self.subject.read::<u32>(index as usize, shift as usize),
                        Ok(value)
                    );
                } else {
                    assert_eq!(result, Err(Error::OUT_OF_RANGE));
                }
            }
            Op::ExtendFromWithin { start, end } => {
                let (start, end) = (start as usize, end as usize);
                let result = self.subject.extend_from_within(start..end);
                if start <= end && end <= self.oracle.len() {
                    assert_eq!(result, Ok(self.oracle.len()));
                    self.oracle.extend_from_within(start..end);
                } else {
                    assert_eq!(result, Err(Error::OUT_OF_RANGE));
                }
            }
            Op::Clear => {
                self.subject.clear();
                self.oracle.clear();
                assert_eq!(self.subject.capacity(), capacity);
            }
            Op::Release => {
                self.subject.release();
                self.oracle.clear();
                assert!(self.subject.is_capacity_empty());
            }
        }

        if self.subject.capacity() != capacity {
            self.reallocations += 1;

            if !matches!(op, Op::ShrinkToFit | Op::Release) {
                self.shrunk = false;
            }
        }

        self.invariants();
    }

    fn check_take(
        &mut self,
        result: Result<BufferController, Error>,
        offset: usize,
        len: usize,
    ) {
        if self.oracle.is_empty() {
            assert_eq!(result.map(|_| ()), Err(Error::NULL_POINTER));
            return;
        }

        match offset.checked_add(len).filter(|end| *end <= self.oracle.len()) {
            Some(end) => {
                let taken = result.expect("range is within the buffer");
                assert_eq!(taken, &self.oracle[offset..end]);
                self.oracle.drain(offset..end);
            }
            None => {
                assert_eq!(result.map(|_| ()), Err(Error::OUT_OF_RANGE));
            }
        }
    }

    pub fn invariants(&self) {
        let subject = &self.subject;

        assert_eq!(subject.as_slice(), &self.oracle[..]);
        assert!(subject.len() <= subject.capacity());
        assert_eq!(subject.is_capacity_empty(), subject.capacity() == 0);

        if !self.shrunk {
            let capacity = subject.capacity();
            assert!(
                capacity == 0 || capacity.is_power_of_two(),
                "capacity {capacity} is not a power of two"
            );
        }
    }
}
