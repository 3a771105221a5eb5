// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use super::*;
use crate::Error;
use bolero::check;

#[test]
fn counts_follow_buffer() {
    let mut buffer = BufferController::new();
    let mut view = TypedInterface::<u32>::new(&mut buffer);

    assert!(view.is_empty());
    view.reserve(128);
    assert_eq!(view.count(), 0);
    assert_eq!(view.capacity(), 128);
    assert_eq!(view.buffer().capacity(), 512);

    view.resize(3);
    assert_eq!(view.count(), 3);

    // a partial element is not counted
    view.buffer().push_back(&[1, 2]);
    assert_eq!(view.count(), 3);
    assert_eq!(buffer.len(), 14);
}

#[test]
fn push_and_insert() {
    let mut buffer = BufferController::new();
    let mut view = buffer.typed::<i32>();

    assert_eq!(view.push_back(&2), 0);
    assert_eq!(view.push_back(&4), 4);
    assert_eq!(view.push_front(&1), 0);
    assert_eq!(view.insert(2, 0, &3), Ok(8));
    assert_eq!(view.insert(9, 0, &3), Err(Error::OUT_OF_RANGE));

    assert_eq!(view.iter().collect::<Vec<_>>(), [1, 2, 3, 4]);
    assert_eq!(view.first(), Ok(&1));
    assert_eq!(view.last(), Ok(&4));
    assert_eq!(view.read(3, 0), Ok(4));
    assert_eq!(view.as_slice(), Ok(&[1, 2, 3, 4][..]));
}

#[test]
fn emplace_and_destruct() {
    let mut buffer = BufferController::new();
    let mut view = buffer.typed::<u64>();

    assert_eq!(view.emplace_back(|value| *value = 2), 0);
    assert_eq!(view.emplace_front(|value| *value = 1), 0);
    assert_eq!(view.emplace_at(2, 0, |value| *value = 3), Ok(16));
    assert_eq!(
        view.emplace_at(4, 0, |value| *value = 5),
        Err(Error::OUT_OF_RANGE)
    );
    assert_eq!(view.iter().collect::<Vec<_>>(), [1, 2, 3]);

    assert_eq!(view.destruct(1, 0, 1), Ok(()));
    assert_eq!(view.count(), 3);
    assert_eq!(view.iter().collect::<Vec<_>>(), [1, 0, 3]);
    assert_eq!(view.destruct(1, 0, 3), Err(Error::OUT_OF_RANGE));

    assert_eq!(view.remove(1, 0, 1), Ok(()));
    assert_eq!(view.iter().collect::<Vec<_>>(), [1, 3]);
}

#[test]
fn mutable_access() {
    let mut buffer = BufferController::from_values(&[1u16, 2, 3]);
    let mut view = buffer.typed::<u16>();

    *view.get_mut(1, 0).unwrap() = 20;
    for value in view.as_mut_slice().unwrap() {
        *value += 1;
    }

    let mut sum = 0;
    for value in &view {
        sum += value;
    }
    assert_eq!(sum, 2 + 21 + 4);
    assert_eq!(view.get(2, 0), Ok(&4));
    assert_eq!(view.get(0, 1), Err(Error::MISALIGNED));
    assert_eq!(view.get(3, 0), Err(Error::OUT_OF_RANGE));
}

#[test]
fn best_effort_get() {
    let mut buffer = BufferController::from_values(&[5u16, 6]);
    let view = buffer.typed::<u16>();

    assert_eq!(view.get_or_last(0, 0), Some(&5));
    assert_eq!(view.get_or_last(7, 0), Some(&6));
    assert_eq!(view.get_or_last(0, 1), None);
}

#[test]
fn empty_view() {
    let mut buffer = BufferController::new();
    let view = buffer.typed::<u32>();

    assert_eq!(view.first(), Err(Error::NULL_POINTER));
    assert_eq!(view.last(), Err(Error::NULL_POINTER));
    assert_eq!(view.read(0, 0), Err(Error::NULL_POINTER));
    assert_eq!(view.get_or_last(0, 0), None);
    assert_eq!(view.iter().next(), None);
    assert_eq!(view.as_slice(), Ok(&[][..]));
}

#[test]
fn debug_snapshot() {
    let mut buffer = BufferController::from_values(&[7u32, 8]);
    let view = buffer.typed::<u32>();

    insta::assert_debug_snapshot!(view, @r#"
    TypedInterface {
        element: "u32",
        count: 2,
        buffer: BufferController {
            len: 8,
            capacity: 8,
        },
    }
    "#);
}

#[test]
fn view_matches_vec() {
    check!().with_type::<Vec<u32>>().for_each(|values| {
        let mut buffer = BufferController::new();
        let mut view = buffer.typed::<u32>();

        for value in values {
            view.push_back(value);
        }

        assert_eq!(view.count(), values.len());
        assert!(view.iter().eq(values.iter().copied()));
        assert!(view.iter().rev().eq(values.iter().rev().copied()));
        assert_eq!(view.as_slice(), Ok(&values[..]));
    })
}
