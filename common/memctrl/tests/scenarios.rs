// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use memctrl::{BufferController, Error, ErrorKind, TypedInterface};

#[test]
fn reserve_for_elements() {
    let mut buffer = BufferController::new();
    buffer.reserve_for::<i32>(128);

    assert_eq!(buffer.len(), 0);
    assert_eq!(buffer.capacity(), 512);
}

fn filled() -> BufferController {
    let mut buffer = BufferController::new();
    buffer.reserve_for::<i32>(128);

    for value in 0..512i32 {
        buffer.push_back_value(&value);
        assert!(buffer.capacity().is_power_of_two());
    }

    buffer
}

#[test]
fn push_many_elements() {
    let buffer = filled();

    assert_eq!(buffer.len(), 2048);
    assert_eq!(buffer.capacity(), 2048);
    assert_eq!(buffer.count::<i32>(), 512);
    assert_eq!(buffer.read::<i32>(511, 0), Ok(511));
}

#[test]
fn append_to_self() {
    let mut buffer = filled();
    let offset = buffer.extend_from_within(..).unwrap();

    assert_eq!(offset, 2048);
    assert_eq!(buffer.len(), 4096);
    assert_eq!(buffer.capacity(), 4096);

    let (head, tail) = buffer.as_slice().split_at(offset);
    assert_eq!(head, tail);

    let mut view = TypedInterface::<i32>::new(&mut buffer);
    assert_eq!(view.count(), 1024);
    assert!(view.iter().eq((0..512).chain(0..512)));
    assert_eq!(view.get(512, 0), Ok(&0));
    assert_eq!(view.buffer().len(), 4096);
}

#[test]
fn typed_view_iteration() {
    let mut buffer = BufferController::from_values(&[0i32, 1, 2, 3]);
    let view = TypedInterface::<i32>::new(&mut buffer);

    let mut seen = vec![];
    for value in &view {
        seen.push(value);
    }
    assert_eq!(seen, [0, 1, 2, 3]);
}

#[test]
fn empty_access_reports_error() {
    let buffer = BufferController::new();

    let error = buffer.get(0).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::NullPointer);
    assert_eq!(error, Error::NULL_POINTER);
    assert_eq!(buffer.get_or_last(0), None);
    assert!(buffer.is_empty());
}

#[test]
fn buffers_move_and_compare() {
    let mut a = BufferController::from_values(&[1u32, 2]);
    let b = BufferController::from_values(&[3u32]);

    a += &b;
    assert_eq!(a, BufferController::from_values(&[1u32, 2, 3]));

    let moved = std::mem::take(&mut a);
    assert!(a.is_capacity_empty());
    assert_eq!(moved.count::<u32>(), 3);

    let copy = moved.clone();
    assert_eq!(copy, moved);
    assert_ne!(copy, b);
}
