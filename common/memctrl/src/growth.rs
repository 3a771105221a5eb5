// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Capacity growth policy
//!
//! Capacities are rounded up to the next power of two so `k` sequential
//! single-unit appends cause at most `O(log k)` reallocations.

/// Returns the smallest power of two greater than or equal to `value`
///
/// The bits below the highest set bit of `value - 1` are smeared to ones and the
/// result is incremented. The shifts cover the full width of `usize` as reported
/// by `usize::BITS`, so the function behaves the same on 16, 32, and 64 bit targets.
///
/// `0` maps to `0`. When the result does not fit in a `usize` it wraps to `0`,
/// which callers detect with `next_pow2(value) < value`.
///
/// ```
/// use memctrl::growth::next_pow2;
///
/// assert_eq!(next_pow2(0), 0);
/// assert_eq!(next_pow2(1), 1);
/// assert_eq!(next_pow2(500), 512);
/// assert_eq!(next_pow2(512), 512);
/// ```
#[inline]
pub const fn next_pow2(value: usize) -> usize {
    let mut value = value.wrapping_sub(1);
    let mut shift = 1;
    while shift < usize::BITS {
        value |= value >> shift;
        shift <<= 1;
    }
    value.wrapping_add(1)
}

/// Returns the capacity needed to hold `len` bytes, or `None` if it would overflow
#[inline]
pub const fn capacity_for(len: usize) -> Option<usize> {
    let capacity = next_pow2(len);
    if capacity < len {
        None
    } else {
        Some(capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bolero::check;

    #[test]
    #[cfg_attr(kani, kani::proof)]
    fn matches_core() {
        check!().with_type::<usize>().cloned().for_each(|value| {
            let expected = match value {
                0 => 0,
                value => value.checked_next_power_of_two().unwrap_or(0),
            };
            assert_eq!(next_pow2(value), expected);
        });
    }

    #[test]
    #[cfg_attr(kani, kani::proof)]
    fn capacity_bounds() {
        check!().with_type::<usize>().cloned().for_each(|len| {
            if let Some(capacity) = capacity_for(len) {
                assert!(capacity >= len);
                assert!(capacity == 0 || capacity.is_power_of_two());
                // the capacity is the smallest power of two that fits
                assert!(capacity / 2 < len || len == 0);
            } else {
                assert!(len > 1 << (usize::BITS - 1));
            }
        });
    }

    #[test]
    fn small_values() {
        let values: [(usize, usize); 8] = [
            (0, 0),
            (1, 1),
            (2, 2),
            (3, 4),
            (5, 8),
            (127, 128),
            (128, 128),
            (129, 256),
        ];
        for (value, expected) in values {
            assert_eq!(next_pow2(value), expected, "next_pow2({value})");
        }
    }
}
