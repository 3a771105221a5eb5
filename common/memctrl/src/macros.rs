// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

/// Returns early with `$ret` (or `()`) when the condition does not hold
macro_rules! ensure {
    ($cond:expr $(,)?) => {
        ensure!($cond, ())
    };
    ($cond:expr, $ret:expr $(,)?) => {
        if !($cond) {
            return $ret;
        }
    };
}

#[cfg(feature = "tracing")]
macro_rules! trace {
    ($($args:tt)*) => {
        ::tracing::trace!($($args)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($args:tt)*) => {};
}
