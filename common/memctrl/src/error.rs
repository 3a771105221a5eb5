// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use core::fmt;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// The reason a buffer operation could not be carried out
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(any(test, feature = "generator"), derive(bolero_generator::TypeGenerator))]
pub enum ErrorKind {
    /// An index, offset, or length extends past the current bounds
    OutOfRange,
    /// The operation requires data that isn't there, e.g. an element of an empty buffer
    NullPointer,
    /// The computed address is not aligned for the requested element type
    Misaligned,
}

impl ErrorKind {
    #[inline]
    pub const fn message(self) -> &'static str {
        match self {
            Self::OutOfRange => "out of range",
            Self::NullPointer => "null pointer",
            Self::Misaligned => "misaligned",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Error returned by fallible [`BufferController`](crate::BufferController) operations
///
/// A failed operation always leaves the buffer in the state it was in before the call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Error {
    kind: ErrorKind,
}

impl Error {
    pub const OUT_OF_RANGE: Self = Self::new(ErrorKind::OutOfRange);
    pub const NULL_POINTER: Self = Self::new(ErrorKind::NullPointer);
    pub const MISALIGNED: Self = Self::new(ErrorKind::Misaligned);

    #[inline]
    pub const fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the static description for the error kind
    #[inline]
    pub const fn message(&self) -> &'static str {
        self.kind.message()
    }
}

impl From<ErrorKind> for Error {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl PartialEq<ErrorKind> for Error {
    #[inline]
    fn eq(&self, other: &ErrorKind) -> bool {
        self.kind == *other
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl From<Error> for std::io::Error {
    #[inline]
    fn from(error: Error) -> Self {
        let kind = match error.kind {
            ErrorKind::OutOfRange => std::io::ErrorKind::InvalidInput,
            ErrorKind::NullPointer => std::io::ErrorKind::UnexpectedEof,
            ErrorKind::Misaligned => std::io::ErrorKind::InvalidData,
        };
        Self::new(kind, error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(Error::OUT_OF_RANGE.message(), "out of range");
        assert_eq!(Error::NULL_POINTER.message(), "null pointer");
        assert_eq!(Error::MISALIGNED.message(), "misaligned");
        assert_eq!(ErrorKind::OutOfRange.to_string(), "out of range");
        assert_eq!(Error::MISALIGNED.to_string(), "misaligned");
    }

    #[test]
    #[cfg(feature = "std")]
    fn io_error_kind() {
        bolero::check!()
            .with_type::<ErrorKind>()
            .cloned()
            .for_each(|kind| {
                let error = Error::from(kind);
                assert_eq!(error, kind);
                let io: std::io::Error = error.into();
                assert_eq!(io.to_string(), error.to_string());
                assert_eq!(error.to_string(), kind.message());
            });
    }
}
