// error.rs
//
// Copyright (c) 2026  minitel-gif developers
//
use std::fmt;
use std::io;
use std::num::TryFromIntError;

/// Errors encountered while encoding
#[derive(Debug)]
pub enum Error {
    /// A wrapped I/O error.
    Io(io::Error),
    /// Integer out of bounds.
    TryFromInt(TryFromIntError),
    /// Width or height is zero or larger than 65535.
    InvalidDimensions,
    /// Number of pixels does not match width times height.
    PixelCountMismatch,
    /// LZW code table full, with
    /// [TablePolicy::Reject](lzw/enum.TablePolicy.html#variant.Reject).
    DictionaryOverflow,
    /// No image was added before saving.
    MissingImage,
}

/// Encoder result type
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => err.fmt(fmt),
            Error::TryFromInt(err) => err.fmt(fmt),
            _ => fmt::Debug::fmt(self, fmt),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Io(ref err) => Some(err),
            Error::TryFromInt(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<TryFromIntError> for Error {
    fn from(err: TryFromIntError) -> Self {
        Error::TryFromInt(err)
    }
}
