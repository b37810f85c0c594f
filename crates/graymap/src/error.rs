//! Error types for graymap operations.
//!
//! Failures fall into three stable classes, reported by [`Error::kind()`]:
//! header grammar violations ([`FormatError`]), stream and body problems
//! ([`BodyError`] and header I/O), and numeric edge cases
//! ([`ComputeError`]). Nothing in this crate recovers from any of them.

use std::io;
use thiserror::Error;

/// Header grammar violation.
///
/// Every variant carries the 1-based line number the parser was looking at
/// when it gave up, so callers can point the user at the offending line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// First line does not start with a supported magic number.
    #[error("line {line}: expected magic number P2 or P5, found {found:?}")]
    UnknownMagic { line: usize, found: String },

    /// Non-whitespace after the magic number.
    #[error("line {line}: extra data after magic number")]
    TrailingDataAfterMagic { line: usize },

    /// Width is absent or not an integer.
    #[error("line {line}: cannot read width")]
    MissingWidth { line: usize },

    /// Height is absent or not an integer.
    #[error("line {line}: cannot read height")]
    MissingHeight { line: usize },

    /// Non-whitespace after width and height.
    #[error("line {line}: extra data after width and height")]
    TrailingDataAfterDimensions { line: usize },

    /// Width or height is zero or negative.
    #[error("line {line}: width and height must be positive, got {width}x{height}")]
    NonPositiveDimension { line: usize, width: i64, height: i64 },

    /// Width or height cannot be addressed in memory.
    #[error("line {line}: image dimensions {width}x{height} are too large")]
    DimensionsTooLarge { line: usize, width: i64, height: i64 },

    /// Max intensity is absent or not an integer.
    #[error("line {line}: cannot read max pixel value")]
    MissingMaxValue { line: usize },

    /// Non-whitespace after the max intensity.
    #[error("line {line}: extra data after max pixel value")]
    TrailingDataAfterMaxValue { line: usize },

    /// Max intensity outside `0..=255`.
    #[error("line {line}: max pixel value {value} is outside 0..=255")]
    MaxValueOutOfRange { line: usize, value: i64 },
}

/// Failure while reading or writing the sample body.
#[derive(Debug, Error)]
pub enum BodyError {
    #[error("pixel stream I/O failed: {0}")]
    Io(#[from] io::Error),

    /// Fewer samples in the stream than the header declares.
    #[error("expected {expected} pixels, found only {found}")]
    Truncated { expected: usize, found: usize },

    /// A text token that is not a non-negative decimal integer.
    #[error("pixel {index}: {token:?} is not a valid sample")]
    InvalidSample { index: usize, token: String },

    /// More samples than declared while reading strictly.
    #[error("{extra} unexpected trailing samples after the declared {expected}")]
    TrailingSamples { expected: usize, extra: usize },

    /// Sample does not fit in one byte of packed output.
    #[error("pixel {index}: value {value} does not fit in a byte")]
    SampleOutOfRange { index: usize, value: u16 },
}

/// Numeric edge case hit by a filter stage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComputeError {
    /// Every sample has the same value, so the range cannot be stretched.
    #[error("cannot scale a flat image (every pixel is {value})")]
    FlatImage { value: u16 },

    /// Gradient magnitude exceeds the byte range.
    #[error("gradient magnitude {magnitude} at ({x}, {y}) exceeds 255")]
    GradientOverflow { x: usize, y: usize, magnitude: u32 },
}

/// Stable classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed header or body contents.
    Format,
    /// Unreadable or unwritable stream, or a short body.
    Io,
    /// Degenerate or out-of-range numeric result.
    Compute,
}

/// Unified error type for the graymap public API.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid header: {0}")]
    Format(#[from] FormatError),

    #[error("failed to read header: {0}")]
    HeaderIo(#[source] io::Error),

    #[error(transparent)]
    Body(#[from] BodyError),

    #[error(transparent)]
    Compute(#[from] ComputeError),
}

impl Error {
    /// Classify the error for exit-code and message selection.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Format(_) => ErrorKind::Format,
            Error::HeaderIo(_) => ErrorKind::Io,
            Error::Body(err) => err.kind(),
            Error::Compute(_) => ErrorKind::Compute,
        }
    }
}

impl BodyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BodyError::Io(_) | BodyError::Truncated { .. } => ErrorKind::Io,
            BodyError::InvalidSample { .. } | BodyError::TrailingSamples { .. } => {
                ErrorKind::Format
            }
            BodyError::SampleOutOfRange { .. } => ErrorKind::Compute,
        }
    }
}
