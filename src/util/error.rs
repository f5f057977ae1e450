//! Error types for fieldmorph.

use crate::image::ImageShape;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias for fieldmorph operations.
pub type MorphResult<T> = std::result::Result<T, MorphError>;

/// Errors that can occur when warping, blending or loading morph inputs.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum MorphError {
    /// Width or height is zero or overflows the address space.
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Channel count outside `1..=4`.
    #[error("invalid channel count {channels} (expected 1..=4)")]
    InvalidChannels { channels: usize },
    /// Backing buffer length does not match `width * height * channels`.
    #[error("buffer holds {got} samples, expected {expected}")]
    BufferSizeMismatch { expected: usize, got: usize },
    /// Two images that must agree in shape do not.
    #[error("{context}: image shapes differ ({left} vs {right})")]
    ShapeMismatch {
        context: &'static str,
        left: ImageShape,
        right: ImageShape,
    },
    /// The warp needs at least one segment pair.
    #[error("at least one segment pair is required")]
    EmptyCorrespondences,
    /// Source and target segment lists are not the same length.
    #[error("segment count mismatch: {source_len} source vs {target_len} target")]
    SegmentCountMismatch { source_len: usize, target_len: usize },
    /// The correspondence text has no count line.
    #[error("correspondence data is empty: missing segment count")]
    MissingCount,
    /// The count line could not be parsed as a non-negative integer.
    #[error("line {line}: could not read number of segments from {content:?}")]
    MalformedCount { line: usize, content: String },
    /// A data line did not hold eight real numbers.
    #[error("line {line}: could not read segment pair {index} from {content:?}")]
    MalformedSegment {
        index: usize,
        line: usize,
        content: String,
    },
    /// Fewer pairs than announced were present before end of input.
    #[error("expected {expected} segment pairs, found {found}")]
    TruncatedCorrespondences { expected: usize, found: usize },
    /// The correspondence file could not be read.
    #[error("could not read correspondence file {path}: {reason}")]
    CorrespondenceIo { path: PathBuf, reason: String },
    /// Image decode or encode failed.
    #[error("image i/o failed for {path}: {reason}")]
    ImageIo { path: PathBuf, reason: String },
    /// The input data or parameters are invalid.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
}
