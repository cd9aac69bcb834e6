//! Error types for bghmatch.
//!
//! Only image ingestion and low-level table construction can fail. Encoding,
//! table building and voting clamp their numeric inputs and never error.

use thiserror::Error;

/// Result alias for bghmatch operations.
pub type BghResult<T> = std::result::Result<T, BghError>;

/// Errors that can occur when wrapping image buffers or loading inputs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BghError {
    /// Width or height is zero, or their product overflows.
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is smaller than the row width.
    #[error("stride {stride} is smaller than width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Backing buffer does not hold enough elements.
    #[error("buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Owned buffer length does not match `width * height`.
    #[error("buffer length {got} does not match {width}x{height}")]
    LengthMismatch {
        width: usize,
        height: usize,
        got: usize,
    },
    /// Requested ROI lies outside the image.
    #[error("roi ({x},{y},{width}x{height}) out of bounds for {img_width}x{img_height} image")]
    RoiOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// A vote entry carried a zero weight.
    #[error("vote weight must be positive (code {code})")]
    ZeroWeight { code: u8 },
    /// Image decoding failed.
    #[error("image io error: {reason}")]
    ImageIo { reason: String },
}
