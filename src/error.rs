//! Error types for tch-image-utils.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    /// The number of images does not fill the label grid.
    #[error("got {images} images for a grid of {cols} columns x {rows} rows")]
    LabelCountMismatch {
        images: usize,
        cols: usize,
        rows: usize,
    },

    /// A grid needs at least one image.
    #[error("cannot compose a grid without images")]
    EmptyGrid,

    /// An image does not share the size of the first grid cell.
    #[error("image {index} is {}x{}, expected {}x{}", actual.0, actual.1, expected.0, expected.1)]
    NonUniformImageSize {
        index: usize,
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Failed to read a font file.
    #[error("failed to load font from {path}: {source}")]
    FontLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A font file could not be parsed.
    #[error("invalid font data in {path}: {source}")]
    InvalidFont {
        path: PathBuf,
        #[source]
        source: ab_glyph::InvalidFont,
    },

    /// Array or tensor shape does not describe an image batch.
    #[error("shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    /// Channel count has no 8-bit image encoding.
    #[error("unsupported channel count {0}, expected 1, 2, 3 or 4")]
    UnsupportedChannels(usize),

    /// Resampling filter name is not known.
    #[error("unknown interpolation {0:?}")]
    UnknownInterpolation(String),

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },
}

/// Result type alias for tch-image-utils operations.
pub type Result<T> = std::result::Result<T, Error>;
