use std::path::PathBuf;

use image::ImageError;
use thiserror::Error;

/// Error type for chroma key computations
///
/// Classification and compositing are pure computations; these variants
/// cover the inputs they cannot work with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChromaKeyError {
    /// Images or masks participating in one operation differ in size
    ///
    /// This error occurs when the foreground, background and mask passed
    /// to the compositor do not share the same dimensions.
    #[error("Image dimensions do not match: expected {expected:?}, actual {actual:?}")]
    DimensionMismatch {
        /// Expected dimensions (width, height)
        expected: (u32, u32),
        /// Actual dimensions (width, height)
        actual: (u32, u32),
    },

    /// Invalid parameter provided to the operation
    ///
    /// Returned for negative or NaN thresholds and for sampling regions
    /// that do not fit inside the image.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The image has no pixels to sample
    #[error("Image has zero width or height")]
    EmptyImage,
}

/// Error type for reading and writing pixel grids
#[derive(Debug, Error)]
pub enum GridError {
    /// The file could not be opened or decoded
    #[error("Error reading file: {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: ImageError,
    },

    /// The decoded image does not have the configured grid size
    #[error(
        "Error reading file: {}: expected {}x{} grid, got {}x{}",
        path.display(),
        expected.0,
        expected.1,
        actual.0,
        actual.1
    )]
    Dimension {
        path: PathBuf,
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// The file could not be encoded or written
    #[error("Error writing file: {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
}

/// Error type for a full compositing run
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    ChromaKey(#[from] ChromaKeyError),
}

impl PipelineError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        1
    }
}
