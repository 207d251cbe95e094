//! Reading and writing pixel grids.
//!
//! Every image of a run must be a square grid of the configured size. The
//! size is checked once when an image is loaded so the classifiers and the
//! compositor can rely on it.

use std::path::Path;

use image::Rgb;
use log::{debug, info};

use crate::chroma_key::mask::Mask;
use crate::error::GridError;
use crate::utils::validate_matching_dimensions;
use crate::Image;

/// Side length of the square grids processed in one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    pub dimension: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { dimension: 256 }
    }
}

impl GridConfig {
    pub fn new(dimension: u32) -> Self {
        Self { dimension }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.dimension, self.dimension)
    }

    /// Checks that `image`, loaded from `path`, has the configured size.
    ///
    /// # Errors
    ///
    /// * `GridError::Dimension` - When the width or height differs
    pub fn validate(&self, path: &Path, image: &Image<Rgb<u8>>) -> Result<(), GridError> {
        let (expected_w, expected_h) = self.dimensions();
        let (width, height) = image.dimensions();
        validate_matching_dimensions(expected_w, expected_h, width, height, "GridConfig").map_err(
            |_| GridError::Dimension {
                path: path.to_path_buf(),
                expected: self.dimensions(),
                actual: (width, height),
            },
        )
    }
}

/// Loads an RGB grid and validates it against `config`.
///
/// Any format enabled in the `image` dependency is accepted; other color
/// types are converted to 8-bit RGB.
///
/// # Errors
///
/// * `GridError::Read` - When the file is missing or cannot be decoded
/// * `GridError::Dimension` - When the image is not `config.dimension` square
pub fn read_grid(path: impl AsRef<Path>, config: &GridConfig) -> Result<Image<Rgb<u8>>, GridError> {
    let path = path.as_ref();
    let image = image::open(path)
        .map_err(|source| GridError::Read {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgb8();
    config.validate(path, &image)?;

    debug!(
        "read {}x{} grid from {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(image)
}

/// Writes an RGB grid, choosing the format from the file extension.
///
/// # Errors
///
/// * `GridError::Write` - When the format is unsupported or the file cannot be written
pub fn write_grid(path: impl AsRef<Path>, image: &Image<Rgb<u8>>) -> Result<(), GridError> {
    let path = path.as_ref();
    image.save(path).map_err(|source| GridError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!("wrote {}", path.display());
    Ok(())
}

/// Writes a mask as a grayscale image, white for foreground.
///
/// # Errors
///
/// * `GridError::Write` - When the format is unsupported or the file cannot be written
pub fn write_mask(path: impl AsRef<Path>, mask: &Mask) -> Result<(), GridError> {
    let path = path.as_ref();
    mask.to_luma().save(path).map_err(|source| GridError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!("wrote mask {}", path.display());
    Ok(())
}
