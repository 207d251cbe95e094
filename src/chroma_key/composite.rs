use image::{GenericImageView, Pixel};
use imageproc::map::map_pixels;

use super::mask::Mask;
use crate::error::ChromaKeyError;
use crate::utils::validate_matching_dimensions;
use crate::Image;

/// Builds the composite of `foreground` over `background`.
///
/// Positions where `mask` is `true` take the foreground pixel, all others
/// the background pixel. Neither input is modified.
///
/// # Errors
///
/// * `ChromaKeyError::DimensionMismatch` - When the background or the mask
///   differ in size from the foreground
pub fn composite<P>(
    mask: &Mask,
    foreground: &Image<P>,
    background: &Image<P>,
) -> Result<Image<P>, ChromaKeyError>
where
    P: Pixel + 'static,
{
    validate_dimensions(foreground, background.dimensions())?;
    validate_dimensions(foreground, mask.dimensions())?;

    Ok(map_pixels(foreground, |x, y, pixel| {
        if mask.get(x, y) {
            pixel
        } else {
            *background.get_pixel(x, y)
        }
    }))
}

#[inline]
fn validate_dimensions<I>(image: &I, actual: (u32, u32)) -> Result<(), ChromaKeyError>
where
    I: GenericImageView,
{
    let (width, height) = image.dimensions();
    validate_matching_dimensions(width, height, actual.0, actual.1, "composite").map_err(|_| {
        ChromaKeyError::DimensionMismatch {
            expected: (width, height),
            actual,
        }
    })
}
