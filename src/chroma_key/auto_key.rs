use image::Rgb;
use itertools::iproduct;
use log::{debug, info};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use super::classifier::Classifier;
use super::distance::{max_rgb_distance, rgb_distance};
use super::mask::Mask;
use crate::error::ChromaKeyError;
use crate::utils::validate_non_empty_image;
use crate::Image;

/// Comparison between a pixel distance and the calibrated threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JumpComparison {
    /// Pixels at exactly the threshold distance are foreground.
    #[default]
    Inclusive,
    /// Only pixels strictly beyond the threshold distance are foreground.
    Strict,
}

impl JumpComparison {
    #[inline]
    fn keeps(self, distance: f64, threshold: f64) -> bool {
        match self {
            Self::Inclusive => distance >= threshold,
            Self::Strict => distance > threshold,
        }
    }
}

/// Result of calibrating an [`AutoClassifier`] on one image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoThreshold {
    /// Color of the top-left pixel.
    pub reference: Rgb<u8>,
    /// Mean distance from `reference` over the central window.
    pub mean_distance: f64,
    /// Smallest distance above `mean_distance`, or the maximum attainable
    /// distance when no pixel lies above the mean.
    pub threshold: f64,
    /// `false` when no pixel lies above the mean. Every pixel is then background.
    pub calibrated: bool,
}

/// Self-calibrating chroma key classifier.
///
/// The top-left pixel is taken as the chroma color. The mean distance over
/// the central window (20% to 80% of each axis) estimates the background
/// noise floor, and the smallest distance in the image that exceeds it
/// becomes the threshold.
///
/// Both the corner and the central window have to show background for this
/// to work. Layouts where the subject touches the top-left corner are not
/// handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AutoClassifier {
    pub comparison: JumpComparison,
}

impl AutoClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comparison(mut self, comparison: JumpComparison) -> Self {
        self.comparison = comparison;
        self
    }

    /// Derives the threshold for `image`.
    ///
    /// # Errors
    ///
    /// * `ChromaKeyError::EmptyImage` - When the image has no pixels
    pub fn calibrate(&self, image: &Image<Rgb<u8>>) -> Result<AutoThreshold, ChromaKeyError> {
        measure(image).map(|(_, threshold)| threshold)
    }

    /// Classifies `image` and returns the calibration used alongside the mask.
    ///
    /// # Errors
    ///
    /// * `ChromaKeyError::EmptyImage` - When the image has no pixels
    pub fn classify_calibrated(
        &self,
        image: &Image<Rgb<u8>>,
    ) -> Result<(Mask, AutoThreshold), ChromaKeyError> {
        let (distances, threshold) = measure(image)?;
        info!(
            "auto key: mean distance {:.4}, threshold {:.4}{}",
            threshold.mean_distance,
            threshold.threshold,
            if threshold.calibrated {
                ""
            } else {
                " (no pixel above mean)"
            }
        );

        let (width, height) = image.dimensions();
        if !threshold.calibrated {
            return Ok((Mask::filled(width, height, false), threshold));
        }

        let comparison = self.comparison;
        let mask = Mask::from_fn(width, height, |x, y| {
            comparison.keeps(distances[index(x, y, width)], threshold.threshold)
        });
        Ok((mask, threshold))
    }
}

impl Classifier for AutoClassifier {
    fn classify(&self, image: &Image<Rgb<u8>>) -> Result<Mask, ChromaKeyError> {
        self.classify_calibrated(image).map(|(mask, _)| mask)
    }
}

#[inline]
fn index(x: u32, y: u32, width: u32) -> usize {
    y as usize * width as usize + x as usize
}

/// Row-major distances of every pixel from `reference`.
fn distance_map(image: &Image<Rgb<u8>>, reference: Rgb<u8>) -> Vec<f64> {
    #[cfg(feature = "rayon")]
    {
        image
            .par_pixels()
            .map(|&pixel| rgb_distance(pixel, reference))
            .collect()
    }
    #[cfg(not(feature = "rayon"))]
    {
        image
            .pixels()
            .map(|&pixel| rgb_distance(pixel, reference))
            .collect()
    }
}

/// Central window `[n / 5, 4 * n / 5)` of an axis of length `n`.
#[inline]
fn central_window(n: u32) -> std::ops::Range<u32> {
    n / 5..4 * n / 5
}

fn measure(image: &Image<Rgb<u8>>) -> Result<(Vec<f64>, AutoThreshold), ChromaKeyError> {
    let (width, height) = image.dimensions();
    validate_non_empty_image(width, height, "AutoClassifier")
        .map_err(|_| ChromaKeyError::EmptyImage)?;

    let reference = *image.get_pixel(0, 0);
    let distances = distance_map(image, reference);

    let (sum, count) = iproduct!(central_window(height), central_window(width))
        .map(|(y, x)| distances[index(x, y, width)])
        .fold((0.0_f64, 0_u64), |(sum, count), d| (sum + d, count + 1));

    // Only a 1-pixel axis has an empty window.
    let mean_distance = if count == 0 { 0.0 } else { sum / count as f64 };
    debug!("auto key window mean over {count} samples: {mean_distance}");

    let jump = distances
        .iter()
        .copied()
        .filter(|&d| d > mean_distance)
        .fold(None, |best: Option<f64>, d| Some(best.map_or(d, |b| b.min(d))));

    let threshold = AutoThreshold {
        reference,
        mean_distance,
        threshold: jump.unwrap_or_else(max_rgb_distance::<u8>),
        calibrated: jump.is_some(),
    };
    Ok((distances, threshold))
}
