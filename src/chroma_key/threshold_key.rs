use image::Rgb;
use itertools::{iproduct, Either};
use log::debug;

use super::classifier::Classifier;
use super::distance::rgb_distance;
use super::mask::Mask;
use crate::error::ChromaKeyError;
use crate::utils::validate_non_empty_image;
use crate::Image;

/// Border strips assumed to contain only the chroma background.
///
/// `columns` leftmost columns of every row plus `rows` topmost rows of
/// every column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderStrips {
    pub columns: u32,
    pub rows: u32,
}

impl Default for BorderStrips {
    fn default() -> Self {
        Self {
            columns: 10,
            rows: 15,
        }
    }
}

/// How the two border strips are combined when averaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceSampling {
    /// Pixels in the top-left corner where both strips overlap are summed twice.
    #[default]
    Faithful,
    /// Every pixel in the union of the strips is summed once.
    Deduplicated,
}

/// Chroma key classifier with a caller supplied distance threshold.
///
/// The reference color is the truncated channel average over the
/// [`BorderStrips`]. Pixels whose distance from it is at least `threshold`
/// are kept as foreground.
///
/// # Examples
///
/// ```no_run
/// use chroma_key::{Classifier, Image, ThresholdClassifier};
/// use image::Rgb;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let image: Image<Rgb<u8>> = Image::from_pixel(64, 64, Rgb([0, 255, 0]));
/// let mask = ThresholdClassifier::new(100.0).classify(&image)?;
/// assert_eq!(mask.foreground_count(), 0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdClassifier {
    pub threshold: f64,
    pub strips: BorderStrips,
    pub sampling: ReferenceSampling,
}

impl ThresholdClassifier {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            strips: BorderStrips::default(),
            sampling: ReferenceSampling::default(),
        }
    }

    pub fn with_strips(mut self, strips: BorderStrips) -> Self {
        self.strips = strips;
        self
    }

    pub fn with_sampling(mut self, sampling: ReferenceSampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// Estimates the chroma background color from the border strips.
    ///
    /// # Errors
    ///
    /// * `ChromaKeyError::EmptyImage` - When the image has no pixels
    /// * `ChromaKeyError::InvalidParameter` - When a strip does not fit inside
    ///   the image or both strips are empty
    pub fn reference_color(&self, image: &Image<Rgb<u8>>) -> Result<Rgb<u8>, ChromaKeyError> {
        let (width, height) = image.dimensions();
        validate_non_empty_image(width, height, "ThresholdClassifier")
            .map_err(|_| ChromaKeyError::EmptyImage)?;

        let BorderStrips { columns, rows } = self.strips;
        if columns > width || rows > height {
            return Err(ChromaKeyError::InvalidParameter(format!(
                "border strips of {columns} columns and {rows} rows do not fit a {width}x{height} image"
            )));
        }
        if columns == 0 && rows == 0 {
            return Err(ChromaKeyError::InvalidParameter(
                "border strips must sample at least one pixel".to_string(),
            ));
        }

        let column_strip = iproduct!(0..height, 0..columns);
        let row_strip = iproduct!(0..rows, 0..width);
        let samples = match self.sampling {
            ReferenceSampling::Faithful => Either::Left(column_strip.chain(row_strip)),
            ReferenceSampling::Deduplicated => Either::Right(
                column_strip.chain(row_strip.filter(move |&(_, x)| x >= columns)),
            ),
        };

        let (sums, count) = samples.fold(([0u64; 3], 0u64), |(mut sums, count), (y, x)| {
            let Rgb(channels) = *image.get_pixel(x, y);
            for (sum, channel) in sums.iter_mut().zip(channels) {
                *sum += u64::from(channel);
            }
            (sums, count + 1)
        });

        // Integer division truncates, and the average of u8 values fits in u8.
        let reference = Rgb(sums.map(|sum| (sum / count) as u8));
        debug!(
            "threshold key reference color {:?} from {} samples ({:?})",
            reference.0, count, self.sampling
        );
        Ok(reference)
    }

    /// Classifies `image` and returns the reference color used alongside the mask.
    ///
    /// # Errors
    ///
    /// * `ChromaKeyError::InvalidParameter` - When the threshold is NaN or the
    ///   strips do not fit
    /// * `ChromaKeyError::EmptyImage` - When the image has no pixels
    pub fn classify_with_reference(
        &self,
        image: &Image<Rgb<u8>>,
    ) -> Result<(Mask, Rgb<u8>), ChromaKeyError> {
        if self.threshold.is_nan() {
            return Err(ChromaKeyError::InvalidParameter(
                "threshold must be a number".to_string(),
            ));
        }

        let reference = self.reference_color(image)?;
        let threshold = self.threshold;
        let mask = Mask::from_image(image, |pixel| {
            rgb_distance(pixel, reference) >= threshold
        });
        Ok((mask, reference))
    }
}

impl Classifier for ThresholdClassifier {
    fn classify(&self, image: &Image<Rgb<u8>>) -> Result<Mask, ChromaKeyError> {
        self.classify_with_reference(image).map(|(mask, _)| mask)
    }
}
