use image::Rgb;

use super::composite::composite;
use super::mask::Mask;
use crate::error::ChromaKeyError;
use crate::Image;

/// Splits an image into foreground and chroma background.
pub trait Classifier {
    /// Produces a mask that is `true` where the pixel belongs to the subject.
    ///
    /// # Errors
    ///
    /// Returns an error when the image cannot be sampled the way the
    /// classifier requires (empty image, sampling regions out of bounds,
    /// invalid threshold).
    fn classify(&self, image: &Image<Rgb<u8>>) -> Result<Mask, ChromaKeyError>;
}

/// Trait providing chroma key replacement on RGB images
pub trait ChromaKey {
    /// Replaces the chroma background of `self` with `background`.
    ///
    /// # Arguments
    ///
    /// * `classifier` - Decides which pixels of `self` are kept
    /// * `background` - Image supplying the replaced pixels
    ///
    /// # Errors
    ///
    /// * `ChromaKeyError::DimensionMismatch` - When `background` differs in size
    /// * Any error returned by the classifier
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use chroma_key::{AutoClassifier, ChromaKey, Image};
    /// use image::Rgb;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let foreground: Image<Rgb<u8>> = Image::from_pixel(64, 64, Rgb([0, 255, 0]));
    /// let background: Image<Rgb<u8>> = Image::from_pixel(64, 64, Rgb([0, 0, 255]));
    ///
    /// let output = foreground.chroma_key(&AutoClassifier::new(), &background)?;
    /// # Ok(())
    /// # }
    /// ```
    fn chroma_key<C>(&self, classifier: &C, background: &Self) -> Result<Self, ChromaKeyError>
    where
        C: Classifier + ?Sized,
        Self: Sized;

    /// Composites `self` over `background` with an existing mask.
    ///
    /// # Errors
    ///
    /// * `ChromaKeyError::DimensionMismatch` - When `background` or `mask` differ in size
    fn composite_over(&self, background: &Self, mask: &Mask) -> Result<Self, ChromaKeyError>
    where
        Self: Sized;
}

impl ChromaKey for Image<Rgb<u8>> {
    fn chroma_key<C>(&self, classifier: &C, background: &Self) -> Result<Self, ChromaKeyError>
    where
        C: Classifier + ?Sized,
    {
        let mask = classifier.classify(self)?;
        self.composite_over(background, &mask)
    }

    fn composite_over(&self, background: &Self, mask: &Mask) -> Result<Self, ChromaKeyError> {
        composite(mask, self, background)
    }
}
