use image::{GenericImageView, Luma};

use crate::Image;

/// Per-pixel foreground/background classification.
///
/// `true` keeps the foreground pixel, `false` takes the background pixel.
/// Stored row-major, matching the pixel order of [`image::ImageBuffer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    data: Vec<bool>,
}

impl Mask {
    /// Creates a mask with every entry set to `value`.
    pub fn filled(width: u32, height: u32, value: bool) -> Self {
        Self {
            width,
            height,
            data: vec![value; width as usize * height as usize],
        }
    }

    /// Creates a mask by evaluating `f(x, y)` for every position.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let data = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self {
            width,
            height,
            data,
        }
    }

    /// Classifies every pixel of `image` with `f`.
    pub fn from_image<I, F>(image: &I, mut f: F) -> Self
    where
        I: GenericImageView,
        F: FnMut(I::Pixel) -> bool,
    {
        let (width, height) = image.dimensions();
        Self::from_fn(width, height, |x, y| f(image.get_pixel(x, y)))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the entry at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the mask.
    pub fn get(&self, x: u32, y: u32) -> bool {
        assert!(
            x < self.width && y < self.height,
            "mask position ({x}, {y}) out of bounds for {}x{}",
            self.width,
            self.height
        );
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Iterates over entries in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.data.iter().copied()
    }

    /// Number of positions marked as foreground.
    pub fn foreground_count(&self) -> usize {
        self.data.iter().filter(|&&keep| keep).count()
    }

    /// Renders the mask as a grayscale image, 255 for foreground and 0 for background.
    pub fn to_luma(&self) -> Image<Luma<u8>> {
        Image::from_fn(self.width, self.height, |x, y| {
            Luma([if self.get(x, y) { u8::MAX } else { 0 }])
        })
    }
}
