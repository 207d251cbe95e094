//! Test utilities for chroma-key
//!
//! Fixtures shared by the unit tests. Only compiled when running tests.

use image::Rgb;

use crate::Image;

/// Creates a test RGB image with predefined pixel values for testing.
///
/// This function creates a 2x2 test image with known pixel values:
/// - (0,0): [200, 150, 100]
/// - (1,0): [100, 200, 150]
/// - (0,1): [150, 100, 200]
/// - (1,1): [50, 75, 25]
pub fn create_test_rgb_image() -> Image<Rgb<u8>> {
    let mut image: Image<Rgb<u8>> = Image::new(2, 2);
    image.put_pixel(0, 0, Rgb([200, 150, 100]));
    image.put_pixel(1, 0, Rgb([100, 200, 150]));
    image.put_pixel(0, 1, Rgb([150, 100, 200]));
    image.put_pixel(1, 1, Rgb([50, 75, 25]));
    image
}

/// Creates a `size`x`size` image of `chroma` with a centered square of `subject`.
///
/// The square spans 30% to 70% of each axis, so a 100x100 image gets a
/// 40x40 block at `30..70`.
pub fn create_keyed_test_image(size: u32, chroma: Rgb<u8>, subject: Rgb<u8>) -> Image<Rgb<u8>> {
    let block = size * 3 / 10..size * 7 / 10;
    Image::from_fn(size, size, |x, y| {
        if block.contains(&x) && block.contains(&y) {
            subject
        } else {
            chroma
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_test_rgb_image_with_valid_input_creates_image() {
        let image = create_test_rgb_image();
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.get_pixel(0, 0), &Rgb([200, 150, 100]));
        assert_eq!(image.get_pixel(1, 1), &Rgb([50, 75, 25]));
    }

    #[test]
    fn create_keyed_test_image_places_centered_block() {
        let image = create_keyed_test_image(100, Rgb([0, 255, 0]), Rgb([255, 0, 0]));
        let subject = image.pixels().filter(|p| **p == Rgb([255, 0, 0])).count();

        assert_eq!(subject, 1600);
        assert_eq!(image.get_pixel(30, 30), &Rgb([255, 0, 0]));
        assert_eq!(image.get_pixel(69, 69), &Rgb([255, 0, 0]));
        assert_eq!(image.get_pixel(70, 30), &Rgb([0, 255, 0]));
        assert_eq!(image.get_pixel(29, 50), &Rgb([0, 255, 0]));
    }
}
