//! Property-based tests for chroma-key
//!
//! These tests use proptest to verify the invariants of the compositor and
//! both classifiers over arbitrary images.

use chroma_key::{
    composite, AutoClassifier, ChromaKey, Classifier, Image, Mask, ReferenceSampling,
    ThresholdClassifier,
};
use image::Rgb;
use proptest::prelude::*;

/// Strategy for square grid sizes large enough for the default border strips
fn grid_size() -> impl Strategy<Value = u32> {
    15u32..=32
}

/// Strategy for generating RGB pixel values
fn rgb_pixel() -> impl Strategy<Value = Rgb<u8>> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Rgb([r, g, b]))
}

/// Strategy for an arbitrary square RGB image
fn rgb_image() -> impl Strategy<Value = Image<Rgb<u8>>> {
    grid_size().prop_flat_map(|size| {
        prop::collection::vec(any::<u8>(), (size * size * 3) as usize).prop_map(move |data| {
            Image::from_raw(size, size, data).expect("buffer length matches dimensions")
        })
    })
}

/// Strategy for an image whose border strips are one color, with that color
/// also planted at random interior positions
fn screen_with_reference() -> impl Strategy<Value = (Image<Rgb<u8>>, Rgb<u8>)> {
    (grid_size(), rgb_pixel()).prop_flat_map(|(size, chroma)| {
        let len = (size * size) as usize;
        (
            prop::collection::vec(rgb_pixel(), len),
            prop::collection::vec(any::<bool>(), len),
        )
            .prop_map(move |(pixels, planted)| {
                let image = Image::from_fn(size, size, |x, y| {
                    let i = (y * size + x) as usize;
                    if x < 10 || y < 15 || planted[i] {
                        chroma
                    } else {
                        pixels[i]
                    }
                });
                (image, chroma)
            })
    })
}

/// Strategy for two images and a mask sharing one size
fn composite_inputs() -> impl Strategy<Value = (Image<Rgb<u8>>, Image<Rgb<u8>>, Mask)> {
    grid_size().prop_flat_map(|size| {
        let len = (size * size) as usize;
        (
            prop::collection::vec(any::<u8>(), len * 3),
            prop::collection::vec(any::<u8>(), len * 3),
            prop::collection::vec(any::<bool>(), len),
        )
            .prop_map(move |(fg, bg, keep)| {
                let foreground = Image::from_raw(size, size, fg).expect("foreground buffer");
                let background = Image::from_raw(size, size, bg).expect("background buffer");
                let mask = Mask::from_fn(size, size, |x, y| keep[(y * size + x) as usize]);
                (foreground, background, mask)
            })
    })
}

proptest! {
    /// Property: every output pixel comes from the image the mask selects
    #[test]
    fn composite_selects_by_mask((foreground, background, mask) in composite_inputs()) {
        let output = composite(&mask, &foreground, &background).unwrap();

        prop_assert_eq!(output.dimensions(), foreground.dimensions());
        for (x, y, pixel) in output.enumerate_pixels() {
            let expected = if mask.get(x, y) {
                foreground.get_pixel(x, y)
            } else {
                background.get_pixel(x, y)
            };
            prop_assert_eq!(pixel, expected);
        }
    }

    /// Property: an all-true mask reproduces the foreground, an all-false mask the background
    #[test]
    fn composite_with_uniform_mask_reproduces_source(
        (foreground, background, _) in composite_inputs()
    ) {
        let (width, height) = foreground.dimensions();

        let keep_all = foreground
            .composite_over(&background, &Mask::filled(width, height, true))
            .unwrap();
        prop_assert_eq!(&keep_all, &foreground);

        let drop_all = foreground
            .composite_over(&background, &Mask::filled(width, height, false))
            .unwrap();
        prop_assert_eq!(&drop_all, &background);
    }

    /// Property: threshold 0 keeps every pixel, exact matches of the reference included
    #[test]
    fn threshold_zero_keeps_everything(
        (image, chroma) in screen_with_reference(),
        deduplicated in any::<bool>()
    ) {
        let sampling = if deduplicated {
            ReferenceSampling::Deduplicated
        } else {
            ReferenceSampling::Faithful
        };
        let (mask, reference) = ThresholdClassifier::new(0.0)
            .with_sampling(sampling)
            .classify_with_reference(&image)
            .unwrap();

        prop_assert_eq!(reference, chroma);
        for (x, y, pixel) in image.enumerate_pixels() {
            prop_assert!(mask.get(x, y), "pixel ({}, {}) = {:?}", x, y, pixel);
        }
    }

    /// Property: exact matches of the reference are background for any positive threshold
    #[test]
    fn positive_threshold_drops_exact_matches(
        (image, chroma) in screen_with_reference(),
        threshold in 0.001f64..500.0
    ) {
        let mask = ThresholdClassifier::new(threshold).classify(&image).unwrap();
        for (x, y, pixel) in image.enumerate_pixels() {
            if *pixel == chroma {
                prop_assert!(!mask.get(x, y), "pixel ({}, {})", x, y);
            }
        }
    }

    /// Property: a huge threshold drops every pixel
    #[test]
    fn threshold_huge_drops_everything(
        image in rgb_image(),
        deduplicated in any::<bool>()
    ) {
        let sampling = if deduplicated {
            ReferenceSampling::Deduplicated
        } else {
            ReferenceSampling::Faithful
        };
        let mask = ThresholdClassifier::new(1e9)
            .with_sampling(sampling)
            .classify(&image)
            .unwrap();
        prop_assert_eq!(mask.foreground_count(), 0);
    }

    /// Property: a single-color image is all background for the self-calibrating classifier
    #[test]
    fn auto_uniform_image_is_background(size in 1u32..=40, pixel in rgb_pixel()) {
        let image: Image<Rgb<u8>> = Image::from_pixel(size, size, pixel);
        let mask = AutoClassifier::new().classify(&image).unwrap();
        prop_assert_eq!(mask.foreground_count(), 0);
    }

    /// Property: the calibrated threshold lies above the window mean, and no
    /// pixel falls strictly between the two
    #[test]
    fn auto_threshold_is_smallest_jump(image in rgb_image()) {
        let calibration = AutoClassifier::new().calibrate(&image).unwrap();
        let reference = *image.get_pixel(0, 0);

        if calibration.calibrated {
            prop_assert!(calibration.threshold > calibration.mean_distance);
        }
        for pixel in image.pixels() {
            let distance = chroma_key::rgb_distance(*pixel, reference);
            prop_assert!(
                !(distance > calibration.mean_distance && distance < calibration.threshold)
            );
        }
    }

    /// Property: the reference pixel itself is never foreground
    #[test]
    fn auto_reference_pixel_is_background(image in rgb_image()) {
        let mask = AutoClassifier::new().classify(&image).unwrap();
        prop_assert!(!mask.get(0, 0));
    }
}
