use image::{Primitive, Rgb};

/// Euclidean distance between two colors in RGB space.
#[inline]
pub fn rgb_distance<S>(a: Rgb<S>, b: Rgb<S>) -> f64
where
    S: Primitive + Into<f64>,
{
    let Rgb([ar, ag, ab]) = a;
    let Rgb([br, bg, bb]) = b;
    let dr = ar.into() - br.into();
    let dg = ag.into() - bg.into();
    let db = ab.into() - bb.into();
    (dr * dr + dg * dg + db * db).sqrt()
}

/// Largest distance two colors of subpixel type `S` can be apart.
///
/// Equals `sqrt(3) * S::DEFAULT_MAX_VALUE`, about 441.67 for `u8`.
#[inline]
pub fn max_rgb_distance<S>() -> f64
where
    S: Primitive + Into<f64>,
{
    let max: f64 = S::DEFAULT_MAX_VALUE.into();
    3.0_f64.sqrt() * max
}
