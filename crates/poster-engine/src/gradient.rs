//! Procedural two-stop gradient backgrounds.

use image::{Rgb, Rgba, RgbaImage};
use rand::Rng;
use tracing::debug;

use crate::palette;

/// Generate a horizontal linear gradient running dark (left) to light
/// (right).
///
/// When `stops` is `None`, both endpoint colors are drawn from the palette:
/// a dark variant for the left stop and a light variant for the right, each
/// from an independently chosen family. The output is fully opaque.
pub fn gradient_background(
    width: u32,
    height: u32,
    stops: Option<(Rgb<u8>, Rgb<u8>)>,
    rng: &mut impl Rng,
) -> RgbaImage {
    let (left, right) = stops.unwrap_or_else(|| {
        let dark = palette::dark_stop(palette::random_family(rng), rng);
        let light = palette::light_stop(palette::random_family(rng), rng);
        (dark, light)
    });
    debug!(width, height, ?left, ?right, "Generating gradient background");

    let mut img = RgbaImage::new(width, height);
    for x in 0..width {
        let color = lerp_column(left, right, x, width);
        for y in 0..height {
            img.put_pixel(x, y, color);
        }
    }
    img
}

/// Channel-wise linear interpolation at column `x` of `width`, truncating
/// like integer division so sampled values stay within 1 of the analytic
/// result.
fn lerp_column(left: Rgb<u8>, right: Rgb<u8>, x: u32, width: u32) -> Rgba<u8> {
    let channel = |l: u8, r: u8| -> u8 {
        let l = i64::from(l);
        let r = i64::from(r);
        (l + (r - l) * i64::from(x) / i64::from(width)) as u8
    };
    Rgba([
        channel(left[0], right[0]),
        channel(left[1], right[1]),
        channel(left[2], right[2]),
        255,
    ])
}
