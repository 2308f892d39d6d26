//! Title text and accent block drawing.

use std::path::Path;

use ab_glyph::{Font, FontVec, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use rand::Rng;
use tracing::{debug, warn};

use crate::PosterError;

/// Primary title anchor and size.
pub const TITLE_POS: (f32, f32) = (73.32, 427.34);
pub const TITLE_SIZE: f32 = 163.0;

/// Subtitle anchor and base size; long subtitles scale down.
pub const SUBTITLE_POS: (f32, f32) = (124.68, 624.55);
pub const SUBTITLE_BASE_SIZE: f32 = 50.0;
pub const SUBTITLE_MIN_SIZE: f32 = 30.0;

/// Decorative accent block, drawn only alongside a subtitle.
pub const ACCENT_BLOCK_POS: (f32, f32) = (84.38, 629.06);
pub const ACCENT_BLOCK_SIZE: (f32, f32) = (21.51, 55.0);

/// Default text fill.
pub const TEXT_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Load a font asset from disk.
pub fn load_font(path: &Path) -> Result<FontVec, PosterError> {
    let bytes = std::fs::read(path).map_err(|e| PosterError::Font {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    FontVec::try_from_vec(bytes).map_err(|e| PosterError::Font {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Draw `text` at a fixed position.
pub fn draw_text(
    img: &mut RgbaImage,
    text: &str,
    position: (f32, f32),
    font: &impl Font,
    size: f32,
    color: Rgba<u8>,
) {
    draw_text_mut(
        img,
        color,
        position.0.round() as i32,
        position.1.round() as i32,
        PxScale::from(size),
        font,
        text,
    );
}

/// Subtitle font size for a given text length.
///
/// Text up to 10 characters keeps the base size; longer text shrinks as
/// `base * (10/len)^0.8`, floored at [`SUBTITLE_MIN_SIZE`] so it stays
/// legible.
pub fn subtitle_size(base: f32, len: usize) -> f32 {
    if len > 10 {
        (base * (10.0 / len as f32).powf(0.8)).max(SUBTITLE_MIN_SIZE)
    } else {
        base
    }
}

/// Fill the decorative accent rectangle.
pub fn draw_accent_block(
    img: &mut RgbaImage,
    position: (f32, f32),
    size: (f32, f32),
    color: Rgba<u8>,
) {
    let rect = Rect::at(position.0.round() as i32, position.1.round() as i32)
        .of_size(size.0.round().max(1.0) as u32, size.1.round().max(1.0) as u32);
    draw_filled_rect_mut(img, rect, color);
}

/// Sample an accent color from a random pixel of one source poster.
///
/// The sample point is drawn from the 50%-80% band of both axes to avoid
/// border artwork. If the image cannot be read, falls back to a uniformly
/// random opaque color.
pub fn sample_accent_color(path: &Path, rng: &mut impl Rng) -> Rgba<u8> {
    match try_sample(path, rng) {
        Ok(color) => color,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Accent sampling failed, using random color");
            Rgba([
                rng.gen_range(50..=200),
                rng.gen_range(50..=200),
                rng.gen_range(50..=200),
                255,
            ])
        }
    }
}

fn try_sample(path: &Path, rng: &mut impl Rng) -> Result<Rgba<u8>, PosterError> {
    let img = image::open(path)?.to_rgba8();
    let (w, h) = img.dimensions();
    let x = rng.gen_range((w as f32 * 0.5) as u32..=(w as f32 * 0.8) as u32);
    let y = rng.gen_range((h as f32 * 0.5) as u32..=(h as f32 * 0.8) as u32);
    let color = *img.get_pixel(x.min(w - 1), y.min(h - 1));
    debug!(x, y, ?color, "Sampled accent color");
    Ok(color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn short_subtitle_keeps_base_size() {
        for len in [0, 1, 5, 10] {
            assert_eq!(subtitle_size(50.0, len), 50.0);
        }
    }

    #[test]
    fn length_eleven_shrinks_below_length_ten() {
        let at_ten = subtitle_size(50.0, 10);
        let at_eleven = subtitle_size(50.0, 11);
        assert!(at_eleven < at_ten, "{at_eleven} !< {at_ten}");
    }

    #[test]
    fn scaled_size_never_drops_below_minimum() {
        for len in [11, 20, 50, 500] {
            assert!(subtitle_size(50.0, len) >= SUBTITLE_MIN_SIZE);
        }
        assert_eq!(subtitle_size(50.0, 500), SUBTITLE_MIN_SIZE);
    }

    #[test]
    fn scaled_size_decreases_monotonically() {
        let mut prev = subtitle_size(50.0, 10);
        for len in 11..40 {
            let size = subtitle_size(50.0, len);
            assert!(size <= prev, "len {len}: {size} > {prev}");
            prev = size;
        }
    }

    #[test]
    fn accent_sample_comes_from_center_band() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("poster.png");

        // Blue everywhere except the 50%-80% band, which is red.
        let mut img = RgbaImage::from_pixel(100, 100, Rgba([0, 0, 255, 255]));
        for y in 50..=80 {
            for x in 50..=80 {
                img.put_pixel(x, y, Rgba([255, 0, 0, 255]));
            }
        }
        img.save(&path).unwrap();

        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..20 {
            let color = sample_accent_color(&path, &mut rng);
            assert_eq!(color, Rgba([255, 0, 0, 255]));
        }
    }

    #[test]
    fn accent_sample_falls_back_to_random_color() {
        let mut rng = StdRng::seed_from_u64(22);
        let color = sample_accent_color(Path::new("/nonexistent/poster.png"), &mut rng);
        assert_eq!(color[3], 255);
        for c in 0..3 {
            assert!((50..=200).contains(&color[c]), "channel {c} = {}", color[c]);
        }
    }

    #[test]
    fn accent_block_fills_its_rect() {
        let mut img = RgbaImage::new(200, 200);
        draw_accent_block(&mut img, (84.38, 129.06), (21.51, 55.0), Rgba([9, 8, 7, 255]));

        assert_eq!(img.get_pixel(90, 150), &Rgba([9, 8, 7, 255]));
        assert_eq!(img.get_pixel(80, 150)[3], 0);
    }
}
