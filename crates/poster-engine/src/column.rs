//! Column assembly: resize, round, shadow, and stack poster cells.

use std::path::Path;

use image::RgbaImage;
use image::imageops::FilterType;
use tracing::warn;

use crate::compose;
use crate::layout::PosterLayout;
use crate::shadow::{self, ShadowParams};
use crate::PosterError;

/// Clip an image to a rounded rectangle by zeroing alpha outside the
/// corner radius. The mask is binary, so applying it twice with the same
/// radius changes nothing.
pub fn round_corners(img: &mut RgbaImage, radius: f32) {
    if radius <= 0.0 {
        return;
    }
    let w = img.width() as f32;
    let h = img.height() as f32;
    let r = radius.min(w / 2.0).min(h / 2.0);

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let fx = x as f32 + 0.5;
        let fy = y as f32 + 0.5;
        let dx = if fx < r {
            r - fx
        } else if fx > w - r {
            fx - (w - r)
        } else {
            0.0
        };
        let dy = if fy < r {
            r - fy
        } else if fy > h - r {
            fy - (h - r)
        } else {
            0.0
        };
        if dx > 0.0 && dy > 0.0 && dx * dx + dy * dy > r * r {
            pixel[3] = 0;
        }
    }
}

/// Load one source poster and shape it into a cell: hard-resize to the
/// cell dimensions, clip corners, and render the drop shadow behind it.
fn load_cell(
    path: &Path,
    layout: &PosterLayout,
    shadow_params: &ShadowParams,
) -> Result<RgbaImage, PosterError> {
    let img = image::open(path)?.to_rgba8();
    let mut resized = image::imageops::resize(
        &img,
        layout.cell_width,
        layout.cell_height,
        FilterType::Lanczos3,
    );
    round_corners(&mut resized, layout.corner_radius);
    Ok(shadow::add_shadow(&resized, shadow_params))
}

/// Stack up to `layout.rows` cells into one column image.
///
/// The canvas is pre-sized for a full column plus the shadow bleed. A cell
/// that fails to load is skipped with a warning and leaves its slot empty;
/// later cells keep their original positions rather than shifting up.
/// Returns the column and the number of cells actually placed.
pub fn build_column(
    paths: &[impl AsRef<Path>],
    layout: &PosterLayout,
    shadow_params: &ShadowParams,
) -> (RgbaImage, usize) {
    let (bleed_w, bleed_h) = shadow_params.bleed();
    let mut canvas = RgbaImage::new(
        layout.cell_width + bleed_w,
        layout.column_height() + bleed_h,
    );

    let mut placed = 0;
    for (row, path) in paths.iter().take(layout.rows).enumerate() {
        let path = path.as_ref();
        let cell = match load_cell(path, layout, shadow_params) {
            Ok(cell) => cell,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable poster");
                continue;
            }
        };
        let y = row as i64 * i64::from(layout.cell_height + layout.margin);
        compose::overlay(&mut canvas, &cell, 0, y);
        placed += 1;
    }

    (canvas, placed)
}
