//! Soft drop shadows rendered behind an image.

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::filter::gaussian_blur_f32;
use imageproc::rect::Rect;
use tracing::debug;

use crate::compose;

/// Drop shadow parameters: offset toward the bottom-right, color, and
/// Gaussian blur radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadowParams {
    pub offset: (u32, u32),
    pub color: Rgba<u8>,
    pub blur_radius: u32,
}

impl Default for ShadowParams {
    fn default() -> Self {
        Self {
            offset: (5, 5),
            color: Rgba([0, 0, 0, 100]),
            blur_radius: 3,
        }
    }
}

/// Shadow rendered behind every poster cell in the collage workflow.
pub const CELL_SHADOW: ShadowParams = ShadowParams {
    offset: (20, 20),
    color: Rgba([0, 0, 0, 255]),
    blur_radius: 20,
};

impl ShadowParams {
    /// Extra canvas space the shadow needs beyond the source image, per
    /// axis: the offset plus blur bleed on both sides.
    pub fn bleed(&self) -> (u32, u32) {
        (
            self.offset.0 + self.blur_radius * 2,
            self.offset.1 + self.blur_radius * 2,
        )
    }
}

/// Render `img` over a blurred shadow silhouette.
///
/// The canvas is sized `(w + dx + 2*blur, h + dy + 2*blur)` so the shadow
/// never clips: a solid rectangle the size of the source is painted at
/// `(blur + dx, blur + dy)`, blurred, and the source is composited on top
/// at `(blur, blur)` using its own alpha. No shadow appears above or left
/// of the source.
pub fn add_shadow(img: &RgbaImage, params: &ShadowParams) -> RgbaImage {
    let (dx, dy) = params.offset;
    let blur = params.blur_radius;
    let (bleed_w, bleed_h) = params.bleed();
    debug!(
        w = img.width(),
        h = img.height(),
        dx,
        dy,
        blur,
        "Adding drop shadow"
    );

    let mut canvas = RgbaImage::new(img.width() + bleed_w, img.height() + bleed_h);
    draw_filled_rect_mut(
        &mut canvas,
        Rect::at((blur + dx) as i32, (blur + dy) as i32).of_size(img.width(), img.height()),
        params.color,
    );

    let mut canvas = if blur > 0 {
        gaussian_blur_f32(&canvas, blur as f32)
    } else {
        canvas
    };

    compose::overlay(&mut canvas, img, i64::from(blur), i64::from(blur));
    canvas
}
