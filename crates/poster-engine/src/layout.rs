//! Column rotation and placement on the poster canvas.

use image::{Rgba, RgbaImage};
use imageproc::geometric_transformations::{Interpolation, rotate_about_center};
use tracing::debug;

use crate::compose;

/// Rotation applied to every column, in degrees. Positive values rotate
/// counter-clockwise.
pub const ROTATION_ANGLE_DEG: f32 = -15.8;

// The three corrections below were tuned by hand for ROTATION_ANGLE_DEG.
// Changing the angle requires recomputing them; see the guard test at the
// bottom of this file.
const MIDDLE_COLUMN_PULL: i64 = 50;
const RIGHT_COLUMN_PULL: i64 = 40;
const RIGHT_COLUMN_LIFT: i64 = 155;

/// Geometry of the composite poster: canvas size, grid shape, cell size,
/// and where the rotated columns land.
#[derive(Debug, Clone, PartialEq)]
pub struct PosterLayout {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub rows: usize,
    pub cols: usize,
    pub margin: u32,
    pub corner_radius: f32,
    pub rotation_angle: f32,
    pub start_x: i64,
    pub start_y: i64,
    pub column_spacing: i64,
    pub cell_width: u32,
    pub cell_height: u32,
}

impl Default for PosterLayout {
    fn default() -> Self {
        Self {
            canvas_width: 1920,
            canvas_height: 1080,
            rows: 3,
            cols: 3,
            margin: 22,
            corner_radius: 46.1,
            rotation_angle: ROTATION_ANGLE_DEG,
            start_x: 835,
            start_y: -362,
            column_spacing: 100,
            cell_width: 410,
            cell_height: 610,
        }
    }
}

impl PosterLayout {
    /// Height of a full column of cells including inter-cell margins.
    /// Fixed by `rows` even when a column holds fewer images.
    pub fn column_height(&self) -> u32 {
        self.rows as u32 * self.cell_height + (self.rows as u32 - 1) * self.margin
    }
}

/// Rotate a column on an oversized square canvas so no corner is cropped.
///
/// The canvas side starts at `ceil(hypot(w, h) * 1.5)` and is expanded to
/// the rotated bounding box of that square before rotating about the
/// center with bicubic resampling.
pub fn rotate_column(column: &RgbaImage, angle_deg: f32) -> RgbaImage {
    let (w, h) = (column.width(), column.height());
    let base = (f64::from(w).hypot(f64::from(h)) * 1.5).ceil();
    let theta = f64::from(angle_deg).to_radians();
    let side = (base * (theta.cos().abs() + theta.sin().abs())).ceil() as u32;
    debug!(w, h, side, angle_deg, "Rotating column");

    let mut canvas = RgbaImage::new(side, side);
    compose::overlay(
        &mut canvas,
        column,
        i64::from((side - w) / 2),
        i64::from((side - h) / 2),
    );

    // imageproc rotates clockwise for positive theta; negate to keep the
    // counter-clockwise-positive convention of `rotation_angle`.
    rotate_about_center(
        &canvas,
        -angle_deg.to_radians(),
        Interpolation::Bicubic,
        Rgba([0, 0, 0, 0]),
    )
}

/// Top-left paste position for a rotated column.
///
/// The base anchor walks right by `column_spacing` per column; columns 1
/// and 2 additionally apply the hand-tuned corrections compensating for
/// the rotation's skew.
pub fn placement_origin(
    rotated_dims: (u32, u32),
    index: usize,
    layout: &PosterLayout,
) -> (i64, i64) {
    let column_height = i64::from(layout.column_height());
    let cell_width = i64::from(layout.cell_width);

    let mut center_x = layout.start_x + index as i64 * layout.column_spacing;
    let mut center_y = layout.start_y + column_height / 2;
    match index {
        1 => center_x += cell_width - MIDDLE_COLUMN_PULL,
        2 => {
            center_y -= RIGHT_COLUMN_LIFT;
            center_x += 2 * cell_width - RIGHT_COLUMN_PULL;
        }
        _ => {}
    }

    let x = center_x - i64::from(rotated_dims.0) / 2 + cell_width / 2;
    let y = center_y - i64::from(rotated_dims.1) / 2;
    (x, y)
}

/// Composite a rotated column onto the background at its computed spot.
pub fn place_column(background: &mut RgbaImage, rotated: &RgbaImage, index: usize, layout: &PosterLayout) {
    let (x, y) = placement_origin((rotated.width(), rotated.height()), index, layout);
    debug!(index, x, y, "Placing column");
    compose::overlay(background, rotated, x, y);
}
