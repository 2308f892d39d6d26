//! Collage poster compositing engine.
//!
//! Builds a library cover image from a folder of downloaded artwork:
//! a randomized two-stop gradient background, three rotated columns of
//! shadowed poster cells, and localized title text on top.

use std::path::PathBuf;

pub mod column;
pub mod compose;
pub mod gradient;
pub mod layout;
pub mod palette;
pub mod shadow;
pub mod text;
pub mod workflow;

// Re-exports for convenience
pub use layout::PosterLayout;
pub use shadow::ShadowParams;
pub use workflow::{PosterJob, render_poster};

/// Unified error type for the poster-engine crate.
#[derive(Debug, thiserror::Error)]
pub enum PosterError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("failed to load font {}: {reason}", .path.display())]
    Font { path: PathBuf, reason: String },

    #[error("no usable source images in {}", .0.display())]
    NoSourceImages(PathBuf),
}

/// Raster formats accepted as poster sources.
pub const SUPPORTED_FORMATS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "webp"];
