//! End-to-end poster rendering: gradient background, three rotated
//! columns, title overlay, atomic save.

use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use rand::Rng;
use tracing::{debug, info};

use crate::column;
use crate::gradient;
use crate::layout::{PosterLayout, place_column, rotate_column};
use crate::shadow::ShadowParams;
use crate::text;
use crate::{PosterError, SUPPORTED_FORMATS};

/// One render request: where the downloaded artwork lives, where the
/// finished poster goes, and what to write on it.
#[derive(Debug, Clone)]
pub struct PosterJob {
    pub source_dir: PathBuf,
    pub output_path: PathBuf,
    /// Primary display name, drawn large.
    pub title: String,
    /// Optional secondary name; enables the accent block when present.
    pub subtitle: Option<String>,
    pub title_font: PathBuf,
    pub subtitle_font: PathBuf,
    /// Write pre- and post-rotation column bitmaps next to the output.
    pub save_columns: bool,
}

/// Render one library poster.
///
/// Fails hard only on configuration problems (no usable source images,
/// unreadable fonts) or I/O errors on the final write. Individual bad
/// source images are skipped and leave their grid slot empty.
pub fn render_poster(
    job: &PosterJob,
    layout: &PosterLayout,
    shadow: &ShadowParams,
    rng: &mut impl Rng,
) -> Result<(), PosterError> {
    info!(
        source = %job.source_dir.display(),
        output = %job.output_path.display(),
        "Rendering poster"
    );

    let mut files = list_source_images(&job.source_dir)?;
    if files.is_empty() {
        return Err(PosterError::NoSourceImages(job.source_dir.clone()));
    }
    files.truncate(layout.rows * layout.cols);
    let accent_source = files[0].clone();

    // Unreadable fonts abort before any compositing work.
    let title_font = text::load_font(&job.title_font)?;
    let subtitle = job.subtitle.as_deref().filter(|s| !s.is_empty());
    let subtitle_font = subtitle
        .map(|_| text::load_font(&job.subtitle_font))
        .transpose()?;

    let mut canvas = gradient::gradient_background(
        layout.canvas_width,
        layout.canvas_height,
        None,
        rng,
    );

    let columns_dir = job
        .output_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("columns");
    if job.save_columns {
        fs::create_dir_all(&columns_dir)?;
    }
    let stem = job
        .output_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "poster".into());

    let mut placed_total = 0;
    for (index, group) in files.chunks(layout.rows).take(layout.cols).enumerate() {
        let (column_img, placed) = column::build_column(group, layout, shadow);
        placed_total += placed;
        debug!(index, placed, "Column built");

        if job.save_columns {
            column_img.save(columns_dir.join(format!("{stem}_column_{}_original.png", index + 1)))?;
        }

        let rotated = rotate_column(&column_img, layout.rotation_angle);
        if job.save_columns {
            rotated.save(columns_dir.join(format!("{stem}_column_{}_rotated.png", index + 1)))?;
        }

        place_column(&mut canvas, &rotated, index, layout);
    }

    if placed_total == 0 {
        return Err(PosterError::NoSourceImages(job.source_dir.clone()));
    }

    text::draw_text(
        &mut canvas,
        &job.title,
        text::TITLE_POS,
        &title_font,
        text::TITLE_SIZE,
        text::TEXT_COLOR,
    );

    if let (Some(subtitle), Some(font)) = (subtitle, subtitle_font.as_ref()) {
        let size = text::subtitle_size(text::SUBTITLE_BASE_SIZE, subtitle.chars().count());
        debug!(subtitle, size, "Drawing subtitle");
        text::draw_text(&mut canvas, subtitle, text::SUBTITLE_POS, font, size, text::TEXT_COLOR);

        let accent = text::sample_accent_color(&accent_source, rng);
        text::draw_accent_block(&mut canvas, text::ACCENT_BLOCK_POS, text::ACCENT_BLOCK_SIZE, accent);
    }

    write_atomically(&canvas, &job.output_path)?;
    info!(output = %job.output_path.display(), placed_total, "Poster saved");
    Ok(())
}

/// Collect supported raster files from the source directory, in plain
/// enumeration order. Callers wanting a stable order must pre-sort.
fn list_source_images(dir: &Path) -> Result<Vec<PathBuf>, PosterError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let supported = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| SUPPORTED_FORMATS.contains(&e.to_ascii_lowercase().as_str()));
        if supported {
            files.push(path);
        }
    }
    Ok(files)
}

/// Encode to a temp file, then rename over the target so a failed render
/// never leaves a partial poster behind.
fn write_atomically(canvas: &image::RgbaImage, output_path: &Path) -> Result<(), PosterError> {
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = output_path.with_extension("png.tmp");
    {
        let file = fs::File::create(&tmp)?;
        let mut writer = BufWriter::new(file);
        canvas.write_to(&mut writer, ImageFormat::Png)?;
    }
    fs::rename(&tmp, output_path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// A small grid keeps the Gaussian blur and rotation cheap while the
    /// canvas stays at full poster size.
    fn test_layout() -> PosterLayout {
        PosterLayout {
            cell_width: 24,
            cell_height: 36,
            margin: 4,
            corner_radius: 5.0,
            start_x: 300,
            start_y: 80,
            column_spacing: 60,
            ..PosterLayout::default()
        }
    }

    fn test_shadow() -> ShadowParams {
        ShadowParams {
            offset: (3, 3),
            color: image::Rgba([0, 0, 0, 255]),
            blur_radius: 2,
        }
    }

    fn system_font() -> Option<PathBuf> {
        const CANDIDATES: &[&str] = &[
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/System/Library/Fonts/Supplemental/Arial.ttf",
        ];
        CANDIDATES.iter().map(PathBuf::from).find(|p| p.exists())
    }

    fn write_sources(dir: &Path, count: usize) {
        for i in 0..count {
            let img = RgbImage::from_pixel(40, 60, Rgb([(i * 25) as u8, 90, 180]));
            img.save(dir.join(format!("{}.jpg", i + 1))).unwrap();
        }
    }

    fn job(source: &Path, output: &Path, font: PathBuf) -> PosterJob {
        PosterJob {
            source_dir: source.to_path_buf(),
            output_path: output.to_path_buf(),
            title: "动画".into(),
            subtitle: Some("Anime".into()),
            title_font: font.clone(),
            subtitle_font: font,
            save_columns: false,
        }
    }

    #[test]
    fn full_grid_renders_a_poster() {
        let Some(font) = system_font() else {
            eprintln!("no system font found, skipping");
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("posters");
        fs::create_dir(&source).unwrap();
        write_sources(&source, 9);

        let output = dir.path().join("out").join("Anime.png");
        let mut rng = StdRng::seed_from_u64(42);
        render_poster(
            &job(&source, &output, font),
            &test_layout(),
            &test_shadow(),
            &mut rng,
        )
        .unwrap();

        let rendered = image::open(&output).unwrap();
        assert_eq!((rendered.width(), rendered.height()), (1920, 1080));
        assert!(!output.with_extension("png.tmp").exists());
    }

    #[test]
    fn partial_grid_still_succeeds() {
        let Some(font) = system_font() else {
            eprintln!("no system font found, skipping");
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("posters");
        fs::create_dir(&source).unwrap();
        write_sources(&source, 5);

        let output = dir.path().join("Movies.png");
        let mut rng = StdRng::seed_from_u64(43);
        render_poster(
            &job(&source, &output, font),
            &test_layout(),
            &test_shadow(),
            &mut rng,
        )
        .unwrap();
        assert!(output.exists());
    }

    #[test]
    fn empty_source_dir_fails_without_output() {
        let Some(font) = system_font() else {
            eprintln!("no system font found, skipping");
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("posters");
        fs::create_dir(&source).unwrap();

        let output = dir.path().join("Empty.png");
        let mut rng = StdRng::seed_from_u64(44);
        let err = render_poster(
            &job(&source, &output, font),
            &test_layout(),
            &test_shadow(),
            &mut rng,
        )
        .unwrap_err();

        assert!(matches!(err, PosterError::NoSourceImages(_)));
        assert!(!output.exists());
    }

    #[test]
    fn non_image_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "hello").unwrap();
        fs::write(dir.path().join("data.json"), "{}").unwrap();
        let files = list_source_images(dir.path()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn uppercase_extensions_are_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let img = RgbImage::from_pixel(4, 4, Rgb([1, 2, 3]));
        img.save(dir.path().join("COVER.PNG")).unwrap();
        let files = list_source_images(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn missing_title_font_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("posters");
        fs::create_dir(&source).unwrap();
        write_sources(&source, 2);

        let output = dir.path().join("Out.png");
        let mut rng = StdRng::seed_from_u64(45);
        let err = render_poster(
            &job(&source, &output, dir.path().join("missing.ttf")),
            &test_layout(),
            &test_shadow(),
            &mut rng,
        )
        .unwrap_err();

        assert!(matches!(err, PosterError::Font { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn save_columns_writes_intermediates() {
        let Some(font) = system_font() else {
            eprintln!("no system font found, skipping");
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("posters");
        fs::create_dir(&source).unwrap();
        write_sources(&source, 9);

        let output = dir.path().join("Shows.png");
        let mut poster_job = job(&source, &output, font);
        poster_job.save_columns = true;

        let mut rng = StdRng::seed_from_u64(46);
        render_poster(&poster_job, &test_layout(), &test_shadow(), &mut rng).unwrap();

        let columns = dir.path().join("columns");
        assert!(columns.join("Shows_column_1_original.png").exists());
        assert!(columns.join("Shows_column_3_rotated.png").exists());
    }
}
