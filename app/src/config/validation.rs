//! Configuration validation.

use super::AppConfig;

/// Validate the resolved configuration. Returns all problems joined into
/// one message so a broken config is fixable in a single pass.
pub fn validate(config: &AppConfig) -> Result<(), String> {
    let mut problems = Vec::new();

    let base_url = config.server.base_url.trim();
    if base_url.is_empty() {
        problems.push("server.base_url must not be empty".to_string());
    } else if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        problems.push(format!("server.base_url must be an http(s) URL, got {base_url:?}"));
    }

    if config.server.username.is_empty() {
        problems.push("server.username must not be empty".to_string());
    }

    if config.poster_count == 0 {
        problems.push("download.poster_count must be at least 1".to_string());
    }

    let layout = &config.layout;
    if layout.rows == 0 || layout.cols == 0 {
        problems.push("poster.rows and poster.cols must be at least 1".to_string());
    } else if config.poster_count > layout.rows * layout.cols {
        problems.push(format!(
            "download.poster_count ({}) exceeds the grid capacity ({})",
            config.poster_count,
            layout.rows * layout.cols
        ));
    }
    if layout.cell_width == 0 || layout.cell_height == 0 {
        problems.push("poster.cell_width and poster.cell_height must be positive".to_string());
    }
    if layout.canvas_width == 0 || layout.canvas_height == 0 {
        problems.push("poster.canvas_width and poster.canvas_height must be positive".to_string());
    }

    if !config.title_font.is_file() {
        problems.push(format!("fonts.title not found: {}", config.title_font.display()));
    }
    if !config.subtitle_font.is_file() {
        problems.push(format!(
            "fonts.subtitle not found: {}",
            config.subtitle_font.display()
        ));
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems.join("; "))
    }
}
