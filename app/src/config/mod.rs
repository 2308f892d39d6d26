//! Configuration: JSON file schema, environment overrides, validation.

pub mod validation;

use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use media_client::ServerType;
use poster_engine::PosterLayout;
use serde::Deserialize;

/// Environment variable overriding the configured server password.
pub const PASSWORD_ENV: &str = "POSTER_WALL_PASSWORD";

/// Raw shape of `config.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server_type: ServerType,
    pub jellyfin: Option<ServerEntry>,
    pub emby: Option<ServerEntry>,
    #[serde(default)]
    pub excluded_libraries: Vec<String>,
    #[serde(default)]
    pub template_mapping: Vec<TemplateMapping>,
    #[serde(default)]
    pub poster: PosterSettings,
    #[serde(default)]
    pub download: DownloadSettings,
    #[serde(default)]
    pub fonts: FontSettings,
    #[serde(default)]
    pub folders: FolderSettings,
}

/// Connection settings for one server flavor.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerEntry {
    pub base_url: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Emby only: a static API key used for follow-up requests.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Whether rendered posters are pushed back to the server.
    #[serde(default)]
    pub update_poster: bool,
}

/// Display names for one library. A library without a mapping falls back
/// to its raw name with no subtitle.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateMapping {
    pub library_name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
}

/// Poster geometry overrides; every field defaults to the tuned layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PosterSettings {
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
    pub save_columns: bool,
}

impl Default for PosterSettings {
    fn default() -> Self {
        let layout = PosterLayout::default();
        Self {
            canvas_width: layout.canvas_width,
            canvas_height: layout.canvas_height,
            rows: layout.rows,
            cols: layout.cols,
            margin: layout.margin,
            corner_radius: layout.corner_radius,
            rotation_angle: layout.rotation_angle,
            start_x: layout.start_x,
            start_y: layout.start_y,
            column_spacing: layout.column_spacing,
            cell_width: layout.cell_width,
            cell_height: layout.cell_height,
            save_columns: false,
        }
    }
}

impl PosterSettings {
    pub fn layout(&self) -> PosterLayout {
        PosterLayout {
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
            rows: self.rows,
            cols: self.cols,
            margin: self.margin,
            corner_radius: self.corner_radius,
            rotation_angle: self.rotation_angle,
            start_x: self.start_x,
            start_y: self.start_y,
            column_spacing: self.column_spacing,
            cell_width: self.cell_width,
            cell_height: self.cell_height,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DownloadSettings {
    /// How many covers to fetch per library.
    pub poster_count: usize,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self { poster_count: 9 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FontSettings {
    pub title: PathBuf,
    pub subtitle: PathBuf,
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            title: PathBuf::from("fonts/title.ttf"),
            subtitle: PathBuf::from("fonts/subtitle.otf"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FolderSettings {
    /// Downloaded covers land here, one subfolder per library.
    pub posters: PathBuf,
    /// Rendered posters land here, one file per library.
    pub output: PathBuf,
}

impl Default for FolderSettings {
    fn default() -> Self {
        Self {
            posters: PathBuf::from("poster"),
            output: PathBuf::from("output"),
        }
    }
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_type: ServerType,
    pub server: ServerEntry,
    pub excluded_libraries: Vec<String>,
    pub template_mapping: Vec<TemplateMapping>,
    pub layout: PosterLayout,
    pub save_columns: bool,
    pub poster_count: usize,
    pub title_font: PathBuf,
    pub subtitle_font: PathBuf,
    pub posters_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl AppConfig {
    /// Load and validate the configuration file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        let file: FileConfig = serde_json::from_str(&raw)
            .with_context(|| format!("cannot parse config file {}", path.display()))?;
        Self::from_file(file)
    }

    /// Resolve the active server section and apply env overrides.
    pub fn from_file(file: FileConfig) -> anyhow::Result<Self> {
        let entry = match file.server_type {
            ServerType::Jellyfin => file.jellyfin,
            ServerType::Emby => file.emby,
        };
        let mut server = entry
            .ok_or_else(|| anyhow!("config has no \"{}\" server section", file.server_type))?;

        if let Ok(password) = std::env::var(PASSWORD_ENV) {
            tracing::debug!("Using password from {PASSWORD_ENV}");
            server.password = password;
        }

        let config = Self {
            server_type: file.server_type,
            server,
            excluded_libraries: file.excluded_libraries,
            template_mapping: file.template_mapping,
            layout: file.poster.layout(),
            save_columns: file.poster.save_columns,
            poster_count: file.download.poster_count,
            title_font: file.fonts.title,
            subtitle_font: file.fonts.subtitle,
            posters_dir: file.folders.posters,
            output_dir: file.folders.output,
        };

        validation::validate(&config).map_err(|e| anyhow!("invalid configuration: {e}"))?;
        Ok(config)
    }

    /// Display title and subtitle for a library, by exact name match.
    pub fn resolve_titles(&self, library_name: &str) -> (String, Option<String>) {
        match self
            .template_mapping
            .iter()
            .find(|t| t.library_name == library_name)
        {
            Some(mapping) => (
                mapping
                    .title
                    .clone()
                    .unwrap_or_else(|| library_name.to_string()),
                mapping.subtitle.clone().filter(|s| !s.is_empty()),
            ),
            None => (library_name.to_string(), None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_dummy_fonts(dir: &Path) -> (PathBuf, PathBuf) {
        let title = dir.join("title.ttf");
        let subtitle = dir.join("subtitle.otf");
        std::fs::write(&title, b"stub").unwrap();
        std::fs::write(&subtitle, b"stub").unwrap();
        (title, subtitle)
    }

    fn minimal_json(fonts: &(PathBuf, PathBuf)) -> String {
        format!(
            r#"{{
                "jellyfin": {{
                    "base_url": "http://media.local:8096",
                    "username": "admin",
                    "password": "secret",
                    "update_poster": true
                }},
                "fonts": {{ "title": {:?}, "subtitle": {:?} }}
            }}"#,
            fonts.0, fonts.1
        )
    }

    #[test]
    fn minimal_config_uses_tuned_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let fonts = write_dummy_fonts(dir.path());
        let file: FileConfig = serde_json::from_str(&minimal_json(&fonts)).unwrap();
        let config = AppConfig::from_file(file).unwrap();

        assert_eq!(config.server_type, ServerType::Jellyfin);
        assert_eq!(config.poster_count, 9);
        assert_eq!(config.layout.rows, 3);
        assert_eq!(config.layout.cols, 3);
        assert_eq!(config.layout.margin, 22);
        assert_eq!(config.layout.cell_width, 410);
        assert_eq!(config.layout.cell_height, 610);
        assert_eq!(config.layout.start_x, 835);
        assert_eq!(config.layout.start_y, -362);
        assert!(!config.save_columns);
        assert!(config.server.update_poster);
    }

    #[test]
    fn emby_config_requires_emby_section() {
        let file: FileConfig = serde_json::from_str(
            r#"{
                "server_type": "emby",
                "jellyfin": { "base_url": "http://x", "username": "u", "password": "p" }
            }"#,
        )
        .unwrap();
        let err = AppConfig::from_file(file).unwrap_err();
        assert!(err.to_string().contains("emby"));
    }

    #[test]
    fn titles_fall_back_to_the_library_name() {
        let dir = tempfile::tempdir().unwrap();
        let fonts = write_dummy_fonts(dir.path());
        let mut file: FileConfig = serde_json::from_str(&minimal_json(&fonts)).unwrap();
        file.template_mapping = vec![TemplateMapping {
            library_name: "Anime".into(),
            title: Some("动画".into()),
            subtitle: Some("Anime".into()),
        }];
        let config = AppConfig::from_file(file).unwrap();

        assert_eq!(
            config.resolve_titles("Anime"),
            ("动画".to_string(), Some("Anime".to_string()))
        );
        assert_eq!(config.resolve_titles("Movies"), ("Movies".to_string(), None));
    }

    #[test]
    fn empty_subtitle_counts_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let fonts = write_dummy_fonts(dir.path());
        let mut file: FileConfig = serde_json::from_str(&minimal_json(&fonts)).unwrap();
        file.template_mapping = vec![TemplateMapping {
            library_name: "Docs".into(),
            title: None,
            subtitle: Some(String::new()),
        }];
        let config = AppConfig::from_file(file).unwrap();
        assert_eq!(config.resolve_titles("Docs"), ("Docs".to_string(), None));
    }
}
