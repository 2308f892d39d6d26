//! Per-library batch pipeline: download covers, render the collage,
//! upload the result.

mod download;
mod upload;

use anyhow::Context;
use media_client::api::{MediaClient, MediaFolder};
use media_client::auth::Authenticator;
use media_client::Session;
use poster_engine::shadow::CELL_SHADOW;
use poster_engine::{PosterJob, render_poster};
use rand::rngs::OsRng;
use tracing::{error, info};

use crate::config::AppConfig;

/// Image slot used for covers, on both download and upload.
const IMAGE_TYPE: &str = "Primary";

/// Outcome counters for one batch run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub uploaded: usize,
}

/// Authenticate, enumerate libraries, and process each one. A library
/// failure is logged and counted; the batch always continues.
pub async fn run(
    config: &AppConfig,
    only_library: Option<&str>,
    no_upload: bool,
) -> anyhow::Result<RunSummary> {
    let auth = Authenticator::new(&config.server.base_url)?;
    let mut session = auth
        .authenticate_by_name(&config.server.username, &config.server.password)
        .await
        .context("authentication failed")?;

    if let Some(key) = &config.server.api_key {
        // Emby deployments can authorize follow-up requests with a
        // static key instead of the session token.
        session.access_token = key.clone();
        session.use_api_key = true;
    }

    let client = MediaClient::new(&config.server.base_url, config.server_type)?;
    let folders = client
        .get_media_folders(&session)
        .await
        .context("failed to list media libraries")?;
    anyhow::ensure!(!folders.is_empty(), "server returned no media libraries");

    let mut summary = RunSummary::default();
    let mut rng = OsRng;
    for folder in &folders {
        if only_library.is_some_and(|name| name != folder.name) {
            continue;
        }
        info!(library = %folder.name, id = %folder.id, "Processing library");
        match process_library(&client, &session, config, folder, no_upload, &mut rng).await {
            Ok(uploaded) => {
                summary.succeeded += 1;
                if uploaded {
                    summary.uploaded += 1;
                }
            }
            Err(e) => {
                error!(library = %folder.name, error = %e, "Library failed");
                summary.failed += 1;
            }
        }
    }
    Ok(summary)
}

/// Full treatment for one library. Returns whether the poster was
/// uploaded.
async fn process_library(
    client: &MediaClient,
    session: &Session,
    config: &AppConfig,
    folder: &MediaFolder,
    no_upload: bool,
    rng: &mut OsRng,
) -> anyhow::Result<bool> {
    let source_dir = config.posters_dir.join(&folder.name);
    download::download_posters(
        client,
        session,
        folder,
        &source_dir,
        config.poster_count,
        rng,
    )
    .await?;

    let (title, subtitle) = config.resolve_titles(&folder.name);
    let output_path = config.output_dir.join(format!("{}.png", folder.name));
    let job = PosterJob {
        source_dir,
        output_path: output_path.clone(),
        title,
        subtitle,
        title_font: config.title_font.clone(),
        subtitle_font: config.subtitle_font.clone(),
        save_columns: config.save_columns,
    };
    render_poster(&job, &config.layout, &CELL_SHADOW, rng)?;

    if no_upload || !config.server.update_poster {
        info!(library = %folder.name, "Upload disabled, poster kept locally");
        return Ok(false);
    }
    if config.excluded_libraries.iter().any(|n| n == &folder.name) {
        info!(library = %folder.name, "Library excluded from upload");
        return Ok(false);
    }

    upload::upload_poster(client, session, &folder.id, &output_path).await?;
    Ok(true)
}
