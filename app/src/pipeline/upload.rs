//! Poster upload back to the media server.

use std::fs;
use std::path::Path;

use anyhow::Context;
use media_client::Session;
use media_client::api::MediaClient;
use tracing::info;

use super::IMAGE_TYPE;

/// Push a rendered poster as the library's primary image.
pub async fn upload_poster(
    client: &MediaClient,
    session: &Session,
    library_id: &str,
    path: &Path,
) -> anyhow::Result<()> {
    let data = fs::read(path)
        .with_context(|| format!("cannot read rendered poster {}", path.display()))?;

    client
        .upload_image(session, library_id, IMAGE_TYPE, &data, "image/png")
        .await
        .with_context(|| format!("upload failed for library {library_id}"))?;

    info!(library_id, path = %path.display(), "Poster uploaded");
    Ok(())
}
