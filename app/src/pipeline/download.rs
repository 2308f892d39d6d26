//! Cover download: select library items and fill the poster source
//! folder.

use std::fs;
use std::path::Path;

use anyhow::bail;
use media_client::api::{MediaClient, MediaFolder, MediaItem};
use media_client::{Session, selection};
use rand::Rng;
use tracing::{debug, info, warn};

use super::IMAGE_TYPE;

/// Extensions cleared from the poster folder before a fresh download.
const STALE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Download up to `count` covers for a library into `dest`.
///
/// Covers are written as `1.jpg`, `2.jpg`, ... in selection order. When
/// the library yields fewer covers than grid cells, already-fetched
/// covers are repeated round-robin until the grid is full (bounded, so a
/// failing server cannot loop forever). Returns the number of files
/// written; zero successful downloads is an error.
pub async fn download_posters(
    client: &MediaClient,
    session: &Session,
    folder: &MediaFolder,
    dest: &Path,
    count: usize,
    rng: &mut impl Rng,
) -> anyhow::Result<usize> {
    ensure_poster_dir(dest)?;

    let items = client.get_child_items(session, &folder.id).await?;
    let selected = selection::select_cover_items(items, count, rng);
    if selected.is_empty() {
        bail!("library {} has no items with cover art", folder.name);
    }

    let mut fetched: Vec<&MediaItem> = Vec::new();
    let mut written = 0usize;
    for item in &selected {
        if item.id.is_empty() {
            warn!(name = %item.name, "Skipping item without an id");
            continue;
        }
        if fetch_cover(client, session, &item.id, dest, written + 1).await {
            fetched.push(item);
            written += 1;
        }
        if written >= count {
            break;
        }
    }

    if written > 0 && written < count {
        info!(written, count, "Repeating downloaded covers to fill the grid");
        let mut attempts = 0;
        let mut index = 0;
        while written < count && attempts < count * 3 {
            let item = fetched[index % fetched.len()];
            index += 1;
            attempts += 1;
            if fetch_cover(client, session, &item.id, dest, written + 1).await {
                written += 1;
            }
        }
    }

    if written == 0 {
        bail!("all cover downloads failed for {}", folder.name);
    }
    info!(library = %folder.name, written, "Covers downloaded");
    Ok(written)
}

async fn fetch_cover(
    client: &MediaClient,
    session: &Session,
    item_id: &str,
    dest: &Path,
    index: usize,
) -> bool {
    match client.download_image(session, item_id, IMAGE_TYPE).await {
        Ok(bytes) => {
            let path = dest.join(format!("{index}.jpg"));
            match fs::write(&path, &bytes) {
                Ok(()) => {
                    debug!(item_id, index, "Cover saved");
                    true
                }
                Err(e) => {
                    warn!(item_id, error = %e, "Failed to write cover file");
                    false
                }
            }
        }
        Err(e) => {
            warn!(item_id, error = %e, "Cover download failed");
            false
        }
    }
}

/// Create the per-library poster folder and clear stale covers from
/// earlier runs. Non-image files are left alone.
fn ensure_poster_dir(dest: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dest)?;
    for entry in fs::read_dir(dest)? {
        let path = entry?.path();
        let stale = path.is_file()
            && path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| STALE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));
        if stale {
            debug!(path = %path.display(), "Removing stale cover");
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}
