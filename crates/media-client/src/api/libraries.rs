use super::*;
use crate::Session;

impl MediaClient {
    /// List the server's media libraries (`GET /Library/MediaFolders`).
    ///
    /// Entries missing an id or name are dropped.
    pub async fn get_media_folders(
        &self,
        session: &Session,
    ) -> Result<Vec<MediaFolder>, MediaError> {
        let url = self.endpoint("/Library/MediaFolders")?;
        let body = self.authenticated_get(url, session).await?;
        let page: ItemsPage<MediaFolder> = serde_json::from_str(&body)?;

        let folders: Vec<MediaFolder> = page
            .items
            .into_iter()
            .filter(|f| {
                let complete = !f.id.is_empty() && !f.name.is_empty();
                if !complete {
                    tracing::warn!(?f, "Skipping incomplete media folder entry");
                }
                complete
            })
            .collect();

        tracing::info!(count = folders.len(), "Fetched media folders");
        Ok(folders)
    }
}
