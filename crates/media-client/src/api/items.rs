use super::*;
use crate::Session;

impl MediaClient {
    /// List the direct children of a library
    /// (`GET /Users/{userId}/Items?ParentId={id}`).
    pub async fn get_child_items(
        &self,
        session: &Session,
        parent_id: &str,
    ) -> Result<Vec<MediaItem>, MediaError> {
        let mut url = self.endpoint(&format!("/Users/{}/Items", session.user_id))?;
        url.query_pairs_mut().append_pair("ParentId", parent_id);

        let body = self.authenticated_get(url, session).await?;
        let page: ItemsPage<MediaItem> = serde_json::from_str(&body)?;

        tracing::info!(parent_id, count = page.items.len(), "Fetched library items");
        Ok(page.items)
    }
}
