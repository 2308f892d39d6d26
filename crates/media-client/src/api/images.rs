use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use super::*;
use crate::Session;

impl MediaClient {
    /// Download an item's image (`GET /Items/{id}/Images/{type}`).
    pub async fn download_image(
        &self,
        session: &Session,
        item_id: &str,
        image_type: &str,
    ) -> Result<Vec<u8>, MediaError> {
        let url = self.endpoint(&format!("/Items/{item_id}/Images/{image_type}"))?;
        let bytes = self.authenticated_get_bytes(url, session).await?;
        tracing::debug!(item_id, image_type, size = bytes.len(), "Downloaded image");
        Ok(bytes)
    }

    /// Upload an item's image (`POST /Items/{id}/Images/{type}`).
    ///
    /// The server expects the payload base64-encoded with the image's
    /// content type on the request.
    pub async fn upload_image(
        &self,
        session: &Session,
        item_id: &str,
        image_type: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<(), MediaError> {
        let url = self.endpoint(&format!("/Items/{item_id}/Images/{image_type}"))?;
        let body = BASE64.encode(data);
        tracing::info!(item_id, image_type, size = data.len(), "Uploading image");
        self.authenticated_post_raw(url, session, body, content_type)
            .await
    }
}
