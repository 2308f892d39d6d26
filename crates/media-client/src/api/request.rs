use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use url::Url;

use super::*;
use crate::Session;

impl MediaClient {
    /// Apply the session's authorization to a URL/header pair.
    ///
    /// Token sessions use the MediaBrowser authorization header; api-key
    /// sessions (Emby) append the key as a query parameter instead.
    fn apply_auth(&self, url: &mut Url, session: &Session) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if session.use_api_key {
            url.query_pairs_mut()
                .append_pair("api_key", &session.access_token);
        } else {
            let token = format!("MediaBrowser Token=\"{}\"", session.access_token);
            headers.insert(AUTHORIZATION, HeaderValue::from_str(&token).unwrap());
        }
        headers
    }

    /// Execute a GET request and return the response body as text.
    pub(super) async fn authenticated_get(
        &self,
        mut url: Url,
        session: &Session,
    ) -> Result<String, MediaError> {
        let headers = self.apply_auth(&mut url, session);
        let resp = self.http.get(url).headers(headers).send().await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(MediaError::Api {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(body)
    }

    /// Execute a GET request and return the raw response bytes.
    pub(super) async fn authenticated_get_bytes(
        &self,
        mut url: Url,
        session: &Session,
    ) -> Result<Vec<u8>, MediaError> {
        let headers = self.apply_auth(&mut url, session);
        let resp = self.http.get(url).headers(headers).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(MediaError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(resp.bytes().await?.to_vec())
    }

    /// Execute a POST request with a raw body and explicit content type.
    pub(super) async fn authenticated_post_raw(
        &self,
        mut url: Url,
        session: &Session,
        body: String,
        content_type: &str,
    ) -> Result<(), MediaError> {
        let mut headers = self.apply_auth(&mut url, session);
        headers.insert(CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());

        let resp = self
            .http
            .post(url)
            .headers(headers)
            .body(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(MediaError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}
