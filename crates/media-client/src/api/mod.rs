//! MediaBrowser REST API client.
//!
//! Provides typed access to the endpoints the poster pipeline needs,
//! with token-header or `api_key` query authorization per session.

mod images;
mod items;
mod libraries;
mod request;

pub mod models;

pub use models::{ItemsPage, MediaFolder, MediaItem};

use url::Url;

use crate::{MediaError, ServerType, http_client};

/// REST client bound to one server.
pub struct MediaClient {
    pub(super) http: reqwest::Client,
    pub(super) base_url: String,
    pub(super) server_type: ServerType,
}

impl MediaClient {
    pub fn new(base_url: impl Into<String>, server_type: ServerType) -> Result<Self, MediaError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        tracing::debug!(%base_url, %server_type, "Creating media client");
        Ok(Self {
            http: http_client()?,
            base_url,
            server_type,
        })
    }

    pub fn server_type(&self) -> ServerType {
        self.server_type
    }

    /// Build an absolute endpoint URL from a path like `/Library/MediaFolders`.
    pub(super) fn endpoint(&self, path: &str) -> Result<Url, MediaError> {
        Ok(Url::parse(&format!("{}{}", self.base_url, path))?)
    }
}
