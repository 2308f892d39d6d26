//! Jellyfin/Emby integration client library.
//!
//! Provides password authentication, library and item enumeration,
//! and cover image download/upload over the MediaBrowser REST API.

pub mod api;
pub mod auth;
pub mod selection;

use serde::{Deserialize, Serialize};

/// Which MediaBrowser server flavor is on the other end.
///
/// The wire protocol is shared; the flavors differ only in how requests
/// may be authorized (Emby additionally accepts a static `api_key` query
/// parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerType {
    Jellyfin,
    Emby,
}

impl Default for ServerType {
    fn default() -> Self {
        Self::Jellyfin
    }
}

impl std::fmt::Display for ServerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Jellyfin => write!(f, "jellyfin"),
            Self::Emby => write!(f, "emby"),
        }
    }
}

/// An authenticated session against one server.
///
/// Sessions live for a single batch run; there is no refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub access_token: String,
    /// Send the token as an `api_key` query parameter instead of the
    /// MediaBrowser authorization header (Emby static API keys).
    #[serde(default)]
    pub use_api_key: bool,
}

/// Unified error type for the media-client crate.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error("server API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Client identity sent with `AuthenticateByName` requests.
pub const CLIENT_AUTH_HEADER: &str =
    "MediaBrowser Client=\"poster-wall\", Device=\"poster-wall\", DeviceId=\"poster-wall\", Version=\"1.0.0\"";

/// Network timeout applied to every request.
pub(crate) const REQUEST_TIMEOUT_SECS: u64 = 30;

pub(crate) fn http_client() -> Result<reqwest::Client, MediaError> {
    Ok(reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()?)
}
