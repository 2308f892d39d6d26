//! Password authentication against `/Users/AuthenticateByName`.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::{CLIENT_AUTH_HEADER, MediaError, Session, http_client};

#[derive(Debug, Serialize)]
struct AuthRequest<'a> {
    #[serde(rename = "Username")]
    username: &'a str,
    #[serde(rename = "Pw")]
    pw: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    #[serde(rename = "User", default)]
    user: Option<AuthUser>,
    #[serde(rename = "AccessToken", default)]
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    #[serde(rename = "Id", default)]
    id: Option<String>,
}

/// Authenticates a user by name and password.
pub struct Authenticator {
    base_url: String,
    http: reqwest::Client,
}

impl Authenticator {
    pub fn new(base_url: impl Into<String>) -> Result<Self, MediaError> {
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: http_client()?,
        })
    }

    /// Exchange username and password for a [`Session`].
    ///
    /// The server must return both `User.Id` and `AccessToken`; a 2xx
    /// response missing either is treated as a failed authentication.
    pub async fn authenticate_by_name(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Session, MediaError> {
        let url = format!("{}/Users/AuthenticateByName", self.base_url);
        tracing::info!(url = %url, username, "Authenticating");

        let resp = self
            .http
            .post(&url)
            .header(AUTHORIZATION, CLIENT_AUTH_HEADER)
            .header(CONTENT_TYPE, "application/json")
            .json(&AuthRequest { username, pw: password })
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(MediaError::AuthFailed(format!(
                "status {}: {}",
                status.as_u16(),
                truncate(&body, 200)
            )));
        }

        session_from_response(&body)
    }
}

/// Parse the authentication response body into a session.
fn session_from_response(body: &str) -> Result<Session, MediaError> {
    let parsed: AuthResponse = serde_json::from_str(body)?;
    let user_id = parsed.user.and_then(|u| u.id).unwrap_or_default();
    let access_token = parsed.access_token.unwrap_or_default();

    if user_id.is_empty() || access_token.is_empty() {
        return Err(MediaError::AuthFailed(
            "response missing User.Id or AccessToken".into(),
        ));
    }

    Ok(Session {
        user_id,
        access_token,
        use_api_key: false,
    })
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_complete_response() {
        let body = r#"{
            "User": { "Id": "abc123", "Name": "admin" },
            "AccessToken": "tok456",
            "ServerId": "srv"
        }"#;
        let session = session_from_response(body).unwrap();
        assert_eq!(session.user_id, "abc123");
        assert_eq!(session.access_token, "tok456");
        assert!(!session.use_api_key);
    }

    #[test]
    fn missing_token_is_auth_failure() {
        let body = r#"{ "User": { "Id": "abc123" } }"#;
        let err = session_from_response(body).unwrap_err();
        assert!(matches!(err, MediaError::AuthFailed(_)));
    }

    #[test]
    fn missing_user_id_is_auth_failure() {
        let body = r#"{ "User": {}, "AccessToken": "tok" }"#;
        let err = session_from_response(body).unwrap_err();
        assert!(matches!(err, MediaError::AuthFailed(_)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = session_from_response("not json").unwrap_err();
        assert!(matches!(err, MediaError::Json(_)));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("动画动画", 2), "动画");
        assert_eq!(truncate("ab", 5), "ab");
    }
}
