//! Identity boundary — bearer-token verification for the export routes.
//!
//! Token verification itself is an external collaborator: the production
//! implementation asks the identity provider to resolve the token into a
//! subject. The trait seam keeps handlers and tests independent of the
//! provider.

use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use thiserror::Error;

use crate::errors::AppError;
use crate::state::AppState;

const LOOKUP_URL: &str = "https://identitytoolkit.googleapis.com/v1/accounts:lookup";

/// Verified caller identity, injected into request extensions by the
/// middleware.
#[derive(Debug, Clone)]
pub struct Subject {
    pub uid: String,
    pub email: Option<String>,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("token rejected by identity provider: {0}")]
    Rejected(String),

    #[error("identity provider returned no user for token")]
    UnknownSubject,
}

/// Opaque bearer token → verified subject, or failure.
/// Carried in `AppState` as `Arc<dyn IdentityVerifier>`.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Subject, AuthError>;
}

/// Axum middleware guarding the export routes. Missing or invalid tokens
/// get a 401; verified requests carry the `Subject` as an extension.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())
        .ok_or_else(|| AppError::Unauthorized("No token provided".to_string()))?
        .to_string();

    let subject = state
        .verifier
        .verify(&token)
        .await
        .map_err(|e| AppError::Unauthorized(e.to_string()))?;

    request.extensions_mut().insert(subject);
    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Firebase-backed verifier
// ────────────────────────────────────────────────────────────────────────────

/// Production verifier: resolves ID tokens via the identity toolkit
/// accounts:lookup endpoint.
pub struct FirebaseVerifier {
    client: reqwest::Client,
    api_key: String,
}

impl FirebaseVerifier {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
struct LookupUser {
    #[serde(rename = "localId")]
    local_id: String,
    email: Option<String>,
}

#[async_trait]
impl IdentityVerifier for FirebaseVerifier {
    async fn verify(&self, token: &str) -> Result<Subject, AuthError> {
        let response = self
            .client
            .post(format!("{LOOKUP_URL}?key={}", self.api_key))
            .json(&serde_json::json!({ "idToken": token }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Rejected(format!("status {status}: {body}")));
        }

        let lookup: LookupResponse = response.json().await?;
        let user = lookup
            .users
            .into_iter()
            .next()
            .ok_or(AuthError::UnknownSubject)?;

        Ok(Subject {
            uid: user.local_id,
            email: user.email,
        })
    }
}

/// Test verifier: accepts exactly "valid-token".
#[cfg(test)]
pub struct StubVerifier;

#[cfg(test)]
#[async_trait]
impl IdentityVerifier for StubVerifier {
    async fn verify(&self, token: &str) -> Result<Subject, AuthError> {
        if token == "valid-token" {
            Ok(Subject {
                uid: "test-uid".to_string(),
                email: None,
            })
        } else {
            Err(AuthError::Rejected("unknown token".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extracted() {
        let headers = headers_with_auth("Bearer abc123");
        assert_eq!(bearer_token(&headers), Some("abc123"));
    }

    #[test]
    fn test_missing_header_yields_none() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_non_bearer_scheme_rejected() {
        let headers = headers_with_auth("Basic dXNlcjpwYXNz");
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_empty_token_rejected() {
        let headers = headers_with_auth("Bearer ");
        assert_eq!(bearer_token(&headers), None);
    }

    #[tokio::test]
    async fn test_stub_verifier_resolves_subject() {
        let subject = StubVerifier.verify("valid-token").await.unwrap();
        assert_eq!(subject.uid, "test-uid");
        assert!(StubVerifier.verify("bogus").await.is_err());
    }
}
