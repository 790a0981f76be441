//! Typed client for the GastroLog REST backend.
//!
//! [`NetworkGateway`] owns the HTTP client, the base URL and the session.
//! Every method returns a typed payload or a classified [`GastroError`];
//! nothing is retried.
//!
//! Endpoints are grouped by area in the submodules:
//!
//! - `auth` - login, registration, password recovery
//! - `users` - own profile, account settings, user search
//! - `social` - follow relations and requests
//! - `restaurants` - external search, import, favorites
//! - `reviews` - review submission, deletion, feed

mod auth;
mod restaurants;
mod reviews;
mod social;
mod users;

pub use social::RelationList;

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::error::{AuthError, GastroResult, NetworkError};
use crate::session::SessionStore;
use crate::traits::{Headers, HttpClient, HttpError, Response};

/// Default backend base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Longest server-provided detail kept on an error.
const MAX_ERROR_DETAIL: usize = 300;

/// REST client for the backend.
///
/// Cheap to share behind an `Arc`; spawned request tasks each hold one.
pub struct NetworkGateway {
    http: Arc<dyn HttpClient>,
    base_url: String,
    session: SessionStore,
}

impl NetworkGateway {
    pub fn new(http: Arc<dyn HttpClient>, base_url: impl Into<String>, session: SessionStore) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Bearer header for the current session.
    async fn auth_headers(&self) -> GastroResult<Headers> {
        let token = self
            .session
            .token()
            .await
            .ok_or(AuthError::NotAuthenticated)?;
        let mut headers = Headers::new();
        headers.insert("Authorization".to_string(), format!("Bearer {}", token));
        Ok(headers)
    }

    /// Turn a transport result into a success response or a classified error.
    fn check(result: Result<Response, HttpError>, url: &str) -> GastroResult<Response> {
        let response = result.map_err(|e| NetworkError::from_http(e, url))?;
        if response.is_success() {
            return Ok(response);
        }
        let message = error_detail(&response);
        tracing::warn!("{} answered HTTP {}: {}", url, response.status, message);
        Err(NetworkError::HttpStatus {
            status: response.status,
            message,
        }
        .into())
    }

    fn decode<T: DeserializeOwned>(response: &Response) -> GastroResult<T> {
        Ok(response.json::<T>()?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> GastroResult<T> {
        let url = self.url(path);
        let headers = self.auth_headers().await?;
        let response = Self::check(self.http.get(&url, &headers).await, &url)?;
        Self::decode(&response)
    }

    async fn post_json(&self, path: &str, body: &serde_json::Value) -> GastroResult<Response> {
        let url = self.url(path);
        let headers = self.auth_headers().await?;
        Self::check(self.http.post(&url, &body.to_string(), &headers).await, &url)
    }

    async fn put_json(&self, path: &str, body: &serde_json::Value) -> GastroResult<Response> {
        let url = self.url(path);
        let headers = self.auth_headers().await?;
        Self::check(self.http.put(&url, &body.to_string(), &headers).await, &url)
    }

    async fn post_empty(&self, path: &str) -> GastroResult<Response> {
        let url = self.url(path);
        let headers = self.auth_headers().await?;
        Self::check(self.http.post(&url, "", &headers).await, &url)
    }

    async fn delete(&self, path: &str) -> GastroResult<Response> {
        let url = self.url(path);
        let headers = self.auth_headers().await?;
        Self::check(self.http.delete(&url, &headers).await, &url)
    }

    /// Unauthenticated POST with a JSON body.
    async fn post_public(&self, path: &str, body: &serde_json::Value) -> GastroResult<Response> {
        let url = self.url(path);
        Self::check(self.http.post(&url, &body.to_string(), &Headers::new()).await, &url)
    }
}

/// Percent-encode one path segment.
fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Build `key=value&...` with every value percent-encoded.
fn query(pairs: &[(&str, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Human-readable detail from an error body.
///
/// The backend's error DTO carries a `message` field; otherwise the raw
/// text is used.
fn error_detail(response: &Response) -> String {
    if let Ok(value) = response.json::<serde_json::Value>() {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    let text = response.text().unwrap_or_default();
    let text = text.trim();
    match text.char_indices().nth(MAX_ERROR_DETAIL) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::adapters::{InMemoryTokenStore, MockHttpClient};

    pub const BASE: &str = "http://api.test/api";

    /// Gateway over a mock client, already signed in as `jwt-1`.
    pub async fn signed_in() -> (NetworkGateway, MockHttpClient) {
        let http = MockHttpClient::new();
        let session = SessionStore::new(Arc::new(InMemoryTokenStore::with_token("jwt-1")));
        session.restore().await.unwrap();
        (NetworkGateway::new(Arc::new(http.clone()), BASE, session), http)
    }

    /// Gateway over a mock client with no session.
    pub fn signed_out() -> (NetworkGateway, MockHttpClient) {
        let http = MockHttpClient::new();
        let session = SessionStore::new(Arc::new(InMemoryTokenStore::new()));
        (NetworkGateway::new(Arc::new(http.clone()), BASE, session), http)
    }

    pub fn url(path: &str) -> String {
        format!("{}{}", BASE, path)
    }
}
