//! Mock HTTP client for testing.
//!
//! Provides a configurable mock HTTP client that returns predefined
//! responses or errors and records every request it sees.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::traits::{Headers, HttpClient, HttpError, Method, MultipartForm, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method (GET, POST, PUT, DELETE)
    pub method: String,
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// String body, if any
    pub body: Option<String>,
    /// Multipart body, if any
    pub form: Option<MultipartForm>,
}

impl RecordedRequest {
    /// Parse the string body as JSON.
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body
            .as_deref()
            .and_then(|b| serde_json::from_str(b).ok())
    }

    /// `true` when the request targets `path` (ignoring the query string).
    pub fn targets(&self, path: &str) -> bool {
        let without_query = self.url.split('?').next().unwrap_or(&self.url);
        without_query.ends_with(path)
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a response (any status)
    Success(Response),
    /// Return a transport error
    Error(HttpError),
    /// Wait, then resolve to the inner response
    Delayed(Duration, Box<MockResponse>),
}

impl MockResponse {
    /// 200 with a JSON body.
    pub fn json(value: serde_json::Value) -> Self {
        MockResponse::Success(Response::json_ok(&value))
    }

    /// Response with the given status and a plain text body.
    pub fn text(status: u16, body: &str) -> Self {
        MockResponse::Success(Response::new(status, bytes::Bytes::from(body.to_string())))
    }

    /// Empty-bodied response with the given status.
    pub fn status(status: u16) -> Self {
        MockResponse::Success(Response::new(status, bytes::Bytes::new()))
    }

    /// Delay this response.
    pub fn after(self, delay: Duration) -> Self {
        MockResponse::Delayed(delay, Box::new(self))
    }
}

/// Mock HTTP client for testing.
///
/// Responses are keyed by method and URL. Lookup order: queued one-shot
/// responses for the exact key, fixed response for the exact key, then the
/// longest configured URL prefix for that method, then the default.
///
/// # Example
///
/// ```ignore
/// use gastrolog::adapters::mock::{MockHttpClient, MockResponse};
///
/// let client = MockHttpClient::new();
/// client.set_response("GET", "http://api/perfil/me", MockResponse::json(profile_json));
/// // ... drive the code under test ...
/// assert_eq!(client.get_requests().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    /// Fixed responses by (method, URL pattern)
    responses: Arc<Mutex<HashMap<(String, String), MockResponse>>>,
    /// One-shot responses consumed in order, by (method, URL pattern)
    queued: Arc<Mutex<HashMap<(String, String), VecDeque<MockResponse>>>>,
    /// Default response when no specific match
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a fixed response for `method` on `url` (exact or prefix).
    pub fn set_response(&self, method: &str, url: &str, response: MockResponse) {
        self.responses
            .lock()
            .unwrap()
            .insert((method.to_string(), url.to_string()), response);
    }

    /// Queue a one-shot response; queued responses win over fixed ones.
    pub fn queue_response(&self, method: &str, url: &str, response: MockResponse) {
        self.queued
            .lock()
            .unwrap()
            .entry((method.to_string(), url.to_string()))
            .or_default()
            .push_back(response);
    }

    /// Set a default response for requests without a specific match.
    pub fn set_default_response(&self, response: MockResponse) {
        *self.default_response.lock().unwrap() = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Recorded requests with the given method whose path ends with `path`.
    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.get_requests()
            .into_iter()
            .filter(|r| r.method == method && r.targets(path))
            .collect()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    fn record_request(
        &self,
        method: &str,
        url: &str,
        headers: &Headers,
        body: Option<String>,
        form: Option<MultipartForm>,
    ) {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body,
            form,
        });
    }

    fn get_response(&self, method: &str, url: &str) -> Option<MockResponse> {
        {
            let mut queued = self.queued.lock().unwrap();
            let mut best: Option<(String, usize)> = None;
            for ((m, pattern), queue) in queued.iter() {
                if m == method && url.starts_with(pattern.as_str()) && !queue.is_empty() {
                    let len = pattern.len();
                    if best.as_ref().map_or(true, |(_, l)| len > *l) {
                        best = Some((pattern.clone(), len));
                    }
                }
            }
            if let Some((pattern, _)) = best {
                if let Some(queue) = queued.get_mut(&(method.to_string(), pattern)) {
                    if let Some(response) = queue.pop_front() {
                        return Some(response);
                    }
                }
            }
        }

        let responses = self.responses.lock().unwrap();
        if let Some(response) = responses.get(&(method.to_string(), url.to_string())) {
            return Some(response.clone());
        }

        let prefix_match = responses
            .iter()
            .filter(|((m, pattern), _)| m == method && url.starts_with(pattern.as_str()))
            .max_by_key(|((_, pattern), _)| pattern.len())
            .map(|(_, response)| response.clone());
        if prefix_match.is_some() {
            return prefix_match;
        }

        self.default_response.lock().unwrap().clone()
    }

    async fn resolve(&self, method: &str, url: &str) -> Result<Response, HttpError> {
        let mut next = self.get_response(method, url);
        loop {
            match next {
                Some(MockResponse::Success(response)) => return Ok(response),
                Some(MockResponse::Error(err)) => return Err(err),
                Some(MockResponse::Delayed(delay, inner)) => {
                    tokio::time::sleep(delay).await;
                    next = Some(*inner);
                }
                None => {
                    return Err(HttpError::Other(format!(
                        "No mock response for {} {}",
                        method, url
                    )))
                }
            }
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("GET", url, headers, None, None);
        self.resolve("GET", url).await
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("POST", url, headers, Some(body.to_string()), None);
        self.resolve("POST", url).await
    }

    async fn put(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("PUT", url, headers, Some(body.to_string()), None);
        self.resolve("PUT", url).await
    }

    async fn delete(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("DELETE", url, headers, None, None);
        self.resolve("DELETE", url).await
    }

    async fn send_multipart(
        &self,
        method: Method,
        url: &str,
        form: MultipartForm,
        headers: &Headers,
    ) -> Result<Response, HttpError> {
        self.record_request(method.as_str(), url, headers, None, Some(form));
        self.resolve(method.as_str(), url).await
    }
}
