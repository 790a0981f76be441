//! Common test utilities for integration tests.
//!
//! Builds an [`App`] over the mock transport and token store, and keeps
//! handles to both so tests can script responses and inspect what was
//! sent or persisted.
//!
//! # Example
//!
//! ```ignore
//! let h = Harness::signed_out();
//! h.http.set_response("POST", &url("/auth/login"), MockResponse::text(200, "jwt"));
//! ```

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};

use gastrolog::adapters::{InMemoryTokenStore, MockHttpClient, MockResponse};
use gastrolog::app::App;
use gastrolog::gateway::NetworkGateway;
use gastrolog::session::SessionStore;
use gastrolog::startup::AppConfig;

pub const BASE: &str = "http://api.test/api";

pub fn url(path: &str) -> String {
    format!("{}{}", BASE, path)
}

/// An app plus the mocks behind it.
pub struct Harness {
    pub app: App,
    pub http: MockHttpClient,
    pub tokens: InMemoryTokenStore,
}

impl Harness {
    fn build(tokens: InMemoryTokenStore) -> Self {
        let http = MockHttpClient::new();
        let session = SessionStore::new(Arc::new(tokens.clone()));
        let gateway = NetworkGateway::new(Arc::new(http.clone()), BASE, session);
        let config = AppConfig::default().with_search_debounce(Duration::from_millis(300));
        Self {
            app: App::new(Arc::new(gateway), &config),
            http,
            tokens,
        }
    }

    /// Fresh start: no saved token, welcome view.
    pub fn signed_out() -> Self {
        Self::build(InMemoryTokenStore::new())
    }

    /// A token from an earlier run is on disk.
    pub fn with_saved_token(token: &str) -> Self {
        Self::build(InMemoryTokenStore::with_token(token))
    }

    /// Signed in as `username` through the real login flow.
    pub async fn signed_in(username: &str) -> Self {
        let mut h = Self::signed_out();
        h.http.set_response("POST", &url("/auth/login"), MockResponse::text(200, "jwt-1"));
        h.http.set_response(
            "GET",
            &url("/perfil/me"),
            MockResponse::json(profile_json(username)),
        );
        h.app.dispatch(gastrolog::app::Action::Login(gastrolog::state::LoginForm {
            email: format!("{}@example.com", username),
            password: "secret".to_string(),
        }));
        h.app.settle().await;
        assert!(h.app.is_signed_in(), "login should succeed: {:?}", h.app.error);
        h.http.clear_requests();
        h
    }
}

pub fn profile_json(username: &str) -> Value {
    json!({
        "nombreUsuario": username,
        "email": format!("{}@example.com", username),
        "seguidosCount": 1,
        "seguidoresCount": 2,
        "solicitudesPendientesCount": 0,
        "valoraciones": []
    })
}

/// One page of a paginated listing.
pub fn page_json(content: Value, number: u32, total_pages: u32) -> Value {
    let len = content.as_array().map(|a| a.len()).unwrap_or(0);
    json!({
        "content": content,
        "number": number,
        "size": 10,
        "totalPages": total_pages,
        "totalElements": len,
        "first": number == 0,
        "last": number + 1 >= total_pages
    })
}
