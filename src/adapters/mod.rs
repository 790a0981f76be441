//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`FileTokenStore`] - File-based token storage
//!
//! The [`mock`] submodule provides test doubles for both.

pub mod file_token_store;
pub mod mock;
pub mod reqwest_http;

pub use file_token_store::FileTokenStore;
pub use mock::{InMemoryTokenStore, MockHttpClient, MockResponse};
pub use reqwest_http::ReqwestHttpClient;
