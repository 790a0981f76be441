//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (GET, POST, PUT, DELETE, multipart)
//! - [`TokenStore`] - Session token persistence

pub mod http;
pub mod token_store;

pub use http::{FormPart, Headers, HttpClient, HttpError, Method, MultipartForm, Response};
pub use token_store::{TokenStore, TokenStoreError};
