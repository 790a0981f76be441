//! Startup wiring.
//!
//! - [`config`] - runtime configuration read from the environment
//! - [`params`] - the startup URL (password-reset links)
//!
//! [`build_gateway`] assembles the production gateway from a config:
//! reqwest transport plus the file token store.

pub mod config;
pub mod params;

use std::sync::Arc;

pub use config::AppConfig;
pub use params::StartupParams;

use crate::adapters::{FileTokenStore, ReqwestHttpClient};
use crate::error::{GastroError, GastroResult, NetworkError};
use crate::gateway::NetworkGateway;
use crate::session::SessionStore;

/// Production gateway for `config`.
pub fn build_gateway(config: &AppConfig) -> GastroResult<NetworkGateway> {
    let http = ReqwestHttpClient::with_timeout(config.request_timeout)
        .map_err(|e| NetworkError::from_http(e, &config.api_base_url))?;

    let store = match &config.token_path {
        Some(path) => FileTokenStore::at(path),
        None => FileTokenStore::new()
            .ok_or_else(|| GastroError::client("cannot locate the home directory for the token file"))?,
    };
    tracing::debug!("Token file: {}", store.path().display());

    let session = SessionStore::new(Arc::new(store));
    Ok(NetworkGateway::new(
        Arc::new(http),
        config.api_base_url.clone(),
        session,
    ))
}
