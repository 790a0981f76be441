//! File-based token store adapter.
//!
//! Stores the bearer token as a small JSON document, by default in
//! `~/.gastrolog/token.json`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::traits::{TokenStore, TokenStoreError};

/// The token directory name.
const TOKEN_DIR: &str = ".gastrolog";

/// The token file name.
const TOKEN_FILE: &str = "token.json";

/// On-disk layout. One key, mirroring the single storage slot the
/// service's web client used.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredToken {
    token: Option<String>,
}

/// File-based token store.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store under the user's home directory.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        let home = dirs::home_dir()?;
        Some(Self {
            path: home.join(TOKEN_DIR).join(TOKEN_FILE),
        })
    }

    /// Store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the path to the token file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<String>, TokenStoreError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(TokenStoreError::LoadFailed(e.to_string())),
        };

        // A corrupt file is treated as "logged out" rather than a hard error.
        match serde_json::from_slice::<StoredToken>(&raw) {
            Ok(stored) => Ok(stored.token.filter(|t| !t.is_empty())),
            Err(e) => {
                tracing::warn!("Ignoring unreadable token file {}: {}", self.path.display(), e);
                Ok(None)
            }
        }
    }

    async fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| TokenStoreError::Io(e.to_string()))?;
        }

        let stored = StoredToken {
            token: Some(token.to_string()),
        };
        let json = serde_json::to_vec_pretty(&stored)
            .map_err(|e| TokenStoreError::SaveFailed(e.to_string()))?;

        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| TokenStoreError::SaveFailed(e.to_string()))
    }

    async fn clear(&self) -> Result<(), TokenStoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TokenStoreError::ClearFailed(e.to_string())),
        }
    }
}
