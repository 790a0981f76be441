//! Token store trait abstraction.
//!
//! The backend session is a single opaque bearer token. Persisting it is the
//! only on-device storage the client performs, so the seam is a tiny
//! key-value contract: load, save, clear.

use async_trait::async_trait;

/// Token store operation errors.
#[derive(Debug, Clone)]
pub enum TokenStoreError {
    /// Failed to load the token
    LoadFailed(String),
    /// Failed to save the token
    SaveFailed(String),
    /// Failed to clear the token
    ClearFailed(String),
    /// IO error
    Io(String),
}

impl std::fmt::Display for TokenStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenStoreError::LoadFailed(msg) => write!(f, "Failed to load token: {}", msg),
            TokenStoreError::SaveFailed(msg) => write!(f, "Failed to save token: {}", msg),
            TokenStoreError::ClearFailed(msg) => write!(f, "Failed to clear token: {}", msg),
            TokenStoreError::Io(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for TokenStoreError {}

/// Trait for persisting the session token.
///
/// Implementations include the file-backed store used by the binary and an
/// in-memory store for tests.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Load the stored token, `Ok(None)` when nothing is stored.
    async fn load(&self) -> Result<Option<String>, TokenStoreError>;

    /// Store `token`, replacing any previous value.
    async fn save(&self, token: &str) -> Result<(), TokenStoreError>;

    /// Remove the stored token. Clearing an empty store succeeds.
    async fn clear(&self) -> Result<(), TokenStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_store_error_display() {
        assert_eq!(
            TokenStoreError::LoadFailed("read error".to_string()).to_string(),
            "Failed to load token: read error"
        );
        assert_eq!(
            TokenStoreError::SaveFailed("disk full".to_string()).to_string(),
            "Failed to save token: disk full"
        );
        assert_eq!(
            TokenStoreError::ClearFailed("permission denied".to_string()).to_string(),
            "Failed to clear token: permission denied"
        );
        assert_eq!(
            TokenStoreError::Io("broken pipe".to_string()).to_string(),
            "IO error: broken pipe"
        );
    }

    #[test]
    fn test_token_store_error_implements_error_trait() {
        let err = TokenStoreError::Io("x".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
