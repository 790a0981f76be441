//! In-memory token store for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::traits::{TokenStore, TokenStoreError};

/// In-memory token store.
///
/// Clones share state, so a test can keep a handle and inspect what the
/// session persisted.
///
/// # Example
///
/// ```ignore
/// use gastrolog::adapters::mock::InMemoryTokenStore;
/// use gastrolog::traits::TokenStore;
///
/// let store = InMemoryTokenStore::new();
/// store.save("tok").await?;
/// assert_eq!(store.get_token(), Some("tok".to_string()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryTokenStore {
    token: Arc<Mutex<Option<String>>>,
    save_should_fail: Arc<Mutex<bool>>,
    clear_should_fail: Arc<Mutex<bool>>,
}

impl InMemoryTokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `token`.
    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.set_token(Some(token.to_string()));
        store
    }

    /// Configure whether save should fail.
    pub fn set_save_should_fail(&self, should_fail: bool) {
        *self.save_should_fail.lock().unwrap() = should_fail;
    }

    /// Configure whether clear should fail.
    pub fn set_clear_should_fail(&self, should_fail: bool) {
        *self.clear_should_fail.lock().unwrap() = should_fail;
    }

    /// Get the current token synchronously (for testing).
    pub fn get_token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    /// Set the token synchronously (for testing).
    pub fn set_token(&self, token: Option<String>) {
        *self.token.lock().unwrap() = token;
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn load(&self) -> Result<Option<String>, TokenStoreError> {
        Ok(self.token.lock().unwrap().clone())
    }

    async fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        if *self.save_should_fail.lock().unwrap() {
            return Err(TokenStoreError::SaveFailed("Mock save failure".to_string()));
        }
        *self.token.lock().unwrap() = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), TokenStoreError> {
        if *self.clear_should_fail.lock().unwrap() {
            return Err(TokenStoreError::ClearFailed("Mock clear failure".to_string()));
        }
        *self.token.lock().unwrap() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_load_clear() {
        let store = InMemoryTokenStore::new();
        assert_eq!(store.load().await.unwrap(), None);

        store.save("tok").await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some("tok".to_string()));

        store.clear().await.unwrap();
        assert_eq!(store.get_token(), None);
    }

    #[tokio::test]
    async fn test_configured_failures() {
        let store = InMemoryTokenStore::with_token("tok");
        store.set_save_should_fail(true);
        store.set_clear_should_fail(true);

        assert!(store.save("other").await.is_err());
        assert!(store.clear().await.is_err());
        assert_eq!(store.get_token(), Some("tok".to_string()));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = InMemoryTokenStore::new();
        let cloned = store.clone();
        cloned.save("shared").await.unwrap();
        assert_eq!(store.get_token(), Some("shared".to_string()));
    }
}
