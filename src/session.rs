//! Session token lifecycle.
//!
//! The backend session is one bearer token. [`SessionStore`] caches it in
//! memory for the gateway and mirrors every change into a [`TokenStore`].
//! A session begins at login and ends at logout or account deletion.

use std::sync::{Arc, RwLock, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::error::{ErrorContext, GastroResult, ResultExt};
use crate::traits::TokenStore;

#[derive(Debug, Clone)]
struct Session {
    token: String,
    started_at: DateTime<Utc>,
}

/// Shared handle to the current session.
///
/// Clones share state. The in-memory token sits behind a plain lock that is
/// never held across an await, so ending a session can drop it
/// synchronously. Writes to the [`TokenStore`] are serialized by `persist`.
#[derive(Clone)]
pub struct SessionStore {
    current: Arc<RwLock<Option<Session>>>,
    persist: Arc<Mutex<()>>,
    store: Arc<dyn TokenStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
            persist: Arc::new(Mutex::new(())),
            store,
        }
    }

    fn current(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn current_mut(&self) -> RwLockWriteGuard<'_, Option<Session>> {
        self.current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Load a previously persisted token into memory.
    ///
    /// Returns whether a token was found.
    pub async fn restore(&self) -> GastroResult<bool> {
        let _persist = self.persist.lock().await;
        let token = self
            .store
            .load()
            .await
            .context(ErrorContext::new("restore_session").with_component("session"))?;

        let found = token.is_some();
        *self.current_mut() = token.map(|token| Session {
            token,
            started_at: Utc::now(),
        });
        if found {
            tracing::debug!("Restored persisted session token");
        }
        Ok(found)
    }

    /// Start a session with `token`, persisting it first.
    pub async fn begin(&self, token: &str) -> GastroResult<()> {
        let _persist = self.persist.lock().await;
        self.store
            .save(token)
            .await
            .context(ErrorContext::new("begin_session").with_component("session"))?;

        *self.current_mut() = Some(Session {
            token: token.to_string(),
            started_at: Utc::now(),
        });
        tracing::info!("Session started");
        Ok(())
    }

    /// Drop the in-memory token. Requests built after this call carry no
    /// bearer header.
    pub fn forget(&self) {
        let previous = self.current_mut().take();
        if let Some(session) = previous {
            let lasted = Utc::now() - session.started_at;
            tracing::info!("Session ended after {}s", lasted.num_seconds());
        }
    }

    /// Remove the persisted token, unless a new session has begun since
    /// [`forget`](Self::forget); that session's token must survive.
    pub async fn clear_persisted(&self) -> GastroResult<()> {
        let _persist = self.persist.lock().await;
        if self.current().is_some() {
            tracing::debug!("A new session began; keeping the saved token");
            return Ok(());
        }
        self.store
            .clear()
            .await
            .context(ErrorContext::new("end_session").with_component("session"))
    }

    /// Current bearer token, if any.
    pub async fn token(&self) -> Option<String> {
        self.current().map(|s| s.token)
    }

    pub async fn is_active(&self) -> bool {
        self.current().is_some()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryTokenStore;
    use crate::error::ErrorCategory;

    fn session_with(store: &InMemoryTokenStore) -> SessionStore {
        SessionStore::new(Arc::new(store.clone()))
    }

    #[tokio::test]
    async fn test_begin_persists_and_caches() {
        let store = InMemoryTokenStore::new();
        let session = session_with(&store);

        assert!(!session.is_active().await);
        session.begin("jwt-1").await.unwrap();

        assert_eq!(session.token().await.as_deref(), Some("jwt-1"));
        assert_eq!(store.get_token().as_deref(), Some("jwt-1"));
    }

    #[tokio::test]
    async fn test_begin_fails_without_caching_when_save_fails() {
        let store = InMemoryTokenStore::new();
        store.set_save_should_fail(true);
        let session = session_with(&store);

        let err = session.begin("jwt-1").await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Storage);
        assert!(!session.is_active().await);
    }

    #[tokio::test]
    async fn test_forget_then_clear() {
        let store = InMemoryTokenStore::with_token("jwt-1");
        let session = session_with(&store);
        assert!(session.restore().await.unwrap());

        session.forget();
        assert_eq!(session.token().await, None);
        assert_eq!(store.get_token().as_deref(), Some("jwt-1"));

        session.clear_persisted().await.unwrap();
        assert_eq!(store.get_token(), None);
    }

    #[tokio::test]
    async fn test_failed_clear_keeps_memory_dropped() {
        let store = InMemoryTokenStore::with_token("jwt-1");
        store.set_clear_should_fail(true);
        let session = session_with(&store);
        session.restore().await.unwrap();

        session.forget();
        assert!(session.clear_persisted().await.is_err());
        assert!(!session.is_active().await);
    }

    #[tokio::test]
    async fn test_late_clear_spares_a_newer_session() {
        let store = InMemoryTokenStore::with_token("jwt-1");
        let session = session_with(&store);
        session.restore().await.unwrap();

        session.forget();
        session.begin("jwt-2").await.unwrap();
        session.clear_persisted().await.unwrap();

        assert_eq!(session.token().await.as_deref(), Some("jwt-2"));
        assert_eq!(store.get_token().as_deref(), Some("jwt-2"));
    }

    #[tokio::test]
    async fn test_restore_empty_store() {
        let session = session_with(&InMemoryTokenStore::new());
        assert!(!session.restore().await.unwrap());
        assert!(!session.is_active().await);
    }
}
