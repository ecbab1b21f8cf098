use registrar_cache::{CacheError, TokenStore};
use registrar_config::SessionConfig;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::role::Role;

/// The payload stored under a session key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub user_id: Uuid,
    pub role: Role,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Absent, expired or empty key.
    #[error("session not found")]
    NotFound,

    #[error("session store error: {0}")]
    Store(#[from] CacheError),

    #[error("malformed session payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Mints and resolves opaque session keys.
///
/// Cloning is cheap; all clones share the same store handle.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn TokenStore>,
    config: SessionConfig,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    pub fn new(store: Arc<dyn TokenStore>, config: SessionConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Name of the request header carrying the session key.
    pub fn header_name(&self) -> &str {
        &self.config.header_name
    }

    /// Writes a new session for the principal and returns its key.
    ///
    /// Every call mints a fresh key; earlier keys for the same principal stay
    /// valid until their own expiry.
    #[instrument(skip(self), fields(session.role = %role))]
    pub async fn store(&self, user_id: Uuid, role: Role) -> Result<String, SessionError> {
        let key = self.config.key_for(&Uuid::new_v4().to_string());
        let payload = serde_json::to_string(&SessionData { user_id, role })?;

        self.store
            .set_with_expiry(&key, &payload, Duration::from_secs(self.config.ttl_seconds))
            .await?;

        debug!(%user_id, "Session stored");
        Ok(key)
    }

    #[instrument(skip(self, key))]
    pub async fn resolve(&self, key: &str) -> Result<SessionData, SessionError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(SessionError::NotFound);
        }

        let payload = self.store.get(key).await?.ok_or(SessionError::NotFound)?;
        Ok(serde_json::from_str(&payload)?)
    }

    /// Deletes the session. Unknown keys are not an error.
    #[instrument(skip(self, key))]
    pub async fn revoke(&self, key: &str) -> Result<(), SessionError> {
        let key = key.trim();
        if key.is_empty() {
            return Ok(());
        }

        self.store.delete(key).await?;
        debug!("Session revoked");
        Ok(())
    }
}
