//! Client-side persistence of the current token.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::StorageError;
use crate::tokens::Token;
use crate::traits::KeyValueStore;

/// Storage key of the persisted token.
pub const TOKEN_KEY: &str = "auth-token";

/// Holds at most one token in a [`KeyValueStore`].
///
/// Every operation is best-effort: storage failures are logged and degrade to
/// "no token" rather than reaching the caller.
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    backend: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Read the stored token. Errors and empty values read as `None`.
    pub async fn load(&self) -> Option<Token> {
        match self.backend.get_item(TOKEN_KEY).await {
            Ok(Some(value)) if !value.trim().is_empty() => {
                debug!("Loaded stored token");
                Some(Token::new(value))
            }
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "Failed to read stored token");
                None
            }
        }
    }

    /// Persist `token`, replacing any previous one.
    pub async fn save(&self, token: &Token) {
        match self.backend.set_item(TOKEN_KEY, token.as_str()).await {
            Ok(()) => debug!("Stored token"),
            Err(e) => warn!(error = %e, "Failed to store token"),
        }
    }

    /// Remove the stored token.
    pub async fn clear(&self) {
        match self.backend.remove_item(TOKEN_KEY).await {
            Ok(()) => debug!("Cleared stored token"),
            Err(e) => warn!(error = %e, "Failed to clear stored token"),
        }
    }
}

/// In-process [`KeyValueStore`].
///
/// Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.write().await.remove(key);
        Ok(())
    }
}
