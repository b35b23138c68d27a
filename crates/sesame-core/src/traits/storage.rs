//! Client durable storage trait.

use async_trait::async_trait;

use crate::error::StorageError;

/// A string key-value store with `getItem`/`setItem`/`removeItem` semantics.
///
/// Implementations report failures honestly; it is the
/// [`SessionStore`](crate::SessionStore) that decides to absorb them.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is not an error.
    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
