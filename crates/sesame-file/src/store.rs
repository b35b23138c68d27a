//! Filesystem key-value storage for client state.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fs2::FileExt;
use tracing::{debug, instrument, warn};

use sesame_core::StorageError;
use sesame_core::traits::KeyValueStore;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

const DATA_FILE: &str = "storage.json";
const LOCK_FILE: &str = "storage.lock";

type Items = BTreeMap<String, String>;

/// A [`KeyValueStore`] kept as one JSON object in a directory.
///
/// Every operation takes an exclusive lock on a sibling lock file, so separate
/// processes sharing a directory do not interleave partial writes. Writes go to
/// a temporary file that is renamed over the data file.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the data file path.
    pub fn data_path(&self) -> PathBuf {
        self.root.join(DATA_FILE)
    }

    fn lock_path(&self) -> PathBuf {
        self.root.join(LOCK_FILE)
    }

    fn lock(&self) -> Result<File, StorageError> {
        fs::create_dir_all(&self.root)?;

        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())?;

        lock_file.lock_exclusive()?;
        Ok(lock_file)
    }

    fn read_items(&self) -> Result<Items, StorageError> {
        let path = self.data_path();

        if !path.exists() {
            return Ok(Items::new());
        }

        let content = fs::read(&path)?;
        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(Items::new());
        }

        serde_json::from_slice(&content).map_err(|e| StorageError::Corrupt {
            message: format!("{}: {}", path.display(), e),
        })
    }

    /// Read for a write. A corrupt file is replaced rather than blocking writes.
    fn read_items_for_update(&self) -> Result<Items, StorageError> {
        match self.read_items() {
            Err(StorageError::Corrupt { message }) => {
                warn!(%message, "Discarding corrupt storage file");
                Ok(Items::new())
            }
            other => other,
        }
    }

    fn write_items(&self, items: &Items) -> Result<(), StorageError> {
        let path = self.data_path();
        let tmp_path = self.root.join(format!("{}.tmp", DATA_FILE));

        let json = serde_json::to_string_pretty(items).map_err(|e| StorageError::Io {
            message: e.to_string(),
        })?;

        let mut file = File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_data()?;

        // Set restrictive permissions (Unix only)
        #[cfg(unix)]
        {
            let mut perms = fs::metadata(&tmp_path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&tmp_path, perms)?;
        }

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    fn update<F>(&self, f: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut Items),
    {
        let lock_file = self.lock()?;

        let mut items = self.read_items_for_update()?;
        f(&mut items);
        let result = self.write_items(&items);

        lock_file.unlock()?;
        result
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    #[instrument(skip(self))]
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let lock_file = self.lock()?;
        let items = self.read_items();
        lock_file.unlock()?;

        let value = items?.get(key).cloned();
        debug!(found = value.is_some(), "Read item");
        Ok(value)
    }

    #[instrument(skip(self, value))]
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|items| {
            items.insert(key.to_string(), value.to_string());
        })?;
        debug!("Wrote item");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        if !self.data_path().exists() {
            return Ok(());
        }

        self.update(|items| {
            items.remove(key);
        })?;
        debug!("Removed item");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sesame_core::{SessionStore, Token};
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, FileStore) {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().join("client"));
        (tmp, store)
    }

    #[tokio::test]
    async fn test_get_missing_item() {
        let (_tmp, store) = create_test_store();
        assert_eq!(store.get_item("auth-token").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_get_remove() {
        let (_tmp, store) = create_test_store();

        store.set_item("auth-token", "abc").await.unwrap();
        assert_eq!(
            store.get_item("auth-token").await.unwrap().as_deref(),
            Some("abc")
        );

        store.remove_item("auth-token").await.unwrap();
        assert_eq!(store.get_item("auth-token").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let (_tmp, store) = create_test_store();

        store.set_item("a", "1").await.unwrap();
        store.set_item("b", "2").await.unwrap();
        store.remove_item("a").await.unwrap();

        assert_eq!(store.get_item("a").await.unwrap(), None);
        assert_eq!(store.get_item("b").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_remove_without_file_is_ok() {
        let (_tmp, store) = create_test_store();
        store.remove_item("auth-token").await.unwrap();
        assert!(!store.data_path().exists());
    }

    #[tokio::test]
    async fn test_values_persist_across_instances() {
        let (tmp, store) = create_test_store();
        store.set_item("auth-token", "abc").await.unwrap();

        let reopened = FileStore::new(tmp.path().join("client"));
        assert_eq!(
            reopened.get_item("auth-token").await.unwrap().as_deref(),
            Some("abc")
        );
    }

    #[tokio::test]
    async fn test_corrupt_file_reports_and_recovers() {
        let (_tmp, store) = create_test_store();
        fs::create_dir_all(store.root()).unwrap();
        fs::write(store.data_path(), "{not json").unwrap();

        assert!(matches!(
            store.get_item("auth-token").await,
            Err(StorageError::Corrupt { .. })
        ));

        store.set_item("auth-token", "fresh").await.unwrap();
        assert_eq!(
            store.get_item("auth-token").await.unwrap().as_deref(),
            Some("fresh")
        );
    }

    #[tokio::test]
    async fn test_session_store_absorbs_corruption() {
        let (_tmp, store) = create_test_store();
        fs::create_dir_all(store.root()).unwrap();
        fs::write(store.data_path(), [0xff, 0xfe, 0x00]).unwrap();

        let sessions = SessionStore::new(store);
        assert_eq!(sessions.load().await, None);

        sessions.save(&Token::new("abc")).await;
        assert_eq!(sessions.load().await, Some(Token::new("abc")));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_data_file_is_private() {
        let (_tmp, store) = create_test_store();
        store.set_item("auth-token", "abc").await.unwrap();

        let mode = fs::metadata(store.data_path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
