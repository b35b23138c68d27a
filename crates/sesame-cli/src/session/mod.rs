//! Client session wiring for CLI use.

pub mod storage;

use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;

use sesame_core::traits::SystemClock;
use sesame_core::{AuthService, ServiceConfig, SessionManager, SessionStore};
use sesame_file::FileStore;

/// The session manager every command works through.
pub type CliManager = SessionManager<SystemClock, FileStore>;

/// Global options shared by all commands.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub data_dir: Option<PathBuf>,
    pub no_latency: bool,
    pub json: bool,
}

impl ClientOptions {
    pub fn service_config(&self) -> ServiceConfig {
        if self.no_latency {
            ServiceConfig::instant()
        } else {
            ServiceConfig::default()
        }
    }

    pub fn service(&self, config: ServiceConfig) -> AuthService<SystemClock> {
        AuthService::new(SystemClock, config)
    }

    /// Build a session manager over the on-disk store and rehydrate it.
    pub async fn open(&self) -> Result<CliManager> {
        let dir = storage::data_dir(self.data_dir.as_deref())?;
        debug!(dir = %dir.display(), "Opening session store");
        let store = SessionStore::new(FileStore::new(dir));
        let mut manager = SessionManager::new(self.service(self.service_config()), store);
        manager.startup().await;
        Ok(manager)
    }
}
