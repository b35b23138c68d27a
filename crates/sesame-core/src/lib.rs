//! sesame-core - tokens, sessions and retries for the sesame auth demo.
//!
//! The pieces, leaf to root:
//!
//! - [`TokenCodec`]: issues and decodes unsigned base64(JSON) tokens
//! - [`SessionValidator`]: turns a token into a [`Session`] or a [`TokenError`]
//! - [`AuthService`]: login, secured actions, a public greeting and the
//!   resilient demo action
//! - [`resilient`](resilient::resilient): bounded retry under one deadline
//! - [`SessionStore`]: best-effort persistence of the single current token
//! - [`SessionManager`]: the `Unauthenticated`/`Authenticated` state machine
//!
//! Time and storage are injected through [`traits::Clock`] and
//! [`traits::KeyValueStore`].
//!
//! # Example
//!
//! ```
//! use sesame_core::{
//!     AuthService, Credentials, MemoryStore, ServiceConfig, SessionManager, SessionStore,
//! };
//! use sesame_core::traits::SystemClock;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let service = AuthService::new(SystemClock, ServiceConfig::instant());
//! let mut manager = SessionManager::new(service, SessionStore::new(MemoryStore::new()));
//!
//! assert!(!manager.startup().await.is_authenticated());
//! manager.login(&Credentials::new("admin", "anypass")).await.unwrap();
//! assert!(manager.state().is_authenticated());
//!
//! manager.logout().await;
//! assert!(!manager.state().is_authenticated());
//! # }
//! ```

pub mod codec;
pub mod config;
pub mod credentials;
pub mod envelope;
pub mod error;
pub mod manager;
pub mod resilient;
pub mod service;
pub mod session;
pub mod store;
pub mod tokens;
pub mod traits;
pub mod validator;

pub use codec::TokenCodec;
pub use config::ServiceConfig;
pub use credentials::Credentials;
pub use envelope::AuthResult;
pub use error::{
    AuthenticationError, AuthorizationError, DecodeError, Error, RetryError, StorageError,
    TokenError,
};
pub use manager::SessionManager;
pub use resilient::{RetryPolicy, resilient};
pub use service::{ActionResult, AuthService, GreetingResult, ResilientOutcome};
pub use session::{Session, SessionState};
pub use store::{MemoryStore, SessionStore};
pub use tokens::{Token, TokenPayload};
pub use validator::SessionValidator;
