//! sesame-file - Filesystem-backed client storage for sesame.
//!
//! [`FileStore`] implements [`sesame_core::traits::KeyValueStore`] so a
//! [`sesame_core::SessionStore`] can keep its token across process restarts.

mod store;

pub use store::FileStore;
