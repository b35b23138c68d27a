//! Token types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An issued session token.
///
/// The string is opaque to callers and is NOT a stable public format.
/// It is also not signed: anyone can mint one. See [`TokenCodec`](crate::TokenCodec).
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; decode only through the codec
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Wrap a raw token string, e.g. one read back from storage.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token value for persistence or transport.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Hide token value in Debug output
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Token").field(&"[REDACTED]").finish()
    }
}

/// The identity and lifetime carried inside a [`Token`].
///
/// Timestamps are Unix epoch seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPayload {
    pub user_id: String,
    #[serde(default)]
    pub issued_at: i64,
    pub expires_at: i64,
}
