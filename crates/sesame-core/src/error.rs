//! Error types for sesame.
//!
//! Each failure family is its own enum so callers can match on exactly the
//! cases an operation can produce. [`Error`] unifies them for the
//! [`AuthResult`](crate::AuthResult) boundary, where every failure is reduced
//! to a kind, a message and a stable code.

use thiserror::Error;

/// The unified error type for sesame operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Login rejected (unknown user, missing password).
    #[error(transparent)]
    Authentication(#[from] AuthenticationError),

    /// Token missing, malformed or expired.
    #[error(transparent)]
    Token(#[from] TokenError),

    /// A secured action was attempted without a valid token.
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),

    /// A resilient operation gave up.
    #[error(transparent)]
    Retry(#[from] RetryError),

    /// Client storage failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl Error {
    /// The error family, as reported in [`AuthResult`](crate::AuthResult) failures.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Authentication(_) => "authentication",
            Error::Token(_) => "token",
            Error::Authorization(_) => "authorization",
            Error::Retry(_) => "retry",
            Error::Storage(_) => "storage",
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Authentication(e) => e.code(),
            Error::Token(e) => e.code(),
            Error::Authorization(e) => e.code(),
            Error::Retry(e) => e.code(),
            Error::Storage(_) => "STORAGE_ERROR",
        }
    }
}

/// Login failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthenticationError {
    /// Only the demo account may log in.
    #[error("invalid username")]
    InvalidUsername,

    /// The password was empty after trimming.
    #[error("password is required")]
    PasswordRequired,
}

impl AuthenticationError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthenticationError::InvalidUsername => "INVALID_USERNAME",
            AuthenticationError::PasswordRequired => "PASSWORD_REQUIRED",
        }
    }
}

/// Failures produced while decoding a raw token string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Not base64, not JSON, or a required field is missing.
    #[error("malformed token: {reason}")]
    MalformedFormat { reason: String },

    /// The token's `expiresAt` lies in the past.
    #[error("token expired at {expires_at}")]
    Expired { expires_at: i64 },
}

/// Session validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// No token was supplied.
    #[error("no token provided")]
    Missing,

    /// The token could not be decoded.
    #[error("invalid token format")]
    InvalidFormat,

    /// The token is well-formed but past its expiry.
    #[error("token has expired")]
    Expired,
}

impl TokenError {
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::Missing => "TOKEN_MISSING",
            TokenError::InvalidFormat => "TOKEN_INVALID_FORMAT",
            TokenError::Expired => "TOKEN_EXPIRED",
        }
    }
}

impl From<DecodeError> for TokenError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::MalformedFormat { .. } => TokenError::InvalidFormat,
            DecodeError::Expired { .. } => TokenError::Expired,
        }
    }
}

/// A secured action was refused because its token did not validate.
///
/// The message and code of the underlying [`TokenError`] are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(transparent)]
pub struct AuthorizationError(#[from] pub TokenError);

impl AuthorizationError {
    /// The token failure that caused the refusal.
    pub fn token_error(&self) -> &TokenError {
        &self.0
    }

    pub fn code(&self) -> &'static str {
        self.0.code()
    }
}

/// Terminal failures of a resilient operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RetryError {
    /// Every permitted attempt failed.
    #[error("failed after {attempts} attempts: {last_error}")]
    Exhausted { attempts: u32, last_error: String },

    /// The overall deadline passed before any attempt succeeded.
    #[error("timed out after {timeout_ms}ms ({attempts} attempts started)")]
    TimedOut { timeout_ms: u64, attempts: u32 },
}

impl RetryError {
    pub fn code(&self) -> &'static str {
        match self {
            RetryError::Exhausted { .. } => "RETRIES_EXHAUSTED",
            RetryError::TimedOut { .. } => "RETRY_TIMEOUT",
        }
    }

    /// Number of attempts started before giving up.
    pub fn attempts(&self) -> u32 {
        match self {
            RetryError::Exhausted { attempts, .. } | RetryError::TimedOut { attempts, .. } => {
                *attempts
            }
        }
    }
}

/// Client storage failures.
///
/// These are absorbed by [`SessionStore`](crate::SessionStore) and only
/// surface from raw [`KeyValueStore`](crate::traits::KeyValueStore) calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Underlying I/O failed (permissions, missing directory, disk full).
    #[error("storage I/O error: {message}")]
    Io { message: String },

    /// Stored data could not be parsed.
    #[error("corrupt storage data: {message}")]
    Corrupt { message: String },
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io {
            message: err.to_string(),
        }
    }
}
