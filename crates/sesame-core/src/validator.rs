//! Token-to-session validation.

use tracing::{debug, instrument};

use crate::codec::TokenCodec;
use crate::error::TokenError;
use crate::session::Session;
use crate::traits::Clock;

/// Turns raw token strings into [`Session`]s.
#[derive(Debug, Clone)]
pub struct SessionValidator<C> {
    codec: TokenCodec<C>,
}

impl<C: Clock> SessionValidator<C> {
    pub fn new(codec: TokenCodec<C>) -> Self {
        Self { codec }
    }

    pub fn codec(&self) -> &TokenCodec<C> {
        &self.codec
    }

    /// Validate a raw token string.
    ///
    /// # Errors
    ///
    /// - [`TokenError::Missing`] for an empty or blank string
    /// - [`TokenError::InvalidFormat`] if the token cannot be decoded
    /// - [`TokenError::Expired`] if the token is past its expiry
    #[instrument(skip_all)]
    pub fn validate(&self, token: &str) -> Result<Session, TokenError> {
        if token.trim().is_empty() {
            debug!("No token supplied");
            return Err(TokenError::Missing);
        }

        let payload = self.codec.decode(token).map_err(|e| {
            debug!(error = %e, "Token rejected");
            TokenError::from(e)
        })?;

        Ok(Session::new(
            payload.user_id,
            self.codec.clock().now_millis(),
        ))
    }
}
