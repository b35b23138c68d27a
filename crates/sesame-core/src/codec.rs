//! Token issuance and decoding.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::Duration;
use tracing::{debug, trace};

use crate::error::DecodeError;
use crate::tokens::{Token, TokenPayload};
use crate::traits::Clock;

/// Default token lifetime.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// Encodes identities into [`Token`]s and decodes them back.
///
/// The encoding is `base64(json(payload))`. It is reversible by anyone and
/// carries no signature, so a token proves nothing to a party that did not
/// issue it. This is a demo codec.
///
/// # Example
///
/// ```
/// use sesame_core::TokenCodec;
/// use sesame_core::traits::ManualClock;
///
/// let codec = TokenCodec::new(ManualClock::at_secs(1_000));
/// let token = codec.issue("admin");
/// let payload = codec.decode(token.as_str()).unwrap();
/// assert_eq!(payload.user_id, "admin");
/// assert_eq!(payload.expires_at, 4_600);
/// ```
#[derive(Debug, Clone)]
pub struct TokenCodec<C> {
    clock: C,
    ttl: Duration,
}

impl<C: Clock> TokenCodec<C> {
    /// Create a codec issuing tokens with the default one-hour lifetime.
    pub fn new(clock: C) -> Self {
        Self::with_ttl(clock, Duration::seconds(DEFAULT_TOKEN_TTL_SECS))
    }

    /// Create a codec issuing tokens with a custom lifetime.
    pub fn with_ttl(clock: C, ttl: Duration) -> Self {
        Self { clock, ttl }
    }

    /// The clock this codec reads.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Issue a token for `user_id`, valid from now for the configured lifetime.
    pub fn issue(&self, user_id: &str) -> Token {
        let issued_at = self.clock.now_secs();
        let payload = TokenPayload {
            user_id: user_id.to_string(),
            issued_at,
            expires_at: issued_at + self.ttl.num_seconds(),
        };
        debug!(user_id, expires_at = payload.expires_at, "Issuing token");
        Self::encode(&payload)
    }

    /// Encode an arbitrary payload.
    ///
    /// Exposed so callers (and tests) can build tokens with chosen timestamps.
    pub fn encode(payload: &TokenPayload) -> Token {
        // Serialising a struct of plain strings and integers cannot fail.
        let json = serde_json::to_vec(payload).unwrap_or_default();
        Token::new(STANDARD.encode(json))
    }

    /// Decode a raw token string and check its expiry.
    ///
    /// # Errors
    ///
    /// [`DecodeError::MalformedFormat`] if the string is not base64 JSON with
    /// a non-empty `userId` and an `expiresAt`; [`DecodeError::Expired`] if
    /// `expiresAt` is strictly before now.
    pub fn decode(&self, token: &str) -> Result<TokenPayload, DecodeError> {
        let bytes = STANDARD
            .decode(token.trim())
            .map_err(|e| DecodeError::MalformedFormat {
                reason: format!("not base64: {}", e),
            })?;

        let payload: TokenPayload =
            serde_json::from_slice(&bytes).map_err(|e| DecodeError::MalformedFormat {
                reason: format!("invalid payload: {}", e),
            })?;

        if payload.user_id.is_empty() {
            return Err(DecodeError::MalformedFormat {
                reason: "empty userId".to_string(),
            });
        }

        let now = self.clock.now_secs();
        if payload.expires_at < now {
            trace!(expires_at = payload.expires_at, now, "Token expired");
            return Err(DecodeError::Expired {
                expires_at: payload.expires_at,
            });
        }

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ManualClock;

    fn codec() -> (ManualClock, TokenCodec<ManualClock>) {
        let clock = ManualClock::at_secs(1_700_000_000);
        (clock.clone(), TokenCodec::new(clock))
    }

    #[test]
    fn issued_token_expires_one_hour_after_issue() {
        let (_, codec) = codec();
        let payload = codec.decode(codec.issue("admin").as_str()).unwrap();

        assert_eq!(payload.user_id, "admin");
        assert_eq!(payload.issued_at, 1_700_000_000);
        assert_eq!(payload.expires_at, payload.issued_at + 3600);
    }

    #[test]
    fn issued_token_is_plain_base64_json() {
        let (_, codec) = codec();
        let token = codec.issue("admin");
        let raw = STANDARD.decode(token.as_str()).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(json["userId"], "admin");
    }

    #[test]
    fn garbage_is_malformed() {
        let (_, codec) = codec();
        assert!(matches!(
            codec.decode("garbage-not-base64"),
            Err(DecodeError::MalformedFormat { .. })
        ));
    }

    #[test]
    fn base64_of_non_json_is_malformed() {
        let (_, codec) = codec();
        let token = STANDARD.encode("hello world");
        assert!(matches!(
            codec.decode(&token),
            Err(DecodeError::MalformedFormat { .. })
        ));
    }

    #[test]
    fn missing_fields_are_malformed() {
        let (_, codec) = codec();
        let no_expiry = STANDARD.encode(r#"{"userId":"admin","issuedAt":1}"#);
        let no_user = STANDARD.encode(r#"{"issuedAt":1,"expiresAt":99999999999}"#);
        let empty_user = STANDARD.encode(r#"{"userId":"","expiresAt":99999999999}"#);

        for token in [no_expiry, no_user, empty_user] {
            assert!(matches!(
                codec.decode(&token),
                Err(DecodeError::MalformedFormat { .. })
            ));
        }
    }

    #[test]
    fn token_expires_after_ttl() {
        let (clock, codec) = codec();
        let token = codec.issue("admin");

        clock.advance(Duration::seconds(3600));
        assert!(codec.decode(token.as_str()).is_ok());

        clock.advance(Duration::seconds(1));
        assert_eq!(
            codec.decode(token.as_str()),
            Err(DecodeError::Expired {
                expires_at: 1_700_003_600
            })
        );
    }

    #[test]
    fn hand_built_past_token_is_expired() {
        let (_, codec) = codec();
        let token = TokenCodec::<ManualClock>::encode(&TokenPayload {
            user_id: "admin".to_string(),
            issued_at: 0,
            expires_at: 10,
        });
        assert!(matches!(
            codec.decode(token.as_str()),
            Err(DecodeError::Expired { expires_at: 10 })
        ));
    }

    #[test]
    fn custom_ttl_is_respected() {
        let clock = ManualClock::at_secs(100);
        let codec = TokenCodec::with_ttl(clock, Duration::seconds(60));
        let payload = codec.decode(codec.issue("admin").as_str()).unwrap();
        assert_eq!(payload.expires_at, 160);
    }
}
