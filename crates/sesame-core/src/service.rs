//! The demo auth service.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

use crate::codec::TokenCodec;
use crate::config::ServiceConfig;
use crate::credentials::Credentials;
use crate::error::{AuthenticationError, AuthorizationError, RetryError, TokenError};
use crate::resilient::{FailureInjector, RandomFailures, SimulatedFailure, resilient};
use crate::session::Session;
use crate::tokens::Token;
use crate::traits::Clock;
use crate::validator::SessionValidator;

/// The only username the demo accepts.
pub const DEMO_USERNAME: &str = "admin";

/// Output of a successful secured action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub user_id: String,
    pub action_type: String,
}

/// Output of the public greeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GreetingResult {
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Output of the resilient demo action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResilientOutcome {
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub attempts: u32,
}

/// Login, secured actions and the public greeting.
///
/// There is no account database: `admin` with any non-blank password logs in.
///
/// # Example
///
/// ```
/// use sesame_core::{AuthService, Credentials, ServiceConfig};
/// use sesame_core::traits::SystemClock;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let service = AuthService::new(SystemClock, ServiceConfig::instant());
/// let token = service
///     .authenticate(&Credentials::new("admin", "anything"))
///     .await
///     .unwrap();
/// let result = service.perform_secured_action(&token, "export").await.unwrap();
/// assert_eq!(result.action_type, "export");
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AuthService<C> {
    validator: SessionValidator<C>,
    config: ServiceConfig,
}

impl<C: Clock> AuthService<C> {
    pub fn new(clock: C, config: ServiceConfig) -> Self {
        let codec = TokenCodec::with_ttl(clock, config.token_ttl);
        Self {
            validator: SessionValidator::new(codec),
            config,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn validator(&self) -> &SessionValidator<C> {
        &self.validator
    }

    fn now(&self) -> DateTime<Utc> {
        self.validator.codec().clock().now()
    }

    /// Check credentials and issue a token.
    ///
    /// # Errors
    ///
    /// - [`AuthenticationError::InvalidUsername`] for any username but `admin`
    /// - [`AuthenticationError::PasswordRequired`] for a blank password
    #[instrument(skip(self, credentials), fields(username = %credentials.username()))]
    pub async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<Token, AuthenticationError> {
        if credentials.username() != DEMO_USERNAME {
            warn!("Login rejected: unknown username");
            return Err(AuthenticationError::InvalidUsername);
        }

        if credentials.password().trim().is_empty() {
            warn!("Login rejected: empty password");
            return Err(AuthenticationError::PasswordRequired);
        }

        sleep(self.config.login_latency).await;

        let token = self.validator.codec().issue(credentials.username());
        info!("Login succeeded");
        Ok(token)
    }

    /// Validate `token`, then run the (simulated) action.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorizationError`] wrapping the [`TokenError`] if the token
    /// does not validate.
    #[instrument(skip(self, token))]
    pub async fn perform_secured_action(
        &self,
        token: &Token,
        action_type: &str,
    ) -> Result<ActionResult, AuthorizationError> {
        let session = self.validator.validate(token.as_str()).map_err(|e| {
            warn!(error = %e, "Secured action refused");
            AuthorizationError::from(e)
        })?;

        sleep(self.config.action_latency).await;

        info!(user_id = session.user_id(), "Secured action completed");
        Ok(ActionResult {
            message: format!(
                "Secured action '{}' completed for {}",
                action_type,
                session.user_id()
            ),
            timestamp: self.now(),
            user_id: session.user_id().to_string(),
            action_type: action_type.to_string(),
        })
    }

    /// A greeting anyone can fetch. Never fails.
    #[instrument(skip(self))]
    pub async fn public_greeting(&self) -> GreetingResult {
        sleep(self.config.greeting_latency).await;
        debug!("Serving public greeting");
        GreetingResult {
            message: "Hello! This greeting needs no login.".to_string(),
            timestamp: self.now(),
        }
    }

    /// Validate a token into a [`Session`].
    #[instrument(skip_all)]
    pub fn validate_token(&self, token: &str) -> Result<Session, TokenError> {
        match self.validator.validate(token) {
            Ok(session) => {
                debug!(user_id = session.user_id(), "Token valid");
                Ok(session)
            }
            Err(e) => {
                info!(error = %e, "Token validation failed");
                Err(e)
            }
        }
    }

    /// A failure generator at the configured [`ServiceConfig::failure_rate`].
    pub fn random_failures(&self) -> RandomFailures {
        RandomFailures::new(self.config.failure_rate)
    }

    /// Run the flaky demo operation under the configured retry policy.
    ///
    /// `injector` decides which calls fail: [`random_failures`](Self::random_failures)
    /// for the classic demo, or a
    /// [`ScriptedFailures`](crate::resilient::ScriptedFailures) for
    /// reproducible runs.
    #[instrument(skip(self, injector))]
    pub async fn resilient_action<I: FailureInjector>(
        &self,
        injector: &mut I,
    ) -> Result<ResilientOutcome, RetryError> {
        let latency = self.config.resilient_latency;
        let mut attempts = 0u32;

        resilient(&self.config.retry, || {
            attempts += 1;
            let attempt = attempts;
            let fail = injector.should_fail();
            async move {
                sleep(latency).await;
                if fail {
                    Err(SimulatedFailure { attempt })
                } else {
                    Ok(attempt)
                }
            }
        })
        .await
        .map(|attempt| {
            info!(attempts = attempt, "Resilient action succeeded");
            ResilientOutcome {
                message: format!("Operation succeeded on attempt {}", attempt),
                timestamp: self.now(),
                attempts: attempt,
            }
        })
    }
}
