//! The client session lifecycle.
//!
//! [`SessionManager`] is the only thing that moves a client between
//! [`SessionState::Unauthenticated`] and [`SessionState::Authenticated`]. Its
//! triggers are [`startup`](SessionManager::startup),
//! [`login`](SessionManager::login), [`logout`](SessionManager::logout) and a
//! failed re-validation. Whenever the stored token turns out to be invalid it
//! is purged before the state drops to `Unauthenticated`.

use tracing::{info, instrument, warn};

use crate::credentials::Credentials;
use crate::error::{AuthorizationError, Error, TokenError};
use crate::service::{ActionResult, AuthService};
use crate::session::{Session, SessionState};
use crate::store::SessionStore;
use crate::tokens::Token;
use crate::traits::{Clock, KeyValueStore};

/// Owns the current token and session state for one client.
#[derive(Debug)]
pub struct SessionManager<C, S> {
    service: AuthService<C>,
    store: SessionStore<S>,
    token: Option<Token>,
    state: SessionState,
}

impl<C: Clock, S: KeyValueStore> SessionManager<C, S> {
    /// Create a manager in the `Unauthenticated` state.
    ///
    /// Call [`startup`](Self::startup) to pick up a previously stored token.
    pub fn new(service: AuthService<C>, store: SessionStore<S>) -> Self {
        Self {
            service,
            store,
            token: None,
            state: SessionState::Unauthenticated,
        }
    }

    pub fn service(&self) -> &AuthService<C> {
        &self.service
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The token backing the current session, if authenticated.
    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    /// Rehydrate from storage: load, validate, and purge on failure.
    #[instrument(skip(self))]
    pub async fn startup(&mut self) -> &SessionState {
        match self.store.load().await {
            Some(token) => {
                if let Err(e) = self.adopt(token).await {
                    info!(error = %e, "Discarded stored token");
                }
            }
            None => self.reset(),
        }
        &self.state
    }

    /// Re-check the current token, e.g. after time has passed.
    ///
    /// # Errors
    ///
    /// [`TokenError::Missing`] when there is no token; otherwise the
    /// validation failure, after the stored token has been cleared.
    pub async fn revalidate(&mut self) -> Result<&Session, TokenError> {
        let token = self.token.clone().ok_or(TokenError::Missing)?;
        self.adopt(token).await?;
        match &self.state {
            SessionState::Authenticated(session) => Ok(session),
            SessionState::Unauthenticated => Err(TokenError::Missing),
        }
    }

    /// Log in, persist the new token, and become `Authenticated`.
    ///
    /// A failed login leaves the current state untouched.
    #[instrument(skip(self, credentials), fields(username = %credentials.username()))]
    pub async fn login(&mut self, credentials: &Credentials) -> Result<Session, Error> {
        let token = self.service.authenticate(credentials).await?;
        self.store.save(&token).await;
        self.adopt(token).await.map_err(Error::from)
    }

    /// Forget the session and clear storage.
    #[instrument(skip(self))]
    pub async fn logout(&mut self) {
        self.store.clear().await;
        self.reset();
        info!("Logged out");
    }

    /// Run a secured action with the current token.
    ///
    /// A token that no longer validates is purged and the state drops to
    /// `Unauthenticated`.
    pub async fn secured_action(
        &mut self,
        action_type: &str,
    ) -> Result<ActionResult, AuthorizationError> {
        let token = self.token.clone().ok_or(TokenError::Missing)?;
        let result = self.service.perform_secured_action(&token, action_type).await;

        if let Err(e) = &result {
            warn!(error = %e, "Session invalidated by secured action");
            self.store.clear().await;
            self.reset();
        }

        result
    }

    async fn adopt(&mut self, token: Token) -> Result<Session, TokenError> {
        match self.service.validate_token(token.as_str()) {
            Ok(session) => {
                self.token = Some(token);
                self.state = SessionState::Authenticated(session.clone());
                Ok(session)
            }
            Err(e) => {
                self.store.clear().await;
                self.reset();
                Err(e)
            }
        }
    }

    fn reset(&mut self) {
        self.token = None;
        self.state = SessionState::Unauthenticated;
    }
}
