//! Validated sessions and the client session state.

use serde::Serialize;

/// The validated identity behind a token.
///
/// A `Session` can only be produced by
/// [`SessionValidator::validate`](crate::SessionValidator::validate), so holding
/// one means a well-formed, unexpired token was seen. It is recomputed on every
/// validation and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    user_id: String,
    username: String,
    is_authenticated: bool,
    login_time: i64,
}

impl Session {
    pub(crate) fn new(user_id: String, login_time: i64) -> Self {
        Self {
            username: user_id.clone(),
            user_id,
            is_authenticated: true,
            login_time,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    /// Validation time in Unix epoch milliseconds.
    pub fn login_time(&self) -> i64 {
        self.login_time
    }
}

/// Where a client currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticated(Session),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Authenticated(session) => Some(session),
            SessionState::Unauthenticated => None,
        }
    }
}
