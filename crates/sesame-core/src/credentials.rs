//! Login credentials type.

use std::fmt;

/// Login credentials for the demo auth service.
///
/// Constructed per login attempt and never persisted.
///
/// # Security
///
/// The password is never exposed in Debug output to prevent accidental logging.
///
/// # Example
///
/// ```
/// use sesame_core::Credentials;
///
/// let creds = Credentials::new("admin", "hunter2");
/// assert_eq!(creds.username(), "admin");
/// ```
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    ///
    /// # Security
    ///
    /// Use this only when checking the login policy. Never log or display it.
    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

// Intentionally hide password in Debug output
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_hides_password_in_debug() {
        let creds = Credentials::new("admin", "secret123");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("admin"));
        assert!(!debug.contains("secret123"));
        assert!(debug.contains("[REDACTED]"));
    }
}
