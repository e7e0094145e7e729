//! Login credentials type.

use std::fmt;

/// Email and password used to open a session.
///
/// `remember_me` decides whether the refresh token returned by a successful
/// login is persisted. Without it, the session ends as soon as the access
/// token is rejected.
///
/// # Security
///
/// The password is never exposed in Debug output to prevent accidental logging.
///
/// # Example
///
/// ```
/// use gtx_core::Credentials;
///
/// let creds = Credentials::new("alice@example.com", "hunter2!A").remember_me(true);
/// assert_eq!(creds.email(), "alice@example.com");
/// assert!(creds.is_remember_me());
/// ```
#[derive(Clone)]
pub struct Credentials {
    email: String,
    password: String,
    remember_me: bool,
}

impl Credentials {
    /// Create new credentials with remember-me switched off.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            remember_me: false,
        }
    }

    /// Ask for the refresh token to be persisted after login.
    pub fn remember_me(mut self, remember: bool) -> Self {
        self.remember_me = remember;
        self
    }

    /// Returns the account email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the password.
    ///
    /// # Security
    ///
    /// Use this only when constructing the login request body.
    /// Never log or display this value.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Whether the refresh token should be persisted.
    pub fn is_remember_me(&self) -> bool {
        self.remember_me
    }
}

// Intentionally hide password in Debug output
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("remember_me", &self.remember_me)
            .finish()
    }
}
