//! The access/refresh token pair issued at login.
//!
//! Both are opaque strings to the client. `Debug` never prints them, so they
//! can sit inside structs that get logged.

use std::fmt;

/// Bearer token sent as `Authorization: Bearer <token>`.
///
/// Equality is by value: a call that got a 401 compares the token it sent
/// with the one now in the store to tell whether another call has already
/// refreshed.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw value, for the `Authorization` header and the token store.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Exchanged at `/auth/refresh` for a new [`AccessToken`].
///
/// Only persisted when the user asked to be remembered, or after
/// registration.
#[derive(Clone, PartialEq, Eq)]
pub struct RefreshToken(String);

impl RefreshToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw value, for the refresh request body and the token store.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RefreshToken(***)")
    }
}
