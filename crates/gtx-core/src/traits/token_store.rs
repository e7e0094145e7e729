//! Persisted credential pair.

use crate::{AccessToken, RefreshToken, Result};

/// Durable storage for the access/refresh token pair.
///
/// An absent access token means the client was never authenticated (or has
/// logged out). Writes are last-write-wins; the transport serialises refresh
/// and clear so that a late refresh cannot resurrect a cleared session.
pub trait TokenStore: Send + Sync {
    /// Returns the persisted access token, if any.
    fn access_token(&self) -> Result<Option<AccessToken>>;

    /// Returns the persisted refresh token, if any.
    fn refresh_token(&self) -> Result<Option<RefreshToken>>;

    /// Persist a new access token, replacing the previous one.
    fn set_access_token(&self, token: &AccessToken) -> Result<()>;

    /// Persist a new refresh token, replacing the previous one.
    fn set_refresh_token(&self, token: &RefreshToken) -> Result<()>;

    /// Erase both tokens.
    fn clear(&self) -> Result<()>;
}
