//! Authentication endpoints consumed by the session store.

use async_trait::async_trait;

use crate::types::{Registration, User};
use crate::{AccessToken, Credentials, RefreshToken, Result};

use super::TokenStore;

/// Result of a successful login or registration.
#[derive(Debug, Clone)]
pub struct AuthPayload {
    pub user: User,
    pub access_token: AccessToken,
    pub refresh_token: Option<RefreshToken>,
}

/// The remote authentication API, as seen by the session store.
///
/// Implementations attach the persisted access token to authenticated calls
/// and recover from rejected tokens on their own; the session store never
/// sees an intermediate 401.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// The token store this API reads credentials from.
    fn tokens(&self) -> &dyn TokenStore;

    /// Exchange credentials for a user profile and token pair.
    ///
    /// Does not persist anything; the caller decides which tokens to keep.
    async fn login(&self, credentials: &Credentials) -> Result<AuthPayload>;

    /// Open a new account.
    async fn register(&self, registration: &Registration) -> Result<AuthPayload>;

    /// Tell the API the session is over.
    async fn logout(&self) -> Result<()>;

    /// Fetch the profile of the account owning the persisted access token.
    async fn profile(&self) -> Result<User>;

    /// Erase both persisted tokens once no refresh is in flight.
    async fn clear_credentials(&self) -> Result<()>;
}
