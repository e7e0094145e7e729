//! The live session and the operations exposed to the UI layer.

use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::traits::AuthApi;
use crate::types::{Registration, User};
use crate::{AccessToken, Credentials, Error, RefreshToken, Result};

use super::state::{SessionAction, SessionState};

/// What happened to the remote half of a logout.
///
/// The local half (tokens erased, state signed out) always succeeds, so this
/// is informational only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoutOutcome {
    /// The API acknowledged the logout.
    Acknowledged,
    /// The API call failed; the session was still cleared locally.
    RemoteFailed { message: String },
}

impl LogoutOutcome {
    pub fn remote_acknowledged(&self) -> bool {
        matches!(self, LogoutOutcome::Acknowledged)
    }
}

/// Single source of truth for authentication state.
///
/// The store is the only writer of its [`SessionState`]; each action is
/// applied atomically and published to every receiver returned by
/// [`subscribe`](Self::subscribe).
///
/// # Example
///
/// ```no_run
/// # use gtx_core::{AuthApi, Credentials, SessionStore};
///
/// # async fn example<A: AuthApi>(api: A) -> Result<(), gtx_core::Error> {
/// let store = SessionStore::new(api);
/// store.bootstrap().await;
///
/// if !store.is_authenticated() {
///     let creds = Credentials::new("alice@example.com", "S3cret!pw").remember_me(true);
///     store.login(&creds).await?;
/// }
/// # Ok(())
/// # }
/// ```
pub struct SessionStore<A> {
    api: A,
    state: watch::Sender<SessionState>,
}

impl<A: AuthApi> SessionStore<A> {
    /// Create a store in the initial (loading, signed out) state.
    pub fn new(api: A) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self { api, state }
    }

    /// The API this store authenticates against.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receive every future transition.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    /// Restore the session from a persisted access token, once at startup.
    ///
    /// A stale token is not a user-facing error: it is erased and the
    /// session settles signed out with no error set.
    #[instrument(skip(self))]
    pub async fn bootstrap(&self) {
        let token = match self.api.tokens().access_token() {
            Ok(token) => token,
            Err(err) => {
                warn!(error = %err, "Could not read persisted access token");
                None
            }
        };

        if token.is_none() {
            debug!("No persisted access token");
            self.dispatch(SessionAction::SetLoading(false));
            return;
        }

        match self.api.profile().await {
            Ok(user) => {
                info!(user_id = %user.id, "Restored session");
                self.dispatch(SessionAction::Success(user));
            }
            Err(err) => {
                debug!(error = %err, "Persisted access token rejected");
                self.erase_credentials().await;
                self.dispatch(SessionAction::SetLoading(false));
            }
        }
    }

    /// Authenticate with email and password.
    ///
    /// The refresh token is kept only when the credentials ask to be
    /// remembered. On failure the message is mirrored into the state's
    /// `error` and the error is also returned.
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<User> {
        self.dispatch(SessionAction::Start);

        let result: Result<User> = async {
            let payload = self.api.login(credentials).await?;
            let refresh_token = payload
                .refresh_token
                .filter(|_| credentials.is_remember_me());
            self.persist(&payload.access_token, refresh_token.as_ref())
                .await?;
            Ok(payload.user)
        }
        .await;

        self.settle(result, "Login failed")
    }

    /// Open a new account and sign in to it. Both tokens are always kept.
    #[instrument(skip(self, registration), fields(email = %registration.email()))]
    pub async fn register(&self, registration: &Registration) -> Result<User> {
        self.dispatch(SessionAction::Start);

        let result: Result<User> = async {
            let payload = self.api.register(registration).await?;
            self.persist(&payload.access_token, payload.refresh_token.as_ref())
                .await?;
            Ok(payload.user)
        }
        .await;

        self.settle(result, "Registration failed")
    }

    /// End the session. Never fails locally.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> LogoutOutcome {
        let outcome = match self.api.logout().await {
            Ok(()) => LogoutOutcome::Acknowledged,
            Err(err) => {
                warn!(error = %err, "Logout request failed, clearing session locally");
                LogoutOutcome::RemoteFailed {
                    message: err.to_string(),
                }
            }
        };

        self.erase_credentials().await;
        self.dispatch(SessionAction::Logout);
        info!("Signed out");
        outcome
    }

    /// Acknowledge the last error.
    pub fn clear_error(&self) {
        self.dispatch(SessionAction::ClearError);
    }

    async fn persist(
        &self,
        access_token: &AccessToken,
        refresh_token: Option<&RefreshToken>,
    ) -> Result<()> {
        // Never pair a new access token with a previous session's refresh token.
        self.api.clear_credentials().await?;

        let tokens = self.api.tokens();
        tokens.set_access_token(access_token)?;
        if let Some(refresh_token) = refresh_token {
            tokens.set_refresh_token(refresh_token)?;
        }
        Ok(())
    }

    fn settle(&self, result: Result<User>, fallback: &str) -> Result<User> {
        match result {
            Ok(user) => {
                info!(user_id = %user.id, "Authenticated");
                self.dispatch(SessionAction::Success(user.clone()));
                Ok(user)
            }
            Err(err) => {
                self.dispatch(SessionAction::Failure(failure_message(&err, fallback)));
                Err(err)
            }
        }
    }

    async fn erase_credentials(&self) {
        if let Err(err) = self.api.clear_credentials().await {
            warn!(error = %err, "Failed to erase persisted tokens");
        }
    }

    fn dispatch(&self, action: SessionAction) {
        self.state.send_modify(|state| {
            let current = std::mem::take(state);
            *state = current.reduce(action);
        });
    }
}

fn failure_message(err: &Error, fallback: &str) -> String {
    let message = err.to_string();
    if message.is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

impl<A> std::fmt::Debug for SessionStore<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &*self.state.borrow())
            .finish()
    }
}
