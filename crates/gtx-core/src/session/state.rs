//! Session state and its transition function.

use crate::types::User;

/// Authentication state shared with the UI layer.
///
/// `is_authenticated` is true exactly when `user` is present; every
/// transition preserves this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// The closed set of transitions the session can go through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// A login or registration attempt began.
    Start,
    /// A user was authenticated.
    Success(User),
    /// A login or registration attempt was rejected.
    Failure(String),
    /// The session was ended locally.
    Logout,
    /// The last error was acknowledged.
    ClearError,
    /// Toggle the loading flag without touching anything else.
    SetLoading(bool),
}

impl Default for SessionState {
    /// The state before the bootstrap check has run.
    fn default() -> Self {
        Self {
            user: None,
            is_authenticated: false,
            is_loading: true,
            error: None,
        }
    }
}

impl SessionState {
    /// Apply an action, producing the next state.
    pub fn reduce(self, action: SessionAction) -> Self {
        match action {
            SessionAction::Start => Self {
                is_loading: true,
                error: None,
                ..self
            },
            SessionAction::Success(user) => Self {
                user: Some(user),
                is_authenticated: true,
                is_loading: false,
                error: None,
            },
            SessionAction::Failure(message) => Self {
                user: None,
                is_authenticated: false,
                is_loading: false,
                error: Some(message),
            },
            SessionAction::Logout => Self {
                user: None,
                is_authenticated: false,
                is_loading: false,
                error: None,
            },
            SessionAction::ClearError => Self {
                error: None,
                ..self
            },
            SessionAction::SetLoading(is_loading) => Self { is_loading, ..self },
        }
    }

    /// The unauthenticated state the session settles in when idle.
    pub fn signed_out() -> Self {
        Self::default().reduce(SessionAction::Logout)
    }
}
