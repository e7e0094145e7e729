//! Client-held authentication state.
//!
//! [`SessionState`] is a plain value; the only way to change it is to feed a
//! [`SessionAction`] through [`SessionState::reduce`]. [`SessionStore`] owns
//! the single live instance and publishes every transition to subscribers.

mod state;
mod store;

pub use state::{SessionAction, SessionState};
pub use store::{LogoutOutcome, SessionStore};
