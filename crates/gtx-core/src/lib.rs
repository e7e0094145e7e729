//! gtx-core - session core of the GTXBET API client.
//!
//! This crate holds everything that does not touch the network: the
//! authentication state machine ([`SessionStore`]), the credential types,
//! the API's response [`Envelope`], and the [`TokenStore`] implementations
//! that persist the access/refresh token pair. The HTTP transport lives in
//! `gtx-http` and plugs in through the [`AuthApi`] trait.

pub mod credentials;
pub mod envelope;
pub mod error;
pub mod session;
pub mod store;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credentials::Credentials;
pub use envelope::{Envelope, FieldErrors};
pub use error::Error;
pub use session::{LogoutOutcome, SessionAction, SessionState, SessionStore};
pub use store::{FileTokenStore, MemoryTokenStore};
pub use tokens::{AccessToken, RefreshToken};
pub use traits::{AuthApi, AuthPayload, TokenStore};
pub use types::{ApiUrl, Registration, User};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
