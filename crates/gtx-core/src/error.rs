//! Error types for the gtx client.
//!
//! Every failure carries a human-readable message through its `Display`
//! implementation. Callers that only need to show something to a user can
//! print the error; callers that need to branch can match on the variant.

use std::fmt;
use thiserror::Error;

use crate::envelope::FieldErrors;

/// Generic message used when the remote reply carries no usable text.
pub const REQUEST_FAILED: &str = "Request failed";

/// The unified error type for gtx operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The API answered but the envelope or status signalled failure.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// A rejected access token could not be recovered by refreshing.
    ///
    /// Both persisted tokens have been erased when this is returned.
    #[error("Session expired. Please login again.")]
    SessionExpired(#[source] Box<Error>),

    /// A refresh was needed but no refresh token is persisted.
    #[error("No refresh token available")]
    NoRefreshToken,

    /// The call could not be completed or the reply was not well-formed.
    #[error("Network error occurred")]
    Network(#[from] TransportError),

    /// Input validation errors (base URL, header values).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// The token store could not be read or written.
    #[error("token storage error: {message}")]
    Storage { message: String },
}

impl Error {
    /// Build a storage error from anything displayable.
    pub fn storage(message: impl fmt::Display) -> Self {
        Error::Storage {
            message: message.to_string(),
        }
    }

    /// Wrap a refresh failure as a session-expired error.
    pub fn session_expired(cause: Error) -> Self {
        Error::SessionExpired(Box::new(cause))
    }

    /// Returns true if the session could not be recovered.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Error::SessionExpired(_))
    }

    /// Returns true if this failure was caused by a missing refresh token,
    /// either directly or as the cause of an expired session.
    pub fn is_no_refresh_token(&self) -> bool {
        match self {
            Error::NoRefreshToken => true,
            Error::SessionExpired(cause) => cause.is_no_refresh_token(),
            _ => false,
        }
    }

    /// HTTP status of a request failure, if the remote answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Request(err) => Some(err.status),
            _ => None,
        }
    }

    /// Field-level validation messages reported by the API.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Error::Request(err) => err.errors.as_ref(),
            _ => None,
        }
    }
}

/// A failure reported by the remote API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestError {
    /// HTTP status code.
    pub status: u16,
    /// Message drawn from the envelope's `error`, then `message`.
    pub message: String,
    /// Field-level validation messages, if the API sent any.
    pub errors: Option<FieldErrors>,
}

impl RequestError {
    /// Create a new request error.
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            errors: None,
        }
    }

    /// Attach field-level validation messages.
    pub fn with_errors(mut self, errors: Option<FieldErrors>) -> Self {
        self.errors = errors;
        self
    }

    /// Check if the API rejected the credentials of the call.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RequestError {}

/// Transport-level errors.
///
/// These never reach a user as text; [`Error::Network`] displays a generic
/// message and keeps the transport error as its source.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// The reply body was not a well-formed envelope.
    #[error("malformed response: {message}")]
    Decode { message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// A header name or value that cannot be sent.
    #[error("invalid header '{name}': {reason}")]
    Header { name: String, reason: String },

    /// An identifier that cannot be used as a single URL path segment.
    #[error("invalid path segment '{value}': {reason}")]
    PathSegment { value: String, reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
