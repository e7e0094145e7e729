//! The API's uniform response wrapper.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{REQUEST_FAILED, RequestError};

/// Field-level validation messages, keyed by field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Every reply from the API is wrapped in this envelope.
///
/// A call succeeded only when the HTTP status is 2xx **and** `success` is
/// true. Anything else is a failure whose message comes from `error`, then
/// `message`, then [`REQUEST_FAILED`].
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default = "none")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub errors: Option<FieldErrors>,
}

// `#[serde(default)]` would require `T: Default`.
fn none<T>() -> Option<T> {
    None
}

impl<T> Envelope<T> {
    /// The message to surface when this envelope signals failure.
    ///
    /// Empty strings are skipped, matching how the API's own web client
    /// treats them.
    pub fn failure_message(&self) -> String {
        [self.error.as_deref(), self.message.as_deref()]
            .into_iter()
            .flatten()
            .find(|text| !text.is_empty())
            .unwrap_or(REQUEST_FAILED)
            .to_string()
    }

    /// Resolve the envelope against the HTTP status it arrived with.
    ///
    /// Returns the (possibly absent) payload on success.
    pub fn into_result(self, status: u16) -> Result<Option<T>, RequestError> {
        if (200..300).contains(&status) && self.success {
            return Ok(self.data);
        }

        let message = self.failure_message();
        Err(RequestError::new(status, message).with_errors(self.errors))
    }
}
