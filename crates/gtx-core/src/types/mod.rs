//! Core API types.
//!
//! These types enforce wire-format and validation rules at construction
//! time, so an invalid base URL or a half-filled registration cannot reach
//! the transport.

mod api_url;
mod registration;
mod user;

pub use api_url::ApiUrl;
pub use registration::Registration;
pub use user::User;
