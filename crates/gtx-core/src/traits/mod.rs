//! Seams between the session store, the transport and token storage.

mod auth_api;
mod token_store;

pub use auth_api::{AuthApi, AuthPayload};
pub use token_store::TokenStore;
