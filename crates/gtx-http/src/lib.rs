//! gtx-http - authenticated HTTP transport for the GTXBET API.
//!
//! [`HttpTransport`] implements [`gtx_core::AuthApi`], so it can drive a
//! [`gtx_core::SessionStore`] directly:
//!
//! ```no_run
//! use std::sync::Arc;
//! use gtx_core::{ApiUrl, Credentials, MemoryTokenStore, SessionStore};
//! use gtx_http::{ClientConfig, HttpTransport};
//!
//! # async fn example() -> Result<(), gtx_core::Error> {
//! let config = ClientConfig::new(ApiUrl::new("https://api.gtxbet.com")?);
//! let transport = HttpTransport::new(config, Arc::new(MemoryTokenStore::new()))?;
//!
//! let session = SessionStore::new(transport);
//! session.bootstrap().await;
//! session.login(&Credentials::new("alice@example.com", "S3cret!pw")).await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod endpoints;
mod request;
mod sports;
mod transport;

pub use config::{ClientConfig, DEFAULT_TIMEOUT};
pub use request::ApiRequest;
pub use sports::{Feed, ListType};
pub use transport::HttpTransport;
