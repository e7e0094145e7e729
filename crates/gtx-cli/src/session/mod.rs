//! Opening the session store for a CLI invocation.

pub mod storage;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use gtx_core::{ApiUrl, FileTokenStore, SessionStore};
use gtx_http::{ClientConfig, HttpTransport};

use crate::cli::ApiOptions;

/// Session store used by every command.
pub type CliSession = SessionStore<HttpTransport>;

/// Build the transport and session store from the command-line options.
///
/// The store is returned un-bootstrapped; commands that need the current
/// user call `bootstrap` themselves.
pub fn open(options: &ApiOptions) -> Result<CliSession> {
    let api_url = options
        .api_url
        .as_deref()
        .context("No API URL configured. Pass --api-url or set GTX_API_URL.")?;
    let base_url = ApiUrl::new(api_url).context("Invalid API URL")?;

    let mut config =
        ClientConfig::new(base_url).timeout(Duration::from_secs(options.timeout_secs));
    if let Some(package) = &options.partner_package {
        config = config.partner_package(package);
    }

    let token_path = storage::token_path(options.token_file.as_deref())?;
    tracing::debug!(path = %token_path.display(), "Using token file");
    let tokens = Arc::new(FileTokenStore::new(token_path));

    let transport = HttpTransport::new(config, tokens).context("Failed to build HTTP client")?;
    Ok(SessionStore::new(transport))
}
