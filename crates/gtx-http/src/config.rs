//! Transport configuration.

use std::time::Duration;

use gtx_core::ApiUrl;

/// HTTP request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for an [`HttpTransport`](crate::HttpTransport).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to.
    pub base_url: ApiUrl,
    /// Partner key sent as the `Package` header on sports-data reads.
    pub partner_package: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: ApiUrl) -> Self {
        Self {
            base_url,
            partner_package: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn partner_package(mut self, package: impl Into<String>) -> Self {
        self.partner_package = Some(package.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
