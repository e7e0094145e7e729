//! Authenticated HTTP transport.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, trace, warn};

use gtx_core::error::{InvalidInputError, TransportError};
use gtx_core::traits::{AuthApi, AuthPayload, TokenStore};
use gtx_core::{
    AccessToken, Credentials, Envelope, Error, RefreshToken, Registration, Result, User,
};

use crate::config::ClientConfig;
use crate::endpoints::*;
use crate::request::ApiRequest;

/// HTTP client for the GTXBET API.
///
/// Every call attaches the persisted access token. When the API rejects it
/// with a 401 the transport refreshes once and replays the call; callers
/// only ever see the final outcome.
///
/// Cheap to clone: clones share the connection pool, the token store and
/// the refresh gate.
#[derive(Clone)]
pub struct HttpTransport {
    inner: Arc<TransportInner>,
}

struct TransportInner {
    client: reqwest::Client,
    config: ClientConfig,
    tokens: Arc<dyn TokenStore>,
    timeout_ms: u64,
    // Held while a refresh (or a credential clear) is in progress.
    refresh_gate: Mutex<()>,
}

impl HttpTransport {
    /// Create a transport reading and writing tokens through `tokens`.
    pub fn new(config: ClientConfig, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        let timeout_ms = u64::try_from(config.timeout.as_millis()).unwrap_or(u64::MAX);
        let client = reqwest::Client::builder()
            .user_agent(concat!("gtx/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(|e| transport_error(e, timeout_ms))?;

        Ok(Self {
            inner: Arc::new(TransportInner {
                client,
                config,
                tokens,
                timeout_ms,
                refresh_gate: Mutex::new(()),
            }),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Issue a call and return the envelope's `data`.
    ///
    /// An absent or `null` `data` is handed to `T` as JSON `null`, so
    /// `Value` and `Option<_>` payloads accept it. A type that cannot be
    /// null treats it as a malformed reply.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn request<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T> {
        require_data(self.dispatch(request).await?)
    }

    /// Issue a call whose `data`, if any, is of no interest.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn request_empty(&self, request: &ApiRequest) -> Result<()> {
        self.dispatch::<IgnoredAny>(request).await.map(|_| ())
    }

    /// Exchange the persisted refresh token for a new access token.
    ///
    /// Fails with [`Error::NoRefreshToken`] when none is persisted. Unlike the
    /// automatic recovery inside [`request`](Self::request), a failure here
    /// leaves the persisted tokens untouched.
    #[instrument(skip(self))]
    pub async fn refresh_token(&self) -> Result<AccessToken> {
        let _gate = self.inner.refresh_gate.lock().await;
        self.refresh_locked().await
    }

    /// Attempt sequence for one call: initial send, then at most one
    /// refresh followed by one retry. Never recursive.
    async fn dispatch<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<Option<T>> {
        let token = self.inner.tokens.access_token()?;
        let response = self.send(request, token.as_ref()).await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return resolve(response).await;
        }

        // Nothing to refresh: an anonymous call was rejected.
        let Some(rejected) = token else {
            return resolve(response).await;
        };

        debug!("Access token rejected, recovering session");
        let fresh = self.recover(&rejected).await?;

        // The retry is final; a second 401 is returned as-is.
        let retry = self.send(request, Some(&fresh)).await?;
        let outcome = resolve(retry).await;

        // Credentials cleared while the retry was in flight end the call too.
        if self.inner.tokens.access_token()?.is_none() {
            debug!("Session was cleared while the retry was in flight");
            return Err(Error::session_expired(Error::NoRefreshToken));
        }
        outcome
    }

    /// Obtain a usable access token after `rejected` was refused.
    ///
    /// Concurrent callers queue on the refresh gate. Whoever gets there
    /// first refreshes; the others find a different token in the store and
    /// reuse it without calling the API again.
    async fn recover(&self, rejected: &AccessToken) -> Result<AccessToken> {
        let _gate = self.inner.refresh_gate.lock().await;

        match self.inner.tokens.access_token()? {
            Some(current) if current != *rejected => {
                debug!("Access token already refreshed by a concurrent call");
                return Ok(current);
            }
            None => {
                debug!("Session was cleared while waiting to refresh");
                return Err(Error::session_expired(Error::NoRefreshToken));
            }
            Some(_) => {}
        }

        match self.refresh_locked().await {
            Ok(token) => Ok(token),
            Err(err) => {
                warn!(error = %err, "Token refresh failed, clearing session");
                if let Err(clear_err) = self.inner.tokens.clear() {
                    warn!(error = %clear_err, "Failed to erase persisted tokens");
                }
                Err(Error::session_expired(err))
            }
        }
    }

    /// Refresh with the gate already held.
    async fn refresh_locked(&self) -> Result<AccessToken> {
        let refresh_token = self
            .inner
            .tokens
            .refresh_token()?
            .ok_or(Error::NoRefreshToken)?;

        let request = ApiRequest::post(REFRESH).json(&RefreshRequest {
            refresh_token: refresh_token.as_str(),
        })?;

        let response = self.send(&request, None).await?;
        let refreshed: RefreshResponse = require_data(resolve(response).await?)?;

        let access_token = AccessToken::new(refreshed.access_token);
        self.inner.tokens.set_access_token(&access_token)?;
        if let Some(rotated) = refreshed.refresh_token {
            self.inner
                .tokens
                .set_refresh_token(&RefreshToken::new(rotated))?;
        }

        info!("Access token refreshed");
        Ok(access_token)
    }

    /// Call an endpoint that must not carry credentials or trigger recovery.
    async fn anonymous<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T> {
        let response = self.send(request, None).await?;
        require_data(resolve(response).await?)
    }

    /// Send one attempt with headers built for `token`.
    async fn send(
        &self,
        request: &ApiRequest,
        token: Option<&AccessToken>,
    ) -> Result<reqwest::Response> {
        let url = self.inner.config.base_url.endpoint(&request.path);
        debug!(method = %request.method, %url, authenticated = token.is_some(), "API call");

        let mut builder = self
            .inner
            .client
            .request(request.method.clone(), &url)
            .headers(build_headers(&request.headers, token)?);

        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, %url, "API call did not complete");
            transport_error(e, self.inner.timeout_ms)
        })?;

        trace!(status = %response.status(), "API response");
        Ok(response)
    }
}

/// JSON content type, then the caller's headers, then `Authorization`.
fn build_headers(caller: &HeaderMap, token: Option<&AccessToken>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    for (name, value) in caller {
        headers.insert(name.clone(), value.clone());
    }

    headers.remove(AUTHORIZATION);
    if let Some(token) = token {
        let value = HeaderValue::from_str(&format!("Bearer {}", token.as_str())).map_err(|_| {
            InvalidInputError::Header {
                name: AUTHORIZATION.to_string(),
                reason: "access token contains invalid characters".to_string(),
            }
        })?;
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}

/// Apply the envelope contract to a reply.
async fn resolve<T: DeserializeOwned>(response: reqwest::Response) -> Result<Option<T>> {
    let status = response.status().as_u16();
    let body = response.bytes().await.map_err(|e| TransportError::Http {
        message: e.to_string(),
    })?;

    let envelope: Envelope<T> = serde_json::from_slice(&body).map_err(|e| {
        debug!(status, error = %e, "Reply is not a valid envelope");
        TransportError::Decode {
            message: e.to_string(),
        }
    })?;

    Ok(envelope.into_result(status)?)
}

/// Unwrap a successful reply's `data`, letting null-tolerant types accept
/// an empty payload.
fn require_data<T: DeserializeOwned>(data: Option<T>) -> Result<T> {
    match data {
        Some(data) => Ok(data),
        None => T::deserialize(Value::Null).map_err(|_| {
            Error::from(TransportError::Decode {
                message: "successful reply carried no data".to_string(),
            })
        }),
    }
}

fn transport_error(err: reqwest::Error, timeout_ms: u64) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout {
            duration_ms: timeout_ms,
        }
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl AuthApi for HttpTransport {
    fn tokens(&self) -> &dyn TokenStore {
        self.inner.tokens.as_ref()
    }

    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    async fn login(&self, credentials: &Credentials) -> Result<AuthPayload> {
        let request = ApiRequest::post(LOGIN).json(&LoginRequest {
            email: credentials.email(),
            password: credentials.password(),
            remember_me: credentials.is_remember_me(),
        })?;

        let response: AuthResponse = self.anonymous(&request).await?;
        Ok(auth_payload(response))
    }

    #[instrument(skip(self, registration), fields(email = %registration.email()))]
    async fn register(&self, registration: &Registration) -> Result<AuthPayload> {
        let request = ApiRequest::post(REGISTER).json(registration)?;

        let response: AuthResponse = self.anonymous(&request).await?;
        Ok(auth_payload(response))
    }

    #[instrument(skip(self))]
    async fn logout(&self) -> Result<()> {
        self.request_empty(&ApiRequest::post(LOGOUT)).await
    }

    #[instrument(skip(self))]
    async fn profile(&self) -> Result<User> {
        let response: ProfileResponse = self.request(&ApiRequest::get(PROFILE)).await?;
        Ok(response.into_user())
    }

    async fn clear_credentials(&self) -> Result<()> {
        let _gate = self.inner.refresh_gate.lock().await;
        self.inner.tokens.clear()
    }
}

fn auth_payload(response: AuthResponse) -> AuthPayload {
    AuthPayload {
        user: response.user,
        access_token: AccessToken::new(response.access_token),
        refresh_token: response.refresh_token.map(RefreshToken::new),
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.inner.config.base_url)
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}
