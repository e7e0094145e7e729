//! Sports-data read endpoints.
//!
//! These are plain authenticated GETs that also identify the partner with a
//! `Package` header. Payloads are passed through untyped.
//!
//! Caller-supplied ids and language codes become path segments, so each one
//! is checked before anything is sent.

use std::fmt;

use serde_json::Value;
use tracing::instrument;

use gtx_core::Result;
use gtx_core::error::InvalidInputError;

use crate::endpoints::PACKAGE_HEADER;
use crate::request::ApiRequest;
use crate::transport::HttpTransport;

/// Which feed to read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    /// Events in play.
    Live,
    /// Pre-match line.
    Line,
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Feed::Live => "live",
            Feed::Line => "line",
        })
    }
}

/// Shape of an event listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListType {
    Sub,
    List,
}

impl fmt::Display for ListType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ListType::Sub => "sub",
            ListType::List => "list",
        })
    }
}

impl HttpTransport {
    /// Sports available on a feed.
    #[instrument(skip(self))]
    pub async fn sports(&self, feed: Feed, lang: &str) -> Result<Value> {
        self.sports_get(format!("/sports/{}/{}", feed, segment(lang)?))
            .await
    }

    /// Countries with events for a sport.
    #[instrument(skip(self))]
    pub async fn countries(&self, sport_id: &str, feed: Feed, lang: &str) -> Result<Value> {
        self.sports_get(format!(
            "/countries/{}/{}/{}",
            segment(sport_id)?,
            feed,
            segment(lang)?
        ))
        .await
    }

    /// Tournaments for a sport in a country.
    #[instrument(skip(self))]
    pub async fn tournaments(
        &self,
        sport_id: &str,
        country_id: &str,
        feed: Feed,
        lang: &str,
    ) -> Result<Value> {
        self.sports_get(format!(
            "/tournaments/{}/{}/{}/{}",
            segment(sport_id)?,
            segment(country_id)?,
            feed,
            segment(lang)?
        ))
        .await
    }

    /// A page of events in a tournament.
    #[instrument(skip(self))]
    pub async fn events(
        &self,
        sport_id: &str,
        tournament_id: &str,
        list_type: ListType,
        page_length: u32,
        feed: Feed,
        lang: &str,
    ) -> Result<Value> {
        self.sports_get(format!(
            "/events/{}/{}/{}/{}/{}/{}",
            segment(sport_id)?,
            segment(tournament_id)?,
            list_type,
            page_length,
            feed,
            segment(lang)?
        ))
        .await
    }

    /// A single event with its markets.
    #[instrument(skip(self))]
    pub async fn event(
        &self,
        game_id: &str,
        list_type: ListType,
        feed: Feed,
        lang: &str,
    ) -> Result<Value> {
        self.sports_get(format!(
            "/event/{}/{}/{}/{}",
            segment(game_id)?,
            list_type,
            feed,
            segment(lang)?
        ))
        .await
    }

    async fn sports_get(&self, path: String) -> Result<Value> {
        let mut request = ApiRequest::get(path);
        if let Some(package) = &self.config().partner_package {
            request = request.header(PACKAGE_HEADER, package)?;
        }
        self.request(&request).await
    }
}

/// Accept `value` only if it stays one path segment once formatted.
///
/// Allowed: ASCII letters, digits, `.`, `-`, `_`, `~`; never `.` or `..`.
fn segment(value: &str) -> Result<&str> {
    if value.is_empty() {
        return Err(invalid_segment(value, "cannot be empty".to_string()));
    }
    if value == "." || value == ".." {
        return Err(invalid_segment(value, "cannot be '.' or '..'".to_string()));
    }
    if let Some(c) = value
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && !matches!(c, '.' | '-' | '_' | '~'))
    {
        return Err(invalid_segment(
            value,
            format!("contains invalid character '{}'", c),
        ));
    }

    Ok(value)
}

fn invalid_segment(value: &str, reason: String) -> gtx_core::Error {
    InvalidInputError::PathSegment {
        value: value.to_string(),
        reason,
    }
    .into()
}
