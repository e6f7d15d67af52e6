//! JSON-over-HTTP client shared by the platform adapters.

use std::time::Duration;

use basky_core::Platform;
use reqwest::{Client, Url};
use serde::Serialize;

use crate::error::PlatformError;

/// Thin `reqwest` wrapper bound to one platform's base URL.
///
/// Every call is a single attempt: non-2xx statuses become
/// [`PlatformError::UnexpectedStatus`], network failures
/// [`PlatformError::Http`], and unreadable bodies
/// [`PlatformError::Deserialize`]. Nothing is retried.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    platform: Platform,
    /// Base URL without a trailing slash; endpoint paths are appended verbatim
    /// so a base that carries a path prefix (`.../api`) keeps it.
    base_url: String,
}

impl ApiClient {
    /// Creates a client for `platform` rooted at `base_url`.
    ///
    /// `timeout_secs = None` leaves `reqwest`'s default (no whole-request
    /// timeout) in place.
    ///
    /// # Errors
    ///
    /// - [`PlatformError::InvalidBaseUrl`] if `base_url` does not parse.
    /// - [`PlatformError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        platform: Platform,
        base_url: &str,
        timeout_secs: Option<u64>,
        user_agent: &str,
    ) -> Result<Self, PlatformError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        Url::parse(trimmed).map_err(|e| PlatformError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent);
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            platform,
            base_url: trimmed.to_owned(),
        })
    }

    #[must_use]
    pub fn platform(&self) -> Platform {
        self.platform
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the absolute URL for `path` (which must start with `/`).
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::InvalidBaseUrl`] if the joined string does not
    /// parse as a URL.
    pub(crate) fn endpoint_url(&self, path: &str) -> Result<Url, PlatformError> {
        let joined = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        Url::parse(&joined).map_err(|e| PlatformError::InvalidBaseUrl {
            base_url: self.base_url.clone(),
            reason: format!("cannot join path \"{path}\": {e}"),
        })
    }

    /// POSTs `body` as JSON to `path` and returns the parsed JSON response.
    ///
    /// # Errors
    ///
    /// - [`PlatformError::Http`] on network or TLS failure.
    /// - [`PlatformError::UnexpectedStatus`] for any non-2xx status.
    /// - [`PlatformError::Deserialize`] if the body is not valid JSON.
    pub async fn post_json<B>(&self, path: &str, body: &B) -> Result<serde_json::Value, PlatformError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let url = self.endpoint_url(path)?;
        tracing::debug!(platform = %self.platform, %url, "POST");

        let response = self
            .client
            .post(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(platform = %self.platform, %url, error = %e, "request failed");
                PlatformError::Http(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                platform = %self.platform,
                %url,
                status = status.as_u16(),
                "non-success HTTP status"
            );
            return Err(PlatformError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| PlatformError::Deserialize {
            context: format!("{} {path}", self.platform),
            source: e,
        })
    }
}
