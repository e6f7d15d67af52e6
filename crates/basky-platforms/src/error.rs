use basky_core::Platform;
use thiserror::Error;

/// Message shown for any transport-level failure.
pub const CONNECT_FAILURE_MESSAGE: &str = "Failed to connect to the API";

/// Message shown when a product search comes back empty.
pub const NO_PRODUCTS_MESSAGE: &str = "No products found for your search";

/// Which adapter call an upstream failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    SearchLocations,
    ConfirmLocation,
    SearchProducts,
}

impl Operation {
    /// Friendly message used when the upstream failure carries no text.
    #[must_use]
    pub fn fallback_message(self) -> &'static str {
        match self {
            Operation::SearchLocations => "Failed to search locations",
            Operation::ConfirmLocation => "Location confirmation failed",
            Operation::SearchProducts => "No products found",
        }
    }

    /// `message` when it has content, otherwise [`Self::fallback_message`].
    #[must_use]
    pub fn failure_text(self, message: Option<&str>) -> &str {
        message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(self.fallback_message())
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::SearchLocations => write!(f, "location search"),
            Operation::ConfirmLocation => write!(f, "location confirm"),
            Operation::SearchProducts => write!(f, "product search"),
        }
    }
}

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    /// Rejected before any network call was made.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The platform answered, but reported failure (e.g. not serviceable).
    #[error("{platform} {operation} failed: {}", .operation.failure_text(.message.as_deref()))]
    Upstream {
        platform: Platform,
        operation: Operation,
        message: Option<String>,
    },

    #[error("no products found for \"{term}\"")]
    NoResults { term: String },
}

impl PlatformError {
    /// `true` for failures below the platform's logical API: network errors,
    /// non-2xx statuses and unreadable bodies.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            PlatformError::Http(_)
                | PlatformError::Deserialize { .. }
                | PlatformError::UnexpectedStatus { .. }
        )
    }

    /// The platform's own failure text, when it sent one.
    #[must_use]
    pub fn upstream_message(&self) -> Option<&str> {
        match self {
            PlatformError::Upstream {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message.as_str()),
            _ => None,
        }
    }

    /// Text suitable for showing to an end user.
    ///
    /// Transport failures collapse to a generic connect message; upstream
    /// failures are surfaced verbatim, or with a per-operation fallback.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            PlatformError::Http(_)
            | PlatformError::Deserialize { .. }
            | PlatformError::UnexpectedStatus { .. } => CONNECT_FAILURE_MESSAGE.to_string(),
            PlatformError::InvalidBaseUrl { .. } => {
                format!("{CONNECT_FAILURE_MESSAGE} (misconfigured base URL)")
            }
            PlatformError::InvalidQuery(reason) => reason.clone(),
            PlatformError::Upstream {
                operation, message, ..
            } => operation.failure_text(message.as_deref()).to_string(),
            PlatformError::NoResults { .. } => NO_PRODUCTS_MESSAGE.to_string(),
        }
    }
}
