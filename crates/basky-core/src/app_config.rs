use std::path::PathBuf;

/// Runtime configuration for the platform adapters and the CLI.
///
/// Base URLs default to the hosted aggregation backends; every value can be
/// overridden through `BASKY_*` environment variables (see
/// [`crate::config::load_app_config`]).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Root of the Zepto backend, without the `/api/zepto` prefix.
    pub zepto_base_url: String,
    /// Root of the Blinkit backend, including its `/api` prefix.
    pub blinkit_base_url: String,
    /// Whole-request timeout. `None` leaves the HTTP client default (no timeout).
    pub request_timeout_secs: Option<u64>,
    pub user_agent: String,
    /// Coordinates Blinkit uses to bias location autocomplete.
    pub blinkit_origin_lat: String,
    pub blinkit_origin_lng: String,
    /// File backing the CLI's validated-location session store.
    pub session_path: PathBuf,
}
