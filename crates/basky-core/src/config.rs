use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_ZEPTO_BASE_URL: &str = "https://basky-api-351464446445.us-central1.run.app";
pub const DEFAULT_BLINKIT_BASE_URL: &str =
    "https://basky-api-rev-351464446445.asia-south1.run.app/api";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but its value is invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but its value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_f64 = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<f64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })?;
        Ok(raw.trim().to_string())
    };

    let parse_url = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        let trimmed = raw.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("\"{raw}\" is not an http(s) URL"),
            });
        }
        Ok(trimmed.to_string())
    };

    let log_level = or_default("BASKY_LOG_LEVEL", "info");

    let zepto_base_url = parse_url("BASKY_ZEPTO_BASE_URL", DEFAULT_ZEPTO_BASE_URL)?;
    let blinkit_base_url = parse_url("BASKY_BLINKIT_BASE_URL", DEFAULT_BLINKIT_BASE_URL)?;

    let request_timeout_secs = match lookup("BASKY_REQUEST_TIMEOUT_SECS") {
        Ok(raw) if !raw.trim().is_empty() => {
            Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|e| ConfigError::InvalidEnvVar {
                        var: "BASKY_REQUEST_TIMEOUT_SECS".to_string(),
                        reason: e.to_string(),
                    })?,
            )
        }
        _ => None,
    };

    let user_agent = or_default("BASKY_USER_AGENT", "basky/0.1 (quick-commerce-search)");
    let blinkit_origin_lat = parse_f64("BASKY_BLINKIT_ORIGIN_LAT", "28.4652382")?;
    let blinkit_origin_lng = parse_f64("BASKY_BLINKIT_ORIGIN_LNG", "77.0615957")?;

    let session_path = lookup("BASKY_SESSION_PATH").map_or_else(
        |_| std::env::temp_dir().join("basky-session.json"),
        PathBuf::from,
    );

    Ok(AppConfig {
        log_level,
        zepto_base_url,
        blinkit_base_url,
        request_timeout_secs,
        user_agent,
        blinkit_origin_lat,
        blinkit_origin_lng,
        session_path,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
