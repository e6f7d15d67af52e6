//! Input guards applied before any network call.

use crate::error::PlatformError;

/// Location searches need more than this many characters.
pub const MIN_LOCATION_QUERY_CHARS: usize = 3;

/// Trims a location query and checks it is long enough to be worth an
/// upstream autocomplete call.
///
/// # Errors
///
/// Returns [`PlatformError::InvalidQuery`] for blank or too-short queries.
pub fn location_query(raw: &str) -> Result<&str, PlatformError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PlatformError::InvalidQuery(
            "Please enter a search term".to_owned(),
        ));
    }
    if trimmed.chars().count() < MIN_LOCATION_QUERY_CHARS {
        return Err(PlatformError::InvalidQuery(format!(
            "Location search needs at least {MIN_LOCATION_QUERY_CHARS} characters"
        )));
    }
    Ok(trimmed)
}

/// Trims a product search term and rejects it when blank.
///
/// # Errors
///
/// Returns [`PlatformError::InvalidQuery`] for a blank term.
pub fn product_term(raw: &str) -> Result<&str, PlatformError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PlatformError::InvalidQuery(
            "Please enter a product to search for".to_owned(),
        ));
    }
    Ok(trimmed)
}
