//! The operations every quick-commerce platform exposes.

use std::future::Future;

use basky_core::{ConfirmedLocation, LocationSearch, LocationSuggestion, Platform, ProductPage};

use crate::error::PlatformError;

/// What a product search is scoped to.
///
/// Zepto scopes by the location last selected server-side and ignores this;
/// Blinkit needs either the confirmed location payload or the session token.
#[derive(Debug, Clone, Copy)]
pub enum ProductContext<'a> {
    None,
    Location(&'a ConfirmedLocation),
    SessionToken(&'a str),
}

impl<'a> ProductContext<'a> {
    /// Picks the richest context available: the confirmed location, then a
    /// non-blank session token, then nothing.
    #[must_use]
    pub fn best(location: Option<&'a ConfirmedLocation>, session_token: Option<&'a str>) -> Self {
        match (location, session_token) {
            (Some(location), _) => ProductContext::Location(location),
            (None, Some(token)) if !token.trim().is_empty() => ProductContext::SessionToken(token),
            _ => ProductContext::None,
        }
    }
}

/// Location search, location confirm and product search for one platform.
///
/// Every call is a single attempt. Failures come back as [`PlatformError`];
/// implementations never panic on unexpected payloads.
pub trait QuickCommercePlatform: Send + Sync {
    fn platform(&self) -> Platform;

    /// Autocomplete suggestions for `query`.
    ///
    /// Queries shorter than
    /// [`MIN_LOCATION_QUERY_CHARS`](crate::query::MIN_LOCATION_QUERY_CHARS)
    /// are rejected before any network call.
    fn search_locations(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<LocationSearch, PlatformError>> + Send;

    /// Confirms `suggestion` with the platform, echoing back the session token
    /// from the search that produced it when there was one.
    fn confirm_location(
        &self,
        suggestion: &LocationSuggestion,
        session_token: Option<&str>,
    ) -> impl Future<Output = Result<ConfirmedLocation, PlatformError>> + Send;

    /// Searches products for `term`. An empty result is
    /// [`PlatformError::NoResults`], not an empty page.
    fn search_products(
        &self,
        term: &str,
        context: ProductContext<'_>,
    ) -> impl Future<Output = Result<ProductPage, PlatformError>> + Send;
}
