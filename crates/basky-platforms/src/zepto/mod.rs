//! Zepto, reached through the basky proxy API.

pub mod normalize;
pub mod types;

use basky_core::{
    AppConfig, ConfirmedLocation, LocationSearch, LocationSuggestion, Platform, ProductPage,
};
use serde_json::json;

use crate::adapter::{ProductContext, QuickCommercePlatform};
use crate::decode::from_body;
use crate::error::{Operation, PlatformError};
use crate::http::ApiClient;
use crate::query::{location_query, product_term};

use self::types::{ZeptoLocationSearchResponse, ZeptoProductSearchResponse, ZeptoSelectResponse};

const SEARCH_LOCATIONS_PATH: &str = "/api/zepto/search-locations";
const SELECT_LOCATION_PATH: &str = "/api/zepto/select-location";
const SEARCH_PRODUCTS_PATH: &str = "/api/zepto/search-products";

/// Zepto adapter.
///
/// Zepto keeps the selected location server-side, so product searches carry
/// only the product name and ignore any [`ProductContext`].
#[derive(Debug, Clone)]
pub struct ZeptoClient {
    api: ApiClient,
}

impl ZeptoClient {
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the base URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(
        base_url: &str,
        timeout_secs: Option<u64>,
        user_agent: &str,
    ) -> Result<Self, PlatformError> {
        Ok(Self {
            api: ApiClient::new(Platform::Zepto, base_url, timeout_secs, user_agent)?,
        })
    }

    /// # Errors
    ///
    /// See [`ZeptoClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, PlatformError> {
        Self::new(
            &config.zepto_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    fn upstream(operation: Operation, message: Option<String>) -> PlatformError {
        PlatformError::Upstream {
            platform: Platform::Zepto,
            operation,
            message,
        }
    }
}

impl QuickCommercePlatform for ZeptoClient {
    fn platform(&self) -> Platform {
        Platform::Zepto
    }

    async fn search_locations(&self, query: &str) -> Result<LocationSearch, PlatformError> {
        let query = location_query(query)?;
        let body = self
            .api
            .post_json(SEARCH_LOCATIONS_PATH, &json!({ "searchTerm": query }))
            .await?;
        let response: ZeptoLocationSearchResponse =
            from_body("zepto location search", body)?;

        if !response.success {
            return Err(Self::upstream(Operation::SearchLocations, response.error));
        }

        let search = normalize::normalize_location_search(&response);
        tracing::debug!(
            platform = %Platform::Zepto,
            query,
            suggestions = search.suggestions.len(),
            "location search complete"
        );
        Ok(search)
    }

    async fn confirm_location(
        &self,
        suggestion: &LocationSuggestion,
        _session_token: Option<&str>,
    ) -> Result<ConfirmedLocation, PlatformError> {
        let request = json!({
            "place_id": suggestion.place_id().unwrap_or_default(),
            "description": suggestion.description(),
        });
        let body = self.api.post_json(SELECT_LOCATION_PATH, &request).await?;
        let response: ZeptoSelectResponse = from_body("zepto select location", body)?;

        let selected = response
            .selected_location
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty());
        if !response.success || !selected {
            tracing::info!(
                platform = %Platform::Zepto,
                location = %suggestion.description(),
                error = ?response.error,
                "location not selectable"
            );
            return Err(Self::upstream(Operation::ConfirmLocation, response.error));
        }

        Ok(normalize::normalize_selected_location(suggestion, response))
    }

    async fn search_products(
        &self,
        term: &str,
        _context: ProductContext<'_>,
    ) -> Result<ProductPage, PlatformError> {
        let term = product_term(term)?;
        let body = self
            .api
            .post_json(SEARCH_PRODUCTS_PATH, &json!({ "productName": term }))
            .await?;
        let response: ZeptoProductSearchResponse = from_body("zepto product search", body)?;

        if !response.success {
            return Err(Self::upstream(Operation::SearchProducts, response.error));
        }

        let page = normalize::normalize_search_response(&response);
        tracing::info!(
            platform = %Platform::Zepto,
            term,
            products = page.products.len(),
            dropped = page.dropped,
            "product search complete"
        );
        if page.products.is_empty() {
            return Err(PlatformError::NoResults {
                term: term.to_owned(),
            });
        }
        Ok(page)
    }
}
