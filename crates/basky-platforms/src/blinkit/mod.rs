//! Blinkit, reached through the basky proxy API.

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

use self::types::{
    BlinkitConfirmResponse, BlinkitLocationSearchResponse, BlinkitProductSearchResponse,
};

const SEARCH_LOCATIONS_PATH: &str = "/location/search";
const CONFIRM_LOCATION_PATH: &str = "/location/confirm";
const SEARCH_PRODUCTS_PATH: &str = "/products/search";

/// Shown when a product search has neither a confirmed location nor a
/// session token to scope it.
pub const MISSING_LOCATION_MESSAGE: &str = "Location data is required to search products";

/// Blinkit adapter.
///
/// Location searches are biased towards a fixed origin; the session token a
/// search returns must be echoed on confirm.
#[derive(Debug, Clone)]
pub struct BlinkitClient {
    api: ApiClient,
    origin_lat: String,
    origin_lng: String,
}

impl BlinkitClient {
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the base URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(
        base_url: &str,
        timeout_secs: Option<u64>,
        user_agent: &str,
        origin_lat: &str,
        origin_lng: &str,
    ) -> Result<Self, PlatformError> {
        Ok(Self {
            api: ApiClient::new(Platform::Blinkit, base_url, timeout_secs, user_agent)?,
            origin_lat: origin_lat.to_owned(),
            origin_lng: origin_lng.to_owned(),
        })
    }

    /// # Errors
    ///
    /// See [`BlinkitClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, PlatformError> {
        Self::new(
            &config.blinkit_base_url,
            config.request_timeout_secs,
            &config.user_agent,
            &config.blinkit_origin_lat,
            &config.blinkit_origin_lng,
        )
    }

    fn upstream(operation: Operation, message: Option<String>) -> PlatformError {
        PlatformError::Upstream {
            platform: Platform::Blinkit,
            operation,
            message,
        }
    }
}

impl QuickCommercePlatform for BlinkitClient {
    fn platform(&self) -> Platform {
        Platform::Blinkit
    }

    async fn search_locations(&self, query: &str) -> Result<LocationSearch, PlatformError> {
        let query = location_query(query)?;
        let request = json!({
            "query": query,
            "lat": self.origin_lat,
            "lng": self.origin_lng,
        });
        let body = self.api.post_json(SEARCH_LOCATIONS_PATH, &request).await?;
        let response: BlinkitLocationSearchResponse =
            from_body("blinkit location search", body)?;

        let data = match response.data {
            Some(data) if response.success && data.ui_data.is_some() => data,
            _ => return Err(Self::upstream(Operation::SearchLocations, response.error)),
        };

        let search = normalize::normalize_location_search(data);
        tracing::debug!(
            platform = %Platform::Blinkit,
            query,
            suggestions = search.suggestions.len(),
            has_session_token = search.session_token.is_some(),
            "location search complete"
        );
        Ok(search)
    }

    async fn confirm_location(
        &self,
        suggestion: &LocationSuggestion,
        session_token: Option<&str>,
    ) -> Result<ConfirmedLocation, PlatformError> {
        let request = json!({
            "place_id": suggestion.place_id().unwrap_or_default(),
            "title": suggestion.title,
            "description": suggestion.subtitle,
            "session_token": session_token.unwrap_or_default(),
        });
        let body = self.api.post_json(CONFIRM_LOCATION_PATH, &request).await?;
        let response: BlinkitConfirmResponse = from_body("blinkit confirm location", body)?;

        let location_data = match response.location_data {
            Some(data) if response.success && data.is_object() => data,
            _ => return Err(Self::upstream(Operation::ConfirmLocation, response.error)),
        };

        let confirmed = normalize::normalize_location_data(suggestion, location_data);
        tracing::info!(
            platform = %Platform::Blinkit,
            location = %confirmed.display_title,
            serviceable = confirmed.is_serviceable,
            available = confirmed.is_available,
            "location confirmed"
        );
        Ok(confirmed)
    }

    async fn search_products(
        &self,
        term: &str,
        context: ProductContext<'_>,
    ) -> Result<ProductPage, PlatformError> {
        let term = product_term(term)?;
        let request = match context {
            ProductContext::Location(location) => json!({
                "query": term,
                "location_data": location.raw_location_info,
            }),
            ProductContext::SessionToken(token) => json!({
                "query": term,
                "sessionToken": token,
            }),
            ProductContext::None => {
                return Err(PlatformError::InvalidQuery(
                    MISSING_LOCATION_MESSAGE.to_owned(),
                ));
            }
        };
        let body = self.api.post_json(SEARCH_PRODUCTS_PATH, &request).await?;
        let response: BlinkitProductSearchResponse = from_body("blinkit product search", body)?;

        if response.success == Some(false) {
            return Err(Self::upstream(Operation::SearchProducts, response.error));
        }

        let page = normalize::normalize_products(response.products.as_deref().unwrap_or_default());
        tracing::info!(
            platform = %Platform::Blinkit,
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
