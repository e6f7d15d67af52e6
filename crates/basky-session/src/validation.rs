//! Location validation for the product-search entry point.
//!
//! `Validating → Valid | Invalid`. A location validated within the cache
//! window is accepted without a network call; otherwise the platform is asked
//! to confirm it. Terminal states only change on the next `validate` call.

use basky_core::{ConfirmedLocation, LocationSuggestion};
use basky_platforms::{PlatformError, ProductContext, QuickCommercePlatform};

use crate::cache::ValidatedLocationCache;
use crate::clock::Clock;
use crate::store::SessionStore;

pub const NO_LOCATION_MESSAGE: &str = "No location provided. Please select a location first.";

/// Shown when the platform does not deliver to a location and gave no reason.
pub const NOT_SERVICEABLE_MESSAGE: &str = "Hold tight! We would start delivering there soon";

/// A location that may be searched for products.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidLocation {
    /// Key the validation is cached under.
    pub location_key: String,
    pub session_token: Option<String>,
    /// Present when the platform was asked in this validation; `None` on a
    /// cache hit.
    pub confirmed: Option<ConfirmedLocation>,
    pub from_cache: bool,
}

impl ValidLocation {
    /// The best product-search scope this validation can offer.
    #[must_use]
    pub fn product_context(&self) -> ProductContext<'_> {
        ProductContext::best(self.confirmed.as_ref(), self.session_token.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationState {
    Validating,
    Valid(ValidLocation),
    Invalid { message: String },
}

impl ValidationState {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationState::Valid(_))
    }
}

/// Drives [`ValidationState`] for one platform.
#[derive(Debug)]
pub struct LocationValidator<P, S, C> {
    platform: P,
    cache: ValidatedLocationCache<S, C>,
    state: ValidationState,
}

impl<P, S, C> LocationValidator<P, S, C>
where
    P: QuickCommercePlatform,
    S: SessionStore,
    C: Clock,
{
    pub fn new(platform: P, cache: ValidatedLocationCache<S, C>) -> Self {
        Self {
            platform,
            cache,
            state: ValidationState::Validating,
        }
    }

    #[must_use]
    pub fn state(&self) -> &ValidationState {
        &self.state
    }

    #[must_use]
    pub fn platform(&self) -> &P {
        &self.platform
    }

    #[must_use]
    pub fn cache(&self) -> &ValidatedLocationCache<S, C> {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut ValidatedLocationCache<S, C> {
        &mut self.cache
    }

    /// Validates a free-text location, as received from a link or a previous
    /// selection.
    pub async fn validate(&mut self, location: Option<&str>) -> &ValidationState {
        self.state = ValidationState::Validating;

        let Some(location) = location.map(str::trim).filter(|l| !l.is_empty()) else {
            self.state = ValidationState::Invalid {
                message: NO_LOCATION_MESSAGE.to_owned(),
            };
            return &self.state;
        };

        if let Some(entry) = self.cache.lookup(location) {
            tracing::debug!(platform = %self.cache.platform(), location, "location validated from cache");
            self.state = ValidationState::Valid(ValidLocation {
                location_key: entry.location_key,
                session_token: entry.session_token,
                confirmed: None,
                from_cache: true,
            });
            return &self.state;
        }

        let suggestion = LocationSuggestion::from_free_text(location, self.cache.clock().now_ms());
        let result = self.platform.confirm_location(&suggestion, None).await;
        self.state = self.settle(location, None, result);
        &self.state
    }

    /// Confirms a suggestion picked from a location search and caches it
    /// under [`LocationSuggestion::location_key`] together with the search's
    /// session token.
    pub async fn confirm_suggestion(
        &mut self,
        suggestion: &LocationSuggestion,
        session_token: Option<&str>,
    ) -> &ValidationState {
        self.state = ValidationState::Validating;
        let location_key = suggestion
            .location_key(self.cache.platform())
            .trim()
            .to_owned();
        if location_key.is_empty() {
            self.state = ValidationState::Invalid {
                message: NO_LOCATION_MESSAGE.to_owned(),
            };
            return &self.state;
        }

        let result = self
            .platform
            .confirm_location(suggestion, session_token)
            .await;
        self.state = self.settle(&location_key, session_token, result);
        &self.state
    }

    fn settle(
        &mut self,
        location_key: &str,
        session_token: Option<&str>,
        result: Result<ConfirmedLocation, PlatformError>,
    ) -> ValidationState {
        let platform = self.cache.platform();
        match result {
            Ok(confirmed) if confirmed.is_serviceable => {
                let session_token = session_token.map(str::to_owned);
                if let Err(e) = self.cache.record(location_key, session_token.clone()) {
                    tracing::warn!(%platform, location = location_key, error = %e, "could not cache validated location");
                }
                tracing::info!(%platform, location = location_key, "location is serviceable");
                ValidationState::Valid(ValidLocation {
                    location_key: location_key.to_owned(),
                    session_token,
                    confirmed: Some(confirmed),
                    from_cache: false,
                })
            }
            Ok(_) => {
                tracing::info!(%platform, location = location_key, "location is not serviceable");
                ValidationState::Invalid {
                    message: NOT_SERVICEABLE_MESSAGE.to_owned(),
                }
            }
            Err(e) => {
                tracing::info!(%platform, location = location_key, error = %e, "location validation failed");
                let message = match e.upstream_message() {
                    Some(message) => message.to_owned(),
                    None if e.is_transport() => e.user_message(),
                    None => NOT_SERVICEABLE_MESSAGE.to_owned(),
                };
                ValidationState::Invalid { message }
            }
        }
    }
}

#[cfg(test)]
#[path = "validation_test.rs"]
mod tests;
