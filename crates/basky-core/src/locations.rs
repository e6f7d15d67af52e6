use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::platform::Platform;

/// One autocomplete candidate returned by a platform's location search.
///
/// Ephemeral: only lives as long as the search that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSuggestion {
    pub title: String,
    pub subtitle: String,
    /// Platform-owned identifiers (`place_id`, `description`, ...) that must
    /// be echoed back when the suggestion is confirmed.
    #[serde(default)]
    pub raw_meta: Map<String, Value>,
}

impl LocationSuggestion {
    /// Builds a suggestion directly from a free-text location string, the
    /// way the product page re-validates a location it received by link.
    ///
    /// The title is everything before the first comma and the subtitle is
    /// the remainder. `place_id` is synthesized as `direct_<now_ms>`.
    #[must_use]
    pub fn from_free_text(location: &str, now_ms: i64) -> Self {
        let location = location.trim();
        let (title, subtitle) = match location.split_once(',') {
            Some((head, rest)) => (head.trim(), rest.trim()),
            None => (location, ""),
        };

        let mut raw_meta = Map::new();
        raw_meta.insert(
            "place_id".to_string(),
            Value::String(format!("direct_{now_ms}")),
        );
        raw_meta.insert(
            "description".to_string(),
            Value::String(location.to_string()),
        );

        Self {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            raw_meta,
        }
    }

    /// The platform place identifier carried in `raw_meta`, if any.
    #[must_use]
    pub fn place_id(&self) -> Option<&str> {
        self.raw_meta.get("place_id").and_then(Value::as_str)
    }

    /// Full human-readable description: `raw_meta.description` when present,
    /// otherwise `title, subtitle`.
    #[must_use]
    pub fn description(&self) -> String {
        if let Some(description) = self
            .raw_meta
            .get("description")
            .and_then(Value::as_str)
            .filter(|d| !d.trim().is_empty())
        {
            return description.to_string();
        }
        match (self.title.is_empty(), self.subtitle.is_empty()) {
            (false, false) => format!("{}, {}", self.title, self.subtitle),
            (false, true) => self.title.clone(),
            (true, _) => self.subtitle.clone(),
        }
    }

    /// Key a confirmed pick is cached under.
    ///
    /// Zepto uses the full description, the same string a product link
    /// carries as its location. Blinkit uses the title, falling back to the
    /// subtitle when the title is blank.
    #[must_use]
    pub fn location_key(&self, platform: Platform) -> String {
        match platform {
            Platform::Zepto => self.description(),
            Platform::Blinkit if self.title.trim().is_empty() => self.subtitle.clone(),
            Platform::Blinkit => self.title.clone(),
        }
    }
}

/// Result of a location search: suggestions plus the upstream session token
/// to echo back on confirm (Blinkit only).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationSearch {
    pub suggestions: Vec<LocationSuggestion>,
    pub session_token: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A location the platform has answered a confirm/select call for.
///
/// Created once per confirm and never mutated; `is_serviceable` gates the
/// product search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmedLocation {
    pub display_title: String,
    pub display_description: String,
    pub is_serviceable: bool,
    pub is_available: bool,
    pub coordinates: Option<Coordinates>,
    /// The upstream location payload as received. Blinkit product searches
    /// send it back verbatim as `location_data`.
    #[serde(default)]
    pub raw_location_info: Value,
}

impl ConfirmedLocation {
    /// `true` when the platform both delivers there and currently has slots.
    #[must_use]
    pub fn is_deliverable(&self) -> bool {
        self.is_serviceable && self.is_available
    }
}
