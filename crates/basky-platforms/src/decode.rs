//! Tagged-union decoding of individual upstream items.
//!
//! Each platform decoder turns one raw JSON item into a [`Decoded`] value
//! instead of returning `Result` or panicking, so the page builder can handle
//! every shape with one exhaustive `match`.

use basky_core::{LocationSuggestion, NormalizedProduct, Platform, ProductPage};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::PlatformError;

/// Outcome of decoding one upstream item.
#[derive(Debug)]
pub enum Decoded<T> {
    /// The item matched a known shape.
    Parsed(T),
    /// The item is well-formed but not something we render (ads, banners,
    /// widgets without a product payload).
    Skipped,
    /// The item looked like a product but could not be read.
    Unparsable { reason: String },
}

impl<T> Decoded<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Decoded<U> {
        match self {
            Decoded::Parsed(value) => Decoded::Parsed(f(value)),
            Decoded::Skipped => Decoded::Skipped,
            Decoded::Unparsable { reason } => Decoded::Unparsable { reason },
        }
    }
}

/// Collects decoded products into a [`ProductPage`].
///
/// Unparsable items are dropped with a warning and counted; skipped items are
/// ignored silently.
pub fn collect_page<I>(platform: Platform, items: I) -> ProductPage
where
    I: IntoIterator<Item = Decoded<NormalizedProduct>>,
{
    let mut page = ProductPage::default();
    for (index, item) in items.into_iter().enumerate() {
        match item {
            Decoded::Parsed(product) => page.products.push(product),
            Decoded::Skipped => {
                tracing::trace!(%platform, index, "skipping non-product item");
            }
            Decoded::Unparsable { reason } => {
                tracing::warn!(%platform, index, %reason, "dropping unparsable product item");
                page.dropped += 1;
            }
        }
    }
    page
}

/// Collects decoded location suggestions. A malformed suggestion is dropped
/// with a warning and does not fail the search.
pub fn collect_suggestions<I>(platform: Platform, items: I) -> Vec<LocationSuggestion>
where
    I: IntoIterator<Item = Decoded<LocationSuggestion>>,
{
    let mut suggestions = Vec::new();
    for (index, item) in items.into_iter().enumerate() {
        match item {
            Decoded::Parsed(suggestion) => suggestions.push(suggestion),
            Decoded::Skipped => {
                tracing::trace!(%platform, index, "skipping empty suggestion");
            }
            Decoded::Unparsable { reason } => {
                tracing::warn!(%platform, index, %reason, "dropping unparsable location suggestion");
            }
        }
    }
    suggestions
}

/// Decodes one loosely typed item, reporting non-objects and shape
/// mismatches as [`Decoded::Unparsable`].
pub fn decode_object<T: DeserializeOwned>(item: &Value) -> Decoded<T> {
    if !item.is_object() {
        return Decoded::Unparsable {
            reason: format!("expected an object, got {}", json_kind(item)),
        };
    }
    match serde_json::from_value::<T>(item.clone()) {
        Ok(value) => Decoded::Parsed(value),
        Err(e) => Decoded::Unparsable {
            reason: e.to_string(),
        },
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A JSON value that upstreams send as either a string or a number
/// (ids, merchant ids, group ids).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

impl Scalar {
    /// String form; `None` for an empty string.
    #[must_use]
    pub fn into_non_empty_string(self) -> Option<String> {
        match self {
            Scalar::Text(text) => Some(text).filter(|t| !t.trim().is_empty()),
            Scalar::Number(number) => Some(number.to_string()),
        }
    }

    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Scalar::Text(text) => serde_json::Value::String(text.clone()),
            Scalar::Number(number) => serde_json::Value::Number(number.clone()),
        }
    }
}

/// Rounds a non-negative float (paise, percentages, counts) to `u64`.
///
/// Negative, NaN and infinite values become 0.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn round_non_negative(amount: f64) -> u64 {
    if amount.is_finite() && amount > 0.0 {
        amount.round() as u64
    } else {
        0
    }
}

pub fn value_as_string(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string).or_else(|| {
        if value.is_number() {
            Some(value.to_string())
        } else {
            None
        }
    })
}

pub fn value_as_f64(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|raw| raw.trim().parse::<f64>().ok()))
}

/// Deserializes a response body already parsed as JSON into its typed shape.
///
/// # Errors
///
/// Returns [`PlatformError::Deserialize`] when the body does not match `T`.
pub fn from_body<T: DeserializeOwned>(context: &str, body: Value) -> Result<T, PlatformError> {
    serde_json::from_value(body).map_err(|e| PlatformError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}

/// Non-empty trimmed string, or `None`.
#[must_use]
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use basky_core::Price;
    use serde_json::json;

    fn product(id: &str) -> NormalizedProduct {
        NormalizedProduct {
            id: id.to_owned(),
            platform: Platform::Zepto,
            name: String::new(),
            brand: String::new(),
            pack_size: String::new(),
            image_url: None,
            price: Price::default(),
            rating: None,
            out_of_stock: false,
            platform_specific: serde_json::Map::new(),
        }
    }

    #[test]
    fn collect_page_counts_only_unparsable_as_dropped() {
        let page = collect_page(
            Platform::Zepto,
            vec![
                Decoded::Parsed(product("a")),
                Decoded::Skipped,
                Decoded::Unparsable {
                    reason: "bad".to_owned(),
                },
                Decoded::Parsed(product("b")),
            ],
        );
        assert_eq!(page.products.len(), 2);
        assert_eq!(page.dropped, 1);
        assert_eq!(page.products[1].id, "b");
    }

    #[test]
    fn scalar_accepts_string_or_number() {
        let s: Scalar = serde_json::from_value(json!("abc")).unwrap();
        assert_eq!(s.into_non_empty_string().as_deref(), Some("abc"));
        let n: Scalar = serde_json::from_value(json!(12345)).unwrap();
        assert_eq!(n.into_non_empty_string().as_deref(), Some("12345"));
        let blank: Scalar = serde_json::from_value(json!("  ")).unwrap();
        assert!(blank.into_non_empty_string().is_none());
    }

    #[test]
    fn round_non_negative_clamps_garbage_to_zero() {
        assert_eq!(round_non_negative(3500.0), 3500);
        assert_eq!(round_non_negative(3499.6), 3500);
        assert_eq!(round_non_negative(-10.0), 0);
        assert_eq!(round_non_negative(f64::NAN), 0);
    }

    #[test]
    fn value_as_f64_reads_numeric_strings() {
        assert_eq!(value_as_f64(&json!(28.46)), Some(28.46));
        assert_eq!(value_as_f64(&json!(" 77.06 ")), Some(77.06));
        assert_eq!(value_as_f64(&json!("north")), None);
        assert_eq!(value_as_f64(&json!(null)), None);
    }

    #[test]
    fn from_body_reports_context() {
        #[derive(Debug, Deserialize)]
        struct Shape {
            #[allow(dead_code)]
            success: bool,
        }
        let err = from_body::<Shape>("zepto /x", json!({"success": "yes"})).unwrap_err();
        assert!(err.to_string().contains("zepto /x"), "got: {err}");
    }

    #[test]
    fn map_preserves_variant() {
        let d: Decoded<u32> = Decoded::Parsed(2);
        assert!(matches!(d.map(|v| v * 2), Decoded::Parsed(4)));
        let d: Decoded<u32> = Decoded::Unparsable {
            reason: "x".to_owned(),
        };
        assert!(matches!(d.map(|v| v * 2), Decoded::Unparsable { .. }));
    }
}
