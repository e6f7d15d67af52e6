//! Normalization from Blinkit proxy payloads to the shared location and
//! product shapes.

use basky_core::{
    ConfirmedLocation, Coordinates, LocationSearch, LocationSuggestion, NormalizedProduct,
    Platform, Price, ProductPage, Rating,
};
use serde_json::{json, Map, Value};

use crate::decode::{
    collect_page, collect_suggestions, decode_object, non_empty, round_non_negative, value_as_f64,
    Decoded,
};

use super::types::{BlinkitLocationSearchData, BlinkitProduct, BlinkitSuggestion};

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

/// Maps one suggestion. `meta` becomes `raw_meta`; the left image URL is
/// kept there as `left_image_url`.
#[must_use]
pub fn normalize_suggestion(suggestion: BlinkitSuggestion) -> LocationSuggestion {
    let title = non_empty(suggestion.title.and_then(|t| t.text)).unwrap_or_default();
    let subtitle = non_empty(suggestion.subtitle.and_then(|t| t.text)).unwrap_or_default();
    let mut raw_meta = suggestion.meta.unwrap_or_default();
    if let Some(url) = suggestion
        .left_image
        .as_ref()
        .and_then(|image| image.url())
        .filter(|url| !url.trim().is_empty())
    {
        raw_meta.insert("left_image_url".to_string(), Value::String(url.to_string()));
    }

    LocationSuggestion {
        title,
        subtitle,
        raw_meta,
    }
}

/// Builds a [`LocationSearch`] from the `data` block of a successful search.
#[must_use]
pub fn normalize_location_search(data: BlinkitLocationSearchData) -> LocationSearch {
    let suggestions = data
        .ui_data
        .and_then(|ui| ui.suggestions)
        .unwrap_or_default();
    let suggestions = collect_suggestions(
        Platform::Blinkit,
        suggestions.iter().map(|item| decode_object(item).map(normalize_suggestion)),
    );
    let session_token = non_empty(data.postback_query_params.and_then(|p| p.session_token));

    LocationSearch {
        suggestions,
        session_token,
    }
}

/// Reads a confirmed location out of `locationData`.
///
/// Display text falls back to the confirmed suggestion when the platform
/// omits it. The payload itself is kept as `raw_location_info`.
#[must_use]
pub fn normalize_location_data(
    suggestion: &LocationSuggestion,
    location_data: Value,
) -> ConfirmedLocation {
    let address = location_data.get("display_address");
    let address_text = |key: &str| {
        address
            .and_then(|a| a.get(key))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    let display_title = address_text("title").unwrap_or_else(|| suggestion.title.clone());
    let display_description = address_text("description")
        .or_else(|| address_text("address_line"))
        .unwrap_or_else(|| suggestion.subtitle.clone());

    let flag = |key: &str| {
        location_data
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    };
    let is_serviceable = flag("is_serviceable");
    let is_available = flag("is_available");

    let coordinates = location_data.get("coordinate").and_then(|c| {
        let lat = c.get("lat").and_then(value_as_f64)?;
        let lng = c
            .get("lon")
            .or_else(|| c.get("lng"))
            .and_then(value_as_f64)?;
        Some(Coordinates { lat, lng })
    });

    ConfirmedLocation {
        display_title,
        display_description,
        is_serviceable,
        is_available,
        coordinates,
        raw_location_info: location_data,
    }
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// Decodes one product item. Anything that is not a JSON object, or an object
/// whose fields have the wrong types, is unparsable.
#[must_use]
pub fn decode_item(item: &Value) -> Decoded<BlinkitProduct> {
    decode_object(item)
}

/// Normalizes a decoded product. Never fails.
///
/// Prices are parsed out of display strings into paise; MRP defaults to the
/// selling price. A product with no id gets a random one so cards stay
/// distinguishable.
#[must_use]
pub fn normalize_product(product: BlinkitProduct) -> NormalizedProduct {
    let id = product
        .id
        .clone()
        .and_then(|v| v.into_non_empty_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let selling_price = product
        .price
        .as_ref()
        .and_then(|p| p.paise())
        .unwrap_or(0);
    let mrp = product.mrp.as_ref().and_then(|p| p.paise());
    let price = Price::from_selling_and_mrp(selling_price, mrp);

    let rating = product.rating.as_ref().map(|r| Rating {
        average: r.average_rating.filter(|a| a.is_finite()).unwrap_or(0.0),
        count: r.total_ratings.map_or(0, round_non_negative),
    });

    let inventory = product.inventory.map(round_non_negative);
    let out_of_stock = !product.available.unwrap_or(false) || inventory == Some(0);

    let mut platform_specific = Map::new();
    platform_specific.insert("variant".to_string(), json!(product.variant));
    platform_specific.insert("inventory".to_string(), json!(inventory));
    platform_specific.insert("available".to_string(), json!(product.available));
    platform_specific.insert("offer_tag".to_string(), json!(product.offer_tag));
    platform_specific.insert(
        "merchant_id".to_string(),
        product.merchant_id.as_ref().map_or(Value::Null, |v| v.to_json()),
    );
    platform_specific.insert(
        "group_id".to_string(),
        product.group_id.as_ref().map_or(Value::Null, |v| v.to_json()),
    );
    platform_specific.insert("platform".to_string(), json!(product.platform));

    NormalizedProduct {
        id,
        platform: Platform::Blinkit,
        name: non_empty(product.name).unwrap_or_default(),
        brand: non_empty(product.brand).unwrap_or_default(),
        pack_size: non_empty(product.variant)
            .or_else(|| non_empty(product.pack_size))
            .unwrap_or_default(),
        image_url: non_empty(product.image),
        price,
        rating,
        out_of_stock,
        platform_specific,
    }
}

/// Normalizes a product list.
#[must_use]
pub fn normalize_products(items: &[Value]) -> ProductPage {
    let decoded = items
        .iter()
        .map(|item| decode_item(item).map(normalize_product));
    collect_page(Platform::Blinkit, decoded)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
