//! Normalization from Zepto proxy payloads to the shared location and product
//! shapes.

use basky_core::{
    ConfirmedLocation, Coordinates, LocationSearch, LocationSuggestion, NormalizedProduct,
    Platform, Price, ProductPage, Rating,
};
use serde_json::{json, Map, Value};

use crate::decode::{
    collect_page, collect_suggestions, decode_object, non_empty, round_non_negative, value_as_f64,
    Decoded,
};

use super::types::{
    ZeptoLocationSearchResponse, ZeptoPrediction, ZeptoProductResponse,
    ZeptoProductSearchResponse, ZeptoSelectResponse,
};

/// Zepto image paths are relative to this CDN root.
pub const IMAGE_CDN_BASE: &str = "https://cdn.zeptonow.com/";

/// Pointer from a layout widget to its item list.
const WIDGET_ITEMS_POINTER: &str = "/data/resolver/data/items";

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

/// Maps a prediction to a suggestion.
///
/// The title is `main_text`, falling back to the full description. Returns
/// `None` for a prediction with no readable text at all.
#[must_use]
pub fn normalize_prediction(prediction: ZeptoPrediction) -> Option<LocationSuggestion> {
    let formatting = prediction.structured_formatting.unwrap_or_default();
    let description = non_empty(prediction.description);
    let title = non_empty(formatting.main_text).or_else(|| description.clone())?;
    let subtitle = non_empty(formatting.secondary_text).unwrap_or_default();

    let mut raw_meta = Map::new();
    if let Some(place_id) = non_empty(prediction.place_id) {
        raw_meta.insert("place_id".to_string(), Value::String(place_id));
    }
    if let Some(description) = description {
        raw_meta.insert("description".to_string(), Value::String(description));
    }

    Some(LocationSuggestion {
        title,
        subtitle,
        raw_meta,
    })
}

/// Decodes one raw prediction. A prediction with no readable text is
/// unparsable.
#[must_use]
pub fn decode_prediction(item: &Value) -> Decoded<LocationSuggestion> {
    match decode_object::<ZeptoPrediction>(item) {
        Decoded::Parsed(prediction) => match normalize_prediction(prediction) {
            Some(suggestion) => Decoded::Parsed(suggestion),
            None => Decoded::Unparsable {
                reason: "prediction has no text".to_string(),
            },
        },
        Decoded::Skipped => Decoded::Skipped,
        Decoded::Unparsable { reason } => Decoded::Unparsable { reason },
    }
}

/// Builds a [`LocationSearch`] from a successful search response. Zepto has
/// no session token.
#[must_use]
pub fn normalize_location_search(response: &ZeptoLocationSearchResponse) -> LocationSearch {
    let predictions = response.predictions.as_deref().unwrap_or_default();
    LocationSearch {
        suggestions: collect_suggestions(Platform::Zepto, predictions.iter().map(decode_prediction)),
        session_token: None,
    }
}

/// Builds the confirmed location for a successful select.
///
/// Zepto only answers a select with a location when it delivers there, so the
/// result is always serviceable and available. The caller has already checked
/// `success` and `selected_location`.
#[must_use]
pub fn normalize_selected_location(
    suggestion: &LocationSuggestion,
    response: ZeptoSelectResponse,
) -> ConfirmedLocation {
    let selected = non_empty(response.selected_location).unwrap_or_else(|| suggestion.description());
    let display_title = if suggestion.title.trim().is_empty() {
        selected.clone()
    } else {
        suggestion.title.clone()
    };
    let coordinates = response.place_details.as_ref().and_then(place_coordinates);

    ConfirmedLocation {
        display_title,
        display_description: selected.clone(),
        is_serviceable: true,
        is_available: true,
        coordinates,
        raw_location_info: json!({
            "selected_location": selected,
            "timestamp": response.timestamp,
            "place_details": response.place_details,
            "delivery_check": response.delivery_check,
        }),
    }
}

/// Reads `geometry.location.{lat,lng}` (Google Places shape) or top-level
/// `lat`/`lng` from place details.
fn place_coordinates(details: &Value) -> Option<Coordinates> {
    let location = details.pointer("/geometry/location").unwrap_or(details);
    let lat = location.get("lat").and_then(value_as_f64)?;
    let lng = location.get("lng").and_then(value_as_f64)?;
    Some(Coordinates { lat, lng })
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// Items of one layout widget, or an empty slice for widgets without them.
#[must_use]
pub fn widget_items(widget: &Value) -> &[Value] {
    widget
        .pointer(WIDGET_ITEMS_POINTER)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Decodes one widget item.
///
/// The payload is `item.productResponse`, else `item.data`. Items whose payload
/// has no `product` are not products and are skipped.
#[must_use]
pub fn decode_item(item: &Value) -> Decoded<ZeptoProductResponse> {
    let payload = ["productResponse", "data"]
        .iter()
        .filter_map(|key| item.get(*key))
        .find(|value| !value.is_null());

    let Some(payload) = payload else {
        return Decoded::Skipped;
    };
    if payload.get("product").is_none_or(Value::is_null) {
        return Decoded::Skipped;
    }

    match serde_json::from_value::<ZeptoProductResponse>(payload.clone()) {
        Ok(response) => Decoded::Parsed(response),
        Err(e) => Decoded::Unparsable {
            reason: e.to_string(),
        },
    }
}

/// Normalizes a decoded product payload. Never fails; absent fields default
/// to empty or zero.
#[must_use]
pub fn normalize_product(response: ZeptoProductResponse) -> NormalizedProduct {
    let product = response.product.unwrap_or_default();
    let variant = response.product_variant.unwrap_or_default();

    let id = response
        .id
        .clone()
        .and_then(|v| v.into_non_empty_string())
        .or_else(|| {
            response
                .object_id
                .clone()
                .and_then(|v| v.into_non_empty_string())
        })
        .or_else(|| product.id.and_then(|v| v.into_non_empty_string()))
        .unwrap_or_default();

    let selling_price = response
        .selling_price
        .filter(|p| *p > 0.0)
        .or(response.discounted_selling_price)
        .map_or(0, round_non_negative);
    let mrp = response
        .mrp
        .filter(|p| *p > 0.0)
        .map(round_non_negative);
    let mut price = Price::from_selling_and_mrp(selling_price, mrp);
    if let Some(pct) = response.discount_percent.filter(|p| *p > 0.0) {
        price.discount_percent = u32::try_from(round_non_negative(pct).min(100)).unwrap_or(100);
    }

    let image_url = variant
        .images
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|image| non_empty(image.path))
        .map(|path| format!("{IMAGE_CDN_BASE}{}", path.trim_start_matches('/')));

    let rating = variant.rating_summary.map(|summary| Rating {
        average: summary.average_rating.filter(|r| r.is_finite()).unwrap_or(0.0),
        count: summary.total_ratings.map_or(0, round_non_negative),
    });

    let mut platform_specific = Map::new();
    if let Some(object_id) = response.object_id.and_then(|v| v.into_non_empty_string()) {
        platform_specific.insert("objectId".to_string(), Value::String(object_id));
    }
    if let Some(description) = product.description.map(|d| d.joined()) {
        platform_specific.insert("description".to_string(), Value::String(description));
    }
    if let Some(unit) = non_empty(variant.unit_of_measure) {
        platform_specific.insert("unitOfMeasure".to_string(), Value::String(unit));
    }
    if let Some(category) = non_empty(response.primary_category_name) {
        platform_specific.insert("category".to_string(), Value::String(category));
    }
    if let Some(store_id) = non_empty(response.store_id) {
        platform_specific.insert("storeId".to_string(), Value::String(store_id));
    }
    platform_specific.insert(
        "discountAmount".to_string(),
        json!(response.discount_amount.map_or(0, round_non_negative)),
    );
    platform_specific.insert(
        "availableQuantity".to_string(),
        json!(response.available_quantity.map_or(0, round_non_negative)),
    );
    platform_specific.insert(
        "maxAllowedQuantity".to_string(),
        json!(variant
            .max_allowed_quantity
            .map(round_non_negative)
            .filter(|q| *q > 0)
            .unwrap_or(1)),
    );

    NormalizedProduct {
        id,
        platform: Platform::Zepto,
        name: non_empty(product.name).unwrap_or_default(),
        brand: non_empty(product.brand).unwrap_or_default(),
        pack_size: non_empty(variant.formatted_packsize).unwrap_or_default(),
        image_url,
        price,
        rating,
        out_of_stock: response.out_of_stock == Some(true),
        platform_specific,
    }
}

/// Walks every widget's items and normalizes the product ones.
#[must_use]
pub fn normalize_search_response(response: &ZeptoProductSearchResponse) -> ProductPage {
    let items = response
        .products
        .iter()
        .flatten()
        .flat_map(widget_items)
        .map(|item| decode_item(item).map(normalize_product));
    collect_page(Platform::Zepto, items)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
