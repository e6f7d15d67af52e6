//! Zepto proxy API response types.
//!
//! ## Observed shape
//!
//! ### Location search
//! `{success, predictions: [{place_id, description, structured_formatting:
//! {main_text, secondary_text}}], error}`. `structured_formatting` is absent on
//! some predictions; the description is then the only readable text.
//!
//! ### Select location
//! `{success, selected_location, timestamp, place_details, delivery_check,
//! error}`. A select only succeeded when `success` is true **and**
//! `selected_location` is present; the proxy has been seen answering
//! `success: true` with no location.
//!
//! ### Product search
//! `products` is a list of layout widgets, not products. Products sit at
//! `widget.data.resolver.data.items[]`, under either `item.productResponse`
//! (organic results) or `item.data` (sponsored slots). Banner and filter
//! widgets have no `items`; header items carry no `product`. Widgets are kept
//! as raw JSON so one odd widget cannot fail the whole response. Lists
//! arrive as `null` on failures, so they are modelled as `Option<Vec<_>>`.
//!
//! ### Prices
//! Integers already in paise (`sellingPrice: 2900` is ₹29).

use serde::Deserialize;
use serde_json::Value;

use crate::decode::Scalar;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ZeptoLocationSearchResponse {
    pub success: bool,
    /// Kept raw so one malformed prediction cannot fail the search.
    pub predictions: Option<Vec<Value>>,
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ZeptoPrediction {
    pub place_id: Option<String>,
    pub description: Option<String>,
    pub structured_formatting: Option<StructuredFormatting>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StructuredFormatting {
    pub main_text: Option<String>,
    pub secondary_text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ZeptoSelectResponse {
    pub success: bool,
    pub selected_location: Option<String>,
    pub timestamp: Option<String>,
    pub place_details: Option<Value>,
    pub delivery_check: Option<Value>,
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ZeptoProductSearchResponse {
    pub success: bool,
    #[serde(rename = "productName")]
    pub product_name: Option<String>,
    /// Layout widgets; see the module docs.
    pub products: Option<Vec<Value>>,
    pub error: Option<String>,
}

/// One product payload found inside a widget item.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ZeptoProductResponse {
    pub id: Option<Scalar>,
    pub object_id: Option<Scalar>,
    pub product: Option<ZeptoProduct>,
    pub product_variant: Option<ZeptoProductVariant>,
    pub selling_price: Option<f64>,
    pub discounted_selling_price: Option<f64>,
    pub mrp: Option<f64>,
    pub discount_percent: Option<f64>,
    pub discount_amount: Option<f64>,
    pub available_quantity: Option<f64>,
    pub out_of_stock: Option<bool>,
    pub primary_category_name: Option<String>,
    pub store_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ZeptoProduct {
    pub id: Option<Scalar>,
    pub name: Option<String>,
    pub brand: Option<String>,
    /// A list of paragraphs on most products, a single string on a few.
    pub description: Option<ZeptoDescription>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ZeptoDescription {
    Paragraphs(Vec<String>),
    Text(String),
}

impl ZeptoDescription {
    #[must_use]
    pub fn joined(&self) -> String {
        match self {
            ZeptoDescription::Paragraphs(parts) => parts.join(" "),
            ZeptoDescription::Text(text) => text.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ZeptoProductVariant {
    pub formatted_packsize: Option<String>,
    pub unit_of_measure: Option<String>,
    pub max_allowed_quantity: Option<f64>,
    pub images: Option<Vec<ZeptoImage>>,
    pub rating_summary: Option<ZeptoRatingSummary>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ZeptoImage {
    pub path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ZeptoRatingSummary {
    pub average_rating: Option<f64>,
    pub total_ratings: Option<f64>,
}
