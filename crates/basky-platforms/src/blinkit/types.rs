//! Blinkit proxy API response types.
//!
//! ## Observed shape
//!
//! ### Location search
//! `{success, data: {ui_data: {suggestions: [...]}, postback_query_params:
//! {session_token}}}`. A response without `data.ui_data` is a failure even when
//! `success` is true. Each suggestion is `{title: {text}, subtitle: {text},
//! left_image, meta}`; `left_image` is a bare URL string on some builds and
//! `{url}` on others.
//!
//! ### Confirm
//! `{success, locationData, error}`. `locationData` is kept as raw JSON: it is
//! sent back verbatim as `location_data` on product searches.
//!
//! ### Product search
//! `{products: [...]}`, flat. Prices are display strings such as `"₹35"`.
//! `available` is frequently absent on sold-out items.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::decode::Scalar;
use crate::price::PriceField;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BlinkitLocationSearchResponse {
    pub success: bool,
    pub data: Option<BlinkitLocationSearchData>,
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BlinkitLocationSearchData {
    pub ui_data: Option<BlinkitUiData>,
    pub postback_query_params: Option<PostbackQueryParams>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BlinkitUiData {
    /// Kept raw so one malformed suggestion cannot fail the search.
    pub suggestions: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PostbackQueryParams {
    pub session_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BlinkitSuggestion {
    pub title: Option<TextField>,
    pub subtitle: Option<TextField>,
    pub left_image: Option<LeftImage>,
    pub meta: Option<Map<String, Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TextField {
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LeftImage {
    Url(String),
    Object { url: Option<String> },
}

impl LeftImage {
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            LeftImage::Url(url) => Some(url.as_str()),
            LeftImage::Object { url } => url.as_deref(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BlinkitConfirmResponse {
    pub success: bool,
    #[serde(rename = "locationData")]
    pub location_data: Option<Value>,
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BlinkitProductSearchResponse {
    /// Absent on most responses; only an explicit `false` is a failure.
    pub success: Option<bool>,
    pub products: Option<Vec<Value>>,
    pub error: Option<String>,
}

/// One product from a Blinkit search.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BlinkitProduct {
    pub id: Option<Scalar>,
    pub name: Option<String>,
    pub brand: Option<String>,
    pub price: Option<PriceField>,
    pub mrp: Option<PriceField>,
    pub variant: Option<String>,
    #[serde(rename = "packSize")]
    pub pack_size: Option<String>,
    pub image: Option<String>,
    pub rating: Option<BlinkitRating>,
    pub available: Option<bool>,
    pub inventory: Option<f64>,
    pub offer_tag: Option<String>,
    pub merchant_id: Option<Scalar>,
    pub group_id: Option<Scalar>,
    pub platform: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlinkitRating {
    pub average_rating: Option<f64>,
    pub total_ratings: Option<f64>,
}
