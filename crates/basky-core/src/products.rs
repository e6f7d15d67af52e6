use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::platform::Platform;

/// Prices in the smallest currency unit (paise for INR).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub selling_price: u64,
    pub mrp: u64,
    /// Whole-number discount off MRP, 0 when there is none.
    pub discount_percent: u32,
}

impl Price {
    /// Builds a price, defaulting MRP to the selling price and deriving the
    /// discount as `round((mrp - selling) / mrp * 100)` when MRP is higher.
    #[must_use]
    pub fn from_selling_and_mrp(selling_price: u64, mrp: Option<u64>) -> Self {
        let mrp = mrp.unwrap_or(selling_price);
        Self {
            selling_price,
            mrp,
            discount_percent: discount_percent(selling_price, mrp),
        }
    }

    /// Savings against MRP in minor units.
    #[must_use]
    pub fn savings(&self) -> u64 {
        self.mrp.saturating_sub(self.selling_price)
    }
}

/// Rounded percentage discount of `selling` against `mrp`.
#[must_use]
pub fn discount_percent(selling: u64, mrp: u64) -> u32 {
    if mrp == 0 || mrp <= selling {
        return 0;
    }
    let off = mrp - selling;
    // round-half-up in integer space: (off * 100 + mrp / 2) / mrp
    let pct = (u128::from(off) * 100 + u128::from(mrp) / 2) / u128::from(mrp);
    u32::try_from(pct).unwrap_or(100)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub average: f64,
    pub count: u64,
}

/// A product search hit from either platform, normalized to one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedProduct {
    pub id: String,
    pub platform: Platform,
    pub name: String,
    pub brand: String,
    pub pack_size: String,
    pub image_url: Option<String>,
    pub price: Price,
    pub rating: Option<Rating>,
    pub out_of_stock: bool,
    /// Fields only one platform carries (category, inventory, offer tag, ...).
    #[serde(default)]
    pub platform_specific: Map<String, Value>,
}

impl NormalizedProduct {
    /// Name to render on a product card.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "Unknown Product"
        } else {
            &self.name
        }
    }

    #[must_use]
    pub fn has_discount(&self) -> bool {
        self.price.discount_percent > 0
    }
}

/// One page of normalized search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<NormalizedProduct>,
    /// Upstream items that could not be decoded and were left out.
    pub dropped: usize,
}

/// Formats minor units as rupees, e.g. `3550` → `"₹35.50"`, `3500` → `"₹35"`.
#[must_use]
pub fn format_rupees(minor_units: u64) -> String {
    let rupees = minor_units / 100;
    let paise = minor_units % 100;
    if paise == 0 {
        format!("\u{20b9}{rupees}")
    } else {
        format!("\u{20b9}{rupees}.{paise:02}")
    }
}
