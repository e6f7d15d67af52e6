//! Text and JSON rendering for command output.
//!
//! Everything here is pure so the handlers stay thin and the output can be
//! tested without a network.

use basky_core::products::format_rupees;
use basky_core::{LocationSearch, NormalizedProduct, ProductPage};
use basky_platforms::{ConfirmBody, Envelope};
use basky_session::{CacheEntry, SearchView, ValidationState, VALIDITY_WINDOW_MS};
use serde::Serialize;

pub(crate) const NO_LOCATIONS_MESSAGE: &str = "No locations found for this search term";

pub(crate) fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub(crate) fn locations_text(search: &LocationSearch) -> String {
    if search.suggestions.is_empty() {
        return NO_LOCATIONS_MESSAGE.to_string();
    }
    search
        .suggestions
        .iter()
        .enumerate()
        .map(|(i, suggestion)| {
            if suggestion.subtitle.is_empty() {
                format!("{:>2}. {}", i + 1, suggestion.title)
            } else {
                format!("{:>2}. {}\n    {}", i + 1, suggestion.title, suggestion.subtitle)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn validation_text(state: &ValidationState) -> String {
    match state {
        ValidationState::Validating => "Validating location...".to_string(),
        ValidationState::Invalid { message } => message.clone(),
        ValidationState::Valid(valid) => {
            let mut out = format!("Delivering to {}", valid.location_key);
            if let Some(confirmed) = &valid.confirmed {
                if !confirmed.display_description.is_empty() {
                    out.push_str(&format!(" ({})", confirmed.display_description));
                }
                if !confirmed.is_deliverable() {
                    out.push_str(" - no delivery slots right now");
                }
            }
            if valid.from_cache {
                out.push_str(" [validated recently]");
            }
            out
        }
    }
}

/// Payload of a validate or confirm envelope. The confirmed location, when
/// the platform was asked, is flattened in as `locationData`.
#[derive(Debug, Default, Serialize)]
pub(crate) struct ValidationBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "fromCache", skip_serializing_if = "Option::is_none")]
    pub from_cache: Option<bool>,
    #[serde(rename = "sessionToken", skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
    #[serde(flatten)]
    pub confirmed: ConfirmBody,
}

/// `{success, location?, fromCache?, sessionToken?, locationData?, error?}`.
pub(crate) fn validation_json(state: &ValidationState) -> Envelope<ValidationBody> {
    match state {
        ValidationState::Valid(valid) => Envelope {
            success: true,
            data: ValidationBody {
                location: Some(valid.location_key.clone()),
                from_cache: Some(valid.from_cache),
                session_token: valid.session_token.clone(),
                confirmed: valid
                    .confirmed
                    .clone()
                    .map(ConfirmBody::from)
                    .unwrap_or_default(),
            },
            error: None,
        },
        ValidationState::Invalid { message } => Envelope {
            success: false,
            data: ValidationBody::default(),
            error: Some(message.clone()),
        },
        ValidationState::Validating => Envelope {
            success: false,
            data: ValidationBody::default(),
            error: None,
        },
    }
}

pub(crate) fn product_line(product: &NormalizedProduct) -> String {
    let mut parts = vec![if product.brand.is_empty() {
        product.display_name().to_string()
    } else {
        format!("{} by {}", product.display_name(), product.brand)
    }];
    if !product.pack_size.is_empty() {
        parts.push(product.pack_size.clone());
    }

    let mut price = format_rupees(product.price.selling_price);
    if product.has_discount() {
        price.push_str(&format!(
            " (MRP {}, {}% off, save {})",
            format_rupees(product.price.mrp),
            product.price.discount_percent,
            format_rupees(product.price.savings())
        ));
    }
    parts.push(price);

    if let Some(rating) = product.rating {
        parts.push(format!("{:.1} ({})", rating.average, rating.count));
    }
    if product.out_of_stock {
        parts.push("out of stock".to_string());
    }
    parts.join(" | ")
}

pub(crate) fn search_text(view: &SearchView) -> String {
    match view {
        SearchView::NeverSearched => String::new(),
        SearchView::Loading { term, .. } => format!("Searching for \"{term}\"..."),
        SearchView::NoResults { message, .. } | SearchView::Failed { message, .. } => {
            message.clone()
        }
        SearchView::Results { term, page } => {
            let mut lines = vec![format!("{} results for \"{term}\"", page.products.len())];
            lines.extend(
                page.products
                    .iter()
                    .map(|product| format!("  {}", product_line(product))),
            );
            if page.dropped > 0 {
                lines.push(format!("({} unreadable items skipped)", page.dropped));
            }
            lines.join("\n")
        }
    }
}

pub(crate) fn search_envelope(view: &SearchView) -> Envelope<ProductPage> {
    match view {
        SearchView::Results { page, .. } => Envelope {
            success: true,
            data: page.clone(),
            error: None,
        },
        SearchView::NoResults { message, .. } | SearchView::Failed { message, .. } => Envelope {
            success: false,
            data: ProductPage::default(),
            error: Some(message.clone()),
        },
        SearchView::NeverSearched | SearchView::Loading { .. } => Envelope {
            success: false,
            data: ProductPage::default(),
            error: None,
        },
    }
}

pub(crate) fn cache_text(entries: &[CacheEntry], now_ms: i64) -> String {
    if entries.is_empty() {
        return "No recently validated locations".to_string();
    }
    entries
        .iter()
        .map(|entry| {
            let age_ms = now_ms.saturating_sub(entry.timestamp_ms);
            let left_secs = (VALIDITY_WINDOW_MS - age_ms).max(0) / 1000;
            let line = format!("{} (valid for {left_secs}s more)", entry.location_key);
            if entry.session_token.is_some() {
                line + " [session token]"
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
