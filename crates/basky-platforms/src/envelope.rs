//! The common `{success, ..., error}` shape adapter results are reported in.

use basky_core::ConfirmedLocation;
use serde::Serialize;

use crate::error::PlatformError;

/// Serializable success/failure wrapper.
///
/// `data` is flattened so a product search reads
/// `{"success": true, "products": [...], "dropped": 0}` and a failure reads
/// `{"success": false, "products": [], "dropped": 0, "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(flatten)]
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Default> Envelope<T> {
    /// Wraps an adapter result; errors become `success: false` with the
    /// user-facing message and an empty payload.
    pub fn from_result(result: Result<T, PlatformError>) -> Self {
        match result {
            Ok(data) => Self {
                success: true,
                data,
                error: None,
            },
            Err(err) => Self {
                success: false,
                data: T::default(),
                error: Some(err.user_message()),
            },
        }
    }
}

/// Payload of a confirm envelope: `{"locationData": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConfirmBody {
    #[serde(rename = "locationData", skip_serializing_if = "Option::is_none")]
    pub location_data: Option<ConfirmedLocation>,
}

impl From<ConfirmedLocation> for ConfirmBody {
    fn from(location: ConfirmedLocation) -> Self {
        Self {
            location_data: Some(location),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Operation;
    use basky_core::{Platform, ProductPage};
    use serde_json::json;

    #[test]
    fn no_results_envelope_is_failure_with_empty_products() {
        let result: Result<ProductPage, PlatformError> = Err(PlatformError::NoResults {
            term: "milk".to_owned(),
        });
        let envelope = Envelope::from_result(result);
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "success": false,
                "products": [],
                "dropped": 0,
                "error": "No products found for your search"
            })
        );
    }

    #[test]
    fn success_envelope_omits_error() {
        let envelope = Envelope::from_result(Ok(ProductPage::default()));
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["success"], json!(true));
        assert!(value.get("error").is_none());
    }

    #[test]
    fn confirm_failure_surfaces_upstream_text() {
        let result: Result<ConfirmBody, PlatformError> = Err(PlatformError::Upstream {
            platform: Platform::Blinkit,
            operation: Operation::ConfirmLocation,
            message: None,
        });
        let value = serde_json::to_value(Envelope::from_result(result)).unwrap();
        assert_eq!(
            value,
            json!({"success": false, "error": "Location confirmation failed"})
        );
    }
}
