//! Integration tests for `ZeptoClient` against a local `wiremock` server.
//!
//! Covers the three proxy endpoints: happy paths, the upstream failure
//! shapes, and transport failures.

use basky_core::LocationSuggestion;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use basky_platforms::{
    Envelope, PlatformError, ProductContext, QuickCommercePlatform, ZeptoClient,
    CONNECT_FAILURE_MESSAGE,
};

fn test_client(server: &MockServer) -> ZeptoClient {
    ZeptoClient::new(&server.uri(), Some(5), "basky-test/0.1")
        .expect("failed to build test ZeptoClient")
}

fn milk_widget() -> serde_json::Value {
    json!({
        "widgetId": "grid",
        "data": {"resolver": {"data": {"items": [
            {"productResponse": {
                "id": "pr-1",
                "product": {"name": "Amul Taaza Toned Milk", "brand": "Amul"},
                "productVariant": {"formattedPacksize": "500 ml", "images": [{"path": "a.jpeg"}]},
                "sellingPrice": 2700,
                "mrp": 2900,
                "outOfStock": false
            }},
            {"position": 4}
        ]}}}
    })
}

// ---------------------------------------------------------------------------
// search_locations
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_locations_posts_search_term_and_maps_predictions() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/zepto/search-locations"))
        .and(body_json(json!({"searchTerm": "Indiranagar"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "predictions": [{
                "place_id": "ChIJ1",
                "description": "Indiranagar, Bengaluru, Karnataka",
                "structured_formatting": {"main_text": "Indiranagar", "secondary_text": "Bengaluru, Karnataka"}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let search = test_client(&server)
        .search_locations("  Indiranagar ")
        .await
        .expect("search should succeed");

    assert_eq!(search.suggestions.len(), 1);
    assert_eq!(search.suggestions[0].title, "Indiranagar");
    assert_eq!(search.suggestions[0].place_id(), Some("ChIJ1"));
    assert!(search.session_token.is_none());
}

#[tokio::test]
async fn search_locations_keeps_good_predictions_when_one_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/zepto/search-locations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "predictions": [
                {"place_id": "ok", "description": "Koramangala, Bengaluru"},
                {"place_id": 12345, "description": "Koramangala 5th Block"}
            ]
        })))
        .mount(&server)
        .await;

    let search = test_client(&server)
        .search_locations("koramangala")
        .await
        .expect("a malformed prediction must not fail the search");

    assert_eq!(search.suggestions.len(), 1);
    assert_eq!(search.suggestions[0].place_id(), Some("ok"));
}

#[tokio::test]
async fn search_locations_rejects_short_query_without_network_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = test_client(&server).search_locations("ab").await;
    assert!(
        matches!(result, Err(PlatformError::InvalidQuery(_))),
        "expected InvalidQuery, got: {result:?}"
    );
}

#[tokio::test]
async fn search_locations_surfaces_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/zepto/search-locations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "predictions": null,
            "error": "Places quota exceeded"
        })))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .search_locations("Koramangala")
        .await
        .unwrap_err();
    assert_eq!(err.upstream_message(), Some("Places quota exceeded"));
}

// ---------------------------------------------------------------------------
// confirm_location
// ---------------------------------------------------------------------------

#[tokio::test]
async fn confirm_location_sends_place_id_and_description() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/zepto/select-location"))
        .and(body_json(json!({
            "place_id": "direct_1700000000000",
            "description": "HSR Layout, Bengaluru"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "selected_location": "HSR Layout, Bengaluru",
            "timestamp": "2026-01-01T00:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let suggestion = LocationSuggestion::from_free_text("HSR Layout, Bengaluru", 1_700_000_000_000);
    let confirmed = test_client(&server)
        .confirm_location(&suggestion, None)
        .await
        .expect("select should succeed");

    assert_eq!(confirmed.display_title, "HSR Layout");
    assert!(confirmed.is_serviceable);
}

#[tokio::test]
async fn confirm_location_without_selected_location_is_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/zepto/select-location"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;

    let suggestion = LocationSuggestion::from_free_text("Connaught Place, New Delhi", 1);
    let err = test_client(&server)
        .confirm_location(&suggestion, None)
        .await
        .unwrap_err();

    assert!(matches!(err, PlatformError::Upstream { .. }));
    assert_eq!(err.user_message(), "Location confirmation failed");
}

// ---------------------------------------------------------------------------
// search_products
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_products_walks_widgets() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/zepto/search-products"))
        .and(body_json(json!({"productName": "milk"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "productName": "milk",
            "products": [{"widgetId": "banner"}, milk_widget()]
        })))
        .mount(&server)
        .await;

    let page = test_client(&server)
        .search_products("milk", ProductContext::None)
        .await
        .expect("search should succeed");

    assert_eq!(page.products.len(), 1);
    assert_eq!(page.dropped, 0);
    assert_eq!(page.products[0].price.discount_percent, 7);
    assert_eq!(
        page.products[0].image_url.as_deref(),
        Some("https://cdn.zeptonow.com/a.jpeg")
    );
}

#[tokio::test]
async fn search_products_with_no_matches_is_no_results_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/zepto/search-products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "productName": "milk",
            "products": []
        })))
        .mount(&server)
        .await;

    let result = test_client(&server)
        .search_products("milk", ProductContext::None)
        .await;
    assert!(matches!(result, Err(PlatformError::NoResults { .. })));

    let envelope = serde_json::to_value(Envelope::from_result(result)).unwrap();
    assert_eq!(
        envelope,
        json!({
            "success": false,
            "products": [],
            "dropped": 0,
            "error": "No products found for your search"
        })
    );
}

#[tokio::test]
async fn search_products_non_2xx_is_transport_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/zepto/search-products"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .search_products("bread", ProductContext::None)
        .await
        .unwrap_err();

    assert!(
        matches!(err, PlatformError::UnexpectedStatus { status: 503, .. }),
        "expected UnexpectedStatus(503), got: {err:?}"
    );
    assert_eq!(err.user_message(), CONNECT_FAILURE_MESSAGE);
}

#[tokio::test]
async fn search_products_non_json_body_is_transport_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/zepto/search-products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .search_products("bread", ProductContext::None)
        .await
        .unwrap_err();
    assert!(matches!(err, PlatformError::Deserialize { .. }));
    assert!(err.is_transport());
}
