use super::*;
use serde_json::json;

fn widget(items: Value) -> Value {
    json!({
        "widgetId": "w1",
        "widgetName": "PRODUCT_GRID",
        "data": {"resolver": {"data": {"items": items}}}
    })
}

fn search_response(widgets: Vec<Value>) -> ZeptoProductSearchResponse {
    serde_json::from_value(json!({
        "success": true,
        "productName": "milk",
        "products": widgets
    }))
    .unwrap()
}

fn full_product_response() -> Value {
    json!({
        "id": "pr-1",
        "objectId": "obj-1",
        "storeId": "store-9",
        "product": {
            "id": "p-1",
            "name": "Amul Taaza Toned Milk",
            "brand": "Amul",
            "description": ["Fresh toned milk.", "Pasteurised."]
        },
        "productVariant": {
            "formattedPacksize": "500 ml",
            "unitOfMeasure": "ML",
            "maxAllowedQuantity": 6,
            "images": [{"path": "cms/product_variant/abc.jpeg"}],
            "ratingSummary": {"averageRating": 4.3, "totalRatings": 1520}
        },
        "sellingPrice": 2700,
        "discountedSellingPrice": 2700,
        "mrp": 2900,
        "discountPercent": 6,
        "discountAmount": 200,
        "availableQuantity": 12,
        "outOfStock": false,
        "primaryCategoryName": "Dairy, Bread & Eggs"
    })
}

// -----------------------------------------------------------------------
// decode_item
// -----------------------------------------------------------------------

#[test]
fn decode_item_reads_product_response() {
    let item = json!({"productResponse": full_product_response()});
    assert!(matches!(decode_item(&item), Decoded::Parsed(_)));
}

#[test]
fn decode_item_falls_back_to_data() {
    let item = json!({"data": full_product_response()});
    assert!(matches!(decode_item(&item), Decoded::Parsed(_)));
}

#[test]
fn decode_item_skips_items_without_product() {
    assert!(matches!(decode_item(&json!({"position": 1})), Decoded::Skipped));
    assert!(matches!(
        decode_item(&json!({"data": {"bannerUrl": "x"}})),
        Decoded::Skipped
    ));
    assert!(matches!(
        decode_item(&json!({"productResponse": null, "data": {"product": null}})),
        Decoded::Skipped
    ));
}

#[test]
fn decode_item_flags_wrongly_typed_payload() {
    let item = json!({"productResponse": {"product": {"name": 42}}});
    assert!(matches!(decode_item(&item), Decoded::Unparsable { .. }));
}

// -----------------------------------------------------------------------
// normalize_product
// -----------------------------------------------------------------------

#[test]
fn normalize_product_maps_all_fields() {
    let response: ZeptoProductResponse = serde_json::from_value(full_product_response()).unwrap();
    let product = normalize_product(response);

    assert_eq!(product.id, "pr-1");
    assert_eq!(product.platform, Platform::Zepto);
    assert_eq!(product.name, "Amul Taaza Toned Milk");
    assert_eq!(product.brand, "Amul");
    assert_eq!(product.pack_size, "500 ml");
    assert_eq!(
        product.image_url.as_deref(),
        Some("https://cdn.zeptonow.com/cms/product_variant/abc.jpeg")
    );
    assert_eq!(
        product.price,
        Price {
            selling_price: 2700,
            mrp: 2900,
            discount_percent: 6
        }
    );
    let rating = product.rating.unwrap();
    assert!((rating.average - 4.3).abs() < f64::EPSILON);
    assert_eq!(rating.count, 1520);
    assert!(!product.out_of_stock);
    assert_eq!(
        product.platform_specific["description"],
        json!("Fresh toned milk. Pasteurised.")
    );
    assert_eq!(product.platform_specific["category"], json!("Dairy, Bread & Eggs"));
    assert_eq!(product.platform_specific["maxAllowedQuantity"], json!(6));
    assert_eq!(product.platform_specific["objectId"], json!("obj-1"));
}

#[test]
fn normalize_product_defaults_missing_fields() {
    let response: ZeptoProductResponse =
        serde_json::from_value(json!({"product": {}})).unwrap();
    let product = normalize_product(response);

    assert_eq!(product.id, "");
    assert_eq!(product.name, "");
    assert_eq!(product.display_name(), "Unknown Product");
    assert_eq!(product.brand, "");
    assert_eq!(product.pack_size, "");
    assert!(product.image_url.is_none());
    assert_eq!(product.price, Price::default());
    assert!(product.rating.is_none());
    assert!(!product.out_of_stock);
    assert_eq!(product.platform_specific["maxAllowedQuantity"], json!(1));
}

#[test]
fn normalize_product_uses_object_id_and_discounted_price_fallbacks() {
    let response: ZeptoProductResponse = serde_json::from_value(json!({
        "objectId": "obj-7",
        "product": {"name": "Mother Dairy Curd", "description": "Thick curd"},
        "discountedSellingPrice": 4500,
        "outOfStock": true
    }))
    .unwrap();
    let product = normalize_product(response);

    assert_eq!(product.id, "obj-7");
    assert_eq!(product.price.selling_price, 4500);
    assert_eq!(product.price.mrp, 4500);
    assert_eq!(product.price.discount_percent, 0);
    assert!(product.out_of_stock);
    assert_eq!(product.platform_specific["description"], json!("Thick curd"));
}

#[test]
fn normalize_product_computes_discount_when_upstream_omits_it() {
    let response: ZeptoProductResponse = serde_json::from_value(json!({
        "product": {"name": "Bread"},
        "sellingPrice": 3500,
        "mrp": 5000
    }))
    .unwrap();
    assert_eq!(normalize_product(response).price.discount_percent, 30);
}

// -----------------------------------------------------------------------
// normalize_search_response
// -----------------------------------------------------------------------

#[test]
fn search_response_walks_widgets_and_counts_drops() {
    let response = search_response(vec![
        json!({"widgetId": "banner", "data": {"imageUrl": "x"}}),
        widget(json!([
            {"productResponse": full_product_response()},
            {"position": 2},
            {"data": {"product": {"name": "Sponsored Ghee"}, "sellingPrice": 55000}},
            {"productResponse": {"product": {"brand": ["not", "a", "string"]}}}
        ])),
    ]);

    let page = normalize_search_response(&response);
    assert_eq!(page.products.len(), 2);
    assert_eq!(page.dropped, 1);
    assert_eq!(page.products[1].name, "Sponsored Ghee");
    assert_eq!(page.products[1].price.selling_price, 55_000);
}

#[test]
fn search_response_with_null_products_is_empty() {
    let response: ZeptoProductSearchResponse =
        serde_json::from_value(json!({"success": true, "products": null})).unwrap();
    let page = normalize_search_response(&response);
    assert!(page.products.is_empty());
    assert_eq!(page.dropped, 0);
}

// -----------------------------------------------------------------------
// locations
// -----------------------------------------------------------------------

#[test]
fn prediction_uses_structured_formatting() {
    let prediction: ZeptoPrediction = serde_json::from_value(json!({
        "place_id": "ChIJ123",
        "description": "Indiranagar, Bengaluru, Karnataka, India",
        "structured_formatting": {
            "main_text": "Indiranagar",
            "secondary_text": "Bengaluru, Karnataka, India"
        }
    }))
    .unwrap();
    let suggestion = normalize_prediction(prediction).unwrap();
    assert_eq!(suggestion.title, "Indiranagar");
    assert_eq!(suggestion.subtitle, "Bengaluru, Karnataka, India");
    assert_eq!(suggestion.place_id(), Some("ChIJ123"));
    assert_eq!(
        suggestion.description(),
        "Indiranagar, Bengaluru, Karnataka, India"
    );
}

#[test]
fn prediction_without_formatting_uses_description() {
    let prediction: ZeptoPrediction =
        serde_json::from_value(json!({"place_id": "x", "description": "HSR Layout"})).unwrap();
    let suggestion = normalize_prediction(prediction).unwrap();
    assert_eq!(suggestion.title, "HSR Layout");
    assert_eq!(suggestion.subtitle, "");
}

#[test]
fn location_search_drops_textless_predictions() {
    let response: ZeptoLocationSearchResponse = serde_json::from_value(json!({
        "success": true,
        "predictions": [
            {"place_id": "a", "description": "Koramangala"},
            {"place_id": "b"}
        ]
    }))
    .unwrap();
    let search = normalize_location_search(&response);
    assert_eq!(search.suggestions.len(), 1);
    assert!(search.session_token.is_none());
}

#[test]
fn location_search_drops_malformed_prediction_and_keeps_the_rest() {
    let response: ZeptoLocationSearchResponse = serde_json::from_value(json!({
        "success": true,
        "predictions": [
            {"place_id": "ok", "description": "HSR Layout, Bengaluru"},
            {"place_id": 12345, "description": "Sector 2"},
            "not a prediction",
            {"place_id": "ok-2", "structured_formatting": {"main_text": "BTM Layout"}}
        ]
    }))
    .unwrap();
    let search = normalize_location_search(&response);
    let titles: Vec<&str> = search.suggestions.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["HSR Layout, Bengaluru", "BTM Layout"]);
}

#[test]
fn selected_location_reads_place_coordinates() {
    let suggestion = LocationSuggestion::from_free_text("Indiranagar, Bengaluru", 1);
    let response: ZeptoSelectResponse = serde_json::from_value(json!({
        "success": true,
        "selected_location": "Indiranagar, Bengaluru, Karnataka",
        "place_details": {"geometry": {"location": {"lat": 12.97, "lng": 77.64}}}
    }))
    .unwrap();

    let confirmed = normalize_selected_location(&suggestion, response);
    assert_eq!(confirmed.display_title, "Indiranagar");
    assert_eq!(
        confirmed.display_description,
        "Indiranagar, Bengaluru, Karnataka"
    );
    assert!(confirmed.is_deliverable());
    assert_eq!(
        confirmed.coordinates,
        Some(Coordinates {
            lat: 12.97,
            lng: 77.64
        })
    );
}
