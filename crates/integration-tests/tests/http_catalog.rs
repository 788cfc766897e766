//! Remote catalog backend against a mock catalog API.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no
//! real network traffic is made.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::time::Duration;

use nanasu_core::{CategoryId, ErrorCode, Price, SearchQuery, SortKey};
use nanasu_integration_tests::{bundled_data, http_catalog};
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(5);

fn ok(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": data }))
}

fn product_json(index: usize) -> Value {
    serde_json::to_value(&bundled_data().products[index]).unwrap()
}

#[tokio::test]
async fn test_search_sends_camel_case_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/products"))
        .and(query_param("q", "Madu"))
        .and(query_param("category", "nanas-segar"))
        .and(query_param("minPrice", "38000"))
        .and(query_param("sort", "price_asc"))
        .and(query_param("page", "1"))
        .respond_with(ok(json!({
            "data": [product_json(1), product_json(0)],
            "pagination": { "page": 1, "limit": 12, "total": 2, "totalPages": 1 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let catalog = http_catalog(&format!("{}/v1/", server.uri()), None, TIMEOUT);
    let query = SearchQuery {
        q: Some(" Madu ".to_string()),
        category: Some(CategoryId::new("nanas-segar")),
        min_price: Some(Price::from_rupiah(38_000)),
        sort: SortKey::PriceAsc,
        ..Default::default()
    };

    let page = catalog.search_products(&query).await.unwrap();

    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].id, "2");
    assert_eq!(page.pagination.total, 2);
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/featured"))
        .and(header("authorization", "Bearer rahasia"))
        .respond_with(ok(json!([product_json(0)])))
        .expect(1)
        .mount(&server)
        .await;

    let catalog = http_catalog(&server.uri(), Some("rahasia"), TIMEOUT);
    let featured = catalog.get_featured_products().await.unwrap();

    assert_eq!(featured.len(), 1);
}

#[tokio::test]
async fn test_products_are_cached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/nanas-madu-premium"))
        .respond_with(ok(product_json(0)))
        .expect(1)
        .mount(&server)
        .await;

    let catalog = http_catalog(&server.uri(), None, TIMEOUT);
    let first = catalog.get_product("nanas-madu-premium").await.unwrap();
    let second = catalog.get_product("nanas-madu-premium").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.name, "Nanas Madu Premium");
}

#[tokio::test]
async fn test_not_found_payload_is_propagated() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/nonexistent-id"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "error": {
                "code": "PRODUCT_NOT_FOUND",
                "message": "Produk tidak ditemukan",
                "details": { "id": "nonexistent-id" }
            }
        })))
        .mount(&server)
        .await;

    let catalog = http_catalog(&server.uri(), None, TIMEOUT);
    let error = catalog.get_product("nonexistent-id").await.unwrap_err();

    assert_eq!(error.code, ErrorCode::ProductNotFound);
    assert_eq!(error.message, "Produk tidak ditemukan");
    assert_eq!(error.details, Some(json!({ "id": "nonexistent-id" })));
}

#[tokio::test]
async fn test_failure_envelope_with_200_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/1/related"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": { "code": "PRODUCT_NOT_FOUND", "message": "Produk tidak ditemukan" }
        })))
        .mount(&server)
        .await;

    let catalog = http_catalog(&server.uri(), None, TIMEOUT);
    let error = catalog.get_related_products("1").await.unwrap_err();

    assert!(error.is_not_found());
}

#[tokio::test]
async fn test_server_error_without_body_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let catalog = http_catalog(&server.uri(), None, TIMEOUT);
    let error = catalog
        .search_products(&SearchQuery::default())
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ApiError);
    assert_eq!(error.message, "Terjadi kesalahan pada server");
}

#[tokio::test]
async fn test_timeout_is_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/featured"))
        .respond_with(ok(json!([])).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let catalog = http_catalog(&server.uri(), None, Duration::from_millis(200));
    let error = catalog.get_featured_products().await.unwrap_err();

    assert_eq!(error.code, ErrorCode::NetworkError);
}

#[tokio::test]
async fn test_garbage_body_is_unknown_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/suggestions"))
        .and(query_param("q", "nanas"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let catalog = http_catalog(&server.uri(), None, TIMEOUT);
    let error = catalog.get_suggestions("nanas").await.unwrap_err();

    assert_eq!(error.code, ErrorCode::UnknownError);
}
