//! Integration tests for the NANASU catalog.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p nanasu-integration-tests
//! ```
//!
//! No external services are needed: the storefront router is driven
//! in-process with `tower::ServiceExt::oneshot`, and the HTTP catalog
//! backend is pointed at a local `wiremock` server.
//!
//! # Test Files
//!
//! - `catalog_queries` - query pipeline properties over the fixture backend
//! - `storefront_api` - JSON API status codes and envelopes
//! - `http_catalog` - remote catalog client against a mock API

use std::time::Duration;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use nanasu_storefront::catalog::{Catalog, CatalogData, FixtureCatalog, HttpCatalog, fixtures};
use nanasu_storefront::config::CatalogApiConfig;
use nanasu_storefront::routes;
use nanasu_storefront::state::AppState;
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;
use url::Url;

/// Largest response body read by [`get_json`].
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// The bundled catalog, parsed.
#[must_use]
pub fn bundled_data() -> CatalogData {
    fixtures::bundled_data().expect("bundled fixture must parse")
}

/// A fixture catalog over the bundled data.
#[must_use]
pub fn bundled_catalog() -> Catalog {
    FixtureCatalog::bundled(None)
        .expect("bundled fixture must be valid")
        .into()
}

/// A fixture catalog holding only the first `count` bundled products.
#[must_use]
pub fn first_products_catalog(count: usize) -> Catalog {
    let mut data = bundled_data();
    data.products.truncate(count);
    FixtureCatalog::new(data, None)
        .expect("truncated fixture must be valid")
        .into()
}

/// An HTTP catalog pointed at `base_url`.
#[must_use]
pub fn http_catalog(base_url: &str, api_token: Option<&str>, timeout: Duration) -> Catalog {
    let config = CatalogApiConfig {
        base_url: Url::parse(base_url).expect("valid base URL"),
        api_token: api_token.map(SecretString::from),
        timeout,
    };
    HttpCatalog::new(&config)
        .expect("HTTP client must build")
        .into()
}

/// The storefront router around a given catalog.
#[must_use]
pub fn app_with(catalog: Catalog) -> Router {
    routes::app(AppState::with_catalog(catalog))
}

/// GET `uri` and parse the body as JSON.
///
/// Non-JSON bodies come back as `Value::Null`.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::get(uri)
        .body(Body::empty())
        .expect("valid request");
    let response = app.oneshot(request).await.expect("router is infallible");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), MAX_BODY_BYTES)
        .await
        .expect("readable body");

    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}
