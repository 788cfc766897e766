//! Remote catalog API client.
//!
//! Talks to an HTTP API implementing the same contract as the fixture
//! backend. Every response body is the `{success, data | error}` envelope.
//! Transport and API failures are turned into [`ApiError`] by
//! [`normalize_error`]. Products, related lists and the featured list are
//! cached for 5 minutes.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use nanasu_core::{
    ApiError, ApiResponse, PaginatedResponse, Product, SearchQuery, Suggestions, UpstreamFailure,
    normalize_error,
};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use super::CatalogError;
use super::cache::{CacheKey, CacheValue};
use crate::config::CatalogApiConfig;

const CACHE_CAPACITY: u64 = 1000;
const CACHE_TTL: Duration = Duration::from_secs(300);

/// Client for a remote catalog API.
#[derive(Clone)]
pub struct HttpCatalog {
    inner: Arc<HttpCatalogInner>,
}

struct HttpCatalogInner {
    client: reqwest::Client,
    base_url: Url,
    api_token: Option<SecretString>,
    cache: Cache<CacheKey, CacheValue>,
}

impl HttpCatalog {
    /// Create a new catalog API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &CatalogApiConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(HttpCatalogInner {
                client,
                base_url: config.base_url.clone(),
                api_token: config.api_token.clone(),
                cache,
            }),
        })
    }

    /// Build an endpoint URL by appending path segments to the base URL.
    ///
    /// Segments are percent-encoded, so ids containing `/` stay one segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.inner.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GET a URL and unwrap the response envelope.
    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let mut request = self.inner.client.get(url.clone());
        if let Some(token) = &self.inner.api_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request
            .send()
            .await
            .map_err(|e| fail(&url, classify(&e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| fail(&url, classify(&e)))?;

        if !status.is_success() {
            return Err(fail(
                &url,
                UpstreamFailure::Response {
                    status: status.as_u16(),
                    payload: serde_json::from_str(&body).ok(),
                },
            ));
        }

        let envelope: ApiResponse<T> = serde_json::from_str(&body).map_err(|e| {
            fail(
                &url,
                UpstreamFailure::Other {
                    message: Some(format!("Respons katalog tidak valid: {e}")),
                },
            )
        })?;

        envelope.into_result()
    }

    /// Search, filter, sort and paginate products remotely.
    ///
    /// # Errors
    ///
    /// Returns a normalized error if the request fails.
    #[instrument(skip(self))]
    pub async fn search_products(
        &self,
        query: &SearchQuery,
    ) -> Result<PaginatedResponse<Product>, ApiError> {
        let mut url = self.endpoint(&["products"]);
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(q) = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
                pairs.append_pair("q", q);
            }
            if let Some(category) = &query.category {
                pairs.append_pair("category", category.as_str());
            }
            if let Some(min_price) = query.min_price {
                pairs.append_pair("minPrice", &min_price.to_string());
            }
            if let Some(max_price) = query.max_price {
                pairs.append_pair("maxPrice", &max_price.to_string());
            }
            if let Some(rating) = query.rating {
                pairs.append_pair("rating", &rating.to_string());
            }
            pairs.append_pair("sort", query.sort.as_str());
            pairs.append_pair("page", &query.page().to_string());
        }

        self.fetch(url).await
    }

    /// Look up a product by id or slug.
    ///
    /// # Errors
    ///
    /// Returns `PRODUCT_NOT_FOUND` (as reported by the API) or a normalized
    /// transport error.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id_or_slug: &str) -> Result<Product, ApiError> {
        let cache_key = CacheKey::Product(id_or_slug.to_string());

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let product: Product = self.fetch(self.endpoint(&["products", id_or_slug])).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Search-as-you-type suggestions.
    ///
    /// Short queries are answered locally without a request.
    ///
    /// # Errors
    ///
    /// Returns a normalized error if the request fails.
    #[instrument(skip(self))]
    pub async fn get_suggestions(&self, partial: &str) -> Result<Suggestions, ApiError> {
        let trimmed = partial.trim();
        if trimmed.chars().count() < super::pipeline::MIN_SUGGESTION_QUERY_LEN {
            return Ok(Suggestions::default());
        }

        let mut url = self.endpoint(&["search", "suggestions"]);
        url.query_pairs_mut().append_pair("q", trimmed);

        self.fetch(url).await
    }

    /// Other products in the same category.
    ///
    /// # Errors
    ///
    /// Returns `PRODUCT_NOT_FOUND` (as reported by the API) or a normalized
    /// transport error.
    #[instrument(skip(self))]
    pub async fn get_related_products(&self, product_id: &str) -> Result<Vec<Product>, ApiError> {
        let cache_key = CacheKey::Related(product_id.to_string());

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for related products");
            return Ok(products);
        }

        let products: Vec<Product> = self
            .fetch(self.endpoint(&["products", product_id, "related"]))
            .await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Products carrying the `bestseller` badge.
    ///
    /// # Errors
    ///
    /// Returns a normalized error if the request fails.
    #[instrument(skip(self))]
    pub async fn get_featured_products(&self) -> Result<Vec<Product>, ApiError> {
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&CacheKey::Featured).await
        {
            debug!("Cache hit for featured products");
            return Ok(products);
        }

        let products: Vec<Product> = self.fetch(self.endpoint(&["products", "featured"])).await?;

        self.inner
            .cache
            .insert(CacheKey::Featured, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }
}

/// Decide whether a transport error got a response or not.
fn classify(error: &reqwest::Error) -> UpstreamFailure {
    if error.is_connect() || error.is_timeout() || error.is_request() || error.is_body() {
        UpstreamFailure::NoResponse {
            reason: error.to_string(),
        }
    } else {
        UpstreamFailure::Other {
            message: Some(error.to_string()),
        }
    }
}

/// Normalize a failure and log it.
fn fail(url: &Url, failure: UpstreamFailure) -> ApiError {
    let error = normalize_error(&failure);
    warn!(
        url = %url,
        failure = ?failure,
        code = %error.code,
        "Catalog API request failed"
    );
    error
}
