//! In-memory catalog backed by JSON fixtures.
//!
//! The bundled fixture (`data/catalog.json`) is compiled into the binary.
//! A different file can be loaded at startup via `NANASU_CATALOG_FIXTURES`.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use nanasu_core::{
    ApiError, Category, PaginatedResponse, Product, SearchQuery, Seller, Suggestions,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::CatalogError;
use super::pipeline;
use crate::config::Latency;

const BUNDLED_CATALOG: &str = include_str!("../../data/catalog.json");

/// The fixture file format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogData {
    pub products: Vec<Product>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub sellers: Vec<Seller>,
}

impl CatalogData {
    /// Parse fixture JSON without validating it.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` if the JSON does not match the format.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check every product invariant plus id/slug uniqueness.
    ///
    /// # Errors
    ///
    /// Returns the first violation found, in catalog order.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut ids = HashSet::new();
        let mut slugs = HashSet::new();

        for product in &self.products {
            product.validate()?;

            if !ids.insert(product.id.as_str()) {
                return Err(CatalogError::DuplicateId(product.id.to_string()));
            }
            if !slugs.insert(product.slug.as_str()) {
                return Err(CatalogError::DuplicateSlug(product.slug.clone()));
            }
        }

        Ok(())
    }

    /// Every invariant violation in the catalog, not just the first.
    #[must_use]
    pub fn violations(&self) -> Vec<CatalogError> {
        let mut ids = HashSet::new();
        let mut slugs = HashSet::new();
        let mut violations = Vec::new();

        for product in &self.products {
            if let Err(e) = product.validate() {
                violations.push(e.into());
            }
            if !ids.insert(product.id.as_str()) {
                violations.push(CatalogError::DuplicateId(product.id.to_string()));
            }
            if !slugs.insert(product.slug.as_str()) {
                violations.push(CatalogError::DuplicateSlug(product.slug.clone()));
            }
        }

        violations
    }
}

/// Parse the bundled fixture.
///
/// # Errors
///
/// Returns an error if the bundled JSON is malformed.
pub fn bundled_data() -> Result<CatalogData, CatalogError> {
    CatalogData::from_json(BUNDLED_CATALOG)
}

/// Catalog served from memory.
///
/// Cheaply cloneable; the data is shared and never mutated.
#[derive(Clone)]
pub struct FixtureCatalog {
    inner: Arc<FixtureCatalogInner>,
}

struct FixtureCatalogInner {
    data: CatalogData,
    latency: Option<Latency>,
}

impl FixtureCatalog {
    /// Create a catalog from already-parsed data.
    ///
    /// # Errors
    ///
    /// Returns an error if the data violates a catalog invariant.
    pub fn new(data: CatalogData, latency: Option<Latency>) -> Result<Self, CatalogError> {
        data.validate()?;

        Ok(Self {
            inner: Arc::new(FixtureCatalogInner { data, latency }),
        })
    }

    /// Create a catalog from the bundled fixture.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled fixture is malformed or invalid.
    pub fn bundled(latency: Option<Latency>) -> Result<Self, CatalogError> {
        Self::new(bundled_data()?, latency)
    }

    /// Create a catalog from a fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_path(path: &Path, latency: Option<Latency>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(CatalogData::from_json(&json)?, latency)
    }

    /// The underlying catalog data.
    #[must_use]
    pub fn data(&self) -> &CatalogData {
        &self.inner.data
    }

    /// Sleep for a random duration within the configured latency range.
    async fn simulate_latency(&self) {
        let Some(latency) = self.inner.latency else {
            return;
        };

        let delay = if latency.min == latency.max {
            latency.min
        } else {
            rand::rng().random_range(latency.min..=latency.max)
        };

        debug!(delay_ms = delay.as_millis(), "Simulating catalog latency");
        tokio::time::sleep(delay).await;
    }

    /// Search, filter, sort and paginate products.
    #[instrument(skip(self))]
    pub async fn search_products(&self, query: &SearchQuery) -> PaginatedResponse<Product> {
        self.simulate_latency().await;
        pipeline::search(&self.inner.data.products, query)
    }

    /// Look up a product by id or slug.
    ///
    /// # Errors
    ///
    /// Returns `PRODUCT_NOT_FOUND` if nothing matches.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id_or_slug: &str) -> Result<Product, ApiError> {
        self.simulate_latency().await;
        pipeline::find(&self.inner.data.products, id_or_slug)
            .cloned()
            .ok_or_else(|| ApiError::product_not_found(id_or_slug))
    }

    /// Search-as-you-type suggestions.
    #[instrument(skip(self))]
    pub async fn get_suggestions(&self, partial: &str) -> Suggestions {
        self.simulate_latency().await;
        pipeline::suggest(&self.inner.data, partial)
    }

    /// Other products in the same category.
    ///
    /// # Errors
    ///
    /// Returns `PRODUCT_NOT_FOUND` if the source product does not exist.
    #[instrument(skip(self))]
    pub async fn get_related_products(&self, product_id: &str) -> Result<Vec<Product>, ApiError> {
        self.simulate_latency().await;
        pipeline::related(&self.inner.data.products, product_id)
            .ok_or_else(|| ApiError::product_not_found(product_id))
    }

    /// Products carrying the `bestseller` badge.
    #[instrument(skip(self))]
    pub async fn get_featured_products(&self) -> Vec<Product> {
        self.simulate_latency().await;
        pipeline::featured(&self.inner.data.products)
    }
}
