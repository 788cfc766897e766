//! Catalog query service.
//!
//! # Architecture
//!
//! [`Catalog`] answers "which products match these filters, in what order,
//! on which page". It is backed by one of:
//!
//! - [`FixtureCatalog`] - in-memory JSON fixtures, runs the query pipeline
//!   locally and can simulate network latency
//! - [`HttpCatalog`] - a remote catalog API with the same contract, cached
//!   via `moka`
//!
//! Not-found and upstream failures are values (`Result<_, ApiError>`),
//! never panics.

mod cache;
pub mod fixtures;
mod http;
pub mod pipeline;

use std::path::PathBuf;

use nanasu_core::{ApiError, PaginatedResponse, Product, ProductError, SearchQuery, Suggestions};
use thiserror::Error;

pub use fixtures::{CatalogData, FixtureCatalog};
pub use http::HttpCatalog;

use crate::config::CatalogConfig;

/// Errors that can occur while setting up a catalog backend.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Fixture file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Fixture JSON is malformed.
    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A product breaks an invariant.
    #[error(transparent)]
    InvalidProduct(#[from] ProductError),

    #[error("duplicate product id: {0}")]
    DuplicateId(String),

    #[error("duplicate product slug: {0}")]
    DuplicateSlug(String),

    /// HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// The catalog service, dispatching to the configured backend.
#[derive(Clone)]
pub enum Catalog {
    Fixture(FixtureCatalog),
    Http(HttpCatalog),
}

impl Catalog {
    /// Build the backend described by the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if fixtures cannot be loaded or the HTTP client
    /// cannot be built.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        match config {
            CatalogConfig::Fixtures { path: None, latency } => {
                Ok(Self::Fixture(FixtureCatalog::bundled(*latency)?))
            }
            CatalogConfig::Fixtures {
                path: Some(path),
                latency,
            } => Ok(Self::Fixture(FixtureCatalog::from_path(path, *latency)?)),
            CatalogConfig::Http(api) => Ok(Self::Http(HttpCatalog::new(api)?)),
        }
    }

    /// Short backend name for logs.
    #[must_use]
    pub const fn backend_name(&self) -> &'static str {
        match self {
            Self::Fixture(_) => "fixtures",
            Self::Http(_) => "http",
        }
    }

    /// Whether the catalog can serve requests.
    ///
    /// Fixture catalogs are ready once they hold products; the HTTP backend
    /// is always considered ready since failures surface per request.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        match self {
            Self::Fixture(catalog) => !catalog.data().products.is_empty(),
            Self::Http(_) => true,
        }
    }

    /// Search, filter, sort and paginate products.
    ///
    /// # Errors
    ///
    /// Only the HTTP backend can fail, with a normalized upstream error.
    pub async fn search_products(
        &self,
        query: &SearchQuery,
    ) -> Result<PaginatedResponse<Product>, ApiError> {
        match self {
            Self::Fixture(catalog) => Ok(catalog.search_products(query).await),
            Self::Http(catalog) => catalog.search_products(query).await,
        }
    }

    /// Look up a product by exact id or slug.
    ///
    /// # Errors
    ///
    /// Returns `PRODUCT_NOT_FOUND` if nothing matches, or a normalized
    /// upstream error.
    pub async fn get_product(&self, id_or_slug: &str) -> Result<Product, ApiError> {
        match self {
            Self::Fixture(catalog) => catalog.get_product(id_or_slug).await,
            Self::Http(catalog) => catalog.get_product(id_or_slug).await,
        }
    }

    /// Search-as-you-type suggestions.
    ///
    /// # Errors
    ///
    /// Only the HTTP backend can fail, with a normalized upstream error.
    pub async fn get_suggestions(&self, partial: &str) -> Result<Suggestions, ApiError> {
        match self {
            Self::Fixture(catalog) => Ok(catalog.get_suggestions(partial).await),
            Self::Http(catalog) => catalog.get_suggestions(partial).await,
        }
    }

    /// Up to four other products from the same category.
    ///
    /// # Errors
    ///
    /// Returns `PRODUCT_NOT_FOUND` if the source product does not exist, or a
    /// normalized upstream error.
    pub async fn get_related_products(&self, product_id: &str) -> Result<Vec<Product>, ApiError> {
        match self {
            Self::Fixture(catalog) => catalog.get_related_products(product_id).await,
            Self::Http(catalog) => catalog.get_related_products(product_id).await,
        }
    }

    /// Products carrying the `bestseller` badge.
    ///
    /// # Errors
    ///
    /// Only the HTTP backend can fail, with a normalized upstream error.
    pub async fn get_featured_products(&self) -> Result<Vec<Product>, ApiError> {
        match self {
            Self::Fixture(catalog) => Ok(catalog.get_featured_products().await),
            Self::Http(catalog) => catalog.get_featured_products().await,
        }
    }
}

impl From<FixtureCatalog> for Catalog {
    fn from(catalog: FixtureCatalog) -> Self {
        Self::Fixture(catalog)
    }
}

impl From<HttpCatalog> for Catalog {
    fn from(catalog: HttpCatalog) -> Self {
        Self::Http(catalog)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_config_uses_bundled_fixtures() {
        let catalog = Catalog::from_config(&CatalogConfig::default()).unwrap();
        assert_eq!(catalog.backend_name(), "fixtures");
        assert!(catalog.is_ready());

        let product = catalog.get_product("nanas-madu-premium").await.unwrap();
        assert_eq!(product.name, "Nanas Madu Premium");
    }

    #[test]
    fn test_missing_fixture_file() {
        let config = CatalogConfig::Fixtures {
            path: Some(PathBuf::from("/nonexistent/catalog.json")),
            latency: None,
        };
        assert!(matches!(
            Catalog::from_config(&config),
            Err(CatalogError::Io { .. })
        ));
    }
}
