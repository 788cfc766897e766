//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::{Catalog, CatalogError};
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; handlers only need the catalog.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    catalog: Catalog,
}

impl AppState {
    /// Create a new application state, building the configured catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog backend cannot be initialized.
    pub fn new(config: &StorefrontConfig) -> Result<Self, CatalogError> {
        let catalog = Catalog::from_config(&config.catalog)?;
        Ok(Self::with_catalog(catalog))
    }

    /// Create a new application state around an existing catalog.
    #[must_use]
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner { catalog }),
        }
    }

    /// Get a reference to the catalog service.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }
}
