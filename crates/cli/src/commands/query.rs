//! Catalog query commands.
//!
//! Each command prints the `{success, data | error}` envelope, exactly as
//! the storefront API would return it.

use std::path::Path;

use nanasu_core::{ApiError, ApiResponse, CategoryId, Price, Rating, SearchQuery, SortKey};
use nanasu_storefront::catalog::Catalog;
use nanasu_storefront::config::CatalogConfig;
use serde::Serialize;

use super::{CliError, print_json};

/// Flags of the `search` command.
#[derive(Debug)]
pub struct SearchArgs {
    pub q: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<Price>,
    pub max_price: Option<Price>,
    pub rating: Option<Rating>,
    pub sort: String,
    pub page: Option<i64>,
}

impl From<SearchArgs> for SearchQuery {
    fn from(args: SearchArgs) -> Self {
        Self {
            q: args.q,
            category: args.category.map(CategoryId::from),
            min_price: args.min_price,
            max_price: args.max_price,
            rating: args.rating.map(Rating::get),
            sort: SortKey::parse(&args.sort),
            page: args.page,
        }
    }
}

/// Open the catalog from `--fixtures` or the environment.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the catalog cannot
/// be loaded.
pub fn open_catalog(fixtures: Option<&Path>) -> Result<Catalog, CliError> {
    let config = match fixtures {
        Some(path) => CatalogConfig::Fixtures {
            path: Some(path.to_path_buf()),
            latency: None,
        },
        None => {
            // Load .env file if present (ignore errors if not found)
            let _ = dotenvy::dotenv();
            CatalogConfig::from_env()?
        }
    };

    let catalog = Catalog::from_config(&config)?;
    tracing::debug!(backend = catalog.backend_name(), "Catalog opened");
    Ok(catalog)
}

/// Print a result as an envelope and report whether it succeeded.
fn respond<T: Serialize>(result: Result<T, ApiError>) -> Result<bool, CliError> {
    let response = ApiResponse::from(result);
    print_json(&response)?;
    Ok(response.success)
}

pub async fn search(catalog: &Catalog, args: SearchArgs) -> Result<bool, CliError> {
    let query = SearchQuery::from(args);
    tracing::debug!(?query, "Searching");
    respond(catalog.search_products(&query).await)
}

pub async fn product(catalog: &Catalog, id_or_slug: &str) -> Result<bool, CliError> {
    respond(catalog.get_product(id_or_slug).await)
}

pub async fn suggest(catalog: &Catalog, partial: &str) -> Result<bool, CliError> {
    respond(catalog.get_suggestions(partial).await)
}

pub async fn related(catalog: &Catalog, id: &str) -> Result<bool, CliError> {
    respond(catalog.get_related_products(id).await)
}

pub async fn featured(catalog: &Catalog) -> Result<bool, CliError> {
    respond(catalog.get_featured_products().await)
}
