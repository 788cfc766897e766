//! Product route handlers.

use std::fmt::Display;
use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use nanasu_core::{
    ApiResponse, CategoryId, PaginatedResponse, Price, Product, Rating, SearchQuery, SortKey,
};
use serde::{Deserialize, Deserializer};
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// Deserialize empty strings as None for optional query parameters.
///
/// Listing links are often built with every parameter present
/// (`?q=&minPrice=`), so a blank value means "filter not set".
fn empty_string_as_none<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Product listing query parameters.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub q: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub min_price: Option<Price>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub max_price: Option<Price>,
    /// Non-finite values (`NaN`, `inf`) are rejected.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub rating: Option<Rating>,
    /// Unknown sort keys fall back to newest.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub sort: Option<String>,
    /// Pages below 1 are treated as page 1.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub page: Option<i64>,
}

impl From<ProductsQuery> for SearchQuery {
    fn from(query: ProductsQuery) -> Self {
        Self {
            q: query.q,
            category: query.category.map(CategoryId::from),
            min_price: query.min_price,
            max_price: query.max_price,
            rating: query.rating.map(Rating::get),
            sort: query.sort.as_deref().map(SortKey::parse).unwrap_or_default(),
            page: query.page,
        }
    }
}

/// Turn a query string rejection into an `INVALID_QUERY` error.
pub(crate) fn bad_query(rejection: &QueryRejection) -> AppError {
    AppError::BadRequest(rejection.body_text())
}

/// Search, filter, sort and paginate products.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    query: std::result::Result<Query<ProductsQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<PaginatedResponse<Product>>>> {
    let Query(query) = query.map_err(|e| bad_query(&e))?;
    let query = SearchQuery::from(query);

    let page = state.catalog().search_products(&query).await?;

    tracing::debug!(
        total = page.pagination.total,
        page = page.pagination.page,
        "Product search"
    );

    Ok(Json(ApiResponse::ok(page)))
}

/// Bestseller products for the home page.
#[instrument(skip(state))]
pub async fn featured(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Product>>>> {
    let products = state.catalog().get_featured_products().await?;
    Ok(Json(ApiResponse::ok(products)))
}

/// Product detail by id or slug.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id_or_slug): Path<String>,
) -> Result<Json<ApiResponse<Product>>> {
    add_breadcrumb("catalog", "Viewed product", Some(&[("id_or_slug", id_or_slug.as_str())]));

    let product = state.catalog().get_product(&id_or_slug).await?;
    Ok(Json(ApiResponse::ok(product)))
}

/// Other products from the same category.
#[instrument(skip(state))]
pub async fn related(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Product>>>> {
    let products = state.catalog().get_related_products(&id).await?;
    Ok(Json(ApiResponse::ok(products)))
}
