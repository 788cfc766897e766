//! Search-as-you-type route handler.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use nanasu_core::{ApiResponse, Suggestions};
use serde::Deserialize;
use tracing::instrument;

use super::products::bad_query;
use crate::error::Result;
use crate::state::AppState;

/// Search suggestions query parameters.
#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub q: String,
}

/// Matching products, categories and sellers for a partial query.
///
/// Queries shorter than two characters get empty lists, not an error.
#[instrument(skip(state))]
pub async fn suggestions(
    State(state): State<AppState>,
    query: std::result::Result<Query<SuggestQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Suggestions>>> {
    let Query(query) = query.map_err(|e| bad_query(&e))?;

    let suggestions = state.catalog().get_suggestions(&query.q).await?;
    Ok(Json(ApiResponse::ok(suggestions)))
}
