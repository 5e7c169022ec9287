//! Axum route handlers for the mock product search.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

use crate::catalog::ProductListing;
use crate::errors::AppError;
use crate::state::AppState;

const DEFAULT_SEARCH_LIMIT: usize = 5;
const MAX_SEARCH_LIMIT: usize = 20;

#[derive(Debug, Deserialize)]
pub struct ProductSearchQuery {
    #[serde(default)]
    pub query: String,
    pub category: Option<String>,
    pub limit: Option<usize>,
}

/// GET /api/v1/products/search
///
/// Returns synthetic listings for a free-text query.
pub async fn handle_search_products(
    State(state): State<AppState>,
    params: Result<Query<ProductSearchQuery>, QueryRejection>,
) -> Result<Json<Vec<ProductListing>>, AppError> {
    let Query(params) = params.map_err(|e| AppError::Validation(e.body_text()))?;
    let query = params.query.trim();
    if query.is_empty() {
        return Err(AppError::Validation("query cannot be empty".to_string()));
    }

    let limit = params
        .limit
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .clamp(1, MAX_SEARCH_LIMIT);
    let category = params
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let mut rng = StdRng::from_os_rng();
    Ok(Json(state.catalog.search(query, category, limit, &mut rng)))
}
