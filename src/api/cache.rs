//! Fetch cache management.

use axum::{
    extract::{Path, State},
    routing::delete,
    Json, Router,
};
use serde::Serialize;

use super::ApiResponse;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct CacheCleared {
    pub removed: usize,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", delete(clear_all))
        .route("/:symbol", delete(clear_symbol))
}

async fn clear_all(State(state): State<AppState>) -> Json<ApiResponse<CacheCleared>> {
    let removed = state.analysis.clear_cache();
    Json(ApiResponse::new(CacheCleared { removed }))
}

async fn clear_symbol(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Json<ApiResponse<CacheCleared>> {
    let removed = state.analysis.invalidate(&symbol);
    Json(ApiResponse::new(CacheCleared { removed }))
}
