//! Supported intervals and scoring presets.

use axum::{routing::get, Json, Router};
use serde::Serialize;
use titan::services::scoring::PRESETS;
use titan::{IntervalSpec, ScoringProfile};

use super::ApiResponse;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct IntervalInfo {
    pub label: &'static str,
    #[serde(flatten)]
    pub spec: IntervalSpec,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/intervals", get(list_intervals))
        .route("/api/profiles", get(list_profiles))
}

/// List interval labels with their fetch and aggregation plan.
async fn list_intervals() -> Json<ApiResponse<Vec<IntervalInfo>>> {
    let intervals = IntervalSpec::all()
        .iter()
        .map(|&(label, spec)| IntervalInfo { label, spec })
        .collect();
    Json(ApiResponse::new(intervals))
}

/// List built-in scoring presets.
async fn list_profiles() -> Json<ApiResponse<Vec<ScoringProfile>>> {
    let profiles = PRESETS
        .iter()
        .filter_map(|name| ScoringProfile::preset(name))
        .collect();
    Json(ApiResponse::new(profiles))
}
