//! Analysis API endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use titan::{Analysis, CompositeScore, HistoryStatus, PanelSnapshot};

use super::{ApiResponse, AppError};
use crate::AppState;

const DEFAULT_INTERVAL: &str = "1d";

/// Query parameters for analysis endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct AnalysisQuery {
    /// Interval label (15m, 30m, 1h, 4h, 1d, 1wk, 6mo, 1y). Defaults to 1d.
    pub interval: Option<String>,
    /// Scoring preset (titan, balanced, conservative).
    pub profile: Option<String>,
}

impl AnalysisQuery {
    fn interval(&self) -> &str {
        self.interval.as_deref().unwrap_or(DEFAULT_INTERVAL)
    }
}

/// Latest values and score without the full series.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub symbol: String,
    pub interval: String,
    pub bias: &'static str,
    pub snapshot: PanelSnapshot,
    pub score: CompositeScore,
    pub history: HistoryStatus,
}

/// Create the analysis router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:symbol", get(get_analysis))
        .route("/:symbol/summary", get(get_summary))
}

/// Full series, indicator panel and score for a symbol.
async fn get_analysis(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<AnalysisQuery>,
) -> Result<Json<ApiResponse<Analysis>>, AppError> {
    let analysis = state
        .analysis
        .analyze(&symbol, query.interval(), query.profile.as_deref())
        .await?;
    let cached = analysis.cached;
    Ok(Json(ApiResponse::with_cached(analysis, cached)))
}

/// Latest-bar summary. Refused when the series is too short to be meaningful.
async fn get_summary(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<AnalysisQuery>,
) -> Result<Json<ApiResponse<SummaryResponse>>, AppError> {
    let analysis = state
        .analysis
        .analyze(&symbol, query.interval(), query.profile.as_deref())
        .await?;

    if !analysis.summary_ready {
        return Err(AppError::Unprocessable(format!(
            "{} bars at {} for {}, need {} for a summary",
            analysis.bars.len(),
            analysis.interval,
            analysis.symbol,
            state.config.min_summary_bars
        )));
    }

    let cached = analysis.cached;
    Ok(Json(ApiResponse::with_cached(
        SummaryResponse {
            bias: analysis.score.bias.label(),
            symbol: analysis.symbol,
            interval: analysis.interval,
            snapshot: analysis.snapshot,
            history: analysis.panel.history,
            score: analysis.score,
        },
        cached,
    )))
}
