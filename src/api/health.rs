use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    default_profile: String,
    cached_fetches: usize,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        default_profile: state.analysis.default_profile().name.clone(),
        cached_fetches: state.analysis.cache().len(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::state_with_bars;

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "ok",
            version: "1.0.0",
            default_profile: "titan".to_string(),
            cached_fetches: 2,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("\"version\":\"1.0.0\""));
        assert!(json.contains("\"defaultProfile\":\"titan\""));
        assert!(json.contains("\"cachedFetches\":2"));
    }

    #[tokio::test]
    async fn test_health_handler() {
        let state = state_with_bars(10);
        let Json(response) = health(State(state.clone())).await;
        assert_eq!(response.status, "ok");
        assert_eq!(response.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(response.cached_fetches, 0);

        state.analysis.analyze("AAPL", "1d", None).await.unwrap();
        let Json(response) = health(State(state)).await;
        assert_eq!(response.cached_fetches, 1);
    }
}
