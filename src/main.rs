mod api;

use axum::Router;
use std::sync::Arc;
use titan::config::Config;
use titan::{AnalysisService, ScoringProfile, YahooFinanceClient};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub analysis: Arc<AnalysisService>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "titan=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env());
    info!("Starting Titan server on {}:{}", config.host, config.port);

    let profile = ScoringProfile::preset(&config.scoring_profile).unwrap_or_else(|| {
        warn!(
            "Unknown scoring profile '{}', using titan",
            config.scoring_profile
        );
        ScoringProfile::titan()
    });

    let source = Arc::new(YahooFinanceClient::new(config.fetch_timeout)?);
    let analysis = Arc::new(
        AnalysisService::new(source, config.bar_cache_ttl)
            .with_profile(profile)
            .with_min_summary_bars(config.min_summary_bars),
    );

    // Sweep expired fetches
    {
        let analysis = analysis.clone();
        let period = config.bar_cache_ttl.max(std::time::Duration::from_secs(1));
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(period).await;
                analysis.cache().cleanup();
            }
        });
    }

    let state = AppState {
        config: config.clone(),
        analysis,
    };

    // Build CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    let app = Router::new()
        .merge(api::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start the server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Titan server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
