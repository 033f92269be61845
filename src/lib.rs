//! Titan - technical indicator engine with synthetic bar aggregation and
//! composite scoring

pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

// Re-export commonly used types
pub use error::{EngineError, FetchError};
pub use services::{Analysis, AnalysisService, IndicatorConfig, ScoringProfile};
pub use sources::{BarSource, FetchedBars, YahooFinanceClient};
pub use types::*;
