pub mod aggregator;
pub mod analysis;
pub mod bar_cache;
pub mod indicators;
pub mod scoring;

pub use aggregator::{aggregate, aggregate_bars};
pub use analysis::{Analysis, AnalysisService};
pub use bar_cache::BarCache;
pub use indicators::{compute_panel, Indicator, IndicatorConfig};
pub use scoring::{score, ScoringProfile};
