//! Fetch → aggregate → indicators → score pipeline for one symbol.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{EngineError, Result};
use crate::services::aggregator::aggregate;
use crate::services::bar_cache::BarCache;
use crate::services::indicators::{compute_panel, IndicatorConfig};
use crate::services::scoring::{score, ScoringProfile};
use crate::sources::BarSource;
use crate::types::{Bar, BarSeries, CompositeScore, IndicatorPanel, IntervalSpec, PanelSnapshot};

/// Bars needed before the summary view is shown: one more than the
/// slowest default trend line.
pub const DEFAULT_MIN_SUMMARY_BARS: usize = 61;

/// Result of analyzing one symbol at one interval.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub symbol: String,
    pub interval: String,
    pub spec: IntervalSpec,
    pub bars: Vec<Bar>,
    /// Exchange offset from UTC at the latest bar.
    pub utc_offset_secs: i32,
    /// IANA zone used for bucket alignment, when known.
    pub timezone: Option<String>,
    pub panel: IndicatorPanel,
    pub snapshot: PanelSnapshot,
    pub score: CompositeScore,
    /// False when the series is too short for a meaningful summary.
    pub summary_ready: bool,
    /// True when the bars came from the fetch cache.
    #[serde(skip)]
    pub cached: bool,
    pub computed_at: DateTime<Utc>,
}

/// Runs analyses against a bar source, caching raw fetches.
pub struct AnalysisService {
    source: Arc<dyn BarSource>,
    cache: BarCache,
    indicators: IndicatorConfig,
    profile: ScoringProfile,
    min_summary_bars: usize,
}

impl AnalysisService {
    pub fn new(source: Arc<dyn BarSource>, cache_ttl: Duration) -> Self {
        Self {
            source,
            cache: BarCache::new(cache_ttl),
            indicators: IndicatorConfig::default(),
            profile: ScoringProfile::default(),
            min_summary_bars: DEFAULT_MIN_SUMMARY_BARS,
        }
    }

    /// Profile used when a request names none.
    pub fn with_profile(mut self, profile: ScoringProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_min_summary_bars(mut self, min_summary_bars: usize) -> Self {
        self.min_summary_bars = min_summary_bars;
        self
    }

    pub fn default_profile(&self) -> &ScoringProfile {
        &self.profile
    }

    pub fn cache(&self) -> &BarCache {
        &self.cache
    }

    /// Analyze `symbol` at the interval `label`, optionally under a named
    /// scoring preset.
    pub async fn analyze(
        &self,
        symbol: &str,
        label: &str,
        profile: Option<&str>,
    ) -> Result<Analysis> {
        let spec = IntervalSpec::resolve(label)
            .ok_or_else(|| EngineError::UnknownInterval(label.to_string()))?;
        let profile = match profile {
            Some(name) => ScoringProfile::preset(name)
                .ok_or_else(|| EngineError::UnknownProfile(name.to_string()))?,
            None => self.profile.clone(),
        };
        let symbol = symbol.trim().to_uppercase();

        let (base, cached) = self.load_bars(&symbol, &spec).await?;
        let series = match spec.bucket() {
            Some(bucket) => {
                let series = aggregate(&base, bucket)?;
                debug!(
                    "{}: {} {} bars -> {} {} bars",
                    symbol,
                    base.len(),
                    spec.base(),
                    series.len(),
                    label
                );
                series
            }
            None => base,
        };

        let panel = compute_panel(&series, &self.indicators);
        let bars = series.bars();
        let last = series.last();
        let prev_close = bars.len().checked_sub(2).map(|i| bars[i].close);
        let snapshot = panel.snapshot(last.time, last.close, prev_close);
        let score = score(&series, &panel, &profile);
        let summary_ready = series.len() >= self.min_summary_bars;

        if !panel.history.sufficient {
            debug!(
                "{} @ {}: {} bars, indicators need {}",
                symbol, label, panel.history.actual, panel.history.required
            );
        }
        info!(
            "Analyzed {} @ {} [{}]: score {} ({})",
            symbol,
            label,
            profile.name,
            score.value,
            score.bias.label()
        );

        Ok(Analysis {
            symbol,
            interval: label.to_string(),
            spec,
            utc_offset_secs: series.utc_offset_secs(),
            timezone: series.clock().timezone().map(str::to_string),
            bars: series.into_bars(),
            panel,
            snapshot,
            score,
            summary_ready,
            cached,
            computed_at: Utc::now(),
        })
    }

    /// Drop cached fetches for one symbol.
    pub fn invalidate(&self, symbol: &str) -> usize {
        let removed = self.cache.invalidate_symbol(symbol.trim());
        info!("Invalidated {} cached fetches for {}", removed, symbol);
        removed
    }

    /// Drop every cached fetch.
    pub fn clear_cache(&self) -> usize {
        let removed = self.cache.clear();
        info!("Cleared {} cached fetches", removed);
        removed
    }

    /// Validated base series from the cache or a fresh fetch, and whether
    /// it was cached.
    async fn load_bars(&self, symbol: &str, spec: &IntervalSpec) -> Result<(BarSeries, bool)> {
        let (base, lookback) = (spec.base(), spec.lookback());
        if let Some(hit) = self.cache.get(symbol, base, lookback) {
            debug!("Cache hit: {} {} {}", symbol, base, lookback);
            return Ok((hit.to_series()?, true));
        }

        debug!(
            "Cache miss: {} {} {}, fetching from {}",
            symbol,
            base,
            lookback,
            self.source.name()
        );
        let fetched = self
            .source
            .fetch(symbol, base, lookback)
            .await
            .map_err(|e| {
                warn!("Fetch failed for {} {}: {}", symbol, base, e);
                EngineError::from(e)
            })?;

        // Empty or malformed responses are not cached.
        if fetched.bars.is_empty() {
            return Err(EngineError::NoData);
        }
        let series = fetched.to_series().map_err(|e| {
            warn!("Rejected {} {} bars: {}", symbol, base, e);
            e
        })?;

        self.cache.insert(symbol, base, lookback, fetched);
        Ok((series, false))
    }
}
