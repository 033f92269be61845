//! Technical indicator implementations.
//!
//! Every indicator is causal: the value at index `i` uses only bars at
//! indices `<= i`. Positions inside an indicator's warm-up are `None`.

pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod obv;
pub mod rsi;
pub mod sma;
pub mod stochastic;

pub use atr::Atr;
pub use bollinger::{BollingerBands, BollingerOutput};
pub use ema::Ema;
pub use macd::{Macd, MacdOutput};
pub use obv::Obv;
pub use rsi::Rsi;
pub use sma::Sma;
pub use stochastic::{Stochastic, StochasticOutput};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{
    Bar, BarSeries, HistoryStatus, IndicatorCategory, IndicatorInfo, IndicatorPanel,
};

/// Trait for implementing technical indicators.
pub trait Indicator {
    /// Series (or group of series) produced.
    type Output;

    /// Unique identifier for this indicator.
    fn id(&self) -> &str;

    /// Human-readable name including parameters.
    fn name(&self) -> String;

    /// Category this indicator belongs to.
    fn category(&self) -> IndicatorCategory;

    /// Minimum number of leading bars before values are meaningful.
    fn warmup(&self) -> usize;

    /// Calculate the indicator over the full bar history.
    fn calculate(&self, bars: &[Bar]) -> Self::Output;

    /// Metadata reported alongside the panel.
    fn info(&self) -> IndicatorInfo {
        IndicatorInfo {
            id: self.id().to_string(),
            name: self.name(),
            category: self.category(),
            warmup: self.warmup(),
        }
    }
}

/// Indicator parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IndicatorConfig {
    pub sma_fast: usize,
    pub sma_slow: usize,
    pub ema_fast: usize,
    pub ema_slow: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub rsi_period: usize,
    pub stoch_period: usize,
    /// K smoothing length; the smoothing factor is `1 / stoch_k_smoothing`.
    pub stoch_k_smoothing: usize,
    /// D smoothing length; the smoothing factor is `1 / stoch_d_smoothing`.
    pub stoch_d_smoothing: usize,
    pub bb_period: usize,
    pub bb_multiplier: f64,
    pub atr_period: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sma_fast: 20,
            sma_slow: 60,
            ema_fast: 20,
            ema_slow: 200,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            rsi_period: 14,
            stoch_period: 9,
            stoch_k_smoothing: 3,
            stoch_d_smoothing: 3,
            bb_period: 20,
            bb_multiplier: 2.0,
            atr_period: 14,
        }
    }
}

/// Compute the full indicator panel for a series.
pub fn compute_panel(series: &BarSeries, config: &IndicatorConfig) -> IndicatorPanel {
    let bars = series.bars();

    let sma_fast = Sma::new(config.sma_fast);
    let sma_slow = Sma::new(config.sma_slow);
    let ema_fast = Ema::new(config.ema_fast);
    let ema_slow = Ema::new(config.ema_slow);
    let macd = Macd::new(config.macd_fast, config.macd_slow, config.macd_signal);
    let rsi = Rsi::new(config.rsi_period);
    let stochastic = Stochastic::new(
        config.stoch_period,
        config.stoch_k_smoothing,
        config.stoch_d_smoothing,
    );
    let bollinger = BollingerBands::new(config.bb_period, config.bb_multiplier);
    let atr = Atr::new(config.atr_period);
    let obv = Obv;

    let indicators = vec![
        sma_fast.info(),
        sma_slow.info(),
        ema_fast.info(),
        ema_slow.info(),
        macd.info(),
        rsi.info(),
        stochastic.info(),
        bollinger.info(),
        atr.info(),
        obv.info(),
    ];
    let required = indicators.iter().map(|i| i.warmup).max().unwrap_or(1);

    let history = HistoryStatus {
        required,
        actual: bars.len(),
        sufficient: bars.len() >= required,
    };

    if !history.sufficient {
        debug!(
            "Insufficient history: {} bars, longest warm-up {}",
            bars.len(),
            required
        );
    }

    let macd_out = macd.calculate(bars);
    let stoch_out = stochastic.calculate(bars);
    let bb_out = bollinger.calculate(bars);

    IndicatorPanel {
        sma_fast: sma_fast.calculate(bars),
        sma_slow: sma_slow.calculate(bars),
        ema_fast: ema_fast.calculate(bars),
        ema_slow: ema_slow.calculate(bars),
        macd: macd_out.macd,
        macd_signal: macd_out.signal,
        macd_histogram: macd_out.histogram,
        rsi: rsi.calculate(bars),
        stoch_k: stoch_out.k,
        stoch_d: stoch_out.d,
        bb_middle: bb_out.middle,
        bb_upper: bb_out.upper,
        bb_lower: bb_out.lower,
        bb_bandwidth: bb_out.bandwidth,
        atr: atr.calculate(bars),
        obv: obv.calculate(bars),
        indicators,
        history,
    }
}

/// Recursive exponential smoothing seeded by the first value.
pub(crate) fn exp_smooth(values: &[f64], alpha: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;
    for &v in values {
        let next = match prev {
            Some(p) => p + alpha * (v - p),
            None => v,
        };
        out.push(next);
        prev = Some(next);
    }
    out
}

/// Like [`exp_smooth`], but skips undefined inputs without resetting state.
pub(crate) fn exp_smooth_sparse(values: &[Option<f64>], alpha: f64) -> Vec<Option<f64>> {
    let mut prev: Option<f64> = None;
    values
        .iter()
        .map(|v| {
            let v = (*v)?;
            let next = match prev {
                Some(p) => p + alpha * (v - p),
                None => v,
            };
            prev = Some(next);
            Some(next)
        })
        .collect()
}

/// Trailing mean over `window` values; `None` until the window is full.
pub(crate) fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let window = window.max(1);
    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            let slice = &values[i + 1 - window..=i];
            Some(slice.iter().sum::<f64>() / window as f64)
        })
        .collect()
}
