use serde::{Deserialize, Serialize};

/// Category of a technical indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorCategory {
    Trend,
    Momentum,
    Volatility,
    Volume,
}

/// Describes one indicator contributing to a panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorInfo {
    pub id: String,
    /// Display name with parameters, e.g. `RSI (14)`.
    pub name: String,
    pub category: IndicatorCategory,
    /// Leading bars before the first value.
    pub warmup: usize,
}

/// A derived series aligned index-for-index with its bar series.
///
/// `None` marks a position that is not yet available (warm-up or a
/// degenerate input window). It is never coerced to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorSeries(Vec<Option<f64>>);

impl IndicatorSeries {
    pub fn new(values: Vec<Option<f64>>) -> Self {
        Self(values)
    }

    /// Build from raw values, hiding the first `warmup - 1` positions.
    pub fn with_warmup(values: Vec<f64>, warmup: usize) -> Self {
        let hidden = warmup.saturating_sub(1);
        Self(
            values
                .into_iter()
                .enumerate()
                .map(|(i, v)| if i < hidden { None } else { Some(v) })
                .collect(),
        )
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied().flatten()
    }

    /// Value at the most recent bar.
    pub fn latest(&self) -> Option<f64> {
        self.0.last().copied().flatten()
    }

    /// Index of the first available value.
    pub fn first_available(&self) -> Option<usize> {
        self.0.iter().position(Option::is_some)
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Whether the series covers every indicator's warm-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStatus {
    /// Longest warm-up across the panel.
    pub required: usize,
    /// Bars supplied.
    pub actual: usize,
    pub sufficient: bool,
}

/// Direction of recent on-balance volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowDirection {
    Inflow,
    Outflow,
}

/// Full set of derived series for one bar series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorPanel {
    pub sma_fast: IndicatorSeries,
    pub sma_slow: IndicatorSeries,
    pub ema_fast: IndicatorSeries,
    pub ema_slow: IndicatorSeries,
    pub macd: IndicatorSeries,
    pub macd_signal: IndicatorSeries,
    pub macd_histogram: IndicatorSeries,
    pub rsi: IndicatorSeries,
    pub stoch_k: IndicatorSeries,
    pub stoch_d: IndicatorSeries,
    pub bb_middle: IndicatorSeries,
    pub bb_upper: IndicatorSeries,
    pub bb_lower: IndicatorSeries,
    pub bb_bandwidth: IndicatorSeries,
    pub atr: IndicatorSeries,
    pub obv: IndicatorSeries,
    /// Indicators computed, in panel order.
    pub indicators: Vec<IndicatorInfo>,
    pub history: HistoryStatus,
}

impl IndicatorPanel {
    /// Capture every indicator's value at the most recent bar.
    pub fn snapshot(&self, time: i64, close: f64, prev_close: Option<f64>) -> PanelSnapshot {
        PanelSnapshot {
            time,
            close,
            change: prev_close.map(|p| close - p),
            sma_fast: self.sma_fast.latest(),
            sma_slow: self.sma_slow.latest(),
            ema_fast: self.ema_fast.latest(),
            ema_slow: self.ema_slow.latest(),
            macd: self.macd.latest(),
            macd_signal: self.macd_signal.latest(),
            macd_histogram: self.macd_histogram.latest(),
            rsi: self.rsi.latest(),
            stoch_k: self.stoch_k.latest(),
            stoch_d: self.stoch_d.latest(),
            bb_upper: self.bb_upper.latest(),
            bb_lower: self.bb_lower.latest(),
            bb_bandwidth: self.bb_bandwidth.latest(),
            atr: self.atr.latest(),
            obv: self.obv.latest(),
        }
    }
}

/// Indicator values at the latest bar, for summary display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelSnapshot {
    pub time: i64,
    pub close: f64,
    /// Close minus the previous close.
    pub change: Option<f64>,
    pub sma_fast: Option<f64>,
    pub sma_slow: Option<f64>,
    pub ema_fast: Option<f64>,
    pub ema_slow: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub rsi: Option<f64>,
    pub stoch_k: Option<f64>,
    pub stoch_d: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_lower: Option<f64>,
    pub bb_bandwidth: Option<f64>,
    pub atr: Option<f64>,
    pub obv: Option<f64>,
}
