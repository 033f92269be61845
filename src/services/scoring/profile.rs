//! Scoring profiles.
//!
//! Weights and thresholds differ between dashboard variants; each variant
//! is a named preset rather than a separate code path.

use serde::{Deserialize, Serialize};

use crate::types::{IndicatorPanel, IndicatorSeries};

/// Trend line a rule compares the close against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendLine {
    SmaFast,
    SmaSlow,
    EmaFast,
    EmaSlow,
}

impl TrendLine {
    pub fn id(&self) -> &'static str {
        match self {
            TrendLine::SmaFast => "sma_fast",
            TrendLine::SmaSlow => "sma_slow",
            TrendLine::EmaFast => "ema_fast",
            TrendLine::EmaSlow => "ema_slow",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrendLine::SmaFast => "fast SMA",
            TrendLine::SmaSlow => "slow SMA",
            TrendLine::EmaFast => "fast EMA",
            TrendLine::EmaSlow => "slow EMA",
        }
    }

    /// The panel series backing this line.
    pub fn series<'a>(&self, panel: &'a IndicatorPanel) -> &'a IndicatorSeries {
        match self {
            TrendLine::SmaFast => &panel.sma_fast,
            TrendLine::SmaSlow => &panel.sma_slow,
            TrendLine::EmaFast => &panel.ema_fast,
            TrendLine::EmaSlow => &panel.ema_slow,
        }
    }
}

/// Close-vs-trend-line rule. A zero weight disables that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendRule {
    pub line: TrendLine,
    /// Added when the close is above the line.
    pub above: i32,
    /// Subtracted when the close is below the line.
    pub below: i32,
}

/// Weights and thresholds for the composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringProfile {
    pub name: String,
    pub trend_rules: Vec<TrendRule>,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub rsi_weight: i32,
    /// Added when MACD is above its signal line, subtracted when below.
    pub macd_weight: i32,
    /// Added when K is above D.
    pub stoch_weight: i32,
    /// If set, the K-over-D rule also requires K below this level.
    pub stoch_oversold: Option<f64>,
    /// Added on a close above the upper band, subtracted below the lower band.
    pub band_breakout_weight: i32,
    /// Bandwidth below this adds an informational squeeze label.
    pub compression_threshold: Option<f64>,
    /// Symmetric clamp applied to the raw score.
    pub clamp: Option<i32>,
    /// Scores beyond +/- this are a long or short bias.
    pub bias_threshold: i32,
    pub stop_atr_multiple: f64,
    /// Stop distance as a fraction of the close when ATR is unavailable.
    pub stop_fallback_pct: f64,
    /// Bars spanned by the OBV flow comparison.
    pub flow_lookback: usize,
}

/// Names of the built-in presets.
pub const PRESETS: &[&str] = &["titan", "balanced", "conservative"];

impl ScoringProfile {
    /// Look up a built-in preset by name.
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "titan" => Some(Self::titan()),
            "balanced" => Some(Self::balanced()),
            "conservative" => Some(Self::conservative()),
            _ => None,
        }
    }

    /// Reference dashboard rules: long-only trend lines, RSI 30/70, unbounded.
    pub fn titan() -> Self {
        Self {
            name: "titan".to_string(),
            trend_rules: vec![
                TrendRule {
                    line: TrendLine::SmaFast,
                    above: 20,
                    below: 0,
                },
                TrendRule {
                    line: TrendLine::EmaSlow,
                    above: 20,
                    below: 0,
                },
            ],
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            rsi_weight: 15,
            macd_weight: 10,
            stoch_weight: 10,
            stoch_oversold: Some(20.0),
            band_breakout_weight: 0,
            compression_threshold: Some(0.05),
            clamp: None,
            bias_threshold: 20,
            stop_atr_multiple: 2.0,
            stop_fallback_pct: 0.02,
            flow_lookback: 5,
        }
    }

    /// Symmetric trend rules on both SMAs, band breakouts, clamped to +/-100.
    pub fn balanced() -> Self {
        Self {
            name: "balanced".to_string(),
            trend_rules: vec![
                TrendRule {
                    line: TrendLine::SmaFast,
                    above: 20,
                    below: 20,
                },
                TrendRule {
                    line: TrendLine::SmaSlow,
                    above: 20,
                    below: 20,
                },
            ],
            rsi_oversold: 30.0,
            rsi_overbought: 75.0,
            rsi_weight: 15,
            macd_weight: 10,
            stoch_weight: 10,
            stoch_oversold: None,
            band_breakout_weight: 5,
            compression_threshold: Some(0.05),
            clamp: Some(100),
            ..Self::titan()
        }
    }

    /// Lighter trend weights and wider RSI thresholds, clamped to +/-100.
    pub fn conservative() -> Self {
        Self {
            name: "conservative".to_string(),
            trend_rules: vec![
                TrendRule {
                    line: TrendLine::SmaFast,
                    above: 10,
                    below: 10,
                },
                TrendRule {
                    line: TrendLine::SmaSlow,
                    above: 10,
                    below: 10,
                },
                TrendRule {
                    line: TrendLine::EmaSlow,
                    above: 10,
                    below: 10,
                },
            ],
            rsi_oversold: 25.0,
            rsi_overbought: 75.0,
            band_breakout_weight: 5,
            clamp: Some(100),
            ..Self::titan()
        }
    }
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self::titan()
    }
}
