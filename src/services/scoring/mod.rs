//! Composite scoring.
//!
//! Each rule reads the latest bar's indicator values. A rule whose inputs
//! are not yet available is skipped: it adds nothing and emits no label.

pub mod profile;

pub use profile::{ScoringProfile, TrendLine, TrendRule, PRESETS};

use crate::services::indicators::Obv;
use crate::types::{
    Bias, BarSeries, CompositeScore, IndicatorPanel, Polarity, SignalLabel, StopLevels,
};

/// Accumulates fired rules.
struct Tally {
    raw: i32,
    signals: Vec<SignalLabel>,
}

impl Tally {
    fn new() -> Self {
        Self {
            raw: 0,
            signals: Vec::new(),
        }
    }

    fn bullish(&mut self, id: impl Into<String>, text: impl Into<String>, weight: i32) {
        if weight == 0 {
            return;
        }
        self.raw += weight;
        self.push(id, text, Polarity::Bullish, weight);
    }

    fn bearish(&mut self, id: impl Into<String>, text: impl Into<String>, weight: i32) {
        if weight == 0 {
            return;
        }
        self.raw -= weight;
        self.push(id, text, Polarity::Bearish, -weight);
    }

    fn info(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.push(id, text, Polarity::Info, 0);
    }

    fn push(&mut self, id: impl Into<String>, text: impl Into<String>, polarity: Polarity, weight: i32) {
        self.signals.push(SignalLabel {
            id: id.into(),
            text: text.into(),
            polarity,
            weight,
        });
    }
}

/// Score the latest bar of `series` using its computed `panel`.
pub fn score(series: &BarSeries, panel: &IndicatorPanel, profile: &ScoringProfile) -> CompositeScore {
    let close = series.last().close;
    let mut tally = Tally::new();

    for rule in &profile.trend_rules {
        let Some(line) = rule.line.series(panel).latest() else {
            continue;
        };
        if close > line {
            tally.bullish(
                format!("above_{}", rule.line.id()),
                format!("Close above {}", rule.line.label()),
                rule.above,
            );
        } else if close < line {
            tally.bearish(
                format!("below_{}", rule.line.id()),
                format!("Close below {}", rule.line.label()),
                rule.below,
            );
        }
    }

    if let Some(rsi) = panel.rsi.latest() {
        if rsi < profile.rsi_oversold {
            tally.bullish(
                "rsi_oversold",
                "RSI oversold (rebound likely)",
                profile.rsi_weight,
            );
        } else if rsi > profile.rsi_overbought {
            tally.bearish("rsi_overbought", "RSI overbought (overheated)", profile.rsi_weight);
        }
    }

    if let (Some(macd), Some(signal)) = (panel.macd.latest(), panel.macd_signal.latest()) {
        if macd > signal {
            tally.bullish("macd_bullish", "MACD above signal (golden cross)", profile.macd_weight);
        } else if macd < signal {
            tally.bearish("macd_bearish", "MACD below signal (death cross)", profile.macd_weight);
        }
    }

    if let (Some(k), Some(d)) = (panel.stoch_k.latest(), panel.stoch_d.latest()) {
        let in_zone = profile.stoch_oversold.map_or(true, |level| k < level);
        if k > d && in_zone {
            let text = if profile.stoch_oversold.is_some() {
                "KD golden cross in oversold zone"
            } else {
                "KD golden cross"
            };
            tally.bullish("kd_bullish", text, profile.stoch_weight);
        }
    }

    if let (Some(upper), Some(lower)) = (panel.bb_upper.latest(), panel.bb_lower.latest()) {
        if close > upper {
            tally.bullish(
                "band_breakout_up",
                "Close above upper band (momentum breakout)",
                profile.band_breakout_weight,
            );
        } else if close < lower {
            tally.bearish(
                "band_breakout_down",
                "Close below lower band",
                profile.band_breakout_weight,
            );
        }
    }

    if let (Some(bandwidth), Some(threshold)) =
        (panel.bb_bandwidth.latest(), profile.compression_threshold)
    {
        if bandwidth < threshold {
            tally.info(
                "band_squeeze",
                "Bollinger bands compressed (breakout imminent)",
            );
        }
    }

    let value = match profile.clamp {
        Some(limit) => tally.raw.clamp(-limit.abs(), limit.abs()),
        None => tally.raw,
    };

    CompositeScore {
        profile: profile.name.clone(),
        raw: tally.raw,
        value,
        bias: Bias::from_score(value, profile.bias_threshold),
        signals: tally.signals,
        stops: stop_levels(close, panel.atr.latest(), profile),
        flow: Obv::flow(&panel.obv, profile.flow_lookback),
    }
}

/// Protective-stop references around `close`.
pub fn stop_levels(close: f64, atr: Option<f64>, profile: &ScoringProfile) -> StopLevels {
    let (distance, atr_based) = match atr {
        Some(atr) => (atr * profile.stop_atr_multiple, true),
        None => (close * profile.stop_fallback_pct, false),
    };

    StopLevels {
        distance,
        long: close - distance,
        short: close + distance,
        atr_based,
    }
}
