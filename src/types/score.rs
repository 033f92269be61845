use serde::{Deserialize, Serialize};

use super::FlowDirection;

/// Which way a fired rule pushes the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Bullish,
    Bearish,
    /// Explanatory only; carries no weight.
    Info,
}

/// A fired rule and the weight it contributed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalLabel {
    /// Stable rule identifier (e.g. "rsi_oversold").
    pub id: String,
    /// Human-readable explanation.
    pub text: String,
    pub polarity: Polarity,
    pub weight: i32,
}

/// Directional bias derived from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bias {
    Long,
    Short,
    Range,
}

impl Bias {
    /// Long above `threshold`, short below `-threshold`, range otherwise.
    pub fn from_score(score: i32, threshold: i32) -> Self {
        if score > threshold {
            Bias::Long
        } else if score < -threshold {
            Bias::Short
        } else {
            Bias::Range
        }
    }

    /// Get display label for this bias.
    pub fn label(&self) -> &'static str {
        match self {
            Bias::Long => "Aggressive Long",
            Bias::Short => "Lean Short",
            Bias::Range => "Range Bound",
        }
    }
}

/// Suggested protective-stop prices around the last close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopLevels {
    /// Distance from the last close to each stop.
    pub distance: f64,
    /// Stop for a long position (close - distance).
    pub long: f64,
    /// Stop for a short position (close + distance).
    pub short: f64,
    /// False when ATR was unavailable and the percentage fallback was used.
    pub atr_based: bool,
}

/// Rule-based directional score for the latest bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeScore {
    /// Name of the scoring profile that produced this score.
    pub profile: String,
    /// Sum of fired weights.
    pub raw: i32,
    /// `raw` after the profile's clamp, if any.
    pub value: i32,
    pub bias: Bias,
    /// Fired rules in evaluation order.
    pub signals: Vec<SignalLabel>,
    pub stops: StopLevels,
    pub flow: Option<FlowDirection>,
}

impl CompositeScore {
    pub fn bullish(&self) -> impl Iterator<Item = &SignalLabel> {
        self.by_polarity(Polarity::Bullish)
    }

    pub fn bearish(&self) -> impl Iterator<Item = &SignalLabel> {
        self.by_polarity(Polarity::Bearish)
    }

    pub fn info(&self) -> impl Iterator<Item = &SignalLabel> {
        self.by_polarity(Polarity::Info)
    }

    /// Whether the rule with this id fired.
    pub fn fired(&self, id: &str) -> bool {
        self.signals.iter().any(|s| s.id == id)
    }

    fn by_polarity(&self, polarity: Polarity) -> impl Iterator<Item = &SignalLabel> {
        self.signals.iter().filter(move |s| s.polarity == polarity)
    }
}
