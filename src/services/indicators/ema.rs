//! Exponential Moving Average (EMA) indicator.

use super::{exp_smooth, Indicator};
use crate::types::{Bar, IndicatorCategory, IndicatorSeries};

/// EMA (Exponential Moving Average) indicator.
///
/// Like SMA but gives more weight to recent prices. Smoothing factor is
/// `2 / (span + 1)` and the recursion is seeded by the first close, so every
/// position has a value; the line only tracks trend after `span` bars.
pub struct Ema {
    span: usize,
}

impl Ema {
    pub fn new(span: usize) -> Self {
        Self { span: span.max(1) }
    }

    /// Smoothing factor for this span.
    pub fn alpha(&self) -> f64 {
        2.0 / (self.span as f64 + 1.0)
    }

    /// EMA of an arbitrary value sequence.
    pub fn smooth(&self, values: &[f64]) -> Vec<f64> {
        exp_smooth(values, self.alpha())
    }
}

impl Indicator for Ema {
    type Output = IndicatorSeries;

    fn id(&self) -> &str {
        "ema"
    }

    fn name(&self) -> String {
        format!("EMA ({})", self.span)
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Trend
    }

    fn warmup(&self) -> usize {
        1
    }

    fn calculate(&self, bars: &[Bar]) -> IndicatorSeries {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        IndicatorSeries::with_warmup(self.smooth(&closes), self.warmup())
    }
}
