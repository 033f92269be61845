//! Relative Strength Index (RSI) indicator.

use super::{rolling_mean, Indicator};
use crate::types::{Bar, IndicatorCategory, IndicatorSeries};

/// RSI (Relative Strength Index) indicator.
///
/// Measures momentum by comparing the magnitude of recent gains to recent losses.
/// Values range from 0-100:
/// - Below 30: Oversold (potential buy signal)
/// - Above 70: Overbought (potential sell signal)
///
/// Gains and losses are averaged with a plain trailing mean. The first bar
/// has no previous close and counts as a zero change, so the first value
/// appears at index `period - 1`.
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self {
            period: period.max(1),
        }
    }

    /// RSI from average gain and average loss magnitude.
    fn from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            return 100.0;
        }
        let rs = avg_gain / avg_loss;
        100.0 - (100.0 / (1.0 + rs))
    }
}

impl Indicator for Rsi {
    type Output = IndicatorSeries;

    fn id(&self) -> &str {
        "rsi"
    }

    fn name(&self) -> String {
        format!("RSI ({})", self.period)
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Momentum
    }

    fn warmup(&self) -> usize {
        self.period
    }

    fn calculate(&self, bars: &[Bar]) -> IndicatorSeries {
        let mut gains = Vec::with_capacity(bars.len());
        let mut losses = Vec::with_capacity(bars.len());

        for (i, bar) in bars.iter().enumerate() {
            let change = if i == 0 {
                0.0
            } else {
                bar.close - bars[i - 1].close
            };
            gains.push(change.max(0.0));
            losses.push((-change).max(0.0));
        }

        let avg_gains = rolling_mean(&gains, self.period);
        let avg_losses = rolling_mean(&losses, self.period);

        IndicatorSeries::new(
            avg_gains
                .into_iter()
                .zip(avg_losses)
                .map(|(g, l)| Some(Self::from_averages(g?, l?)))
                .collect(),
        )
    }
}
