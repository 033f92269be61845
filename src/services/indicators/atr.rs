//! Average True Range (ATR) indicator.

use super::{rolling_mean, Indicator};
use crate::types::{Bar, IndicatorCategory, IndicatorSeries};

/// ATR (Average True Range) indicator.
///
/// Measures market volatility by calculating the average of true ranges:
/// TR = max(High-Low, |High-PrevClose|, |Low-PrevClose|)
///
/// The first bar has no previous close, so its TR is High-Low. ATR is the
/// plain trailing mean of TR.
pub struct Atr {
    period: usize,
}

impl Default for Atr {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Atr {
    pub fn new(period: usize) -> Self {
        Self {
            period: period.max(1),
        }
    }

    /// Calculate True Range.
    fn true_range(current: &Bar, previous: Option<&Bar>) -> f64 {
        let hl = current.high - current.low;
        match previous {
            Some(prev) => {
                let hc = (current.high - prev.close).abs();
                let lc = (current.low - prev.close).abs();
                hl.max(hc).max(lc)
            }
            None => hl,
        }
    }
}

impl Indicator for Atr {
    type Output = IndicatorSeries;

    fn id(&self) -> &str {
        "atr"
    }

    fn name(&self) -> String {
        format!("ATR ({})", self.period)
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Volatility
    }

    fn warmup(&self) -> usize {
        self.period
    }

    fn calculate(&self, bars: &[Bar]) -> IndicatorSeries {
        let true_ranges: Vec<f64> = bars
            .iter()
            .enumerate()
            .map(|(i, bar)| Self::true_range(bar, i.checked_sub(1).map(|p| &bars[p])))
            .collect();

        IndicatorSeries::new(rolling_mean(&true_ranges, self.period))
    }
}
