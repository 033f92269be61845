//! Simple Moving Average (SMA) indicator.

use super::{rolling_mean, Indicator};
use crate::types::{Bar, IndicatorCategory, IndicatorSeries};

/// SMA (Simple Moving Average) indicator.
///
/// Arithmetic mean of the close over the trailing `period` bars.
pub struct Sma {
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self {
            period: period.max(1),
        }
    }
}

impl Indicator for Sma {
    type Output = IndicatorSeries;

    fn id(&self) -> &str {
        "sma"
    }

    fn name(&self) -> String {
        format!("SMA ({})", self.period)
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Trend
    }

    fn warmup(&self) -> usize {
        self.period
    }

    fn calculate(&self, bars: &[Bar]) -> IndicatorSeries {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        IndicatorSeries::new(rolling_mean(&closes, self.period))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_candles(closes: &[f64]) -> Vec<Bar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::new(1_000_000 + i as i64 * 60_000, c, c, c, c, 1000.0))
            .collect()
    }

    #[test]
    fn test_sma_id_and_name() {
        let sma = Sma::new(20);
        assert_eq!(sma.id(), "sma");
        assert_eq!(sma.name(), "SMA (20)");
        assert_eq!(sma.category(), IndicatorCategory::Trend);
    }

    #[test]
    fn test_sma_warmup_marking() {
        let sma = Sma::new(3);
        let out = sma.calculate(&create_candles(&[1.0, 2.0, 3.0, 4.0, 5.0]));
        assert_eq!(out.values(), &[None, None, Some(2.0), Some(3.0), Some(4.0)]);
    }

    #[test]
    fn test_sma_insufficient_data() {
        let out = Sma::new(20).calculate(&create_candles(&[1.0; 10]));
        assert!(out.values().iter().all(Option::is_none));
    }
}
