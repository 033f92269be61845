//! Bollinger Bands indicator.

use super::Indicator;
use crate::types::{Bar, IndicatorCategory, IndicatorSeries};

/// Bollinger Bands indicator.
///
/// Consists of:
/// - Middle band: SMA(20)
/// - Upper band: SMA + 2 * StdDev
/// - Lower band: SMA - 2 * StdDev
/// - Bandwidth: (Upper - Lower) / Middle
///
/// StdDev is the sample (n - 1) standard deviation of the close.
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

/// Band lines and normalized width.
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerOutput {
    pub middle: IndicatorSeries,
    pub upper: IndicatorSeries,
    pub lower: IndicatorSeries,
    pub bandwidth: IndicatorSeries,
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev_multiplier: 2.0,
        }
    }
}

impl BollingerBands {
    pub fn new(period: usize, std_dev_multiplier: f64) -> Self {
        Self {
            period: period.max(2),
            std_dev_multiplier,
        }
    }

    /// Calculate sample standard deviation.
    fn std_dev(values: &[f64], mean: f64) -> f64 {
        if values.len() < 2 {
            return 0.0;
        }
        let variance: f64 =
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
        variance.sqrt()
    }
}

impl Indicator for BollingerBands {
    type Output = BollingerOutput;

    fn id(&self) -> &str {
        "bollinger"
    }

    fn name(&self) -> String {
        format!("Bollinger Bands ({},{})", self.period, self.std_dev_multiplier)
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Volatility
    }

    fn warmup(&self) -> usize {
        self.period
    }

    fn calculate(&self, bars: &[Bar]) -> BollingerOutput {
        let closes: Vec<f64> = bars.iter().map(|c| c.close).collect();
        let len = closes.len();

        let mut middle = vec![None; len];
        let mut upper = vec![None; len];
        let mut lower = vec![None; len];
        let mut bandwidth = vec![None; len];

        for i in (self.period - 1)..len {
            let window = &closes[i + 1 - self.period..=i];
            let mean = window.iter().sum::<f64>() / self.period as f64;
            let offset = Self::std_dev(window, mean) * self.std_dev_multiplier;

            middle[i] = Some(mean);
            upper[i] = Some(mean + offset);
            lower[i] = Some(mean - offset);
            // Prices are positive, so the mean is too.
            bandwidth[i] = Some(2.0 * offset / mean);
        }

        BollingerOutput {
            middle: IndicatorSeries::new(middle),
            upper: IndicatorSeries::new(upper),
            lower: IndicatorSeries::new(lower),
            bandwidth: IndicatorSeries::new(bandwidth),
        }
    }
}
