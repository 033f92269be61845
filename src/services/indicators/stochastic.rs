//! Stochastic Oscillator indicator.

use super::{exp_smooth_sparse, Indicator};
use crate::types::{Bar, IndicatorCategory, IndicatorSeries};

/// Stochastic Oscillator (KD).
///
/// Compares closing price to price range over a period:
/// RSV = (Close - Lowest Low) / (Highest High - Lowest Low) * 100
///
/// K is RSV smoothed recursively with factor `1 / k_smoothing`, D is K
/// smoothed the same way with `1 / d_smoothing`. Both are seeded by their
/// first defined input. A window with zero range has no RSV, and K and D
/// are unavailable at that index; the smoothing state carries across it.
pub struct Stochastic {
    period: usize,
    k_smoothing: usize,
    d_smoothing: usize,
}

/// K and D lines.
#[derive(Debug, Clone, PartialEq)]
pub struct StochasticOutput {
    pub k: IndicatorSeries,
    pub d: IndicatorSeries,
}

impl Default for Stochastic {
    fn default() -> Self {
        Self {
            period: 9,
            k_smoothing: 3,
            d_smoothing: 3,
        }
    }
}

impl Stochastic {
    pub fn new(period: usize, k_smoothing: usize, d_smoothing: usize) -> Self {
        Self {
            period: period.max(1),
            k_smoothing: k_smoothing.max(1),
            d_smoothing: d_smoothing.max(1),
        }
    }

    /// Raw stochastic value per bar; `None` in warm-up or on a zero range.
    fn rsv(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        (0..bars.len())
            .map(|i| {
                if i + 1 < self.period {
                    return None;
                }
                let window = &bars[i + 1 - self.period..=i];

                let lowest_low = window.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
                let highest_high = window
                    .iter()
                    .map(|c| c.high)
                    .fold(f64::NEG_INFINITY, f64::max);

                let range = highest_high - lowest_low;
                if range <= 0.0 {
                    return None;
                }
                Some((bars[i].close - lowest_low) / range * 100.0)
            })
            .collect()
    }
}

impl Indicator for Stochastic {
    type Output = StochasticOutput;

    fn id(&self) -> &str {
        "stochastic"
    }

    fn name(&self) -> String {
        format!(
            "KD ({},{},{})",
            self.period, self.k_smoothing, self.d_smoothing
        )
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Momentum
    }

    fn warmup(&self) -> usize {
        self.period
    }

    fn calculate(&self, bars: &[Bar]) -> StochasticOutput {
        let rsv = self.rsv(bars);
        let k = exp_smooth_sparse(&rsv, 1.0 / self.k_smoothing as f64);
        let d = exp_smooth_sparse(&k, 1.0 / self.d_smoothing as f64);

        StochasticOutput {
            k: IndicatorSeries::new(k),
            d: IndicatorSeries::new(d),
        }
    }
}
