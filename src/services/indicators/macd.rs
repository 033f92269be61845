//! MACD (Moving Average Convergence Divergence) indicator.

use super::{Ema, Indicator};
use crate::types::{Bar, IndicatorCategory, IndicatorSeries};

/// MACD indicator.
///
/// Shows the relationship between two EMAs:
/// - MACD Line = EMA(12) - EMA(26)
/// - Signal Line = EMA(9) of MACD Line
/// - Histogram = MACD Line - Signal Line
///
/// All three lines are reported once the slow EMA has `slow_period` bars.
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

/// The three MACD lines.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdOutput {
    pub macd: IndicatorSeries,
    pub signal: IndicatorSeries,
    pub histogram: IndicatorSeries,
}

impl Default for Macd {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

impl Macd {
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Self {
        Self {
            fast_period,
            slow_period,
            signal_period,
        }
    }
}

impl Indicator for Macd {
    type Output = MacdOutput;

    fn id(&self) -> &str {
        "macd"
    }

    fn name(&self) -> String {
        format!(
            "MACD ({},{},{})",
            self.fast_period, self.slow_period, self.signal_period
        )
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Trend
    }

    fn warmup(&self) -> usize {
        self.fast_period.max(self.slow_period).max(1)
    }

    fn calculate(&self, bars: &[Bar]) -> MacdOutput {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

        let fast = Ema::new(self.fast_period).smooth(&closes);
        let slow = Ema::new(self.slow_period).smooth(&closes);

        let macd_line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal_line = Ema::new(self.signal_period).smooth(&macd_line);
        let histogram: Vec<f64> = macd_line
            .iter()
            .zip(&signal_line)
            .map(|(m, s)| m - s)
            .collect();

        let warmup = self.warmup();
        MacdOutput {
            macd: IndicatorSeries::with_warmup(macd_line, warmup),
            signal: IndicatorSeries::with_warmup(signal_line, warmup),
            histogram: IndicatorSeries::with_warmup(histogram, warmup),
        }
    }
}
