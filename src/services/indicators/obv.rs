//! On-Balance Volume (OBV) indicator.

use super::Indicator;
use crate::types::{Bar, FlowDirection, IndicatorCategory, IndicatorSeries};

/// OBV (On-Balance Volume) indicator.
///
/// Cumulative volume flow, starting at 0:
/// - Close up: add volume
/// - Close down: subtract volume
/// - Unchanged: no change
#[derive(Debug, Default, Clone, Copy)]
pub struct Obv;

impl Obv {
    /// Compare the latest OBV with the value `lookback - 1` bars earlier.
    ///
    /// `None` if either value is unavailable.
    pub fn flow(obv: &IndicatorSeries, lookback: usize) -> Option<FlowDirection> {
        let lookback = lookback.max(2);
        let last = obv.len().checked_sub(1)?;
        let earlier = obv.len().checked_sub(lookback)?;
        let (now, then) = (obv.get(last)?, obv.get(earlier)?);
        Some(if now > then {
            FlowDirection::Inflow
        } else {
            FlowDirection::Outflow
        })
    }
}

impl Indicator for Obv {
    type Output = IndicatorSeries;

    fn id(&self) -> &str {
        "obv"
    }

    fn name(&self) -> String {
        "OBV".to_string()
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Volume
    }

    fn warmup(&self) -> usize {
        1
    }

    fn calculate(&self, bars: &[Bar]) -> IndicatorSeries {
        let mut obv = 0.0;
        let values: Vec<f64> = bars
            .iter()
            .enumerate()
            .map(|(i, bar)| {
                if i > 0 {
                    let change = bar.close - bars[i - 1].close;
                    if change > 0.0 {
                        obv += bar.volume;
                    } else if change < 0.0 {
                        obv -= bar.volume;
                    }
                }
                obv
            })
            .collect();

        IndicatorSeries::with_warmup(values, self.warmup())
    }
}
