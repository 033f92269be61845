use serde::{Deserialize, Serialize};

use super::ExchangeClock;
use crate::error::EngineError;

/// One sampled unit of trading activity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Unix timestamp in milliseconds (bar open).
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    pub fn new(time: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Check the OHLCV invariants of a single bar.
    fn check(&self) -> Result<(), String> {
        let prices = [self.open, self.high, self.low, self.close];
        if prices.iter().any(|p| !p.is_finite() || *p <= 0.0) {
            return Err("prices must be finite and positive".to_string());
        }
        if !self.volume.is_finite() || self.volume < 0.0 {
            return Err("volume must be finite and non-negative".to_string());
        }
        if self.high < self.open.max(self.close) {
            return Err(format!("high {} below body", self.high));
        }
        if self.low > self.open.min(self.close) {
            return Err(format!("low {} above body", self.low));
        }
        Ok(())
    }
}

/// Ordered, validated sequence of bars for one symbol at one interval.
///
/// Construction fails closed: a single malformed bar rejects the whole
/// series. A series is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    bars: Vec<Bar>,
    /// Exchange wall clock, used for bucket alignment.
    clock: ExchangeClock,
}

impl BarSeries {
    /// Validate bars and build a series in UTC.
    pub fn new(bars: Vec<Bar>) -> Result<Self, EngineError> {
        Self::with_clock(bars, ExchangeClock::default())
    }

    /// Validate bars for an exchange a fixed `utc_offset_secs` from UTC.
    pub fn with_offset(bars: Vec<Bar>, utc_offset_secs: i32) -> Result<Self, EngineError> {
        Self::with_clock(bars, ExchangeClock::Fixed(utc_offset_secs))
    }

    /// Validate bars and build a series on the given exchange clock.
    pub fn with_clock(bars: Vec<Bar>, clock: ExchangeClock) -> Result<Self, EngineError> {
        if bars.is_empty() {
            return Err(EngineError::NoData);
        }

        for (index, bar) in bars.iter().enumerate() {
            bar.check()
                .map_err(|reason| EngineError::MalformedBar { index, reason })?;

            if index > 0 && bar.time <= bars[index - 1].time {
                return Err(EngineError::MalformedBar {
                    index,
                    reason: format!(
                        "timestamp {} not after previous {}",
                        bar.time,
                        bars[index - 1].time
                    ),
                });
            }
        }

        Ok(Self { bars, clock })
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn clock(&self) -> ExchangeClock {
        self.clock
    }

    /// Exchange offset from UTC in effect at the latest bar.
    pub fn utc_offset_secs(&self) -> i32 {
        self.clock.offset_at(self.last().time).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false for a constructed series.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Most recent bar.
    pub fn last(&self) -> &Bar {
        // Non-empty by construction.
        &self.bars[self.bars.len() - 1]
    }

    pub fn into_bars(self) -> Vec<Bar> {
        self.bars
    }
}
