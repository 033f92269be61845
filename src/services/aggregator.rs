//! Synthetic bar aggregation.
//!
//! Groups consecutive base bars into buckets and collapses each bucket to
//! one OHLCV bar. Alignment is computed on the series' exchange wall clock,
//! with each bar converted at the offset in effect at its own timestamp:
//!
//! - `Hours(n)`: `floor(local_secs / width) * width` from the Unix epoch.
//! - `Months(n)`: month index `(year - 1970) * 12 + (month - 1)`, divided by `n`,
//!   so 6-month buckets are Jan–Jun / Jul–Dec and 12-month buckets are calendar years.
//!
//! Empty buckets are never emitted.

use chrono::{DateTime, Datelike, NaiveDate};
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::types::{Bar, BarSeries, Bucket, ExchangeClock};

const SECS_PER_HOUR: i64 = 3600;
const MILLIS_PER_SEC: i64 = 1000;

/// Running OHLCV state for one bucket.
#[derive(Debug, Clone)]
struct BarBucket {
    key: i64,
    time: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

impl BarBucket {
    fn new(key: i64, time: i64, bar: &Bar) -> Self {
        Self {
            key,
            time,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
        }
    }

    fn update(&mut self, bar: &Bar) {
        self.high = self.high.max(bar.high);
        self.low = self.low.min(bar.low);
        self.close = bar.close;
        self.volume += bar.volume;
    }

    fn to_bar(&self) -> Bar {
        Bar::new(
            self.time, self.open, self.high, self.low, self.close, self.volume,
        )
    }
}

/// Bucket key and bucket start (UTC millis) for a bar timestamp.
fn bucket_of(time: i64, bucket: Bucket, clock: ExchangeClock) -> Option<(i64, i64)> {
    let offset = clock.offset_at(time)?;
    let local_secs = time.div_euclid(MILLIS_PER_SEC) + offset as i64;

    let (key, start_local) = match bucket {
        Bucket::Hours(n) => {
            let width = SECS_PER_HOUR * n.max(1) as i64;
            let key = local_secs.div_euclid(width);
            (key, DateTime::from_timestamp(key * width, 0)?.naive_utc())
        }
        Bucket::Months(n) => {
            let n = n.max(1) as i64;
            let local = DateTime::from_timestamp(local_secs, 0)?.naive_utc();
            let month_index = (local.year() as i64 - 1970) * 12 + local.month0() as i64;
            let key = month_index.div_euclid(n);

            let start_index = key * n;
            let year = 1970 + start_index.div_euclid(12);
            let month = start_index.rem_euclid(12) + 1;
            let start =
                NaiveDate::from_ymd_opt(year as i32, month as u32, 1)?.and_hms_opt(0, 0, 0)?;
            (key, start)
        }
    };

    Some((key, clock.utc_secs(start_local, offset) * MILLIS_PER_SEC))
}

/// Aggregate raw bars into `bucket`-wide bars, aligned on `clock`.
///
/// Bars must be ascending by time. Returns [`EngineError::NoData`] for empty input.
pub fn aggregate_bars(bars: &[Bar], bucket: Bucket, clock: ExchangeClock) -> Result<Vec<Bar>> {
    if bars.is_empty() {
        return Err(EngineError::NoData);
    }

    let mut out = Vec::new();
    let mut current: Option<BarBucket> = None;

    for (index, bar) in bars.iter().enumerate() {
        let (key, start) =
            bucket_of(bar.time, bucket, clock).ok_or_else(|| EngineError::MalformedBar {
                index,
                reason: format!("timestamp {} out of calendar range", bar.time),
            })?;

        match current.as_mut() {
            Some(agg) if agg.key == key => agg.update(bar),
            _ => {
                if let Some(done) = current.take() {
                    out.push(done.to_bar());
                }
                current = Some(BarBucket::new(key, start, bar));
            }
        }
    }

    if let Some(done) = current {
        out.push(done.to_bar());
    }

    debug!(
        "Aggregated {} bars into {} {} buckets",
        bars.len(),
        out.len(),
        bucket.label()
    );

    Ok(out)
}

/// Resample a validated series into coarser bars on the same exchange clock.
pub fn aggregate(series: &BarSeries, bucket: Bucket) -> Result<BarSeries> {
    let bars = aggregate_bars(series.bars(), bucket, series.clock())?;
    BarSeries::with_clock(bars, series.clock())
}
