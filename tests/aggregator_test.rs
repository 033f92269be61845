//! Integration tests for synthetic bar aggregation

use chrono::TimeZone;
use chrono_tz::America::New_York;
use titan::services::aggregator::{aggregate, aggregate_bars};
use titan::{Bar, BarSeries, Bucket, EngineError, ExchangeClock};

const HOUR_MS: i64 = 3_600_000;
const UTC: ExchangeClock = ExchangeClock::Fixed(0);

fn hourly_bar(hour: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Bar {
    Bar::new(hour * HOUR_MS, open, high, low, close, volume)
}

fn wavy_hours(count: usize) -> Vec<Bar> {
    (0..count)
        .map(|i| {
            let mid = 50.0 + (i as f64 * 0.37).sin() * 4.0;
            hourly_bar(i as i64, mid, mid + 1.5, mid - 1.5, mid + 0.5, 10.0 + i as f64)
        })
        .collect()
}

#[test]
fn test_two_four_hour_windows() {
    let highs = [10.0, 12.0, 9.0, 11.0, 8.0, 14.0, 7.0, 13.0];
    let bars: Vec<Bar> = highs
        .iter()
        .enumerate()
        .map(|(i, &h)| hourly_bar(i as i64, h - 1.0, h, h - 2.0, h - 1.0, 1.0))
        .collect();

    let out = aggregate_bars(&bars, Bucket::Hours(4), UTC).unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].high, 12.0);
    assert_eq!(out[1].high, 14.0);
    assert_eq!(out[0].open, 9.0);
    assert_eq!(out[0].close, 10.0);
    assert_eq!(out[1].low, 5.0);
}

#[test]
fn test_volume_and_extremes_conserved() {
    let bars = wavy_hours(97);
    let out = aggregate_bars(&bars, Bucket::Hours(4), UTC).unwrap();

    let volume_in: f64 = bars.iter().map(|b| b.volume).sum();
    let volume_out: f64 = out.iter().map(|b| b.volume).sum();
    assert!((volume_in - volume_out).abs() < 1e-9);

    let max_in = bars.iter().map(|b| b.high).fold(f64::MIN, f64::max);
    let max_out = out.iter().map(|b| b.high).fold(f64::MIN, f64::max);
    assert_eq!(max_in, max_out);

    let min_in = bars.iter().map(|b| b.low).fold(f64::MAX, f64::min);
    let min_out = out.iter().map(|b| b.low).fold(f64::MAX, f64::min);
    assert_eq!(min_in, min_out);

    assert_eq!(out.first().unwrap().open, bars.first().unwrap().open);
    assert_eq!(out.last().unwrap().close, bars.last().unwrap().close);
}

#[test]
fn test_aggregation_is_deterministic() {
    let bars = wavy_hours(50);
    let first = aggregate_bars(&bars, Bucket::Hours(4), ExchangeClock::Fixed(3600)).unwrap();
    let second = aggregate_bars(&bars, Bucket::Hours(4), ExchangeClock::Fixed(3600)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_output_strictly_ascending() {
    let bars = wavy_hours(200);
    let out = aggregate_bars(&bars, Bucket::Hours(4), ExchangeClock::Fixed(-18_000)).unwrap();
    assert!(out.windows(2).all(|w| w[0].time < w[1].time));
}

#[test]
fn test_closed_market_gap_omits_buckets() {
    // Two sessions a day apart; nothing is synthesized in between.
    let mut bars: Vec<Bar> = (0..4)
        .map(|h| hourly_bar(h, 10.0, 11.0, 9.0, 10.0, 1.0))
        .collect();
    bars.extend((24..28).map(|h| hourly_bar(h, 20.0, 21.0, 19.0, 20.0, 1.0)));

    let out = aggregate_bars(&bars, Bucket::Hours(4), UTC).unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(out[1].time, 24 * HOUR_MS);
}

#[test]
fn test_series_aggregation_validates_output() {
    let series = BarSeries::with_offset(wavy_hours(24), 28_800).unwrap();
    let out = aggregate(&series, Bucket::Hours(4)).unwrap();
    assert_eq!(out.utc_offset_secs(), 28_800);
    assert!(out.len() <= 7);
}

#[test]
fn test_empty_input_is_no_data() {
    let err = aggregate_bars(&[], Bucket::Months(6), UTC).unwrap_err();
    assert!(matches!(err, EngineError::NoData));
}

#[test]
fn test_monthly_series_respects_daylight_saving() {
    // Yahoo stamps US monthly bars at local midnight, DST included.
    let bars: Vec<Bar> = (1..=12)
        .map(|m| {
            let time = New_York
                .with_ymd_and_hms(2023, m, 1, 0, 0, 0)
                .unwrap()
                .timestamp_millis();
            let p = m as f64;
            Bar::new(time, p, p + 0.5, p - 0.5, p, 1.0)
        })
        .collect();
    let series = BarSeries::with_clock(bars, ExchangeClock::Zone(New_York)).unwrap();

    let half_years = aggregate(&series, Bucket::Months(6)).unwrap();
    assert_eq!(half_years.len(), 2);
    assert_eq!(half_years.bars()[0].close, 6.0);
    assert_eq!(half_years.bars()[0].volume, 6.0);
    assert_eq!(half_years.bars()[1].open, 7.0);
    assert_eq!(half_years.bars()[1].volume, 6.0);

    let years = aggregate(&series, Bucket::Months(12)).unwrap();
    assert_eq!(years.len(), 1);
    assert_eq!(years.bars()[0].close, 12.0);
}
