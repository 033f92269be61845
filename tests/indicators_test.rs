//! Integration tests for the indicator engine

use titan::services::indicators::{
    compute_panel, Atr, BollingerBands, Indicator, IndicatorConfig, Macd, Rsi, Sma, Stochastic,
};
use titan::{Bar, BarSeries};

const DAY_MS: i64 = 86_400_000;

fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| Bar::new(i as i64 * DAY_MS, c, c + 1.0, c - 1.0, c, 1000.0))
        .collect()
}

fn choppy_closes(count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| 100.0 + (i as f64 * 0.9).sin() * 8.0 + (i as f64 * 0.13).cos() * 3.0)
        .collect()
}

#[test]
fn test_ramp_rsi_and_macd() {
    let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
    let bars = bars_from_closes(&closes);

    let rsi = Rsi::new(14).calculate(&bars);
    assert_eq!(rsi.latest(), Some(100.0));

    let macd = Macd::default().calculate(&bars);
    for i in 25..30 {
        assert!(macd.histogram.get(i).unwrap() > 0.0, "histogram at {}", i);
    }
    for i in 26..30 {
        assert!(macd.macd.get(i).unwrap() > macd.macd.get(i - 1).unwrap());
    }
}

#[test]
fn test_short_series_rsi_unavailable() {
    let bars = bars_from_closes(&[100.0, 101.0, 99.0, 102.0, 103.0]);
    let rsi = Rsi::new(14).calculate(&bars);
    assert_eq!(rsi.len(), 5);
    assert!(rsi.values().iter().all(Option::is_none));
}

#[test]
fn test_warmup_positions_never_zero_filled() {
    let bars = bars_from_closes(&choppy_closes(40));
    let sma = Sma::new(20).calculate(&bars);
    assert_eq!(sma.first_available(), Some(19));
    assert!(sma.values()[..19].iter().all(Option::is_none));

    let atr = Atr::new(14).calculate(&bars);
    assert!(atr.values()[..13].iter().all(Option::is_none));
}

#[test]
fn test_oscillators_bounded() {
    let bars = bars_from_closes(&choppy_closes(120));

    let rsi = Rsi::default().calculate(&bars);
    assert!(rsi.values().iter().flatten().all(|v| (0.0..=100.0).contains(v)));

    let stoch = Stochastic::default().calculate(&bars);
    assert!(stoch.k.values().iter().flatten().all(|v| (0.0..=100.0).contains(v)));
    assert!(stoch.d.values().iter().flatten().all(|v| (0.0..=100.0).contains(v)));
}

#[test]
fn test_flat_bollinger_bandwidth_zero() {
    let bars = bars_from_closes(&[100.0; 20]);
    let bb = BollingerBands::default().calculate(&bars);
    assert_eq!(bb.bandwidth.latest(), Some(0.0));
}

#[test]
fn test_panel_aligned_and_idempotent() {
    let series = BarSeries::new(bars_from_closes(&choppy_closes(90))).unwrap();
    let config = IndicatorConfig::default();

    let first = compute_panel(&series, &config);
    let second = compute_panel(&series, &config);
    assert_eq!(first, second);

    for s in [
        &first.sma_fast,
        &first.ema_slow,
        &first.macd_histogram,
        &first.rsi,
        &first.stoch_d,
        &first.bb_bandwidth,
        &first.atr,
        &first.obv,
    ] {
        assert_eq!(s.len(), series.len());
    }
    assert!(first.history.sufficient);
    assert_eq!(first.history.required, 60);
}

#[test]
fn test_panel_reports_short_history() {
    let series = BarSeries::new(bars_from_closes(&choppy_closes(30))).unwrap();
    let panel = compute_panel(&series, &IndicatorConfig::default());
    assert!(!panel.history.sufficient);
    assert_eq!(panel.history.actual, 30);
    assert!(panel.sma_slow.latest().is_none());
    assert!(panel.sma_fast.latest().is_some());
}
