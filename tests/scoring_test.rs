//! Integration tests for composite scoring

use titan::services::indicators::{compute_panel, IndicatorConfig};
use titan::services::scoring::{score, stop_levels, ScoringProfile, PRESETS};
use titan::{Bar, BarSeries, Bias, CompositeScore, Polarity};

const DAY_MS: i64 = 86_400_000;

fn series_from_closes(closes: &[f64]) -> BarSeries {
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| Bar::new(i as i64 * DAY_MS, c, c + 1.0, c - 1.0, c, 500.0))
        .collect();
    BarSeries::new(bars).unwrap()
}

fn score_closes(closes: &[f64], profile: &ScoringProfile) -> CompositeScore {
    let series = series_from_closes(closes);
    let panel = compute_panel(&series, &IndicatorConfig::default());
    score(&series, &panel, profile)
}

#[test]
fn test_zero_variance_compression() {
    let series = BarSeries::new(
        (0..20)
            .map(|i| Bar::new(i * DAY_MS, 50.0, 50.0, 50.0, 50.0, 100.0))
            .collect(),
    )
    .unwrap();
    let panel = compute_panel(&series, &IndicatorConfig::default());
    assert_eq!(panel.bb_bandwidth.latest(), Some(0.0));

    for name in PRESETS {
        let profile = ScoringProfile::preset(name).unwrap();
        let result = score(&series, &panel, &profile);
        assert!(result.fired("band_squeeze"), "profile {}", name);
        assert!(!result.fired("band_breakout_up"));
        assert!(!result.fired("band_breakout_down"));
    }
}

#[test]
fn test_downtrend_balanced_is_short() {
    let closes: Vec<f64> = (0..80).map(|i| 200.0 - i as f64).collect();
    let result = score_closes(&closes, &ScoringProfile::balanced());

    assert!(result.fired("below_sma_fast"));
    assert!(result.fired("below_sma_slow"));
    assert!(result.fired("rsi_oversold"));
    assert!(result.fired("macd_bearish"));
    assert_eq!(result.bias, Bias::Short);
    assert!(result.value >= -100);
}

#[test]
fn test_titan_never_penalizes_trend_lines() {
    let closes: Vec<f64> = (0..80).map(|i| 200.0 - i as f64).collect();
    let result = score_closes(&closes, &ScoringProfile::titan());
    assert!(!result.fired("below_sma_fast"));
    assert!(!result.fired("below_ema_slow"));
}

#[test]
fn test_clamped_presets_stay_in_range() {
    for profile in [ScoringProfile::balanced(), ScoringProfile::conservative()] {
        for slope in [-2.0, -0.5, 0.5, 2.0] {
            let closes: Vec<f64> = (0..100).map(|i| 300.0 + i as f64 * slope).collect();
            let result = score_closes(&closes, &profile);
            assert!((-100..=100).contains(&result.value));
        }
    }
}

#[test]
fn test_signal_polarity_matches_weight_sign() {
    let closes: Vec<f64> = (0..100)
        .map(|i| 100.0 + (i as f64 * 0.4).sin() * 10.0)
        .collect();
    let result = score_closes(&closes, &ScoringProfile::balanced());
    for signal in &result.signals {
        match signal.polarity {
            Polarity::Bullish => assert!(signal.weight > 0),
            Polarity::Bearish => assert!(signal.weight < 0),
            Polarity::Info => assert_eq!(signal.weight, 0),
        }
    }
}

#[test]
fn test_stops_use_atr_once_available() {
    let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
    let result = score_closes(&closes, &ScoringProfile::titan());
    assert!(result.stops.atr_based);
    // True range is 2.0 on every bar.
    assert!((result.stops.distance - 4.0).abs() < 1e-9);
    assert!((result.stops.long - 125.0).abs() < 1e-9);
    assert!((result.stops.short - 133.0).abs() < 1e-9);
}

#[test]
fn test_stop_fallback_percent() {
    let stops = stop_levels(250.0, None, &ScoringProfile::conservative());
    assert_eq!(stops.distance, 5.0);
    assert_eq!(stops.long, 245.0);
    assert_eq!(stops.short, 255.0);
}

#[test]
fn test_flow_reported() {
    let closes: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
    let result = score_closes(&closes, &ScoringProfile::titan());
    assert_eq!(result.flow, Some(titan::FlowDirection::Inflow));
}
