//! Hand-checked indicator values on small known series.

use chrono::NaiveDate;
use tickersheet_core::domain::Bar;
use tickersheet_core::indicators::{enrich, IndicatorSet};

/// Bars with zero daily range: High = Low = Open = Close.
fn flat_range_bars(closes: &[f64]) -> Vec<Bar> {
    let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| Bar {
            symbol: "STEP".into(),
            date: base + chrono::Duration::days(i as i64),
            open: c,
            high: c,
            low: c,
            close: c,
            volume: 500,
        })
        .collect()
}

fn step_closes() -> Vec<f64> {
    (10..30).map(f64::from).collect()
}

#[test]
fn step_series_sma_at_day_19() {
    let rows = enrich(&flat_range_bars(&step_closes()));
    assert_eq!(rows.len(), 20);
    assert_eq!(rows[19].sma_20, Some(19.5));
    assert!(rows[18].sma_20.is_none());
}

#[test]
fn step_series_atr_converges_to_mean_abs_change() {
    let rows = enrich(&flat_range_bars(&step_closes()));
    // TR[0] = High - Low = 0 sits in the first window only.
    assert!(rows[12].atr_14.is_none());
    let first = rows[13].atr_14.unwrap();
    assert!((first - 13.0 / 14.0).abs() < 1e-12, "ATR[13] = {first}");
    for row in &rows[14..] {
        assert_eq!(row.atr_14, Some(1.0));
    }
}

#[test]
fn step_series_rsi_is_100() {
    let rows = enrich(&flat_range_bars(&step_closes()));
    assert!(rows[12].rsi.is_none());
    for row in &rows[13..] {
        assert_eq!(row.rsi, Some(100.0));
    }
}

#[test]
fn step_series_bands_and_volatility() {
    let rows = enrich(&flat_range_bars(&step_closes()));
    // Sample std of 20 consecutive integers: sqrt(20 * 21 / 12) = sqrt(35).
    let vol = rows[19].volatility_20.unwrap();
    assert!((vol - 35f64.sqrt()).abs() < 1e-12);
    assert!((rows[19].bb_upper.unwrap() - (19.5 + 2.0 * vol)).abs() < 1e-12);
    assert!((rows[19].bb_lower.unwrap() - (19.5 - 2.0 * vol)).abs() < 1e-12);
}

#[test]
fn constant_prices_give_zero_volatility() {
    for price in [19.99, 187.15, 0.1] {
        let rows = enrich(&flat_range_bars(&[price; 20]));
        let last = &rows[19];
        assert_eq!(last.sma_20, Some(price));
        assert_eq!(last.volatility_20, Some(0.0));
        assert_eq!(last.bb_upper, Some(price));
        assert_eq!(last.bb_lower, Some(price));
        assert_eq!(last.atr_14, Some(0.0));
    }
}

#[test]
fn falling_series_rsi_is_zero() {
    let closes: Vec<f64> = (0..20).map(|i| 50.0 - i as f64).collect();
    let rows = enrich(&flat_range_bars(&closes));
    assert_eq!(rows[19].rsi, Some(0.0));
}

#[test]
fn ema_is_defined_from_day_zero() {
    let rows = enrich(&flat_range_bars(&step_closes()));
    assert_eq!(rows[0].ema_20, Some(10.0));
    let expected = (2.0 / 21.0) * 11.0 + (19.0 / 21.0) * 10.0;
    assert!((rows[1].ema_20.unwrap() - expected).abs() < 1e-12);
}

#[test]
fn empty_input_gives_empty_output() {
    assert!(enrich(&[]).is_empty());
}

#[test]
fn short_series_has_only_ema() {
    let rows = enrich(&flat_range_bars(&[10.0, 11.0, 12.0]));
    for row in &rows {
        assert!(row.ema_20.is_some());
        assert!(row.sma_20.is_none());
        assert!(row.volatility_20.is_none());
        assert!(row.bb_upper.is_none());
        assert!(row.atr_14.is_none());
        assert!(row.rsi.is_none());
    }
}

#[test]
fn standard_set_lookback() {
    assert_eq!(IndicatorSet::standard().lookback(), 19);
}
