#![allow(dead_code)]

use chrono::{Days, NaiveDate};
use marketpulse_ta::{OrderedSeries, PriceBar};
use serde::Deserialize;

/// Daily OHLCV row parsed from the checked-in sample CSV.
#[derive(Debug, Clone, Deserialize)]
pub struct RefBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

const SAMPLE_PATH: &str = "tests/fixtures/data/daily-sample.csv";

/// Loads the 3-month daily sample (weekdays of 2024-01-01 .. 2024-03-15)
/// through the validating constructors, the same way a loader would.
pub fn load_sample_series() -> OrderedSeries {
    let mut reader = csv::Reader::from_path(SAMPLE_PATH).expect("sample CSV must be readable");

    let bars: Vec<PriceBar> = reader
        .deserialize()
        .map(|row| {
            let row: RefBar = row.expect("sample CSV row must parse");
            PriceBar::new(row.date, row.open, row.high, row.low, row.close, row.volume)
                .expect("sample CSV row must be a valid bar")
        })
        .collect();

    OrderedSeries::from_bars(bars).expect("sample CSV must form a valid series")
}

/// Flat series (OHLC all equal to the close) on consecutive days starting
/// 2024-01-01, for exact-value scenarios.
pub fn flat_series(closes: &[f64]) -> OrderedSeries {
    let anchor = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let date = anchor.checked_add_days(Days::new(i as u64)).unwrap();
            PriceBar::new(date, close, close, close, close, 1_000).unwrap()
        })
        .collect();
    OrderedSeries::from_bars(bars).expect("flat series must be valid")
}

/// Asserts approximate equality with an absolute tolerance, with context.
pub fn assert_near(actual: f64, expected: f64, tolerance: f64, context: &str) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "{context}: expected {expected}, got {actual}"
    );
}
