// src/test_util.rs

use std::num::NonZero;

use chrono::{Days, NaiveDate};

use crate::{OrderedSeries, PriceBar};

/// Asserts that two `f64` values are approximately equal using a
/// relative epsilon of `4 * f64::EPSILON`.
macro_rules! assert_approx {
    ($actual:expr, $expected:expr) => {{
        let (a, e) = ($actual, $expected);
        assert!(
            (a - e).abs() < e.abs() * 4.0 * f64::EPSILON,
            "assert_approx failed: actual={a}, expected={e}, diff={}",
            (a - e).abs(),
        );
    }};
}

pub(crate) use assert_approx;

pub(crate) fn nz(n: usize) -> NonZero<usize> {
    NonZero::new(n).expect("non zero value")
}

/// Trading day `offset` days after the 2024-01-01 anchor.
pub(crate) fn day(offset: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .checked_add_days(Days::new(offset))
        .unwrap()
}

/// Flat bar (OHLC all equal to `close`) built literally, so tests can also
/// exercise values `PriceBar::new` would reject.
pub(crate) fn flat_bar_with_close(close: f64, day_offset: u64) -> PriceBar {
    PriceBar {
        date: day(day_offset),
        open: close,
        high: close,
        low: close,
        close,
        volume: 1_000,
    }
}

/// Convenience: flat bar with just a close price and day offset.
pub(crate) fn bar(close: f64, day_offset: u64) -> PriceBar {
    flat_bar_with_close(close, day_offset)
}

/// Full OHLC bar at the given day offset.
pub(crate) fn ohlc(open: f64, high: f64, low: f64, close: f64, day_offset: u64) -> PriceBar {
    PriceBar {
        date: day(day_offset),
        open,
        high,
        low,
        close,
        volume: 1_000,
    }
}

/// Series of flat bars on consecutive days starting at the anchor.
pub(crate) fn series(closes: &[f64]) -> OrderedSeries {
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| bar(close, i as u64))
        .collect();
    OrderedSeries::from_bars(bars).expect("test series must be valid")
}
