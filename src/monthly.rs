use chrono::Datelike;
use serde::Serialize;
use tracing::debug;

use crate::{OrderedSeries, Price, error::AggregationError};

/// Intra-month performance of one calendar month present in a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyReturn {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1–12.
    pub month: u32,
    /// Percentage change between the first and last close observed within
    /// the month.
    pub return_pct: f64,
}

/// Groups the series by calendar month and computes each month's return.
///
/// Groups appear in first-seen chronological order. Because the series is
/// strictly ascending by date, the bars of a month form one contiguous run,
/// so no re-sort happens here — the first and last bar of each run are the
/// chronologically first and last bars of that month.
///
/// Each group is reported independently: a degenerate group (first close of
/// exactly zero, which has no defined return base) yields an
/// [`AggregationError`] in its slot without affecting the other groups.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use marketpulse_ta::{OrderedSeries, PriceBar, monthly_returns};
///
/// let bar = |day: u32, close: f64| PriceBar {
///     date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
///     open: close, high: close, low: close, close, volume: 0,
/// };
///
/// let series = OrderedSeries::from_bars(vec![
///     bar(2, 100.0),
///     bar(3, 110.0),
///     bar(4, 90.0),
/// ]).unwrap();
///
/// let months = monthly_returns(&series);
/// assert_eq!(months.len(), 1);
/// let january = months[0].unwrap();
/// assert_eq!((january.year, january.month), (2024, 1));
/// assert_eq!(january.return_pct, -10.0);
/// ```
#[must_use]
pub fn monthly_returns(
    series: &OrderedSeries,
) -> Vec<Result<MonthlyReturn, AggregationError>> {
    let mut groups = Vec::new();

    let mut bars = series.bars().iter();
    let Some(first) = bars.next() else {
        return groups;
    };

    let mut year = first.date.year();
    let mut month = first.date.month();
    let mut first_close = first.close;
    let mut last_close = first.close;

    for bar in bars {
        let (bar_year, bar_month) = (bar.date.year(), bar.date.month());
        if (bar_year, bar_month) == (year, month) {
            last_close = bar.close;
        } else {
            groups.push(month_return(year, month, first_close, last_close));
            year = bar_year;
            month = bar_month;
            first_close = bar.close;
            last_close = bar.close;
        }
    }
    groups.push(month_return(year, month, first_close, last_close));

    debug!(bars = series.len(), groups = groups.len(), "aggregated monthly returns");

    groups
}

#[allow(clippy::float_cmp)]
fn month_return(
    year: i32,
    month: u32,
    first_close: Price,
    last_close: Price,
) -> Result<MonthlyReturn, AggregationError> {
    if first_close == 0.0 {
        return Err(AggregationError::ZeroBaseClose { year, month });
    }

    Ok(MonthlyReturn {
        year,
        month,
        return_pct: (last_close - first_close) / first_close * 100.0,
    })
}
