use crate::{Price, PriceBar, error::ValidationError};

/// A derived series aligned index-for-index with the [`OrderedSeries`] it was
/// computed from. `None` marks warm-up positions and rule-free undefined
/// values; it is never coerced to zero or NaN.
pub type IndicatorSeries = Vec<Option<Price>>;

/// A validated, time-ascending daily price series.
///
/// Construction rejects empty input, out-of-order dates, and duplicate dates.
/// Once built, the series is read-only: every indicator is a pure function of
/// it, so it is safe to share by reference across computations.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use marketpulse_ta::{OrderedSeries, PriceBar};
///
/// let bar = |day: u32, close: f64| PriceBar {
///     date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
///     open: close, high: close, low: close, close, volume: 0,
/// };
///
/// let series = OrderedSeries::from_bars(vec![bar(2, 10.0), bar(3, 10.5)]).unwrap();
/// assert_eq!(series.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedSeries {
    bars: Vec<PriceBar>,
}

impl OrderedSeries {
    /// Validates the ascending-date invariant and wraps the bars.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptySeries`] for empty input,
    /// [`ValidationError::DuplicateDate`] or
    /// [`ValidationError::OutOfOrderDate`] naming the first offending index
    /// otherwise.
    pub fn from_bars(bars: Vec<PriceBar>) -> Result<Self, ValidationError> {
        if bars.is_empty() {
            return Err(ValidationError::EmptySeries);
        }

        for (i, pair) in bars.windows(2).enumerate() {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.date == prev.date {
                return Err(ValidationError::DuplicateDate {
                    index: i + 1,
                    date: next.date,
                });
            }
            if next.date < prev.date {
                return Err(ValidationError::OutOfOrderDate {
                    index: i + 1,
                    prev: prev.date,
                    date: next.date,
                });
            }
        }

        Ok(Self { bars })
    }

    /// The bars in ascending date order.
    #[must_use]
    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    /// Number of bars. Always at least 1.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always `false`: empty input is rejected at construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Closing prices, in series order.
    #[must_use]
    pub fn closes(&self) -> Vec<Price> {
        self.bars.iter().map(|bar| bar.close).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{bar, day};

    mod accepts {
        use super::*;

        #[test]
        fn single_bar() {
            let series = OrderedSeries::from_bars(vec![bar(10.0, 0)]).unwrap();
            assert_eq!(series.len(), 1);
            assert!(!series.is_empty());
        }

        #[test]
        fn ascending_with_gaps() {
            // Weekends and holidays leave gaps; only strict ascent matters.
            let series =
                OrderedSeries::from_bars(vec![bar(10.0, 0), bar(11.0, 1), bar(12.0, 4)]).unwrap();
            assert_eq!(series.closes(), vec![10.0, 11.0, 12.0]);
        }
    }

    mod rejects {
        use super::*;

        #[test]
        fn empty_input() {
            assert_eq!(
                OrderedSeries::from_bars(vec![]),
                Err(ValidationError::EmptySeries)
            );
        }

        #[test]
        fn duplicate_date() {
            let result = OrderedSeries::from_bars(vec![bar(10.0, 0), bar(11.0, 1), bar(12.0, 1)]);
            assert_eq!(
                result,
                Err(ValidationError::DuplicateDate {
                    index: 2,
                    date: day(1),
                })
            );
        }

        #[test]
        fn out_of_order_date() {
            let result = OrderedSeries::from_bars(vec![bar(10.0, 3), bar(11.0, 1)]);
            assert_eq!(
                result,
                Err(ValidationError::OutOfOrderDate {
                    index: 1,
                    prev: day(3),
                    date: day(1),
                })
            );
        }
    }
}
