use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A price value.
///
/// Semantic alias for [`f64`]. Documents intent in function signatures
/// without introducing newtype construction overhead.
pub type Price = f64;

/// One trading day of OHLCV data.
///
/// Constructed once by the external loader, immutable thereafter. Fields are
/// public so the presentation layer can read bars as plain records;
/// [`PriceBar::new`] is the validating constructor the loader goes through.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use marketpulse_ta::PriceBar;
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
/// let bar = PriceBar::new(date, 101.0, 104.5, 99.8, 103.2, 1_250_000).unwrap();
/// assert_eq!(bar.close, 103.2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Calendar date, unique within a series.
    pub date: NaiveDate,
    /// Opening price.
    pub open: Price,
    /// Highest price of the day.
    pub high: Price,
    /// Lowest price of the day.
    pub low: Price,
    /// Closing price.
    pub close: Price,
    /// Traded volume.
    pub volume: u64,
}

impl PriceBar {
    /// Validates and constructs a bar.
    ///
    /// All prices must be positive finite numbers, with
    /// `high >= max(open, close)` and `low <= min(open, close)`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the offending field.
    pub fn new(
        date: NaiveDate,
        open: Price,
        high: Price,
        low: Price,
        close: Price,
        volume: u64,
    ) -> Result<Self, ValidationError> {
        for (field, value) in [("open", open), ("high", high), ("low", low), ("close", close)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ValidationError::NonPositivePrice { field, value });
            }
        }

        let body_top = open.max(close);
        if high < body_top {
            return Err(ValidationError::HighBelowBody {
                high,
                limit: body_top,
            });
        }

        let body_bottom = open.min(close);
        if low > body_bottom {
            return Err(ValidationError::LowAboveBody {
                low,
                limit: body_bottom,
            });
        }

        Ok(Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }
}
