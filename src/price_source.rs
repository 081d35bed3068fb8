use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Price, PriceBar};

/// Bar field (or derived price) extracted from a [`PriceBar`] before feeding
/// an indicator.
///
/// Each indicator is configured with a `PriceSource` that determines which
/// value to compute on. Dashboards conventionally chart indicators on the
/// close; the derived sources smooth single-field noise.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug, Serialize, Deserialize)]
pub enum PriceSource {
    /// Opening price.
    Open,
    /// Highest price.
    High,
    /// Closing price.
    #[default]
    Close,
    /// Lowest price.
    Low,
    /// Median price: `(high + low) / 2`.
    HL2,
    /// Typical price: `(high + low + close) / 3`.
    HLC3,
    /// Average price: `(open + high + low + close) / 4`.
    OHLC4,
}

impl Display for PriceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl PriceSource {
    #[inline]
    pub(crate) fn extract(self, bar: &PriceBar) -> Price {
        match self {
            Self::Open => bar.open,
            Self::High => bar.high,
            Self::Close => bar.close,
            Self::Low => bar.low,
            Self::HL2 => f64::midpoint(bar.high, bar.low),
            Self::HLC3 => (bar.high + bar.low + bar.close) / 3.0,
            Self::OHLC4 => (bar.open + bar.high + bar.low + bar.close) / 4.0,
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::test_util::{assert_approx, ohlc};

    fn bar() -> PriceBar {
        ohlc(10.0, 30.0, 5.0, 20.0, 0)
    }

    #[test]
    fn extract_open() {
        assert_eq!(PriceSource::Open.extract(&bar()), 10.0);
    }

    #[test]
    fn extract_high() {
        assert_eq!(PriceSource::High.extract(&bar()), 30.0);
    }

    #[test]
    fn extract_low() {
        assert_eq!(PriceSource::Low.extract(&bar()), 5.0);
    }

    #[test]
    fn extract_close() {
        assert_eq!(PriceSource::Close.extract(&bar()), 20.0);
    }

    #[test]
    fn extract_hl2() {
        // (30 + 5) / 2 = 17.5
        assert_eq!(PriceSource::HL2.extract(&bar()), 17.5);
    }

    #[test]
    fn extract_hlc3() {
        // (30 + 5 + 20) / 3 = 18.333...
        assert_approx!(PriceSource::HLC3.extract(&bar()), 55.0 / 3.0);
    }

    #[test]
    fn extract_ohlc4() {
        // (10 + 30 + 5 + 20) / 4 = 16.25
        assert_eq!(PriceSource::OHLC4.extract(&bar()), 16.25);
    }

    #[test]
    fn default_is_close() {
        assert_eq!(PriceSource::default(), PriceSource::Close);
    }
}
