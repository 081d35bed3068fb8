//! Technical-analysis engine for daily OHLCV price series.
//!
//! Turns a validated, time-ascending [`OrderedSeries`] of [`PriceBar`]s into
//! derived indicator series — moving averages, volatility bands, momentum
//! and trend oscillators — plus a monthly performance table, all aligned
//! index-for-index with the input. Warm-up positions and values that are
//! mathematically undefined are `None`, never a silent zero.
//!
//! Indicators are streaming state machines: each type ([`Sma`], [`Ema`],
//! [`Bb`], [`Rsi`], [`Macd`]) exposes [`new`](Sma::new),
//! [`compute`](Sma::compute), and [`value`](Sma::value) as inherent methods
//! — no trait import needed. Import [`Indicator`] only for generic code.
//! The series-level operations ([`sma_series`], [`rsi_series`], …) fold the
//! same state machines over a whole series, and [`analyze`] produces the
//! full dashboard report in one call.
//!
//! The engine owns no mutable external state and no caches: every
//! computation is a pure function of the input series and configuration,
//! and element `i` of any output depends only on bars at index `<= i`.
//!
//! ```
//! use chrono::NaiveDate;
//! use marketpulse_ta::{AnalysisConfig, OrderedSeries, PriceBar, analyze};
//!
//! let bar = |day: u32, close: f64| PriceBar {
//!     date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
//!     open: close, high: close, low: close, close, volume: 0,
//! };
//!
//! let series = OrderedSeries::from_bars(vec![
//!     bar(2, 101.0), bar(3, 103.5), bar(4, 102.0),
//! ]).unwrap();
//!
//! let report = analyze(&series, &AnalysisConfig::default()).unwrap();
//! assert_eq!(report.macd.len(), series.len());
//! assert_eq!(report.monthly.len(), 1);
//! ```

mod analysis;
mod bar;
mod bb;
mod ema;
mod error;
mod indicator;
mod macd;
mod monthly;
mod price_source;
mod rolling;
mod rsi;
mod series;
mod sma;

pub use crate::analysis::{
    AnalysisConfig, AnalysisReport, analyze, bollinger_series, ema_series, macd_series,
    rsi_series, sma_series,
};
pub use crate::bar::{Price, PriceBar};
pub use crate::error::{AggregationError, TaError, ValidationError};
pub use crate::indicator::{Indicator, IndicatorConfig, IndicatorConfigBuilder};
pub use crate::monthly::{MonthlyReturn, monthly_returns};
pub use crate::price_source::PriceSource;
pub use crate::rolling::{rolling_mean, rolling_std_dev};
pub use crate::series::{IndicatorSeries, OrderedSeries};

pub use crate::bb::{BandMultiplier, BandSeries, Bb, BbConfig, BbConfigBuilder, BbValue};
pub use crate::ema::{Ema, EmaConfig, EmaConfigBuilder};
pub use crate::macd::{Macd, MacdConfig, MacdConfigBuilder, MacdSeries, MacdValue, Trend, trend};
pub use crate::rsi::{Momentum, Rsi, RsiConfig, RsiConfigBuilder, momentum};
pub use crate::sma::{Sma, SmaConfig, SmaConfigBuilder};

macro_rules! impl_indicator_methods {
    ($type:ty, $config:ty, $output:ty) => {
        impl $type {
            /// See [`Indicator::new`].
            #[must_use]
            pub fn new(config: $config) -> Self {
                <Self as Indicator>::new(config)
            }

            /// See [`Indicator::compute`].
            #[inline]
            pub fn compute(&mut self, bar: &PriceBar) -> Option<$output> {
                <Self as Indicator>::compute(self, bar)
            }

            /// See [`Indicator::value`].
            #[must_use]
            #[inline]
            pub fn value(&self) -> Option<$output> {
                <Self as Indicator>::value(self)
            }
        }
    };
}

impl_indicator_methods!(Sma, SmaConfig, Price);
impl_indicator_methods!(Ema, EmaConfig, Price);
impl_indicator_methods!(Bb, BbConfig, BbValue);
impl_indicator_methods!(Rsi, RsiConfig, Price);
impl_indicator_methods!(Macd, MacdConfig, MacdValue);

#[cfg(test)]
mod test_util;

#[cfg(test)]
mod inherent_methods {
    use super::{Bb, BbConfig, BbValue, Ema, EmaConfig, Macd, MacdConfig, Rsi, RsiConfig, Sma, SmaConfig};
    use crate::test_util::{bar, nz};

    #[test]
    fn sma_without_indicator_import() {
        let mut sma = Sma::new(SmaConfig::close(nz(2)));
        assert_eq!(sma.compute(&bar(10.0, 0)), None);
        assert_eq!(sma.compute(&bar(20.0, 1)), Some(15.0));
        assert_eq!(sma.value(), Some(15.0));
    }

    #[test]
    fn ema_without_indicator_import() {
        let mut ema = Ema::new(EmaConfig::close(nz(2)));
        assert_eq!(ema.compute(&bar(10.0, 0)), Some(10.0));
        assert!(ema.compute(&bar(20.0, 1)).is_some());
        assert!(ema.value().is_some());
    }

    #[test]
    fn bb_without_indicator_import() {
        let mut bb = Bb::new(BbConfig::close(nz(2)));
        assert!(bb.compute(&bar(10.0, 0)).is_none());
        let v: Option<BbValue> = bb.compute(&bar(20.0, 1));
        assert!(v.is_some());
        assert!(bb.value().is_some());
    }

    #[test]
    fn rsi_without_indicator_import() {
        let mut rsi = Rsi::new(RsiConfig::close(nz(1)));
        assert_eq!(rsi.compute(&bar(10.0, 0)), None);
        assert_eq!(rsi.compute(&bar(20.0, 1)), Some(100.0));
        assert_eq!(rsi.value(), Some(100.0));
    }

    #[test]
    fn macd_without_indicator_import() {
        let mut macd = Macd::new(MacdConfig::standard());
        assert!(macd.compute(&bar(10.0, 0)).is_some());
        assert!(macd.value().is_some());
    }
}
