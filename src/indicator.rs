use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

use crate::{PriceBar, PriceSource};

/// Configuration for a technical [`Indicator`].
///
/// Every indicator has a corresponding config type that holds its parameters
/// (windows or spans, price source). Configs are value types: cheap to clone,
/// compare, and hash, which lets callers key memoization wrappers on
/// `(series fingerprint, config)` without the engine holding any cache
/// itself.
pub trait IndicatorConfig: Sized + PartialEq + Eq + Hash + Display + Debug {
    /// Builder type for constructing this config.
    type Builder: IndicatorConfigBuilder<Self>;

    /// Returns a new builder with default values.
    fn builder() -> Self::Builder;

    /// Price source to extract from each bar.
    fn source(&self) -> &PriceSource;
}

/// Builder for an [`IndicatorConfig`].
///
/// Window and span setters are inherent on each concrete builder, since the
/// parameter shape differs per indicator (one window for an SMA, three spans
/// for MACD).
pub trait IndicatorConfigBuilder<Config>
where
    Config: IndicatorConfig,
{
    /// Sets the price source.
    #[must_use]
    fn source(self, source: PriceSource) -> Self;

    /// Builds the config. Panics if required fields are missing.
    #[must_use]
    fn build(self) -> Config;
}

/// A streaming technical indicator over daily bars.
///
/// Indicators maintain internal state and update incrementally on each call
/// to [`compute`](Indicator::compute); feeding an [`OrderedSeries`] bar by
/// bar yields the aligned indicator series. Output is `None` through the
/// warm-up region, until enough history has been received for the value to
/// be defined.
///
/// Element `i` of the output depends only on bars at index `<= i`: there is
/// no look-ahead, so streaming and batch computation agree exactly.
///
/// [`OrderedSeries`]: crate::OrderedSeries
///
/// # Example
///
/// ```
/// use marketpulse_ta::{Indicator, IndicatorConfig, PriceBar, Sma, SmaConfig};
/// use chrono::NaiveDate;
/// use std::num::NonZero;
///
/// let bar = |day: u32, close: f64| PriceBar {
///     date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
///     open: close, high: close, low: close, close, volume: 0,
/// };
///
/// let mut sma = Sma::new(SmaConfig::close(NonZero::new(3).unwrap()));
///
/// assert_eq!(sma.compute(&bar(1, 10.0)), None);
/// assert_eq!(sma.compute(&bar(2, 20.0)), None);
/// assert_eq!(sma.compute(&bar(3, 30.0)), Some(20.0));
/// ```
pub trait Indicator: Sized + Clone + Display + Debug {
    /// Configuration type for this indicator.
    type Config: IndicatorConfig;

    /// Computed output type. `f64` for simple indicators,
    /// a struct for composite ones (bands, MACD).
    type Output: Send + Sync + Display + Debug;

    /// Creates a new indicator from the given config.
    fn new(config: Self::Config) -> Self;

    /// Feeds a bar and returns the updated indicator value,
    /// or `None` while still in warm-up.
    fn compute(&mut self, bar: &PriceBar) -> Option<Self::Output>;

    /// Returns the last computed indicator value without advancing state,
    /// or `None` while still in warm-up.
    ///
    /// This is a cached field read — O(1) with no computation.
    fn value(&self) -> Option<Self::Output>;
}
