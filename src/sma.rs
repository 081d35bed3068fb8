use std::{fmt::Display, num::NonZero};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, Price, PriceBar, PriceSource,
    rolling::RollingWindow,
};

/// Configuration for the Simple Moving Average ([`Sma`]) indicator.
///
/// # Example
///
/// ```rust
/// use marketpulse_ta::SmaConfig;
/// use std::num::NonZero;
///
/// let config = SmaConfig::close(NonZero::new(20).unwrap());
/// assert_eq!(config.window(), 20);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct SmaConfig {
    window: usize,
    source: PriceSource,
}

impl IndicatorConfig for SmaConfig {
    type Builder = SmaConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        SmaConfigBuilder::new()
    }

    #[inline]
    fn source(&self) -> &PriceSource {
        &self.source
    }
}

impl SmaConfig {
    /// Trailing window length (number of bars).
    #[inline]
    #[must_use]
    pub fn window(&self) -> usize {
        self.window
    }

    /// SMA on closing price.
    #[must_use]
    pub fn close(window: NonZero<usize>) -> Self {
        Self::builder().window(window).build()
    }
}

impl Display for SmaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SmaConfig({}, {})", self.window, self.source)
    }
}

/// Builder for [`SmaConfig`].
///
/// Defaults: source = [`PriceSource::Close`].
/// Window must be set before calling [`build`](IndicatorConfigBuilder::build).
pub struct SmaConfigBuilder {
    window: Option<usize>,
    source: PriceSource,
}

impl SmaConfigBuilder {
    fn new() -> Self {
        Self {
            window: None,
            source: PriceSource::Close,
        }
    }

    /// Sets the trailing window length.
    #[inline]
    #[must_use]
    pub fn window(mut self, window: NonZero<usize>) -> Self {
        self.window.replace(window.get());
        self
    }
}

impl IndicatorConfigBuilder<SmaConfig> for SmaConfigBuilder {
    #[inline]
    fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }

    #[inline]
    fn build(self) -> SmaConfig {
        SmaConfig {
            window: self.window.expect("window is required"),
            source: self.source,
        }
    }
}

/// Simple Moving Average (SMA).
///
/// Computes the unweighted mean of the last *w* values, where *w* is the
/// configured window. Returns `None` until the window is full, i.e. the
/// value is defined exactly for indices `>= w - 1`.
///
/// Uses a running sum for O(1) updates per bar.
///
/// # Example
///
/// ```rust
/// use marketpulse_ta::{PriceBar, Sma, SmaConfig};
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
/// assert_eq!(sma.compute(&bar(4, 40.0)), Some(30.0));
/// ```
#[derive(Clone, Debug)]
pub struct Sma {
    config: SmaConfig,
    window: RollingWindow,
    current: Option<Price>,
}

impl Indicator for Sma {
    type Config = SmaConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        let window = RollingWindow::new(
            NonZero::new(config.window).expect("SmaConfig window is built from NonZero"),
        );

        Self {
            config,
            window,
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, bar: &PriceBar) -> Option<Price> {
        self.window.push(self.config.source.extract(bar));
        self.current = self.window.mean();
        self.current
    }

    #[inline]
    fn value(&self) -> Option<Price> {
        self.current
    }
}

impl Display for Sma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SMA({}, {})", self.config.window, self.config.source)
    }
}
