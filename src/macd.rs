use std::{fmt::Display, num::NonZero};

use serde::Serialize;

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, Price, PriceBar, PriceSource, ema::Ewma,
};

/// A series of [`MacdValue`] aligned index-for-index with its input series.
pub type MacdSeries = Vec<Option<MacdValue>>;

/// Configuration for the Moving Average Convergence/Divergence ([`Macd`])
/// indicator.
///
/// Three smoothing spans: the fast and slow EMAs over the price, and the
/// signal EMA over the derived MACD line.
///
/// # Example
///
/// ```
/// use marketpulse_ta::MacdConfig;
///
/// let config = MacdConfig::standard();
/// assert_eq!(config.fast(), 12);
/// assert_eq!(config.slow(), 26);
/// assert_eq!(config.signal(), 9);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct MacdConfig {
    fast: usize,
    slow: usize,
    signal: usize,
    source: PriceSource,
}

impl IndicatorConfig for MacdConfig {
    type Builder = MacdConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        MacdConfigBuilder::new()
    }

    #[inline]
    fn source(&self) -> &PriceSource {
        &self.source
    }
}

impl MacdConfig {
    /// Fast EMA span.
    #[inline]
    #[must_use]
    pub fn fast(&self) -> usize {
        self.fast
    }

    /// Slow EMA span.
    #[inline]
    #[must_use]
    pub fn slow(&self) -> usize {
        self.slow
    }

    /// Signal-line EMA span.
    #[inline]
    #[must_use]
    pub fn signal(&self) -> usize {
        self.signal
    }

    /// MACD(12, 26, 9) on the closing price — the conventional setting.
    #[allow(clippy::missing_panics_doc)]
    #[must_use]
    pub fn standard() -> Self {
        Self::builder()
            .fast(NonZero::new(12).unwrap())
            .slow(NonZero::new(26).unwrap())
            .signal(NonZero::new(9).unwrap())
            .build()
    }
}

impl Display for MacdConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MacdConfig({}, {}, {}, {})",
            self.fast, self.slow, self.signal, self.source
        )
    }
}

/// Builder for [`MacdConfig`].
///
/// Defaults: source = [`PriceSource::Close`].
/// All three spans must be set before calling
/// [`build`](IndicatorConfigBuilder::build).
pub struct MacdConfigBuilder {
    fast: Option<usize>,
    slow: Option<usize>,
    signal: Option<usize>,
    source: PriceSource,
}

impl MacdConfigBuilder {
    fn new() -> Self {
        Self {
            fast: None,
            slow: None,
            signal: None,
            source: PriceSource::Close,
        }
    }

    /// Sets the fast EMA span.
    #[inline]
    #[must_use]
    pub fn fast(mut self, span: NonZero<usize>) -> Self {
        self.fast.replace(span.get());
        self
    }

    /// Sets the slow EMA span.
    #[inline]
    #[must_use]
    pub fn slow(mut self, span: NonZero<usize>) -> Self {
        self.slow.replace(span.get());
        self
    }

    /// Sets the signal-line EMA span.
    #[inline]
    #[must_use]
    pub fn signal(mut self, span: NonZero<usize>) -> Self {
        self.signal.replace(span.get());
        self
    }
}

impl IndicatorConfigBuilder<MacdConfig> for MacdConfigBuilder {
    #[inline]
    fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }

    #[inline]
    fn build(self) -> MacdConfig {
        MacdConfig {
            fast: self.fast.expect("fast span is required"),
            slow: self.slow.expect("slow span is required"),
            signal: self.signal.expect("signal span is required"),
            source: self.source,
        }
    }
}

/// Trend reading derived from the latest MACD histogram value.
///
/// Zero is on the bearish side, so the classification is total and
/// deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Trend {
    /// Histogram strictly above zero.
    Bullish,
    /// Histogram at or below zero.
    Bearish,
}

impl Trend {
    /// Classifies a single histogram value.
    #[must_use]
    pub fn classify(histogram: Price) -> Self {
        if histogram > 0.0 {
            Self::Bullish
        } else {
            Self::Bearish
        }
    }
}

impl Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bullish => write!(f, "bullish"),
            Self::Bearish => write!(f, "bearish"),
        }
    }
}

/// Trend reading from the last defined value of a MACD series.
///
/// Returns `None` only for an empty series; MACD itself has no warm-up gap.
#[must_use]
pub fn trend(macd: &MacdSeries) -> Option<Trend> {
    macd.iter()
        .rev()
        .find_map(|value| *value)
        .map(|value| Trend::classify(value.histogram()))
}

/// MACD output: the MACD line, its signal line, and their difference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacdValue {
    macd: Price,
    signal: Price,
    histogram: Price,
}

impl MacdValue {
    /// MACD line: `fast EMA − slow EMA`.
    #[inline]
    #[must_use]
    pub fn macd(&self) -> Price {
        self.macd
    }

    /// Signal line: EMA of the MACD line.
    #[inline]
    #[must_use]
    pub fn signal(&self) -> Price {
        self.signal
    }

    /// Histogram: `macd − signal`. Positive reads bullish, zero and negative
    /// read bearish.
    #[inline]
    #[must_use]
    pub fn histogram(&self) -> Price {
        self.histogram
    }
}

impl Display for MacdValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MACD(m: {}, s: {}, h: {})",
            self.macd, self.signal, self.histogram
        )
    }
}

/// Moving Average Convergence/Divergence (MACD).
///
/// The MACD line is the difference of a fast and a slow EMA over the price.
/// The signal line smooths the MACD line itself with a third, freshly seeded
/// EMA — its seed is the first MACD value, not any internal state of the
/// price smoothers. The histogram is their difference:
///
/// ```text
/// macd      = EMA(price, fast) − EMA(price, slow)
/// signal    = EMA(macd, signal_span)
/// histogram = macd − signal
/// ```
///
/// All three EMAs seed on their first input, so every index from 0 is
/// defined — there is no warm-up gap, in contrast to the window-based
/// indicators.
///
/// # Example
///
/// ```
/// use marketpulse_ta::{Macd, MacdConfig, PriceBar};
/// use chrono::NaiveDate;
///
/// let bar = |day: u32, close: f64| PriceBar {
///     date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
///     open: close, high: close, low: close, close, volume: 0,
/// };
///
/// let mut macd = Macd::new(MacdConfig::standard());
///
/// // A constant price keeps every line at zero, from the very first bar.
/// let value = macd.compute(&bar(1, 100.0)).unwrap();
/// assert_eq!(value.macd(), 0.0);
/// assert_eq!(value.signal(), 0.0);
/// assert_eq!(value.histogram(), 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct Macd {
    config: MacdConfig,
    fast: Ewma,
    slow: Ewma,
    signal: Ewma,
    current: Option<MacdValue>,
}

impl Indicator for Macd {
    type Config = MacdConfig;
    type Output = MacdValue;

    fn new(config: Self::Config) -> Self {
        let span = |value: usize, name: &str| {
            NonZero::new(value).unwrap_or_else(|| panic!("MacdConfig {name} is built from NonZero"))
        };

        Self {
            config,
            fast: Ewma::new(span(config.fast, "fast span")),
            slow: Ewma::new(span(config.slow, "slow span")),
            signal: Ewma::new(span(config.signal, "signal span")),
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, bar: &PriceBar) -> Option<Self::Output> {
        let price = self.config.source.extract(bar);

        let macd = self.fast.update(price) - self.slow.update(price);
        let signal = self.signal.update(macd);

        self.current = Some(MacdValue {
            macd,
            signal,
            histogram: macd - signal,
        });

        self.current
    }

    #[inline]
    fn value(&self) -> Option<Self::Output> {
        self.current
    }
}

impl Display for Macd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MACD({}, {}, {}, {})",
            self.config.fast, self.config.slow, self.config.signal, self.config.source
        )
    }
}
