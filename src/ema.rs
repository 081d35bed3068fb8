use std::{fmt::Display, num::NonZero};

use crate::{Indicator, IndicatorConfig, IndicatorConfigBuilder, Price, PriceBar, PriceSource};

/// Plain-`f64` exponential smoothing recurrence.
///
/// Seeds on the first value it sees: the first output equals the first
/// input, and every subsequent output is
/// `α × value + (1 − α) × previous` with `α = 2 / (span + 1)`.
///
/// This is the core shared by [`Ema`] and the MACD signal line, which runs a
/// fresh instance over the already-derived MACD series so the signal seed is
/// the first MACD value, not the price smoother's internal state.
#[derive(Clone, Debug)]
pub(crate) struct Ewma {
    alpha: f64,
    current: Option<f64>,
}

impl Ewma {
    pub fn new(span: NonZero<usize>) -> Self {
        Self {
            #[allow(clippy::cast_precision_loss)]
            alpha: 2.0 / (span.get() + 1) as f64,
            current: None,
        }
    }

    #[inline]
    pub fn update(&mut self, value: f64) -> f64 {
        let next = match self.current {
            None => value,
            Some(previous) => self.alpha.mul_add(value - previous, previous),
        };
        self.current = Some(next);
        next
    }
}

/// Configuration for the Exponential Moving Average ([`Ema`]) indicator.
///
/// # Example
///
/// ```
/// use marketpulse_ta::EmaConfig;
/// use std::num::NonZero;
///
/// let config = EmaConfig::close(NonZero::new(12).unwrap());
/// assert_eq!(config.span(), 12);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct EmaConfig {
    span: usize,
    source: PriceSource,
}

impl IndicatorConfig for EmaConfig {
    type Builder = EmaConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        EmaConfigBuilder::new()
    }

    #[inline]
    fn source(&self) -> &PriceSource {
        &self.source
    }
}

impl EmaConfig {
    /// Smoothing span; the smoothing factor is `2 / (span + 1)`.
    #[inline]
    #[must_use]
    pub fn span(&self) -> usize {
        self.span
    }

    /// EMA on closing price.
    #[must_use]
    pub fn close(span: NonZero<usize>) -> Self {
        Self::builder().span(span).build()
    }
}

impl Display for EmaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EmaConfig({}, {})", self.span, self.source)
    }
}

/// Builder for [`EmaConfig`].
///
/// Defaults: source = [`PriceSource::Close`].
/// Span must be set before calling [`build`](IndicatorConfigBuilder::build).
pub struct EmaConfigBuilder {
    span: Option<usize>,
    source: PriceSource,
}

impl EmaConfigBuilder {
    fn new() -> Self {
        Self {
            span: None,
            source: PriceSource::Close,
        }
    }

    /// Sets the smoothing span.
    #[inline]
    #[must_use]
    pub fn span(mut self, span: NonZero<usize>) -> Self {
        self.span.replace(span.get());
        self
    }
}

impl IndicatorConfigBuilder<EmaConfig> for EmaConfigBuilder {
    #[inline]
    fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }

    #[inline]
    fn build(self) -> EmaConfig {
        EmaConfig {
            span: self.span.expect("span is required"),
            source: self.source,
        }
    }
}

/// Exponential Moving Average (EMA).
///
/// A weighted moving average that gives more weight to recent prices, with
/// the standard smoothing factor `α = 2 / (span + 1)`:
///
/// ```text
/// EMA[0] = price[0]
/// EMA[i] = α × price[i] + (1 − α) × EMA[i−1]
/// ```
///
/// Unlike the window-based indicators there is no warm-up gap: the
/// recurrence seeds from the first observation, so every index from 0 is
/// defined. Runs in O(1) constant memory per bar via a single fused
/// multiply-add.
///
/// # Example
///
/// ```
/// use marketpulse_ta::{Ema, EmaConfig, PriceBar};
/// use chrono::NaiveDate;
/// use std::num::NonZero;
///
/// let bar = |day: u32, close: f64| PriceBar {
///     date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
///     open: close, high: close, low: close, close, volume: 0,
/// };
///
/// // EMA(3): α = 0.5
/// let mut ema = Ema::new(EmaConfig::close(NonZero::new(3).unwrap()));
///
/// // Seed: first output equals first input
/// assert_eq!(ema.compute(&bar(1, 2.0)), Some(2.0));
/// // 4 × 0.5 + 2 × 0.5 = 3.0
/// assert_eq!(ema.compute(&bar(2, 4.0)), Some(3.0));
/// // 6 × 0.5 + 3 × 0.5 = 4.5
/// assert_eq!(ema.compute(&bar(3, 6.0)), Some(4.5));
/// ```
#[derive(Clone, Debug)]
pub struct Ema {
    config: EmaConfig,
    core: Ewma,
    current: Option<Price>,
}

impl Indicator for Ema {
    type Config = EmaConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            core: Ewma::new(NonZero::new(config.span).expect("EmaConfig span is built from NonZero")),
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, bar: &PriceBar) -> Option<Price> {
        let value = self.core.update(self.config.source.extract(bar));
        self.current = Some(value);
        self.current
    }

    #[inline]
    fn value(&self) -> Option<Price> {
        self.current
    }
}

impl Display for Ema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EMA({}, {})", self.config.span, self.config.source)
    }
}
