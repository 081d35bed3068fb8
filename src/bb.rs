use std::{
    fmt::Display,
    hash::{Hash, Hasher},
    num::NonZero,
};

use serde::Serialize;

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, Price, PriceBar, PriceSource,
    error::ValidationError, rolling::RollingWindow,
};

/// A series of [`BbValue`] aligned index-for-index with its input series.
pub type BandSeries = Vec<Option<BbValue>>;

/// Standard deviation multiplier for the volatility bands.
///
/// Wraps a positive, finite `f64`; zero, negative, NaN, and infinite values
/// are rejected at construction. Defaults to `2.0`, the conventional
/// Bollinger setting.
///
/// Implements `Eq` and `Hash` via bit-level comparison, which is safe because
/// NaN is rejected at construction.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct BandMultiplier(f64);

impl BandMultiplier {
    /// Creates a new band multiplier.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonPositiveMultiplier`] if `value` is zero,
    /// negative, NaN, or infinite.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ValidationError::NonPositiveMultiplier { value });
        }
        Ok(Self(value))
    }

    /// The wrapped multiplier.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for BandMultiplier {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for BandMultiplier {}

impl Hash for BandMultiplier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl Default for BandMultiplier {
    fn default() -> Self {
        Self(2.0)
    }
}

/// Configuration for the volatility band ([`Bb`]) indicator.
///
/// # Example
///
/// ```
/// use marketpulse_ta::BbConfig;
/// use std::num::NonZero;
///
/// // Default: 2.0 standard deviations on the close
/// let config = BbConfig::close(NonZero::new(20).unwrap());
/// assert_eq!(config.window(), 20);
/// assert_eq!(config.multiplier().value(), 2.0);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct BbConfig {
    window: usize,
    source: PriceSource,
    multiplier: BandMultiplier,
}

impl IndicatorConfig for BbConfig {
    type Builder = BbConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        BbConfigBuilder::new()
    }

    #[inline]
    fn source(&self) -> &PriceSource {
        &self.source
    }
}

impl BbConfig {
    /// Trailing window length shared by the mean and its standard deviation.
    #[inline]
    #[must_use]
    pub fn window(&self) -> usize {
        self.window
    }

    /// Standard deviation multiplier for the upper and lower bands.
    #[inline]
    #[must_use]
    pub fn multiplier(&self) -> BandMultiplier {
        self.multiplier
    }

    /// Bands on the closing price with the default 2.0 multiplier.
    #[must_use]
    pub fn close(window: NonZero<usize>) -> Self {
        Self::builder().window(window).build()
    }
}

impl Display for BbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BbConfig({}, {}, {})",
            self.window,
            self.source,
            self.multiplier.value()
        )
    }
}

/// Builder for [`BbConfig`].
///
/// Defaults: source = [`PriceSource::Close`], multiplier = `2.0`.
/// Window must be set before calling [`build`](IndicatorConfigBuilder::build).
pub struct BbConfigBuilder {
    window: Option<usize>,
    source: PriceSource,
    multiplier: BandMultiplier,
}

impl BbConfigBuilder {
    fn new() -> Self {
        Self {
            window: None,
            source: PriceSource::Close,
            multiplier: BandMultiplier::default(),
        }
    }

    /// Sets the trailing window length.
    #[inline]
    #[must_use]
    pub fn window(mut self, window: NonZero<usize>) -> Self {
        self.window.replace(window.get());
        self
    }

    /// Sets the standard deviation multiplier.
    #[inline]
    #[must_use]
    pub fn multiplier(mut self, multiplier: BandMultiplier) -> Self {
        self.multiplier = multiplier;
        self
    }
}

impl IndicatorConfigBuilder<BbConfig> for BbConfigBuilder {
    #[inline]
    fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }

    #[inline]
    fn build(self) -> BbConfig {
        BbConfig {
            window: self.window.expect("window is required"),
            source: self.source,
            multiplier: self.multiplier,
        }
    }
}

/// Volatility band output: upper, middle, and lower bands.
///
/// The middle band is the trailing mean. Upper and lower bands are offset by
/// `k × σ`, where `σ` is the population standard deviation of the *same*
/// window — the pairing is fixed at construction, so the bands are always a
/// valid envelope around their own mean.
///
/// ```text
/// upper  = mean + k × σ
/// middle = mean
/// lower  = mean − k × σ
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BbValue {
    upper: Price,
    middle: Price,
    lower: Price,
}

impl BbValue {
    /// Upper band: `mean + k × σ`.
    #[inline]
    #[must_use]
    pub fn upper(&self) -> Price {
        self.upper
    }

    /// Middle band: trailing mean of the window.
    #[inline]
    #[must_use]
    pub fn middle(&self) -> Price {
        self.middle
    }

    /// Lower band: `mean − k × σ`.
    #[inline]
    #[must_use]
    pub fn lower(&self) -> Price {
        self.lower
    }

    /// Band width: `upper − lower`, i.e. `2 × k × σ`.
    ///
    /// Narrow width indicates consolidation (squeeze); wide width indicates
    /// high volatility.
    #[inline]
    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

impl Display for BbValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BB(u: {}, m: {}, l: {})",
            self.upper, self.middle, self.lower
        )
    }
}

/// Bollinger-style volatility bands.
///
/// One rolling pass produces the trailing mean and its population standard
/// deviation, and the three bands follow from those. Returns `None` until
/// the window is full, i.e. defined exactly for indices `>= window - 1`.
///
/// # Example
///
/// ```
/// use marketpulse_ta::{Bb, BbConfig, PriceBar};
/// use chrono::NaiveDate;
/// use std::num::NonZero;
///
/// let bar = |day: u32, close: f64| PriceBar {
///     date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
///     open: close, high: close, low: close, close, volume: 0,
/// };
///
/// let mut bb = Bb::new(BbConfig::close(NonZero::new(2).unwrap()));
///
/// assert!(bb.compute(&bar(1, 3.0)).is_none());
/// // window [3, 5]: mean = 4, σ = 1, k = 2 → bands (6, 4, 2)
/// let value = bb.compute(&bar(2, 5.0)).unwrap();
/// assert_eq!(value.upper(), 6.0);
/// assert_eq!(value.middle(), 4.0);
/// assert_eq!(value.lower(), 2.0);
/// ```
#[derive(Clone, Debug)]
pub struct Bb {
    config: BbConfig,
    window: RollingWindow,
    current: Option<BbValue>,
}

impl Indicator for Bb {
    type Config = BbConfig;
    type Output = BbValue;

    fn new(config: Self::Config) -> Self {
        let window = RollingWindow::new(
            NonZero::new(config.window).expect("BbConfig window is built from NonZero"),
        );

        Self {
            config,
            window,
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, bar: &PriceBar) -> Option<Self::Output> {
        self.window.push(self.config.source.extract(bar));

        self.current = match (self.window.mean(), self.window.std_dev()) {
            (Some(mean), Some(std_dev)) => {
                let offset = std_dev * self.config.multiplier.value();
                Some(BbValue {
                    upper: mean + offset,
                    middle: mean,
                    lower: mean - offset,
                })
            }
            _ => None,
        };

        self.current
    }

    #[inline]
    fn value(&self) -> Option<Self::Output> {
        self.current
    }
}

impl Display for Bb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BB({}, {}, {})",
            self.config.window,
            self.config.source,
            self.config.multiplier.value(),
        )
    }
}
