use std::{fmt::Display, num::NonZero};

use serde::Serialize;

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, IndicatorSeries, Price, PriceBar,
    PriceSource, rolling::RollingWindow,
};

/// Configuration for the Relative Strength Index ([`Rsi`]) indicator.
///
/// Gains and losses are averaged with plain trailing means over the lookback
/// window, so the output is a pure function of the last `period + 1` bars.
/// Output begins at index `period`: one bar is consumed by the initial
/// day-over-day delta, then `period` deltas fill the window.
///
/// # Example
///
/// ```
/// use marketpulse_ta::RsiConfig;
/// use std::num::NonZero;
///
/// let config = RsiConfig::close(NonZero::new(14).unwrap());
/// assert_eq!(config.period(), 14);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct RsiConfig {
    period: usize,
    source: PriceSource,
}

impl IndicatorConfig for RsiConfig {
    type Builder = RsiConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        RsiConfigBuilder::new()
    }

    #[inline]
    fn source(&self) -> &PriceSource {
        &self.source
    }
}

impl RsiConfig {
    /// Lookback window over day-over-day deltas.
    #[inline]
    #[must_use]
    pub fn period(&self) -> usize {
        self.period
    }

    /// RSI on closing price.
    #[must_use]
    pub fn close(period: NonZero<usize>) -> Self {
        Self::builder().period(period).build()
    }
}

impl Display for RsiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RsiConfig({}, {})", self.period, self.source)
    }
}

/// Builder for [`RsiConfig`].
///
/// Defaults: source = [`PriceSource::Close`].
/// Period must be set before calling [`build`](IndicatorConfigBuilder::build).
pub struct RsiConfigBuilder {
    period: Option<usize>,
    source: PriceSource,
}

impl RsiConfigBuilder {
    fn new() -> Self {
        Self {
            period: None,
            source: PriceSource::Close,
        }
    }

    /// Sets the lookback period.
    #[inline]
    #[must_use]
    pub fn period(mut self, period: NonZero<usize>) -> Self {
        self.period.replace(period.get());
        self
    }
}

impl IndicatorConfigBuilder<RsiConfig> for RsiConfigBuilder {
    #[inline]
    fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }

    #[inline]
    fn build(self) -> RsiConfig {
        RsiConfig {
            period: self.period.expect("period is required"),
            source: self.source,
        }
    }
}

/// Momentum reading derived from the latest defined RSI value.
///
/// Thresholds are strict: exactly 70 or exactly 30 reads as `Neutral`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Momentum {
    /// RSI strictly above 70.
    Overbought,
    /// RSI strictly below 30.
    Oversold,
    /// Everything else, boundary values included.
    Neutral,
}

impl Momentum {
    /// Classifies a single RSI value.
    #[must_use]
    pub fn classify(rsi: Price) -> Self {
        if rsi > 70.0 {
            Self::Overbought
        } else if rsi < 30.0 {
            Self::Oversold
        } else {
            Self::Neutral
        }
    }
}

impl Display for Momentum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overbought => write!(f, "overbought"),
            Self::Oversold => write!(f, "oversold"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

/// Momentum reading from the last defined value of an RSI series.
///
/// Returns `None` when the series holds no defined value (input shorter than
/// the warm-up region), so callers can distinguish "no reading" from a
/// neutral reading.
#[must_use]
pub fn momentum(rsi: &IndicatorSeries) -> Option<Momentum> {
    rsi.iter().rev().find_map(|value| *value).map(Momentum::classify)
}

/// Relative Strength Index (RSI).
///
/// Measures the speed and magnitude of recent price changes on a 0–100
/// scale from trailing means of day-over-day gains and losses:
///
/// ```text
/// delta[i]  = price[i] − price[i−1]          (undefined at index 0)
/// gain      = max(delta, 0),  loss = max(−delta, 0)
/// rs        = mean(gain, p) / mean(loss, p)
/// RSI       = 100 − 100 / (1 + rs)
/// ```
///
/// A window with zero mean loss means the price never fell over the
/// lookback, and the output is defined as exactly 100 by rule rather than
/// left to the division. A window with zero mean gain yields exactly 0.
///
/// # Example
///
/// ```
/// use marketpulse_ta::{PriceBar, Rsi, RsiConfig};
/// use chrono::NaiveDate;
/// use std::num::NonZero;
///
/// let bar = |day: u32, close: f64| PriceBar {
///     date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
///     open: close, high: close, low: close, close, volume: 0,
/// };
///
/// let mut rsi = Rsi::new(RsiConfig::close(NonZero::new(2).unwrap()));
///
/// // Warm-up: the first bar yields no delta, then 2 deltas fill the window
/// assert_eq!(rsi.compute(&bar(1, 10.0)), None);
/// assert_eq!(rsi.compute(&bar(2, 11.0)), None);
/// // Only gains in the window → 100 by rule
/// assert_eq!(rsi.compute(&bar(3, 12.0)), Some(100.0));
/// ```
#[derive(Clone, Debug)]
pub struct Rsi {
    config: RsiConfig,
    prev_price: Option<Price>,
    gains: RollingWindow,
    losses: RollingWindow,
    current: Option<Price>,
}

impl Indicator for Rsi {
    type Config = RsiConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        let period =
            NonZero::new(config.period).expect("RsiConfig period is built from NonZero");

        Self {
            config,
            prev_price: None,
            gains: RollingWindow::new(period),
            losses: RollingWindow::new(period),
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, bar: &PriceBar) -> Option<Price> {
        let price = self.config.source.extract(bar);

        if let Some(prev) = self.prev_price {
            let delta = price - prev;
            self.gains.push(delta.max(0.0));
            self.losses.push((-delta).max(0.0));
        }
        self.prev_price = Some(price);

        self.current = match (self.gains.mean(), self.losses.mean()) {
            (Some(mean_gain), Some(mean_loss)) => {
                // Zero-loss window: the price only rose, RSI is 100 by rule.
                if mean_loss <= 0.0 {
                    Some(100.0)
                } else {
                    let rs = mean_gain / mean_loss;
                    Some(100.0 - 100.0 / (1.0 + rs))
                }
            }
            _ => None,
        };

        self.current
    }

    #[inline]
    fn value(&self) -> Option<Price> {
        self.current
    }
}

impl Display for Rsi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RSI({}, {})", self.config.period, self.config.source)
    }
}
