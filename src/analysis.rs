use std::num::NonZero;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    BandMultiplier, BandSeries, Bb, BbConfig, Ema, EmaConfig, Indicator, IndicatorConfig,
    IndicatorConfigBuilder, IndicatorSeries, Macd, MacdConfig, MacdSeries, Momentum,
    MonthlyReturn, OrderedSeries, Rsi, RsiConfig, Sma, SmaConfig, Trend,
    error::{TaError, ValidationError},
    macd::trend,
    monthly::monthly_returns,
    rsi::momentum,
};

/// The engine's flat configuration surface, one field per recognized option.
///
/// This is the plain-parameter form a caller (or a settings panel) hands in;
/// [`analyze`] validates it into the typed per-indicator configs. Values of
/// zero, and non-finite or non-positive multipliers, are rejected with a
/// [`ValidationError`] naming the parameter.
///
/// Defaults follow the dashboard conventions:
///
/// | option | default |
/// |---|---|
/// | `short_window` | 20 |
/// | `medium_window` | 50 |
/// | `bollinger_window` | 20 |
/// | `bollinger_multiplier` | 2.0 |
/// | `rsi_period` | 14 |
/// | `macd_fast` | 12 |
/// | `macd_slow` | 26 |
/// | `macd_signal` | 9 |
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Short moving-average window.
    pub short_window: usize,
    /// Medium moving-average window.
    pub medium_window: usize,
    /// Volatility band window.
    pub bollinger_window: usize,
    /// Volatility band standard deviation multiplier.
    pub bollinger_multiplier: f64,
    /// RSI lookback period.
    pub rsi_period: usize,
    /// MACD fast EMA span.
    pub macd_fast: usize,
    /// MACD slow EMA span.
    pub macd_slow: usize,
    /// MACD signal-line EMA span.
    pub macd_signal: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            short_window: 20,
            medium_window: 50,
            bollinger_window: 20,
            bollinger_multiplier: 2.0,
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
        }
    }
}

fn window(name: &'static str, value: usize) -> Result<NonZero<usize>, ValidationError> {
    NonZero::new(value).ok_or(ValidationError::NonPositiveWindow { name, value })
}

/// Everything the presentation layer needs for one dashboard render: the
/// aligned indicator series, the headline classifications, and the monthly
/// performance table.
///
/// All series have the same length as the input [`OrderedSeries`]; warm-up
/// positions are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Short simple moving average.
    pub short_ma: IndicatorSeries,
    /// Medium simple moving average.
    pub medium_ma: IndicatorSeries,
    /// Volatility bands.
    pub bands: BandSeries,
    /// Relative Strength Index.
    pub rsi: IndicatorSeries,
    /// Momentum reading from the last defined RSI value; `None` when the
    /// series is shorter than the RSI warm-up.
    pub momentum: Option<Momentum>,
    /// MACD line, signal line, and histogram.
    pub macd: MacdSeries,
    /// Trend reading from the last MACD histogram.
    pub trend: Option<Trend>,
    /// Per-month performance, in first-seen chronological order.
    pub monthly: Vec<MonthlyReturn>,
}

/// Simple moving average over the series, aligned with it.
#[must_use]
pub fn sma_series(series: &OrderedSeries, config: SmaConfig) -> IndicatorSeries {
    collect(series, Sma::new(config))
}

/// Exponential moving average over the series, aligned with it. Defined from
/// index 0.
#[must_use]
pub fn ema_series(series: &OrderedSeries, config: EmaConfig) -> IndicatorSeries {
    collect(series, Ema::new(config))
}

/// Volatility bands over the series, aligned with it.
#[must_use]
pub fn bollinger_series(series: &OrderedSeries, config: BbConfig) -> BandSeries {
    collect(series, Bb::new(config))
}

/// RSI over the series, aligned with it. Defined from index `period`.
#[must_use]
pub fn rsi_series(series: &OrderedSeries, config: RsiConfig) -> IndicatorSeries {
    collect(series, Rsi::new(config))
}

/// MACD over the series, aligned with it. Defined from index 0.
#[must_use]
pub fn macd_series(series: &OrderedSeries, config: MacdConfig) -> MacdSeries {
    collect(series, Macd::new(config))
}

fn collect<I: Indicator>(series: &OrderedSeries, mut indicator: I) -> Vec<Option<I::Output>> {
    series
        .bars()
        .iter()
        .map(|bar| indicator.compute(bar))
        .collect()
}

/// Computes the full indicator suite and monthly table in one call.
///
/// Pure function of its inputs: recomputing on the same series and
/// configuration yields an identical report.
///
/// # Errors
///
/// [`ValidationError`] (wrapped in [`TaError`]) for a non-positive
/// configuration value, before anything is computed; [`AggregationError`]
/// if a monthly group is arithmetically degenerate.
///
/// [`AggregationError`]: crate::AggregationError
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use marketpulse_ta::{AnalysisConfig, OrderedSeries, PriceBar, analyze};
///
/// let bar = |day: u32, close: f64| PriceBar {
///     date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
///     open: close, high: close, low: close, close, volume: 0,
/// };
///
/// let series = OrderedSeries::from_bars(
///     (1..=30).map(|d| bar(d, 100.0 + f64::from(d))).collect(),
/// ).unwrap();
///
/// let report = analyze(&series, &AnalysisConfig::default()).unwrap();
/// assert_eq!(report.rsi.len(), series.len());
/// assert_eq!(report.monthly.len(), 1);
/// ```
pub fn analyze(
    series: &OrderedSeries,
    config: &AnalysisConfig,
) -> Result<AnalysisReport, TaError> {
    let short = SmaConfig::close(window("short_window", config.short_window)?);
    let medium = SmaConfig::close(window("medium_window", config.medium_window)?);
    let bands = BbConfig::builder()
        .window(window("bollinger_window", config.bollinger_window)?)
        .multiplier(BandMultiplier::try_new(config.bollinger_multiplier)?)
        .build();
    let rsi_config = RsiConfig::close(window("rsi_period", config.rsi_period)?);
    let macd_config = MacdConfig::builder()
        .fast(window("macd_fast", config.macd_fast)?)
        .slow(window("macd_slow", config.macd_slow)?)
        .signal(window("macd_signal", config.macd_signal)?)
        .build();

    debug!(bars = series.len(), ?config, "computing indicator suite");

    let rsi = rsi_series(series, rsi_config);
    let macd = macd_series(series, macd_config);
    let monthly = monthly_returns(series)
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AnalysisReport {
        short_ma: sma_series(series, short),
        medium_ma: sma_series(series, medium),
        bands: bollinger_series(series, bands),
        momentum: momentum(&rsi),
        rsi,
        trend: trend(&macd),
        macd,
        monthly,
    })
}
