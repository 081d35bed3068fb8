//! Engine error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while validating input data or configuration.
///
/// Validation is fatal to the requested computation: nothing is partially
/// computed once one of these is returned.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ValidationError {
    /// The input series holds no bars.
    #[error("series is empty")]
    EmptySeries,

    /// A bar's date is not after the previous bar's date.
    #[error("dates must be strictly ascending: bar {index} ({date}) does not follow {prev}")]
    OutOfOrderDate {
        /// Index of the offending bar.
        index: usize,
        /// Date of the preceding bar.
        prev: NaiveDate,
        /// Date of the offending bar.
        date: NaiveDate,
    },

    /// Two bars share the same date.
    #[error("duplicate date at bar {index}: {date}")]
    DuplicateDate {
        /// Index of the second occurrence.
        index: usize,
        /// The repeated date.
        date: NaiveDate,
    },

    /// A bar price field is zero, negative, NaN, or infinite.
    #[error("{field} must be a positive finite number, got {value}")]
    NonPositivePrice {
        /// Offending field name.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// The high is below the bar body.
    #[error("high {high} is below max(open, close) = {limit}")]
    HighBelowBody {
        /// Rejected high.
        high: f64,
        /// `max(open, close)`.
        limit: f64,
    },

    /// The low is above the bar body.
    #[error("low {low} is above min(open, close) = {limit}")]
    LowAboveBody {
        /// Rejected low.
        low: f64,
        /// `min(open, close)`.
        limit: f64,
    },

    /// A window or span configuration value is zero.
    #[error("{name} must be positive, got {value}")]
    NonPositiveWindow {
        /// Configuration parameter name.
        name: &'static str,
        /// Rejected value.
        value: usize,
    },

    /// The band multiplier is zero, negative, NaN, or infinite.
    #[error("band multiplier must be a positive finite number, got {value}")]
    NonPositiveMultiplier {
        /// Rejected value.
        value: f64,
    },
}

/// Arithmetic degenerate cases in period aggregation.
///
/// Unlike warm-up gaps, these have no defined business rule. Each group is
/// reported independently; a degenerate group does not affect the others.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AggregationError {
    /// The first close of a month is zero, so the intra-month return has no
    /// defined base.
    #[error("cannot compute return for {year}-{month:02}: first close is zero")]
    ZeroBaseClose {
        /// Group year.
        year: i32,
        /// Group month (1–12).
        month: u32,
    },
}

/// Any error the one-call analysis entry point can surface.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum TaError {
    /// Input or configuration rejected at entry.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A monthly group hit an arithmetic degenerate case.
    #[error(transparent)]
    Aggregation(#[from] AggregationError),
}
