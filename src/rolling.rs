use std::{collections::VecDeque, num::NonZero};

use crate::{IndicatorSeries, Price};

/// Incremental trailing window over a value series.
///
/// Maintains a running sum and sum of squares so mean and standard deviation
/// are O(1) per push. Both accessors return `None` until the window holds
/// `size` values, which is what surfaces as the warm-up gap of every
/// window-based indicator.
///
/// The running sums are maintained by add/subtract and may accumulate FP
/// rounding drift over very long runs, negligible for typical window sizes
/// on daily financial data.
#[derive(Clone, Debug)]
pub(crate) struct RollingWindow {
    size: usize,
    size_reciprocal: f64,
    window: VecDeque<Price>,
    sum: Price,
    sum_of_squares: f64,
}

impl RollingWindow {
    pub fn new(size: NonZero<usize>) -> Self {
        let size = size.get();
        Self {
            size,
            #[allow(clippy::cast_precision_loss)]
            size_reciprocal: 1.0 / size as f64,
            window: VecDeque::with_capacity(size),
            sum: 0.0,
            sum_of_squares: 0.0,
        }
    }

    #[inline]
    pub fn push(&mut self, value: Price) {
        if self.window.len() == self.size
            && let Some(old) = self.window.pop_front()
        {
            self.sum -= old;
            self.sum_of_squares -= old * old;
        }

        self.window.push_back(value);
        self.sum += value;
        self.sum_of_squares += value * value;
    }

    #[inline]
    fn is_ready(&self) -> bool {
        self.window.len() == self.size
    }

    /// Trailing mean, `None` until the window is full.
    #[inline]
    pub fn mean(&self) -> Option<Price> {
        self.is_ready().then(|| self.sum * self.size_reciprocal)
    }

    /// Trailing population standard deviation, `None` until the window is
    /// full. Uses the same window as [`mean`](Self::mean) by construction.
    #[inline]
    pub fn std_dev(&self) -> Option<Price> {
        self.mean().map(|mean| {
            // Variance = E[X^2] - (E[X])^2; clamp against FP drift below zero.
            let variance = self
                .sum_of_squares
                .mul_add(self.size_reciprocal, -(mean * mean));
            variance.max(0.0).sqrt()
        })
    }
}

/// Rolling mean over a trailing `window`, aligned with the input.
///
/// Positions with index `< window - 1` are `None`.
#[must_use]
pub fn rolling_mean(values: &[Price], window: NonZero<usize>) -> IndicatorSeries {
    let mut rolling = RollingWindow::new(window);
    values
        .iter()
        .map(|&value| {
            rolling.push(value);
            rolling.mean()
        })
        .collect()
}

/// Rolling population standard deviation over a trailing `window`, aligned
/// with the input.
///
/// Positions with index `< window - 1` are `None`.
#[must_use]
pub fn rolling_std_dev(values: &[Price], window: NonZero<usize>) -> IndicatorSeries {
    let mut rolling = RollingWindow::new(window);
    values
        .iter()
        .map(|&value| {
            rolling.push(value);
            rolling.std_dev()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{assert_approx, nz};

    fn window(size: usize) -> RollingWindow {
        RollingWindow::new(nz(size))
    }

    mod filling {
        use super::*;

        #[test]
        fn mean_is_none_when_empty() {
            assert_eq!(window(3).mean(), None);
        }

        #[test]
        fn mean_is_none_until_window_full() {
            let mut w = window(3);
            w.push(10.0);
            assert_eq!(w.mean(), None);
            w.push(20.0);
            assert_eq!(w.mean(), None);
        }

        #[test]
        fn mean_returns_value_when_full() {
            let mut w = window(2);
            w.push(10.0);
            w.push(20.0);
            assert_eq!(w.mean(), Some(15.0));
        }

        #[test]
        fn std_dev_shares_the_warmup() {
            let mut w = window(2);
            w.push(10.0);
            assert_eq!(w.std_dev(), None);
            w.push(20.0);
            assert_eq!(w.std_dev(), Some(5.0));
        }
    }

    mod sliding {
        use super::*;

        #[test]
        fn oldest_value_drops_on_advance() {
            let mut w = window(2);
            w.push(10.0);
            w.push(20.0);
            w.push(30.0);
            // 10 dropped, (20 + 30) / 2 = 25
            assert_eq!(w.mean(), Some(25.0));
        }

        #[test]
        fn slides_across_many_values() {
            let mut w = window(2);
            for value in [1.0, 2.0, 3.0, 4.0, 5.0] {
                w.push(value);
            }
            // (4 + 5) / 2 = 4.5
            assert_eq!(w.mean(), Some(4.5));
        }
    }

    mod statistics {
        use super::*;

        #[test]
        fn population_std_dev() {
            // window [2, 4, 4, 4, 5, 5, 7, 9]: mean = 5, population σ = 2
            let mut w = window(8);
            for value in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
                w.push(value);
            }
            assert_eq!(w.mean(), Some(5.0));
            assert_approx!(w.std_dev().unwrap(), 2.0);
        }

        #[test]
        fn constant_window_has_zero_std_dev() {
            let mut w = window(3);
            for _ in 0..3 {
                w.push(42.0);
            }
            assert_eq!(w.std_dev(), Some(0.0));
        }

        #[test]
        fn window_size_one_is_ready_immediately() {
            let mut w = window(1);
            w.push(7.0);
            assert_eq!(w.mean(), Some(7.0));
            assert_eq!(w.std_dev(), Some(0.0));
        }
    }

    mod series_level {
        use super::*;

        #[test]
        fn defined_exactly_from_window_minus_one() {
            let values = [1.0, 2.0, 3.0, 4.0, 5.0];
            let means = rolling_mean(&values, nz(3));
            assert_eq!(means, vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);
        }

        #[test]
        fn output_length_equals_input_length() {
            let values = [1.0, 2.0];
            // Window larger than the input: all warm-up, still aligned.
            let stds = rolling_std_dev(&values, nz(10));
            assert_eq!(stds, vec![None, None]);
        }
    }
}
