//! Indicator trait and trailing-window helpers.
//!
//! Indicators are pure functions: bar history in, one optional value per bar
//! out. A value at bar t is computed only from bars 0..=t.

use crate::domain::Bar;

/// Trait for indicators.
///
/// Indicators take a full bar series and produce an output series of the same
/// length. The first `lookback()` values are `None` (warmup).
///
/// # Look-ahead contamination guard
/// No indicator value at bar t may depend on price data from bar t+1 or later.
/// Every indicator must pass the truncated-vs-full series test.
pub trait Indicator: Send + Sync {
    /// Column-style name (e.g., "sma_20", "atr_14").
    fn name(&self) -> &str;

    /// Number of bars needed before the indicator produces a value.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    ///
    /// Returns a `Vec` of the same length as `bars`; `None` means
    /// "not computable yet", never zero.
    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>>;
}

/// Apply `f` to every trailing window of `period` values.
///
/// Indices before `period - 1` get `None`. Non-finite inputs are passed
/// through to `f`, which decides how to treat them.
pub fn rolling<F>(values: &[f64], period: usize, f: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> Option<f64>,
{
    let n = values.len();
    let mut result = vec![None; n];
    if period == 0 || n < period {
        return result;
    }
    for i in (period - 1)..n {
        result[i] = f(&values[(i + 1 - period)..=i]);
    }
    result
}

/// Compensated (Neumaier) summation.
pub fn neumaier_sum(values: &[f64]) -> f64 {
    let mut sum = 0.0_f64;
    let mut compensation = 0.0_f64;
    for &v in values {
        let t = sum + v;
        if sum.abs() >= v.abs() {
            compensation += (sum - t) + v;
        } else {
            compensation += (v - t) + sum;
        }
        sum = t;
    }
    sum + compensation
}

fn is_constant(window: &[f64]) -> bool {
    window.windows(2).all(|w| w[0] == w[1])
}

/// Arithmetic mean of a window; `None` if empty or any value is non-finite.
/// A constant window returns its value exactly.
pub fn window_mean(window: &[f64]) -> Option<f64> {
    if window.is_empty() || window.iter().any(|v| !v.is_finite()) {
        return None;
    }
    if is_constant(window) {
        return Some(window[0]);
    }
    Some(neumaier_sum(window) / window.len() as f64)
}

/// Sample standard deviation (ddof = 1); `None` for fewer than two values
/// or any non-finite value. Exactly 0 for a constant window.
pub fn window_sample_std(window: &[f64]) -> Option<f64> {
    if window.len() < 2 {
        return None;
    }
    let mean = window_mean(window)?;
    if is_constant(window) {
        return Some(0.0);
    }
    let squares: Vec<f64> = window
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .collect();
    Some((neumaier_sum(&squares) / (window.len() - 1) as f64).sqrt())
}

/// Close prices as a plain series.
pub fn closes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}
