//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|).
//! ATR is the simple mean of the trailing `period` true ranges.
//! Lookback: period - 1.
//!
//! Day 0 has no previous close. TR[0] is high-low alone: the two
//! previous-close terms are left out of the max entirely rather than counted
//! as zero. TR[0] is included in the first ATR window.

use super::indicator::{rolling, window_mean, Indicator};
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
    name: String,
}

impl Atr {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ATR period must be >= 1");
        Self {
            period,
            name: format!("atr_{period}"),
        }
    }
}

/// Compute the True Range series from bars.
///
/// Entries are NaN where an input price is NaN; the windowed mean turns those
/// into `None`.
pub fn true_range(bars: &[Bar]) -> Vec<f64> {
    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            let range = bar.high - bar.low;
            if i == 0 {
                return range;
            }
            let pc = bars[i - 1].close;
            if range.is_nan() || pc.is_nan() {
                return f64::NAN;
            }
            range.max((bar.high - pc).abs()).max((bar.low - pc).abs())
        })
        .collect()
}

impl Indicator for Atr {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        rolling(&true_range(bars), self.period, window_mean)
    }
}
