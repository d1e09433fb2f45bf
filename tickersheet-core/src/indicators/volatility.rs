//! Rolling volatility: sample standard deviation (ddof = 1) of closes.
//! Lookback: period - 1.

use super::indicator::{closes, rolling, window_sample_std, Indicator};
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Volatility {
    period: usize,
    name: String,
}

impl Volatility {
    pub fn new(period: usize) -> Self {
        assert!(period >= 2, "volatility period must be >= 2");
        Self {
            period,
            name: format!("volatility_{period}"),
        }
    }
}

impl Indicator for Volatility {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        rolling(&closes(bars), self.period, window_sample_std)
    }
}
