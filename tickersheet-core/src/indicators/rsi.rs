//! Relative Strength Index (RSI).
//!
//! Simple trailing means of gains and losses (not Wilder smoothing).
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Lookback: period - 1.
//!
//! Day 0 has no previous close and counts as no movement: gain = loss = 0.
//! avg_loss == 0 saturates at exactly 100, including a completely flat window.

use super::indicator::{rolling, window_mean, Indicator};
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }
}

/// Per-bar (gain, loss) series. NaN where either close is NaN.
pub fn gains_and_losses(bars: &[Bar]) -> (Vec<f64>, Vec<f64>) {
    let mut gains = Vec::with_capacity(bars.len());
    let mut losses = Vec::with_capacity(bars.len());
    for (i, bar) in bars.iter().enumerate() {
        if i == 0 {
            gains.push(0.0);
            losses.push(0.0);
            continue;
        }
        let change = bar.close - bars[i - 1].close;
        if change.is_nan() {
            gains.push(f64::NAN);
            losses.push(f64::NAN);
        } else {
            gains.push(change.max(0.0));
            losses.push((-change).max(0.0));
        }
    }
    (gains, losses)
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        let (gains, losses) = gains_and_losses(bars);
        let avg_gain = rolling(&gains, self.period, window_mean);
        let avg_loss = rolling(&losses, self.period, window_mean);
        avg_gain
            .into_iter()
            .zip(avg_loss)
            .map(|(g, l)| Some(compute_rsi(g?, l?)))
            .collect()
    }
}

pub fn compute_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars};

    #[test]
    fn rsi_all_gains_saturates() {
        let bars = make_bars(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0]);
        let result = Rsi::new(3).compute(&bars);
        assert!(result[1].is_none());
        assert_eq!(result[2], Some(100.0));
        assert_eq!(result[5], Some(100.0));
    }

    #[test]
    fn rsi_all_losses_is_zero() {
        let bars = make_bars(&[105.0, 104.0, 103.0, 102.0, 101.0, 100.0]);
        let result = Rsi::new(3).compute(&bars);
        assert_approx(result[3].unwrap(), 0.0, 1e-12);
    }

    #[test]
    fn rsi_flat_window_is_100() {
        let bars = make_bars(&[50.0; 5]);
        let result = Rsi::new(3).compute(&bars);
        assert_eq!(result[4], Some(100.0));
    }

    #[test]
    fn rsi_mixed() {
        // Closes: 44, 44.34, 44.09, 43.61
        // Window at t=3 covers changes at t=1..=3: +0.34, -0.25, -0.48
        // avg_gain = 0.34/3, avg_loss = 0.73/3
        let bars = make_bars(&[44.0, 44.34, 44.09, 43.61]);
        let result = Rsi::new(3).compute(&bars);
        let expected = 100.0 - 100.0 / (1.0 + 0.34 / 0.73);
        assert_approx(result[3].unwrap(), expected, 1e-9);
    }

    #[test]
    fn rsi_first_window_counts_day_zero_as_flat() {
        // t=2 window: gain[0]=0, gain[1]=2, gain[2]=0; loss[2]=1
        let bars = make_bars(&[10.0, 12.0, 11.0]);
        let result = Rsi::new(3).compute(&bars);
        let expected = 100.0 - 100.0 / (1.0 + (2.0 / 3.0) / (1.0 / 3.0));
        assert_approx(result[2].unwrap(), expected, 1e-9);
    }

    #[test]
    fn rsi_bounds() {
        let bars = make_bars(&[100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0, 120.0]);
        let result = Rsi::new(3).compute(&bars);
        for (i, v) in result.iter().enumerate() {
            if let Some(v) = v {
                assert!((0.0..=100.0).contains(v), "RSI out of bounds at bar {i}: {v}");
            }
        }
    }

    #[test]
    fn rsi_nan_window_is_none() {
        let mut bars = make_bars(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0, 106.0]);
        bars[2].close = f64::NAN;
        let result = Rsi::new(3).compute(&bars);
        // changes at t=2 and t=3 both touch the NaN close
        assert!(result[2].is_none());
        assert!(result[5].is_none());
        assert_eq!(result[6], Some(100.0));
    }

    #[test]
    fn rsi_lookback() {
        assert_eq!(Rsi::new(14).lookback(), 13);
    }
}
