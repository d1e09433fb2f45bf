//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * close[t] + (1 - alpha) * EMA[t-1], alpha = 2 / (period + 1).
//! Seed: EMA[0] = close[0]. Exponential-weighting convention, so there is no
//! warmup gap. Lookback: 0.

use super::indicator::{closes, Indicator};
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    name: String,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "EMA period must be >= 1");
        Self {
            period,
            name: format!("ema_{period}"),
        }
    }

    pub fn alpha(&self) -> f64 {
        2.0 / (self.period as f64 + 1.0)
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        ema_of_series(&closes(bars), self.alpha())
    }
}

/// EMA of an arbitrary series, seeded with its first value.
///
/// A non-finite input yields `None` at that index and the recursion re-seeds
/// from the next finite value.
pub fn ema_of_series(values: &[f64], alpha: f64) -> Vec<Option<f64>> {
    let mut prev: Option<f64> = None;
    values
        .iter()
        .map(|&v| {
            if !v.is_finite() {
                prev = None;
                return None;
            }
            let next = match prev {
                None => v,
                Some(p) => alpha * v + (1.0 - alpha) * p,
            };
            prev = Some(next);
            Some(next)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn ema_period_1_equals_close() {
        let bars = make_bars(&[100.0, 200.0, 300.0]);
        let result = Ema::new(1).compute(&bars);
        assert_eq!(result, vec![Some(100.0), Some(200.0), Some(300.0)]);
    }

    #[test]
    fn ema_seeded_with_first_close() {
        // alpha = 2/(3+1) = 0.5
        // EMA[0] = 10, EMA[1] = 0.5*12 + 0.5*10 = 11, EMA[2] = 0.5*14 + 0.5*11 = 12.5
        let bars = make_bars(&[10.0, 12.0, 14.0]);
        let result = Ema::new(3).compute(&bars);
        assert_approx(result[0].unwrap(), 10.0, DEFAULT_EPSILON);
        assert_approx(result[1].unwrap(), 11.0, DEFAULT_EPSILON);
        assert_approx(result[2].unwrap(), 12.5, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_20_recurrence() {
        let closes: Vec<f64> = (0..40).map(|i| 50.0 + (i as f64 * 0.7).sin() * 5.0).collect();
        let result = Ema::new(20).compute(&make_bars(&closes));
        for t in 1..closes.len() {
            let expected = (2.0 / 21.0) * closes[t] + (19.0 / 21.0) * result[t - 1].unwrap();
            assert_approx(result[t].unwrap(), expected, 1e-9);
        }
    }

    #[test]
    fn ema_reseeds_after_nan() {
        let mut bars = make_bars(&[10.0, 11.0, 12.0, 13.0]);
        bars[1].close = f64::NAN;
        let result = Ema::new(3).compute(&bars);
        assert!(result[1].is_none());
        assert_approx(result[2].unwrap(), 12.0, DEFAULT_EPSILON);
        assert_approx(result[3].unwrap(), 12.5, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_lookback_is_zero() {
        assert_eq!(Ema::new(20).lookback(), 0);
    }
}
