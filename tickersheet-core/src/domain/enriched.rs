//! EnrichedBar: a bar plus its derived indicator columns.

use super::bar::Bar;
use serde::{Deserialize, Serialize};

/// A daily bar with every derived indicator for that day.
///
/// Each field is `None` until enough history has accumulated. `None` is the
/// only "not yet computable" marker; a `Some(0.0)` is a real value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedBar {
    pub bar: Bar,
    pub sma_20: Option<f64>,
    pub ema_20: Option<f64>,
    pub volatility_20: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_lower: Option<f64>,
    pub atr_14: Option<f64>,
    pub rsi: Option<f64>,
}

impl EnrichedBar {
    /// Derived values in storage column order (see `INDICATOR_COLUMNS`).
    pub fn indicator_values(&self) -> [Option<f64>; 7] {
        [
            self.sma_20,
            self.ema_20,
            self.volatility_20,
            self.bb_upper,
            self.bb_lower,
            self.atr_14,
            self.rsi,
        ]
    }
}

/// Column names for the derived fields, in the order returned by
/// [`EnrichedBar::indicator_values`].
pub const INDICATOR_COLUMNS: [&str; 7] = [
    "SMA_20",
    "EMA_20",
    "Volatility_20",
    "BB_upper",
    "BB_lower",
    "ATR_14",
    "RSI",
];
