//! Enrichment: run the fixed indicator set over a bar series and build one
//! immutable `EnrichedBar` per day.

use super::indicator::Indicator;
use super::{Atr, Bollinger, Ema, Rsi, Sma, Volatility};
use crate::domain::{Bar, EnrichedBar};

pub const MA_PERIOD: usize = 20;
pub const BAND_MULTIPLIER: f64 = 2.0;
pub const ATR_PERIOD: usize = 14;
pub const RSI_PERIOD: usize = 14;

/// The fixed set of indicators stored alongside every bar.
#[derive(Debug, Clone)]
pub struct IndicatorSet {
    sma: Sma,
    ema: Ema,
    volatility: Volatility,
    bb_upper: Bollinger,
    bb_lower: Bollinger,
    atr: Atr,
    rsi: Rsi,
}

impl IndicatorSet {
    /// SMA/EMA/volatility/bands over 20 days, ATR and RSI over 14.
    pub fn standard() -> Self {
        Self {
            sma: Sma::new(MA_PERIOD),
            ema: Ema::new(MA_PERIOD),
            volatility: Volatility::new(MA_PERIOD),
            bb_upper: Bollinger::upper(MA_PERIOD, BAND_MULTIPLIER),
            bb_lower: Bollinger::lower(MA_PERIOD, BAND_MULTIPLIER),
            atr: Atr::new(ATR_PERIOD),
            rsi: Rsi::new(RSI_PERIOD),
        }
    }

    /// Longest warmup of any indicator in the set.
    pub fn lookback(&self) -> usize {
        self.indicators()
            .iter()
            .map(|i| i.lookback())
            .max()
            .unwrap_or(0)
    }

    fn indicators(&self) -> [&dyn Indicator; 7] {
        [
            &self.sma,
            &self.ema,
            &self.volatility,
            &self.bb_upper,
            &self.bb_lower,
            &self.atr,
            &self.rsi,
        ]
    }

    /// Compute every indicator and zip the series into enriched bars.
    ///
    /// Empty input yields empty output.
    pub fn enrich(&self, bars: &[Bar]) -> Vec<EnrichedBar> {
        let [sma, ema, volatility, bb_upper, bb_lower, atr, rsi] =
            self.indicators().map(|ind| ind.compute(bars));

        bars.iter()
            .enumerate()
            .map(|(t, bar)| EnrichedBar {
                bar: bar.clone(),
                sma_20: sma[t],
                ema_20: ema[t],
                volatility_20: volatility[t],
                bb_upper: bb_upper[t],
                bb_lower: bb_lower[t],
                atr_14: atr[t],
                rsi: rsi[t],
            })
            .collect()
    }
}

impl Default for IndicatorSet {
    fn default() -> Self {
        Self::standard()
    }
}

/// Enrich a symbol's ordered bar series with the standard indicator set.
pub fn enrich(bars: &[Bar]) -> Vec<EnrichedBar> {
    IndicatorSet::standard().enrich(bars)
}
