//! tickersheet core: domain types, indicator engine, sentiment scorer, data sources.
//!
//! This crate holds everything that does not touch the spreadsheet:
//! - Domain types (bars, enriched bars, articles)
//! - Indicator engine (SMA, EMA, volatility, Bollinger Bands, ATR, RSI)
//! - Lexicon-based sentiment scorer and daily averaging
//! - Price sources (Yahoo Finance, CSV import) and the HTML news source

pub mod data;
pub mod domain;
pub mod indicators;
pub mod sentiment;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: domain types and services are Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::EnrichedBar>();
        require_sync::<domain::EnrichedBar>();
        require_send::<domain::Article>();
        require_sync::<domain::Article>();

        require_send::<indicators::IndicatorSet>();
        require_sync::<indicators::IndicatorSet>();
        require_send::<sentiment::LexiconScorer>();
        require_sync::<sentiment::LexiconScorer>();

        require_send::<data::YahooPriceSource>();
        require_sync::<data::YahooPriceSource>();
        require_send::<data::CsvPriceSource>();
        require_sync::<data::CsvPriceSource>();
        require_send::<data::HtmlNewsSource>();
        require_sync::<data::HtmlNewsSource>();
    }

    /// Scorers and sources are used as trait objects by the pipelines.
    #[test]
    fn services_are_object_safe() {
        fn _check(
            _scorer: &dyn sentiment::TextScorer,
            _prices: &dyn data::PriceSource,
            _news: &dyn data::NewsSource,
        ) {
        }
    }
}
