//! tickersheet runner: configuration, sheet stores, and the batch pipelines.
//!
//! This crate builds on `tickersheet-core` to provide:
//! - TOML configuration with CLI overrides
//! - Sheet stores (CSV workbook directory, Google Sheets, in-memory)
//! - Row serialization for price and sentiment sheets
//! - The price pipeline (fetch → indicators → sheet) and the sentiment
//!   pipeline (sheet → news → scores → sheet), with per-symbol isolation

pub mod config;
pub mod pipeline;
pub mod rows;
pub mod store;

pub use config::{ConfigError, PipelineConfig, PriceSourceKind, StoreConfig};
pub use pipeline::{
    run_price_pipeline, run_sentiment_pipeline, LogProgress, PipelineError, PipelineProgress,
    PriceRun, RunSummary, SentimentRun, SheetReport, SilentProgress, SymbolError,
};
pub use rows::{RowError, SENTIMENT_COLUMN};
pub use store::{
    build_store, Credentials, CsvWorkbookStore, GoogleSheetsStore, MemoryStore, SheetStore,
    SpreadsheetHandle, StoreError, Table,
};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn stores_are_send_sync() {
        assert_send::<CsvWorkbookStore>();
        assert_sync::<CsvWorkbookStore>();
        assert_send::<GoogleSheetsStore>();
        assert_sync::<GoogleSheetsStore>();
        assert_send::<Credentials>();
        assert_sync::<Credentials>();
        assert_send::<MemoryStore>();
        assert_sync::<MemoryStore>();
    }

    #[test]
    fn summaries_are_send_sync() {
        assert_send::<RunSummary>();
        assert_sync::<RunSummary>();
        assert_send::<PipelineConfig>();
        assert_sync::<PipelineConfig>();
    }
}
