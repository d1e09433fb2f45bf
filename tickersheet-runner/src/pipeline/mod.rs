//! Batch pipelines: prices → indicators → sheets, and sheets → news → sentiment.
//!
//! Both runs are sequential. The spreadsheet is opened once up front; a
//! failure there aborts before any write. Every later failure is confined to
//! the symbol (sheet) it happened on and recorded in the [`RunSummary`].

pub mod prices;
pub mod progress;
pub mod sentiment;

pub use prices::run_price_pipeline;
pub use progress::{LogProgress, PipelineProgress, SilentProgress};
pub use sentiment::run_sentiment_pipeline;

use chrono::NaiveDate;
use thiserror::Error;

use tickersheet_core::data::DataError;

use crate::rows::RowError;
use crate::store::StoreError;

/// Parameters of a price run.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRun {
    pub spreadsheet: String,
    pub symbols: Vec<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Parameters of a sentiment run.
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentRun {
    /// Spreadsheet whose sheets are read.
    pub spreadsheet: String,
    /// Where scored tables go; `None` rewrites the input sheets in place.
    pub output_spreadsheet: Option<String>,
    /// Sheets to score; every sheet when `None`.
    pub sheets: Option<Vec<String>>,
}

/// Errors that abort a whole run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors confined to one symbol.
#[derive(Debug, Error)]
pub enum SymbolError {
    #[error("fetch failed: {0}")]
    Data(#[from] DataError),
    #[error("store failed: {0}")]
    Store(#[from] StoreError),
    #[error("bad sheet: {0}")]
    Rows(#[from] RowError),
    #[error("no bars between {start} and {end}")]
    NoData { start: NaiveDate, end: NaiveDate },
}

/// What was written for one sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetReport {
    pub sheet: String,
    pub rows: usize,
    /// BLAKE3 digest of the written table.
    pub digest: String,
}

/// Outcome of a run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// `(symbol, error message)` for each failed symbol, in run order.
    pub errors: Vec<(String, String)>,
    pub reports: Vec<SheetReport>,
}

impl RunSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }

    fn record(&mut self, symbol: &str, result: Result<SheetReport, SymbolError>) {
        match result {
            Ok(report) => {
                self.succeeded += 1;
                self.reports.push(report);
            }
            Err(e) => {
                self.failed += 1;
                self.errors.push((symbol.to_string(), e.to_string()));
            }
        }
    }
}

/// Drive `work` over `items` with progress reporting and per-item isolation.
fn run_each<F>(items: &[String], progress: &dyn PipelineProgress, mut work: F) -> RunSummary
where
    F: FnMut(&str) -> Result<SheetReport, SymbolError>,
{
    let total = items.len();
    let mut summary = RunSummary {
        total,
        ..RunSummary::default()
    };

    for (i, item) in items.iter().enumerate() {
        progress.on_start(item, i, total);
        let result = work(item);
        progress.on_complete(item, i, total, &result);
        summary.record(item, result);
    }

    progress.on_batch_complete(summary.succeeded, summary.failed, total);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(sheet: &str) -> SheetReport {
        SheetReport {
            sheet: sheet.into(),
            rows: 1,
            digest: "d".into(),
        }
    }

    #[test]
    fn run_each_isolates_failures() {
        let items: Vec<String> = ["A", "B", "C"].iter().map(|s| s.to_string()).collect();
        let mut seen = Vec::new();
        let summary = run_each(&items, &SilentProgress, |s| {
            seen.push(s.to_string());
            if s == "B" {
                Err(SymbolError::Data(DataError::SourceUnavailable("down".into())))
            } else {
                Ok(report(s))
            }
        });
        assert_eq!(seen, vec!["A", "B", "C"]);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert!(!summary.all_succeeded());
        assert_eq!(summary.errors[0].0, "B");
        assert!(summary.errors[0].1.contains("down"));
        assert_eq!(summary.reports.len(), 2);
    }

    #[test]
    fn empty_run_succeeds() {
        let summary = run_each(&[], &SilentProgress, |s| Ok(report(s)));
        assert_eq!(summary.total, 0);
        assert!(summary.all_succeeded());
    }
}
