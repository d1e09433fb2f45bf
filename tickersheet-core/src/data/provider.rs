//! Price source trait and structured error types.
//!
//! The PriceSource trait abstracts over where daily bars come from (Yahoo
//! Finance, CSV import) so we can swap implementations and mock for tests.

use crate::domain::Bar;
use chrono::NaiveDate;
use thiserror::Error;

/// Structured error types for data operations.
///
/// These are designed to be displayable in log lines and the CLI summary.
#[derive(Debug, Error)]
pub enum DataError {
    /// Network, HTTP or authentication failure talking to an upstream source.
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("invalid CSS selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("import error: {0}")]
    Import(String),
}

impl From<reqwest::Error> for DataError {
    fn from(e: reqwest::Error) -> Self {
        DataError::SourceUnavailable(e.to_string())
    }
}

/// Trait for daily price sources.
///
/// Implementations return bars for `[start, end]` (inclusive), ascending by
/// date with no duplicate dates. Failures are returned, never retried.
pub trait PriceSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Fetch daily OHLCV bars for a symbol over a date range.
    fn fetch_prices(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Bar>, DataError>;
}
