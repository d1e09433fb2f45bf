//! CSV price import: one `<SYMBOL>.csv` per symbol in a directory.
//!
//! Expected header: `Date,Open,High,Low,Close,Volume` with ISO dates.

use super::canonicalize::canonicalize;
use super::provider::{DataError, PriceSource};
use crate::domain::Bar;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Open")]
    open: f64,
    #[serde(rename = "High")]
    high: f64,
    #[serde(rename = "Low")]
    low: f64,
    #[serde(rename = "Close")]
    close: f64,
    #[serde(rename = "Volume")]
    volume: u64,
}

/// Reads daily bars from local CSV files.
#[derive(Debug, Clone)]
pub struct CsvPriceSource {
    dir: PathBuf,
}

impl CsvPriceSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{symbol}.csv"))
    }
}

fn read_bars(path: &Path, symbol: &str) -> Result<Vec<Bar>, DataError> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| DataError::Import(format!("{}: {e}", path.display())))?;

    reader
        .deserialize::<CsvRow>()
        .map(|row| {
            let row = row.map_err(|e| DataError::Import(format!("{}: {e}", path.display())))?;
            Ok(Bar {
                symbol: symbol.to_string(),
                date: row.date,
                open: row.open,
                high: row.high,
                low: row.low,
                close: row.close,
                volume: row.volume,
            })
        })
        .collect()
}

impl PriceSource for CsvPriceSource {
    fn name(&self) -> &str {
        "csv_import"
    }

    fn fetch_prices(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Bar>, DataError> {
        let path = self.path_for(symbol);
        if !path.exists() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        let bars = read_bars(&path, symbol)?
            .into_iter()
            .filter(|b| b.date >= start && b.date <= end)
            .collect();
        Ok(canonicalize(bars))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn reads_and_filters_by_range() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("MSFT.csv"),
            "Date,Open,High,Low,Close,Volume\n\
             2024-01-04,10,11,9,10.5,100\n\
             2024-01-02,10,11,9,10,100\n\
             2024-01-03,10,12,9,11,200\n\
             2024-01-05,10,11,9,10,100\n",
        )
        .unwrap();

        let src = CsvPriceSource::new(dir.path());
        let bars = src
            .fetch_prices("MSFT", d("2024-01-02"), d("2024-01-04"))
            .unwrap();
        let dates: Vec<NaiveDate> = bars.iter().map(|b| b.date).collect();
        assert_eq!(dates, vec![d("2024-01-02"), d("2024-01-03"), d("2024-01-04")]);
        assert_eq!(bars[1].volume, 200);
        assert_eq!(bars[0].symbol, "MSFT");
    }

    #[test]
    fn missing_file_is_symbol_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let src = CsvPriceSource::new(dir.path());
        let err = src
            .fetch_prices("NOPE", d("2024-01-01"), d("2024-12-31"))
            .unwrap_err();
        assert!(matches!(err, DataError::SymbolNotFound { .. }));
    }

    #[test]
    fn malformed_row_is_import_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("BAD.csv"),
            "Date,Open,High,Low,Close,Volume\nnot-a-date,1,1,1,1,1\n",
        )
        .unwrap();
        let err = CsvPriceSource::new(dir.path())
            .fetch_prices("BAD", d("2024-01-01"), d("2024-12-31"))
            .unwrap_err();
        assert!(matches!(err, DataError::Import(_)));
    }
}
