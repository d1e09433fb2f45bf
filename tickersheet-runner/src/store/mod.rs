//! Sheet stores: named spreadsheets holding titled 2-D tables of strings.
//!
//! `write_table` always fully replaces a sheet (creating it when absent), so
//! a re-run with the same inputs leaves identical content behind.

pub mod csv_workbook;
pub mod google;
pub mod google_auth;
pub mod memory;

pub use csv_workbook::CsvWorkbookStore;
pub use google::GoogleSheetsStore;
pub use google_auth::{Credentials, ServiceAccount};
pub use memory::MemoryStore;

use thiserror::Error;

use crate::config::StoreConfig;

/// Errors from a sheet store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The spreadsheet does not exist or is not visible to the credentials.
    #[error("spreadsheet not found: {name}")]
    SpreadsheetNotFound { name: String },

    #[error("failed to write sheet '{sheet}': {reason}")]
    SheetWriteFailure { sheet: String, reason: String },

    #[error("failed to read sheet '{sheet}': {reason}")]
    SheetReadFailure { sheet: String, reason: String },

    #[error("authorization failed: {0}")]
    Auth(String),
}

/// An opened spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetHandle {
    pub name: String,
    /// Backend-specific identifier (directory path, file id, ...).
    pub id: String,
}

/// A header row plus data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(header: Vec<String>) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    /// Build a table from raw sheet values whose first row is the header.
    pub fn from_values(mut values: Vec<Vec<String>>) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let rows = values.split_off(1);
        let header = values.into_iter().next().unwrap_or_default();
        Self { header, rows }
    }

    /// Header followed by rows, each padded to the header width.
    pub fn to_values(&self) -> Vec<Vec<String>> {
        let width = self.width();
        std::iter::once(self.header.clone())
            .chain(self.rows.iter().map(|row| {
                let mut row = row.clone();
                if row.len() < width {
                    row.resize(width, String::new());
                }
                row
            }))
            .collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// Width of the widest row, header included.
    pub fn width(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.header.len()))
            .max()
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Content hash over every cell (BLAKE3, hex).
    ///
    /// Cells are length-prefixed so `["ab"]` and `["a", "b"]` differ.
    pub fn digest(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for row in std::iter::once(&self.header).chain(self.rows.iter()) {
            hasher.update(&(row.len() as u64).to_le_bytes());
            for cell in row {
                hasher.update(&(cell.len() as u64).to_le_bytes());
                hasher.update(cell.as_bytes());
            }
        }
        hasher.finalize().to_hex().to_string()
    }
}

/// Persistence for tables grouped into spreadsheets.
pub trait SheetStore: Send + Sync {
    fn name(&self) -> &str;

    /// Open a spreadsheet by name. Missing is `SpreadsheetNotFound`.
    fn open_spreadsheet(&self, name: &str) -> Result<SpreadsheetHandle, StoreError>;

    /// Sheet titles in the spreadsheet, in backend order.
    fn list_sheets(&self, handle: &SpreadsheetHandle) -> Result<Vec<String>, StoreError>;

    fn read_table(&self, handle: &SpreadsheetHandle, title: &str) -> Result<Table, StoreError>;

    /// Create the sheet if absent, otherwise clear it, then write `table`.
    fn write_table(
        &self,
        handle: &SpreadsheetHandle,
        title: &str,
        table: &Table,
    ) -> Result<(), StoreError>;
}

/// Build the store selected by configuration.
pub fn build_store(config: &StoreConfig) -> Result<Box<dyn SheetStore>, StoreError> {
    let store: Box<dyn SheetStore> = match config {
        StoreConfig::Csv { root, create } => Box::new(CsvWorkbookStore::new(root, *create)),
        StoreConfig::Google {
            access_token,
            service_account_file,
        } => Box::new(GoogleSheetsStore::from_config(
            access_token.clone(),
            service_account_file.as_deref(),
        )?),
        StoreConfig::Memory => Box::new(MemoryStore::auto_create()),
    };
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn from_values_splits_header() {
        let t = Table::from_values(vec![s(&["Date", "Close"]), s(&["2024-01-02", "10"])]);
        assert_eq!(t.header, s(&["Date", "Close"]));
        assert_eq!(t.rows, vec![s(&["2024-01-02", "10"])]);
        assert_eq!(t.column_index("Close"), Some(1));
        assert_eq!(t.column_index("Open"), None);
    }

    #[test]
    fn from_empty_values() {
        let t = Table::from_values(Vec::new());
        assert!(t.header.is_empty());
        assert!(t.is_empty());
    }

    #[test]
    fn to_values_pads_short_rows() {
        let mut t = Table::new(s(&["a", "b", "c"]));
        t.rows.push(s(&["1"]));
        assert_eq!(t.to_values()[1], s(&["1", "", ""]));
    }

    #[test]
    fn digest_is_content_sensitive() {
        let mut a = Table::new(s(&["x"]));
        a.rows.push(s(&["ab"]));
        let mut b = Table::new(s(&["x"]));
        b.rows.push(s(&["a", "b"]));
        assert_ne!(a.digest(), b.digest());
        assert_eq!(a.digest(), a.clone().digest());
    }

    #[test]
    fn digest_distinguishes_empty_from_zero() {
        let mut a = Table::new(s(&["RSI"]));
        a.rows.push(s(&[""]));
        let mut b = Table::new(s(&["RSI"]));
        b.rows.push(s(&["0"]));
        assert_ne!(a.digest(), b.digest());
    }
}
