//! Converting enriched bars and sentiment scores to and from sheet cells.
//!
//! A missing value is the empty cell, never `"0"`. Floats use the shortest
//! representation that parses back to the same `f64`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use thiserror::Error;

use tickersheet_core::domain::{EnrichedBar, INDICATOR_COLUMNS};

use crate::store::Table;

pub const DATE_COLUMN: &str = "Date";
pub const SENTIMENT_COLUMN: &str = "Sentiment Score";
pub const MISSING_CELL: &str = "";

const BAR_COLUMNS: [&str; 7] = ["Date", "Symbol", "Open", "High", "Low", "Close", "Volume"];

#[derive(Debug, Error, PartialEq)]
pub enum RowError {
    #[error("sheet has no '{0}' column")]
    MissingColumn(String),
    #[error("row {row}: cannot parse date '{value}'")]
    InvalidDate { row: usize, value: String },
}

/// Header of a price sheet: bar columns then indicator columns.
pub fn price_header() -> Vec<String> {
    BAR_COLUMNS
        .iter()
        .chain(INDICATOR_COLUMNS.iter())
        .map(|c| c.to_string())
        .collect()
}

pub fn format_f64(value: f64) -> String {
    if value.is_finite() {
        format!("{value}")
    } else {
        MISSING_CELL.to_string()
    }
}

pub fn format_opt(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING_CELL.to_string(), format_f64)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn price_row(row: &EnrichedBar) -> Vec<String> {
    let bar = &row.bar;
    let mut cells = vec![
        format_date(bar.date),
        bar.symbol.clone(),
        format_f64(bar.open),
        format_f64(bar.high),
        format_f64(bar.low),
        format_f64(bar.close),
        bar.volume.to_string(),
    ];
    cells.extend(row.indicator_values().into_iter().map(format_opt));
    cells
}

pub fn price_table(rows: &[EnrichedBar]) -> Table {
    Table {
        header: price_header(),
        rows: rows.iter().map(price_row).collect(),
    }
}

/// Parse a date cell to its UTC calendar date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339, and `YYYY-MM-DD HH:MM:SS` with an optional
/// `±HH:MM` offset. Timestamps without an offset are taken as UTC.
pub fn parse_sheet_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc().date());
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%:z") {
        return Some(dt.naive_utc().date());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// Parse every row's `Date` cell.
pub fn date_column(table: &Table) -> Result<Vec<NaiveDate>, RowError> {
    let idx = table
        .column_index(DATE_COLUMN)
        .ok_or_else(|| RowError::MissingColumn(DATE_COLUMN.to_string()))?;
    table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let cell = row.get(idx).map(String::as_str).unwrap_or(MISSING_CELL);
            parse_sheet_date(cell).ok_or_else(|| RowError::InvalidDate {
                row: i + 1,
                value: cell.to_string(),
            })
        })
        .collect()
}

/// Set column `name` to `values`, replacing it in place if present,
/// otherwise appending it. Rows are padded to the header width first.
pub fn set_column(table: &mut Table, name: &str, values: &[String]) {
    let idx = match table.column_index(name) {
        Some(idx) => idx,
        None => {
            table.header.push(name.to_string());
            table.header.len() - 1
        }
    };
    let width = table.header.len();
    for (i, row) in table.rows.iter_mut().enumerate() {
        if row.len() < width {
            row.resize(width, MISSING_CELL.to_string());
        }
        row[idx] = values
            .get(i)
            .cloned()
            .unwrap_or_else(|| MISSING_CELL.to_string());
    }
}
