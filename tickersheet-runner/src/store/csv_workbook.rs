//! CSV workbook store: a spreadsheet is a directory, a sheet is `<title>.csv`.
//!
//! Writes go to a temp file in the same directory and are renamed over the
//! sheet, so a sheet is either the old table or the new one, never a mix.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{SheetStore, SpreadsheetHandle, StoreError, Table};

#[derive(Debug, Clone)]
pub struct CsvWorkbookStore {
    root: PathBuf,
    create: bool,
}

impl CsvWorkbookStore {
    /// `create` makes `open_spreadsheet` create missing spreadsheet directories.
    pub fn new(root: impl Into<PathBuf>, create: bool) -> Self {
        Self {
            root: root.into(),
            create,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a sheet file inside an opened spreadsheet.
    pub fn sheet_path(&self, handle: &SpreadsheetHandle, title: &str) -> PathBuf {
        PathBuf::from(&handle.id).join(format!("{title}.csv"))
    }
}

/// Names become path components; reject anything that could escape the root.
fn check_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("name is empty".into());
    }
    if name.contains(['/', '\\']) || name.starts_with('.') {
        return Err(format!("'{name}' is not a valid file name"));
    }
    Ok(())
}

fn write_failure(sheet: &str, reason: impl ToString) -> StoreError {
    StoreError::SheetWriteFailure {
        sheet: sheet.to_string(),
        reason: reason.to_string(),
    }
}

fn read_failure(sheet: &str, reason: impl ToString) -> StoreError {
    StoreError::SheetReadFailure {
        sheet: sheet.to_string(),
        reason: reason.to_string(),
    }
}

impl SheetStore for CsvWorkbookStore {
    fn name(&self) -> &str {
        "csv_workbook"
    }

    fn open_spreadsheet(&self, name: &str) -> Result<SpreadsheetHandle, StoreError> {
        check_name(name).map_err(|_| StoreError::SpreadsheetNotFound { name: name.into() })?;
        let dir = self.root.join(name);
        if !dir.is_dir() {
            if !self.create {
                return Err(StoreError::SpreadsheetNotFound { name: name.into() });
            }
            fs::create_dir_all(&dir).map_err(|e| write_failure(name, e))?;
            debug!(dir = %dir.display(), "created spreadsheet directory");
        }
        Ok(SpreadsheetHandle {
            name: name.to_string(),
            id: dir.to_string_lossy().into_owned(),
        })
    }

    fn list_sheets(&self, handle: &SpreadsheetHandle) -> Result<Vec<String>, StoreError> {
        let entries = fs::read_dir(&handle.id).map_err(|e| read_failure(&handle.name, e))?;
        let mut titles = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| read_failure(&handle.name, e))?.path();
            if path.extension().is_some_and(|ext| ext == "csv") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    if !stem.starts_with('.') {
                        titles.push(stem.to_string());
                    }
                }
            }
        }
        titles.sort();
        Ok(titles)
    }

    fn read_table(&self, handle: &SpreadsheetHandle, title: &str) -> Result<Table, StoreError> {
        check_name(title).map_err(|e| read_failure(title, e))?;
        let path = self.sheet_path(handle, title);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&path)
            .map_err(|e| read_failure(title, e))?;

        let values = reader
            .records()
            .map(|record| {
                record
                    .map(|r| r.iter().map(str::to_string).collect::<Vec<_>>())
                    .map_err(|e| read_failure(title, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Table::from_values(values))
    }

    fn write_table(
        &self,
        handle: &SpreadsheetHandle,
        title: &str,
        table: &Table,
    ) -> Result<(), StoreError> {
        check_name(title).map_err(|e| write_failure(title, e))?;
        let path = self.sheet_path(handle, title);
        let tmp = PathBuf::from(&handle.id).join(format!(".{title}.csv.tmp"));

        {
            let mut writer = csv::WriterBuilder::new()
                .flexible(true)
                .from_path(&tmp)
                .map_err(|e| write_failure(title, e))?;
            if !(table.header.is_empty() && table.rows.is_empty()) {
                for row in table.to_values() {
                    writer.write_record(&row).map_err(|e| write_failure(title, e))?;
                }
            }
            writer.flush().map_err(|e| write_failure(title, e))?;
        }

        fs::rename(&tmp, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            write_failure(title, e)
        })?;
        debug!(sheet = %title, rows = table.len(), path = %path.display(), "wrote sheet");
        Ok(())
    }
}
