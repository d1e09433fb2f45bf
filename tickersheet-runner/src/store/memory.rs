//! In-process sheet store for tests and dry runs.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{SheetStore, SpreadsheetHandle, StoreError, Table};

#[derive(Debug, Default)]
struct State {
    /// spreadsheet name → sheet title → table, sheets in insertion order.
    books: BTreeMap<String, Vec<(String, Table)>>,
    failing_writes: HashSet<String>,
    writes: usize,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    create_missing: bool,
}

impl MemoryStore {
    /// Opening an unknown spreadsheet fails with `SpreadsheetNotFound`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opening an unknown spreadsheet creates it.
    pub fn auto_create() -> Self {
        Self {
            create_missing: true,
            ..Self::default()
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn with_spreadsheet(self, name: &str) -> Self {
        self.lock().books.entry(name.to_string()).or_default();
        self
    }

    /// Seed a sheet directly, bypassing the write counter.
    pub fn insert_table(&self, spreadsheet: &str, title: &str, table: Table) {
        let mut state = self.lock();
        upsert(state.books.entry(spreadsheet.to_string()).or_default(), title, table);
    }

    pub fn table(&self, spreadsheet: &str, title: &str) -> Option<Table> {
        self.lock()
            .books
            .get(spreadsheet)?
            .iter()
            .find(|(t, _)| t == title)
            .map(|(_, table)| table.clone())
    }

    /// Make every later write to `title` fail.
    pub fn fail_writes_to(&self, title: &str) {
        self.lock().failing_writes.insert(title.to_string());
    }

    /// Number of successful `write_table` calls.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }
}

fn upsert(sheets: &mut Vec<(String, Table)>, title: &str, table: Table) {
    match sheets.iter_mut().find(|(t, _)| t == title) {
        Some((_, existing)) => *existing = table,
        None => sheets.push((title.to_string(), table)),
    }
}

impl SheetStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn open_spreadsheet(&self, name: &str) -> Result<SpreadsheetHandle, StoreError> {
        let mut state = self.lock();
        if !state.books.contains_key(name) {
            if !self.create_missing {
                return Err(StoreError::SpreadsheetNotFound { name: name.into() });
            }
            state.books.insert(name.to_string(), Vec::new());
        }
        Ok(SpreadsheetHandle {
            name: name.to_string(),
            id: name.to_string(),
        })
    }

    fn list_sheets(&self, handle: &SpreadsheetHandle) -> Result<Vec<String>, StoreError> {
        let state = self.lock();
        let sheets = state
            .books
            .get(&handle.id)
            .ok_or_else(|| StoreError::SpreadsheetNotFound {
                name: handle.name.clone(),
            })?;
        Ok(sheets.iter().map(|(t, _)| t.clone()).collect())
    }

    fn read_table(&self, handle: &SpreadsheetHandle, title: &str) -> Result<Table, StoreError> {
        self.table(&handle.id, title)
            .ok_or_else(|| StoreError::SheetReadFailure {
                sheet: title.to_string(),
                reason: format!("no such sheet in '{}'", handle.name),
            })
    }

    fn write_table(
        &self,
        handle: &SpreadsheetHandle,
        title: &str,
        table: &Table,
    ) -> Result<(), StoreError> {
        let mut state = self.lock();
        if state.failing_writes.contains(title) {
            return Err(StoreError::SheetWriteFailure {
                sheet: title.to_string(),
                reason: "injected failure".into(),
            });
        }
        let sheets = state
            .books
            .get_mut(&handle.id)
            .ok_or_else(|| StoreError::SpreadsheetNotFound {
                name: handle.name.clone(),
            })?;
        upsert(sheets, title, table.clone());
        state.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_store_rejects_unknown_spreadsheet() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.open_spreadsheet("x"),
            Err(StoreError::SpreadsheetNotFound { .. })
        ));
        let store = MemoryStore::new().with_spreadsheet("x");
        assert!(store.open_spreadsheet("x").is_ok());
    }

    #[test]
    fn auto_create_opens_anything() {
        let store = MemoryStore::auto_create();
        let h = store.open_spreadsheet("new").unwrap();
        assert!(store.list_sheets(&h).unwrap().is_empty());
    }

    #[test]
    fn write_replaces_and_keeps_order() {
        let store = MemoryStore::auto_create();
        let h = store.open_spreadsheet("b").unwrap();
        store.write_table(&h, "B", &Table::new(vec!["x".into()])).unwrap();
        store.write_table(&h, "A", &Table::new(vec!["y".into()])).unwrap();
        store.write_table(&h, "B", &Table::new(vec!["z".into()])).unwrap();
        assert_eq!(store.list_sheets(&h).unwrap(), vec!["B", "A"]);
        assert_eq!(store.read_table(&h, "B").unwrap().header, vec!["z"]);
        assert_eq!(store.write_count(), 3);
    }

    #[test]
    fn injected_failure() {
        let store = MemoryStore::auto_create();
        let h = store.open_spreadsheet("b").unwrap();
        store.fail_writes_to("BAD");
        let err = store.write_table(&h, "BAD", &Table::default()).unwrap_err();
        assert!(matches!(err, StoreError::SheetWriteFailure { .. }));
        assert_eq!(store.write_count(), 0);
        assert!(store.table("b", "BAD").is_none());
    }
}
