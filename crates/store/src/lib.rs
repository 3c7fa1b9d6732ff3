//! Wholesale persistence for the expense snapshot.
//!
//! The store holds exactly one value: the full list of expense records,
//! replaced as a whole after every insert or delete. There is no schema
//! versioning and no partial update; a missing document loads as the empty
//! list. The store does not serialize writers; the hosting server does.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Mutex,
};

use engine::ExpenseRecord;
use thiserror::Error;

/// Fixed identifier the snapshot is stored under.
pub const STORE_KEY: &str = "budgeteer-expenses";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupted store: {0}")]
    Corrupted(String),
}

/// Snapshot persistence contract: load the full record list, or replace it.
pub trait ExpenseStore: Send + Sync {
    fn load(&self) -> Result<Vec<ExpenseRecord>, StoreError>;
    fn save(&self, records: &[ExpenseRecord]) -> Result<(), StoreError>;
}

/// JSON-document store: one array of records in a single file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under `<dir>/budgeteer-expenses.json`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(format!("{STORE_KEY}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ExpenseStore for JsonFileStore {
    /// Loads the full snapshot.
    ///
    /// A missing file is an empty snapshot. A record that fails to parse is
    /// skipped with a warning rather than failing the load; only an
    /// unreadable document (not a JSON array) is an error. Duplicate ids
    /// violate the snapshot invariant, so later duplicates are dropped.
    fn load(&self) -> Result<Vec<ExpenseRecord>, StoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let entries: Vec<serde_json::Value> = serde_json::from_str(&raw)
            .map_err(|err| StoreError::Corrupted(err.to_string()))?;

        let mut records: Vec<ExpenseRecord> = Vec::with_capacity(entries.len());
        for entry in entries {
            match serde_json::from_value::<ExpenseRecord>(entry) {
                Ok(record) => {
                    if records.iter().any(|existing| existing.id == record.id) {
                        tracing::warn!(id = %record.id, "dropping expense record with duplicate id");
                        continue;
                    }
                    records.push(record);
                }
                Err(err) => {
                    tracing::warn!("skipping malformed expense record: {err}");
                }
            }
        }
        Ok(records)
    }

    fn save(&self, records: &[ExpenseRecord]) -> Result<(), StoreError> {
        let body = serde_json::to_string_pretty(records)
            .map_err(|err| StoreError::Corrupted(err.to_string()))?;
        std::fs::write(&self.path, body)?;
        Ok(())
    }
}

/// In-memory store for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<ExpenseRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ExpenseStore for MemoryStore {
    fn load(&self) -> Result<Vec<ExpenseRecord>, StoreError> {
        Ok(self
            .records
            .lock()
            .map_err(|_| StoreError::Corrupted("store mutex poisoned".to_string()))?
            .clone())
    }

    fn save(&self, records: &[ExpenseRecord]) -> Result<(), StoreError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| StoreError::Corrupted("store mutex poisoned".to_string()))?;
        *guard = records.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use engine::{Category, ExpenseDraft, MoneyCents};

    use super::*;

    fn sample() -> ExpenseRecord {
        ExpenseRecord::create(
            ExpenseDraft {
                amount: MoneyCents::new(4200),
                description: "bus pass".to_string(),
                category: Category::Transportation,
                date: NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
            },
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn missing_file_loads_as_empty_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::in_dir(dir.path());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::in_dir(dir.path());

        let records = vec![sample(), sample()];
        store.save(&records).unwrap();
        assert_eq!(store.load().unwrap(), records);
    }

    #[test]
    fn malformed_entries_are_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::in_dir(dir.path());

        let good = serde_json::to_value(sample()).unwrap();
        let body = serde_json::json!([good, {"amount_minor": "not a number"}, 42]);
        std::fs::write(store.path(), body.to_string()).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::in_dir(dir.path());

        let record = sample();
        let mut twin = record.clone();
        twin.description = "copy".to_string();
        let body = serde_json::to_string(&vec![record.clone(), twin]).unwrap();
        std::fs::write(store.path(), body).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].description, record.description);
    }

    #[test]
    fn non_array_document_is_corrupted() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::in_dir(dir.path());
        std::fs::write(store.path(), "{\"oops\": true}").unwrap();
        assert!(matches!(store.load(), Err(StoreError::Corrupted(_))));
    }

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_empty());
        let records = vec![sample()];
        store.save(&records).unwrap();
        assert_eq!(store.load().unwrap(), records);
    }
}
