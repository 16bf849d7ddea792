//! Durable key-value persistence for the expense collection.
//!
//! The whole collection lives under a single fixed key and is rewritten in
//! full on every save; there are no partial writes.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::StoreError;
use crate::expenses::Expense;

/// A synchronous key-value backend.
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError>;
}

/// Stores each key as a file inside `dir`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    fn tmp_path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!(".{key}.tmp"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes a temporary sibling and renames it over the target; the
    /// temporary file never outlives a failed write.
    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let tmp = self.tmp_path_for(key);
        let written =
            write_synced(&tmp, value).and_then(|()| fs::rename(&tmp, self.path_for(key)));
        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                if cleanup.kind() != ErrorKind::NotFound {
                    log::warn!("could not remove {}: {cleanup}", tmp.display());
                }
            }
            return Err(e.into());
        }
        Ok(())
    }
}

fn write_synced(path: &Path, value: &[u8]) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut file_writer = BufWriter::new(file);
    file_writer.write_all(value)?;
    file_writer.flush()?;
    file_writer.get_ref().sync_all()
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    values: HashMap<String, Vec<u8>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

impl<S: Storage + ?Sized> Storage for &mut S {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageFormat {
    #[default]
    Json,
    Msgpack,
}

impl StorageFormat {
    /// The fixed key the collection is stored under.
    pub fn key(self) -> &'static str {
        match self {
            StorageFormat::Json => "expenses.json",
            StorageFormat::Msgpack => "expenses.msgpack",
        }
    }

    fn encode(self, expenses: &[Expense]) -> Result<Vec<u8>, StoreError> {
        match self {
            StorageFormat::Json => serde_json::to_vec(expenses).map_err(StoreError::JsonEncode),
            StorageFormat::Msgpack => Ok(rmp_serde::encode::to_vec_named(expenses)?),
        }
    }

    fn decode(self, bytes: &[u8]) -> Result<Vec<Expense>, String> {
        match self {
            StorageFormat::Json => serde_json::from_slice(bytes).map_err(|e| e.to_string()),
            StorageFormat::Msgpack => rmp_serde::decode::from_slice(bytes).map_err(|e| e.to_string()),
        }
    }
}

/// Loads and saves the full expense collection through a [`Storage`].
#[derive(Debug)]
pub struct ExpenseStore<S> {
    storage: S,
    format: StorageFormat,
}

impl<S: Storage> ExpenseStore<S> {
    pub fn new(storage: S, format: StorageFormat) -> Self {
        Self { storage, format }
    }

    pub fn key(&self) -> &'static str {
        self.format.key()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Returns an empty collection when nothing has been stored yet.
    pub fn load(&self) -> Result<Vec<Expense>, StoreError> {
        let key = self.key();
        let Some(bytes) = self.storage.get(key)? else {
            log::info!("no stored value under '{key}', starting with an empty book");
            return Ok(Vec::new());
        };
        let expenses = self.format.decode(&bytes).map_err(|reason| StoreError::Corrupt {
            key: key.to_string(),
            reason,
        })?;
        log::debug!("loaded {} expenses from '{key}'", expenses.len());
        Ok(expenses)
    }

    pub fn save(&mut self, expenses: &[Expense]) -> Result<(), StoreError> {
        let key = self.key();
        let bytes = self.format.encode(expenses)?;
        self.storage.set(key, &bytes)?;
        log::debug!("saved {} expenses to '{key}'", expenses.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, NaiveDate};
    use rust_decimal::Decimal;

    use super::*;
    use crate::expenses::Category;

    fn sample() -> Vec<Expense> {
        let created = DateTime::from_timestamp_millis(1_714_608_000_000).unwrap();
        vec![
            Expense::new(
                "2".into(),
                NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
                Decimal::new(5005, 1),
                Category::Living,
                "bus".into(),
                created,
            ),
            Expense::new(
                "1".into(),
                NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                Decimal::from(1000),
                Category::Food,
                String::new(),
                created,
            ),
        ]
    }

    #[test]
    fn load_of_empty_storage_is_empty() {
        let store = ExpenseStore::new(MemoryStorage::new(), StorageFormat::Json);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_keeps_order_in_both_formats() {
        for format in [StorageFormat::Json, StorageFormat::Msgpack] {
            let mut store = ExpenseStore::new(MemoryStorage::new(), format);
            store.save(&sample()).unwrap();
            assert_eq!(store.load().unwrap(), sample());
        }
    }

    #[test]
    fn json_value_is_an_array() {
        let mut store = ExpenseStore::new(MemoryStorage::new(), StorageFormat::Json);
        store.save(&sample()).unwrap();
        let raw = store.storage().get("expenses.json").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn failed_file_write_leaves_no_temporary_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());
        // a non-empty directory in the way makes the final rename fail
        let blocked = storage.path_for("expenses.json");
        fs::create_dir_all(blocked.join("occupied")).unwrap();

        assert!(matches!(
            storage.set("expenses.json", b"[]"),
            Err(StoreError::Io(_))
        ));
        assert!(!storage.tmp_path_for("expenses.json").exists());
        assert!(blocked.is_dir());
    }

    #[test]
    fn file_storage_overwrites_and_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("nested"));
        assert_eq!(storage.get("k").unwrap(), None);
        storage.set("k", b"one").unwrap();
        storage.set("k", b"two").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some(&b"two"[..]));
        assert_eq!(storage.dir(), dir.path().join("nested"));
        assert!(!storage.tmp_path_for("k").exists());
    }

    #[test]
    fn corrupt_value_is_reported() {
        let mut storage = MemoryStorage::new();
        storage.set("expenses.json", b"{not json").unwrap();
        let store = ExpenseStore::new(storage, StorageFormat::Json);
        match store.load() {
            Err(StoreError::Corrupt { key, .. }) => assert_eq!(key, "expenses.json"),
            other => panic!("expected corrupt error, got {other:?}"),
        }
    }
}
