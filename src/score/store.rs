//! Integer key-value preference stores.

use crate::core::constants::PREFS_FILE_NAME;
use crate::error::StoreError;
use crate::utils::persistence::{data_path, load_json_or_default, save_json_durable};
use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::{Path, PathBuf};

/// Persistent integer preferences. Absent keys read as zero.
pub trait KeyValueStore {
    fn get_int(&self, key: &str) -> i64;
    fn set_int(&mut self, key: &str, value: i64);
    /// Make every `set_int` so far durable.
    fn flush(&mut self) -> Result<(), StoreError>;
}

/// In-memory store. Counts writes and flushes so callers can be checked.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, i64>,
    pub writes: usize,
    pub flushes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: i64) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value);
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get_int(&self, key: &str) -> i64 {
        self.values.get(key).copied().unwrap_or(0)
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), value);
        self.writes += 1;
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        self.flushes += 1;
        Ok(())
    }
}

/// Store backed by a JSON object on disk (`{"highscore": 12}`).
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, i64>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing or corrupt file starts empty.
    pub fn open(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            values: load_json_or_default(path),
        }
    }

    /// Open `~/.flappy/prefs.json`.
    pub fn open_default() -> io::Result<Self> {
        Ok(Self::open(&data_path(PREFS_FILE_NAME)?))
    }

}

impl KeyValueStore for JsonFileStore {
    fn get_int(&self, key: &str) -> i64 {
        self.values.get(key).copied().unwrap_or(0)
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), value);
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        save_json_durable(&self.path, &self.values)
    }
}
