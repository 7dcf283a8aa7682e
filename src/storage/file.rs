use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{AppError, AppResult};

use super::{DurableStorage, StorageKey};

type Entries = BTreeMap<String, String>;

/// Storage backed by a single JSON object on disk
///
/// Every write rewrites the whole file through a temporary sibling followed by
/// a rename, so a crash mid-write leaves the previous contents intact. Writers
/// within the process are serialized by an internal lock.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> AppResult<Entries> {
        if !self.path.exists() {
            return Ok(Entries::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Entries::new());
        }

        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, entries: &Entries) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(entries)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(json.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn temp_path(&self) -> AppResult<PathBuf> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| AppError::Storage(format!("Invalid storage path: {:?}", self.path)))?;

        let mut tmp_name = file_name.to_os_string();
        tmp_name.push(".tmp");
        Ok(self.path.with_file_name(tmp_name))
    }

    fn update<F>(&self, f: F) -> AppResult<()>
    where
        F: FnOnce(&mut Entries),
    {
        let _guard = self
            .lock
            .lock()
            .map_err(|e| AppError::Storage(format!("Storage lock poisoned: {}", e)))?;

        let mut entries = self.load()?;
        f(&mut entries);
        self.save(&entries)
    }
}

impl DurableStorage for FileStorage {
    fn get(&self, key: StorageKey) -> AppResult<Option<String>> {
        let _guard = self
            .lock
            .lock()
            .map_err(|e| AppError::Storage(format!("Storage lock poisoned: {}", e)))?;

        Ok(self.load()?.remove(&key.to_string()))
    }

    fn set(&self, key: StorageKey, value: &str) -> AppResult<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: StorageKey) -> AppResult<()> {
        self.update(|entries| {
            entries.remove(&key.to_string());
        })
    }
}
