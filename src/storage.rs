use crate::errors::StorageError;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// One JSON object per profile, rewritten via temp file and rename.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load_entries(&path);
        debug!(path = %path.display(), keys = entries.len(), "opened file store");
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let payload = serde_json::to_vec_pretty(&self.entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, payload)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }
}

fn load_entries(path: &Path) -> BTreeMap<String, String> {
    match fs::read(path) {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(entries) => entries,
            Err(err) => {
                error!("failed to parse data file: {err}");
                BTreeMap::new()
            }
        },
        Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
        Err(err) => {
            error!("failed to read data file: {err}");
            BTreeMap::new()
        }
    }
}
