//! Persistent key-value storage backends
//!
//! The progression store only needs "read a string by key" and "replace
//! the string at a key". Files on disk back the real game; an in-memory
//! map backs tests.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Save error types
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Host key-value storage
pub trait Storage {
    /// Value stored at `key`, or `None` if nothing was ever written there
    fn read(&self, key: &str) -> Result<Option<String>, SaveError>;

    /// Replace the value at `key` wholesale
    fn write(&mut self, key: &str, value: &str) -> Result<(), SaveError>;
}

/// One JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Platform data directory, or `./saves` when none can be determined
    pub fn default_location() -> Self {
        use directories::ProjectDirs;

        if let Some(proj_dirs) = ProjectDirs::from("com", "stoneage", "StoneAgeSurvivors") {
            Self::new(proj_dirs.data_local_dir())
        } else {
            Self::new("./saves")
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, SaveError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SaveError> {
        fs::create_dir_all(&self.dir)?;

        // Write beside the target and rename so a crash never leaves half a record
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;

        log::debug!("Wrote {} bytes to {:?}", value.len(), path);
        Ok(())
    }
}

/// In-process storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with raw data at `key`
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.entries.insert(key.to_string(), value.to_string());
        storage
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, SaveError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SaveError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
