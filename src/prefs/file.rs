use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::prefs::{PreferenceStore, error::PrefsError};

const FILE_NAME: &str = "preferences.json";

/// JSON object on disk, rewritten in full on every `set`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonFileStore {
    pub fn file_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "anitui", "anitui")
            .map(|dirs| dirs.config_dir().join(FILE_NAME))
    }

    pub fn open_default() -> Result<Self, PrefsError> {
        let path = Self::file_path().ok_or(PrefsError::NoConfigDir)?;
        Ok(Self::open(path))
    }

    /// Opens the store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match Self::read(&path) {
            Ok(values) => values,
            Err(PrefsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => {
                warn!("Discarding preferences at {}: {e}", path.display());
                Map::new()
            }
        };

        debug!(path = %path.display(), keys = values.len(), "preferences loaded");
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(path: &Path) -> Result<Map<String, Value>, PrefsError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write(&self) -> Result<(), PrefsError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), PrefsError> {
        self.values.insert(key.to_string(), value);
        self.write()
    }
}
