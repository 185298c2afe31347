use std::collections::HashMap;

use serde_json::Value;

use crate::prefs::{PreferenceStore, error::PrefsError};

/// Store that lives as long as the process. Used when no config directory
/// is available.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), PrefsError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}
