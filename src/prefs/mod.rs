pub mod error;
pub mod file;
pub mod memory;

use serde_json::Value;
use tracing::warn;

pub use error::PrefsError;
pub use file::JsonFileStore;
pub use memory::MemoryStore;

pub const SHOW_DURATION_KEY: &str = "show_duration";
pub const INTRO_SKIP_KEY: &str = "intro_skip_time";

pub const DEFAULT_INTRO_SKIP_SECS: f64 = 85.0;

pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&mut self, key: &str, value: Value) -> Result<(), PrefsError>;
}

/// Typed view over a [`PreferenceStore`].
///
/// Missing or malformed values fall back to defaults, and failed writes are
/// logged rather than returned.
pub struct Preferences {
    store: Box<dyn PreferenceStore>,
    default_intro_skip: f64,
}

impl Preferences {
    pub fn new(store: Box<dyn PreferenceStore>) -> Self {
        Self {
            store,
            default_intro_skip: DEFAULT_INTRO_SKIP_SECS,
        }
    }

    pub fn with_default_intro_skip(mut self, seconds: f64) -> Self {
        if seconds.is_finite() && seconds >= 0.0 {
            self.default_intro_skip = seconds;
        }
        self
    }

    /// `true` shows the total duration, `false` the remaining time.
    pub fn show_duration(&self) -> bool {
        self.store
            .get(SHOW_DURATION_KEY)
            .and_then(|value| value.as_bool())
            .unwrap_or(false)
    }

    pub fn set_show_duration(&mut self, show: bool) {
        if let Err(e) = self.store.set(SHOW_DURATION_KEY, Value::Bool(show)) {
            warn!("Failed to persist {SHOW_DURATION_KEY}: {e}");
        }
    }

    pub fn intro_skip_time(&self) -> f64 {
        self.store
            .get(INTRO_SKIP_KEY)
            .and_then(|value| value.as_f64())
            .filter(|seconds| seconds.is_finite() && *seconds >= 0.0)
            .unwrap_or(self.default_intro_skip)
    }

    #[cfg(test)]
    pub fn into_store(self) -> Box<dyn PreferenceStore> {
        self.store
    }
}
