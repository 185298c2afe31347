use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrefsError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Preferences IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Preferences parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
