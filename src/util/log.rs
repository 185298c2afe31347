use std::{fs::File, path::PathBuf};

use color_eyre::eyre::{Result, eyre};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_ENV: &str = "ANITUI_LOG";
const LOG_FILE: &str = "anitui.log";

pub fn data_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "anitui", "anitui")
        .map(|dirs| dirs.data_local_dir().to_path_buf())
}

/// `ANITUI_LOG`, then `RUST_LOG`, then `info`.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Logs go to a file; the terminal belongs to the player.
pub fn initialize_logging() -> Result<()> {
    let directory = data_dir().ok_or_else(|| eyre!("no data directory for logs"))?;
    std::fs::create_dir_all(&directory)?;
    let log_file = File::create(directory.join(LOG_FILE))?;

    let file_layer = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(env_filter());

    tracing_subscriber::registry()
        .with(file_layer)
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(())
}
