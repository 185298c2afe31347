use std::time::Duration;

use thiserror::Error;

use crate::{media::MediaSource, prefs::DEFAULT_INTRO_SKIP_SECS};

const TITLE_VAR: &str = "ANITUI_TITLE";
const DURATION_VAR: &str = "ANITUI_DURATION";
const TICK_VAR: &str = "ANITUI_TICK_MS";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be a positive number, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct PlayerConfig {
    pub seek_step_secs: f64,
    pub volume_step: f64,
    pub controls_hide_after: Duration,
    pub speed_options: Vec<f64>,
    pub default_intro_skip_secs: f64,
    pub tick_rate: Duration,
    pub download_rate: f64,
    pub episode: MediaSource,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            seek_step_secs: 5.0,
            volume_step: 0.1,
            controls_hide_after: Duration::from_millis(1500),
            speed_options: vec![2.0, 1.5, 1.25, 1.0, 0.75, 0.5],
            default_intro_skip_secs: DEFAULT_INTRO_SKIP_SECS,
            tick_rate: Duration::from_millis(33),
            download_rate: 4.0,
            episode: MediaSource {
                title: "Episode 1".to_string(),
                duration: Duration::from_secs(24 * 60),
            },
        }
    }
}

impl PlayerConfig {
    /// Defaults overridden by `ANITUI_*` variables from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(title) = lookup(TITLE_VAR).filter(|title| !title.trim().is_empty()) {
            config.episode.title = title;
        }
        if let Some(value) = lookup(DURATION_VAR) {
            config.episode.duration = parse_duration(DURATION_VAR, &value, 1.0)?;
        }
        if let Some(value) = lookup(TICK_VAR) {
            config.tick_rate = parse_duration(TICK_VAR, &value, 1000.0)?;
        }

        Ok(config)
    }
}

/// `value` in units of `1 / per_second` seconds, as a non-zero `Duration`.
fn parse_duration(key: &'static str, value: &str, per_second: f64) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite() && *number > 0.0)
        .and_then(|number| Duration::try_from_secs_f64(number / per_second).ok())
        .filter(|duration| !duration.is_zero())
        .ok_or_else(|| ConfigError::InvalidNumber {
            key,
            value: value.to_string(),
        })
}
