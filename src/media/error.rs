use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MediaError {
    #[error("Invalid media duration: {0}")]
    InvalidDuration(f64),

    #[error("Invalid playback rate: {0}")]
    InvalidRate(f64),
}
