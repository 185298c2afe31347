pub mod config;
pub mod event;
pub mod media;
pub mod player;
pub mod prefs;
pub mod ui;
pub mod util;
