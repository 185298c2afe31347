pub mod app;
pub mod controls;
pub mod gauge;
pub mod overlay;
pub mod progress;
pub mod speed_menu;
pub mod spinner;
