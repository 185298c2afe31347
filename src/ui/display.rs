use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tracing::debug;

use crate::player::FullscreenHost;

/// Fullscreen for a terminal: the app chrome is hidden and the player takes
/// the whole screen. Clones share the flag.
#[derive(Debug, Clone, Default)]
pub struct TerminalDisplay {
    fullscreen: Arc<AtomicBool>,
}

impl TerminalDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FullscreenHost for TerminalDisplay {
    fn is_fullscreen(&self) -> bool {
        self.fullscreen.load(Ordering::Relaxed)
    }

    fn request_fullscreen(&mut self) {
        debug!("entering fullscreen");
        self.fullscreen.store(true, Ordering::Relaxed);
    }

    fn exit_fullscreen(&mut self) {
        debug!("leaving fullscreen");
        self.fullscreen.store(false, Ordering::Relaxed);
    }
}
