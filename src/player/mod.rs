pub mod capture;
pub mod format;
pub mod keys;
pub mod scrubber;
pub mod state;
pub mod surface;

pub use capture::{CaptureGuard, PointerCapture};
pub use keys::{Key, KeyStroke, Shortcut};
pub use scrubber::{PointerState, Timeline};
pub use state::{ControlsView, PlaybackUiState, TimelineView};
pub use surface::{FullscreenHost, PlaybackControlSurface};
