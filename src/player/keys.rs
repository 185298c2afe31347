/// Keys the player reacts to, independent of the input backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Fullscreen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyStroke {
    pub key: Key,
    /// Part of an input-method composition rather than a direct press.
    pub is_composing: bool,
}

impl KeyStroke {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            is_composing: false,
        }
    }

    pub fn composing(key: Key) -> Self {
        Self {
            key,
            is_composing: true,
        }
    }
}

/// The one action a key stands for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shortcut {
    TogglePlay,
    SeekBy(f64),
    VolumeBy(f64),
    ToggleFullscreen,
}

impl Key {
    pub fn shortcut(self, seek_step: f64, volume_step: f64) -> Shortcut {
        match self {
            Key::Space => Shortcut::TogglePlay,
            Key::ArrowLeft => Shortcut::SeekBy(-seek_step),
            Key::ArrowRight => Shortcut::SeekBy(seek_step),
            Key::ArrowUp => Shortcut::VolumeBy(volume_step),
            Key::ArrowDown => Shortcut::VolumeBy(-volume_step),
            Key::Fullscreen => Shortcut::ToggleFullscreen,
        }
    }
}
