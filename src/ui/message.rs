use crate::player::KeyStroke;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppMessage {
    Quit,

    // Player view
    OpenPlayer,
    ClosePlayer,

    // Controls without a key of their own in the player
    ToggleDurationMode,
    SkipIntro,
    ToggleMute,
    ToggleSpeedMenu,

    Player(KeyStroke),
}
