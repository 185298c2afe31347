use std::time::{Duration, Instant};

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    player::{Key, KeyStroke},
    ui::message::AppMessage,
};

/// Two presses on the same cell closer than this are a double click.
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key(key: KeyEvent) -> Option<AppMessage> {
        let player = |key| Some(AppMessage::Player(KeyStroke::new(key)));

        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(AppMessage::Quit),
            (KeyCode::Char('q'), _) => Some(AppMessage::Quit),
            (KeyCode::Enter, _) => Some(AppMessage::OpenPlayer),
            (KeyCode::Esc, _) => Some(AppMessage::ClosePlayer),
            (KeyCode::Char('d'), _) => Some(AppMessage::ToggleDurationMode),
            (KeyCode::Char('i'), _) => Some(AppMessage::SkipIntro),
            (KeyCode::Char('m'), _) => Some(AppMessage::ToggleMute),
            (KeyCode::Char('s'), _) => Some(AppMessage::ToggleSpeedMenu),
            (KeyCode::Char(' '), _) => player(Key::Space),
            (KeyCode::Left, _) => player(Key::ArrowLeft),
            (KeyCode::Right, _) => player(Key::ArrowRight),
            (KeyCode::Up, _) => player(Key::ArrowUp),
            (KeyCode::Down, _) => player(Key::ArrowDown),
            (KeyCode::F(11), _) | (KeyCode::Char('f'), _) => player(Key::Fullscreen),
            _ => None,
        }
    }
}

/// Terminals only report presses, so double clicks are recognised here.
#[derive(Debug, Default)]
pub struct ClickTracker {
    last: Option<(u16, u16, Instant)>,
}

impl ClickTracker {
    /// Records a press; `true` when it completes a double click.
    pub fn register(&mut self, column: u16, row: u16, now: Instant) -> bool {
        let double = self.last.is_some_and(|(last_column, last_row, at)| {
            last_column == column
                && last_row == row
                && now.saturating_duration_since(at) <= DOUBLE_CLICK_WINDOW
        });

        self.last = if double {
            None
        } else {
            Some((column, row, now))
        };
        double
    }
}
