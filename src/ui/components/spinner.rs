use std::time::{SystemTime, UNIX_EPOCH};

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};
use unicode_width::UnicodeWidthStr;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const FRAME_STEP_MS: u128 = 100;

pub struct Spinner {
    style: Style,
    label: Option<String>,
    frame: usize,
}

impl Default for Spinner {
    fn default() -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or_default();

        Self {
            style: Style::default(),
            label: None,
            frame: (now / FRAME_STEP_MS) as usize,
        }
    }
}

impl Spinner {
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_frame(mut self, frame: usize) -> Self {
        self.frame = frame;
        self
    }
}

impl Widget for Spinner {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let symbol = FRAMES[self.frame % FRAMES.len()];
        let text = match self.label {
            Some(label) => format!("{symbol} {label}"),
            None => symbol.to_string(),
        };

        let x = area.x + area.width.saturating_sub(text.width() as u16) / 2;
        let y = area.y + area.height / 2;
        buf.set_stringn(x, y, &text, area.right().saturating_sub(x) as usize, self.style);
    }
}
