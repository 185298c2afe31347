use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::{Paragraph, Widget},
};

use crate::{player::ControlsView, ui::components::spinner::Spinner, util::colors};

/// Stand-in for the video picture: episode title and playback status.
pub struct OverlayWidget<'a> {
    title: &'a str,
    view: &'a ControlsView,
    show_title: bool,
}

impl<'a> OverlayWidget<'a> {
    pub fn new(title: &'a str, view: &'a ControlsView) -> Self {
        Self {
            title,
            view,
            show_title: false,
        }
    }

    pub fn show_title(mut self, show: bool) -> Self {
        self.show_title = show;
        self
    }
}

impl Widget for OverlayWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        if self.show_title {
            Line::from(self.title)
                .fg(colors::TEXT)
                .bold()
                .alignment(Alignment::Center)
                .render(Rect { height: 1, ..area }, buf);
        }

        if self.view.buffering {
            Spinner::default()
                .with_style(Style::new().fg(colors::PRIMARY))
                .with_label("Buffering")
                .render(area, buf);
        } else if self.view.paused {
            let middle = Rect {
                y: area.y + area.height / 2,
                height: 1,
                ..area
            };
            Paragraph::new(" Paused")
                .alignment(Alignment::Center)
                .fg(colors::NEUTRAL)
                .render(middle, buf);
        }
    }
}
