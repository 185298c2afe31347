use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Style, Stylize},
    symbols::border,
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::{
    player::{ControlsView, TimelineView},
    ui::{components::gauge::TimelineGauge, layout::progress_row},
    util::colors,
};

/// Skip-intro button, current time, timeline and the duration label.
pub struct ProgressWidget<'a> {
    timeline: &'a TimelineView,
    controls: &'a ControlsView,
    intro_skip_secs: f64,
}

impl<'a> ProgressWidget<'a> {
    pub fn new(timeline: &'a TimelineView, controls: &'a ControlsView, intro_skip_secs: f64) -> Self {
        Self {
            timeline,
            controls,
            intro_skip_secs,
        }
    }
}

impl Widget for ProgressWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::new().fg(colors::NEUTRAL))
            .render(area, buf);

        let row = progress_row(area);

        Paragraph::new(Line::from(format!("+{}", self.intro_skip_secs.round() as i64)))
            .alignment(Alignment::Center)
            .fg(colors::ACCENT)
            .render(row[0], buf);

        Paragraph::new(self.controls.current.as_str())
            .alignment(Alignment::Center)
            .fg(colors::TEXT)
            .render(row[1], buf);

        TimelineGauge::new(self.timeline)
            .played_style(Style::default().fg(colors::PRIMARY).bg(colors::SECONDARY))
            .buffered_style(Style::default().fg(colors::SECONDARY).bg(colors::BACKGROUND))
            .remaining_style(Style::default().fg(colors::BACKGROUND).bg(colors::BACKGROUND))
            .tooltip_style(Style::default().fg(colors::BACKGROUND).bg(colors::ACCENT))
            .thumb_style(Style::default().fg(colors::TEXT).bg(colors::PRIMARY))
            .render(row[2], buf);

        Paragraph::new(self.controls.duration.as_str())
            .alignment(Alignment::Center)
            .fg(colors::TEXT)
            .render(row[3], buf);
    }
}
