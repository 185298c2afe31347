use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    symbols::border,
    widgets::{Block, Borders, Clear, List, ListItem, Widget},
};

use crate::util::colors;

pub fn speed_label(rate: f64) -> String {
    format!("{rate}x")
}

/// Popup listing the playback speeds, the active one highlighted.
pub struct SpeedMenu<'a> {
    options: &'a [f64],
    active: f64,
}

impl<'a> SpeedMenu<'a> {
    pub fn new(options: &'a [f64], active: f64) -> Self {
        Self { options, active }
    }
}

impl Widget for SpeedMenu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem> = self
            .options
            .iter()
            .map(|rate| {
                let (marker, style) = if *rate == self.active {
                    (
                        "•",
                        Style::default()
                            .fg(colors::PRIMARY)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    (" ", Style::default().fg(colors::TEXT))
                };
                ListItem::new(format!("{marker} {}", speed_label(*rate))).style(style)
            })
            .collect();

        Clear.render(area, buf);
        List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_set(border::ROUNDED)
                    .border_style(Style::new().fg(colors::NEUTRAL))
                    .style(Style::new().bg(colors::BACKGROUND)),
            )
            .render(area, buf);
    }
}
