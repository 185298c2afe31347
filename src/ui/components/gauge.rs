use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols,
    text::Span,
    widgets::Widget,
};

use crate::player::TimelineView;

/// Played/buffered bar with a hover tooltip drawn over it.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineGauge<'a> {
    view: &'a TimelineView,
    played_style: Style,
    buffered_style: Style,
    remaining_style: Style,
    tooltip_style: Style,
    thumb_style: Style,
}

impl<'a> TimelineGauge<'a> {
    pub fn new(view: &'a TimelineView) -> Self {
        Self {
            view,
            played_style: Style::default(),
            buffered_style: Style::default(),
            remaining_style: Style::default(),
            tooltip_style: Style::default(),
            thumb_style: Style::default(),
        }
    }

    pub fn played_style<S: Into<Style>>(mut self, style: S) -> Self {
        self.played_style = style.into();
        self
    }

    pub fn buffered_style<S: Into<Style>>(mut self, style: S) -> Self {
        self.buffered_style = style.into();
        self
    }

    pub fn remaining_style<S: Into<Style>>(mut self, style: S) -> Self {
        self.remaining_style = style.into();
        self
    }

    pub fn tooltip_style<S: Into<Style>>(mut self, style: S) -> Self {
        self.tooltip_style = style.into();
        self
    }

    pub fn thumb_style<S: Into<Style>>(mut self, style: S) -> Self {
        self.thumb_style = style.into();
        self
    }
}

fn get_unicode_block(frac: f64) -> &'static str {
    match (frac * 8.0).round() as u16 {
        0 => " ",
        1 => symbols::block::ONE_EIGHTH,
        2 => symbols::block::ONE_QUARTER,
        3 => symbols::block::THREE_EIGHTHS,
        4 => symbols::block::HALF,
        5 => symbols::block::FIVE_EIGHTHS,
        6 => symbols::block::THREE_QUARTERS,
        7 => symbols::block::SEVEN_EIGHTHS,
        _ => symbols::block::FULL,
    }
}

/// Left column of a tooltip `label_width` wide centred on `offset`, kept
/// inside `[0, width)`.
pub fn tooltip_column(offset: f64, label_width: u16, width: u16) -> u16 {
    if label_width >= width {
        return 0;
    }
    let centre = offset.round().max(0.0) as u16;
    centre
        .saturating_sub(label_width / 2)
        .min(width - label_width)
}

impl Widget for TimelineGauge<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let width = area.width as f64;
        let played_pos = width * self.view.played.clamp(0.0, 1.0);
        let buffered_pos = width * self.view.buffered.clamp(0.0, 1.0);
        let row = area.top() + area.height / 2;

        for x in area.left()..area.right() {
            let pos = (x - area.left()) as f64;

            let (symbol, style) = if pos < played_pos {
                let symbol = if pos + 1.0 > played_pos {
                    get_unicode_block(played_pos - pos)
                } else {
                    symbols::block::FULL
                };
                (symbol, self.played_style)
            } else if pos < buffered_pos {
                let symbol = if pos + 1.0 > buffered_pos {
                    get_unicode_block(buffered_pos - pos)
                } else {
                    symbols::block::FULL
                };
                (symbol, self.buffered_style)
            } else {
                (" ", self.remaining_style)
            };

            for y in area.top()..area.bottom() {
                buf[(x, y)]
                    .set_symbol(symbol)
                    .set_fg(style.fg.unwrap_or_default())
                    .set_bg(style.bg.unwrap_or_default());
            }
        }

        if self.view.dragging && area.width > 0 {
            let thumb = (played_pos.floor() as u16).min(area.width - 1);
            buf[(area.left() + thumb, row)]
                .set_symbol("●")
                .set_style(self.thumb_style);
        }

        if let Some(offset) = self.view.hover_offset {
            let label = Span::styled(format!(" {} ", self.view.hover_label), self.tooltip_style);
            let label_width = label.width() as u16;
            let column = tooltip_column(offset, label_width, area.width);
            buf.set_span(area.left() + column, row, &label, area.width - column);
        }
    }
}
