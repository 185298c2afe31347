use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Style, Stylize},
    text::{Span, ToSpan},
    widgets::{Gauge, Paragraph, Widget},
};

use crate::{
    player::ControlsView,
    ui::{components::speed_menu::speed_label, layout::control_row},
    util::colors,
};

/// Transport buttons, volume, speed, fullscreen and exit.
pub struct PlayerControlsWidget<'a> {
    view: &'a ControlsView,
}

impl<'a> PlayerControlsWidget<'a> {
    pub fn new(view: &'a ControlsView) -> Self {
        Self { view }
    }
}

fn button(icon: Span<'_>, area: Rect, buf: &mut Buffer) {
    Paragraph::new(icon)
        .alignment(Alignment::Center)
        .render(area, buf);
}

impl Widget for PlayerControlsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let row = control_row(area);
        let view = self.view;

        let play_icon = if view.paused { "" } else { "" };
        let volume_icon = if view.muted {
            "󰝟".fg(colors::NEUTRAL)
        } else {
            "󰕾".fg(colors::TEXT)
        };
        let fullscreen_icon = if view.fullscreen { "󰊔" } else { "󰊓" };
        let speed = speed_label(view.playback_rate);
        let speed = if view.speed_menu_open {
            speed.to_span().fg(colors::PRIMARY).bold()
        } else {
            speed.to_span().fg(colors::TEXT)
        };

        button("󰴪".fg(colors::TEXT), row[1], buf);
        button(play_icon.fg(colors::PRIMARY), row[2], buf);
        button("󰵱".fg(colors::TEXT), row[3], buf);
        button(volume_icon, row[5], buf);

        let volume_label = format!("{}%", (view.volume * 100.0).round() as u8);
        Gauge::default()
            .gauge_style(Style::new().fg(colors::PRIMARY).bg(colors::NEUTRAL))
            .ratio(view.volume.clamp(0.0, 1.0))
            .label(volume_label.to_span().fg(colors::TEXT))
            .render(row[6], buf);

        button(speed, row[8], buf);
        button(fullscreen_icon.fg(colors::TEXT), row[9], buf);
        button("󰅖".fg(colors::TEXT), row[10], buf);
    }
}
