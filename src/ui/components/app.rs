use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Style, Stylize},
    text::{Line, Text},
    widgets::{Paragraph, Widget},
};

use crate::{
    ui::{
        app::App,
        components::{
            controls::PlayerControlsWidget, overlay::OverlayWidget, progress::ProgressWidget,
            speed_menu::SpeedMenu,
        },
    },
    util::colors,
};

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        buf.set_style(area, Style::new().bg(colors::BACKGROUND));

        if !self.surface.is_visible() {
            render_closed(self.title(), area, buf);
            return;
        }

        let layout = self.layout_for(area);
        let state = self.surface.state();
        let controls = state.controls_view();

        if let Some(header) = layout.header {
            Line::from(format!("anitui · {}", self.title()))
                .fg(colors::TEXT)
                .alignment(Alignment::Center)
                .render(header, buf);
        }

        OverlayWidget::new(self.title(), &controls)
            .show_title(layout.header.is_none())
            .render(layout.overlay, buf);

        if !self.controls_visible() {
            return;
        }

        ProgressWidget::new(&state.timeline_view(), &controls, self.surface.intro_skip_secs())
            .render(layout.progress, buf);
        PlayerControlsWidget::new(&controls).render(layout.controls, buf);

        if state.speed_menu_open {
            SpeedMenu::new(self.surface.speed_options(), state.playback_rate)
                .render(layout.speed_menu, buf);
        }
    }
}

fn render_closed(title: &str, area: Rect, buf: &mut Buffer) {
    let text = Text::from(vec![
        Line::from(title.to_string()).fg(colors::TEXT).bold(),
        Line::from("Enter to resume, q to quit").fg(colors::NEUTRAL),
    ]);
    let middle = Rect {
        y: area.y + area.height.saturating_sub(2) / 2,
        height: area.height.min(2),
        ..area
    };
    Paragraph::new(text)
        .alignment(Alignment::Center)
        .render(middle, buf);
}
