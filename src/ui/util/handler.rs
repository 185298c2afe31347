use std::time::Instant;

use ratatui::{
    crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind},
    layout::Rect,
};
use tracing::trace;

use crate::{
    event::events::Event,
    ui::{
        app::App,
        input::InputHandler,
        layout::Hit,
        tui::{TerminalEvent, Tui},
    },
};

pub struct EventHandler;

impl EventHandler {
    pub async fn handle_events(app: &mut App, tui: &mut Tui) -> color_eyre::Result<()> {
        if let Some(evt) = tui.next().await {
            Self::handle_event(app, evt, tui)?;
        }

        while let Ok(evt) = app.event_rx.try_recv() {
            Self::handle_media_event(app, evt);
        }

        Ok(())
    }

    pub fn handle_event(
        app: &mut App,
        evt: TerminalEvent,
        tui: &mut Tui,
    ) -> color_eyre::Result<()> {
        match evt {
            TerminalEvent::FocusGained => {
                app.has_focus = true;
                tui.clear()?;
            }
            other => Self::handle_terminal_event(app, other),
        }
        Ok(())
    }

    /// Everything but the events that need the terminal itself.
    pub fn handle_terminal_event(app: &mut App, evt: TerminalEvent) {
        match evt {
            TerminalEvent::Init => app.last_tick = Instant::now(),
            TerminalEvent::Tick => Self::tick(app, Instant::now()),
            TerminalEvent::FocusGained => app.has_focus = true,
            TerminalEvent::FocusLost => {
                app.has_focus = false;
                // The release may never be reported once focus is gone.
                if app.capture.is_captured() {
                    app.surface.pointer_up();
                    app.timeline_hovered = false;
                }
            }
            TerminalEvent::Key(key) => Self::handle_key_event(app, key),
            TerminalEvent::Mouse(mouse) => {
                Self::handle_mouse_event(app, mouse, Instant::now());
            }
            TerminalEvent::Resize(width, height) => app.resize(Rect::new(0, 0, width, height)),
        }
    }

    pub fn tick(app: &mut App, now: Instant) {
        let elapsed = now.saturating_duration_since(app.last_tick);
        app.last_tick = now;
        app.surface.media_mut().advance(elapsed);
    }

    pub fn handle_media_event(app: &mut App, evt: Event) {
        trace!(?evt, "media event");
        app.surface.handle_media_event(evt);
    }

    pub fn handle_key_event(app: &mut App, evt: KeyEvent) {
        if let Some(msg) = InputHandler::handle_key(evt) {
            app.update(msg);
        }
    }

    pub fn handle_mouse_event(app: &mut App, evt: MouseEvent, now: Instant) {
        if !app.surface.is_visible() {
            return;
        }

        let was_visible = app.surface.controls_visible(now);
        app.surface.note_activity(now);

        let x = evt.column as f64;

        // A drag owns the pointer until the button is released, wherever it goes.
        if app.capture.is_captured() {
            match evt.kind {
                MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                    app.surface.pointer_move(x);
                }
                MouseEventKind::Up(MouseButton::Left) => {
                    app.surface.pointer_up();
                    app.timeline_hovered = false;
                }
                _ => {}
            }
            return;
        }

        let layout = app.layout();
        let state = app.surface.state();
        let speed_menu_open = state.speed_menu_open;
        let hit = layout.hit(
            evt.column,
            evt.row,
            speed_menu_open,
            app.surface.speed_options().len(),
        );

        match evt.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                let over = hit == Some(Hit::Timeline);
                if over && !app.timeline_hovered {
                    app.surface.pointer_enter();
                } else if !over && app.timeline_hovered {
                    app.surface.pointer_leave();
                }
                app.timeline_hovered = over;

                if over {
                    app.surface.pointer_move(x);
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let double = app.clicks.register(evt.column, evt.row, now);

                if speed_menu_open && !matches!(hit, Some(Hit::Speed | Hit::SpeedOption(_))) {
                    app.surface.close_speed_menu();
                }

                // The first click on hidden controls only reveals them.
                if !was_visible && hit != Some(Hit::Overlay) {
                    return;
                }

                let Some(hit) = hit else {
                    return;
                };
                Self::click(app, hit, evt.column, double);
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                let sign = if evt.kind == MouseEventKind::ScrollUp {
                    1.0
                } else {
                    -1.0
                };

                match hit {
                    Some(Hit::VolumeIcon | Hit::VolumeSlider) => {
                        app.surface.change_volume(sign * app.config.volume_step);
                    }
                    Some(Hit::Timeline) => app.surface.seek_by(sign * app.config.seek_step_secs),
                    _ => {}
                }
            }
            _ => {}
        }
    }

    fn click(app: &mut App, hit: Hit, column: u16, double: bool) {
        let layout = app.layout();

        match hit {
            Hit::Timeline => app.surface.pointer_down(column as f64),
            Hit::Duration => app.surface.toggle_duration_mode(),
            Hit::SkipIntro => app.surface.skip_intro(),
            Hit::SkipBackward => app.surface.skip_backward(),
            Hit::PlayPause => app.surface.toggle_play(),
            Hit::SkipForward => app.surface.skip_forward(),
            Hit::VolumeIcon => app.surface.toggle_volume(),
            Hit::VolumeSlider => app.surface.set_volume(layout.volume_at(column)),
            Hit::Speed => app.surface.toggle_speed_menu(),
            Hit::SpeedOption(index) => app.surface.select_speed(index),
            Hit::Fullscreen => app.surface.toggle_fullscreen(),
            Hit::Exit => app.surface.exit(),
            Hit::Overlay if double => app.surface.toggle_fullscreen(),
            Hit::Overlay => {}
        }

        if matches!(hit, Hit::Fullscreen | Hit::Overlay) {
            app.resize(app.area);
        }
    }
}
