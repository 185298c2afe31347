use std::rc::Rc;

use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

use crate::player::Timeline;

const SPEED_MENU_WIDTH: u16 = 10;

/// Control the pointer is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Timeline,
    Duration,
    SkipIntro,
    SkipBackward,
    PlayPause,
    SkipForward,
    VolumeIcon,
    VolumeSlider,
    Speed,
    SpeedOption(usize),
    Fullscreen,
    Exit,
    Overlay,
}

/// Screen regions of the player. Rendering and hit-testing both come from
/// here so a click always lands on what was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerLayout {
    pub header: Option<Rect>,
    pub overlay: Rect,
    pub progress: Rect,
    pub skip_intro: Rect,
    pub current_time: Rect,
    pub timeline: Rect,
    pub duration: Rect,
    pub controls: Rect,
    pub skip_backward: Rect,
    pub play_pause: Rect,
    pub skip_forward: Rect,
    pub volume_icon: Rect,
    pub volume_slider: Rect,
    pub speed: Rect,
    pub fullscreen: Rect,
    pub exit: Rect,
    pub speed_menu: Rect,
}

/// Skip-intro, current time, timeline and duration inside the bordered
/// progress box.
pub fn progress_row(progress: Rect) -> Rc<[Rect]> {
    let inner = Rect {
        x: progress.x.saturating_add(1),
        y: progress.y.saturating_add(1),
        width: progress.width.saturating_sub(2),
        height: progress.height.saturating_sub(2),
    };
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(6),
            Constraint::Length(10),
            Constraint::Min(1),
            Constraint::Length(11),
        ])
        .split(inner)
}

/// Button row; index 0, 4, 7 and 11 are spacers.
pub fn control_row(controls: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(12),
            Constraint::Min(0),
            Constraint::Length(7),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(controls)
}

impl PlayerLayout {
    pub fn new(area: Rect, fullscreen: bool, speed_options: usize) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(if fullscreen { 0 } else { 1 }),
                Constraint::Min(1),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(area);

        let header = (!fullscreen).then_some(chunks[0]);
        let overlay = chunks[1];
        let progress = chunks[2];
        let controls = chunks[3];

        let progress_row = progress_row(progress);
        let control_row = control_row(controls);

        let speed = control_row[8];
        let menu_height = (speed_options as u16).saturating_add(2).min(overlay.height);
        let menu_width = SPEED_MENU_WIDTH.min(overlay.width);
        let menu_x = speed
            .x
            .min(overlay.right().saturating_sub(menu_width))
            .max(overlay.x);
        let speed_menu = Rect {
            x: menu_x,
            y: overlay.bottom().saturating_sub(menu_height),
            width: menu_width,
            height: menu_height,
        };

        Self {
            header,
            overlay,
            progress,
            skip_intro: progress_row[0],
            current_time: progress_row[1],
            timeline: progress_row[2],
            duration: progress_row[3],
            controls,
            skip_backward: control_row[1],
            play_pause: control_row[2],
            skip_forward: control_row[3],
            volume_icon: control_row[5],
            volume_slider: control_row[6],
            speed,
            fullscreen: control_row[9],
            exit: control_row[10],
            speed_menu,
        }
    }

    /// The timeline in terminal columns; the last column is the end of the
    /// episode.
    pub fn timeline_geometry(&self) -> Timeline {
        Timeline::new(
            self.timeline.x as f64,
            self.timeline.width.saturating_sub(1) as f64,
        )
    }

    pub fn speed_option_area(&self, index: usize) -> Option<Rect> {
        let row = self
            .speed_menu
            .y
            .saturating_add(1)
            .saturating_add(u16::try_from(index).ok()?);
        (row.saturating_add(1) < self.speed_menu.bottom()).then(|| Rect {
            x: self.speed_menu.x + 1,
            y: row,
            width: self.speed_menu.width.saturating_sub(2),
            height: 1,
        })
    }

    /// Volume under a column of the slider, `0.0..=1.0`.
    pub fn volume_at(&self, column: u16) -> f64 {
        let span = self.volume_slider.width.saturating_sub(1);
        if span == 0 {
            return 0.0;
        }
        let offset = column.saturating_sub(self.volume_slider.x).min(span);
        offset as f64 / span as f64
    }

    pub fn hit(
        &self,
        column: u16,
        row: u16,
        speed_menu_open: bool,
        speed_options: usize,
    ) -> Option<Hit> {
        let position = Position::new(column, row);

        if speed_menu_open && self.speed_menu.contains(position) {
            return (0..speed_options)
                .find(|index| {
                    self.speed_option_area(*index)
                        .is_some_and(|area| area.contains(position))
                })
                .map(Hit::SpeedOption)
                .or(Some(Hit::Speed));
        }

        let targets = [
            (self.timeline, Hit::Timeline),
            (self.duration, Hit::Duration),
            (self.skip_intro, Hit::SkipIntro),
            (self.skip_backward, Hit::SkipBackward),
            (self.play_pause, Hit::PlayPause),
            (self.skip_forward, Hit::SkipForward),
            (self.volume_icon, Hit::VolumeIcon),
            (self.volume_slider, Hit::VolumeSlider),
            (self.speed, Hit::Speed),
            (self.fullscreen, Hit::Fullscreen),
            (self.exit, Hit::Exit),
            (self.overlay, Hit::Overlay),
        ];

        targets
            .into_iter()
            .find(|(area, _)| area.contains(position))
            .map(|(_, hit)| hit)
    }
}
