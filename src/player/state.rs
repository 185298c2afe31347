use crate::player::{
    format::{format_time, percent, ratio},
    scrubber::PointerState,
};

/// Everything the controls display, owned by the control surface for one
/// playback session.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackUiState {
    pub current_time: f64,
    pub duration: f64,
    pub buffered_end: f64,
    pub pointer: PointerState,
    pub hover_offset: f64,
    pub hover_time: f64,
    /// Total duration instead of remaining time in the duration label.
    pub show_duration: bool,
    pub paused: bool,
    pub buffering: bool,
    pub volume: f64,
    pub playback_rate: f64,
    pub speed_menu_open: bool,
    pub fullscreen: bool,
}

impl Default for PlaybackUiState {
    fn default() -> Self {
        Self {
            current_time: 0.0,
            duration: 0.0,
            buffered_end: 0.0,
            pointer: PointerState::Idle,
            hover_offset: 0.0,
            hover_time: 0.0,
            show_duration: false,
            paused: true,
            buffering: false,
            volume: 1.0,
            playback_rate: 1.0,
            speed_menu_open: false,
            fullscreen: false,
        }
    }
}

impl PlaybackUiState {
    pub fn is_dragging(&self) -> bool {
        self.pointer == PointerState::Dragging
    }

    pub fn is_hovering(&self) -> bool {
        self.pointer == PointerState::Hovering
    }

    pub fn tooltip_visible(&self) -> bool {
        self.pointer != PointerState::Idle
    }

    pub fn is_muted(&self) -> bool {
        self.volume == 0.0
    }

    pub fn remaining(&self) -> f64 {
        if self.duration.is_finite() && self.current_time.is_finite() {
            (self.duration - self.current_time).max(0.0)
        } else {
            0.0
        }
    }

    pub fn progress_percent(&self) -> f64 {
        percent(self.current_time, self.duration)
    }

    pub fn buffered_percent(&self) -> f64 {
        percent(self.buffered_end, self.duration)
    }

    pub fn current_label(&self) -> String {
        format_time(self.current_time)
    }

    pub fn remaining_label(&self) -> String {
        format!("-{}", format_time(self.remaining()))
    }

    pub fn duration_label(&self) -> String {
        if self.show_duration {
            format_time(self.duration)
        } else {
            self.remaining_label()
        }
    }

    pub fn hover_label(&self) -> String {
        format_time(self.hover_time)
    }

    pub fn timeline_view(&self) -> TimelineView {
        TimelineView {
            played: ratio(self.current_time, self.duration),
            buffered: ratio(self.buffered_end, self.duration),
            hover_offset: self.tooltip_visible().then_some(self.hover_offset),
            hover_label: self.hover_label(),
            dragging: self.is_dragging(),
        }
    }

    pub fn controls_view(&self) -> ControlsView {
        ControlsView {
            current: self.current_label(),
            duration: self.duration_label(),
            paused: self.paused,
            buffering: self.buffering,
            muted: self.is_muted(),
            volume: ratio(self.volume, 1.0),
            playback_rate: self.playback_rate,
            speed_menu_open: self.speed_menu_open,
            fullscreen: self.fullscreen,
        }
    }
}

/// What the timeline draws: ratios in `[0, 1]`, never NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineView {
    pub played: f64,
    pub buffered: f64,
    /// Tooltip position from the timeline's left edge, when shown.
    pub hover_offset: Option<f64>,
    pub hover_label: String,
    pub dragging: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControlsView {
    pub current: String,
    pub duration: String,
    pub paused: bool,
    pub buffering: bool,
    pub muted: bool,
    pub volume: f64,
    pub playback_rate: f64,
    pub speed_menu_open: bool,
    pub fullscreen: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(current_time: f64, duration: f64) -> PlaybackUiState {
        PlaybackUiState {
            current_time,
            duration,
            ..Default::default()
        }
    }

    #[test]
    fn labels_for_partial_playback() {
        let mut state = at(65.0, 125.0);
        assert!((state.progress_percent() - 52.0).abs() < 1e-9);
        assert_eq!(state.current_label(), "01:05");
        assert_eq!(state.duration_label(), "-01:00");

        state.show_duration = true;
        assert_eq!(state.duration_label(), "02:05");
    }

    #[test]
    fn buffered_width() {
        let state = PlaybackUiState {
            buffered_end: 100.0,
            ..at(0.0, 200.0)
        };
        assert_eq!(state.buffered_percent(), 50.0);
    }

    #[test]
    fn zero_duration_stays_finite() {
        let state = PlaybackUiState {
            buffered_end: 30.0,
            ..at(12.0, 0.0)
        };
        let view = state.timeline_view();

        assert_eq!(state.progress_percent(), 0.0);
        assert_eq!(state.buffered_percent(), 0.0);
        assert!(view.played.is_finite() && view.buffered.is_finite());
        assert_eq!(state.duration_label(), "-00:00");
        assert!(!state.controls_view().duration.contains("NaN"));
    }

    #[test]
    fn remaining_never_negative() {
        assert_eq!(at(130.0, 125.0).remaining(), 0.0);
        assert_eq!(at(130.0, 125.0).progress_percent(), 100.0);
    }

    #[test]
    fn tooltip_follows_pointer_state() {
        let mut state = PlaybackUiState {
            hover_offset: 42.0,
            ..at(0.0, 60.0)
        };
        assert_eq!(state.timeline_view().hover_offset, None);

        state.pointer = PointerState::Hovering;
        assert_eq!(state.timeline_view().hover_offset, Some(42.0));

        state.pointer = PointerState::Dragging;
        assert!(state.timeline_view().dragging);
    }

    #[test]
    fn muted_only_at_exact_zero() {
        let mut state = PlaybackUiState::default();
        state.volume = 0.01;
        assert!(!state.controls_view().muted);
        state.volume = 0.0;
        assert!(state.controls_view().muted);
    }
}
