use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::{
    config::PlayerConfig,
    event::events::Event,
    media::traits::MediaHandle,
    player::{
        capture::{CaptureGuard, PointerCapture},
        keys::{KeyStroke, Shortcut},
        scrubber::{PointerState, Timeline},
        state::PlaybackUiState,
    },
    prefs::Preferences,
};

/// Volume restored by the volume button when unmuting.
const UNMUTED_VOLUME: f64 = 0.5;

/// Whatever can put the player in fullscreen.
pub trait FullscreenHost {
    fn is_fullscreen(&self) -> bool;
    fn request_fullscreen(&mut self);
    fn exit_fullscreen(&mut self);
}

/// Turns media timing signals and pointer/keyboard input into scrubber state
/// and commands on the media handle.
///
/// A drag previews and seeks on every move; the media is paused for the whole
/// gesture and resumed once on release. Pointer capture is held in a
/// [`CaptureGuard`] so dropping the surface mid-drag releases it too.
pub struct PlaybackControlSurface<M: MediaHandle> {
    media: M,
    prefs: Preferences,
    display: Box<dyn FullscreenHost>,
    capture: PointerCapture,
    drag: Option<CaptureGuard>,
    timeline: Timeline,
    state: PlaybackUiState,
    seek_step: f64,
    volume_step: f64,
    controls_hide_after: Duration,
    speed_options: Vec<f64>,
    visible: bool,
    last_activity: Option<Instant>,
}

impl<M: MediaHandle> PlaybackControlSurface<M> {
    pub fn new(
        media: M,
        prefs: Preferences,
        display: Box<dyn FullscreenHost>,
        capture: PointerCapture,
        config: &PlayerConfig,
    ) -> Self {
        let state = PlaybackUiState {
            show_duration: prefs.show_duration(),
            ..Default::default()
        };

        let mut surface = Self {
            media,
            prefs,
            display,
            capture,
            drag: None,
            timeline: Timeline::default(),
            state,
            seek_step: config.seek_step_secs,
            volume_step: config.volume_step,
            controls_hide_after: config.controls_hide_after,
            speed_options: config.speed_options.clone(),
            visible: true,
            last_activity: None,
        };
        surface.sync();
        surface
    }

    pub fn state(&self) -> &PlaybackUiState {
        &self.state
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    pub fn timeline(&self) -> Timeline {
        self.timeline
    }

    pub fn set_timeline(&mut self, timeline: Timeline) {
        self.timeline = timeline;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_fullscreen(&self) -> bool {
        self.display.is_fullscreen()
    }

    pub fn speed_options(&self) -> &[f64] {
        &self.speed_options
    }

    pub fn intro_skip_secs(&self) -> f64 {
        self.prefs.intro_skip_time()
    }

    /// Re-reads everything from the media handle.
    pub fn sync(&mut self) {
        self.on_loaded();
        self.on_time_update();
        self.on_buffered_update();
        self.state.paused = self.media.is_paused();
        self.state.volume = self.media.volume();
        self.state.playback_rate = self.media.playback_rate();
        self.state.fullscreen = self.display.is_fullscreen();
        self.update_buffering();
    }

    pub fn handle_media_event(&mut self, event: Event) {
        trace!(?event, "media event");
        match event {
            Event::LoadedData => self.on_loaded(),
            Event::TimeUpdate => self.on_time_update(),
            Event::Progress => self.on_buffered_update(),
            Event::Play | Event::Pause | Event::Ended => {
                self.state.paused = self.media.is_paused();
                self.update_buffering();
            }
            Event::VolumeChange => self.state.volume = self.media.volume(),
            Event::RateChange => self.state.playback_rate = self.media.playback_rate(),
        }
    }

    pub fn on_loaded(&mut self) {
        self.state.duration = known(self.media.duration());
        self.state.buffered_end = self.clamp_to_duration(self.state.buffered_end);
    }

    pub fn on_time_update(&mut self) {
        self.state.duration = known(self.media.duration());
        self.state.current_time = self.clamp_to_duration(known(self.media.current_time()));
        self.update_buffering();
    }

    pub fn on_buffered_update(&mut self) {
        let end = self.media.buffered_end().map_or(0.0, known);
        self.state.buffered_end = self.clamp_to_duration(end);
        self.update_buffering();
    }

    fn clamp_to_duration(&self, seconds: f64) -> f64 {
        if self.state.duration > 0.0 {
            seconds.min(self.state.duration)
        } else {
            seconds
        }
    }

    fn update_buffering(&mut self) {
        let time = self.state.current_time;
        let playable = self
            .media
            .buffered_ranges()
            .iter()
            .any(|range| range.start <= time && time < range.end);

        self.state.buffering = !self.state.paused
            && self.state.duration > 0.0
            && time < self.state.duration
            && !playable;
    }

    pub fn pointer_enter(&mut self) {
        if self.state.pointer == PointerState::Idle {
            self.state.pointer = PointerState::Hovering;
        }
    }

    pub fn pointer_leave(&mut self) {
        if self.state.pointer == PointerState::Hovering {
            self.state.pointer = PointerState::Idle;
        }
    }

    pub fn pointer_down(&mut self, pointer_x: f64) {
        if self.state.is_dragging() {
            return;
        }

        self.state.pointer = PointerState::Dragging;
        self.drag = self.capture.acquire();
        if self.drag.is_none() {
            debug!("pointer capture already held, dragging without it");
        }

        self.media.pause();
        self.state.paused = true;
        self.drag_to(pointer_x);
    }

    pub fn pointer_move(&mut self, pointer_x: f64) {
        match self.state.pointer {
            PointerState::Dragging => self.drag_to(pointer_x),
            PointerState::Hovering => {
                self.hover_at(pointer_x);
            }
            PointerState::Idle => {}
        }
    }

    pub fn pointer_up(&mut self) {
        if !self.state.is_dragging() {
            return;
        }

        self.drag = None;
        self.state.pointer = PointerState::Idle;
        self.media.play();
        self.state.paused = self.media.is_paused();
        self.update_buffering();
    }

    fn hover_at(&mut self, pointer_x: f64) -> Option<f64> {
        let offset = self.timeline.offset(pointer_x)?;
        let time = self.timeline.seek_target(pointer_x, self.state.duration)?;

        self.state.hover_offset = offset;
        self.state.hover_time = time;
        Some(time)
    }

    fn drag_to(&mut self, pointer_x: f64) {
        let Some(time) = self.hover_at(pointer_x) else {
            return;
        };

        self.state.current_time = time;
        self.media.set_current_time(time);
    }

    /// Drops any pointer capture without touching playback.
    pub fn unmount(&mut self) {
        if self.drag.take().is_some() {
            debug!("control surface unmounted mid-drag");
        }
        self.state.pointer = PointerState::Idle;
        self.state.speed_menu_open = false;
    }

    pub fn show(&mut self) {
        self.visible = true;
        self.sync();
    }

    /// Exit button: stop watching and leave fullscreen.
    pub fn exit(&mut self) {
        self.media.pause();
        self.state.paused = true;
        self.unmount();
        self.visible = false;

        if self.display.is_fullscreen() {
            self.display.exit_fullscreen();
        }
        self.state.fullscreen = self.display.is_fullscreen();
    }

    pub fn toggle_duration_mode(&mut self) {
        self.state.show_duration = !self.state.show_duration;
        self.prefs.set_show_duration(self.state.show_duration);
    }

    pub fn skip_intro(&mut self) {
        let offset = self.prefs.intro_skip_time();
        let time = self.media.current_time();
        self.media.set_current_time(time + offset);
        self.on_time_update();
    }

    pub fn toggle_play(&mut self) {
        if self.media.is_paused() {
            self.media.play();
        } else {
            self.media.pause();
        }
        self.state.paused = self.media.is_paused();
        self.update_buffering();
    }

    pub fn seek_by(&mut self, seconds: f64) {
        let time = self.media.current_time();
        self.media.set_current_time(time + seconds);
        self.on_time_update();
    }

    pub fn skip_backward(&mut self) {
        self.seek_by(-self.seek_step);
    }

    pub fn skip_forward(&mut self) {
        self.seek_by(self.seek_step);
    }

    pub fn set_volume(&mut self, volume: f64) {
        self.media.set_volume(volume);
        self.state.volume = self.media.volume();
    }

    pub fn change_volume(&mut self, delta: f64) {
        let volume = self.media.volume();
        self.set_volume(volume + delta);
    }

    /// Volume button: mute, or restore a middle volume when muted.
    pub fn toggle_volume(&mut self) {
        if self.state.is_muted() {
            self.set_volume(UNMUTED_VOLUME);
        } else {
            self.set_volume(0.0);
        }
    }

    pub fn toggle_speed_menu(&mut self) {
        self.state.speed_menu_open = !self.state.speed_menu_open;
    }

    pub fn close_speed_menu(&mut self) {
        self.state.speed_menu_open = false;
    }

    pub fn set_speed(&mut self, rate: f64) {
        self.media.set_playback_rate(rate);
        self.state.playback_rate = self.media.playback_rate();
        self.state.speed_menu_open = false;
    }

    pub fn select_speed(&mut self, index: usize) {
        if let Some(rate) = self.speed_options.get(index).copied() {
            self.set_speed(rate);
        }
    }

    pub fn toggle_fullscreen(&mut self) {
        if self.display.is_fullscreen() {
            self.display.exit_fullscreen();
        } else {
            self.display.request_fullscreen();
        }
        self.state.fullscreen = self.display.is_fullscreen();
        debug!(fullscreen = self.state.fullscreen, "fullscreen toggled");
    }

    /// Applies the key's single action. Returns `false` when the key was not
    /// for the player.
    pub fn handle_key(&mut self, stroke: KeyStroke) -> bool {
        if stroke.is_composing || !self.visible {
            return false;
        }

        match stroke.key.shortcut(self.seek_step, self.volume_step) {
            Shortcut::TogglePlay => self.toggle_play(),
            Shortcut::SeekBy(seconds) => self.seek_by(seconds),
            Shortcut::VolumeBy(delta) => self.change_volume(delta),
            Shortcut::ToggleFullscreen => self.toggle_fullscreen(),
        }
        true
    }

    pub fn note_activity(&mut self, now: Instant) {
        self.last_activity = Some(now);
    }

    pub fn controls_visible(&self, now: Instant) -> bool {
        self.state.is_dragging()
            || self.state.speed_menu_open
            || self
                .last_activity
                .is_some_and(|last| now.saturating_duration_since(last) < self.controls_hide_after)
    }
}

fn known(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    };

    use serde_json::json;

    use super::*;
    use crate::{
        media::traits::TimeRange,
        player::keys::Key,
        prefs::{INTRO_SKIP_KEY, JsonFileStore, MemoryStore, PreferenceStore},
    };

    struct FakeMedia {
        time: f64,
        duration: f64,
        ranges: Vec<TimeRange>,
        paused: bool,
        volume: f64,
        rate: f64,
        plays: usize,
        pauses: usize,
        seeks: Vec<f64>,
    }

    impl FakeMedia {
        fn new(duration: f64, time: f64) -> Self {
            Self {
                time,
                duration,
                ranges: Vec::new(),
                paused: false,
                volume: 1.0,
                rate: 1.0,
                plays: 0,
                pauses: 0,
                seeks: Vec::new(),
            }
        }
    }

    impl MediaHandle for FakeMedia {
        fn current_time(&self) -> f64 {
            self.time
        }

        fn set_current_time(&mut self, seconds: f64) {
            self.seeks.push(seconds);
            self.time = seconds.clamp(0.0, self.duration);
        }

        fn duration(&self) -> f64 {
            self.duration
        }

        fn buffered_ranges(&self) -> Vec<TimeRange> {
            self.ranges.clone()
        }

        fn play(&mut self) {
            self.plays += 1;
            self.paused = false;
        }

        fn pause(&mut self) {
            self.pauses += 1;
            self.paused = true;
        }

        fn is_paused(&self) -> bool {
            self.paused
        }

        fn volume(&self) -> f64 {
            self.volume
        }

        fn set_volume(&mut self, volume: f64) {
            self.volume = volume.clamp(0.0, 1.0);
        }

        fn playback_rate(&self) -> f64 {
            self.rate
        }

        fn set_playback_rate(&mut self, rate: f64) {
            self.rate = rate;
        }
    }

    #[derive(Clone, Default)]
    struct FakeDisplay {
        active: Arc<AtomicBool>,
    }

    impl FullscreenHost for FakeDisplay {
        fn is_fullscreen(&self) -> bool {
            self.active.load(Ordering::Relaxed)
        }

        fn request_fullscreen(&mut self) {
            self.active.store(true, Ordering::Relaxed);
        }

        fn exit_fullscreen(&mut self) {
            self.active.store(false, Ordering::Relaxed);
        }
    }

    fn surface_with(
        media: FakeMedia,
        store: Box<dyn PreferenceStore>,
    ) -> PlaybackControlSurface<FakeMedia> {
        let mut surface = PlaybackControlSurface::new(
            media,
            Preferences::new(store),
            Box::new(FakeDisplay::default()),
            PointerCapture::new(),
            &PlayerConfig::default(),
        );
        surface.set_timeline(Timeline::new(0.0, 300.0));
        surface
    }

    fn surface(media: FakeMedia) -> PlaybackControlSurface<FakeMedia> {
        surface_with(media, Box::new(MemoryStore::new()))
    }

    #[test]
    fn time_update_formats_labels() {
        let mut surface = surface(FakeMedia::new(125.0, 0.0));
        surface.media_mut().time = 65.0;
        surface.on_time_update();

        let view = surface.state().controls_view();
        assert_eq!(view.current, "01:05");
        assert_eq!(view.duration, "-01:00");

        surface.toggle_duration_mode();
        assert_eq!(surface.state().controls_view().duration, "02:05");
    }

    #[test]
    fn buffered_end_comes_from_last_range() {
        let mut media = FakeMedia::new(200.0, 0.0);
        media.ranges = vec![0.0..20.0, 60.0..100.0];
        let mut surface = surface(media);
        assert_eq!(surface.state().buffered_percent(), 50.0);

        surface.media_mut().ranges.clear();
        surface.on_buffered_update();
        assert_eq!(surface.state().buffered_end, 0.0);
    }

    #[test]
    fn press_at_timeline_edges() {
        let mut surface = surface(FakeMedia::new(90.0, 30.0));
        surface.pointer_down(0.0);
        assert_eq!(surface.media().seeks, vec![0.0]);
        assert_eq!(surface.state().current_time, 0.0);
        surface.pointer_up();

        surface.pointer_down(300.0);
        assert_eq!(surface.media().seeks, vec![0.0, 90.0]);
        assert_eq!(surface.state().current_time, 90.0);
    }

    #[test]
    fn drag_pauses_and_resumes_once() {
        let mut surface = surface(FakeMedia::new(120.0, 10.0));
        surface.pointer_enter();
        surface.pointer_down(30.0);
        for x in [40.0, 80.0, 120.0, 310.0, -20.0] {
            surface.pointer_move(x);
        }
        assert_eq!(surface.media().pauses, 1);
        assert_eq!(surface.media().plays, 0);
        assert!(surface.state().is_dragging());

        surface.pointer_up();
        surface.pointer_up();
        assert_eq!(surface.media().pauses, 1);
        assert_eq!(surface.media().plays, 1);
        assert_eq!(surface.state().pointer, PointerState::Idle);
        assert!(!surface.state().paused);
    }

    #[test]
    fn drag_outside_timeline_clamps() {
        let mut surface = surface(FakeMedia::new(120.0, 10.0));
        surface.pointer_down(150.0);
        assert_eq!(surface.state().current_time, 60.0);

        surface.pointer_move(-500.0);
        assert_eq!(surface.state().current_time, 0.0);
        surface.pointer_move(9000.0);
        assert_eq!(surface.state().current_time, 120.0);
        assert_eq!(surface.state().progress_percent(), 100.0);
        assert!(surface.media().seeks.iter().all(|t| (0.0..=120.0).contains(t)));
    }

    #[test]
    fn leave_is_ignored_while_dragging() {
        let mut surface = surface(FakeMedia::new(120.0, 10.0));
        surface.pointer_enter();
        surface.pointer_down(50.0);
        surface.pointer_leave();
        assert!(surface.state().is_dragging());
        assert!(surface.state().tooltip_visible());
    }

    #[test]
    fn hover_moves_do_not_seek() {
        let mut surface = surface(FakeMedia::new(120.0, 10.0));
        surface.pointer_move(150.0);
        assert_eq!(surface.state().hover_time, 0.0);

        surface.pointer_enter();
        surface.pointer_move(150.0);
        assert_eq!(surface.state().hover_time, 60.0);
        assert_eq!(surface.state().hover_offset, 150.0);
        assert!(surface.media().seeks.is_empty());

        surface.pointer_leave();
        assert!(!surface.state().tooltip_visible());
    }

    #[test]
    fn unknown_duration_skips_seeking() {
        let mut surface = surface(FakeMedia::new(0.0, 0.0));
        surface.pointer_enter();
        surface.pointer_move(100.0);
        surface.pointer_down(100.0);
        surface.pointer_move(200.0);

        let state = surface.state();
        assert!(surface.media().seeks.is_empty());
        assert!(state.hover_time.is_finite() && state.current_time.is_finite());
        assert_eq!(state.progress_percent(), 0.0);
        assert_eq!(state.hover_label(), "00:00");

        surface.pointer_up();
        assert_eq!(surface.media().pauses, 1);
        assert_eq!(surface.media().plays, 1);
    }

    #[test]
    fn release_frees_pointer_capture() {
        let capture = PointerCapture::new();
        let mut surface = PlaybackControlSurface::new(
            FakeMedia::new(60.0, 0.0),
            Preferences::new(Box::new(MemoryStore::new())),
            Box::new(FakeDisplay::default()),
            capture.clone(),
            &PlayerConfig::default(),
        );
        surface.set_timeline(Timeline::new(0.0, 300.0));

        surface.pointer_down(10.0);
        assert!(capture.is_captured());
        surface.pointer_up();
        assert!(!capture.is_captured());

        surface.pointer_down(10.0);
        assert!(capture.is_captured());
        drop(surface);
        assert!(!capture.is_captured());
        assert_eq!(capture.acquisitions(), 2);
    }

    #[test]
    fn unmount_mid_drag_does_not_resume() {
        let capture = PointerCapture::new();
        let mut surface = PlaybackControlSurface::new(
            FakeMedia::new(60.0, 0.0),
            Preferences::new(Box::new(MemoryStore::new())),
            Box::new(FakeDisplay::default()),
            capture.clone(),
            &PlayerConfig::default(),
        );
        surface.set_timeline(Timeline::new(0.0, 300.0));

        surface.pointer_down(10.0);
        surface.unmount();
        assert!(!capture.is_captured());
        assert_eq!(surface.media().plays, 0);

        surface.pointer_up();
        assert_eq!(surface.media().plays, 0);
    }

    #[test]
    fn duration_mode_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");

        let mut first = surface_with(
            FakeMedia::new(125.0, 65.0),
            Box::new(JsonFileStore::open(&path)),
        );
        assert!(!first.state().show_duration);
        first.toggle_duration_mode();
        drop(first);

        let second = surface_with(
            FakeMedia::new(125.0, 65.0),
            Box::new(JsonFileStore::open(&path)),
        );
        assert!(second.state().show_duration);
        assert_eq!(second.state().duration_label(), "02:05");
    }

    #[test]
    fn skip_intro_uses_configured_offset() {
        let mut surface = surface(FakeMedia::new(1440.0, 30.0));
        surface.skip_intro();
        assert_eq!(surface.state().current_time, 115.0);

        let mut store = MemoryStore::new();
        store.set(INTRO_SKIP_KEY, json!(90)).unwrap();
        let mut surface = surface_with(FakeMedia::new(1440.0, 30.0), Box::new(store));
        surface.skip_intro();
        assert_eq!(surface.media().seeks, vec![120.0]);
    }

    #[test]
    fn each_key_applies_one_action() {
        let mut surface = surface(FakeMedia::new(120.0, 60.0));
        surface.set_volume(0.5);

        surface.handle_key(KeyStroke::new(Key::ArrowLeft));
        assert_eq!(surface.state().current_time, 55.0);
        assert_eq!(surface.state().volume, 0.5);
        assert!(!surface.state().paused);

        surface.handle_key(KeyStroke::new(Key::ArrowRight));
        assert_eq!(surface.state().current_time, 60.0);

        surface.handle_key(KeyStroke::new(Key::ArrowUp));
        assert!((surface.state().volume - 0.6).abs() < 1e-9);
        assert_eq!(surface.media().seeks.len(), 2);

        surface.handle_key(KeyStroke::new(Key::ArrowDown));
        assert!((surface.state().volume - 0.5).abs() < 1e-9);

        surface.handle_key(KeyStroke::new(Key::Space));
        assert!(surface.state().paused);
        assert_eq!(surface.media().seeks.len(), 2);
        assert!(!surface.is_fullscreen());

        surface.handle_key(KeyStroke::new(Key::Fullscreen));
        assert!(surface.is_fullscreen());
        assert!(surface.state().paused);
    }

    #[test]
    fn composing_and_hidden_keys_are_ignored() {
        let mut surface = surface(FakeMedia::new(120.0, 60.0));
        assert!(!surface.handle_key(KeyStroke::composing(Key::Space)));
        assert!(!surface.state().paused);

        surface.exit();
        assert!(!surface.handle_key(KeyStroke::new(Key::ArrowRight)));
        assert!(surface.media().seeks.is_empty());

        surface.show();
        assert!(surface.handle_key(KeyStroke::new(Key::ArrowRight)));
    }

    #[test]
    fn volume_button_toggles_mute() {
        let mut surface = surface(FakeMedia::new(120.0, 0.0));
        surface.toggle_volume();
        assert!(surface.state().controls_view().muted);

        surface.toggle_volume();
        assert_eq!(surface.state().volume, UNMUTED_VOLUME);

        surface.set_volume(0.0);
        assert!(surface.state().is_muted());
    }

    #[test]
    fn speed_choice_closes_menu() {
        let mut surface = surface(FakeMedia::new(120.0, 0.0));
        surface.toggle_speed_menu();
        assert!(surface.state().speed_menu_open);

        let index = surface
            .speed_options()
            .iter()
            .position(|rate| *rate == 1.5)
            .unwrap();
        surface.select_speed(index);
        assert_eq!(surface.state().playback_rate, 1.5);
        assert!(!surface.state().speed_menu_open);

        surface.select_speed(99);
        assert_eq!(surface.state().playback_rate, 1.5);
    }

    #[test]
    fn exit_pauses_and_leaves_fullscreen() {
        let mut surface = surface(FakeMedia::new(120.0, 0.0));
        surface.toggle_fullscreen();
        assert!(surface.state().fullscreen);

        surface.exit();
        assert!(!surface.is_visible());
        assert!(!surface.state().fullscreen);
        assert!(surface.state().paused);
    }

    #[test]
    fn buffering_when_playing_past_ranges() {
        let mut media = FakeMedia::new(120.0, 30.0);
        media.ranges = vec![0.0..30.0];
        let mut surface = surface(media);
        assert!(surface.state().buffering);

        surface.media_mut().ranges = vec![0.0..40.0];
        surface.handle_media_event(Event::Progress);
        assert!(!surface.state().buffering);
    }

    #[test]
    fn controls_hide_after_inactivity() {
        let mut surface = surface(FakeMedia::new(120.0, 0.0));
        let start = Instant::now();
        assert!(!surface.controls_visible(start));

        surface.note_activity(start);
        assert!(surface.controls_visible(start + Duration::from_millis(1000)));
        assert!(!surface.controls_visible(start + Duration::from_millis(1600)));

        surface.pointer_down(10.0);
        assert!(surface.controls_visible(start + Duration::from_secs(60)));
    }
}
