use std::time::Instant;

use flume::Receiver;
use ratatui::{Frame, layout::Rect};
use tracing::{info, warn};

use crate::{
    config::PlayerConfig,
    event::events::Event,
    media::PlaybackClock,
    player::{PlaybackControlSurface, PointerCapture},
    prefs::{JsonFileStore, MemoryStore, PreferenceStore, Preferences},
    ui::{
        display::TerminalDisplay,
        input::ClickTracker,
        layout::PlayerLayout,
        message::AppMessage,
        tui::{TerminalEvent, Tui},
        util::handler::EventHandler,
    },
};

pub struct App {
    pub event_rx: Receiver<Event>,
    pub surface: PlaybackControlSurface<PlaybackClock>,
    pub capture: PointerCapture,
    pub config: PlayerConfig,
    pub area: Rect,
    pub clicks: ClickTracker,
    /// Whether the last pointer position was over the timeline.
    pub timeline_hovered: bool,
    pub last_tick: Instant,
    pub has_focus: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: PlayerConfig) -> color_eyre::Result<Self> {
        let store: Box<dyn PreferenceStore> = match JsonFileStore::open_default() {
            Ok(store) => {
                info!("preferences at {}", store.path().display());
                Box::new(store)
            }
            Err(e) => {
                warn!("preferences will not be saved: {e}");
                Box::new(MemoryStore::new())
            }
        };

        Self::with_store(config, store)
    }

    pub fn with_store(
        config: PlayerConfig,
        store: Box<dyn PreferenceStore>,
    ) -> color_eyre::Result<Self> {
        let (event_tx, event_rx) = flume::unbounded();

        let mut clock = PlaybackClock::new(event_tx, config.download_rate);
        clock.load(config.episode.clone())?;

        let prefs = Preferences::new(store).with_default_intro_skip(config.default_intro_skip_secs);
        let capture = PointerCapture::new();
        let surface = PlaybackControlSurface::new(
            clock,
            prefs,
            Box::new(TerminalDisplay::new()),
            capture.clone(),
            &config,
        );

        let now = Instant::now();
        let mut app = Self {
            event_rx,
            surface,
            capture,
            config,
            area: Rect::default(),
            clicks: ClickTracker::default(),
            timeline_hovered: false,
            last_tick: now,
            has_focus: true,
            should_quit: false,
        };
        app.surface.note_activity(now);
        Ok(app)
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = Tui::new(self.config.tick_rate)?;
        tui.enter()?;

        EventHandler::handle_event(self, TerminalEvent::Init, &mut tui)?;
        while !self.should_quit {
            tui.draw(|f| {
                self.ui(f);
            })?;

            EventHandler::handle_events(self, &mut tui).await?;
        }

        self.surface.unmount();
        tui.exit()?;
        Ok(())
    }

    fn ui(&mut self, frame: &mut Frame) {
        self.resize(frame.area());
        if self.has_focus {
            frame.render_widget(&*self, frame.area());
        }
    }

    pub fn title(&self) -> &str {
        self.surface
            .media()
            .source()
            .map_or("Nothing loaded", |source| source.title.as_str())
    }

    pub fn layout_for(&self, area: Rect) -> PlayerLayout {
        PlayerLayout::new(
            area,
            self.surface.is_fullscreen(),
            self.surface.speed_options().len(),
        )
    }

    pub fn layout(&self) -> PlayerLayout {
        self.layout_for(self.area)
    }

    /// Keeps hit-testing and seek mapping in step with what is drawn.
    pub fn resize(&mut self, area: Rect) {
        self.area = area;
        let timeline = self.layout().timeline_geometry();
        self.surface.set_timeline(timeline);
    }

    pub fn controls_visible(&self) -> bool {
        self.surface.controls_visible(Instant::now())
    }

    pub fn update(&mut self, msg: AppMessage) {
        let visible = self.surface.is_visible();

        match msg {
            AppMessage::Quit => self.should_quit = true,
            AppMessage::OpenPlayer if !visible => self.surface.show(),
            AppMessage::ClosePlayer if visible => {
                if self.surface.is_fullscreen() {
                    self.surface.toggle_fullscreen();
                } else {
                    self.surface.exit();
                }
            }
            AppMessage::ToggleDurationMode if visible => self.surface.toggle_duration_mode(),
            AppMessage::SkipIntro if visible => self.surface.skip_intro(),
            AppMessage::ToggleMute if visible => self.surface.toggle_volume(),
            AppMessage::ToggleSpeedMenu if visible => self.surface.toggle_speed_menu(),
            AppMessage::Player(stroke) => {
                self.surface.handle_key(stroke);
            }
            _ => return,
        }

        // Fullscreen changes move the timeline.
        self.resize(self.area);
        self.surface.note_activity(Instant::now());
    }
}
