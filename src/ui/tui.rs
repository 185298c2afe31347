use std::{
    ops::{Deref, DerefMut},
    time::Duration,
};

use color_eyre::eyre::Result;

use crossterm::event::EventStream;
use flume::{Receiver, Sender};
use futures::{FutureExt, StreamExt};
use ratatui::crossterm::{
    cursor,
    event::{
        DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent,
    },
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend as Backend, crossterm};
use tracing::debug;

#[derive(Clone, Debug)]
pub enum TerminalEvent {
    Init,
    Tick,
    FocusGained,
    FocusLost,
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

pub struct Tui {
    pub terminal: ratatui::Terminal<Backend<std::io::Stdout>>,
    pub event_rx: Receiver<TerminalEvent>,
    pub event_tx: Sender<TerminalEvent>,
    pub tick_rate: Duration,
    task: Option<tokio::task::JoinHandle<()>>,
}

impl Tui {
    pub fn new(tick_rate: Duration) -> Result<Self> {
        let terminal = ratatui::Terminal::new(Backend::new(std::io::stdout()))?;
        let (event_tx, event_rx) = flume::unbounded();

        Ok(Self {
            terminal,
            event_rx,
            event_tx,
            tick_rate,
            task: None,
        })
    }

    pub fn start(&mut self) {
        let event_tx = self.event_tx.clone();
        let tick_rate = self.tick_rate;

        self.task = Some(tokio::spawn(async move {
            let mut reader = EventStream::new();
            let mut tick_interval = tokio::time::interval(tick_rate);
            loop {
                let tick_delay = tick_interval.tick();
                let crossterm_event = reader.next().fuse();

                let event = tokio::select! {
                    _ = tick_delay => Some(TerminalEvent::Tick),
                    Some(Ok(evt)) = crossterm_event => match evt {
                        // Only presses: repeats and releases would double shortcuts.
                        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                            Some(TerminalEvent::Key(key))
                        }
                        CrosstermEvent::Mouse(mouse) => Some(TerminalEvent::Mouse(mouse)),
                        CrosstermEvent::Resize(x, y) => Some(TerminalEvent::Resize(x, y)),
                        CrosstermEvent::FocusLost => Some(TerminalEvent::FocusLost),
                        CrosstermEvent::FocusGained => Some(TerminalEvent::FocusGained),
                        // Pasted text is never a shortcut.
                        _ => None,
                    },
                };

                if let Some(event) = event {
                    if event_tx.send_async(event).await.is_err() {
                        break;
                    }
                }
            }
        }));
    }

    pub fn enter(&mut self) -> Result<()> {
        crossterm::terminal::enable_raw_mode()?;
        crossterm::execute!(
            std::io::stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableFocusChange,
            cursor::Hide
        )?;
        self.start();
        debug!("terminal entered");
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        if crossterm::terminal::is_raw_mode_enabled()? {
            self.flush()?;
            crossterm::execute!(std::io::stdout(), DisableFocusChange, DisableMouseCapture)?;
            Self::restore()?;
        }
        Ok(())
    }

    pub fn restore() -> Result<()> {
        crossterm::execute!(std::io::stdout(), LeaveAlternateScreen, cursor::Show)?;
        crossterm::terminal::disable_raw_mode()?;
        Ok(())
    }

    #[allow(clippy::should_implement_trait)]
    pub async fn next(&self) -> Option<TerminalEvent> {
        self.event_rx.recv_async().await.ok()
    }
}

impl Deref for Tui {
    type Target = ratatui::Terminal<Backend<std::io::Stdout>>;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for Tui {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(e) = self.exit() {
            tracing::error!("Failed to restore terminal: {e}");
        }
    }
}
