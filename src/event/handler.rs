//! Event stream and key bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::warn;

use super::{poll_terminal, Event};

/// What a key press asks the application to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Exit the application
    Quit,
    /// Stop or resume applying samples
    TogglePause,
    /// Clear chart history
    Reset,
    /// Show or hide the key hints
    ToggleHelp,
    /// Key has no binding
    None,
}

impl Action {
    /// Maps a key press to its action.
    pub fn from_key(key: KeyEvent) -> Self {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('d')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                Action::Quit
            }
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('p') | KeyCode::Char(' ') => Action::TogglePause,
            KeyCode::Char('r') => Action::Reset,
            KeyCode::F(1) | KeyCode::Char('?') => Action::ToggleHelp,
            _ => Action::None,
        }
    }
}

/// Stream of terminal events fed by a polling task.
pub struct EventHandler {
    event_rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Spawns the polling task. It stops once the handler is dropped.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::task::spawn_blocking(move || {
            loop {
                match poll_terminal(tick_rate) {
                    Ok(event) => {
                        if tx.send(event).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "terminal event poll failed");
                        std::thread::sleep(Duration::from_millis(10));
                    }
                }
            }
        });

        Self { event_rx: rx }
    }

    fn poll_event(&mut self, cx: &mut Context<'_>) -> Poll<Option<Event>> {
        Pin::new(&mut self.event_rx).poll_recv(cx)
    }
}

impl Stream for EventHandler {
    type Item = Event;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.poll_event(cx)
    }
}
