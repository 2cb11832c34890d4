//! Terminal events for the bandwidth chart.
//!
//! Events are polled on a blocking task and surfaced as a stream, with a
//! tick whenever nothing arrives within the tick rate.

pub mod handler;

pub use handler::{Action, EventHandler};

use std::time::Duration;
use eyre::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

/// Default event polling interval.
pub const DEFAULT_TICK_RATE: Duration = Duration::from_millis(250);

/// Application events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Keyboard input event
    Key(KeyEvent),
    /// Terminal resize event
    Resize(u16, u16),
    /// Nothing relevant happened within one tick
    Tick,
}

impl From<CrosstermEvent> for Event {
    fn from(event: CrosstermEvent) -> Self {
        match event {
            // Some platforms report releases and repeats too.
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Event::Key(key),
            CrosstermEvent::Resize(width, height) => Event::Resize(width, height),
            _ => Event::Tick,
        }
    }
}

/// Waits up to `tick_rate` for a terminal event.
pub fn poll_terminal(tick_rate: Duration) -> Result<Event> {
    if event::poll(tick_rate)? {
        Ok(event::read()?.into())
    } else {
        Ok(Event::Tick)
    }
}
