//! Application state and logic.
//!
//! Wires the simulated monitor, the sample feed, the chart buffers and the
//! UI together and runs the draw/event loop.

use std::path::{Path, PathBuf};
use std::time::Duration;

use color_eyre::Result;
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::Terminal;
use serde::Deserialize;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace};

use crate::error::ChartError;
use crate::event::{Action, Event, EventHandler, DEFAULT_TICK_RATE};
use crate::monitor::{sample_feed, BandwidthMonitor, SampleFeed, DEFAULT_SAMPLE_INTERVAL};
use crate::state::{AppState, SampleSeriesBuffer, SeriesConfig};
use crate::ui::Ui;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Redraw interval when no input arrives.
    pub tick_rate_ms: u64,
    /// Interval between simulated measurements.
    pub sample_interval_ms: u64,
    /// Window size and maximum policy of both series.
    pub series: SeriesConfig,
    /// Upper bound of simulated utilization.
    pub demo_peak: f64,
    /// Fixed seed for the simulated monitor.
    pub seed: Option<u64>,
    /// Where logs are written. Defaults to a file in the temp directory.
    pub log_file: Option<PathBuf>,
}

/// Log file name used when `log_file` is unset.
pub const DEFAULT_LOG_FILE: &str = "bandwidth-chart.log";

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: DEFAULT_TICK_RATE.as_millis() as u64,
            sample_interval_ms: DEFAULT_SAMPLE_INTERVAL.as_millis() as u64,
            series: SeriesConfig::default(),
            demo_peak: 100.0,
            seed: None,
            log_file: None,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a JSON config. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ChartError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ChartError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ChartError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading config");
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ChartError> {
        if self.tick_rate_ms == 0 {
            return Err(ChartError::Config("tick_rate_ms must be greater than zero".into()));
        }
        if self.sample_interval_ms == 0 {
            return Err(ChartError::Config(
                "sample_interval_ms must be greater than zero".into(),
            ));
        }
        if !self.demo_peak.is_finite() || self.demo_peak <= 0.0 {
            return Err(ChartError::Config(format!(
                "demo_peak must be a positive number, got {}",
                self.demo_peak
            )));
        }
        self.series.validate()
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms)
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_FILE))
    }
}

/// Main application.
pub struct App {
    /// Application state
    state: AppState,
    /// Application configuration
    config: AppConfig,
    /// Receiving end of the monitor's samples
    feed: SampleFeed,
    /// Simulated monitor task
    monitor: JoinHandle<()>,
    /// Current view controller
    ui: Ui,
    /// Should the application exit?
    should_quit: bool,
}

impl App {
    /// Creates the application and starts the monitor. Needs a tokio runtime.
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let chart = SampleSeriesBuffer::from_config(&config.series)?;

        let monitor = match config.seed {
            Some(seed) => {
                BandwidthMonitor::with_seed(config.sample_interval(), config.demo_peak, seed)
            }
            None => BandwidthMonitor::new(config.sample_interval(), config.demo_peak),
        };
        let (sender, feed) = sample_feed();
        let monitor = monitor.spawn(sender);

        info!(
            capacity = config.series.capacity,
            interval_ms = config.sample_interval_ms,
            "bandwidth chart started"
        );

        Ok(Self {
            state: AppState::new(chart),
            ui: Ui::new(config.series.capacity),
            config,
            feed,
            monitor,
            should_quit: false,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn ui(&self) -> &Ui {
        &self.ui
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Runs the application main loop.
    pub async fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> Result<()> {
        let mut events = EventHandler::new(self.config.tick_rate());

        while !self.should_quit {
            self.update()?;
            terminal.draw(|frame| self.ui.render(frame, &self.state))?;

            match events.next().await {
                Some(event) => self.handle_event(event),
                None => break,
            }
        }

        Ok(())
    }

    /// Runs the application main loop with Crossterm backend.
    pub async fn run_with_crossterm(&mut self) -> Result<()> {
        use ratatui::backend::CrosstermBackend;

        let mut terminal = Terminal::new(CrosstermBackend::new(std::io::stdout()))?;
        self.run(&mut terminal).await
    }

    /// Applies queued samples (unless paused) and refreshes the chart.
    /// Returns the number of samples applied.
    pub fn update(&mut self) -> Result<usize> {
        let applied = if self.state.is_live() {
            self.feed.drain_into(&mut self.state.chart)
        } else {
            0
        };
        self.state.samples_applied += applied as u64;

        self.ui.refresh(&self.state)?;
        Ok(applied)
    }

    /// Handles input and other events.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.apply(Action::from_key(key)),
            Event::Resize(width, height) => trace!(width, height, "resize"),
            Event::Tick => {}
        }
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::TogglePause => {
                self.state.toggle_pause();
                debug!(temporality = ?self.state.temporality, "pause toggled");
            }
            Action::Reset => self.state.reset(),
            Action::ToggleHelp => self.ui.toggle_help(),
            Action::None => {}
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.monitor.abort();
    }
}
