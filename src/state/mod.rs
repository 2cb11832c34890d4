//! Chart data state.
//!
//! Holds the bounded upload/download series and the sink abstraction
//! the chart reads them through.

mod chart_data;
mod series;
mod sink;

pub use chart_data::SampleSeriesBuffer;
pub use series::{
    DataPoint, MaxPolicy, Sample, SampleSeries, SeriesConfig, DEFAULT_HISTORY_SIZE,
    MAX_HISTORY_SIZE,
};
pub use sink::{Detached, SeriesHandle, SeriesSink, SharedSeries};

use std::fmt;

/// Traffic direction a series belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Upload,
    Download,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Upload, Direction::Download];

    pub fn label(self) -> &'static str {
        match self {
            Direction::Upload => "upload",
            Direction::Download => "download",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether incoming samples are applied to the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Temporality {
    /// Live monitoring.
    Live,
    /// Samples are held in the feed until resumed.
    Paused,
}

impl Temporality {
    pub fn toggled(self) -> Self {
        match self {
            Temporality::Live => Temporality::Paused,
            Temporality::Paused => Temporality::Live,
        }
    }
}

/// Application state.
pub struct AppState {
    /// Upload/download sample buffers.
    pub chart: SampleSeriesBuffer,
    /// Monitoring state.
    pub temporality: Temporality,
    /// Samples applied since start or the last reset.
    pub samples_applied: u64,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(chart: SampleSeriesBuffer) -> Self {
        Self {
            chart,
            temporality: Temporality::Live,
            samples_applied: 0,
        }
    }

    pub fn is_live(&self) -> bool {
        self.temporality == Temporality::Live
    }

    pub fn toggle_pause(&mut self) {
        self.temporality = self.temporality.toggled();
    }

    /// Clears chart history.
    pub fn reset(&mut self) {
        self.chart.reset();
        self.samples_applied = 0;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SampleSeriesBuffer::new())
    }
}
