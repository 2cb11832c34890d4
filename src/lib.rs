//! Bandwidth chart library
//!
//! Rolling upload/download sample buffers that feed a line chart, plus the
//! terminal front end that drives them.

pub mod app;
pub mod error;
pub mod event;
pub mod logging;
pub mod monitor;
pub mod state;
pub mod ui;

pub use error::{ChartError, Result};
pub use state::{Direction, SampleSeriesBuffer, SeriesSink};
