//! Sample delivery for the bandwidth chart.
//!
//! Measurements are produced on a background task and handed to the display
//! thread through a bounded channel. The display side drains the channel
//! into its [`SampleSeriesBuffer`](crate::state::SampleSeriesBuffer) once per
//! frame, so the buffers themselves never need a lock.
//!
//! - [`feed`] owns the channel halves
//! - [`bandwidth`] is a simulated measurement source used by the demo

pub mod bandwidth;
pub mod feed;

pub use bandwidth::BandwidthMonitor;
pub use feed::{sample_feed, BandwidthSample, SampleFeed, SampleSender};

use std::time::Duration;

/// Default interval between two measurements.
pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// Samples the channel holds before the producer waits for the display.
pub const FEED_CAPACITY: usize = 100;
