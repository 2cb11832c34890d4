//! Simulated bandwidth measurement.
//!
//! Produces a bounded random walk per direction so the chart has something
//! plausible to draw without touching real interfaces.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::task::JoinHandle;
use tokio::time::{self, Duration};
use tracing::debug;

use super::feed::{BandwidthSample, SampleSender};
use super::DEFAULT_SAMPLE_INTERVAL;

/// Largest step of the walk, as a fraction of the peak.
const MAX_STEP: f64 = 0.15;

/// Demo measurement source.
pub struct BandwidthMonitor {
    interval: Duration,
    peak: f64,
    rng: StdRng,
    last: BandwidthSample,
}

impl BandwidthMonitor {
    /// Creates a monitor whose samples stay within `0..=peak`.
    pub fn new(interval: Duration, peak: f64) -> Self {
        Self::with_rng(interval, peak, StdRng::from_entropy())
    }

    /// Deterministic variant for tests and reproducible demos.
    pub fn with_seed(interval: Duration, peak: f64, seed: u64) -> Self {
        Self::with_rng(interval, peak, StdRng::seed_from_u64(seed))
    }

    fn with_rng(interval: Duration, peak: f64, rng: StdRng) -> Self {
        let peak = peak.max(1.0);
        Self {
            interval,
            peak,
            rng,
            last: BandwidthSample {
                upload: peak * 0.2,
                download: peak * 0.5,
            },
        }
    }

    /// Advances the walk by one tick.
    pub fn next_sample(&mut self) -> BandwidthSample {
        let step = self.peak * MAX_STEP;
        let upload = self.last.upload + self.rng.gen_range(-step..=step);
        let download = self.last.download + self.rng.gen_range(-step..=step);

        self.last = BandwidthSample {
            upload: upload.clamp(0.0, self.peak),
            download: download.clamp(0.0, self.peak),
        };
        self.last
    }

    /// Runs the monitor on a tokio task until the feed closes.
    pub fn spawn(mut self, sender: SampleSender) -> JoinHandle<()> {
        tokio::spawn(async move {
            debug!(interval_ms = self.interval.as_millis() as u64, "bandwidth monitor started");
            let mut ticker = time::interval(self.interval);

            loop {
                ticker.tick().await;
                let sample = self.next_sample();
                if sender.send(sample).await.is_err() {
                    break; // display side is gone
                }
            }

            debug!("bandwidth monitor stopped");
        })
    }
}

impl Default for BandwidthMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_INTERVAL, 100.0)
    }
}
