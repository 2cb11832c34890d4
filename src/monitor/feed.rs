//! Channel carrying samples from a measurement task to the display thread.

use eyre::{eyre, Result};
use tokio::sync::mpsc;
use tracing::trace;

use super::FEED_CAPACITY;
use crate::state::SampleSeriesBuffer;

/// One measurement tick: utilization in both directions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandwidthSample {
    pub upload: f64,
    pub download: f64,
}

/// Creates a connected sender/feed pair.
pub fn sample_feed() -> (SampleSender, SampleFeed) {
    let (tx, rx) = mpsc::channel(FEED_CAPACITY);
    (SampleSender { tx }, SampleFeed { rx })
}

/// Producer half, owned by the measurement task.
#[derive(Debug, Clone)]
pub struct SampleSender {
    tx: mpsc::Sender<BandwidthSample>,
}

impl SampleSender {
    /// Sends a sample, waiting while the feed is full.
    pub async fn send(&self, sample: BandwidthSample) -> Result<()> {
        self.tx
            .send(sample)
            .await
            .map_err(|_| eyre!("sample feed closed"))
    }

    /// Sends without waiting. Fails when the feed is full or closed.
    pub fn try_send(&self, sample: BandwidthSample) -> Result<()> {
        self.tx
            .try_send(sample)
            .map_err(|e| eyre!("could not queue sample: {e}"))
    }

    /// True once the feed half has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consumer half, owned by the display thread.
#[derive(Debug)]
pub struct SampleFeed {
    rx: mpsc::Receiver<BandwidthSample>,
}

impl SampleFeed {
    /// Applies every queued sample to `chart` in arrival order and returns
    /// how many were applied. Never waits.
    pub fn drain_into(&mut self, chart: &mut SampleSeriesBuffer) -> usize {
        let mut applied = 0;
        while let Ok(sample) = self.rx.try_recv() {
            chart.add_upload_sample(sample.upload);
            chart.add_download_sample(sample.download);
            applied += 1;
        }

        if applied > 0 {
            trace!(applied, "drained sample feed");
        }
        applied
    }

    /// Waits for the next sample. `None` once every sender is gone.
    pub async fn recv(&mut self) -> Option<BandwidthSample> {
        self.rx.recv().await
    }
}
