//! Upload/download sample buffers backing the bandwidth chart.

use tracing::{debug, trace, warn};

use super::series::{MaxPolicy, SampleSeries, SeriesConfig};
use super::sink::SeriesSink;
use super::Direction;
use crate::error::{ChartError, Result};

/// Two independent rolling series, one per traffic direction.
#[derive(Debug, Clone, Default)]
pub struct SampleSeriesBuffer {
    upload: SampleSeries,
    download: SampleSeries,
}

impl SampleSeriesBuffer {
    /// Buffers holding the default history size with a sticky maximum.
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffers holding `capacity` samples per direction with a sticky maximum.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::from_config(&SeriesConfig {
            capacity,
            max_policy: MaxPolicy::Sticky,
        })
    }

    /// Buffers sized and configured from `config`. The capacity is validated
    /// before anything is allocated.
    pub fn from_config(config: &SeriesConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            capacity = config.capacity,
            policy = ?config.max_policy,
            "creating sample buffers"
        );

        Ok(Self {
            upload: SampleSeries::new(config.capacity, config.max_policy)?,
            download: SampleSeries::new(config.capacity, config.max_policy)?,
        })
    }

    /// Records an upload sample.
    pub fn add_upload_sample(&mut self, value: f64) {
        self.add_sample(Direction::Upload, value);
    }

    /// Records a download sample.
    pub fn add_download_sample(&mut self, value: f64) {
        self.add_sample(Direction::Download, value);
    }

    /// Appends `value` to the series for `direction`, evicting its oldest
    /// sample when full.
    pub fn add_sample(&mut self, direction: Direction, value: f64) {
        trace!(%direction, value, "sample");
        self.series_mut(direction).push(value);
    }

    /// Pushes the upload points into `sink`, replacing what it held.
    pub fn update_upload_series<S>(&self, sink: &mut S) -> Result<()>
    where
        S: SeriesSink + ?Sized,
    {
        self.update_series(Direction::Upload, sink)
    }

    /// Pushes the download points into `sink`, replacing what it held.
    pub fn update_download_series<S>(&self, sink: &mut S) -> Result<()>
    where
        S: SeriesSink + ?Sized,
    {
        self.update_series(Direction::Download, sink)
    }

    /// Hands the window for `direction` to `sink` as a single slice.
    pub fn update_series<S>(&self, direction: Direction, sink: &mut S) -> Result<()>
    where
        S: SeriesSink + ?Sized,
    {
        let points = self.series(direction).as_points();
        trace!(%direction, points = points.len(), "updating sink");

        sink.replace_points(points).map_err(|_| {
            warn!(%direction, "sink detached");
            ChartError::SinkDetached { direction }
        })
    }

    /// Running maximum of the upload series.
    pub fn highest_upload_sample(&self) -> i64 {
        self.upload.highest()
    }

    /// Running maximum of the download series.
    pub fn highest_download_sample(&self) -> i64 {
        self.download.highest()
    }

    /// The greater of the two running maxima.
    pub fn highest_sample(&self) -> i64 {
        self.highest_upload_sample()
            .max(self.highest_download_sample())
    }

    /// Running maximum for `direction`.
    pub fn highest(&self, direction: Direction) -> i64 {
        self.series(direction).highest()
    }

    /// The series for `direction`.
    pub fn series(&self, direction: Direction) -> &SampleSeries {
        match direction {
            Direction::Upload => &self.upload,
            Direction::Download => &self.download,
        }
    }

    /// The upload series.
    pub fn upload(&self) -> &SampleSeries {
        &self.upload
    }

    /// The download series.
    pub fn download(&self) -> &SampleSeries {
        &self.download
    }

    /// Samples kept per direction.
    pub fn capacity(&self) -> usize {
        self.upload.capacity()
    }

    /// Empties both series and resets their maxima.
    pub fn reset(&mut self) {
        debug!("resetting sample buffers");
        self.upload.clear();
        self.download.clear();
    }

    fn series_mut(&mut self, direction: Direction) -> &mut SampleSeries {
        match direction {
            Direction::Upload => &mut self.upload,
            Direction::Download => &mut self.download,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::sink::{Detached, MockSeriesSink, SharedSeries};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn upload_window_scenario() {
        let mut data = SampleSeriesBuffer::with_capacity(3).unwrap();
        for v in [10.0, 20.0, 5.0, 30.0] {
            data.add_upload_sample(v);
        }

        let mut sink = Vec::new();
        data.update_upload_series(&mut sink).unwrap();

        assert_eq!(sink, vec![(2.0, 20.0), (3.0, 5.0), (4.0, 30.0)]);
        assert_eq!(data.highest_upload_sample(), 30);
    }

    #[test]
    fn highest_sample_spans_both_directions() {
        let mut data = SampleSeriesBuffer::new();
        data.add_download_sample(40.0);
        data.add_upload_sample(10.0);

        assert_eq!(data.highest_sample(), 40);
        assert_eq!(data.highest_download_sample(), 40);
        assert_eq!(data.highest_upload_sample(), 10);
    }

    #[rstest]
    #[case(&[], &[], 0)]
    #[case(&[3.0, 7.5], &[], 7)]
    #[case(&[1.0], &[99.9, 2.0], 99)]
    #[case(&[-4.0], &[-8.0], 0)]
    fn highest_sample_is_max_of_both(
        #[case] upload: &[f64],
        #[case] download: &[f64],
        #[case] expected: i64,
    ) {
        let mut data = SampleSeriesBuffer::new();
        upload.iter().for_each(|v| data.add_upload_sample(*v));
        download.iter().for_each(|v| data.add_download_sample(*v));

        assert_eq!(data.highest_sample(), expected);
        assert_eq!(
            data.highest_sample(),
            data.highest_upload_sample().max(data.highest_download_sample())
        );
    }

    #[test]
    fn negative_sample_is_accepted() {
        let mut data = SampleSeriesBuffer::new();
        data.add_upload_sample(12.0);
        data.add_upload_sample(-5.0);

        assert_eq!(data.upload().len(), 2);
        assert_eq!(data.highest_upload_sample(), 12);
    }

    #[test]
    fn directions_are_independent() {
        let mut data = SampleSeriesBuffer::with_capacity(2).unwrap();
        data.add_upload_sample(1.0);
        data.add_upload_sample(2.0);
        data.add_upload_sample(3.0);
        data.add_download_sample(7.0);

        let mut upload = Vec::new();
        let mut download = Vec::new();
        data.update_upload_series(&mut upload).unwrap();
        data.update_download_series(&mut download).unwrap();

        assert_eq!(upload, vec![(2.0, 2.0), (3.0, 3.0)]);
        assert_eq!(download, vec![(1.0, 7.0)]);
    }

    #[test]
    fn update_replaces_sink_in_one_call() {
        let mut data = SampleSeriesBuffer::new();
        data.add_download_sample(4.0);
        data.add_download_sample(6.0);

        let mut sink = MockSeriesSink::new();
        sink.expect_replace_points()
            .withf(|points| *points == [(1.0, 4.0), (2.0, 6.0)][..])
            .times(1)
            .returning(|_| Ok(()));

        data.update_download_series(&mut sink).unwrap();
    }

    #[test]
    fn update_does_not_change_the_buffer() {
        let mut data = SampleSeriesBuffer::new();
        data.add_upload_sample(4.0);

        let mut first = Vec::new();
        let mut second = Vec::new();
        data.update_upload_series(&mut first).unwrap();
        data.update_upload_series(&mut second).unwrap();

        assert_eq!(first, second);
        assert_eq!(data.upload().len(), 1);
    }

    #[test]
    fn detached_sink_fails_fast() {
        let mut data = SampleSeriesBuffer::new();
        data.add_upload_sample(1.0);

        let shared = SharedSeries::new();
        let mut handle = shared.handle();
        drop(shared);

        let err = data.update_upload_series(&mut handle).unwrap_err();
        assert!(matches!(
            err,
            ChartError::SinkDetached {
                direction: Direction::Upload
            }
        ));

        let mut refusing = MockSeriesSink::new();
        refusing
            .expect_replace_points()
            .returning(|_| Err(Detached));
        assert!(data.update_download_series(&mut refusing).is_err());
    }

    #[test]
    fn reset_clears_both_directions() {
        let mut data = SampleSeriesBuffer::new();
        data.add_upload_sample(50.0);
        data.add_download_sample(70.0);
        data.reset();

        assert!(data.upload().is_empty());
        assert!(data.download().is_empty());
        assert_eq!(data.highest_sample(), 0);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(matches!(
            SampleSeriesBuffer::with_capacity(0),
            Err(ChartError::InvalidCapacity)
        ));
    }

    #[rstest]
    #[case(crate::state::MAX_HISTORY_SIZE + 1)]
    #[case(usize::MAX)]
    fn oversized_capacity_is_an_error(#[case] capacity: usize) {
        assert!(matches!(
            SampleSeriesBuffer::with_capacity(capacity),
            Err(ChartError::CapacityTooLarge { .. })
        ));
        let config = SeriesConfig {
            capacity,
            max_policy: MaxPolicy::Windowed,
        };
        assert!(SampleSeriesBuffer::from_config(&config).is_err());
    }

    /// Remembers where the slice it was handed lives.
    #[derive(Default)]
    struct AddressSink {
        address: Option<*const (f64, f64)>,
        len: usize,
    }

    impl SeriesSink for AddressSink {
        fn replace_points(&mut self, points: &[(f64, f64)]) -> std::result::Result<(), Detached> {
            self.address = Some(points.as_ptr());
            self.len = points.len();
            Ok(())
        }
    }

    #[test]
    fn sink_borrows_the_window_without_copying() {
        let mut data = SampleSeriesBuffer::with_capacity(4).unwrap();
        let mut sink = AddressSink::default();

        for v in 0..50 {
            data.add_upload_sample(v as f64);
            data.update_upload_series(&mut sink).unwrap();

            let window = data.upload().as_points();
            assert_eq!(sink.address, Some(window.as_ptr()));
            assert_eq!(sink.len, window.len());
        }
        assert_eq!(
            data.upload().as_points(),
            &[(47.0, 46.0), (48.0, 47.0), (49.0, 48.0), (50.0, 49.0)]
        );
    }

    #[test]
    fn windowed_config_reaches_both_series() {
        let data = SampleSeriesBuffer::from_config(&SeriesConfig {
            capacity: 8,
            max_policy: MaxPolicy::Windowed,
        })
        .unwrap();

        assert_eq!(data.capacity(), 8);
        assert_eq!(data.upload().policy(), MaxPolicy::Windowed);
        assert_eq!(data.download().policy(), MaxPolicy::Windowed);
    }
}
