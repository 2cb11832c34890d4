//! Bounded sample series.
//!
//! Each series keeps the most recent `capacity` samples in arrival order and
//! tracks the highest value it has seen. The x coordinate of a sample is its
//! arrival index within the series, starting at 1.
//!
//! Points live in a buffer of twice the capacity. New points go on the end
//! and the window is always the trailing `capacity` entries, so it can be
//! lent out as one slice. Once the buffer fills, the stale front half is
//! dropped in a single move, which keeps pushes amortized O(1) with no
//! reallocation after construction.

use serde::Deserialize;

use crate::error::{ChartError, Result};

/// Samples kept per series when nothing else is configured.
pub const DEFAULT_HISTORY_SIZE: usize = 60;

/// Largest accepted series capacity.
pub const MAX_HISTORY_SIZE: usize = 1 << 20;

/// An `(x, y)` point as handed to chart sinks.
pub type DataPoint = (f64, f64);

/// A single utilization measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Arrival index within the series.
    pub index: u64,
    /// Measured utilization.
    pub value: f64,
}

impl Sample {
    /// The sample as a chart point.
    pub fn point(&self) -> DataPoint {
        (self.index as f64, self.value)
    }
}

impl From<DataPoint> for Sample {
    fn from((x, value): DataPoint) -> Self {
        Self {
            index: x as u64,
            value,
        }
    }
}

/// How the running maximum reacts to eviction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaxPolicy {
    /// Only ever grows until an explicit reset.
    #[default]
    Sticky,
    /// Follows the samples still inside the window.
    Windowed,
}

/// Size and maximum policy for a pair of series.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SeriesConfig {
    /// Samples kept per direction, within `1..=MAX_HISTORY_SIZE`.
    pub capacity: usize,
    pub max_policy: MaxPolicy,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_HISTORY_SIZE,
            max_policy: MaxPolicy::Sticky,
        }
    }
}

impl SeriesConfig {
    /// Checks the capacity is within `1..=MAX_HISTORY_SIZE`.
    pub fn validate(&self) -> Result<()> {
        check_capacity(self.capacity)
    }
}

fn check_capacity(capacity: usize) -> Result<()> {
    if capacity == 0 {
        return Err(ChartError::InvalidCapacity);
    }
    if capacity > MAX_HISTORY_SIZE {
        return Err(ChartError::CapacityTooLarge {
            requested: capacity,
            max: MAX_HISTORY_SIZE,
        });
    }
    Ok(())
}

/// Fixed-capacity FIFO of samples plus a running maximum.
#[derive(Debug, Clone)]
pub struct SampleSeries {
    points: Vec<DataPoint>,
    capacity: usize,
    next_index: u64,
    highest: i64,
    policy: MaxPolicy,
}

impl SampleSeries {
    /// Creates an empty series. The capacity must be within
    /// `1..=MAX_HISTORY_SIZE`.
    pub fn new(capacity: usize, policy: MaxPolicy) -> Result<Self> {
        check_capacity(capacity)?;

        Ok(Self {
            points: Vec::with_capacity(capacity * 2),
            capacity,
            next_index: 1,
            highest: 0,
            policy,
        })
    }

    /// Appends a sample, evicting the oldest one once the series is full.
    pub fn push(&mut self, value: f64) {
        let point = (self.next_index as f64, value);
        self.next_index += 1;

        let evicted = if self.len() == self.capacity {
            self.as_points().first().copied()
        } else {
            None
        };

        if self.points.len() == self.capacity * 2 {
            self.points.drain(..self.capacity);
        }
        self.points.push(point);

        // NaN never compares greater, so it can't move the maximum.
        if value > self.highest as f64 {
            self.highest = value as i64;
        } else if let (MaxPolicy::Windowed, Some((_, old))) = (self.policy, evicted) {
            if old as i64 >= self.highest {
                self.highest = self.window_max();
            }
        }
    }

    /// The window as one slice, oldest first.
    pub fn as_points(&self) -> &[DataPoint] {
        let start = self.points.len().saturating_sub(self.capacity);
        &self.points[start..]
    }

    /// Points in insertion order, oldest first.
    pub fn points(&self) -> impl ExactSizeIterator<Item = DataPoint> + '_ {
        self.as_points().iter().copied()
    }

    /// Samples in insertion order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = Sample> + '_ {
        self.points().map(Sample::from)
    }

    /// Most recent sample, if any.
    pub fn latest(&self) -> Option<Sample> {
        self.as_points().last().copied().map(Sample::from)
    }

    /// Running maximum, truncated toward zero. Starts at 0.
    pub fn highest(&self) -> i64 {
        self.highest
    }

    /// Samples currently in the window.
    pub fn len(&self) -> usize {
        self.points.len().min(self.capacity)
    }

    /// True before the first push and after [`clear`](Self::clear).
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Maximum number of samples the window holds.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// How the maximum reacts to eviction.
    pub fn policy(&self) -> MaxPolicy {
        self.policy
    }

    /// Drops every sample and restarts both the index and the maximum.
    pub fn clear(&mut self) {
        self.points.clear();
        self.next_index = 1;
        self.highest = 0;
    }

    fn window_max(&self) -> i64 {
        self.as_points()
            .iter()
            .map(|&(_, value)| value)
            .fold(0.0, f64::max) as i64
    }
}

impl Default for SampleSeries {
    fn default() -> Self {
        Self {
            points: Vec::with_capacity(DEFAULT_HISTORY_SIZE * 2),
            capacity: DEFAULT_HISTORY_SIZE,
            next_index: 1,
            highest: 0,
            policy: MaxPolicy::Sticky,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn series(capacity: usize, policy: MaxPolicy) -> SampleSeries {
        SampleSeries::new(capacity, policy).unwrap()
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(7)]
    #[case(25)]
    fn keeps_only_the_most_recent_samples(#[case] overflow: usize) {
        let capacity = 5;
        let mut s = series(capacity, MaxPolicy::Sticky);
        let total = capacity + overflow;
        for i in 0..total {
            s.push(i as f64);
        }

        assert_eq!(s.len(), capacity);
        let expected: Vec<DataPoint> = (overflow..total)
            .map(|i| ((i + 1) as f64, i as f64))
            .collect();
        assert_eq!(s.points().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn evicts_oldest_first() {
        let mut s = series(3, MaxPolicy::Sticky);
        for v in [10.0, 20.0, 5.0, 30.0] {
            s.push(v);
        }

        assert_eq!(
            s.points().collect::<Vec<_>>(),
            vec![(2.0, 20.0), (3.0, 5.0), (4.0, 30.0)]
        );
        assert_eq!(s.highest(), 30);
    }

    #[test]
    fn sticky_maximum_survives_eviction() {
        let mut s = series(2, MaxPolicy::Sticky);
        s.push(90.0);
        let mut previous = s.highest();
        for v in [1.0, 2.0, 3.0, 4.0] {
            s.push(v);
            assert!(s.highest() >= previous);
            previous = s.highest();
        }
        assert_eq!(s.highest(), 90);
        assert!(s.iter().all(|sample| sample.value < 90.0));
    }

    #[test]
    fn windowed_maximum_follows_the_window() {
        let mut s = series(2, MaxPolicy::Windowed);
        s.push(90.0);
        s.push(10.0);
        assert_eq!(s.highest(), 90);

        s.push(20.0);
        assert_eq!(s.highest(), 20);

        s.push(15.0);
        assert_eq!(s.highest(), 20);

        s.push(5.0);
        assert_eq!(s.highest(), 15);
    }

    #[test]
    fn windowed_maximum_floors_at_zero() {
        let mut s = series(1, MaxPolicy::Windowed);
        s.push(12.0);
        s.push(-3.0);
        assert_eq!(s.highest(), 0);
    }

    #[test]
    fn negative_samples_are_kept_without_moving_the_maximum() {
        let mut s = series(4, MaxPolicy::Sticky);
        s.push(8.0);
        s.push(-5.0);

        assert_eq!(s.len(), 2);
        assert_eq!(s.latest().map(|l| l.value), Some(-5.0));
        assert_eq!(s.highest(), 8);
    }

    #[test]
    fn maximum_is_truncated() {
        let mut s = series(4, MaxPolicy::Sticky);
        s.push(41.9);
        assert_eq!(s.highest(), 41);
    }

    #[test]
    fn nan_is_stored_but_ignored_by_the_maximum() {
        let mut s = series(4, MaxPolicy::Sticky);
        s.push(3.0);
        s.push(f64::NAN);
        assert_eq!(s.len(), 2);
        assert_eq!(s.highest(), 3);
    }

    #[test]
    fn clear_restarts_indices() {
        let mut s = series(3, MaxPolicy::Sticky);
        s.push(50.0);
        s.push(60.0);
        s.clear();

        assert!(s.is_empty());
        assert_eq!(s.highest(), 0);
        s.push(1.0);
        assert_eq!(s.latest().map(|l| l.index), Some(1));
    }

    #[test]
    fn window_stays_contiguous_across_compaction() {
        let mut s = series(3, MaxPolicy::Windowed);
        for v in 1..=20 {
            s.push(v as f64);
            assert!(s.as_points().len() <= 3);
        }

        assert_eq!(s.as_points(), &[(18.0, 18.0), (19.0, 19.0), (20.0, 20.0)]);
        assert_eq!(s.latest(), Some(Sample { index: 20, value: 20.0 }));
        assert_eq!(s.highest(), 20);
    }

    #[rstest]
    #[case(MAX_HISTORY_SIZE + 1)]
    #[case(usize::MAX)]
    fn oversized_capacity_is_rejected(#[case] capacity: usize) {
        assert!(matches!(
            SampleSeries::new(capacity, MaxPolicy::Sticky),
            Err(ChartError::CapacityTooLarge { requested, .. }) if requested == capacity
        ));
        let config = SeriesConfig {
            capacity,
            ..SeriesConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn largest_capacity_is_accepted() {
        let s = SampleSeries::new(MAX_HISTORY_SIZE, MaxPolicy::Sticky).unwrap();
        assert_eq!(s.capacity(), MAX_HISTORY_SIZE);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(matches!(
            SampleSeries::new(0, MaxPolicy::Sticky),
            Err(ChartError::InvalidCapacity)
        ));
        let config = SeriesConfig {
            capacity: 0,
            ..SeriesConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_parses_policy_names() {
        let config: SeriesConfig =
            serde_json::from_str(r#"{ "capacity": 10, "max_policy": "windowed" }"#).unwrap();
        assert_eq!(
            config,
            SeriesConfig {
                capacity: 10,
                max_policy: MaxPolicy::Windowed,
            }
        );
    }
}
