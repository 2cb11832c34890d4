//! Point sinks.
//!
//! A sink is whatever ends up drawing a series. The buffers only need it to
//! accept a full replacement of its points, so the core never depends on a
//! particular rendering crate.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use thiserror::Error;

use super::series::DataPoint;

/// Returned by a sink that can no longer receive points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("sink is no longer attached to a series")]
pub struct Detached;

/// Consumer of ordered `(x, y)` points.
#[cfg_attr(test, mockall::automock)]
pub trait SeriesSink {
    /// Replaces everything the sink holds with `points`, in order.
    fn replace_points(&mut self, points: &[DataPoint]) -> Result<(), Detached>;
}

impl SeriesSink for Vec<DataPoint> {
    fn replace_points(&mut self, points: &[DataPoint]) -> Result<(), Detached> {
        self.clear();
        self.extend_from_slice(points);
        Ok(())
    }
}

/// Point storage shared between a view and the handles that feed it.
#[derive(Debug, Clone, Default)]
pub struct SharedSeries {
    points: Rc<RefCell<Vec<DataPoint>>>,
}

impl SharedSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that writes into this series for as long as it is alive.
    pub fn handle(&self) -> SeriesHandle {
        SeriesHandle {
            points: Rc::downgrade(&self.points),
        }
    }

    /// Copy of the points last written through a handle.
    pub fn points(&self) -> Vec<DataPoint> {
        self.points.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.points.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.borrow().is_empty()
    }
}

/// Weak sink into a [`SharedSeries`].
#[derive(Debug, Clone)]
pub struct SeriesHandle {
    points: Weak<RefCell<Vec<DataPoint>>>,
}

impl SeriesHandle {
    /// False once the [`SharedSeries`] behind this handle is gone.
    pub fn is_attached(&self) -> bool {
        self.points.strong_count() > 0
    }
}

impl SeriesSink for SeriesHandle {
    fn replace_points(&mut self, points: &[DataPoint]) -> Result<(), Detached> {
        let target = self.points.upgrade().ok_or(Detached)?;
        target.borrow_mut().replace_points(points)?;
        Ok(())
    }
}
