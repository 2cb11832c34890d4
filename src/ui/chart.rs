//! Bandwidth line chart.
//!
//! [`ChartSeries`] is the ratatui-side sink: the sample buffers replace its
//! points each frame and it lends them to a [`Dataset`] while drawing.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType};
use ratatui::Frame;

use crate::error::Result;
use crate::state::{
    DataPoint, Detached, Direction, SampleSeriesBuffer, SeriesSink, MAX_HISTORY_SIZE,
};
use crate::ui::Theme;

/// Points for one line of the chart.
#[derive(Debug, Clone)]
pub struct ChartSeries {
    direction: Direction,
    style: Style,
    points: Vec<DataPoint>,
}

impl ChartSeries {
    /// An empty line with room for `capacity` points.
    pub fn new(direction: Direction, style: Style, capacity: usize) -> Self {
        Self {
            direction,
            style,
            points: Vec::with_capacity(capacity.min(MAX_HISTORY_SIZE)),
        }
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn dataset(&self) -> Dataset<'_> {
        Dataset::default()
            .name(self.direction.label())
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(self.style)
            .data(&self.points)
    }
}

impl SeriesSink for ChartSeries {
    fn replace_points(&mut self, points: &[DataPoint]) -> std::result::Result<(), Detached> {
        self.points.clear();
        self.points.extend_from_slice(points);
        Ok(())
    }
}

/// Upload and download lines with axes that follow the sample window.
#[derive(Debug, Clone)]
pub struct BandwidthChartView {
    upload: ChartSeries,
    download: ChartSeries,
    capacity: usize,
    x_bounds: [f64; 2],
    y_max: f64,
}

impl BandwidthChartView {
    pub fn new(theme: &Theme, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            upload: ChartSeries::new(Direction::Upload, theme.series_style(Direction::Upload), capacity),
            download: ChartSeries::new(Direction::Download, theme.series_style(Direction::Download), capacity),
            capacity,
            x_bounds: [1.0, capacity as f64],
            y_max: 1.0,
        }
    }

    /// Copies the current buffer contents into both lines and rescales.
    pub fn refresh(&mut self, chart: &SampleSeriesBuffer) -> Result<()> {
        let mut newest: f64 = 0.0;
        for direction in Direction::ALL {
            let line = self.series_mut(direction);
            chart.update_series(direction, &mut *line)?;
            if let Some(&(x, _)) = line.points().last() {
                newest = newest.max(x);
            }
        }

        self.x_bounds = x_window(self.capacity, newest);
        self.y_max = y_ceiling(chart.highest_sample());
        Ok(())
    }

    pub fn series(&self, direction: Direction) -> &ChartSeries {
        match direction {
            Direction::Upload => &self.upload,
            Direction::Download => &self.download,
        }
    }

    fn series_mut(&mut self, direction: Direction) -> &mut ChartSeries {
        match direction {
            Direction::Upload => &mut self.upload,
            Direction::Download => &mut self.download,
        }
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        self.x_bounds
    }

    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, title: &str) {
        let datasets = vec![self.upload.dataset(), self.download.dataset()];

        let [x_start, x_end] = self.x_bounds;
        let x_axis = Axis::default()
            .title(Span::styled("sample", theme.label_style))
            .style(theme.axis_style)
            .bounds(self.x_bounds)
            .labels(vec![
                Span::raw(format!("{x_start:.0}")),
                Span::raw(format!("{x_end:.0}")),
            ]);

        let y_axis = Axis::default()
            .title(Span::styled("utilization", theme.label_style))
            .style(theme.axis_style)
            .bounds([0.0, self.y_max])
            .labels(vec![
                Span::raw("0"),
                Span::raw(format!("{:.0}", self.y_max / 2.0)),
                Span::raw(format!("{:.0}", self.y_max)),
            ]);

        let chart = Chart::new(datasets)
            .block(
                Block::default()
                    .title(Span::styled(title.to_string(), theme.header_style))
                    .borders(Borders::ALL)
                    .style(theme.block_style),
            )
            .x_axis(x_axis)
            .y_axis(y_axis);

        frame.render_widget(chart, area);
    }
}

/// X range covering `capacity` indices and ending at the newest one.
fn x_window(capacity: usize, newest: f64) -> [f64; 2] {
    let width = capacity as f64;
    let end = newest.max(width);
    [end - width + 1.0, end]
}

/// Y upper bound from the running maximum; never below 1 so the axis has a range.
fn y_ceiling(highest: i64) -> f64 {
    highest.max(1) as f64
}
