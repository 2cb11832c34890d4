//! UI components for the bandwidth chart.
//!
//! A single chart view plus a status line and an optional help overlay.

pub mod chart;
pub mod help;
pub mod theme;

pub use chart::{BandwidthChartView, ChartSeries};
pub use help::HelpView;
pub use theme::Theme;

use ratatui::layout::{Constraint, Direction as LayoutDirection, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::error::Result;
use crate::state::{AppState, Temporality};

/// Main UI controller.
pub struct Ui {
    /// Whether to show help overlay
    show_help: bool,
    /// UI theme
    theme: Theme,
    /// Chart fed from the sample buffers
    chart: BandwidthChartView,
}

impl Ui {
    /// Create a UI for buffers holding `capacity` samples per direction.
    pub fn new(capacity: usize) -> Self {
        let theme = Theme::default();
        let chart = BandwidthChartView::new(&theme, capacity);
        Self {
            show_help: false,
            theme,
            chart,
        }
    }

    /// Toggle help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn chart(&self) -> &BandwidthChartView {
        &self.chart
    }

    /// Pull the latest points out of the buffers.
    pub fn refresh(&mut self, app_state: &AppState) -> Result<()> {
        self.chart.refresh(&app_state.chart)
    }

    /// Render the UI.
    pub fn render(&self, frame: &mut Frame, app_state: &AppState) {
        let area = frame.size();
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(area);

        self.chart.render(frame, chunks[0], &self.theme, "Bandwidth utilization");
        self.render_status_line(frame, chunks[1], app_state);

        if self.show_help {
            HelpView::render(frame, area, &self.theme);
        }
    }

    fn render_status_line(&self, frame: &mut Frame, area: Rect, app_state: &AppState) {
        let (status, status_style) = match app_state.temporality {
            Temporality::Live => ("LIVE", self.theme.status_live),
            Temporality::Paused => ("PAUSED", self.theme.status_paused),
        };

        let chart = &app_state.chart;
        let line = Line::from(vec![
            Span::styled(status, status_style),
            Span::styled(" | up max ", self.theme.label_style),
            Span::styled(chart.highest_upload_sample().to_string(), self.theme.upload_style),
            Span::styled(" | down max ", self.theme.label_style),
            Span::styled(chart.highest_download_sample().to_string(), self.theme.download_style),
            Span::styled(" | samples ", self.theme.label_style),
            Span::styled(app_state.samples_applied.to_string(), self.theme.value_style),
            Span::styled(" | ? for help", self.theme.help_style),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
