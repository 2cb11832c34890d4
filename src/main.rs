//! Bandwidth chart - live upload/download utilization in the terminal
//!
//! Feeds simulated bandwidth samples through the chart buffers and draws
//! them as a scrolling line chart. Pass a JSON config path as the first
//! argument to override the defaults.

use std::io;
use color_eyre::Result;
use bandwidth_chart::app::{App, AppConfig};
use bandwidth_chart::logging;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::new(),
    };

    // stdout and stderr both belong to the alternate screen while it is up
    let subscriber = logging::file_subscriber(&config.log_path(), logging::env_filter())?;
    tracing::subscriber::set_global_default(subscriber)?;

    let mut app = App::new(config)?;

    setup_terminal()?;
    let result = app.run_with_crossterm().await;
    restore_terminal()?;

    result
}

fn setup_terminal() -> Result<()> {
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(
        io::stdout(),
        crossterm::terminal::EnterAlternateScreen,
        crossterm::event::EnableMouseCapture
    )?;

    Ok(())
}

fn restore_terminal() -> Result<()> {
    crossterm::execute!(
        io::stdout(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::event::DisableMouseCapture
    )?;
    crossterm::terminal::disable_raw_mode()?;

    Ok(())
}
