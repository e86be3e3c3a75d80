#![deny(unsafe_code)]

//! archief-keys TUI: shortcut table, navigation history, and live logs.

mod app;
mod panels;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use archief_keys_config::{AppConfig, DEFAULT_CONFIG_FILE};
use archief_keys_core::{LogCollector, Navigator, PageSession};
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;

/// Entries kept for the logs pane.
const LOG_CAPACITY: usize = 500;

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = AppConfig::load_or_default(&config_path).await?;

    // The terminal belongs to the UI, so events only go to the logs pane.
    let collector = LogCollector::new(LOG_CAPACITY);
    let reader = collector.reader();
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.to_ascii_lowercase())),
        )
        .with(collector)
        .init();

    let session = PageSession::from_config(&config)?;
    info!(base_url = %session.base_url(), "Starting archief-keys TUI");

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut app = App::new(session, reader);
    let result = run(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run<N: Navigator>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<N>,
) -> Result<()> {
    while !app.should_quit {
        app.tick();
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }
    Ok(())
}
