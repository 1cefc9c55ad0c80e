//! Onboarding TUI - terminal console for the customer onboarding API
//!
//! A Ratatui-based TUI for starting onboardings through a step-by-step
//! wizard and watching workflows progress.

mod api;
mod app;
mod config;
mod platform;
mod poll;
mod state;
mod ui;

use anyhow::Result;
use api::ApiClient;
use app::App;
use config::TuiConfig;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE: &str = "onboarding-tui.log";

#[tokio::main]
async fn main() -> Result<()> {
    let log_path = init_logging();

    let config = TuiConfig::load()?;
    let api = ApiClient::new(&config)?;
    tracing::info!(
        base_url = api.base_url(),
        log_file = ?log_path,
        "Starting onboarding console"
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(Arc::new(api), config);
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

/// Log to a file under the data dir; the terminal belongs to the UI.
/// Falls back to stderr when no file can be opened.
fn init_logging() -> Option<PathBuf> {
    let log_path = TuiConfig::log_dir().and_then(|dir| {
        fs::create_dir_all(&dir).ok()?;
        Some(dir.join(LOG_FILE))
    });
    let file = log_path
        .as_ref()
        .and_then(|path| OpenOptions::new().create(true).append(true).open(path).ok());

    let (writer, log_path) = match file {
        Some(file) => (BoxMakeWriter::new(Arc::new(file)), log_path),
        None => (BoxMakeWriter::new(io::stderr), None),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "onboarding_tui=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();

    log_path
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Apply poll and submission results that arrived since the last frame
        app.drain_events();

        // Draw the UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Handle crossterm events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Global quit: Ctrl+C
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                app.handle_key(key);
            }
        }

        // Check if app wants to quit
        if app.should_quit() {
            return Ok(());
        }
    }
}
