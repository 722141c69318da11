//! guardian - Health Guardian AI
//!
//! Terminal dashboard for logging health readings, with AI meal analysis and
//! a health assistant.

mod app;
mod message_format;
mod ui;
mod worker;

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use guardian_core::{seed, Config, GeminiGateway, HealthRecordStore};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::App;

fn main() -> Result<()> {
    // Load configuration
    let config = Config::load().context("failed to load configuration")?;

    // Initialize logging (to file, not stdout since we have a TUI)
    let log_guard =
        guardian_core::logging::init(&config.logging).context("failed to initialize logging")?;

    tracing::info!("guardian TUI starting up");

    // Missing credentials are fatal before the terminal is touched
    let gateway =
        GeminiGateway::new(&config.gemini).context("failed to initialize the Gemini gateway")?;

    let store = if config.dashboard.seed_demo_data {
        seed::demo_store()
    } else {
        HealthRecordStore::new()
    };
    tracing::info!(readings = store.len(), "Reading store ready");

    let mut app = App::new(store, Arc::new(gateway));

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;

    tracing::info!("guardian TUI shutting down");

    if let Err(e) = &result {
        tracing::error!(error = %e, "guardian TUI exited with an error");
        eprintln!("Details: {}", log_guard.log_dir().display());
    }

    result
}

/// Run the main application loop.
fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Apply finished AI calls
        app.poll_gateway();

        // Update animations
        app.tick_animation();

        // Render
        terminal.draw(|frame| ui::render(frame, app))?;

        // Handle events
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Ignore release/repeat events on platforms that report them
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}
