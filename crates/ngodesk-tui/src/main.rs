//! ngodesk - a terminal dashboard for nonprofit operations.
//!
//! Browse grants, compliance documents, fundraising, HR and user accounts
//! from the keyboard. Without `NGODESK_API_URL` the dashboard runs on
//! built-in demo data.

mod app;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ngodesk_core::{Config, Screen};

use app::{App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

const LOG_FILE: &str = "ngodesk.log";

/// Initialize the tracing subscriber for logging.
///
/// The terminal belongs to the UI, so logs go to a file in the cache
/// directory. Use RUST_LOG to control the level (e.g. RUST_LOG=debug).
fn init_tracing(config: &Config) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let log_dir = config.cache_dir().ok()?;
    std::fs::create_dir_all(&log_dir).ok()?;
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(
        log_dir, LOG_FILE,
    ));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();
    Some(guard)
}

/// Command line options.
#[derive(Debug, Default, PartialEq)]
struct Args {
    route: Option<Screen>,
    dump: Option<Screen>,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut parsed = Args::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--route" | "--dump" => {
                let value = iter
                    .next()
                    .with_context(|| format!("{} needs a route such as documents/compliance", arg))?;
                let screen = Screen::parse(value)?;
                if arg == "--route" {
                    parsed.route = Some(screen);
                } else {
                    parsed.dump = Some(screen);
                }
            }
            other => anyhow::bail!("Unknown argument: {}", other),
        }
    }
    Ok(parsed)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&args)?;

    // Report bad settings before the terminal is taken over
    let config = Config::load().context("Invalid ngodesk configuration")?;
    let _guard = init_tracing(&config);
    let mut app = App::new(config)?;
    info!(demo = app.is_demo(), "ngodesk starting");

    if let Some(screen) = args.dump {
        return dump_screen(&mut app, screen).await;
    }

    if let Some(screen) = args.route {
        app.go_to_screen(screen);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Show cached data right away, then refresh if it is old
    app.load_from_cache();
    if app.is_cache_stale() {
        app.refresh_all_background();
    }

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("ngodesk shutting down");
    Ok(())
}

/// Print one screen's filtered records to stdout as JSON.
async fn dump_screen(app: &mut App, screen: Screen) -> Result<()> {
    eprintln!("Loading {}...", screen);
    app.refresh_all_now().await?;
    let json = app.lists.get(screen).dump_json()?;
    println!("{}", json);
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout to allow background updates
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                if handle_input(app, key)? {
                    return Ok(());
                }
            }
        }

        // Check for completed background tasks
        app.check_background_tasks();

        // Check if we should quit
        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(parse_args(&[]).unwrap(), Args::default());

        let args = parse_args(&strings(&["--route", "hr/exits"])).unwrap();
        assert_eq!(args.route, Some(Screen::Exits));

        let args = parse_args(&strings(&["--dump", "/documents/compliance/"])).unwrap();
        assert_eq!(args.dump, Some(Screen::Compliance));
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(&strings(&["--route"])).is_err());
        assert!(parse_args(&strings(&["--route", "hr/payroll"])).is_err());
        assert!(parse_args(&strings(&["--verbose"])).is_err());
    }
}
