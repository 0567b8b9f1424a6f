//! Rostercard - a terminal roster and staff directory.
//!
//! Loads a roster CSV, shows it grouped into sections as expandable cards,
//! and supports live search and position filters.

mod app;
mod config;
mod ui;
mod utils;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use serde::Serialize;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rostercard_core::{RosterOrigin, RosterSession, RosterView};

use app::{App, AppState};
use config::Config;
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Log file name inside the log directory
const LOG_FILE: &str = "rostercard.log";

const USAGE: &str = "\
Usage: rostercard [ROSTER_PATH] [--dump] [--search TEXT | --position TOKEN]

Options:
  --dump             Print the current view as JSON instead of starting the TUI
  --search TEXT      With --dump, apply a text search
  --position TOKEN   With --dump, apply a position filter (qb, rb, wr, ...)
  -h, --help         Show this help";

// ============================================================================
// Command Line
// ============================================================================

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    roster_path: Option<String>,
    help: bool,
    dump: bool,
    search: Option<String>,
    position: Option<String>,
}

impl CliArgs {
    fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let mut parsed = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => parsed.help = true,
                "--dump" => parsed.dump = true,
                "--search" => match args.next() {
                    Some(v) => parsed.search = Some(v),
                    None => bail!("--search needs a value"),
                },
                "--position" => match args.next() {
                    Some(v) => parsed.position = Some(v),
                    None => bail!("--position needs a value"),
                },
                flag if flag.starts_with("--") => bail!("Unknown option: {}", flag),
                path => {
                    if parsed.roster_path.is_some() {
                        bail!("Only one roster path may be given");
                    }
                    parsed.roster_path = Some(path.to_string());
                }
            }
        }

        if parsed.search.is_some() && parsed.position.is_some() {
            bail!("--search and --position cannot be combined");
        }

        Ok(parsed)
    }
}

// ============================================================================
// Logging
// ============================================================================

/// Initialize the tracing subscriber for logging.
///
/// The TUI owns the terminal, so logs go to a file; `--dump` logs to stderr.
/// The returned guard must live until exit to flush the file writer.
fn init_tracing(to_stderr: bool) -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    if to_stderr {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr))
            .with(filter)
            .init();
        return None;
    }

    let mut candidates = Vec::new();
    if let Ok(dir) = Config::log_dir() {
        candidates.push(dir);
    }
    candidates.push(std::env::temp_dir().join("rostercard"));

    let Some(log_dir) = first_usable_log_dir(&candidates) else {
        // Still before raw mode, so the terminal can show this
        eprintln!("Warning: no writable log directory, logging is disabled");
        return None;
    };

    let appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();
    Some(guard)
}

/// The first directory in `candidates` that exists or can be created.
fn first_usable_log_dir(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates
        .iter()
        .find(|dir| std::fs::create_dir_all(dir).is_ok())
        .cloned()
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = CliArgs::parse(std::env::args().skip(1))?;
    if cli.help {
        println!("{}", USAGE);
        return Ok(());
    }

    let _guard = init_tracing(cli.dump);

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults");
            Config::default()
        }
    };

    let roster_path = config.resolve_roster_path(cli.roster_path.as_deref());
    info!(path = %roster_path.display(), "Rostercard starting");

    let load_path = roster_path.clone();
    let report = tokio::task::spawn_blocking(move || rostercard_core::load(&load_path)).await?;
    let mut session = RosterSession::from_report(roster_path, report);

    if cli.dump {
        let view = if let Some(ref query) = cli.search {
            session.on_text_query(query)
        } else if let Some(ref token) = cli.position {
            session.on_category_select(token)
        } else {
            session.current_view()
        };
        return dump_view(&session, &view);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, session);

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

    info!("Rostercard shutting down");
    Ok(())
}

// ============================================================================
// Dump
// ============================================================================

#[derive(Serialize)]
struct DumpOutput<'a> {
    source: String,
    fallback: Option<String>,
    warnings: Vec<String>,
    view: &'a RosterView,
    rows: Vec<DumpRow<'a>>,
}

#[derive(Serialize)]
struct DumpRow<'a> {
    display_name: &'a str,
    subtitle: &'a str,
    category: &'a str,
    is_player: bool,
    visible: bool,
}

/// Print the view as JSON to stdout
fn dump_view(session: &RosterSession, view: &RosterView) -> Result<()> {
    let report = session.report();
    let engine = session.engine();

    let rows = view
        .rows
        .iter()
        .filter_map(|row| {
            engine.entry(row.entry).map(|entry| DumpRow {
                display_name: &entry.display_name,
                subtitle: &entry.subtitle,
                category: &entry.record.category,
                is_player: entry.is_player,
                visible: row.visible,
            })
        })
        .collect();

    let output = DumpOutput {
        source: session.source().display().to_string(),
        fallback: match &report.origin {
            RosterOrigin::Fallback(reason) => Some(reason.to_string()),
            RosterOrigin::File(_) => None,
        },
        warnings: report.warnings.iter().map(|w| w.to_string()).collect(),
        view,
        rows,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| render(f, app))?;

        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                if handle_input(app, key).await? {
                    return Ok(());
                }
            }
        }

        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_cli_parse_empty() {
        assert_eq!(CliArgs::parse(args(&[])).unwrap(), CliArgs::default());
    }

    #[test]
    fn test_cli_parse_path_and_dump() {
        let cli = CliArgs::parse(args(&["ravens_roster.csv", "--dump", "--position", "qb"])).unwrap();
        assert_eq!(cli.roster_path.as_deref(), Some("ravens_roster.csv"));
        assert!(cli.dump);
        assert_eq!(cli.position.as_deref(), Some("qb"));
    }

    #[test]
    fn test_cli_parse_help() {
        assert!(CliArgs::parse(args(&["--help"])).unwrap().help);
        assert!(CliArgs::parse(args(&["-h"])).unwrap().help);
        assert!(!CliArgs::parse(args(&["roster.csv"])).unwrap().help);
    }

    #[test]
    fn test_first_usable_log_dir_skips_unwritable() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let usable = dir.path().join("logs");
        let candidates = vec![blocker.join("rostercard"), usable.clone()];
        assert_eq!(first_usable_log_dir(&candidates), Some(usable.clone()));
        assert!(usable.is_dir());
    }

    #[test]
    fn test_first_usable_log_dir_none() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        assert_eq!(first_usable_log_dir(&[blocker.join("logs")]), None);
    }

    #[test]
    fn test_cli_parse_errors() {
        assert!(CliArgs::parse(args(&["--search"])).is_err());
        assert!(CliArgs::parse(args(&["--bogus"])).is_err());
        assert!(CliArgs::parse(args(&["a.csv", "b.csv"])).is_err());
        assert!(CliArgs::parse(args(&["--search", "x", "--position", "qb"])).is_err());
    }
}
