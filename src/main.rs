//! ShowTUI - Terminal browser for movie and TV metadata
//!
//! An amber-on-charcoal terminal interface for browsing trending titles,
//! drilling into season and episode data, and probing subtitle availability.
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! showtui
//!
//! # CLI mode (for automation)
//! showtui search "breaking bad"
//! showtui episodes 1396 --season 2
//! showtui subtitles tt0903747 -s 1 -e 2 --json
//! ```

use std::io::{stdout, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use showtui::api::{SubtitleClient, TmdbClient};
use showtui::app::App;
use showtui::cli::{Cli, Command, ExitCode, Output};
use showtui::config::Config;
use showtui::fetch::{self, FetchEvent};
use showtui::{commands, ui};

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.is_cli_mode());

    if cli.is_cli_mode() {
        // CLI mode: execute command and exit
        let exit_code = run_cli(cli).await;
        std::process::exit(exit_code.into());
    } else {
        // TUI mode: launch interactive interface
        run_tui().await
    }
}

/// Set up tracing. CLI mode logs to stderr, controlled by RUST_LOG.
/// TUI mode owns the terminal, so logs go to a file named by SHOWTUI_LOG
/// instead, or nowhere when the variable is unset.
fn init_tracing(cli_mode: bool) {
    if cli_mode {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    } else if let Ok(path) = std::env::var("SHOWTUI_LOG") {
        if let Ok(file) = std::fs::File::create(&path) {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
    }
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli) -> ExitCode {
    let output = Output::new(&cli);

    match cli.command {
        Some(Command::Search(cmd)) => commands::search_cmd(cmd, &output).await,

        Some(Command::Trending(cmd)) => commands::trending_cmd(cmd, &output).await,

        Some(Command::Info(cmd)) => commands::info_cmd(cmd, &output).await,

        Some(Command::Episodes(cmd)) => commands::episodes_cmd(cmd, &output).await,

        Some(Command::Subtitles(cmd)) => commands::subtitles_cmd(cmd, &output).await,

        None => {
            // This shouldn't happen (handled by is_cli_mode check)
            ExitCode::Success
        }
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui() -> Result<()> {
    // Resolve config before touching the terminal so a missing API key
    // prints a normal error instead of garbling the alternate screen
    let config = Config::load();
    let api_key = config.require_tmdb_api_key()?;

    let tmdb = Arc::new(TmdbClient::new(api_key));
    let subtitles = Arc::new(match config.subtitle_addon.as_deref() {
        Some(url) => SubtitleClient::with_base_url(url),
        None => SubtitleClient::new(),
    });
    let (tx, mut rx) = mpsc::channel::<FetchEvent>(32);

    // Create app state
    let mut app = App::new();
    app.subtitle_language = config.subtitle_language();

    // Initialize terminal
    let mut terminal = init_terminal()?;

    // Run the main event loop
    let result = run_event_loop(&mut terminal, &mut app, &tmdb, &subtitles, &tx, &mut rx).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop - handles input, applies fetch results, renders UI
async fn run_event_loop(
    terminal: &mut Tui,
    app: &mut App,
    tmdb: &Arc<TmdbClient>,
    subtitles: &Arc<SubtitleClient>,
    tx: &mpsc::Sender<FetchEvent>,
    rx: &mut mpsc::Receiver<FetchEvent>,
) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    // Kick off the initial trending fetch
    let effect = app.start();
    fetch::dispatch(effect, tmdb, subtitles, tx);

    while app.running {
        // Render current state
        terminal.draw(|frame| ui::render(frame, app))?;

        // Drain completed fetches. Applying one may trigger a follow-up
        // fetch (details resolving into an episode load).
        while let Ok(fetch_event) = rx.try_recv() {
            if let Some(effect) = app.apply_fetch(fetch_event) {
                fetch::dispatch(effect, tmdb, subtitles, tx);
            }
        }

        // Poll for events with timeout so fetch results keep flowing
        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    if let Some(effect) = app.handle_key(key) {
                        fetch::dispatch(effect, tmdb, subtitles, tx);
                    }
                }
            }
        }
    }

    Ok(())
}
