//! CLI - Command Line Interface for showtui
//!
//! Designed for scripting and automation. Every lookup the TUI can do is
//! available as a subcommand, and all output is JSON-parseable with --json.
//!
//! # Examples
//!
//! ```bash
//! # Search for content
//! showtui search "the batman" --json
//!
//! # Seasons and episodes
//! showtui info tv 1396
//! showtui episodes 1396 --season 2
//!
//! # Subtitle lookup
//! showtui subtitles tt0903747 -s 1 -e 2 --lang en
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;

use crate::models::MediaKind;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Network error
    NetworkError = 3,
    /// Query returned nothing
    NoResults = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// showtui - terminal browser for movies and TV shows
///
/// Run without arguments to launch the interactive TUI.
/// Use subcommands for scriptable automation.
#[derive(Parser, Debug)]
#[command(
    name = "showtui",
    version,
    about = "Terminal browser for movies and TV shows",
    long_about = "A keyboard-driven terminal interface for browsing trending \
                  titles, drilling into seasons and episodes, and checking \
                  subtitle availability.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  showtui                             Launch interactive TUI\n\
                  showtui search \"blade runner\"       Search for content\n\
                  showtui episodes 1396 -s 2          List season 2 episodes\n\
                  showtui subtitles tt0903747 -s 1 -e 2   Check subtitles"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search for movies and TV shows
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// Get trending content
    #[command(visible_alias = "tr")]
    Trending(TrendingCmd),

    /// Get details for a movie or show
    #[command(visible_alias = "i")]
    Info(InfoCmd),

    /// List episodes for a season of a show
    #[command(visible_alias = "ep")]
    Episodes(EpisodesCmd),

    /// Check subtitle availability
    #[command(visible_alias = "sub")]
    Subtitles(SubtitlesCmd),
}

// =============================================================================
// Search Command
// =============================================================================

/// Search for movies and TV shows by query
#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Search query (title, keywords)
    #[arg(required = true)]
    pub query: String,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,

    /// Filter by media type
    #[arg(long, short = 't', value_enum)]
    pub media_type: Option<MediaKindFilter>,

    /// Minimum year
    #[arg(long)]
    pub year_from: Option<u16>,

    /// Maximum year
    #[arg(long)]
    pub year_to: Option<u16>,
}

/// Media kind filter for search and trending
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKindFilter {
    /// Movies only
    Movie,
    /// TV shows only
    Tv,
}

impl MediaKindFilter {
    pub fn matches(self, kind: MediaKind) -> bool {
        match self {
            MediaKindFilter::Movie => kind == MediaKind::Movie,
            MediaKindFilter::Tv => kind == MediaKind::Tv,
        }
    }

    pub fn kind(self) -> MediaKind {
        match self {
            MediaKindFilter::Movie => MediaKind::Movie,
            MediaKindFilter::Tv => MediaKind::Tv,
        }
    }
}

// =============================================================================
// Trending Command
// =============================================================================

/// Get trending movies and TV shows (weekly window)
#[derive(Args, Debug)]
pub struct TrendingCmd {
    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,

    /// Filter by media type
    #[arg(long, short = 't', value_enum)]
    pub media_type: Option<MediaKindFilter>,
}

// =============================================================================
// Info Command
// =============================================================================

/// Get detailed information about a movie or TV show
#[derive(Args, Debug)]
pub struct InfoCmd {
    /// Media type of the id
    #[arg(value_enum)]
    pub media_type: MediaKindFilter,

    /// TMDB id (e.g., 1396)
    pub id: u64,
}

// =============================================================================
// Episodes Command
// =============================================================================

/// List the episodes of one season of a show
#[derive(Args, Debug)]
pub struct EpisodesCmd {
    /// TMDB id of the show
    pub show_id: u64,

    /// Season number
    #[arg(long, short = 's', default_value = "1")]
    pub season: u8,
}

// =============================================================================
// Subtitles Command
// =============================================================================

/// Check subtitle availability for a movie or an episode
#[derive(Args, Debug)]
pub struct SubtitlesCmd {
    /// IMDB ID (e.g., tt1877830)
    #[arg(required = true)]
    pub imdb_id: String,

    /// Language code (e.g., en); empty matches all languages
    #[arg(long, short = 'l', default_value = "en")]
    pub lang: String,

    /// Season number (for TV shows)
    #[arg(long, short = 's')]
    pub season: Option<u8>,

    /// Episode number (for TV shows)
    #[arg(long, short = 'e')]
    pub episode: Option<u16>,

    /// Maximum number of results to list
    #[arg(long, default_value = "20")]
    pub limit: usize,
}

impl SubtitlesCmd {
    /// Season/episode pair, or None for a movie lookup.
    /// Err when only one of the two was given.
    pub fn episode_ref(&self) -> Result<Option<(u8, u16)>, &'static str> {
        match (self.season, self.episode) {
            (Some(s), Some(e)) => Ok(Some((s, e))),
            (None, None) => Ok(None),
            _ => Err("--season and --episode must be given together"),
        }
    }
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data as wrapped JSON
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        let output = JsonOutput::success(data);
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// IMDB ID Validation
// =============================================================================

/// Validate IMDB ID format (tt followed by digits)
pub fn validate_imdb_id(id: &str) -> Result<&str, &'static str> {
    if id.starts_with("tt") && id.len() >= 9 && id[2..].chars().all(|c| c.is_ascii_digit()) {
        Ok(id)
    } else {
        Err("Invalid IMDB ID format (expected tt followed by 7+ digits)")
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        // Verify CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_args_is_tui_mode() {
        let cli = Cli::parse_from::<_, &str>([]);
        assert!(!cli.is_cli_mode());
    }

    #[test]
    fn test_search_command() {
        let cli = Cli::parse_from(["showtui", "search", "batman"]);
        assert!(cli.is_cli_mode());
        if let Some(Command::Search(cmd)) = cli.command {
            assert_eq!(cmd.query, "batman");
            assert_eq!(cmd.limit, 20);
            assert!(cmd.media_type.is_none());
        } else {
            panic!("Expected Search command");
        }
    }

    #[test]
    fn test_search_with_filters() {
        let cli = Cli::parse_from([
            "showtui",
            "search",
            "dune",
            "-t",
            "movie",
            "--year-from",
            "2000",
            "--year-to",
            "2022",
            "-l",
            "5",
        ]);
        if let Some(Command::Search(cmd)) = cli.command {
            assert_eq!(cmd.media_type, Some(MediaKindFilter::Movie));
            assert_eq!(cmd.year_from, Some(2000));
            assert_eq!(cmd.year_to, Some(2022));
            assert_eq!(cmd.limit, 5);
        } else {
            panic!("Expected Search command");
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["showtui", "--json", "--quiet", "search", "test"]);
        assert!(cli.json);
        assert!(cli.quiet);
    }

    #[test]
    fn test_info_command() {
        let cli = Cli::parse_from(["showtui", "info", "tv", "1396"]);
        if let Some(Command::Info(cmd)) = cli.command {
            assert_eq!(cmd.media_type, MediaKindFilter::Tv);
            assert_eq!(cmd.id, 1396);
        } else {
            panic!("Expected Info command");
        }
    }

    #[test]
    fn test_episodes_command() {
        let cli = Cli::parse_from(["showtui", "episodes", "1396", "-s", "2"]);
        if let Some(Command::Episodes(cmd)) = cli.command {
            assert_eq!(cmd.show_id, 1396);
            assert_eq!(cmd.season, 2);
        } else {
            panic!("Expected Episodes command");
        }
    }

    #[test]
    fn test_episodes_default_season() {
        let cli = Cli::parse_from(["showtui", "episodes", "1396"]);
        if let Some(Command::Episodes(cmd)) = cli.command {
            assert_eq!(cmd.season, 1);
        } else {
            panic!("Expected Episodes command");
        }
    }

    #[test]
    fn test_subtitles_command() {
        let cli = Cli::parse_from([
            "showtui",
            "subtitles",
            "tt0903747",
            "-s",
            "1",
            "-e",
            "2",
            "--lang",
            "es",
        ]);
        if let Some(Command::Subtitles(cmd)) = cli.command {
            assert_eq!(cmd.imdb_id, "tt0903747");
            assert_eq!(cmd.season, Some(1));
            assert_eq!(cmd.episode, Some(2));
            assert_eq!(cmd.lang, "es");
            assert_eq!(cmd.episode_ref(), Ok(Some((1, 2))));
        } else {
            panic!("Expected Subtitles command");
        }
    }

    #[test]
    fn test_subtitles_episode_ref_requires_both() {
        let cmd = SubtitlesCmd {
            imdb_id: "tt0903747".to_string(),
            lang: "en".to_string(),
            season: Some(1),
            episode: None,
            limit: 20,
        };
        assert!(cmd.episode_ref().is_err());

        let cmd = SubtitlesCmd {
            imdb_id: "tt1877830".to_string(),
            lang: "en".to_string(),
            season: None,
            episode: None,
            limit: 20,
        };
        assert_eq!(cmd.episode_ref(), Ok(None));
    }

    #[test]
    fn test_media_kind_filter_matches() {
        assert!(MediaKindFilter::Movie.matches(MediaKind::Movie));
        assert!(!MediaKindFilter::Movie.matches(MediaKind::Tv));
        assert!(MediaKindFilter::Tv.matches(MediaKind::Tv));
        assert_eq!(MediaKindFilter::Tv.kind(), MediaKind::Tv);
    }

    #[test]
    fn test_validate_imdb_id() {
        assert!(validate_imdb_id("tt1877830").is_ok());
        assert!(validate_imdb_id("tt0903747").is_ok());
        assert!(validate_imdb_id("tt12345678").is_ok());
        assert!(validate_imdb_id("tt123456").is_err()); // too short
        assert!(validate_imdb_id("nm1234567").is_err()); // wrong prefix
        assert!(validate_imdb_id("1234567").is_err()); // no prefix
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::Error), 1);
        assert_eq!(i32::from(ExitCode::InvalidArgs), 2);
        assert_eq!(i32::from(ExitCode::NetworkError), 3);
        assert_eq!(i32::from(ExitCode::NoResults), 4);
    }
}
