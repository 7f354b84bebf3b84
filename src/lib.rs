//! ShowTUI - Terminal browser for movie and TV metadata
//!
//! An amber-on-charcoal terminal interface for browsing trending titles,
//! drilling into season and episode data, and probing subtitle availability.
//!
//! # Modules
//!
//! - `models` - Data structures for titles, seasons, episodes, subtitles
//! - `api` - API clients (TMDB, OpenSubtitles addon)
//! - `fetch` - Background fetch dispatch and result events
//! - `ui` - TUI components
//! - `app` - Application state and navigation
//! - `cli` - Argument parsing and output formatting
//! - `commands` - CLI command handlers
//! - `config` - Config file loading and defaults

pub mod models;
pub mod api;
pub mod fetch;
pub mod ui;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;

// Re-export commonly used types
pub use models::{
    Episode, MediaItem, MediaKind,
    PlayRequest, SeasonSummary, ShowDetails, Subtitle,
};

pub use api::{SubtitleClient, SubtitleRequest, TmdbClient};
pub use app::{App, Screen};
