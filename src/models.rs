//! Data structures and types for ShowTUI
//!
//! Contains all shared models used across the application organized by domain:
//! - **Catalog**: media items from TMDB search/trending/details
//! - **Show structure**: seasons and episodes
//! - **Subtitles**: subtitle service results
//! - **Playback**: the descriptor built when an episode is activated

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Catalog Models (TMDB)
// =============================================================================

/// Media kind discriminator for catalog items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Tv,
}

impl MediaKind {
    /// Path segment used by Stremio-style subtitle addons
    pub fn addon_segment(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "series",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "Movie"),
            MediaKind::Tv => write!(f, "TV Show"),
        }
    }
}

/// A show/movie metadata record.
///
/// Search and trending responses produce partially filled items (no genres,
/// no runtime, no IMDb id); a details fetch replaces the item with the
/// enriched version. The same type also describes episode-level items, which
/// carry their season/episode numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: u64,
    pub kind: MediaKind,
    pub title: String,
    pub overview: String,
    pub year: Option<u16>,
    pub vote_average: f32,
    pub runtime: Option<u32>,
    pub genres: Vec<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub imdb_id: Option<String>,
    pub season: Option<u8>,
    pub episode: Option<u16>,
}

impl MediaItem {
    /// True once a details fetch has filled the fields search results omit
    pub fn is_enriched(&self) -> bool {
        !self.genres.is_empty() || self.runtime.is_some() || self.imdb_id.is_some()
    }
}

impl fmt::Display for MediaItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year_str = self.year.map(|y| format!(" ({})", y)).unwrap_or_default();
        write!(f, "{}{} [{}]", self.title, year_str, self.kind)
    }
}

/// Summary of a TV season as listed in show details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub season_number: u8,
    pub episode_count: u16,
    pub name: Option<String>,
    pub air_date: Option<String>,
}

impl fmt::Display for SeasonSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name.as_deref() {
            Some(name) => write!(f, "{} ({} episodes)", name, self.episode_count),
            None => write!(
                f,
                "Season {} ({} episodes)",
                self.season_number, self.episode_count
            ),
        }
    }
}

/// Enriched show details: the show item plus its season list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowDetails {
    pub show: MediaItem,
    pub seasons: Vec<SeasonSummary>,
}

impl fmt::Display for ShowDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} seasons - ⭐ {:.1}",
            self.show.title,
            self.seasons.len(),
            self.show.vote_average
        )
    }
}

/// TV episode information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    pub season: u8,
    pub number: u16,
    pub name: String,
    pub overview: String,
    pub air_date: Option<String>,
    pub runtime: Option<u32>,
    pub still_path: Option<String>,
}

impl fmt::Display for Episode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{:02}E{:02} - {}", self.season, self.number, self.name)
    }
}

// =============================================================================
// Subtitle Models
// =============================================================================

/// A subtitle entry from the addon: language code plus resource locator.
/// Produced transiently by a probe; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subtitle {
    pub id: String,
    pub language: String,
    pub url: String,
}

impl fmt::Display for Subtitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.language, self.url)
    }
}

// =============================================================================
// Playback Models
// =============================================================================

/// Descriptor built when an episode is activated.
///
/// Identity comes from the episode, the title from the show; overview and
/// art fall back to the show-level values when the episode has none. The
/// descriptor is surfaced as a notification only; nothing here launches a
/// player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayRequest {
    pub show_id: u64,
    pub title: String,
    pub season: u8,
    pub episode: u16,
    pub episode_name: String,
    pub overview: String,
    pub still_path: Option<String>,
}

impl PlayRequest {
    pub fn for_episode(show: &MediaItem, episode: &Episode) -> Self {
        let overview = if episode.overview.is_empty() {
            show.overview.clone()
        } else {
            episode.overview.clone()
        };
        let still_path = episode
            .still_path
            .clone()
            .or_else(|| show.backdrop_path.clone());
        Self {
            show_id: show.id,
            title: show.title.clone(),
            season: episode.season,
            episode: episode.number,
            episode_name: episode.name.clone(),
            overview,
            still_path,
        }
    }
}

impl fmt::Display for PlayRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} S{:02}E{:02} - {}",
            self.title, self.season, self.episode, self.episode_name
        )
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Format a runtime in minutes as "1h 52m" (or "52m" under an hour)
pub fn format_runtime(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}

// =============================================================================
// Tests
// =============================================================================
