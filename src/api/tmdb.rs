//! TMDB (The Movie Database) API client
//!
//! Provides search, trending, and show/season metadata.
//! API docs: https://developer.themoviedb.org/docs

use anyhow::Result;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::models::{Episode, MediaItem, MediaKind, SeasonSummary, ShowDetails};

/// TMDB API error types
#[derive(Error, Debug)]
pub enum TmdbError {
    #[error("Resource not found (404)")]
    NotFound,

    #[error("Rate limited (429), retries exhausted")]
    RateLimited,

    #[error("Server error: {0}")]
    ServerError(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

/// TMDB API client
pub struct TmdbClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
    max_retries: u32,
}

impl TmdbClient {
    /// Create a new TMDB client with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, "https://api.themoviedb.org/3")
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            max_retries: 3,
        }
    }

    /// Make an authenticated GET request with retry logic for rate limits
    async fn get<T: for<'de> Deserialize<'de>>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut retries = 0;

        loop {
            let response = self
                .client
                .get(&url)
                .header("Authorization", format!("Bearer {}", self.api_key))
                .header("Accept", "application/json")
                .send()
                .await?;

            match response.status() {
                StatusCode::OK => {
                    let body = response.text().await?;
                    let parsed: T = serde_json::from_str(&body).map_err(|e| {
                        TmdbError::InvalidResponse(format!("JSON parse error: {}", e))
                    })?;
                    return Ok(parsed);
                }
                StatusCode::NOT_FOUND => {
                    return Err(TmdbError::NotFound.into());
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    retries += 1;
                    if retries >= self.max_retries {
                        return Err(TmdbError::RateLimited.into());
                    }

                    // Honor Retry-After when present, else exponential backoff
                    let wait_secs = response
                        .headers()
                        .get("Retry-After")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(2u64.pow(retries));

                    debug!(endpoint, wait_secs, retries, "rate limited, backing off");
                    tokio::time::sleep(Duration::from_secs(wait_secs)).await;
                    continue;
                }
                status => {
                    return Err(TmdbError::ServerError(status.as_u16()).into());
                }
            }
        }
    }

    /// Search for movies and TV shows
    pub async fn search(&self, query: &str) -> Result<Vec<MediaItem>> {
        let endpoint = format!("/search/multi?query={}&page=1", urlencoding::encode(query));

        let response: ListingResponse = self.get(&endpoint).await?;
        Ok(response.into_items())
    }

    /// Get trending content for the week
    pub async fn trending(&self) -> Result<Vec<MediaItem>> {
        let response: ListingResponse = self.get("/trending/all/week").await?;
        Ok(response.into_items())
    }

    /// Get enriched movie details by ID
    pub async fn movie_details(&self, id: u64) -> Result<MediaItem> {
        let endpoint = format!("/movie/{}?append_to_response=external_ids", id);
        let response: MovieResponse = self.get(&endpoint).await?;
        Ok(response.into_item())
    }

    /// Get enriched show details plus the season list by ID
    pub async fn show_details(&self, id: u64) -> Result<ShowDetails> {
        let endpoint = format!("/tv/{}?append_to_response=external_ids", id);
        let response: TvResponse = self.get(&endpoint).await?;
        Ok(response.into_details())
    }

    /// Get the episodes of one season of a show
    pub async fn season_episodes(&self, id: u64, season: u8) -> Result<Vec<Episode>> {
        let endpoint = format!("/tv/{}/season/{}", id, season);
        let response: SeasonResponse = self.get(&endpoint).await?;
        Ok(response.into_episodes(season))
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct ListingResponse {
    results: Vec<ListingEntryRaw>,
}

impl ListingResponse {
    fn into_items(self) -> Vec<MediaItem> {
        self.results
            .into_iter()
            .filter_map(|r| r.into_item())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct ListingEntryRaw {
    id: u64,
    media_type: String,
    // Movies use "title", TV uses "name"
    title: Option<String>,
    name: Option<String>,
    // Movies use "release_date", TV uses "first_air_date"
    release_date: Option<String>,
    first_air_date: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    vote_average: Option<f32>,
}

impl ListingEntryRaw {
    fn into_item(self) -> Option<MediaItem> {
        let kind = match self.media_type.as_str() {
            "movie" => MediaKind::Movie,
            "tv" => MediaKind::Tv,
            _ => return None, // Filter out "person" and other types
        };

        let title = self.title.or(self.name).unwrap_or_default();
        let date_str = self.release_date.or(self.first_air_date);
        let year = date_str.and_then(|d| extract_year(&d));

        Some(MediaItem {
            id: self.id,
            kind,
            title,
            overview: self.overview.unwrap_or_default(),
            year,
            vote_average: self.vote_average.unwrap_or(0.0),
            runtime: None,
            genres: Vec::new(),
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            imdb_id: None,
            season: None,
            episode: None,
        })
    }
}

#[derive(Debug, Deserialize)]
struct MovieResponse {
    id: u64,
    imdb_id: Option<String>,
    title: String,
    release_date: Option<String>,
    runtime: Option<u32>,
    genres: Vec<GenreRaw>,
    overview: Option<String>,
    vote_average: Option<f32>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
}

impl MovieResponse {
    fn into_item(self) -> MediaItem {
        let year = self.release_date.as_ref().and_then(|d| extract_year(d));

        MediaItem {
            id: self.id,
            kind: MediaKind::Movie,
            title: self.title,
            overview: self.overview.unwrap_or_default(),
            year,
            vote_average: self.vote_average.unwrap_or(0.0),
            runtime: self.runtime,
            genres: self.genres.into_iter().map(|g| g.name).collect(),
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            imdb_id: self.imdb_id,
            season: None,
            episode: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TvResponse {
    id: u64,
    name: String,
    first_air_date: Option<String>,
    seasons: Vec<SeasonRaw>,
    genres: Vec<GenreRaw>,
    overview: Option<String>,
    vote_average: Option<f32>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    episode_run_time: Option<Vec<u32>>,
    external_ids: Option<ExternalIds>,
}

impl TvResponse {
    fn into_details(self) -> ShowDetails {
        let year = self.first_air_date.as_ref().and_then(|d| extract_year(d));
        let imdb_id = self.external_ids.and_then(|e| e.imdb_id);
        let runtime = self.episode_run_time.and_then(|r| r.first().copied());

        // Specials (season 0) are not listed
        let seasons: Vec<SeasonSummary> = self
            .seasons
            .into_iter()
            .filter(|s| s.season_number > 0)
            .map(|s| s.into_summary())
            .collect();

        let show = MediaItem {
            id: self.id,
            kind: MediaKind::Tv,
            title: self.name,
            overview: self.overview.unwrap_or_default(),
            year,
            vote_average: self.vote_average.unwrap_or(0.0),
            runtime,
            genres: self.genres.into_iter().map(|g| g.name).collect(),
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            imdb_id,
            season: None,
            episode: None,
        };

        ShowDetails { show, seasons }
    }
}

#[derive(Debug, Deserialize)]
struct SeasonResponse {
    episodes: Vec<EpisodeRaw>,
}

impl SeasonResponse {
    fn into_episodes(self, season: u8) -> Vec<Episode> {
        self.episodes
            .into_iter()
            .map(|e| e.into_episode(season))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct GenreRaw {
    name: String,
}

#[derive(Debug, Deserialize)]
struct SeasonRaw {
    season_number: u8,
    episode_count: u16,
    name: Option<String>,
    air_date: Option<String>,
}

impl SeasonRaw {
    fn into_summary(self) -> SeasonSummary {
        SeasonSummary {
            season_number: self.season_number,
            episode_count: self.episode_count,
            name: self.name,
            air_date: self.air_date,
        }
    }
}

#[derive(Debug, Deserialize)]
struct EpisodeRaw {
    episode_number: u16,
    name: String,
    overview: Option<String>,
    air_date: Option<String>,
    runtime: Option<u32>,
    still_path: Option<String>,
}

impl EpisodeRaw {
    fn into_episode(self, season: u8) -> Episode {
        Episode {
            season,
            number: self.episode_number,
            name: self.name,
            overview: self.overview.unwrap_or_default(),
            air_date: self.air_date,
            runtime: self.runtime,
            still_path: self.still_path,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ExternalIds {
    imdb_id: Option<String>,
}

/// Extract year from a date string like "2022-03-04"
fn extract_year(date: &str) -> Option<u16> {
    date.get(..4)?.parse().ok()
}
