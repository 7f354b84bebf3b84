//! Background fetch orchestration
//!
//! All network work runs on spawned tasks that report back over an mpsc
//! channel. The state owner mints a monotonically increasing ticket when it
//! requests a fetch; the ticket rides in the completion event so stale
//! responses from superseded requests can be discarded. Every spawned task
//! resolves with exactly one event.

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

use crate::api::{SubtitleClient, SubtitleRequest, TmdbClient};
use crate::models::{Episode, MediaItem, SeasonSummary, Subtitle};

/// A fetch the app wants started. Returned by state-mutation methods and
/// turned into a spawned task by [`dispatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Search { ticket: u64, query: String },
    Trending { ticket: u64 },
    MovieDetails { ticket: u64, id: u64 },
    ShowDetails { ticket: u64, id: u64 },
    Episodes { ticket: u64, show_id: u64, season: u8 },
    Subtitles { ticket: u64, request: SubtitleRequest },
}

/// Completion message from a background fetch
#[derive(Debug)]
pub enum FetchEvent {
    BrowseLoaded {
        ticket: u64,
        items: Vec<MediaItem>,
    },
    BrowseFailed {
        ticket: u64,
        error: String,
    },
    SearchLoaded {
        ticket: u64,
        items: Vec<MediaItem>,
    },
    SearchFailed {
        ticket: u64,
        error: String,
    },
    /// Enriched details. Movies arrive with an empty season list.
    DetailsLoaded {
        ticket: u64,
        item: Box<MediaItem>,
        seasons: Vec<SeasonSummary>,
    },
    DetailsFailed {
        ticket: u64,
        error: String,
    },
    EpisodesLoaded {
        ticket: u64,
        season: u8,
        episodes: Vec<Episode>,
    },
    EpisodesFailed {
        ticket: u64,
        season: u8,
        error: String,
    },
    SubtitlesLoaded {
        ticket: u64,
        subtitles: Vec<Subtitle>,
    },
    SubtitlesFailed {
        ticket: u64,
        error: String,
    },
}

impl FetchEvent {
    /// The ticket this event answers
    pub fn ticket(&self) -> u64 {
        match self {
            FetchEvent::BrowseLoaded { ticket, .. }
            | FetchEvent::BrowseFailed { ticket, .. }
            | FetchEvent::SearchLoaded { ticket, .. }
            | FetchEvent::SearchFailed { ticket, .. }
            | FetchEvent::DetailsLoaded { ticket, .. }
            | FetchEvent::DetailsFailed { ticket, .. }
            | FetchEvent::EpisodesLoaded { ticket, .. }
            | FetchEvent::EpisodesFailed { ticket, .. }
            | FetchEvent::SubtitlesLoaded { ticket, .. }
            | FetchEvent::SubtitlesFailed { ticket, .. } => *ticket,
        }
    }
}

/// Start the background task for one effect
pub fn dispatch(
    effect: Effect,
    tmdb: &Arc<TmdbClient>,
    subtitles: &Arc<SubtitleClient>,
    tx: &mpsc::Sender<FetchEvent>,
) {
    match effect {
        Effect::Search { ticket, query } => {
            spawn_search(Arc::clone(tmdb), query, ticket, tx.clone())
        }
        Effect::Trending { ticket } => spawn_trending(Arc::clone(tmdb), ticket, tx.clone()),
        Effect::MovieDetails { ticket, id } => {
            spawn_movie_details(Arc::clone(tmdb), id, ticket, tx.clone())
        }
        Effect::ShowDetails { ticket, id } => {
            spawn_show_details(Arc::clone(tmdb), id, ticket, tx.clone())
        }
        Effect::Episodes {
            ticket,
            show_id,
            season,
        } => spawn_episodes(Arc::clone(tmdb), show_id, season, ticket, tx.clone()),
        Effect::Subtitles { ticket, request } => {
            spawn_subtitles(Arc::clone(subtitles), request, ticket, tx.clone())
        }
    }
}

fn spawn_search(tmdb: Arc<TmdbClient>, query: String, ticket: u64, tx: mpsc::Sender<FetchEvent>) {
    tokio::spawn(async move {
        debug!(ticket, %query, "search fetch dispatched");
        let event = match tmdb.search(&query).await {
            Ok(items) => FetchEvent::SearchLoaded { ticket, items },
            Err(e) => FetchEvent::SearchFailed {
                ticket,
                error: e.to_string(),
            },
        };
        let _ = tx.send(event).await;
    });
}

fn spawn_trending(tmdb: Arc<TmdbClient>, ticket: u64, tx: mpsc::Sender<FetchEvent>) {
    tokio::spawn(async move {
        debug!(ticket, "trending fetch dispatched");
        let event = match tmdb.trending().await {
            Ok(items) => FetchEvent::BrowseLoaded { ticket, items },
            Err(e) => FetchEvent::BrowseFailed {
                ticket,
                error: e.to_string(),
            },
        };
        let _ = tx.send(event).await;
    });
}

fn spawn_movie_details(tmdb: Arc<TmdbClient>, id: u64, ticket: u64, tx: mpsc::Sender<FetchEvent>) {
    tokio::spawn(async move {
        debug!(ticket, id, "movie details fetch dispatched");
        let event = match tmdb.movie_details(id).await {
            Ok(item) => FetchEvent::DetailsLoaded {
                ticket,
                item: Box::new(item),
                seasons: Vec::new(),
            },
            Err(e) => FetchEvent::DetailsFailed {
                ticket,
                error: e.to_string(),
            },
        };
        let _ = tx.send(event).await;
    });
}

fn spawn_show_details(tmdb: Arc<TmdbClient>, id: u64, ticket: u64, tx: mpsc::Sender<FetchEvent>) {
    tokio::spawn(async move {
        debug!(ticket, id, "show details fetch dispatched");
        let event = match tmdb.show_details(id).await {
            Ok(details) => FetchEvent::DetailsLoaded {
                ticket,
                item: Box::new(details.show),
                seasons: details.seasons,
            },
            Err(e) => FetchEvent::DetailsFailed {
                ticket,
                error: e.to_string(),
            },
        };
        let _ = tx.send(event).await;
    });
}

fn spawn_episodes(
    tmdb: Arc<TmdbClient>,
    show_id: u64,
    season: u8,
    ticket: u64,
    tx: mpsc::Sender<FetchEvent>,
) {
    tokio::spawn(async move {
        debug!(ticket, show_id, season, "episodes fetch dispatched");
        let event = match tmdb.season_episodes(show_id, season).await {
            Ok(episodes) => FetchEvent::EpisodesLoaded {
                ticket,
                season,
                episodes,
            },
            Err(e) => FetchEvent::EpisodesFailed {
                ticket,
                season,
                error: e.to_string(),
            },
        };
        let _ = tx.send(event).await;
    });
}

fn spawn_subtitles(
    client: Arc<SubtitleClient>,
    request: SubtitleRequest,
    ticket: u64,
    tx: mpsc::Sender<FetchEvent>,
) {
    tokio::spawn(async move {
        debug!(ticket, imdb = %request.imdb_id, "subtitle fetch dispatched");
        let event = match client.fetch(&request).await {
            Ok(subtitles) => FetchEvent::SubtitlesLoaded { ticket, subtitles },
            Err(e) => FetchEvent::SubtitlesFailed {
                ticket,
                error: e.to_string(),
            },
        };
        let _ = tx.send(event).await;
    });
}
