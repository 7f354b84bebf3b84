//! CLI Command Handlers
//!
//! Implements all CLI commands by calling the appropriate backend services.
//! Each handler takes CLI args and Output, returns ExitCode.

use crate::api::{SubtitleClient, SubtitleRequest, TmdbClient, TmdbError};
use crate::cli::{
    validate_imdb_id, EpisodesCmd, ExitCode, InfoCmd, MediaKindFilter, Output, SearchCmd,
    SubtitlesCmd, TrendingCmd,
};
use crate::config::Config;

// =============================================================================
// Shared Helpers
// =============================================================================

/// Build a TMDB client from config, or report the missing-key error.
fn tmdb_client(output: &Output) -> Result<TmdbClient, ExitCode> {
    let config = Config::load();
    match config.require_tmdb_api_key() {
        Ok(key) => Ok(TmdbClient::new(key)),
        Err(e) => Err(output.error(e.to_string(), ExitCode::Error)),
    }
}

/// Exit code for a failed TMDB fetch. 404 means the id does not exist,
/// which is a no-results situation rather than a transport failure.
fn tmdb_exit_code(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<TmdbError>() {
        Some(TmdbError::NotFound) => ExitCode::NoResults,
        _ => ExitCode::NetworkError,
    }
}

// =============================================================================
// Search Command
// =============================================================================

pub async fn search_cmd(cmd: SearchCmd, output: &Output) -> ExitCode {
    let client = match tmdb_client(output) {
        Ok(client) => client,
        Err(code) => return code,
    };

    output.info(format!("Searching for: {}", cmd.query));

    match client.search(&cmd.query).await {
        Ok(mut results) => {
            // Filter by media type if specified
            if let Some(filter) = cmd.media_type {
                results.retain(|r| filter.matches(r.kind));
            }

            // Filter by year range
            if let Some(year_from) = cmd.year_from {
                results.retain(|r| r.year.map(|y| y >= year_from).unwrap_or(false));
            }
            if let Some(year_to) = cmd.year_to {
                results.retain(|r| r.year.map(|y| y <= year_to).unwrap_or(false));
            }

            // Limit results
            results.truncate(cmd.limit);

            if results.is_empty() {
                return output.error("No results found", ExitCode::NoResults);
            }

            if let Err(e) = output.print(&results) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        Err(e) => output.error(format!("Search failed: {}", e), tmdb_exit_code(&e)),
    }
}

// =============================================================================
// Trending Command
// =============================================================================

pub async fn trending_cmd(cmd: TrendingCmd, output: &Output) -> ExitCode {
    let client = match tmdb_client(output) {
        Ok(client) => client,
        Err(code) => return code,
    };

    output.info("Fetching trending titles...");

    match client.trending().await {
        Ok(mut results) => {
            // Filter by media type if specified
            if let Some(filter) = cmd.media_type {
                results.retain(|r| filter.matches(r.kind));
            }

            // Limit results
            results.truncate(cmd.limit);

            if results.is_empty() {
                return output.error("No trending titles found", ExitCode::NoResults);
            }

            if let Err(e) = output.print(&results) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        Err(e) => output.error(format!("Trending fetch failed: {}", e), tmdb_exit_code(&e)),
    }
}

// =============================================================================
// Info Command
// =============================================================================

pub async fn info_cmd(cmd: InfoCmd, output: &Output) -> ExitCode {
    let client = match tmdb_client(output) {
        Ok(client) => client,
        Err(code) => return code,
    };

    output.info(format!("Getting info for: {}", cmd.id));

    match cmd.media_type {
        MediaKindFilter::Movie => match client.movie_details(cmd.id).await {
            Ok(detail) => {
                if let Err(e) = output.print(&detail) {
                    return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
                }
                ExitCode::Success
            }
            Err(e) => output.error(format!("Movie info failed: {}", e), tmdb_exit_code(&e)),
        },
        MediaKindFilter::Tv => match client.show_details(cmd.id).await {
            Ok(detail) => {
                if let Err(e) = output.print(&detail) {
                    return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
                }
                ExitCode::Success
            }
            Err(e) => output.error(format!("TV info failed: {}", e), tmdb_exit_code(&e)),
        },
    }
}

// =============================================================================
// Episodes Command
// =============================================================================

pub async fn episodes_cmd(cmd: EpisodesCmd, output: &Output) -> ExitCode {
    let client = match tmdb_client(output) {
        Ok(client) => client,
        Err(code) => return code,
    };

    output.info(format!(
        "Fetching season {} of show {}...",
        cmd.season, cmd.show_id
    ));

    match client.season_episodes(cmd.show_id, cmd.season).await {
        Ok(episodes) => {
            if episodes.is_empty() {
                return output.error(
                    format!("No episodes found for season {}", cmd.season),
                    ExitCode::NoResults,
                );
            }

            if let Err(e) = output.print(&episodes) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        Err(e) => output.error(format!("Episode fetch failed: {}", e), tmdb_exit_code(&e)),
    }
}

// =============================================================================
// Subtitles Command
// =============================================================================

pub async fn subtitles_cmd(cmd: SubtitlesCmd, output: &Output) -> ExitCode {
    if let Err(msg) = validate_imdb_id(&cmd.imdb_id) {
        return output.error(msg, ExitCode::InvalidArgs);
    }

    let request = match cmd.episode_ref() {
        Ok(Some((season, episode))) => SubtitleRequest::episode(&cmd.imdb_id, season, episode),
        Ok(None) => SubtitleRequest::movie(&cmd.imdb_id),
        Err(msg) => return output.error(msg, ExitCode::InvalidArgs),
    }
    .with_language(&cmd.lang);

    output.info(format!(
        "Searching subtitles for: {} ({})",
        cmd.imdb_id, cmd.lang
    ));

    let config = Config::load();
    let client = match config.subtitle_addon.as_deref() {
        Some(url) => SubtitleClient::with_base_url(url),
        None => SubtitleClient::new(),
    };
    match client.fetch(&request).await {
        Ok(mut subtitles) => {
            if subtitles.is_empty() {
                return output.error("No subtitles found", ExitCode::NoResults);
            }

            // Limit results
            subtitles.truncate(cmd.limit);

            if let Err(e) = output.print(&subtitles) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        Err(e) => output.error(
            format!("Subtitle search failed: {}", e),
            ExitCode::NetworkError,
        ),
    }
}
