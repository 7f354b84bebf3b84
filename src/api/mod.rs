//! API clients for external services
//!
//! - TMDB: movie/TV metadata, seasons, and episodes
//! - Subtitles: subtitle lookup via the Stremio addon protocol

pub mod subtitles;
pub mod tmdb;

pub use subtitles::{SubtitleClient, SubtitleRequest};
pub use tmdb::{TmdbClient, TmdbError};
