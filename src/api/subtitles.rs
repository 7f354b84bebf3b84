//! Stremio-compatible subtitle addon client
//!
//! Free subtitle lookup using Stremio's public addon endpoint.
//! No API key required - uses Stremio's OpenSubtitles v3 addon.
//!
//! The client only lists what the addon offers (language + URL per entry);
//! nothing is downloaded.

use crate::models::{MediaKind, Subtitle};
use anyhow::{anyhow, Result};
use serde::Deserialize;

const DEFAULT_ADDON_URL: &str = "https://opensubtitles-v3.strem.io";

/// One subtitle lookup: content identity plus an optional language filter.
///
/// Movie lookups need only the IMDb id; series lookups also need the season
/// and episode numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleRequest {
    pub imdb_id: String,
    pub kind: MediaKind,
    pub season: Option<u8>,
    pub episode: Option<u16>,
    pub language: Option<String>,
}

impl SubtitleRequest {
    pub fn movie(imdb_id: impl Into<String>) -> Self {
        Self {
            imdb_id: imdb_id.into(),
            kind: MediaKind::Movie,
            season: None,
            episode: None,
            language: None,
        }
    }

    pub fn episode(imdb_id: impl Into<String>, season: u8, episode: u16) -> Self {
        Self {
            imdb_id: imdb_id.into(),
            kind: MediaKind::Tv,
            season: Some(season),
            episode: Some(episode),
            language: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// Subtitle client using Stremio's free public endpoint
pub struct SubtitleClient {
    base_url: String,
    client: reqwest::Client,
}

/// Stremio subtitle response
#[derive(Debug, Deserialize)]
struct StremioResponse {
    subtitles: Vec<StremioSubtitle>,
}

/// Single subtitle from Stremio
#[derive(Debug, Deserialize)]
struct StremioSubtitle {
    id: String,
    url: String,
    lang: String,
}

impl SubtitleClient {
    /// Create a new subtitle client (free, no API key)
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_ADDON_URL)
    }

    /// Create with custom base URL (config override or testing)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Fetch the subtitle entries matching a request.
    ///
    /// The language filter accepts comma-separated codes ("en,es"); two- and
    /// three-letter codes for the same language are interchangeable. `None`
    /// returns all languages.
    pub async fn fetch(&self, request: &SubtitleRequest) -> Result<Vec<Subtitle>> {
        let imdb = normalize_imdb_id(&request.imdb_id);
        let url = match request.kind {
            MediaKind::Movie => format!("{}/subtitles/movie/{}.json", self.base_url, imdb),
            MediaKind::Tv => {
                let (season, episode) = request
                    .season
                    .zip(request.episode)
                    .ok_or_else(|| anyhow!("series subtitle lookup needs season and episode"))?;
                format!(
                    "{}/subtitles/series/{}:{}:{}.json",
                    self.base_url, imdb, season, episode
                )
            }
        };

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(anyhow!("Subtitle addon error: {}", response.status()));
        }

        let api_response: StremioResponse = response.json().await?;

        let filters: Vec<String> = request
            .language
            .as_deref()
            .map(|l| l.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_default();

        let results: Vec<Subtitle> = api_response
            .subtitles
            .into_iter()
            .filter(|s| matches_language(&s.lang, &filters))
            .map(|s| Subtitle {
                id: s.id,
                language: s.lang,
                url: s.url,
            })
            .collect();

        Ok(results)
    }
}

impl Default for SubtitleClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Language filter: empty filter list passes everything; otherwise a
/// subtitle passes when any filter names the same language, with two- and
/// three-letter codes treated as equal
fn matches_language(sub_lang: &str, filters: &[String]) -> bool {
    if filters.is_empty() {
        return true;
    }
    filters.iter().any(|lang| {
        sub_lang.eq_ignore_ascii_case(lang)
            || canonical_lang_code(sub_lang) == canonical_lang_code(lang)
    })
}

/// Collapse a language code to the three-letter form the addon tags
/// subtitles with. Unknown codes pass through lowercased.
fn canonical_lang_code(code: &str) -> String {
    let code = code.to_ascii_lowercase();
    let canonical = match code.as_str() {
        "en" => "eng",
        "es" => "spa",
        "fr" | "fra" => "fre",
        "de" | "deu" => "ger",
        "it" => "ita",
        "pt" | "pob" => "por",
        "ru" => "rus",
        "ja" => "jpn",
        "ko" => "kor",
        "zh" | "zho" => "chi",
        "ar" => "ara",
        "hi" => "hin",
        "nl" | "nld" => "dut",
        "pl" => "pol",
        "tr" => "tur",
        "sv" => "swe",
        "no" => "nor",
        "da" => "dan",
        "fi" => "fin",
        "el" | "ell" => "gre",
        "he" => "heb",
        "hu" => "hun",
        "cs" | "ces" => "cze",
        "ro" | "ron" => "rum",
        "uk" => "ukr",
        "vi" => "vie",
        "th" => "tha",
        "id" => "ind",
        _ => return code,
    };
    canonical.to_string()
}

/// Normalize IMDb ID to have "tt" prefix
pub fn normalize_imdb_id(imdb_id: &str) -> String {
    if imdb_id.starts_with("tt") {
        imdb_id.to_string()
    } else {
        format!("tt{}", imdb_id)
    }
}

/// Convert a language code (2- or 3-letter) to a display name
pub fn lang_code_to_name(code: &str) -> String {
    let name = match canonical_lang_code(code).as_str() {
        "eng" => "English",
        "spa" => "Spanish",
        "fre" => "French",
        "ger" => "German",
        "ita" => "Italian",
        "por" => "Portuguese",
        "rus" => "Russian",
        "jpn" => "Japanese",
        "kor" => "Korean",
        "chi" => "Chinese",
        "ara" => "Arabic",
        "hin" => "Hindi",
        "dut" => "Dutch",
        "pol" => "Polish",
        "tur" => "Turkish",
        "swe" => "Swedish",
        "nor" => "Norwegian",
        "dan" => "Danish",
        "fin" => "Finnish",
        "gre" => "Greek",
        "heb" => "Hebrew",
        "hun" => "Hungarian",
        "cze" => "Czech",
        "rum" => "Romanian",
        "ukr" => "Ukrainian",
        "vie" => "Vietnamese",
        "tha" => "Thai",
        "ind" => "Indonesian",
        _ => return code.to_uppercase(),
    };
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_imdb_id() {
        assert_eq!(normalize_imdb_id("tt0903747"), "tt0903747");
        assert_eq!(normalize_imdb_id("0903747"), "tt0903747");
    }

    #[test]
    fn test_lang_code_to_name() {
        assert_eq!(lang_code_to_name("eng"), "English");
        assert_eq!(lang_code_to_name("en"), "English");
        assert_eq!(lang_code_to_name("SPA"), "Spanish");
        assert_eq!(lang_code_to_name("xyz"), "XYZ");
    }

    #[test]
    fn test_matches_language_empty_filter_passes_all() {
        assert!(matches_language("eng", &[]));
        assert!(matches_language("anything", &[]));
    }

    #[test]
    fn test_matches_language_short_and_long_forms() {
        let filters = vec!["en".to_string()];
        assert!(matches_language("eng", &filters));
        assert!(matches_language("en", &filters));
        assert!(!matches_language("spa", &filters));

        let filters = vec!["eng".to_string()];
        assert!(matches_language("en", &filters));
    }

    #[test]
    fn test_matches_language_bibliographic_codes() {
        assert!(matches_language("spa", &["es".to_string()]));
        assert!(matches_language("ger", &["de".to_string()]));
        assert!(matches_language("fre", &["fr".to_string()]));
        assert!(matches_language("ger", &["deu".to_string()]));
        assert!(matches_language("chi", &["zh".to_string()]));
        assert!(!matches_language("spa", &["pt".to_string()]));
        assert!(!matches_language("fre", &["de".to_string()]));
    }

    #[test]
    fn test_canonical_lang_code() {
        assert_eq!(canonical_lang_code("es"), "spa");
        assert_eq!(canonical_lang_code("DE"), "ger");
        assert_eq!(canonical_lang_code("fra"), "fre");
        assert_eq!(canonical_lang_code("eng"), "eng");
        assert_eq!(canonical_lang_code("xx"), "xx");
    }

    #[test]
    fn test_matches_language_comma_separated() {
        let filters = vec!["en".to_string(), "es".to_string()];
        assert!(matches_language("eng", &filters));
        assert!(matches_language("spa", &filters));
        assert!(!matches_language("ger", &filters));
    }

    #[test]
    fn test_request_constructors() {
        let movie = SubtitleRequest::movie("tt0111161").with_language("en");
        assert_eq!(movie.kind, MediaKind::Movie);
        assert_eq!(movie.season, None);
        assert_eq!(movie.language.as_deref(), Some("en"));

        let ep = SubtitleRequest::episode("0903747", 1, 3);
        assert_eq!(ep.kind, MediaKind::Tv);
        assert_eq!(ep.season, Some(1));
        assert_eq!(ep.episode, Some(3));
        assert_eq!(ep.language, None);
    }
}
