//! Configuration management for ShowTUI
//!
//! Handles config file loading and API key resolution.
//! Config is stored at ~/.config/showtui/config.toml

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// TMDB API key
    pub tmdb_api_key: Option<String>,
    /// Subtitle addon base URL override
    pub subtitle_addon: Option<String>,
    /// Preferred subtitle language code (e.g. "en")
    pub subtitle_language: Option<String>,
}

impl Config {
    /// Get config file path (~/.config/showtui/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("showtui").join("config.toml"))
    }

    /// Load config from file, or return default if not found
    pub fn load() -> Self {
        Self::path()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Resolve the TMDB API key:
    /// 1. Environment variable TMDB_API_KEY
    /// 2. Key from config file
    pub fn tmdb_api_key(&self) -> Option<String> {
        if let Ok(key) = std::env::var("TMDB_API_KEY") {
            if !key.is_empty() {
                return Some(key);
            }
        }
        self.tmdb_api_key.clone()
    }

    /// Resolve the TMDB API key or fail with setup guidance
    pub fn require_tmdb_api_key(&self) -> Result<String> {
        self.tmdb_api_key().ok_or_else(|| {
            anyhow::anyhow!(
                "TMDB API key not configured. Set the TMDB_API_KEY environment variable \
                 or add tmdb_api_key to {}",
                Self::path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "the config file".to_string())
            )
        })
    }

    /// Preferred subtitle language, defaulting to English
    pub fn subtitle_language(&self) -> String {
        self.subtitle_language
            .clone()
            .unwrap_or_else(|| "en".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.tmdb_api_key.is_none());
        assert!(config.subtitle_addon.is_none());
        assert_eq!(config.subtitle_language(), "en");
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let config = Config {
            tmdb_api_key: Some("abc123".to_string()),
            subtitle_addon: Some("https://subs.example".to_string()),
            subtitle_language: Some("es".to_string()),
        };
        let toml = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&toml).unwrap();
        assert_eq!(back.tmdb_api_key.as_deref(), Some("abc123"));
        assert_eq!(back.subtitle_addon.as_deref(), Some("https://subs.example"));
        assert_eq!(back.subtitle_language(), "es");
    }

    #[test]
    fn test_config_tolerates_unknown_and_missing_fields() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.tmdb_api_key.is_none());

        let config: Config = toml::from_str("tmdb_api_key = \"k\"\n").unwrap();
        assert_eq!(config.tmdb_api_key.as_deref(), Some("k"));
    }

    #[test]
    fn test_subtitle_language_default() {
        let config = Config {
            subtitle_language: None,
            ..Config::default()
        };
        assert_eq!(config.subtitle_language(), "en");
    }
}
