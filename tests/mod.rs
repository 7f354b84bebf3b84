//! Integration tests for showtui
//!
//! Tests are organized by component:
//! - tmdb_test: TMDB API client tests
//! - subtitles_test: Subtitle addon client tests
//! - cli_test: CLI argument parsing and JSON output tests
//! - ui_test: UI component and full-screen render tests
//! - flow_test: End-to-end fetch pipeline tests (TUI event loop semantics)

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs
