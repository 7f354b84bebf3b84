//! Broadcast amber theme for showtui
//!
//! High-contrast amber-on-charcoal palette and style helpers for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Broadcast amber color palette
pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Background: #101014 (charcoal)
    pub const BACKGROUND: Color = Color::Rgb(0x10, 0x10, 0x14);

    /// Primary: #ffb000 (amber)
    pub const PRIMARY: Color = Color::Rgb(0xff, 0xb0, 0x00);

    /// Secondary: #00c8ff (sky blue)
    pub const SECONDARY: Color = Color::Rgb(0x00, 0xc8, 0xff);

    /// Accent: #ffd75f (soft amber)
    pub const ACCENT: Color = Color::Rgb(0xff, 0xd7, 0x5f);

    /// Highlight: #ff5fa2 (rose)
    pub const HIGHLIGHT: Color = Color::Rgb(0xff, 0x5f, 0xa2);

    /// Text: #e6e6e6 (soft white)
    pub const TEXT: Color = Color::Rgb(0xe6, 0xe6, 0xe6);

    /// Dim: #4a4a55 (muted slate)
    pub const DIM: Color = Color::Rgb(0x4a, 0x4a, 0x55);

    /// Success: #2eff6a (green)
    pub const SUCCESS: Color = Color::Rgb(0x2e, 0xff, 0x6a);

    /// Warning: #ffc400 (gold)
    pub const WARNING: Color = Color::Rgb(0xff, 0xc4, 0x00);

    /// Error: #ff3355 (red)
    pub const ERROR: Color = Color::Rgb(0xff, 0x33, 0x55);

    // ═══════════════════════════════════════════════════════════════════════
    // DERIVED COLORS (for UI elements)
    // ═══════════════════════════════════════════════════════════════════════

    /// Slightly lighter background for panels/cards
    pub const BACKGROUND_LIGHT: Color = Color::Rgb(0x18, 0x18, 0x1e);

    /// Border color (dim amber)
    pub const BORDER: Color = Color::Rgb(0x8a, 0x62, 0x00);

    /// Border color when focused (full amber)
    pub const BORDER_FOCUSED: Color = Self::PRIMARY;

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    /// Default text style
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND)
    }

    /// Highlighted text (inverted with primary color)
    pub fn highlighted() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected item style (rose, bold)
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Dimmed/muted text
    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    /// Error style
    pub fn error() -> Style {
        Style::default()
            .fg(Self::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    /// Success style
    pub fn success() -> Style {
        Style::default()
            .fg(Self::SUCCESS)
            .add_modifier(Modifier::BOLD)
    }

    /// Warning style
    pub fn warning() -> Style {
        Style::default()
            .fg(Self::WARNING)
            .add_modifier(Modifier::BOLD)
    }

    /// Title/header style
    pub fn title() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Secondary text style (sky blue)
    pub fn secondary() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    /// Normal/unfocused border
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Focused border
    pub fn border_focused() -> Style {
        Style::default()
            .fg(Self::BORDER_FOCUSED)
            .add_modifier(Modifier::BOLD)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // COMPONENT STYLES
    // ═══════════════════════════════════════════════════════════════════════

    /// Style for list items (normal state)
    pub fn list_item() -> Style {
        Style::default().fg(Self::TEXT)
    }

    /// Style for list items (selected/highlighted)
    pub fn list_item_selected() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for input fields
    pub fn input() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    /// Style for input cursor
    pub fn input_cursor() -> Style {
        Style::default().fg(Self::BACKGROUND).bg(Self::PRIMARY)
    }

    /// Keybinding hint style
    pub fn keybind() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    /// Keybinding description style
    pub fn keybind_desc() -> Style {
        Style::default().fg(Self::DIM)
    }

    /// Status bar style
    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    /// Loading/spinner indicator
    pub fn loading() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Vote average indicator
    pub fn rating() -> Style {
        Style::default().fg(Self::WARNING)
    }

    /// Year/date metadata
    pub fn year() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    /// Genre tags
    pub fn genre() -> Style {
        Style::default().fg(Self::DIM)
    }

    /// Duration text
    pub fn duration() -> Style {
        Style::default().fg(Self::DIM)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// COLOR UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Calculate relative luminance for a color (used in contrast ratio)
/// Formula: https://www.w3.org/TR/WCAG20/#relativeluminancedef
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    fn channel_luminance(c: u8) -> f64 {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * channel_luminance(r) + 0.7152 * channel_luminance(g) + 0.0722 * channel_luminance(b)
}

/// Calculate contrast ratio between two colors
/// Returns a value between 1 (same color) and 21 (black/white)
/// WCAG AA requires >= 4.5:1 for normal text, >= 3:1 for large text
pub fn contrast_ratio(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> f64 {
    let l1 = relative_luminance(fg.0, fg.1, fg.2);
    let l2 = relative_luminance(bg.0, bg.1, bg.2);

    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };

    (lighter + 0.05) / (darker + 0.05)
}

/// Check if a foreground/background pair meets WCAG AA for normal text
pub fn meets_wcag_aa(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 4.5
}

/// Check if a foreground/background pair meets WCAG AA for large text
pub fn meets_wcag_aa_large(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 3.0
}

/// Extract RGB tuple from ratatui Color (only works for Rgb variant)
pub fn color_to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(color: Color) -> (u8, u8, u8) {
        color_to_rgb(color).expect("Theme colors should all be RGB")
    }

    #[test]
    fn test_all_theme_colors_are_rgb() {
        assert!(color_to_rgb(Theme::BACKGROUND).is_some());
        assert!(color_to_rgb(Theme::PRIMARY).is_some());
        assert!(color_to_rgb(Theme::SECONDARY).is_some());
        assert!(color_to_rgb(Theme::ACCENT).is_some());
        assert!(color_to_rgb(Theme::HIGHLIGHT).is_some());
        assert!(color_to_rgb(Theme::TEXT).is_some());
        assert!(color_to_rgb(Theme::DIM).is_some());
        assert!(color_to_rgb(Theme::SUCCESS).is_some());
        assert!(color_to_rgb(Theme::WARNING).is_some());
        assert!(color_to_rgb(Theme::ERROR).is_some());
    }

    #[test]
    fn test_palette_values() {
        assert_eq!(rgb(Theme::BACKGROUND), (0x10, 0x10, 0x14));
        assert_eq!(rgb(Theme::PRIMARY), (0xff, 0xb0, 0x00));
        assert_eq!(rgb(Theme::SECONDARY), (0x00, 0xc8, 0xff));
        assert_eq!(rgb(Theme::ACCENT), (0xff, 0xd7, 0x5f));
        assert_eq!(rgb(Theme::HIGHLIGHT), (0xff, 0x5f, 0xa2));
        assert_eq!(rgb(Theme::TEXT), (0xe6, 0xe6, 0xe6));
        assert_eq!(rgb(Theme::DIM), (0x4a, 0x4a, 0x55));
        assert_eq!(rgb(Theme::SUCCESS), (0x2e, 0xff, 0x6a));
        assert_eq!(rgb(Theme::WARNING), (0xff, 0xc4, 0x00));
        assert_eq!(rgb(Theme::ERROR), (0xff, 0x33, 0x55));
    }

    #[test]
    fn test_text_contrast_against_background() {
        let bg = rgb(Theme::BACKGROUND);
        let text = rgb(Theme::TEXT);

        let ratio = contrast_ratio(text, bg);
        println!("Text/Background contrast ratio: {:.2}:1", ratio);

        // WCAG AA requires >= 4.5:1 for normal text
        assert!(
            meets_wcag_aa(text, bg),
            "Text on background should meet WCAG AA (got {:.2}:1)",
            ratio
        );
    }

    #[test]
    fn test_primary_contrast_against_background() {
        let bg = rgb(Theme::BACKGROUND);
        let primary = rgb(Theme::PRIMARY);

        let ratio = contrast_ratio(primary, bg);
        println!("Primary/Background contrast ratio: {:.2}:1", ratio);

        assert!(
            meets_wcag_aa(primary, bg),
            "Primary on background should meet WCAG AA (got {:.2}:1)",
            ratio
        );
    }

    #[test]
    fn test_highlight_contrast() {
        let bg = rgb(Theme::BACKGROUND);
        let highlight = rgb(Theme::HIGHLIGHT);

        let ratio = contrast_ratio(highlight, bg);
        println!("Highlight/Background contrast ratio: {:.2}:1", ratio);

        assert!(
            meets_wcag_aa_large(highlight, bg),
            "Highlight on background should meet WCAG AA for large text (got {:.2}:1)",
            ratio
        );
    }

    #[test]
    fn test_error_contrast() {
        let bg = rgb(Theme::BACKGROUND);
        let error = rgb(Theme::ERROR);

        let ratio = contrast_ratio(error, bg);
        println!("Error/Background contrast ratio: {:.2}:1", ratio);

        assert!(
            meets_wcag_aa_large(error, bg),
            "Error on background should meet WCAG AA for large text (got {:.2}:1)",
            ratio
        );
    }

    #[test]
    fn test_inverted_highlighted_contrast() {
        // Inverted selection (background-on-primary) must stay readable
        let fg = rgb(Theme::BACKGROUND);
        let bg = rgb(Theme::PRIMARY);

        let ratio = contrast_ratio(fg, bg);
        println!("Background on Primary contrast ratio: {:.2}:1", ratio);

        assert!(
            meets_wcag_aa_large(fg, bg),
            "Inverted highlight should be readable (got {:.2}:1)",
            ratio
        );
    }

    #[test]
    fn test_style_helpers_return_valid_styles() {
        let _ = Theme::text();
        let _ = Theme::highlighted();
        let _ = Theme::selected();
        let _ = Theme::dimmed();
        let _ = Theme::error();
        let _ = Theme::success();
        let _ = Theme::warning();
        let _ = Theme::title();
        let _ = Theme::secondary();
        let _ = Theme::border();
        let _ = Theme::border_focused();
        let _ = Theme::list_item();
        let _ = Theme::list_item_selected();
        let _ = Theme::input();
        let _ = Theme::input_cursor();
        let _ = Theme::keybind();
        let _ = Theme::keybind_desc();
        let _ = Theme::status_bar();
        let _ = Theme::loading();
        let _ = Theme::rating();
        let _ = Theme::year();
        let _ = Theme::genre();
        let _ = Theme::duration();
    }

    #[test]
    fn test_relative_luminance_black() {
        let lum = relative_luminance(0, 0, 0);
        assert!((lum - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_relative_luminance_white() {
        let lum = relative_luminance(255, 255, 255);
        assert!((lum - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_contrast_ratio_black_white() {
        let ratio = contrast_ratio((0, 0, 0), (255, 255, 255));
        assert!((ratio - 21.0).abs() < 0.1);
    }

    #[test]
    fn test_contrast_ratio_same_color() {
        let ratio = contrast_ratio((100, 100, 100), (100, 100, 100));
        assert!((ratio - 1.0).abs() < 0.001);
    }
}
