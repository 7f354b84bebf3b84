//! Terminal UI components
//!
//! Built with ratatui. Keyboard-first navigation throughout; every frame is
//! drawn from the current `App` state.

pub mod browser;
pub mod detail;
pub mod subtitles;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, BorderType, Clear, Paragraph, Wrap},
};

use crate::app::{App, InputMode, Screen};

/// Draw one frame of the whole interface
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    frame.render_widget(Block::default().style(Theme::text()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(area);

    match app.screen {
        Screen::Home => browser::render_home(frame, app, chunks[0]),
        Screen::Search => browser::render_search(frame, app, chunks[0]),
        Screen::Detail => detail::render_detail(frame, app, chunks[0]),
        Screen::Subtitles => subtitles::render_subtitles(frame, app, chunks[0]),
    }

    render_status_bar(frame, app, chunks[1]);

    if let Some(msg) = app.error.clone() {
        render_error_popup(frame, &msg, area);
    }
}

/// Bottom bar: keybind hints on the left, transient status on the right
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hints = keybind_hints(app);

    let mut spans = Vec::new();
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Theme::status_bar()));
        }
        spans.push(Span::styled(format!("[{}]", key), Theme::keybind()));
        spans.push(Span::styled(format!(" {}", desc), Theme::keybind_desc()));
    }

    if let Some(status) = &app.status {
        spans.push(Span::styled("  ", Theme::status_bar()));
        spans.push(Span::styled(status.clone(), Theme::success()));
    }

    let bar = Paragraph::new(Line::from(spans)).style(Theme::status_bar());
    frame.render_widget(bar, area);
}

/// Context-sensitive keybind hints for the current screen
fn keybind_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    if app.input_mode == InputMode::Editing {
        return vec![("Enter", "search"), ("Esc", "cancel")];
    }

    match app.screen {
        Screen::Home => vec![
            ("↑↓", "navigate"),
            ("Enter", "open"),
            ("/", "search"),
            ("r", "refresh"),
            ("q", "quit"),
        ],
        Screen::Search => vec![
            ("↑↓", "navigate"),
            ("Enter", "open"),
            ("/", "edit query"),
            ("Esc", "back"),
            ("q", "quit"),
        ],
        Screen::Detail => vec![
            ("Tab", "panel"),
            ("↑↓", "navigate"),
            ("Enter", "select"),
            ("u", "subtitles"),
            ("Esc", "back"),
        ],
        Screen::Subtitles => vec![
            ("↑↓", "navigate"),
            ("r", "retry"),
            ("Esc", "back"),
            ("q", "quit"),
        ],
    }
}

/// Centered error popup over the current screen
fn render_error_popup(frame: &mut Frame, msg: &str, area: Rect) {
    let popup = centered_rect(50, 20, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Theme::error())
        .title(Span::styled(" ERROR ", Theme::error()));

    let text = Paragraph::new(msg.to_string())
        .style(Theme::text())
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(block);

    frame.render_widget(Clear, popup);
    frame.render_widget(text, popup);
}

/// Rect centered in `area` taking the given width/height percentages
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(50, 20, area);

        assert!(popup.width <= area.width);
        assert!(popup.height <= area.height);
        assert!(popup.x >= area.x);
        assert!(popup.y >= area.y);
        assert!(popup.right() <= area.right());
        assert!(popup.bottom() <= area.bottom());
    }

    #[test]
    fn test_keybind_hints_editing_mode() {
        let mut app = App::new();
        app.focus_search();
        let hints = keybind_hints(&app);
        assert!(hints.iter().any(|(k, _)| *k == "Enter"));
        assert!(hints.iter().any(|(k, _)| *k == "Esc"));
        assert_eq!(hints.len(), 2);
    }

    #[test]
    fn test_keybind_hints_per_screen() {
        let mut app = App::new();
        assert!(keybind_hints(&app).iter().any(|(k, _)| *k == "/"));

        app.navigate(Screen::Detail);
        assert!(keybind_hints(&app).iter().any(|(k, _)| *k == "u"));

        app.navigate(Screen::Subtitles);
        assert!(keybind_hints(&app).iter().any(|(k, _)| *k == "r"));
    }
}
