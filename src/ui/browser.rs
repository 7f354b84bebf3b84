//! Home and search views
//!
//! Renders trending content and search results as selectable lists.
//! All list state lives on the `App`; these functions only draw it.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, BorderType, List, ListItem, Paragraph},
};

use crate::app::{App, InputMode, ListCursor, LoadingState};
use crate::models::{MediaItem, MediaKind};
use crate::ui::Theme;

/// Render the home screen (trending list)
pub fn render_home(frame: &mut Frame, app: &mut App, area: Rect) {
    render_media_list(
        frame,
        area,
        "TRENDING",
        &app.browse.items,
        &mut app.browse.list,
        &app.browse.loading,
        true,
    );
}

/// Render the search screen (input box above results)
pub fn render_search(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    render_search_input(frame, app, chunks[0]);

    let focused = app.input_mode == InputMode::Normal;
    render_media_list(
        frame,
        chunks[1],
        "RESULTS",
        &app.search.results,
        &mut app.search.list,
        &app.search.loading,
        focused,
    );
}

/// Render the search input box with an inline block cursor
fn render_search_input(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.input_mode == InputMode::Editing;
    let border_style = if editing {
        Theme::border_focused()
    } else {
        Theme::border()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(Span::styled(" SEARCH ", Theme::title()));

    let query = &app.search.query;
    let cursor = app.search.cursor.min(query.len());

    let line = if editing {
        let before: String = query.chars().take(cursor).collect();
        let at: String = query.chars().skip(cursor).take(1).collect();
        let after: String = query.chars().skip(cursor + 1).collect();
        let cursor_char = if at.is_empty() { " ".to_string() } else { at };

        Line::from(vec![
            Span::styled(before, Theme::text()),
            Span::styled(cursor_char, Theme::input_cursor()),
            Span::styled(after, Theme::text()),
        ])
    } else if query.is_empty() {
        Line::from(Span::styled("Press / to search", Theme::dimmed()))
    } else {
        Line::from(Span::styled(query.clone(), Theme::text()))
    };

    let input = Paragraph::new(line).block(block);
    frame.render_widget(input, area);
}

/// Render a list of media items with loading/error/empty states
fn render_media_list(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    items: &[MediaItem],
    list: &mut ListCursor,
    loading: &LoadingState,
    focused: bool,
) {
    let border_style = if focused {
        Theme::border_focused()
    } else {
        Theme::border()
    };

    let block = |title_text: String| {
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Span::styled(title_text, Theme::title()))
    };

    if loading.is_loading() {
        let msg = loading.message().unwrap_or("Loading...").to_string();
        let widget = Paragraph::new(msg)
            .style(Theme::loading())
            .alignment(Alignment::Center)
            .block(block(format!(" {} ", title)));
        frame.render_widget(widget, area);
        return;
    }

    if let LoadingState::Error(msg) = loading {
        let widget = Paragraph::new(msg.clone())
            .style(Theme::error())
            .alignment(Alignment::Center)
            .block(block(format!(" {} ", title)));
        frame.render_widget(widget, area);
        return;
    }

    if items.is_empty() {
        let widget = Paragraph::new("No content to display")
            .style(Theme::dimmed())
            .alignment(Alignment::Center)
            .block(block(format!(" {} ", title)));
        frame.render_widget(widget, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2) as usize;
    list.scroll_into_view(visible_height);

    let rows: Vec<ListItem> = items
        .iter()
        .enumerate()
        .skip(list.offset)
        .take(visible_height)
        .map(|(i, item)| ListItem::new(media_line(item, i == list.selected)))
        .collect();

    let counter = format!(" {} ({}/{}) ", title, list.selected + 1, items.len());
    let widget = List::new(rows).block(block(counter)).style(Theme::text());
    frame.render_widget(widget, area);
}

/// Build the display line for one media item
/// Format: ▸ Title (Year) [TYPE] ★ 8.5
fn media_line(item: &MediaItem, is_selected: bool) -> Line<'static> {
    let marker = if is_selected { "▸ " } else { "  " };
    let year_str = item.year.map(|y| format!(" ({})", y)).unwrap_or_default();

    Line::from(vec![
        Span::styled(
            marker.to_string(),
            if is_selected {
                Theme::selected()
            } else {
                Theme::dimmed()
            },
        ),
        Span::styled(
            item.title.clone(),
            if is_selected {
                Theme::list_item_selected()
            } else {
                Theme::text()
            },
        ),
        Span::styled(
            year_str,
            if is_selected {
                Theme::selected()
            } else {
                Theme::year()
            },
        ),
        Span::raw(" "),
        Span::styled(
            format!("[{}]", kind_label(item.kind)),
            if is_selected {
                Theme::selected()
            } else {
                Theme::secondary()
            },
        ),
        Span::raw(" "),
        Span::styled(
            format!("★ {:.1}", item.vote_average),
            rating_style(item.vote_average, is_selected),
        ),
    ])
}

/// Display label for a media kind
pub fn kind_label(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Movie => "MOVIE",
        MediaKind::Tv => "TV",
    }
}

/// Style for a vote average based on value
pub fn rating_style(rating: f32, is_selected: bool) -> Style {
    if is_selected {
        Theme::selected()
    } else if rating >= 7.5 {
        Theme::success()
    } else if rating >= 6.0 {
        Theme::warning()
    } else if rating >= 4.0 {
        Theme::dimmed()
    } else {
        Theme::error()
    }
}
