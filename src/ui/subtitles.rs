//! Subtitle lookup view
//!
//! Shows what is being probed, the one-line outcome, and the full result
//! list underneath.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, BorderType, List, ListItem, Paragraph},
};

use crate::api::subtitles::lang_code_to_name;
use crate::app::{App, LoadingState, SubtitleTarget};
use crate::models::Subtitle;
use crate::ui::Theme;

/// Render the subtitle screen
pub fn render_subtitles(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Outcome summary
            Constraint::Min(3),    // Result list
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    render_summary(frame, app, chunks[1]);
    render_results(frame, app, chunks[2]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let label = app
        .subtitles
        .target
        .as_ref()
        .map(target_label)
        .unwrap_or_else(|| "No lookup started".to_string());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Theme::border_focused())
        .title(Span::styled(" showtui ", Theme::title()));

    let header = Paragraph::new(Line::from(Span::styled(
        format!("SUBTITLES - {}", label),
        Theme::title(),
    )))
    .block(block)
    .alignment(Alignment::Center);

    frame.render_widget(header, area);
}

/// The one-line probe outcome
fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let state = &app.subtitles;
    let style = match &state.loading {
        LoadingState::Loading(_) => Theme::loading(),
        LoadingState::Error(_) => Theme::error(),
        LoadingState::Idle => {
            if state.subtitles.is_empty() {
                Theme::warning()
            } else {
                Theme::success()
            }
        }
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(" RESULT ", Theme::title()));

    let summary = Paragraph::new(Line::from(Span::styled(state.summary(), style)))
        .block(block)
        .alignment(Alignment::Left);

    frame.render_widget(summary, area);
}

fn render_results(frame: &mut Frame, app: &mut App, area: Rect) {
    let count = app.subtitles.subtitles.len();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(
            format!(" MATCHES ({}) ", count),
            Theme::title(),
        ));

    if app.subtitles.subtitles.is_empty() {
        let empty = Paragraph::new("Nothing to list")
            .style(Theme::dimmed())
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2) as usize;
    app.subtitles.list.scroll_into_view(visible_height);

    let items: Vec<ListItem> = app
        .subtitles
        .subtitles
        .iter()
        .enumerate()
        .skip(app.subtitles.list.offset)
        .take(visible_height)
        .map(|(i, sub)| ListItem::new(subtitle_line(sub, i == app.subtitles.list.selected)))
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

/// Header label for what is being probed
/// Format: Breaking Bad S01E02 · English
pub fn target_label(target: &SubtitleTarget) -> String {
    let mut label = target.title.clone();
    if let (Some(season), Some(episode)) = (target.request.season, target.request.episode) {
        label.push_str(&format!(" S{:02}E{:02}", season, episode));
    }
    if let Some(lang) = &target.request.language {
        label.push_str(&format!(" · {}", lang_code_to_name(lang)));
    }
    label
}

fn subtitle_line(sub: &Subtitle, is_selected: bool) -> Line<'static> {
    let marker = if is_selected { "▸ " } else { "  " };
    let url: String = sub.url.chars().take(70).collect();

    Line::from(vec![
        Span::styled(
            marker.to_string(),
            if is_selected {
                Theme::selected()
            } else {
                Theme::dimmed()
            },
        ),
        Span::styled(format!("[{}]", sub.language), Theme::secondary()),
        Span::raw(" "),
        Span::styled(
            url,
            if is_selected {
                Theme::list_item_selected()
            } else {
                Theme::text()
            },
        ),
    ])
}
