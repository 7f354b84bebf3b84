//! Detail view for movies and TV shows
//!
//! Left panel renders the hero metadata from whatever item the screen was
//! opened with; the season rail and episode grid fill in as fetches resolve.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, BorderType, List, ListItem, Paragraph, Wrap},
};

use crate::app::{App, DetailFocus, DetailState};
use crate::models::{format_runtime, Episode, MediaKind, SeasonSummary};
use crate::ui::browser::{kind_label, rating_style};
use crate::ui::Theme;

/// Render the detail screen
pub fn render_detail(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(detail) = app.detail.as_mut() else {
        render_empty(frame, area);
        return;
    };

    match detail.item.kind {
        MediaKind::Movie => render_info_panel(frame, detail, area),
        MediaKind::Tv => {
            let h_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(area);

            render_info_panel(frame, detail, h_chunks[0]);

            let v_chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
                .split(h_chunks[1]);

            render_seasons_panel(frame, detail, v_chunks[0]);
            render_episodes_panel(frame, detail, v_chunks[1]);
        }
    }
}

fn render_empty(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(" DETAIL ", Theme::title()));

    let empty = Paragraph::new("No media selected")
        .style(Theme::dimmed())
        .alignment(Alignment::Center)
        .block(block);

    frame.render_widget(empty, area);
}

/// Render the hero panel (title, rating, overview)
fn render_info_panel(frame: &mut Frame, detail: &DetailState, area: Rect) {
    let is_focused = detail.focus == DetailFocus::Info;
    let border_style = if is_focused {
        Theme::border_focused()
    } else {
        Theme::border()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(Span::styled(" INFO ", Theme::title()));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let item = &detail.item;
    let mut lines = Vec::new();

    let year_str = item.year.map(|y| format!(" ({})", y)).unwrap_or_default();
    lines.push(Line::from(vec![
        Span::styled("▶ ", Theme::selected()),
        Span::styled(item.title.clone(), Theme::title()),
        Span::styled(year_str, Theme::secondary()),
    ]));

    let mut meta_spans = vec![
        Span::styled(
            format!("★ {:.1}", item.vote_average),
            rating_style(item.vote_average, false),
        ),
        Span::styled(" │ ", Theme::dimmed()),
        Span::styled(format!("[{}]", kind_label(item.kind)), Theme::secondary()),
    ];
    if let Some(runtime) = item.runtime {
        meta_spans.push(Span::styled(" │ ", Theme::dimmed()));
        meta_spans.push(Span::styled(format_runtime(runtime), Theme::duration()));
    }
    if item.kind == MediaKind::Tv && !detail.seasons.is_empty() {
        meta_spans.push(Span::styled(" │ ", Theme::dimmed()));
        meta_spans.push(Span::styled(
            format!("{} seasons", detail.seasons.len()),
            Theme::secondary(),
        ));
    }
    lines.push(Line::from(meta_spans));

    if !item.genres.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Genre: ", Theme::dimmed()),
            Span::styled(item.genres.join(", "), Theme::text()),
        ]));
    }

    if detail.details.is_loading() {
        lines.push(Line::from(Span::styled(
            "Fetching details...",
            Theme::loading(),
        )));
    }

    lines.push(Line::from(Span::styled(
        "─".repeat(inner.width as usize),
        Theme::dimmed(),
    )));

    if !item.overview.is_empty() {
        lines.push(Line::from(Span::styled("OVERVIEW", Theme::keybind())));
        lines.push(Line::from(""));
        for line in item.overview.lines() {
            lines.push(Line::from(Span::styled(line.to_string(), Theme::text())));
        }
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: true })
        .scroll((detail.overview_scroll, 0));

    frame.render_widget(paragraph, inner);
}

/// Render the season rail
fn render_seasons_panel(frame: &mut Frame, detail: &mut DetailState, area: Rect) {
    let is_focused = detail.focus == DetailFocus::Seasons;
    let border_style = if is_focused {
        Theme::border_focused()
    } else {
        Theme::border()
    };

    let title = format!(" SEASONS ({}) ", detail.seasons.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(Span::styled(title, Theme::title()));

    if detail.seasons.is_empty() {
        let text = if detail.details.is_loading() {
            Paragraph::new("Loading...").style(Theme::loading())
        } else {
            Paragraph::new("No seasons").style(Theme::dimmed())
        };
        frame.render_widget(text.alignment(Alignment::Center).block(block), area);
        return;
    }

    let visible_height = area.height.saturating_sub(2) as usize;
    detail.season_list.scroll_into_view(visible_height);

    let items: Vec<ListItem> = detail
        .seasons
        .iter()
        .enumerate()
        .skip(detail.season_list.offset)
        .take(visible_height)
        .map(|(i, season)| {
            ListItem::new(season_line(season, i == detail.season_list.selected))
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

/// Render the episode grid for the selected season
fn render_episodes_panel(frame: &mut Frame, detail: &mut DetailState, area: Rect) {
    let is_focused = detail.focus == DetailFocus::Episodes;
    let border_style = if is_focused {
        Theme::border_focused()
    } else {
        Theme::border()
    };

    let title = format!(" EPISODES ({}) ", detail.episodes.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(Span::styled(title, Theme::title()));

    if detail.episodes.is_empty() {
        let text = if detail.episodes_loading.is_loading() {
            let msg = detail
                .episodes_loading
                .message()
                .unwrap_or("Loading episodes...")
                .to_string();
            Paragraph::new(msg).style(Theme::loading())
        } else if detail.selected_season.is_some() {
            Paragraph::new("No episodes").style(Theme::dimmed())
        } else {
            Paragraph::new("Select a season").style(Theme::dimmed())
        };
        frame.render_widget(text.alignment(Alignment::Center).block(block), area);
        return;
    }

    let visible_height = area.height.saturating_sub(2) as usize;
    detail.episode_list.scroll_into_view(visible_height);

    let items: Vec<ListItem> = detail
        .episodes
        .iter()
        .enumerate()
        .skip(detail.episode_list.offset)
        .take(visible_height)
        .map(|(i, ep)| ListItem::new(episode_line(ep, i == detail.episode_list.selected)))
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

/// Display label for a season rail entry
pub fn season_label(season: &SeasonSummary) -> String {
    match &season.name {
        Some(name) => name.clone(),
        None => format!("Season {}", season.season_number),
    }
}

fn season_line(season: &SeasonSummary, is_selected: bool) -> Line<'static> {
    let marker = if is_selected { "▸ " } else { "  " };

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
            season_label(season),
            if is_selected {
                Theme::list_item_selected()
            } else {
                Theme::text()
            },
        ),
        Span::styled(
            format!(" ({} eps)", season.episode_count),
            if is_selected {
                Theme::selected()
            } else {
                Theme::dimmed()
            },
        ),
    ])
}

/// Build the display line for one episode
/// Format: ▸ S01E05 - Episode Name (45m)
fn episode_line(ep: &Episode, is_selected: bool) -> Line<'static> {
    let marker = if is_selected { "▸ " } else { "  " };
    let name: String = ep.name.chars().take(40).collect();

    let mut spans = vec![
        Span::styled(
            marker.to_string(),
            if is_selected {
                Theme::selected()
            } else {
                Theme::dimmed()
            },
        ),
        Span::styled(
            format!("S{:02}E{:02}", ep.season, ep.number),
            Theme::secondary(),
        ),
        Span::styled(" - ", Theme::dimmed()),
        Span::styled(
            name,
            if is_selected {
                Theme::list_item_selected()
            } else {
                Theme::text()
            },
        ),
    ];

    if let Some(runtime) = ep.runtime {
        spans.push(Span::styled(
            format!(" ({})", format_runtime(runtime)),
            Theme::duration(),
        ));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_season_label_uses_name() {
        let season = SeasonSummary {
            season_number: 2,
            episode_count: 13,
            name: Some("Season 2".to_string()),
            air_date: None,
        };
        assert_eq!(season_label(&season), "Season 2");
    }

    #[test]
    fn test_season_label_fallback() {
        let season = SeasonSummary {
            season_number: 4,
            episode_count: 8,
            name: None,
            air_date: None,
        };
        assert_eq!(season_label(&season), "Season 4");
    }

    #[test]
    fn test_season_line_content() {
        let season = SeasonSummary {
            season_number: 1,
            episode_count: 7,
            name: Some("Season 1".to_string()),
            air_date: None,
        };
        assert_eq!(line_text(&season_line(&season, false)), "  Season 1 (7 eps)");
        assert!(line_text(&season_line(&season, true)).starts_with("▸ "));
    }

    #[test]
    fn test_episode_line_content() {
        let ep = Episode {
            season: 1,
            number: 5,
            name: "Gray Matter".to_string(),
            overview: String::new(),
            air_date: None,
            runtime: Some(48),
            still_path: None,
        };
        assert_eq!(line_text(&episode_line(&ep, false)), "  S01E05 - Gray Matter (48m)");
    }

    #[test]
    fn test_episode_line_truncates_long_names() {
        let ep = Episode {
            season: 2,
            number: 1,
            name: "A".repeat(80),
            overview: String::new(),
            air_date: None,
            runtime: None,
            still_path: None,
        };
        let text = line_text(&episode_line(&ep, false));
        assert!(text.contains(&"A".repeat(40)));
        assert!(!text.contains(&"A".repeat(41)));
    }
}
