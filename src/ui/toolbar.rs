//! Toolbar above the grid: breadcrumb, search box and sort control.

use crate::app::{App, Focus};
use crate::listing::SortMode;
use crate::util::truncate_to_width;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Text of the sort control for the current width.
pub(super) fn sort_text(sort: SortMode, compact: bool) -> String {
    if compact {
        format!("{} ▾", sort.compact_label())
    } else {
        format!("Sort: {} ▾", sort.label())
    }
}

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let sort_width = if app.layout.compact_sort { 14 } else { 30 };
    let constraints: Vec<Constraint> = if app.layout.show_sidebar {
        vec![
            Constraint::Percentage(30),
            Constraint::Min(10),
            Constraint::Length(sort_width),
        ]
    } else {
        vec![Constraint::Min(10), Constraint::Length(sort_width)]
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    let (search_area, sort_area) = if app.layout.show_sidebar {
        render_breadcrumb(f, app, chunks[0]);
        (chunks[1], chunks[2])
    } else {
        (chunks[0], chunks[1])
    };

    render_search(f, app, search_area);
    render_sort(f, app, sort_area);
}

fn border_style_for(app: &App, focus: Focus) -> ratatui::style::Style {
    if app.focus == focus {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    }
}

fn render_breadcrumb(f: &mut Frame, app: &App, area: Rect) {
    let width = usize::from(area.width.saturating_sub(2));
    let crumb = app.breadcrumb();
    let text = truncate_to_width(&crumb, width);
    let paragraph = Paragraph::new(Span::styled(text, app.style("breadcrumb"))).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.style("panel_border")),
    );
    f.render_widget(paragraph, area);
}

fn render_search(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Search;
    let width = usize::from(area.width.saturating_sub(3));
    let term = app.query.search();

    let line = if term.is_empty() && !focused {
        Line::from(Span::styled(
            app.layout.search_placeholder(),
            app.style("search_placeholder"),
        ))
    } else {
        // Keep the tail visible while typing
        let shown = tail_to_width(term, width);
        let mut spans = vec![Span::styled(shown.to_string(), app.style("search_text"))];
        if focused {
            spans.push(Span::styled("_", app.style("search_text")));
        }
        Line::from(spans)
    };

    let title = if app.layout.compact_search { "" } else { "Search" };
    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style_for(app, Focus::Search))
            .title(title),
    );
    f.render_widget(paragraph, area);
}

fn render_sort(f: &mut Frame, app: &App, area: Rect) {
    let text = sort_text(app.query.sort(), app.layout.compact_sort);
    let width = usize::from(area.width.saturating_sub(2));
    let paragraph = Paragraph::new(Span::styled(
        truncate_to_width(&text, width).into_owned(),
        app.style("sort_label"),
    ))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style_for(app, Focus::Sort)),
    );
    f.render_widget(paragraph, area);
}

/// Longest suffix of `s` that fits in `width` columns.
fn tail_to_width(s: &str, width: usize) -> &str {
    let mut used = 0;
    let mut start = s.len();
    for (idx, c) in s.char_indices().rev() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = idx;
    }
    &s[start..]
}
