use crate::app::{App, Focus, LoadState};
use crate::util::{strip_control_chars, truncate_to_width};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use std::borrow::Cow;

/// Render the category sidebar.
///
/// Row 0 is "All". The active category is highlighted; the cursor row is
/// shown in the selection style only while the sidebar has focus.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let is_focused = app.focus == Focus::Sidebar;
    let inner_width = usize::from(area.width.saturating_sub(4));
    let active = app.query.category();

    let style_cursor = app.style("sidebar_cursor");
    let style_active = app.style("sidebar_active");
    let style_normal = app.style("sidebar_item");

    let names = std::iter::once((None, Cow::Borrowed("All"))).chain(
        app.categories
            .iter()
            .map(|c| (Some(c.slug.as_str()), strip_control_chars(&c.name))),
    );

    let items: Vec<ListItem> = names
        .enumerate()
        .map(|(row, (slug, name))| {
            let is_active = slug == active;
            let style = if is_focused && row == app.sidebar_cursor {
                style_cursor
            } else if is_active {
                style_active
            } else {
                style_normal
            };
            let marker = if is_active { "● " } else { "  " };
            let label = truncate_to_width(&name, inner_width.saturating_sub(2)).into_owned();
            ListItem::new(Line::from(vec![
                Span::styled(marker, style),
                Span::styled(label, style),
            ]))
        })
        .collect();

    let border_style = if is_focused {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };

    let title = match app.categories_state {
        LoadState::Loading => "Categories (loading)",
        LoadState::Failed(_) => "Categories (unavailable)",
        LoadState::Idle | LoadState::Loaded => "Categories",
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(Span::styled(title, Style::default().add_modifier(Modifier::BOLD))),
        )
        .highlight_style(Style::default());

    let mut state = ListState::default().with_selected(Some(app.sidebar_cursor));
    f.render_stateful_widget(list, area, &mut state);
}
