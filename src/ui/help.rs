//! Help overlay: scrollable keybinding table.
//!
//! Lists the live bindings, including config overrides, grouped by the
//! panel they apply to.

use crate::app::App;
use crate::keybindings::Context;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table},
    Frame,
};

const CONTEXT_ORDER: [Context; 6] = [
    Context::Global,
    Context::Sidebar,
    Context::Search,
    Context::Sort,
    Context::Grid,
    Context::Pager,
];

/// Help table rows: section headers followed by `(key, description)` pairs.
/// `None` in the key slot marks a header.
pub(super) fn help_rows(app: &App) -> Vec<(Option<String>, String)> {
    let bindings = app.keybindings.all_bindings();
    let mut rows = Vec::new();

    for ctx in CONTEXT_ORDER {
        let mut section = bindings.iter().filter(|(c, _, _, _)| *c == ctx).peekable();
        if section.peek().is_none() {
            continue;
        }
        rows.push((None, ctx.label().to_string()));
        for (_, key, _, description) in section {
            rows.push((Some(key.clone()), description.to_string()));
        }
    }
    rows
}

/// Render the help overlay on top of the page.
pub fn render(f: &mut Frame, app: &App) {
    let overlay = centered_rect(80, 80, f.area());
    if overlay.width < 20 || overlay.height < 6 {
        return;
    }

    f.render_widget(Clear, overlay);

    let heading = app.style("sort_label").add_modifier(Modifier::BOLD);
    let rows: Vec<Row> = help_rows(app)
        .into_iter()
        .map(|(key, text)| match key {
            None => Row::new(vec![
                Line::from(Span::styled(format!("-- {} --", text), heading)),
                Line::from(""),
            ]),
            Some(key) => Row::new(vec![format!("  {}", key), text]),
        })
        .collect();

    let total_rows = rows.len();
    let visible_height = overlay.height.saturating_sub(3) as usize; // borders + header
    let max_scroll = total_rows.saturating_sub(visible_height);
    let scroll = app.help_scroll_offset.min(max_scroll);
    let visible_rows: Vec<Row> = rows.into_iter().skip(scroll).take(visible_height).collect();

    let title = if max_scroll > 0 {
        format!(
            " Help ({}/{}) ",
            scroll.saturating_add(1),
            max_scroll.saturating_add(1)
        )
    } else {
        " Help (? to close) ".to_string()
    };

    let table = Table::new(visible_rows, [Constraint::Length(16), Constraint::Min(20)])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border_focused"))
                .title(title),
        )
        .header(
            Row::new(vec!["Key", "Action"])
                .style(
                    Style::default()
                        .add_modifier(Modifier::BOLD)
                        .add_modifier(Modifier::UNDERLINED),
                )
                .bottom_margin(1),
        )
        .style(app.style("sidebar_item"));

    f.render_widget(table, overlay);

    if max_scroll > 0 && scroll < max_scroll {
        let hint = Line::from(Span::styled(
            " j/k to scroll, ? or Esc to close ",
            app.style("empty_message"),
        ));
        let hint_area = Rect {
            x: overlay.x + 1,
            y: overlay.y + overlay.height.saturating_sub(1),
            width: overlay.width.saturating_sub(2),
            height: 1,
        };
        f.render_widget(Paragraph::new(hint), hint_area);
    }
}

/// Centered rectangle covering the given percentage of `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
