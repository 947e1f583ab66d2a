//! Pagination control.
//!
//! Consumes the page count and the current page, and is driven by the
//! prev/next/first/last actions or by the pager cursor when focused. A
//! current page past the end shows no highlighted page.

use crate::app::{App, Focus};
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum PagerItem {
    Prev { label: &'static str, enabled: bool },
    Page { index: usize, current: bool, cursor: bool },
    Gap,
    Next { label: &'static str, enabled: bool },
}

/// Page numbers to show when only `slots` fit, keeping `current` in view.
pub(super) fn page_window(count: usize, current: usize, slots: usize) -> Range<usize> {
    let slots = slots.max(1);
    if count <= slots {
        return 0..count;
    }
    let anchor = current.min(count - 1);
    let start = anchor.saturating_sub(slots / 2).min(count - slots);
    start..start + slots
}

/// Build the pager row for `count` pages with `current` selected. The
/// window follows `cursor` when there is one.
pub(super) fn pager_items(
    count: usize,
    current: usize,
    cursor: Option<usize>,
    labels: (&'static str, &'static str),
    width: usize,
) -> Vec<PagerItem> {
    let digits = count.max(1).to_string().len();
    let slot_width = digits + 1;
    // Arrows, their spacing and two possible gap markers
    let reserved = labels.0.len() + labels.1.len() + 2 + 4;
    let slots = width.saturating_sub(reserved) / slot_width;
    let window = page_window(count, cursor.unwrap_or(current), slots);

    let mut items = Vec::with_capacity(window.len() + 4);
    items.push(PagerItem::Prev {
        label: labels.0,
        enabled: current > 0 && count > 0,
    });
    if window.start > 0 {
        items.push(PagerItem::Gap);
    }
    for index in window.clone() {
        items.push(PagerItem::Page {
            index,
            current: index == current,
            cursor: cursor == Some(index),
        });
    }
    if window.end < count {
        items.push(PagerItem::Gap);
    }
    items.push(PagerItem::Next {
        label: labels.1,
        enabled: current + 1 < count,
    });
    items
}

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let count = app.view.page_count();
    let current = app.query.page();
    let inner_width = usize::from(area.width.saturating_sub(2));
    let cursor = (app.focus == Focus::Pager && count > 0).then_some(app.pager_cursor);
    let labels = app.layout.pager_labels();

    let mut spans = Vec::new();
    for item in pager_items(count, current, cursor, labels, inner_width) {
        let span = match item {
            PagerItem::Prev { label, enabled } | PagerItem::Next { label, enabled } => {
                let style = if enabled {
                    app.style("pager_item")
                } else {
                    app.style("pager_disabled")
                };
                Span::styled(label, style)
            }
            PagerItem::Page {
                index,
                current,
                cursor,
            } => {
                let mut style = if current {
                    app.style("pager_current")
                } else {
                    app.style("pager_item")
                };
                if cursor {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                Span::styled(format!("{}", index + 1), style)
            }
            PagerItem::Gap => Span::styled("…", app.style("pager_disabled")),
        };
        spans.push(span);
        spans.push(Span::raw(" "));
    }
    spans.pop();

    let title = if count > 0 && current >= count {
        "No page selected".to_string()
    } else if count == 0 {
        String::new()
    } else {
        format!("Page {} of {}", current + 1, count)
    };

    let border_style = if app.focus == Focus::Pager {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };

    let paragraph = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        );
    f.render_widget(paragraph, area);
}
