//! Product card grid.
//!
//! Cards are laid out row-major, `layout.grid_columns` per row. When the
//! page holds more rows than fit, the grid scrolls so the cursor row stays
//! visible.

use crate::app::{App, Focus, LoadState};
use crate::catalog::Product;
use crate::util::{strip_control_chars, truncate_to_width};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Height of one card including its border.
pub(super) const CARD_HEIGHT: u16 = 7;

/// Rectangles for cards `0..count`, skipping rows above `first_row` and
/// stopping at the bottom of `area`.
pub(super) fn card_rects(
    area: Rect,
    columns: u16,
    count: usize,
    first_row: usize,
) -> Vec<(usize, Rect)> {
    let columns = columns.max(1);
    let card_width = area.width / columns;
    let rows_fit = usize::from(area.height / CARD_HEIGHT);
    if card_width == 0 || rows_fit == 0 {
        return Vec::new();
    }

    let cols = usize::from(columns);
    (0..count)
        .filter_map(|idx| {
            let row = (idx / cols).checked_sub(first_row)?;
            if row >= rows_fit {
                return None;
            }
            let col = (idx % cols) as u16;
            Some((
                idx,
                Rect {
                    x: area.x + col * card_width,
                    y: area.y + row as u16 * CARD_HEIGHT,
                    width: card_width,
                    height: CARD_HEIGHT,
                },
            ))
        })
        .collect()
}

/// First card row to draw so that `cursor` is on screen.
pub(super) fn first_visible_row(cursor: usize, columns: u16, rows_fit: usize) -> usize {
    let cursor_row = cursor / usize::from(columns.max(1));
    cursor_row.saturating_sub(rows_fit.saturating_sub(1))
}

/// Price line: discounted price, then the list price and discount when
/// there is one.
pub(super) fn price_spans<'a>(product: &Product, app: &App) -> Vec<Span<'a>> {
    let mut spans = vec![Span::styled(
        format!("${:.2}", product.effective_price()),
        app.style("price"),
    )];
    if let Some(pct) = product.discount_percentage.filter(|d| *d > 0.0) {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("${:.2}", product.price),
            app.style("price_original"),
        ));
        spans.push(Span::styled(format!(" -{:.0}%", pct), app.style("discount")));
    }
    spans
}

pub(super) fn stock_text(product: &Product) -> String {
    match product.stock_or_zero() {
        0 => "Out of stock".to_string(),
        n => format!("In stock: {}", n),
    }
}

fn render_card(f: &mut Frame, app: &App, product: &Product, area: Rect, selected: bool) {
    let inner_width = usize::from(area.width.saturating_sub(2));

    let title = strip_control_chars(&product.title);
    let mut meta = strip_control_chars(&product.category).into_owned();
    if let Some(brand) = &product.brand {
        meta = format!("{} · {}", strip_control_chars(brand), meta);
    }

    let stock_style = if product.stock_or_zero() == 0 {
        app.style("stock_out")
    } else {
        app.style("stock_in")
    };

    let mut lines = vec![
        Line::from(Span::styled(
            truncate_to_width(&title, inner_width).into_owned(),
            app.style("card_title"),
        )),
        Line::from(Span::styled(
            truncate_to_width(&meta, inner_width).into_owned(),
            app.style("card_meta"),
        )),
        Line::from(price_spans(product, app)),
        Line::from(Span::styled(stock_text(product), stock_style)),
    ];
    if let Some(rating) = product.rating {
        lines.push(Line::from(Span::styled(
            format!("★ {:.1}", rating),
            app.style("rating"),
        )));
    }

    let border_style = if selected {
        app.style("card_border_selected")
    } else {
        app.style("card_border")
    };

    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    f.render_widget(card, area);
}

/// Message shown instead of cards, if any.
pub(super) fn empty_message(app: &App) -> Option<&'static str> {
    if !app.view.visible().is_empty() {
        return None;
    }
    Some(match &app.products_state {
        LoadState::Loading => "Loading products...",
        LoadState::Failed(_) if app.products.is_empty() => "Products could not be loaded",
        _ if app.view.page_out_of_range() => "No products on this page",
        _ => "No products found",
    })
}

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let border_style = if app.focus == Focus::Grid {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };
    let title = format!("Products ({})", app.view.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if let Some(msg) = empty_message(app) {
        let paragraph = Paragraph::new(Span::styled(msg, app.style("empty_message")))
            .alignment(Alignment::Center);
        f.render_widget(paragraph, inner);
        return;
    }

    let visible = app.view.visible();
    let columns = app.layout.grid_columns;
    let rows_fit = usize::from(inner.height / CARD_HEIGHT);
    let first_row = first_visible_row(app.grid_cursor, columns, rows_fit);
    let show_cursor = app.focus == Focus::Grid;

    for (idx, rect) in card_rects(inner, columns, visible.len(), first_row) {
        render_card(
            f,
            app,
            &visible[idx],
            rect,
            show_cursor && idx == app.grid_cursor,
        );
    }
}
