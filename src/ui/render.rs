//! Render functions for the TUI.
//!
//! Lays out the listing page (toolbar, sidebar, grid, pager and status bar)
//! from the current [`LayoutPolicy`](crate::layout::LayoutPolicy) and
//! draws the help overlay on top when it is open.

use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::Paragraph,
    Frame,
};

use super::{grid, help, pager, sidebar, status, toolbar};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 40;
pub(super) const MIN_HEIGHT: u16 = 12;

const TOOLBAR_HEIGHT: u16 = 3;
const PAGER_HEIGHT: u16 = 3;

/// Areas of the page for a frame of size `area`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct PageAreas {
    pub toolbar: Rect,
    pub sidebar: Option<Rect>,
    pub grid: Rect,
    pub pager: Rect,
    pub status: Rect,
}

pub(super) fn page_areas(app: &App, area: Rect) -> PageAreas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TOOLBAR_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(PAGER_HEIGHT),
            Constraint::Length(1),
        ])
        .split(area);

    let sidebar_width = app.layout.sidebar_width(area.width);
    let (sidebar, grid) = if sidebar_width > 0 {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(sidebar_width), Constraint::Min(0)])
            .split(rows[1]);
        (Some(cols[0]), cols[1])
    } else {
        (None, rows[1])
    };

    PageAreas {
        toolbar: rows[0],
        sidebar,
        grid,
        pager: rows[2],
        status: rows[3],
    }
}

/// Main render function.
///
/// Validates the terminal size, then draws the page and any overlay.
pub(super) fn render(f: &mut Frame, app: &App) {
    let area = f.area();

    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let areas = page_areas(app, area);
    toolbar::render(f, app, areas.toolbar);
    if let Some(sidebar_area) = areas.sidebar {
        sidebar::render(f, app, sidebar_area);
    }
    grid::render(f, app, areas.grid);
    pager::render(f, app, areas.pager);
    status::render(f, app, areas.status);

    if app.show_help {
        help::render(f, app);
    }
}
