use crate::app::{App, Focus};
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// Key hints for the focused panel.
pub(super) fn hints(focus: Focus) -> &'static str {
    match focus {
        Focus::Sidebar => "[j/k]move [Enter]apply [Tab]next [/]search [?]help [q]uit",
        Focus::Search => "Type to filter | ESC leave | ENTER done | Ctrl+U clear",
        Focus::Sort => "[h/l]change sort [Tab]next [/]search [?]help [q]uit",
        Focus::Grid => "[hjkl]move [PgUp/PgDn]page [s]ort [/]search [Tab]next [?]help [q]uit",
        Focus::Pager => "[h/l]choose [Enter]go [g/G]first/last [?]help [q]uit",
    }
}

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else {
        Cow::Borrowed(hints(app.focus))
    };

    let paragraph = Paragraph::new(text).style(app.style("status_bar"));
    f.render_widget(paragraph, area);
}
