//! Input handling for the TUI.
//!
//! Routes each key press to the help overlay, the search box, or the
//! keybinding registry for the focused panel.

use crate::app::{App, Focus};
use crate::keybindings::{Action as KbAction, Context as KbContext};
use crossterm::event::{KeyCode, KeyModifiers};

use super::Action;

/// Map the current focus panel to a keybinding context for context-specific lookups.
fn focus_to_context(focus: Focus) -> KbContext {
    match focus {
        Focus::Sidebar => KbContext::Sidebar,
        Focus::Search => KbContext::Search,
        Focus::Sort => KbContext::Sort,
        Focus::Grid => KbContext::Grid,
        Focus::Pager => KbContext::Pager,
    }
}

/// Shifted letters arrive with SHIFT set; the character already carries it.
fn normalize_modifiers(code: KeyCode, modifiers: KeyModifiers) -> KeyModifiers {
    match code {
        KeyCode::Char(_) => modifiers.difference(KeyModifiers::SHIFT),
        _ => modifiers,
    }
}

/// Main input dispatch function.
pub(super) fn handle_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    let modifiers = normalize_modifiers(code, modifiers);

    // Help overlay captures all keys while visible
    if app.show_help {
        handle_help_input(app, code);
        return Action::Continue;
    }

    if app.focus == Focus::Search {
        handle_search_input(app, code, modifiers);
        return Action::Continue;
    }

    handle_browse_input(app, code, modifiers)
}

/// Handle input while the help overlay is visible.
///
/// Captures all keys: j/k/Up/Down scroll, Esc/q/? dismiss.
fn handle_help_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.show_help = false;
            app.help_scroll_offset = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
        }
        _ => {}
    }
}

/// Handle input while the search box has focus.
///
/// Every edit re-derives the listing immediately. Printable keys are text,
/// so Global bindings such as `q` do not apply here.
fn handle_search_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match app
        .keybindings
        .action_in_context(code, modifiers, KbContext::Search)
    {
        Some(KbAction::ExitSearch) | Some(KbAction::CommitSearch) => {
            app.exit_search();
            return;
        }
        Some(KbAction::ClearSearch) => {
            app.clear_search();
            return;
        }
        _ => {}
    }

    match code {
        KeyCode::Char(c) if modifiers.is_empty() => {
            app.push_search_char(c);
        }
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Tab => {
            app.exit_search();
            app.focus_next();
        }
        _ => {}
    }
}

/// Handle input for every panel except the search box.
fn handle_browse_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    let context = focus_to_context(app.focus);
    let action = app.keybindings.action_for_key(code, modifiers, context);

    match action {
        Some(KbAction::Quit) => return Action::Quit,
        Some(KbAction::NavDown) => app.nav_down(),
        Some(KbAction::NavUp) => app.nav_up(),
        Some(KbAction::NavLeft) => app.nav_left(),
        Some(KbAction::NavRight) => app.nav_right(),
        Some(KbAction::CycleFocus) => app.focus_next(),
        Some(KbAction::CycleFocusBack) => app.focus_prev(),
        Some(KbAction::Back) => app.focus = Focus::Grid,
        Some(KbAction::Select) => match app.focus {
            Focus::Sidebar => app.select_sidebar_entry(),
            Focus::Sort => app.focus = Focus::Grid,
            Focus::Pager => app.select_pager_entry(),
            Focus::Grid => {
                if let Some(product) = app.selected_product() {
                    let msg = format!(
                        "{} · ${:.2} · {}",
                        product.title,
                        product.effective_price(),
                        product.category
                    );
                    app.set_status(msg);
                }
            }
            Focus::Search => {}
        },
        Some(KbAction::EnterSearch) => app.enter_search(),
        Some(KbAction::NextSort) => app.next_sort(),
        Some(KbAction::PrevSort) => app.prev_sort(),
        Some(KbAction::NextPage) => app.next_page(),
        Some(KbAction::PrevPage) => app.prev_page(),
        Some(KbAction::FirstPage) => app.first_page(),
        Some(KbAction::LastPage) => app.last_page(),
        Some(KbAction::CycleTheme) => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {}", name));
        }
        Some(KbAction::ShowHelp) => {
            app.show_help = true;
            app.help_scroll_offset = 0;
        }
        Some(KbAction::ExitSearch)
        | Some(KbAction::CommitSearch)
        | Some(KbAction::ClearSearch) => {}
        None => {}
    }
    Action::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogRepository, Category, InMemoryCatalog};
    use crate::config::Config;
    use crate::listing::test_support::product;
    use crate::listing::SortMode;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn app() -> App {
        let repo = Arc::new(InMemoryCatalog::new());
        repo.add_products(
            (1..=20)
                .map(|id| {
                    let cat = if id <= 5 { "phones" } else { "laptops" };
                    product(id, &format!("Device {:02}", id), cat)
                })
                .collect(),
        );
        repo.add_categories(vec![
            Category::new("phones", "Phones"),
            Category::new("laptops", "Laptops"),
        ]);
        let mut app = App::new(repo, &Config::default());
        app.resize(160);
        app
    }

    fn press(app: &mut App, code: KeyCode) -> Action {
        handle_input(app, code, KeyModifiers::NONE)
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_quit_outside_search() {
        let mut app = app();
        assert!(matches!(press(&mut app, KeyCode::Char('q')), Action::Quit));
    }

    #[test]
    fn test_search_box_types_q_instead_of_quitting() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.focus, Focus::Search);

        assert!(matches!(
            press(&mut app, KeyCode::Char('q')),
            Action::Continue
        ));
        assert_eq!(app.query.search(), "q");
    }

    #[test]
    fn test_search_filters_while_typing() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "device 1");
        assert_eq!(app.view.len(), 10); // 10..19

        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.query.search(), "device");
        assert_eq!(app.view.len(), 20);

        handle_input(&mut app, KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(app.query.search(), "");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.focus, Focus::Grid);
    }

    #[test]
    fn test_sidebar_enter_applies_category() {
        let mut app = app();
        app.focus = Focus::Sidebar;
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.query.category(), Some("phones"));
        assert_eq!(app.view.len(), 5);
    }

    #[test]
    fn test_sort_focus_arrows_change_sort() {
        let mut app = app();
        app.focus = Focus::Sort;
        press(&mut app, KeyCode::Right);
        assert_eq!(app.query.sort(), SortMode::Default.next());
        press(&mut app, KeyCode::Left);
        assert_eq!(app.query.sort(), SortMode::Default);
    }

    #[test]
    fn test_paging_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.query.page(), 1);
        handle_input(&mut app, KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(app.query.page(), 2);
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.query.page(), 0);

        app.focus = Focus::Grid;
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Pager);
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.pager_cursor, 2);
        assert_eq!(app.query.page(), 0);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.query.page(), 2);

        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.query.page(), 1);
    }

    #[test]
    fn test_help_overlay_captures_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);

        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.help_scroll_offset, 1);
        assert!(matches!(
            press(&mut app, KeyCode::Char('q')),
            Action::Continue
        ));
        assert!(!app.show_help);
        assert_eq!(app.help_scroll_offset, 0);
    }

    #[test]
    fn test_tab_cycles_focus() {
        let mut app = app();
        app.focus = Focus::Grid;
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Pager);
        handle_input(&mut app, KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(app.focus, Focus::Grid);
    }

    #[test]
    fn test_theme_cycle_sets_status() {
        let mut app = app();
        handle_input(&mut app, KeyCode::Char('T'), KeyModifiers::SHIFT);
        assert!(app.status_message.is_some());
    }
}
