//! Keybinding registry: maps actions to key events with config overrides.
//!
//! Bindings are data, not match arms, so users can remap them from the
//! `[keybindings]` table in config.toml and the help overlay can list them.
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

// ============================================================================
// Action Enum
// ============================================================================

/// All user-facing actions that can be triggered by keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    NavDown,
    NavUp,
    NavLeft,
    NavRight,
    CycleFocus,
    CycleFocusBack,
    Back,
    Select,
    EnterSearch,
    ExitSearch,
    CommitSearch,
    ClearSearch,
    NextSort,
    PrevSort,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    CycleTheme,
    ShowHelp,
}

impl Action {
    /// Human-readable description for the help screen.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Quit => "Quit application",
            Self::NavDown => "Navigate down",
            Self::NavUp => "Navigate up",
            Self::NavLeft => "Navigate left",
            Self::NavRight => "Navigate right",
            Self::CycleFocus => "Focus next panel",
            Self::CycleFocusBack => "Focus previous panel",
            Self::Back => "Go back / dismiss",
            Self::Select => "Select",
            Self::EnterSearch => "Focus search box",
            Self::ExitSearch => "Leave search box",
            Self::CommitSearch => "Leave search box, keep text",
            Self::ClearSearch => "Clear search text",
            Self::NextSort => "Next sort order",
            Self::PrevSort => "Previous sort order",
            Self::NextPage => "Next page",
            Self::PrevPage => "Previous page",
            Self::FirstPage => "First page",
            Self::LastPage => "Last page",
            Self::CycleTheme => "Cycle theme",
            Self::ShowHelp => "Show help",
        }
    }
}

// ============================================================================
// Context Enum
// ============================================================================

/// Dispatch context, one per focusable panel plus `Global`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Global,
    Sidebar,
    Search,
    Sort,
    Grid,
    Pager,
}

impl Context {
    pub fn label(self) -> &'static str {
        match self {
            Self::Global => "Global",
            Self::Sidebar => "Categories",
            Self::Search => "Search box",
            Self::Sort => "Sort control",
            Self::Grid => "Product grid",
            Self::Pager => "Pager",
        }
    }
}

// ============================================================================
// Key Specification
// ============================================================================

/// A key event: code + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }
}

/// Parse a key string from config into a KeySpec.
///
/// Supported formats:
/// - Single char: "q", "j", "/"
/// - Named keys: "Enter", "Esc", "Tab", "BackTab", "Up", "Down", "Left",
///   "Right", "Home", "End", "PageUp", "PageDown", "Backspace", "Space"
/// - Modifier combos: "Ctrl+d", "Ctrl+u"
/// - Function keys: "F1" through "F12"
fn parse_key_string(s: &str) -> Option<KeySpec> {
    let s = s.trim();

    if let Some(rest) = s.strip_prefix("Ctrl+") {
        let mut chars = rest.trim().chars();
        return match (chars.next(), chars.next()) {
            (Some(c), None) => Some(KeySpec::ctrl(c)),
            _ => None,
        };
    }

    let named = match s.to_lowercase().as_str() {
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "backtab" | "shift+tab" => Some(KeyCode::BackTab),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "home" => Some(KeyCode::Home),
        "end" => Some(KeyCode::End),
        "pageup" => Some(KeyCode::PageUp),
        "pagedown" => Some(KeyCode::PageDown),
        "backspace" => Some(KeyCode::Backspace),
        "space" => Some(KeyCode::Char(' ')),
        _ => None,
    };
    if let Some(code) = named {
        // BackTab arrives with SHIFT set on most terminals
        let modifiers = if code == KeyCode::BackTab {
            KeyModifiers::SHIFT
        } else {
            KeyModifiers::NONE
        };
        return Some(KeySpec::new(code, modifiers));
    }

    if let Some(num) = s.strip_prefix('F').or_else(|| s.strip_prefix('f')) {
        if let Ok(n) = num.parse::<u8>() {
            return (1..=12).contains(&n).then(|| KeySpec::plain(KeyCode::F(n)));
        }
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(KeySpec::plain(KeyCode::Char(c))),
        _ => None,
    }
}

/// Format a KeySpec as a human-readable string for the help screen.
fn format_key(key: &KeySpec) -> String {
    let modifier = if key.modifiers.contains(KeyModifiers::CONTROL) {
        "Ctrl+"
    } else {
        ""
    };

    let key_name = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "?".to_string(),
    };

    format!("{}{}", modifier, key_name)
}

// ============================================================================
// Keybinding Registry
// ============================================================================

/// Registry of keybindings, supporting default bindings and config overrides.
///
/// The same key can map to different actions in different contexts; a
/// context-specific binding shadows the global one.
pub struct KeybindingRegistry {
    lookup: HashMap<(Context, KeySpec), Action>,
    /// All bindings in registration order, for the help screen
    bindings: Vec<(Context, KeySpec, Action)>,
}

impl KeybindingRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            lookup: HashMap::new(),
            bindings: Vec::new(),
        };
        registry.register_defaults();
        registry
    }

    fn bind(&mut self, context: Context, key: KeySpec, action: Action) {
        self.lookup.insert((context, key), action);
        self.bindings.push((context, key, action));
    }

    fn bind_char(&mut self, context: Context, c: char, action: Action) {
        self.bind(context, KeySpec::plain(KeyCode::Char(c)), action);
    }

    fn register_defaults(&mut self) {
        use Action::*;

        // === Global ===
        self.bind_char(Context::Global, 'q', Quit);
        self.bind_char(Context::Global, 'j', NavDown);
        self.bind(Context::Global, KeySpec::plain(KeyCode::Down), NavDown);
        self.bind_char(Context::Global, 'k', NavUp);
        self.bind(Context::Global, KeySpec::plain(KeyCode::Up), NavUp);
        self.bind(Context::Global, KeySpec::plain(KeyCode::Tab), CycleFocus);
        self.bind(
            Context::Global,
            KeySpec::new(KeyCode::BackTab, KeyModifiers::SHIFT),
            CycleFocusBack,
        );
        self.bind(Context::Global, KeySpec::plain(KeyCode::Esc), Back);
        self.bind(Context::Global, KeySpec::plain(KeyCode::Enter), Select);
        self.bind_char(Context::Global, '/', EnterSearch);
        self.bind_char(Context::Global, 's', NextSort);
        self.bind_char(Context::Global, 'S', PrevSort);
        self.bind_char(Context::Global, ']', NextPage);
        self.bind(Context::Global, KeySpec::plain(KeyCode::PageDown), NextPage);
        self.bind_char(Context::Global, '[', PrevPage);
        self.bind(Context::Global, KeySpec::plain(KeyCode::PageUp), PrevPage);
        self.bind_char(Context::Global, 'g', FirstPage);
        self.bind(Context::Global, KeySpec::plain(KeyCode::Home), FirstPage);
        self.bind_char(Context::Global, 'G', LastPage);
        self.bind(Context::Global, KeySpec::plain(KeyCode::End), LastPage);
        self.bind_char(Context::Global, 'T', CycleTheme);
        self.bind_char(Context::Global, '?', ShowHelp);

        // === Grid: arrow keys move between cards ===
        self.bind_char(Context::Grid, 'h', NavLeft);
        self.bind(Context::Grid, KeySpec::plain(KeyCode::Left), NavLeft);
        self.bind_char(Context::Grid, 'l', NavRight);
        self.bind(Context::Grid, KeySpec::plain(KeyCode::Right), NavRight);

        // === Sort control: left/right step through the options ===
        self.bind_char(Context::Sort, 'h', PrevSort);
        self.bind(Context::Sort, KeySpec::plain(KeyCode::Left), PrevSort);
        self.bind_char(Context::Sort, 'l', NextSort);
        self.bind(Context::Sort, KeySpec::plain(KeyCode::Right), NextSort);

        // === Pager: left/right move the page cursor, Enter jumps to it ===
        self.bind_char(Context::Pager, 'h', NavLeft);
        self.bind(Context::Pager, KeySpec::plain(KeyCode::Left), NavLeft);
        self.bind_char(Context::Pager, 'l', NavRight);
        self.bind(Context::Pager, KeySpec::plain(KeyCode::Right), NavRight);

        // === Search box (printable keys are text, not commands) ===
        self.bind(Context::Search, KeySpec::plain(KeyCode::Esc), ExitSearch);
        self.bind(Context::Search, KeySpec::plain(KeyCode::Enter), CommitSearch);
        self.bind(Context::Search, KeySpec::ctrl('u'), ClearSearch);
    }

    /// Apply user overrides from config keybindings map.
    ///
    /// Keys in the map are action names (e.g., "quit", "next_page").
    /// Values are key strings (e.g., "q", "Ctrl+d", "F5").
    ///
    /// Returns a list of warnings for unrecognized action names or unparseable keys.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<String> {
        let mut warnings = Vec::new();

        for (action_name, key_str) in overrides {
            let Some(action) = parse_action_name(action_name) else {
                warnings.push(format!("Unknown action '{}', ignoring", action_name));
                continue;
            };
            let Some(key) = parse_key_string(key_str) else {
                warnings.push(format!(
                    "Cannot parse key '{}' for action '{}', ignoring",
                    key_str, action_name
                ));
                continue;
            };

            let mut contexts: Vec<Context> = self
                .bindings
                .iter()
                .filter(|(_, _, a)| *a == action)
                .map(|(c, _, _)| *c)
                .collect();
            contexts.dedup();

            self.lookup.retain(|_, a| *a != action);
            self.bindings.retain(|(_, _, a)| *a != action);

            for ctx in contexts {
                self.bind(ctx, key, action);
            }

            tracing::info!(action = %action_name, key = %key_str, "Applied keybinding override");
        }

        warnings
    }

    /// Look up the action for a key, trying `context` first and then Global.
    pub fn action_for_key(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        let key = KeySpec::new(code, modifiers);
        if let Some(&action) = self.lookup.get(&(context, key)) {
            return Some(action);
        }
        if context != Context::Global {
            return self.lookup.get(&(Context::Global, key)).copied();
        }
        None
    }

    /// Look up a binding in `context` only, without the Global fallback.
    pub fn action_in_context(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        self.lookup
            .get(&(context, KeySpec::new(code, modifiers)))
            .copied()
    }

    /// Returns (context, key display string, action, description) tuples
    /// in registration order.
    pub fn all_bindings(&self) -> Vec<(Context, String, Action, &'static str)> {
        self.bindings
            .iter()
            .map(|(ctx, key, action)| (*ctx, format_key(key), *action, action.describe()))
            .collect()
    }
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an action name string (from config) into an Action enum.
fn parse_action_name(name: &str) -> Option<Action> {
    let action = match name.to_lowercase().replace('-', "_").as_str() {
        "quit" => Action::Quit,
        "nav_down" | "down" => Action::NavDown,
        "nav_up" | "up" => Action::NavUp,
        "nav_left" | "left" => Action::NavLeft,
        "nav_right" | "right" => Action::NavRight,
        "cycle_focus" | "tab" => Action::CycleFocus,
        "cycle_focus_back" | "backtab" => Action::CycleFocusBack,
        "back" => Action::Back,
        "select" | "enter" => Action::Select,
        "enter_search" | "search" => Action::EnterSearch,
        "exit_search" => Action::ExitSearch,
        "commit_search" => Action::CommitSearch,
        "clear_search" => Action::ClearSearch,
        "next_sort" | "sort" => Action::NextSort,
        "prev_sort" => Action::PrevSort,
        "next_page" => Action::NextPage,
        "prev_page" => Action::PrevPage,
        "first_page" => Action::FirstPage,
        "last_page" => Action::LastPage,
        "cycle_theme" | "theme" => Action::CycleTheme,
        "show_help" | "help" => Action::ShowHelp,
        _ => return None,
    };
    Some(action)
}
