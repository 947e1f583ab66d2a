//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between Dark and Light palettes,
//! and `StyleMap` resolves role names to concrete styles.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeVariant {
    #[default]
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette: semantic roles to Style
// ============================================================================

/// A complete color palette mapping every semantic UI role to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Sidebar --
    pub sidebar_item: Style,
    pub sidebar_cursor: Style,
    pub sidebar_active: Style,

    // -- Toolbar --
    pub breadcrumb: Style,
    pub search_text: Style,
    pub search_placeholder: Style,
    pub sort_label: Style,

    // -- Cards --
    pub card_border: Style,
    pub card_border_selected: Style,
    pub card_title: Style,
    pub card_meta: Style,
    pub price: Style,
    pub price_original: Style,
    pub discount: Style,
    pub stock_in: Style,
    pub stock_out: Style,
    pub rating: Style,
    pub empty_message: Style,

    // -- Pager --
    pub pager_item: Style,
    pub pager_current: Style,
    pub pager_disabled: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            sidebar_item: Style::default(),
            sidebar_cursor: Style::default().bg(Color::DarkGray).fg(Color::White),
            sidebar_active: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),

            breadcrumb: Style::default().fg(Color::Gray),
            search_text: Style::default().fg(Color::White),
            search_placeholder: Style::default().fg(Color::DarkGray),
            sort_label: Style::default().fg(Color::Yellow),

            card_border: Style::default().fg(Color::DarkGray),
            card_border_selected: Style::default().fg(Color::Cyan),
            card_title: Style::default().add_modifier(Modifier::BOLD),
            card_meta: Style::default().fg(Color::Gray),
            price: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            price_original: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT),
            discount: Style::default().fg(Color::Red),
            stock_in: Style::default().fg(Color::Gray),
            stock_out: Style::default().fg(Color::Red),
            rating: Style::default().fg(Color::Yellow),
            empty_message: Style::default().fg(Color::DarkGray),

            pager_item: Style::default(),
            pager_current: Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            pager_disabled: Style::default().fg(Color::DarkGray),

            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),
        }
    }

    /// Adapted for light terminal backgrounds.
    fn light() -> Self {
        Self {
            sidebar_item: Style::default().fg(Color::Black),
            sidebar_cursor: Style::default().bg(Color::Blue).fg(Color::White),
            sidebar_active: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),

            breadcrumb: Style::default().fg(Color::DarkGray),
            search_text: Style::default().fg(Color::Black),
            search_placeholder: Style::default().fg(Color::Gray),
            sort_label: Style::default().fg(Color::Magenta),

            card_border: Style::default().fg(Color::Gray),
            card_border_selected: Style::default().fg(Color::Blue),
            card_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            card_meta: Style::default().fg(Color::DarkGray),
            price: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            price_original: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::CROSSED_OUT),
            discount: Style::default().fg(Color::Red),
            stock_in: Style::default().fg(Color::DarkGray),
            stock_out: Style::default().fg(Color::Red),
            rating: Style::default().fg(Color::Magenta),
            empty_message: Style::default().fg(Color::DarkGray),

            pager_item: Style::default().fg(Color::Black),
            pager_current: Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            pager_disabled: Style::default().fg(Color::Gray),

            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Blue),
        }
    }
}

// ============================================================================
// Style Map: string-keyed lookup
// ============================================================================

/// String-keyed style lookup, built from a `ColorPalette`.
///
/// Widgets ask for a role by name (`"card_title"`) so they do not need to
/// know which variant is active.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 24] = [
    "sidebar_item",
    "sidebar_cursor",
    "sidebar_active",
    "breadcrumb",
    "search_text",
    "search_placeholder",
    "sort_label",
    "card_border",
    "card_border_selected",
    "card_title",
    "card_meta",
    "price",
    "price_original",
    "discount",
    "stock_in",
    "stock_out",
    "rating",
    "empty_message",
    "pager_item",
    "pager_current",
    "pager_disabled",
    "status_bar",
    "panel_border",
    "panel_border_focused",
];

impl StyleMap {
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 24] = [
            p.sidebar_item,
            p.sidebar_cursor,
            p.sidebar_active,
            p.breadcrumb,
            p.search_text,
            p.search_placeholder,
            p.sort_label,
            p.card_border,
            p.card_border_selected,
            p.card_title,
            p.card_meta,
            p.price,
            p.price_original,
            p.discount,
            p.stock_in,
            p.stock_out,
            p.rating,
            p.empty_message,
            p.pager_item,
            p.pager_current,
            p.pager_disabled,
            p.status_bar,
            p.panel_border,
            p.panel_border_focused,
        ];

        let map = ROLE_NAMES.iter().copied().zip(styles).collect();
        Self { map }
    }

    /// Resolve a role name to its `Style`. Returns `Style::default()` for unknown roles.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

impl Default for StyleMap {
    fn default() -> Self {
        Self::from_palette(&ThemeVariant::default().palette())
    }
}

// ============================================================================
// Tests
// ============================================================================
