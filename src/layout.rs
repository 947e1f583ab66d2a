//! Width breakpoints for the listing page.
//!
//! Breakpoints are expressed in viewport pixels so they line up with the
//! storefront's web layout. The terminal is measured in columns, which are
//! converted at [`CELL_WIDTH_PX`] each. None of this touches the product
//! data; it only decides what is drawn and how labels read.

/// Pixels per terminal column.
pub const CELL_WIDTH_PX: u32 = 8;

/// Below this width the category sidebar is hidden.
pub const SIDEBAR_MIN_PX: u32 = 768;
/// Below this width the pager uses single-character arrows.
pub const COMPACT_PAGER_PX: u32 = 500;
/// Below this width the sort control uses compact labels.
pub const COMPACT_SORT_PX: u32 = 400;
/// Below this width the search box uses compact text.
pub const COMPACT_SEARCH_PX: u32 = 365;

/// At or above this width the grid shows three cards per row.
pub const GRID_THREE_COLUMNS_PX: u32 = 1280;
/// At or above this width the grid shows two cards per row.
pub const GRID_TWO_COLUMNS_PX: u32 = 1024;

/// Sidebar share of the page width when visible (1 of 5 columns).
pub const SIDEBAR_FRACTION: (u32, u32) = (1, 5);

/// Viewport width in pixels for a terminal `columns` wide.
pub fn viewport_px(columns: u16) -> u32 {
    u32::from(columns) * CELL_WIDTH_PX
}

/// Decisions derived from the current viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutPolicy {
    pub viewport_px: u32,
    pub show_sidebar: bool,
    pub grid_columns: u16,
    pub compact_pager: bool,
    pub compact_sort: bool,
    pub compact_search: bool,
}

impl LayoutPolicy {
    pub fn for_width(viewport_px: u32) -> Self {
        let grid_columns = if viewport_px >= GRID_THREE_COLUMNS_PX {
            3
        } else if viewport_px >= GRID_TWO_COLUMNS_PX {
            2
        } else {
            1
        };

        Self {
            viewport_px,
            show_sidebar: viewport_px >= SIDEBAR_MIN_PX,
            grid_columns,
            compact_pager: viewport_px < COMPACT_PAGER_PX,
            compact_sort: viewport_px < COMPACT_SORT_PX,
            compact_search: viewport_px < COMPACT_SEARCH_PX,
        }
    }

    pub fn for_columns(columns: u16) -> Self {
        Self::for_width(viewport_px(columns))
    }

    /// Labels for the first/last page buttons.
    pub fn pager_labels(&self) -> (&'static str, &'static str) {
        if self.compact_pager {
            ("<", ">")
        } else {
            ("<<", ">>")
        }
    }

    /// Placeholder text for the search box.
    pub fn search_placeholder(&self) -> &'static str {
        if self.compact_search {
            "Search"
        } else {
            "Search products..."
        }
    }

    /// Sidebar width in columns for a page `total` columns wide, or 0 when
    /// the sidebar is hidden.
    pub fn sidebar_width(&self, total: u16) -> u16 {
        if !self.show_sidebar {
            return 0;
        }
        let (num, den) = SIDEBAR_FRACTION;
        (u32::from(total) * num / den) as u16
    }
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self::for_width(GRID_THREE_COLUMNS_PX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidebar_breakpoint() {
        assert!(!LayoutPolicy::for_width(767).show_sidebar);
        assert!(LayoutPolicy::for_width(768).show_sidebar);
    }

    #[test]
    fn test_pager_labels_shorten_below_500() {
        assert_eq!(LayoutPolicy::for_width(499).pager_labels(), ("<", ">"));
        assert_eq!(LayoutPolicy::for_width(500).pager_labels(), ("<<", ">>"));
    }

    #[test]
    fn test_compact_sort_and_search() {
        let narrow = LayoutPolicy::for_width(360);
        assert!(narrow.compact_sort);
        assert!(narrow.compact_search);

        let mid = LayoutPolicy::for_width(380);
        assert!(mid.compact_sort);
        assert!(!mid.compact_search);
        assert_eq!(mid.search_placeholder(), "Search products...");

        let wide = LayoutPolicy::for_width(400);
        assert!(!wide.compact_sort);
    }

    #[test]
    fn test_grid_columns() {
        assert_eq!(LayoutPolicy::for_width(1280).grid_columns, 3);
        assert_eq!(LayoutPolicy::for_width(1279).grid_columns, 2);
        assert_eq!(LayoutPolicy::for_width(1024).grid_columns, 2);
        assert_eq!(LayoutPolicy::for_width(1023).grid_columns, 1);
        assert_eq!(LayoutPolicy::for_width(0).grid_columns, 1);
    }

    #[test]
    fn test_columns_to_pixels() {
        // 96 columns = 768px, the sidebar threshold
        assert_eq!(viewport_px(96), 768);
        assert!(LayoutPolicy::for_columns(96).show_sidebar);
        assert!(!LayoutPolicy::for_columns(95).show_sidebar);
        assert_eq!(LayoutPolicy::for_columns(160).grid_columns, 3);
    }

    #[test]
    fn test_sidebar_width() {
        let policy = LayoutPolicy::for_columns(200);
        assert_eq!(policy.sidebar_width(200), 40);
        assert_eq!(LayoutPolicy::for_columns(80).sidebar_width(80), 0);
    }
}
