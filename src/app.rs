use crate::catalog::{CatalogRepository, Category, FetchError, Product};
use crate::config::Config;
use crate::keybindings::KeybindingRegistry;
use crate::layout::LayoutPolicy;
use crate::listing::{derive_view, DerivedView, SortMode, ViewQuery};
use crate::theme::{StyleMap, ThemeVariant};
use crate::util::MAX_SEARCH_QUERY_LENGTH;
use ratatui::style::Style;
use std::borrow::Cow;
use std::sync::Arc;
use tokio::time::Instant;

/// How long a status message stays visible.
const STATUS_TTL_SECS: u64 = 3;

// ============================================================================
// Focus
// ============================================================================

/// Panel that receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Search,
    Sort,
    Grid,
    Pager,
}

impl Focus {
    /// Tab order, left to right and top to bottom.
    const ORDER: [Focus; 5] = [
        Focus::Sidebar,
        Focus::Search,
        Focus::Sort,
        Focus::Grid,
        Focus::Pager,
    ];

    fn step(self, forward: bool, sidebar_visible: bool) -> Self {
        let len = Self::ORDER.len();
        let mut idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        loop {
            idx = if forward {
                (idx + 1) % len
            } else {
                (idx + len - 1) % len
            };
            let candidate = Self::ORDER[idx];
            if candidate != Focus::Sidebar || sidebar_visible {
                return candidate;
            }
        }
    }
}

// ============================================================================
// Load State
// ============================================================================

/// Progress of one initial fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Not started, or the cache was already populated.
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

// ============================================================================
// Events
// ============================================================================

/// Events from background tasks
#[derive(Debug)]
pub enum AppEvent {
    ProductsLoaded(Vec<Product>),
    ProductsFailed(FetchError),
    CategoriesLoaded(Vec<Category>),
    CategoriesFailed(FetchError),
    /// A background task panicked.
    ///
    /// Fields:
    /// - `task`: Name of the task that panicked (e.g., "fetch_products")
    /// - `error`: The panic message extracted from the panic payload
    TaskPanicked { task: &'static str, error: String },
}

// ============================================================================
// Application State
// ============================================================================

/// State of the product listing page.
///
/// The product list shown on screen is never edited in place: every input
/// change goes through [`ViewQuery`] and ends in [`App::rederive`], which
/// rebuilds the view from the full cached catalog.
pub struct App {
    /// Shared catalog cache. Outlives the page; survives remounts.
    pub repository: Arc<dyn CatalogRepository>,
    /// Snapshot of `repository.products()` taken on the last refresh.
    pub products: Arc<Vec<Product>>,
    pub categories: Arc<Vec<Category>>,

    pub query: ViewQuery,
    pub view: DerivedView,

    pub product_limit: usize,
    pub products_state: LoadState,
    pub categories_state: LoadState,

    // Layout
    /// Terminal width in columns, mirrored from resize events.
    pub viewport_width: u16,
    pub layout: LayoutPolicy,

    // Theme
    pub theme_variant: ThemeVariant,
    pub theme: StyleMap,

    pub keybindings: KeybindingRegistry,

    // UI state
    pub focus: Focus,
    /// Focus to return to when leaving the search box.
    pub focus_before_search: Focus,
    /// Sidebar row under the cursor. Row 0 is "all".
    pub sidebar_cursor: usize,
    /// Card under the cursor, relative to the visible page.
    pub grid_cursor: usize,
    /// Page number under the pager cursor (0-based).
    pub pager_cursor: usize,

    pub status_message: Option<(Cow<'static, str>, Instant)>,
    pub show_help: bool,
    pub help_scroll_offset: usize,

    /// Set when state changed since the last frame.
    pub needs_redraw: bool,
}

impl App {
    pub fn new(repository: Arc<dyn CatalogRepository>, config: &Config) -> Self {
        let theme_variant = ThemeVariant::from_str_name(&config.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "Unknown theme, using dark");
            ThemeVariant::Dark
        });

        let mut app = Self {
            products: repository.products(),
            categories: repository.categories(),
            repository,
            query: ViewQuery::new(config.page_size, config.filter_mode),
            view: DerivedView::default(),
            product_limit: config.product_limit,
            products_state: LoadState::Idle,
            categories_state: LoadState::Idle,
            viewport_width: 0,
            layout: LayoutPolicy::default(),
            theme_variant,
            theme: StyleMap::from_palette(&theme_variant.palette()),
            keybindings: KeybindingRegistry::new(),
            focus: Focus::Grid,
            focus_before_search: Focus::Grid,
            sidebar_cursor: 0,
            grid_cursor: 0,
            pager_cursor: 0,
            status_message: None,
            show_help: false,
            help_scroll_offset: 0,
            needs_redraw: true,
        };
        app.rederive();
        app
    }

    // ------------------------------------------------------------------
    // Theme
    // ------------------------------------------------------------------

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
    }

    /// Cycle to the next theme variant and return its name for display.
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.set_theme(next);
        next.name()
    }

    // ------------------------------------------------------------------
    // Catalog
    // ------------------------------------------------------------------

    /// True when the page should fetch products on mount.
    pub fn needs_products_fetch(&self) -> bool {
        !self.repository.has_products()
    }

    pub fn needs_categories_fetch(&self) -> bool {
        !self.repository.has_categories()
    }

    /// Re-read the shared cache and rebuild the view from it.
    pub fn refresh_from_repository(&mut self) {
        self.products = self.repository.products();
        self.categories = self.repository.categories();
        self.sidebar_cursor = self.sidebar_cursor.min(self.categories.len());
        self.rederive();
    }

    pub fn on_products_loaded(&mut self, products: Vec<Product>) {
        let count = products.len();
        self.repository.add_products(products);
        self.products_state = LoadState::Loaded;
        self.refresh_from_repository();
        tracing::info!(count, total = self.products.len(), "Products loaded");
    }

    pub fn on_categories_loaded(&mut self, categories: Vec<Category>) {
        self.repository.add_categories(categories);
        self.categories_state = LoadState::Loaded;
        self.refresh_from_repository();
    }

    /// Recompute the visible listing from the full catalog.
    pub fn rederive(&mut self) {
        self.view = derive_view(&self.products, &self.query);
        self.clamp_grid_cursor();
        self.needs_redraw = true;
    }

    fn clamp_grid_cursor(&mut self) {
        let visible = self.view.visible().len();
        self.grid_cursor = self.grid_cursor.min(visible.saturating_sub(1));
        self.pager_cursor = self
            .pager_cursor
            .min(self.view.page_count().saturating_sub(1));
    }

    // ------------------------------------------------------------------
    // View state transitions
    // ------------------------------------------------------------------

    /// Select a category (`None` = all). Sort resets to default; the page
    /// does not.
    pub fn select_category(&mut self, category: Option<String>) {
        self.query.select_category(category);
        self.rederive();
    }

    /// Apply the sidebar row under the cursor.
    pub fn select_sidebar_entry(&mut self) {
        let slug = self.sidebar_slug(self.sidebar_cursor).map(str::to_string);
        self.select_category(slug);
    }

    /// Category slug for a sidebar row; row 0 ("all") is `None`.
    pub fn sidebar_slug(&self, row: usize) -> Option<&str> {
        row.checked_sub(1)
            .and_then(|i| self.categories.get(i))
            .map(|c| c.slug.as_str())
    }

    /// Number of sidebar rows including "all".
    pub fn sidebar_len(&self) -> usize {
        self.categories.len() + 1
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.query.set_search(term);
        self.rederive();
    }

    /// Append a typed character. Returns false when the box is full.
    pub fn push_search_char(&mut self, c: char) -> bool {
        if self.query.search().chars().count() >= MAX_SEARCH_QUERY_LENGTH {
            self.set_status(format!(
                "Search query at max length ({} chars)",
                MAX_SEARCH_QUERY_LENGTH
            ));
            return false;
        }
        let mut term = self.query.search().to_string();
        term.push(c);
        self.set_search(term);
        true
    }

    pub fn pop_search_char(&mut self) {
        let mut term = self.query.search().to_string();
        if term.pop().is_some() {
            self.set_search(term);
        }
    }

    pub fn clear_search(&mut self) {
        if !self.query.search().is_empty() {
            self.set_search(String::new());
        }
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.query.set_sort(sort);
        self.rederive();
    }

    pub fn next_sort(&mut self) {
        self.set_sort(self.query.sort().next());
    }

    pub fn prev_sort(&mut self) {
        self.set_sort(self.query.sort().prev());
    }

    pub fn set_page(&mut self, page: usize) {
        self.query.set_page(page);
        self.grid_cursor = 0;
        self.pager_cursor = page;
        self.rederive();
    }

    /// Jump to the page under the pager cursor.
    pub fn select_pager_entry(&mut self) {
        if self.pager_cursor < self.view.page_count() {
            self.set_page(self.pager_cursor);
        }
    }

    /// Put the pager cursor on the current page, or the last page when the
    /// current one is out of range.
    fn sync_pager_cursor(&mut self) {
        let last = self.view.page_count().saturating_sub(1);
        self.pager_cursor = self.query.page().min(last);
    }

    pub fn next_page(&mut self) {
        let count = self.view.page_count();
        let page = self.query.page();
        if page + 1 < count {
            self.set_page(page + 1);
        }
    }

    /// Step back one page. From past the end this lands on the last page.
    pub fn prev_page(&mut self) {
        let count = self.view.page_count();
        let page = self.query.page().min(count);
        if page > 0 {
            self.set_page(page - 1);
        }
    }

    pub fn first_page(&mut self) {
        self.set_page(0);
    }

    pub fn last_page(&mut self) {
        self.set_page(self.view.page_count().saturating_sub(1));
    }

    /// Record a new terminal width and recompute breakpoints.
    pub fn resize(&mut self, columns: u16) {
        if columns == self.viewport_width {
            return;
        }
        self.viewport_width = columns;
        self.layout = LayoutPolicy::for_columns(columns);
        if !self.layout.show_sidebar && self.focus == Focus::Sidebar {
            self.focus = Focus::Grid;
        }
        self.needs_redraw = true;
        tracing::debug!(
            columns,
            px = self.layout.viewport_px,
            grid_columns = self.layout.grid_columns,
            sidebar = self.layout.show_sidebar,
            "Viewport resized"
        );
    }

    // ------------------------------------------------------------------
    // Focus and navigation
    // ------------------------------------------------------------------

    pub fn focus_next(&mut self) {
        self.set_focus(self.focus.step(true, self.layout.show_sidebar));
    }

    pub fn focus_prev(&mut self) {
        self.set_focus(self.focus.step(false, self.layout.show_sidebar));
    }

    pub fn set_focus(&mut self, focus: Focus) {
        if focus == Focus::Pager && self.focus != Focus::Pager {
            self.sync_pager_cursor();
        }
        self.focus = focus;
    }

    pub fn enter_search(&mut self) {
        if self.focus != Focus::Search {
            self.focus_before_search = self.focus;
            self.focus = Focus::Search;
        }
    }

    pub fn exit_search(&mut self) {
        if self.focus == Focus::Search {
            self.focus = self.focus_before_search;
            if self.focus == Focus::Search
                || (self.focus == Focus::Sidebar && !self.layout.show_sidebar)
            {
                self.focus = Focus::Grid;
            }
        }
    }

    pub fn nav_up(&mut self) {
        match self.focus {
            Focus::Sidebar => self.sidebar_cursor = self.sidebar_cursor.saturating_sub(1),
            Focus::Grid => {
                let cols = usize::from(self.layout.grid_columns);
                self.grid_cursor = self.grid_cursor.saturating_sub(cols);
            }
            Focus::Sort => self.prev_sort(),
            Focus::Search | Focus::Pager => {}
        }
    }

    pub fn nav_down(&mut self) {
        match self.focus {
            Focus::Sidebar => {
                let max = self.sidebar_len().saturating_sub(1);
                self.sidebar_cursor = self.sidebar_cursor.saturating_add(1).min(max);
            }
            Focus::Grid => {
                let cols = usize::from(self.layout.grid_columns);
                let target = self.grid_cursor.saturating_add(cols);
                if target < self.view.visible().len() {
                    self.grid_cursor = target;
                }
            }
            Focus::Sort => self.next_sort(),
            Focus::Search | Focus::Pager => {}
        }
    }

    pub fn nav_left(&mut self) {
        match self.focus {
            Focus::Grid => self.grid_cursor = self.grid_cursor.saturating_sub(1),
            Focus::Pager => self.pager_cursor = self.pager_cursor.saturating_sub(1),
            _ => {}
        }
    }

    pub fn nav_right(&mut self) {
        match self.focus {
            Focus::Grid if self.grid_cursor + 1 < self.view.visible().len() => {
                self.grid_cursor += 1;
            }
            Focus::Pager if self.pager_cursor + 1 < self.view.page_count() => {
                self.pager_cursor += 1;
            }
            _ => {}
        }
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.view.visible().get(self.grid_cursor)
    }

    /// "Products > {category}" for the toolbar.
    pub fn breadcrumb(&self) -> String {
        let name = match self.query.category() {
            None => "all",
            Some(slug) => self
                .categories
                .iter()
                .find(|c| c.slug == slug)
                .map_or(slug, |c| c.name.as_str()),
        };
        format!("Products > {}", name)
    }

    // ------------------------------------------------------------------
    // Status bar
    // ------------------------------------------------------------------

    /// Set status message (will auto-expire after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
        self.needs_redraw = true;
    }

    /// Clear status message if expired. Returns true if a message was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= STATUS_TTL_SECS {
                self.status_message = None;
                return true;
            }
        }
        false
    }
}
