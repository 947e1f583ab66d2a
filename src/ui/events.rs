//! Application event handling.
//!
//! Applies the results of background fetches to the page. Failures are
//! logged and surfaced in the status bar; the page keeps rendering whatever
//! the cache holds.

use crate::app::{App, AppEvent, LoadState};

/// Handle one event from a background task.
pub(super) fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::ProductsLoaded(products) => {
            let count = products.len();
            app.on_products_loaded(products);
            if count == 0 {
                app.set_status("Catalog returned no products");
            }
        }
        AppEvent::ProductsFailed(e) => {
            tracing::warn!(error = %e, "Failed to fetch products");
            app.products_state = LoadState::Failed(e.to_string());
            app.set_status(format!("Could not load products: {}", e));
        }
        AppEvent::CategoriesLoaded(categories) => {
            tracing::info!(count = categories.len(), "Categories loaded");
            app.on_categories_loaded(categories);
        }
        AppEvent::CategoriesFailed(e) => {
            tracing::warn!(error = %e, "Failed to fetch categories");
            app.categories_state = LoadState::Failed(e.to_string());
            app.set_status(format!("Could not load categories: {}", e));
        }
        AppEvent::TaskPanicked { task, error } => {
            tracing::error!(task, error = %error, "Background task panicked");
            match task {
                "fetch_products" => app.products_state = LoadState::Failed(error.clone()),
                "fetch_categories" => app.categories_state = LoadState::Failed(error.clone()),
                _ => {}
            }
            app.set_status(format!("Internal error in {}: {}", task, error));
        }
    }
    app.needs_redraw = true;
}
