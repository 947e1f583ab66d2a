//! Helper functions for UI operations.
//!
//! Background fetch tasks and the panic guard they run under.

use crate::app::{App, AppEvent, LoadState};
use crate::catalog::CatalogClient;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use tokio::sync::mpsc;

/// Wraps a future to catch panics and convert them to errors.
///
/// A panicking spawned task would otherwise vanish inside the runtime. This
/// turns the panic payload into `Err(String)` so the task can report it.
///
/// # Example
///
/// ```ignore
/// tokio::spawn(async move {
///     match catch_task_panic(async { do_work().await }).await {
///         Ok(result) => handle_result(result),
///         Err(panic_msg) => {
///             let _ = tx.send(AppEvent::TaskPanicked { task: "work", error: panic_msg }).await;
///         }
///     }
/// });
/// ```
pub(super) async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                format!("Unknown panic: {:?}", (*panic).type_id())
            }
        })
}

/// Start the initial fetches for whatever the shared cache is missing.
///
/// Called once on mount. A populated cache means no request at all; the two
/// fetches are independent and may finish in either order.
pub(super) fn spawn_initial_fetches(
    app: &mut App,
    client: &CatalogClient,
    tx: &mpsc::Sender<AppEvent>,
) {
    if app.needs_products_fetch() {
        app.products_state = LoadState::Loading;
        spawn_product_fetch(client.clone(), app.product_limit, tx.clone());
    } else {
        tracing::debug!(count = app.products.len(), "Products already cached, skipping fetch");
    }

    if app.needs_categories_fetch() {
        app.categories_state = LoadState::Loading;
        spawn_category_fetch(client.clone(), tx.clone());
    } else {
        tracing::debug!(
            count = app.categories.len(),
            "Categories already cached, skipping fetch"
        );
    }
}

pub(super) fn spawn_product_fetch(
    client: CatalogClient,
    limit: usize,
    tx: mpsc::Sender<AppEvent>,
) {
    tokio::spawn(async move {
        let event = match catch_task_panic(client.fetch_products(limit)).await {
            Ok(Ok(products)) => AppEvent::ProductsLoaded(products),
            Ok(Err(e)) => AppEvent::ProductsFailed(e),
            Err(panic_msg) => {
                tracing::error!(error = %panic_msg, "Product fetch task panicked");
                AppEvent::TaskPanicked {
                    task: "fetch_products",
                    error: panic_msg,
                }
            }
        };
        if let Err(e) = tx.send(event).await {
            tracing::warn!(error = %e, "Failed to send product fetch result (receiver dropped)");
        }
    });
}

pub(super) fn spawn_category_fetch(client: CatalogClient, tx: mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        let event = match catch_task_panic(client.fetch_categories()).await {
            Ok(Ok(categories)) => AppEvent::CategoriesLoaded(categories),
            Ok(Err(e)) => AppEvent::CategoriesFailed(e),
            Err(panic_msg) => {
                tracing::error!(error = %panic_msg, "Category fetch task panicked");
                AppEvent::TaskPanicked {
                    task: "fetch_categories",
                    error: panic_msg,
                }
            }
        };
        if let Err(e) = tx.send(event).await {
            tracing::warn!(error = %e, "Failed to send category fetch result (receiver dropped)");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, InMemoryCatalog, CatalogRepository, Product};
    use crate::config::Config;
    use std::sync::Arc;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_catch_task_panic_ok() {
        let result = catch_task_panic(async { 42 }).await;
        assert_eq!(result, Ok(42));
    }

    #[tokio::test]
    async fn test_catch_task_panic_captures_message() {
        let result: Result<(), String> = catch_task_panic(async {
            panic!("boom {}", 7);
        })
        .await;
        assert_eq!(result, Err("boom 7".to_string()));
    }

    #[tokio::test]
    async fn test_mount_skips_fetch_when_cache_populated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let repo = Arc::new(InMemoryCatalog::new());
        repo.add_products(vec![Product {
            id: 1,
            title: "Cached".into(),
            category: "x".into(),
            price: 1.0,
            discount_percentage: None,
            stock: None,
            brand: None,
            rating: None,
        }]);
        repo.add_categories(vec![Category::new("x", "x")]);

        let mut app = App::new(repo, &Config::default());
        let client = CatalogClient::new(&server.uri(), Duration::from_secs(5)).unwrap();
        let (tx, mut rx) = mpsc::channel(8);

        spawn_initial_fetches(&mut app, &client, &tx);
        assert_eq!(app.products_state, LoadState::Idle);
        assert_eq!(app.categories_state, LoadState::Idle);

        drop(tx);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_mount_fetches_both_when_cache_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"products":[{"id":1,"title":"A","category":"x","price":2}]}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/products/categories"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let mut app = App::new(Arc::new(InMemoryCatalog::new()), &Config::default());
        let client = CatalogClient::new(&server.uri(), Duration::from_secs(5)).unwrap();
        let (tx, mut rx) = mpsc::channel(8);

        spawn_initial_fetches(&mut app, &client, &tx);
        assert_eq!(app.products_state, LoadState::Loading);
        assert_eq!(app.categories_state, LoadState::Loading);
        drop(tx);

        let mut loaded = false;
        let mut failed = false;
        while let Some(event) = rx.recv().await {
            match event {
                AppEvent::ProductsLoaded(products) => loaded = products.len() == 1,
                AppEvent::CategoriesFailed(_) => failed = true,
                other => panic!("unexpected event: {:?}", other),
            }
        }
        assert!(loaded);
        assert!(failed);
    }
}
