use super::types::{Category, Product};
use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};

/// Shared cache of fetched catalog data.
///
/// The listing page only asks whether the cache is empty and appends to it;
/// it never edits entries. Snapshots are handed out as `Arc<Vec<_>>` so the
/// UI can hold one across a frame without holding a lock.
pub trait CatalogRepository: Send + Sync {
    fn products(&self) -> Arc<Vec<Product>>;
    fn categories(&self) -> Arc<Vec<Category>>;

    fn add_products(&self, products: Vec<Product>);
    fn add_categories(&self, categories: Vec<Category>);

    fn has_products(&self) -> bool {
        !self.products().is_empty()
    }

    fn has_categories(&self) -> bool {
        !self.categories().is_empty()
    }
}

/// Process-lifetime cache; cleared only by restarting.
#[derive(Default)]
pub struct InMemoryCatalog {
    products: RwLock<Arc<Vec<Product>>>,
    categories: RwLock<Arc<Vec<Category>>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CatalogRepository for InMemoryCatalog {
    fn products(&self) -> Arc<Vec<Product>> {
        let guard = self.products.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    fn categories(&self) -> Arc<Vec<Category>> {
        let guard = self
            .categories
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Append products, skipping ids already cached. Catalog order is
    /// first-seen order.
    fn add_products(&self, products: Vec<Product>) {
        let mut guard = self
            .products
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let mut seen: HashSet<i64> = guard.iter().map(|p| p.id).collect();
        let before = guard.len();
        let merged = Arc::make_mut(&mut *guard);
        for product in products {
            if seen.insert(product.id) {
                merged.push(product);
            }
        }

        tracing::debug!(
            added = merged.len() - before,
            total = merged.len(),
            "Merged products into catalog cache"
        );
    }

    /// Append categories, skipping slugs already cached.
    fn add_categories(&self, categories: Vec<Category>) {
        let mut guard = self
            .categories
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let mut seen: HashSet<String> = guard.iter().map(|c| c.slug.clone()).collect();
        let merged = Arc::make_mut(&mut *guard);
        for category in categories {
            if seen.insert(category.slug.clone()) {
                merged.push(category);
            }
        }

        tracing::debug!(total = merged.len(), "Merged categories into catalog cache");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, title: &str) -> Product {
        Product {
            id,
            title: title.to_string(),
            category: "misc".to_string(),
            price: 1.0,
            discount_percentage: None,
            stock: None,
            brand: None,
            rating: None,
        }
    }

    #[test]
    fn test_new_catalog_is_empty() {
        let repo = InMemoryCatalog::new();
        assert!(!repo.has_products());
        assert!(!repo.has_categories());
    }

    #[test]
    fn test_add_products_preserves_order() {
        let repo = InMemoryCatalog::new();
        repo.add_products(vec![product(3, "c"), product(1, "a"), product(2, "b")]);
        let ids: Vec<i64> = repo.products().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert!(repo.has_products());
    }

    #[test]
    fn test_add_products_skips_known_ids() {
        let repo = InMemoryCatalog::new();
        repo.add_products(vec![product(1, "first")]);
        repo.add_products(vec![product(1, "again"), product(2, "second")]);

        let products = repo.products();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].title, "first");
    }

    #[test]
    fn test_snapshot_unaffected_by_later_append() {
        let repo = InMemoryCatalog::new();
        repo.add_products(vec![product(1, "a")]);
        let snapshot = repo.products();
        repo.add_products(vec![product(2, "b")]);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(repo.products().len(), 2);
    }

    #[test]
    fn test_add_categories_dedupes_by_slug() {
        let repo = InMemoryCatalog::new();
        repo.add_categories(vec![Category::new("a", "A"), Category::new("b", "B")]);
        repo.add_categories(vec![Category::new("a", "Again"), Category::new("c", "C")]);

        let slugs: Vec<String> = repo.categories().iter().map(|c| c.slug.clone()).collect();
        assert_eq!(slugs, vec!["a", "b", "c"]);
    }
}
