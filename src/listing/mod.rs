//! Pure listing pipeline: filter, sort and paginate the cached catalog.
//!
//! Nothing in here does I/O. The UI owns a [`ViewQuery`] and calls
//! [`derive_view`] after every change to it or to the catalog.

mod derive;
mod filter;
mod paginate;
mod sort;

pub use derive::{derive_view, DerivedView, FilterMode, LastInput, ViewQuery, ALL_CATEGORIES};
pub use filter::{filter_by_category, filter_by_search, matches_category, SearchFilter};
pub use paginate::{page_count, page_range, page_slice, DEFAULT_PAGE_SIZE};
pub use sort::{collate, sort_products, SortMode};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::catalog::Product;

    pub fn product(id: i64, title: &str, category: &str) -> Product {
        Product {
            id,
            title: title.to_string(),
            category: category.to_string(),
            price: 10.0,
            discount_percentage: None,
            stock: Some(1),
            brand: None,
            rating: None,
        }
    }

    pub fn priced(id: i64, price: f64, discount: Option<f64>) -> Product {
        Product {
            price,
            discount_percentage: discount,
            ..product(id, &format!("Product {}", id), "misc")
        }
    }

    pub fn stocked(id: i64, stock: Option<u32>) -> Product {
        Product {
            stock,
            ..product(id, &format!("Product {}", id), "misc")
        }
    }
}
