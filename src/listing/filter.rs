use crate::catalog::Product;

/// Category predicate. `None` is the "all" pseudo-category.
///
/// Matching is exact and case-sensitive against the product's category key.
pub fn matches_category(product: &Product, category: Option<&str>) -> bool {
    match category {
        None => true,
        Some(cat) => product.category == cat,
    }
}

/// Case-insensitive substring search over product titles.
///
/// The needle is lowercased once up front; an empty needle matches all.
#[derive(Debug, Clone)]
pub struct SearchFilter {
    needle: String,
}

impl SearchFilter {
    pub fn new(term: &str) -> Self {
        Self {
            needle: term.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.needle.is_empty() || product.title.to_lowercase().contains(&self.needle)
    }
}

/// Keep products in `category` (or all of them when `None`), preserving order.
pub fn filter_by_category<'a>(products: &'a [Product], category: Option<&str>) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| matches_category(p, category))
        .collect()
}

/// Keep products whose title contains `term`, preserving order.
pub fn filter_by_search<'a>(products: &'a [Product], term: &str) -> Vec<&'a Product> {
    let search = SearchFilter::new(term);
    products.iter().filter(|p| search.matches(p)).collect()
}
