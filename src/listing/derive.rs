use super::filter::{filter_by_category, filter_by_search, matches_category, SearchFilter};
use super::paginate::{page_count, page_range, page_slice, DEFAULT_PAGE_SIZE};
use super::sort::{sort_products, SortMode};
use crate::catalog::Product;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Display name of the pseudo-category that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

/// How the category and search filters combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Both filters apply (AND).
    #[default]
    Compose,
    /// Only the most recently changed filter applies, and explicitly picking
    /// the "Default" sort shows the whole catalog again. This is how the
    /// original storefront page behaved.
    Exclusive,
}

impl FilterMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compose => "compose",
            Self::Exclusive => "exclusive",
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compose" | "and" => Ok(Self::Compose),
            "exclusive" | "legacy" => Ok(Self::Exclusive),
            other => Err(format!(
                "unknown filter mode '{}' (expected compose or exclusive)",
                other
            )),
        }
    }
}

/// The input the user changed last. Only matters in [`FilterMode::Exclusive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LastInput {
    #[default]
    None,
    Category,
    Search,
    Sort,
}

/// Canonical inputs of the listing page.
///
/// Every transition goes through a method so `last_input` stays accurate.
/// The derived product list is never stored here; it is recomputed from the
/// full catalog by [`derive_view`].
#[derive(Debug, Clone, PartialEq)]
pub struct ViewQuery {
    category: Option<String>,
    search: String,
    sort: SortMode,
    page: usize,
    page_size: usize,
    filter_mode: FilterMode,
    last_input: LastInput,
    /// Last filter input (`Category` or `Search`); sort changes leave it.
    last_filter: LastInput,
}

impl Default for ViewQuery {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, FilterMode::default())
    }
}

impl ViewQuery {
    pub fn new(page_size: usize, filter_mode: FilterMode) -> Self {
        Self {
            category: None,
            search: String::new(),
            sort: SortMode::Default,
            page: 0,
            page_size: page_size.max(1),
            filter_mode,
            last_input: LastInput::None,
            last_filter: LastInput::None,
        }
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Category for display: the selected slug, or "all".
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or(ALL_CATEGORIES)
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> SortMode {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn filter_mode(&self) -> FilterMode {
        self.filter_mode
    }

    pub fn last_input(&self) -> LastInput {
        self.last_input
    }

    /// The filter that was changed last, ignoring sort changes.
    pub fn last_filter(&self) -> LastInput {
        self.last_filter
    }

    /// Select a category (`None` = all). Resets the sort to `Default`;
    /// the current page is kept.
    pub fn select_category(&mut self, category: Option<String>) {
        self.category = category.filter(|c| c != ALL_CATEGORIES);
        self.sort = SortMode::Default;
        self.last_input = LastInput::Category;
        self.last_filter = LastInput::Category;
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.last_input = LastInput::Search;
        self.last_filter = LastInput::Search;
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.sort = sort;
        self.last_input = LastInput::Sort;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn set_filter_mode(&mut self, mode: FilterMode) {
        self.filter_mode = mode;
    }
}

/// Result of one derivation pass: the filtered, sorted products plus the
/// pagination inputs needed to slice them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedView {
    products: Vec<Product>,
    page: usize,
    page_size: usize,
}

impl DerivedView {
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self) -> usize {
        page_count(self.products.len(), self.page_size)
    }

    /// Products on the current page. Empty when the page is past the end.
    pub fn visible(&self) -> &[Product] {
        page_slice(&self.products, self.page, self.page_size)
    }

    /// True when the current page lies beyond the last page.
    pub fn page_out_of_range(&self) -> bool {
        self.page >= self.page_count() && !self.products.is_empty()
    }

    /// Absolute index in `products()` of the first visible card.
    pub fn first_visible_index(&self) -> usize {
        page_range(self.products.len(), self.page, self.page_size).start
    }
}

/// Recompute the listing from the full catalog.
///
/// This is the only place filtering and sorting happen, so the result
/// depends on `all` and `query` alone, never on a previous derivation.
pub fn derive_view(all: &[Product], query: &ViewQuery) -> DerivedView {
    let mut selected: Vec<&Product> = match query.filter_mode() {
        FilterMode::Compose => {
            let search = SearchFilter::new(query.search());
            all.iter()
                .filter(|p| matches_category(p, query.category()) && search.matches(p))
                .collect()
        }
        FilterMode::Exclusive => exclusive_selection(all, query),
    };

    sort_products(&mut selected, query.sort());

    tracing::trace!(
        total = all.len(),
        derived = selected.len(),
        category = query.category_label(),
        search = %query.search(),
        sort = %query.sort(),
        mode = %query.filter_mode(),
        "Derived listing"
    );

    DerivedView {
        products: selected.into_iter().cloned().collect(),
        page: query.page(),
        page_size: query.page_size(),
    }
}

/// Exclusive mode: only the most recently changed filter applies, and a
/// sort change keeps whichever filter that was. Picking the `Default` sort
/// shows the whole catalog.
fn exclusive_selection<'a>(all: &'a [Product], query: &ViewQuery) -> Vec<&'a Product> {
    if query.sort() == SortMode::Default && query.last_input() == LastInput::Sort {
        return all.iter().collect();
    }
    match query.last_filter() {
        LastInput::Category => filter_by_category(all, query.category()),
        LastInput::Search => filter_by_search(all, query.search()),
        LastInput::Sort | LastInput::None => all.iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::test_support::{product, stocked};
    use pretty_assertions::assert_eq;

    fn catalog_a12_b8() -> Vec<Product> {
        (1..=20)
            .map(|id| {
                let cat = if id <= 12 { "a" } else { "b" };
                product(id, &format!("Item {}", id), cat)
            })
            .collect()
    }

    fn ids(products: &[Product]) -> Vec<i64> {
        products.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_select_category_b() {
        let all = catalog_a12_b8();
        let mut q = ViewQuery::default();
        q.select_category(Some("b".into()));

        let view = derive_view(&all, &q);
        assert_eq!(view.len(), 8);
        assert_eq!(view.page_count(), 1);
        assert!(view.products().iter().all(|p| p.category == "b"));
    }

    #[test]
    fn test_stock_sort_scenario() {
        let all = vec![stocked(1, Some(5)), stocked(2, None), stocked(3, Some(20))];
        let mut q = ViewQuery::default();
        q.set_sort(SortMode::Stock);

        let view = derive_view(&all, &q);
        assert_eq!(ids(view.products()), vec![3, 1, 2]);
    }

    #[test]
    fn test_out_of_range_page_after_filter_is_empty() {
        let mut all = catalog_a12_b8();
        all.extend((21..=60).map(|id| product(id, "Filler", "c")));
        all.extend((61..=65).map(|id| product(id, "Rare", "d")));

        let mut q = ViewQuery::default();
        q.set_page(3);
        assert_eq!(derive_view(&all, &q).visible().len(), 9);

        q.select_category(Some("d".into()));
        let view = derive_view(&all, &q);
        assert_eq!(view.len(), 5);
        assert_eq!(view.page(), 3);
        assert!(view.visible().is_empty());
        assert!(view.page_out_of_range());
    }

    #[test]
    fn test_compose_mode_ands_filters() {
        let all = vec![
            product(1, "Red Phone", "phones"),
            product(2, "Blue Phone", "phones"),
            product(3, "Red Laptop", "laptops"),
        ];
        let mut q = ViewQuery::default();
        q.select_category(Some("phones".into()));
        q.set_search("red");

        assert_eq!(ids(derive_view(&all, &q).products()), vec![1]);

        // Order of changes does not matter when composing
        let mut q2 = ViewQuery::default();
        q2.set_search("red");
        q2.select_category(Some("phones".into()));
        assert_eq!(ids(derive_view(&all, &q2).products()), vec![1]);
    }

    #[test]
    fn test_compose_default_sort_keeps_filters() {
        let all = catalog_a12_b8();
        let mut q = ViewQuery::default();
        q.select_category(Some("b".into()));
        q.set_sort(SortMode::Name);
        q.set_sort(SortMode::Default);

        let view = derive_view(&all, &q);
        assert_eq!(view.len(), 8);
        assert_eq!(ids(view.products()), (13..=20).collect::<Vec<_>>());
    }

    #[test]
    fn test_exclusive_latest_filter_wins() {
        let all = vec![
            product(1, "Red Phone", "phones"),
            product(2, "Blue Phone", "phones"),
            product(3, "Red Laptop", "laptops"),
        ];
        let mut q = ViewQuery::new(9, FilterMode::Exclusive);
        q.select_category(Some("phones".into()));
        q.set_search("red");
        // Search typed last: category no longer applies
        assert_eq!(ids(derive_view(&all, &q).products()), vec![1, 3]);

        q.select_category(Some("laptops".into()));
        // Category clicked last: search no longer applies
        assert_eq!(ids(derive_view(&all, &q).products()), vec![3]);
    }

    #[test]
    fn test_exclusive_default_sort_discards_filter() {
        let all = catalog_a12_b8();
        let mut q = ViewQuery::new(9, FilterMode::Exclusive);
        q.select_category(Some("b".into()));
        assert_eq!(derive_view(&all, &q).len(), 8);

        q.set_sort(SortMode::Default);
        let view = derive_view(&all, &q);
        assert_eq!(view.len(), 20);
        assert_eq!(ids(view.products()), (1..=20).collect::<Vec<_>>());
    }

    #[test]
    fn test_exclusive_sort_keeps_category_filter() {
        let all = catalog_a12_b8();
        let mut q = ViewQuery::new(9, FilterMode::Exclusive);
        q.select_category(Some("b".into()));
        q.set_sort(SortMode::Name);

        let view = derive_view(&all, &q);
        assert_eq!(view.len(), 8);
    }

    #[test]
    fn test_exclusive_sort_after_search_keeps_search_result() {
        let all = vec![
            product(1, "Red Phone", "phones"),
            product(2, "Blue Phone", "phones"),
            product(3, "Red Laptop", "laptops"),
        ];
        let mut q = ViewQuery::new(9, FilterMode::Exclusive);
        q.select_category(Some("phones".into()));
        q.set_search("red");
        assert_eq!(ids(derive_view(&all, &q).products()), vec![1, 3]);

        q.set_sort(SortMode::Name);
        assert_eq!(q.last_filter(), LastInput::Search);
        assert_eq!(ids(derive_view(&all, &q).products()), vec![3, 1]);

        q.set_sort(SortMode::PriceDesc);
        let mut kept = ids(derive_view(&all, &q).products());
        kept.sort();
        assert_eq!(kept, vec![1, 3]);
    }

    #[test]
    fn test_select_category_resets_sort_not_page() {
        let mut q = ViewQuery::default();
        q.set_sort(SortMode::PriceDesc);
        q.set_page(2);
        q.select_category(Some("a".into()));
        assert_eq!(q.sort(), SortMode::Default);
        assert_eq!(q.page(), 2);
    }

    #[test]
    fn test_selecting_all_clears_category() {
        let mut q = ViewQuery::default();
        q.select_category(Some("a".into()));
        q.select_category(Some(ALL_CATEGORIES.into()));
        assert_eq!(q.category(), None);
        assert_eq!(q.category_label(), "all");
    }

    #[test]
    fn test_empty_catalog() {
        let view = derive_view(&[], &ViewQuery::default());
        assert!(view.is_empty());
        assert_eq!(view.page_count(), 0);
        assert!(view.visible().is_empty());
        assert!(!view.page_out_of_range());
    }

    #[test]
    fn test_filter_mode_from_str() {
        assert_eq!("compose".parse(), Ok(FilterMode::Compose));
        assert_eq!("Exclusive".parse(), Ok(FilterMode::Exclusive));
        assert!("both".parse::<FilterMode>().is_err());
    }

    mod properties {
        use super::*;
        use crate::listing::collate;
        use proptest::prelude::*;

        const CATEGORIES: [&str; 3] = ["beauty", "groceries", "laptops"];
        const WORDS: [&str; 5] = ["Red", "blue", "Phone", "lamp", "Oil"];

        fn arb_product() -> impl Strategy<Value = Product> {
            (
                1i64..10_000,
                prop::sample::select(WORDS.to_vec()),
                prop::sample::select(WORDS.to_vec()),
                prop::sample::select(CATEGORIES.to_vec()),
                0.0f64..2_000.0,
                prop::option::of(0.0f64..90.0),
                prop::option::of(0u32..500),
            )
                .prop_map(|(id, w1, w2, cat, price, discount, stock)| Product {
                    id,
                    title: format!("{} {}", w1, w2),
                    category: cat.to_string(),
                    price,
                    discount_percentage: discount,
                    stock,
                    brand: None,
                    rating: None,
                })
        }

        fn arb_catalog() -> impl Strategy<Value = Vec<Product>> {
            prop::collection::vec(arb_product(), 0..60).prop_map(|mut products| {
                for (i, p) in products.iter_mut().enumerate() {
                    p.id = i as i64 + 1;
                }
                products
            })
        }

        fn arb_sort() -> impl Strategy<Value = SortMode> {
            prop::sample::select(SortMode::ALL.to_vec())
        }

        proptest! {
            #[test]
            fn derived_is_subset_of_catalog(
                all in arb_catalog(),
                cat in prop::option::of(prop::sample::select(CATEGORIES.to_vec())),
                term in prop::sample::select(vec!["", "red", "PHONE", "x"]),
                sort in arb_sort(),
            ) {
                let mut q = ViewQuery::default();
                q.select_category(cat.map(str::to_string));
                q.set_search(term);
                q.set_sort(sort);
                let view = derive_view(&all, &q);

                prop_assert!(view.len() <= all.len());
                for p in view.products() {
                    prop_assert!(all.contains(p));
                    prop_assert!(matches_category(p, q.category()));
                    prop_assert!(SearchFilter::new(term).matches(p));
                }
            }

            #[test]
            fn derivation_ignores_history(
                all in arb_catalog(),
                first in arb_sort(),
                second in arb_sort(),
            ) {
                let mut direct = ViewQuery::default();
                direct.set_sort(second);

                let mut detour = ViewQuery::default();
                detour.set_sort(first);
                let _ = derive_view(&all, &detour);
                detour.set_sort(second);

                prop_assert_eq!(derive_view(&all, &direct), derive_view(&all, &detour));
            }

            #[test]
            fn price_asc_is_ordered(all in arb_catalog()) {
                let mut q = ViewQuery::default();
                q.set_sort(SortMode::PriceAsc);
                let view = derive_view(&all, &q);
                for pair in view.products().windows(2) {
                    prop_assert!(pair[0].effective_price() <= pair[1].effective_price());
                }
            }

            #[test]
            fn price_desc_is_ordered(all in arb_catalog()) {
                let mut q = ViewQuery::default();
                q.set_sort(SortMode::PriceDesc);
                let view = derive_view(&all, &q);
                for pair in view.products().windows(2) {
                    prop_assert!(pair[0].effective_price() >= pair[1].effective_price());
                }
            }

            #[test]
            fn name_sort_is_collated(all in arb_catalog()) {
                let mut q = ViewQuery::default();
                q.set_sort(SortMode::Name);
                let view = derive_view(&all, &q);
                for pair in view.products().windows(2) {
                    prop_assert_ne!(
                        collate(&pair[0].title, &pair[1].title),
                        std::cmp::Ordering::Greater
                    );
                }
            }

            #[test]
            fn stock_sort_is_descending(all in arb_catalog()) {
                let mut q = ViewQuery::default();
                q.set_sort(SortMode::Stock);
                let view = derive_view(&all, &q);
                for pair in view.products().windows(2) {
                    prop_assert!(pair[0].stock_or_zero() >= pair[1].stock_or_zero());
                }
            }

            #[test]
            fn pages_partition_the_view(all in arb_catalog(), page_size in 1usize..12) {
                let mut q = ViewQuery::new(page_size, FilterMode::Compose);
                let pages = derive_view(&all, &q).page_count();

                let mut seen = Vec::new();
                for page in 0..pages {
                    q.set_page(page);
                    let view = derive_view(&all, &q);
                    prop_assert!(!view.visible().is_empty());
                    prop_assert!(view.visible().len() <= page_size);
                    seen.extend(view.visible().iter().map(|p| p.id));
                }
                let expected: Vec<i64> = all.iter().map(|p| p.id).collect();
                prop_assert_eq!(seen, expected);

                if pages > 0 {
                    q.set_page(pages - 1);
                    let last = derive_view(&all, &q).visible().len();
                    let expected_last = match all.len() % page_size {
                        0 => page_size,
                        rem => rem,
                    };
                    prop_assert_eq!(last, expected_last);
                } else {
                    prop_assert!(all.is_empty());
                }

                q.set_page(pages);
                prop_assert!(derive_view(&all, &q).visible().is_empty());
            }
        }
    }
}
