use crate::catalog::Product;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort order offered by the sort control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum SortMode {
    /// Catalog order.
    #[default]
    Default,
    /// Effective (discounted) price, low to high.
    PriceAsc,
    /// Effective (discounted) price, high to low.
    PriceDesc,
    /// Stock, most first. Missing stock counts as 0.
    Stock,
    /// Title, A to Z.
    Name,
}

impl SortMode {
    /// Order in which the control lists the options.
    pub const ALL: [SortMode; 5] = [
        SortMode::Default,
        SortMode::PriceAsc,
        SortMode::PriceDesc,
        SortMode::Stock,
        SortMode::Name,
    ];

    /// Stable identifier used on the command line and in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::PriceAsc => "asc",
            Self::PriceDesc => "desc",
            Self::Stock => "stock",
            Self::Name => "name",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::PriceAsc => "Price (low to high)",
            Self::PriceDesc => "Price (high to low)",
            Self::Stock => "Stock",
            Self::Name => "Name",
        }
    }

    /// Short label for narrow viewports.
    pub fn compact_label(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::PriceAsc => "Price ↑",
            Self::PriceDesc => "Price ↓",
            Self::Stock => "Stock",
            Self::Name => "Name",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "asc" | "price-asc" | "price_asc" => Ok(Self::PriceAsc),
            "desc" | "price-desc" | "price_desc" => Ok(Self::PriceDesc),
            "stock" => Ok(Self::Stock),
            "name" => Ok(Self::Name),
            other => Err(format!(
                "unknown sort '{}' (expected default, asc, desc, stock or name)",
                other
            )),
        }
    }
}

/// Locale-style title comparison.
///
/// Primary key is the case-folded text; when two titles differ only in case
/// the lowercase form sorts first ("apple" < "Apple" < "banana").
pub fn collate(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded.then_with(|| b.cmp(a))
}

/// Stable in-place sort of `products` by `mode`. `Default` leaves the
/// order untouched.
pub fn sort_products<P: AsRef<Product>>(products: &mut [P], mode: SortMode) {
    match mode {
        SortMode::Default => {}
        SortMode::PriceAsc => products.sort_by(|a, b| {
            a.as_ref()
                .effective_price()
                .total_cmp(&b.as_ref().effective_price())
        }),
        SortMode::PriceDesc => products.sort_by(|a, b| {
            b.as_ref()
                .effective_price()
                .total_cmp(&a.as_ref().effective_price())
        }),
        SortMode::Stock => {
            products.sort_by(|a, b| b.as_ref().stock_or_zero().cmp(&a.as_ref().stock_or_zero()))
        }
        SortMode::Name => products.sort_by(|a, b| collate(&a.as_ref().title, &b.as_ref().title)),
    }
}

impl AsRef<Product> for Product {
    fn as_ref(&self) -> &Product {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::test_support::{priced, product, stocked};

    fn ids(products: &[Product]) -> Vec<i64> {
        products.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_price_asc_uses_discounted_price() {
        // 100 at 50% off (50) should come before 60 at no discount
        let mut products = vec![priced(1, 60.0, None), priced(2, 100.0, Some(50.0))];
        sort_products(&mut products, SortMode::PriceAsc);
        assert_eq!(ids(&products), vec![2, 1]);
    }

    #[test]
    fn test_price_desc() {
        let mut products = vec![
            priced(1, 10.0, None),
            priced(2, 30.0, Some(10.0)),
            priced(3, 20.0, None),
        ];
        sort_products(&mut products, SortMode::PriceDesc);
        assert_eq!(ids(&products), vec![2, 3, 1]);
    }

    #[test]
    fn test_price_ties_are_stable() {
        let mut products = vec![
            priced(1, 10.0, None),
            priced(2, 20.0, Some(50.0)),
            priced(3, 10.0, None),
        ];
        sort_products(&mut products, SortMode::PriceAsc);
        assert_eq!(ids(&products), vec![1, 2, 3]);
    }

    #[test]
    fn test_stock_sort_treats_missing_as_zero() {
        let mut products = vec![stocked(1, Some(5)), stocked(2, None), stocked(3, Some(20))];
        sort_products(&mut products, SortMode::Stock);
        assert_eq!(ids(&products), vec![3, 1, 2]);
    }

    #[test]
    fn test_name_sort_ignores_case() {
        let mut products = vec![
            product(1, "banana", "x"),
            product(2, "Apple", "x"),
            product(3, "cherry", "x"),
        ];
        sort_products(&mut products, SortMode::Name);
        assert_eq!(ids(&products), vec![2, 1, 3]);
    }

    #[test]
    fn test_default_sort_is_noop() {
        let mut products = vec![priced(3, 1.0, None), priced(1, 2.0, None)];
        sort_products(&mut products, SortMode::Default);
        assert_eq!(ids(&products), vec![3, 1]);
    }

    #[test]
    fn test_collate_case_tiebreak() {
        assert_eq!(collate("apple", "Apple"), Ordering::Less);
        assert_eq!(collate("Apple", "banana"), Ordering::Less);
        assert_eq!(collate("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_sort_mode_round_trips_through_str() {
        for mode in SortMode::ALL {
            assert_eq!(mode.as_str().parse::<SortMode>(), Ok(mode));
        }
        assert!("cheapest".parse::<SortMode>().is_err());
    }

    #[test]
    fn test_next_prev_cycle() {
        assert_eq!(SortMode::Default.next(), SortMode::PriceAsc);
        assert_eq!(SortMode::Name.next(), SortMode::Default);
        assert_eq!(SortMode::Default.prev(), SortMode::Name);
    }

    #[test]
    fn test_labels() {
        assert_eq!(SortMode::PriceAsc.label(), "Price (low to high)");
        assert_eq!(SortMode::PriceDesc.label(), "Price (high to low)");
    }
}
