use serde::{Deserialize, Serialize};

// ============================================================================
// Product
// ============================================================================

/// A single catalog entry as returned by the products endpoint.
///
/// Only the fields the listing page needs are modelled; serde ignores the
/// rest of the payload (images, reviews, dimensions, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub price: f64,
    /// Percentage off the list price, 0-100. Absent means no discount.
    #[serde(default)]
    pub discount_percentage: Option<f64>,
    /// Units in stock. Absent sorts as 0.
    #[serde(default)]
    pub stock: Option<u32>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

impl Product {
    /// Price after applying `discount_percentage`.
    pub fn effective_price(&self) -> f64 {
        let discount = self.discount_percentage.unwrap_or(0.0);
        self.price - self.price * discount / 100.0
    }

    pub fn stock_or_zero(&self) -> u32 {
        self.stock.unwrap_or(0)
    }
}

/// Envelope of `GET /products?limit=N`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    #[serde(default)]
    pub total: Option<usize>,
}

// ============================================================================
// Category
// ============================================================================

/// A category the sidebar can filter by.
///
/// `slug` is the key products carry in their `category` field; `name` is
/// what the sidebar shows. Older API revisions return bare strings, in
/// which case both are the same value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCategory")]
pub struct Category {
    pub slug: String,
    pub name: String,
}

impl Category {
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCategory {
    Plain(String),
    Entry {
        slug: String,
        #[serde(default)]
        name: Option<String>,
    },
}

impl From<RawCategory> for Category {
    fn from(raw: RawCategory) -> Self {
        match raw {
            RawCategory::Plain(slug) => Self {
                name: slug.clone(),
                slug,
            },
            RawCategory::Entry { slug, name } => Self {
                name: name.unwrap_or_else(|| slug.clone()),
                slug,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_price_applies_discount() {
        let p = Product {
            id: 1,
            title: "Lamp".into(),
            category: "home".into(),
            price: 200.0,
            discount_percentage: Some(25.0),
            stock: None,
            brand: None,
            rating: None,
        };
        assert!((p.effective_price() - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_discount_and_stock_default() {
        let json = r#"{"id":7,"title":"Mug","category":"kitchen","price":9.5}"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.discount_percentage, None);
        assert_eq!(p.stock_or_zero(), 0);
        assert!((p.effective_price() - 9.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_product_ignores_unknown_fields() {
        let json = r#"{
            "id": 1,
            "title": "Essence Mascara",
            "category": "beauty",
            "price": 9.99,
            "discountPercentage": 7.17,
            "stock": 5,
            "rating": 4.94,
            "tags": ["beauty", "mascara"],
            "images": ["https://cdn.example.com/1.png"]
        }"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.stock, Some(5));
        assert_eq!(p.discount_percentage, Some(7.17));
        assert_eq!(p.rating, Some(4.94));
    }

    #[test]
    fn test_category_from_plain_string() {
        let cats: Vec<Category> = serde_json::from_str(r#"["smartphones","laptops"]"#).unwrap();
        assert_eq!(cats[0], Category::new("smartphones", "smartphones"));
        assert_eq!(cats[1].slug, "laptops");
    }

    #[test]
    fn test_category_from_object() {
        let json = r#"[{"slug":"home-decoration","name":"Home Decoration","url":"https://x/y"}]"#;
        let cats: Vec<Category> = serde_json::from_str(json).unwrap();
        assert_eq!(cats[0].slug, "home-decoration");
        assert_eq!(cats[0].name, "Home Decoration");
    }

    #[test]
    fn test_category_object_without_name_uses_slug() {
        let cats: Vec<Category> = serde_json::from_str(r#"[{"slug":"tops"}]"#).unwrap();
        assert_eq!(cats[0].name, "tops");
    }
}
