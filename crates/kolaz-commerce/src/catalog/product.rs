//! The storefront product shape.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Marketing flag used purely for display filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureFlag {
    /// Shown on the homepage.
    Featured,
    /// Recently released.
    NewArrival,
    /// Top seller.
    BestSeller,
}

impl FeatureFlag {
    /// Name of the `GET /products` query parameter for this flag.
    pub fn query_param(&self) -> &'static str {
        match self {
            FeatureFlag::Featured => "isFeatured",
            FeatureFlag::NewArrival => "isNewArrival",
            FeatureFlag::BestSeller => "isBestSeller",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FeatureFlag::Featured => "Featured",
            FeatureFlag::NewArrival => "New Arrival",
            FeatureFlag::BestSeller => "Best Seller",
        }
    }
}

/// A color option with its swatch hex code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ProductColor {
    /// Display name (e.g., "Indigo Blue").
    pub name: String,
    /// Hex code (e.g., "#191970").
    pub hex: String,
}

impl ProductColor {
    pub fn new(name: impl Into<String>, hex: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hex: hex.into(),
        }
    }
}

/// A product as the storefront displays it.
///
/// This is the flat shape produced by mapping the API's nested schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Product identifier (the SKU).
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Base price.
    pub price: Money,
    /// Sale price, when discounted.
    pub sale_price: Option<Money>,
    /// Cover image URL.
    pub image: String,
    /// Gallery image URLs.
    pub images: Vec<String>,
    /// Main category (e.g., "Jeans").
    pub category: String,
    /// First subcategory, or empty.
    pub subcategory: String,
    /// Brand name.
    pub brand: String,
    /// Available colors.
    pub colors: Vec<ProductColor>,
    /// Available sizes.
    pub sizes: Vec<String>,
    /// Units in stock.
    pub stock: i64,
    pub is_new_arrival: bool,
    pub is_best_seller: bool,
    pub is_featured: bool,
    /// Full description.
    pub description: String,
    /// Average rating (1-5).
    pub rating: f64,
    /// Number of reviews.
    pub review_count: i64,
    /// Style, occasion and feature tags.
    pub tags: Vec<String>,
}

impl Product {
    /// Create a product with a name and base price; everything else empty.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            sale_price: None,
            image: String::new(),
            images: Vec::new(),
            category: String::new(),
            subcategory: String::new(),
            brand: String::new(),
            colors: Vec::new(),
            sizes: Vec::new(),
            stock: 0,
            is_new_arrival: false,
            is_best_seller: false,
            is_featured: false,
            description: String::new(),
            rating: 0.0,
            review_count: 0,
            tags: Vec::new(),
        }
    }

    /// The sale price, when one is set and positive. A zero sale price means
    /// "not on sale".
    pub fn effective_sale_price(&self) -> Option<Money> {
        self.sale_price.filter(Money::is_positive)
    }

    /// The price a customer pays: sale price when present, else base price.
    pub fn display_price(&self) -> Money {
        self.effective_sale_price().unwrap_or(self.price)
    }

    /// Check if the product has a sale price below its base price.
    pub fn is_on_sale(&self) -> bool {
        self.effective_sale_price()
            .map(|sale| sale.amount_cents < self.price.amount_cents)
            .unwrap_or(false)
    }

    /// Percentage saved when on sale, rounded to the nearest whole percent.
    pub fn discount_percentage(&self) -> Option<i64> {
        let sale = self.effective_sale_price()?;
        if self.price.amount_cents <= 0 || sale.amount_cents >= self.price.amount_cents {
            return None;
        }
        let savings = (self.price.amount_cents - sale.amount_cents) as f64;
        Some((savings / self.price.amount_cents as f64 * 100.0).round() as i64)
    }

    /// Check if any units are in stock.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Check if the product comes in a color (by name).
    pub fn has_color(&self, name: &str) -> bool {
        self.colors.iter().any(|c| c.name == name)
    }

    /// Check if the product comes in a size.
    pub fn has_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    /// Check a marketing flag.
    pub fn has_flag(&self, flag: FeatureFlag) -> bool {
        match flag {
            FeatureFlag::Featured => self.is_featured,
            FeatureFlag::NewArrival => self.is_new_arrival,
            FeatureFlag::BestSeller => self.is_best_seller,
        }
    }

    /// Color names, in display order.
    pub fn color_names(&self) -> impl Iterator<Item = &str> {
        self.colors.iter().map(|c| c.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn jeans() -> Product {
        let mut p = Product::new("IRT-DJ-001", "Selvedge Jeans", Money::from_major(3000, Currency::BDT));
        p.colors = vec![ProductColor::new("Indigo", "#191970")];
        p.sizes = vec!["30".to_string(), "32".to_string()];
        p.stock = 4;
        p
    }

    #[test]
    fn test_display_price_prefers_sale() {
        let mut p = jeans();
        assert_eq!(p.display_price(), Money::from_major(3000, Currency::BDT));

        p.sale_price = Some(Money::from_major(2400, Currency::BDT));
        assert_eq!(p.display_price(), Money::from_major(2400, Currency::BDT));
        assert!(p.is_on_sale());
        assert_eq!(p.discount_percentage(), Some(20));
    }

    #[test]
    fn test_sale_price_not_lower_is_not_a_sale() {
        let mut p = jeans();
        p.sale_price = Some(Money::from_major(3000, Currency::BDT));
        assert!(!p.is_on_sale());
        assert_eq!(p.discount_percentage(), None);
        // Display still uses the sale price when one is set.
        assert_eq!(p.display_price(), Money::from_major(3000, Currency::BDT));
    }

    #[test]
    fn test_zero_sale_price_falls_back_to_base() {
        let mut p = jeans();
        p.sale_price = Some(Money::zero(Currency::BDT));
        assert_eq!(p.display_price(), Money::from_major(3000, Currency::BDT));
        assert!(!p.is_on_sale());
        assert_eq!(p.discount_percentage(), None);

        p.sale_price = Some(Money::new(-100, Currency::BDT));
        assert_eq!(p.display_price(), Money::from_major(3000, Currency::BDT));
    }

    #[test]
    fn test_variants_and_flags() {
        let mut p = jeans();
        assert!(p.has_color("Indigo"));
        assert!(!p.has_color("Black"));
        assert!(p.has_size("32"));
        assert!(!p.has_size("XL"));

        assert!(!p.has_flag(FeatureFlag::BestSeller));
        p.is_best_seller = true;
        assert!(p.has_flag(FeatureFlag::BestSeller));
        assert!(p.is_in_stock());
    }

    #[test]
    fn test_flag_query_params() {
        assert_eq!(FeatureFlag::Featured.query_param(), "isFeatured");
        assert_eq!(FeatureFlag::BestSeller.query_param(), "isBestSeller");
    }
}
