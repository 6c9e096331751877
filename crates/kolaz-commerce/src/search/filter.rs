//! Shop filters.

use crate::catalog::Product;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Upper bound of the default price slider, in major units.
pub const DEFAULT_MAX_PRICE: i64 = 50_000;

/// Inclusive price range compared against the display price.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriceRange {
    pub min: Money,
    pub max: Money,
}

impl PriceRange {
    pub fn new(min: Money, max: Money) -> Self {
        Self { min, max }
    }

    /// A price in another currency is never in range.
    pub fn contains(&self, price: &Money) -> bool {
        price.currency == self.min.currency
            && price.currency == self.max.currency
            && price.amount_cents >= self.min.amount_cents
            && price.amount_cents <= self.max.amount_cents
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::new(
            Money::zero(Currency::BDT),
            Money::from_major(DEFAULT_MAX_PRICE, Currency::BDT),
        )
    }
}

/// Shop sidebar filters.
///
/// A product matches when, for every non-empty set, it carries at least one
/// of the selected values, and its display price lies in the range.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ShopFilter {
    /// Selected main categories.
    pub categories: Vec<String>,
    /// Selected color names.
    pub colors: Vec<String>,
    /// Selected sizes.
    pub sizes: Vec<String>,
    pub price_range: PriceRange,
}

impl ShopFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_colors(mut self, colors: Vec<String>) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_sizes(mut self, sizes: Vec<String>) -> Self {
        self.sizes = sizes;
        self
    }

    pub fn with_price_range(mut self, min: Money, max: Money) -> Self {
        self.price_range = PriceRange::new(min, max);
        self
    }

    /// Check whether a product passes every filter.
    pub fn matches(&self, product: &Product) -> bool {
        (self.categories.is_empty() || self.categories.iter().any(|c| *c == product.category))
            && (self.colors.is_empty() || self.colors.iter().any(|c| product.has_color(c)))
            && (self.sizes.is_empty() || self.sizes.iter().any(|s| product.has_size(s)))
            && self.price_range.contains(&product.display_price())
    }

    /// Number of selected category, color and size values.
    ///
    /// The price range does not count.
    pub fn active_count(&self) -> usize {
        self.categories.len() + self.colors.len() + self.sizes.len()
    }

    /// Toggle a value in or out of a selection.
    pub fn toggle(values: &mut Vec<String>, value: &str) {
        if let Some(pos) = values.iter().position(|v| v == value) {
            values.remove(pos);
        } else {
            values.push(value.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductColor;

    fn product(category: &str, color: &str, size: &str, price: i64) -> Product {
        let mut p = Product::new("P", "P", Money::from_major(price, Currency::BDT));
        p.category = category.to_string();
        p.colors = vec![ProductColor::new(color, "#000")];
        p.sizes = vec![size.to_string()];
        p
    }

    #[test]
    fn test_price_range_rejects_other_currency() {
        let range = PriceRange::new(
            Money::from_major(0, Currency::USD),
            Money::from_major(100, Currency::USD),
        );
        assert!(range.contains(&Money::from_major(50, Currency::USD)));
        assert!(!range.contains(&Money::from_major(50, Currency::BDT)));
    }

    #[test]
    fn test_empty_filter_matches_everything_in_range() {
        let filter = ShopFilter::new();
        assert!(filter.matches(&product("Jeans", "Black", "32", 50_000)));
        assert!(!filter.matches(&product("Jeans", "Black", "32", 50_001)));
    }

    #[test]
    fn test_or_within_and_across() {
        let filter = ShopFilter::new()
            .with_categories(vec!["Jeans".into(), "Jackets".into()])
            .with_colors(vec!["Black".into()]);

        assert!(filter.matches(&product("Jeans", "Black", "32", 100)));
        assert!(filter.matches(&product("Jackets", "Black", "L", 100)));
        assert!(!filter.matches(&product("Jeans", "Blue", "32", 100)));
        assert!(!filter.matches(&product("Shirts", "Black", "M", 100)));
    }

    #[test]
    fn test_price_range_uses_display_price() {
        let filter = ShopFilter::new().with_price_range(
            Money::from_major(1000, Currency::BDT),
            Money::from_major(2000, Currency::BDT),
        );
        let mut p = product("Jeans", "Black", "32", 2500);
        assert!(!filter.matches(&p));
        p.sale_price = Some(Money::from_major(2000, Currency::BDT));
        assert!(filter.matches(&p));
    }

    #[test]
    fn test_active_count_and_toggle() {
        let mut filter = ShopFilter::new().with_sizes(vec!["M".into()]);
        ShopFilter::toggle(&mut filter.colors, "Black");
        assert_eq!(filter.active_count(), 2);
        ShopFilter::toggle(&mut filter.colors, "Black");
        assert_eq!(filter.active_count(), 1);
    }
}
