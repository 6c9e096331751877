//! Admin back-office listings.
//!
//! Filters and header statistics for the order, customer and product tables.

mod customers;
mod orders;

pub use customers::{
    customers_from_orders, Customer, CustomerFilter, CustomerOrder, CustomerStats, CustomerStatus,
};
pub use orders::{OrderFilter, OrderStats, OrderSummary};

use crate::catalog::Product;
use serde::{Deserialize, Serialize};

/// Stock level at or below which a product is flagged.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// Search box and category dropdown of the product table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductFilter {
    /// Case-insensitive substring of name or description.
    pub search: String,
    /// `None` shows every category.
    pub category: Option<String>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        let needle = self.search.trim().to_lowercase();
        let matches_search = needle.is_empty()
            || product.name.to_lowercase().contains(&needle)
            || product.description.to_lowercase().contains(&needle);
        let matches_category = self
            .category
            .as_deref()
            .map_or(true, |c| c == product.category);
        matches_search && matches_category
    }

    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

/// Products with `stock <= threshold`, lowest stock first.
pub fn low_stock(products: &[Product], threshold: i64) -> Vec<&Product> {
    let mut low: Vec<&Product> = products.iter().filter(|p| p.stock <= threshold).collect();
    low.sort_by_key(|p| p.stock);
    low
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};

    fn product(name: &str, category: &str, stock: i64) -> Product {
        let mut p = Product::new(name, name, Money::from_major(1000, Currency::BDT));
        p.category = category.to_string();
        p.description = format!("{} in premium denim", name);
        p.stock = stock;
        p
    }

    #[test]
    fn test_product_filter() {
        let products = vec![
            product("Slim Jeans", "Jeans", 10),
            product("Trucker Jacket", "Jackets", 2),
        ];
        let filter = ProductFilter {
            search: "DENIM".into(),
            category: Some("Jackets".into()),
        };
        let found = filter.apply(&products);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Trucker Jacket");
        assert_eq!(ProductFilter::default().apply(&products).len(), 2);
    }

    #[test]
    fn test_low_stock() {
        let products = vec![
            product("A", "Jeans", 10),
            product("B", "Jeans", 5),
            product("C", "Jeans", 0),
        ];
        let low = low_stock(&products, DEFAULT_LOW_STOCK_THRESHOLD);
        let names: Vec<_> = low.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["C", "B"]);
    }
}
