//! Product catalog module.
//!
//! Contains the storefront product shape and helpers that derive listings
//! (colors, categories, related items) from an already-fetched product list.

mod product;

pub use product::{FeatureFlag, Product, ProductColor};

use std::collections::HashSet;

/// Number of related products shown on a product page.
pub const RELATED_PRODUCTS_LIMIT: usize = 4;

/// Distinct colors across products, first occurrence wins, keyed by name.
pub fn distinct_colors(products: &[Product]) -> Vec<ProductColor> {
    let mut seen = HashSet::new();
    products
        .iter()
        .flat_map(|p| p.colors.iter())
        .filter(|c| seen.insert(c.name.clone()))
        .cloned()
        .collect()
}

/// Distinct main categories, in order of first appearance. Empty names are skipped.
pub fn distinct_categories(products: &[Product]) -> Vec<String> {
    let mut seen = HashSet::new();
    products
        .iter()
        .map(|p| p.category.as_str())
        .filter(|c| !c.is_empty() && seen.insert(*c))
        .map(str::to_string)
        .collect()
}

/// Products in the same category as `product`, excluding itself.
pub fn related_products(product: &Product, all: &[Product], limit: usize) -> Vec<Product> {
    all.iter()
        .filter(|p| p.id != product.id && p.category == product.category)
        .take(limit)
        .cloned()
        .collect()
}

/// Products carrying a marketing flag.
pub fn with_flag(products: &[Product], flag: FeatureFlag) -> Vec<Product> {
    products.iter().filter(|p| p.has_flag(flag)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};

    fn product(id: &str, category: &str, colors: &[&str]) -> Product {
        let mut p = Product::new(id, id, Money::from_major(1000, Currency::BDT));
        p.category = category.to_string();
        p.colors = colors
            .iter()
            .map(|c| ProductColor::new(*c, "#000000"))
            .collect();
        p
    }

    #[test]
    fn test_distinct_colors() {
        let products = vec![
            product("a", "Jeans", &["Indigo", "Black"]),
            product("b", "Jeans", &["Black", "White"]),
        ];
        let names: Vec<_> = distinct_colors(&products).into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Indigo", "Black", "White"]);
    }

    #[test]
    fn test_distinct_categories() {
        let products = vec![
            product("a", "Jeans", &[]),
            product("b", "", &[]),
            product("c", "Jackets", &[]),
            product("d", "Jeans", &[]),
        ];
        assert_eq!(distinct_categories(&products), vec!["Jeans", "Jackets"]);
    }

    #[test]
    fn test_related_products() {
        let products: Vec<_> = (0..7)
            .map(|i| product(&format!("p{}", i), if i % 2 == 0 { "Jeans" } else { "Shirts" }, &[]))
            .collect();
        let related = related_products(&products[0], &products, RELATED_PRODUCTS_LIMIT);
        let ids: Vec<_> = related.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p2", "p4", "p6"]);
    }

    #[test]
    fn test_with_flag() {
        let mut a = product("a", "Jeans", &[]);
        a.is_featured = true;
        let b = product("b", "Jeans", &[]);
        let featured = with_flag(&[a, b], FeatureFlag::Featured);
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].id.as_str(), "a");
    }
}
