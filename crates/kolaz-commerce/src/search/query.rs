//! Shop listing query.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::search::{Facet, Pagination, SearchResults, ShopFilter};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default page size of the shop grid.
pub const DEFAULT_PER_PAGE: i64 = 12;

/// Page sizes offered by the shop grid.
pub const PER_PAGE_OPTIONS: [i64; 3] = [12, 24, 48];

/// Sort options for the shop grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// New arrivals first, otherwise list order.
    #[default]
    Newest,
    /// Display price, ascending.
    #[serde(rename = "price-low")]
    PriceLowHigh,
    /// Display price, descending.
    #[serde(rename = "price-high")]
    PriceHighLow,
    /// List order.
    Unsorted,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Newest => "newest",
            SortOption::PriceLowHigh => "price-low",
            SortOption::PriceHighLow => "price-high",
            SortOption::Unsorted => "unsorted",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Newest => "Newest",
            SortOption::PriceLowHigh => "Price: Low to High",
            SortOption::PriceHighLow => "Price: High to Low",
            SortOption::Unsorted => "Default",
        }
    }

    /// Sort in place. All sorts are stable.
    pub fn apply(&self, products: &mut [Product]) {
        match self {
            SortOption::Newest => products.sort_by_key(|p| !p.is_new_arrival),
            SortOption::PriceLowHigh => products.sort_by_key(|p| p.display_price().amount_cents),
            SortOption::PriceHighLow => {
                products.sort_by_key(|p| std::cmp::Reverse(p.display_price().amount_cents))
            }
            SortOption::Unsorted => {}
        }
    }
}

impl FromStr for SortOption {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" => Ok(SortOption::Newest),
            "price-low" | "price-asc" => Ok(SortOption::PriceLowHigh),
            "price-high" | "price-desc" => Ok(SortOption::PriceHighLow),
            "unsorted" | "none" => Ok(SortOption::Unsorted),
            other => Err(CommerceError::ValidationError(format!("unknown sort: {}", other))),
        }
    }
}

/// Filter, sort and page state of the shop grid.
///
/// Changing the filter or the sort sends the user back to page 1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShopQuery {
    filter: ShopFilter,
    sort: SortOption,
    page: i64,
    per_page: i64,
}

impl ShopQuery {
    pub fn new() -> Self {
        Self {
            filter: ShopFilter::default(),
            sort: SortOption::default(),
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }

    pub fn filter(&self) -> &ShopFilter {
        &self.filter
    }

    pub fn sort(&self) -> SortOption {
        self.sort
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn per_page(&self) -> i64 {
        self.per_page
    }

    /// Replace the filter and reset to page 1.
    pub fn set_filter(&mut self, filter: ShopFilter) {
        self.filter = filter;
        self.page = 1;
    }

    /// Edit the filter in place and reset to page 1.
    pub fn update_filter(&mut self, edit: impl FnOnce(&mut ShopFilter)) {
        edit(&mut self.filter);
        self.page = 1;
    }

    /// Change the sort and reset to page 1.
    pub fn set_sort(&mut self, sort: SortOption) {
        self.sort = sort;
        self.page = 1;
    }

    /// Change the page size and reset to page 1.
    pub fn set_per_page(&mut self, per_page: i64) {
        self.per_page = per_page.max(1);
        self.page = 1;
    }

    pub fn set_page(&mut self, page: i64) {
        self.page = page.max(1);
    }

    pub fn with_filter(mut self, filter: ShopFilter) -> Self {
        self.set_filter(filter);
        self
    }

    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.set_sort(sort);
        self
    }

    /// Set page size then page.
    pub fn with_pagination(mut self, page: i64, per_page: i64) -> Self {
        self.set_per_page(per_page);
        self.set_page(page);
        self
    }

    /// Number of selected filter values.
    pub fn active_filter_count(&self) -> usize {
        self.filter.active_count()
    }

    /// Reset the filter, including the price range.
    pub fn clear_filters(&mut self) {
        self.set_filter(ShopFilter::default());
    }

    /// Filter, sort and slice a product list.
    pub fn run(&self, products: &[Product]) -> SearchResults<Product> {
        let mut matched: Vec<Product> = products
            .iter()
            .filter(|p| self.filter.matches(p))
            .cloned()
            .collect();
        self.sort.apply(&mut matched);

        let pagination = Pagination::new(self.page, self.per_page, matched.len() as i64);
        let facets = self.facets(&matched);
        let items = pagination.slice(&matched).to_vec();

        SearchResults::new(items, pagination).with_facets(facets)
    }

    fn facets(&self, matched: &[Product]) -> Vec<Facet> {
        let mut category = Facet::terms("Category", "category");
        let mut color = Facet::terms("Color", "color");
        let mut size = Facet::terms("Size", "size");

        for p in matched {
            if !p.category.is_empty() {
                category.count(&p.category, self.filter.categories.contains(&p.category));
            }
            for c in p.color_names() {
                color.count(c, self.filter.colors.iter().any(|s| s == c));
            }
            for s in &p.sizes {
                size.count(s, self.filter.sizes.contains(s));
            }
        }

        vec![category, color, size]
    }
}

impl Default for ShopQuery {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductColor;
    use crate::money::{Currency, Money};

    fn catalog() -> Vec<Product> {
        (1..=30)
            .map(|i| {
                let mut p = Product::new(
                    format!("P{}", i),
                    format!("Item {}", i),
                    Money::from_major(100 * i, Currency::BDT),
                );
                p.category = if i % 2 == 0 { "Jeans" } else { "Shirts" }.to_string();
                p.colors = vec![ProductColor::new(if i % 3 == 0 { "Black" } else { "Blue" }, "#000")];
                p.sizes = vec!["M".to_string()];
                p.is_new_arrival = i % 10 == 0;
                p
            })
            .collect()
    }

    #[test]
    fn test_default_query_pages_by_twelve() {
        let results = ShopQuery::new().run(&catalog());
        assert_eq!(results.len(), 12);
        assert_eq!(results.pagination.total, 30);
        assert_eq!(results.pagination.total_pages, 3);
    }

    #[test]
    fn test_newest_is_stable() {
        let results = ShopQuery::new().with_pagination(1, 48).run(&catalog());
        let ids: Vec<_> = results.items.iter().take(4).map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["P10", "P20", "P30", "P1"]);
    }

    #[test]
    fn test_price_sorts() {
        let results = ShopQuery::new()
            .with_sort(SortOption::PriceHighLow)
            .run(&catalog());
        assert_eq!(results.items[0].id.as_str(), "P30");

        let results = ShopQuery::new()
            .with_sort(SortOption::PriceLowHigh)
            .run(&catalog());
        assert_eq!(results.items[0].id.as_str(), "P1");
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut query = ShopQuery::new();
        query.set_page(3);
        query.update_filter(|f| f.categories.push("Jeans".to_string()));
        assert_eq!(query.page(), 1);

        query.set_page(2);
        query.set_sort(SortOption::Unsorted);
        assert_eq!(query.page(), 1);

        let results = query.run(&catalog());
        assert_eq!(results.pagination.total, 15);
        assert_eq!(query.active_filter_count(), 1);

        query.clear_filters();
        assert_eq!(query.active_filter_count(), 0);
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let results = ShopQuery::new()
            .with_pagination(i64::MAX, 12)
            .run(&catalog());
        assert!(results.is_empty());
        assert_eq!(results.pagination.total, 30);
        assert_eq!(results.pagination.start_item(), 0);

        let results = ShopQuery::new().with_pagination(4, 12).run(&catalog());
        assert!(results.is_empty());
        assert!(results.pagination.has_prev);
    }

    #[test]
    fn test_facets_count_filtered_set() {
        let query = ShopQuery::new()
            .with_filter(ShopFilter::new().with_categories(vec!["Jeans".into()]));
        let results = query.run(&catalog());

        let category = results.facet("category").unwrap();
        assert_eq!(category.count_of("Jeans"), 15);
        assert_eq!(category.count_of("Shirts"), 0);
        assert!(category.values[0].selected);

        // Even ids divisible by 3: 6, 12, 18, 24, 30.
        assert_eq!(results.facet("color").unwrap().count_of("Black"), 5);
    }

    #[test]
    fn test_sort_from_str() {
        assert_eq!("price-low".parse::<SortOption>().unwrap(), SortOption::PriceLowHigh);
        assert!("cheapest".parse::<SortOption>().is_err());
    }
}
