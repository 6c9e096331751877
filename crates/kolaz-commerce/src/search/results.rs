//! Search results and pagination.

use serde::{Deserialize, Serialize};

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: i64,
    /// Items per page.
    pub per_page: i64,
    /// Total number of items.
    pub total: i64,
    /// Total number of pages.
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info. An empty listing still has one page.
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        let per_page = per_page.max(1);
        let page = page.max(1);
        let total = total.max(0);
        let total_pages = if total == 0 {
            1
        } else {
            (total - 1) / per_page + 1
        };

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Index of the first item on this page. Saturates for pages far past the end.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// Get start item number (1-indexed), 0 when the page is empty.
    pub fn start_item(&self) -> i64 {
        if self.offset() >= self.total {
            0
        } else {
            self.offset() + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> i64 {
        self.page.saturating_mul(self.per_page).min(self.total)
    }

    /// Slice one page out of a full list.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let len = items.len();
        let start = usize::try_from(self.offset()).map_or(len, |o| o.min(len));
        let per_page = usize::try_from(self.per_page).unwrap_or(usize::MAX);
        let end = start.saturating_add(per_page).min(len);
        &items[start..end]
    }
}

/// A page of results with facets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults<T> {
    /// Items on this page.
    pub items: Vec<T>,
    pub pagination: Pagination,
    /// Value counts over the whole filtered set.
    pub facets: Vec<Facet>,
}

impl<T> SearchResults<T> {
    pub fn new(items: Vec<T>, pagination: Pagination) -> Self {
        Self {
            items,
            pagination,
            facets: Vec::new(),
        }
    }

    pub fn with_facets(mut self, facets: Vec<Facet>) -> Self {
        self.facets = facets;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Look up a facet by field.
    pub fn facet(&self, field: &str) -> Option<&Facet> {
        self.facets.iter().find(|f| f.field == field)
    }
}

/// Value counts for one field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Facet {
    /// Facet name (e.g., "Category").
    pub name: String,
    /// Field this facet filters on.
    pub field: String,
    pub values: Vec<FacetValue>,
}

impl Facet {
    pub fn terms(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
            values: Vec::new(),
        }
    }

    /// Count one occurrence of a value, keeping first-seen order.
    pub fn count(&mut self, value: &str, selected: bool) {
        match self.values.iter_mut().find(|v| v.value == value) {
            Some(existing) => existing.count += 1,
            None => self.values.push(FacetValue {
                value: value.to_string(),
                count: 1,
                selected,
            }),
        }
    }

    pub fn count_of(&self, value: &str) -> i64 {
        self.values
            .iter()
            .find(|v| v.value == value)
            .map(|v| v.count)
            .unwrap_or(0)
    }
}

/// A single facet value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FacetValue {
    pub value: String,
    /// Number of items with this value.
    pub count: i64,
    /// Whether currently selected.
    pub selected: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_basics() {
        let p = Pagination::new(2, 10, 45);
        assert_eq!(p.total_pages, 5);
        assert!(p.has_next);
        assert!(p.has_prev);
        assert_eq!(p.offset(), 10);
        assert_eq!(p.start_item(), 11);
        assert_eq!(p.end_item(), 20);
    }

    #[test]
    fn test_pagination_empty() {
        let p = Pagination::new(1, 12, 0);
        assert_eq!(p.total_pages, 1);
        assert!(!p.has_next);
        assert_eq!(p.start_item(), 0);
    }

    #[test]
    fn test_slice_past_end() {
        let items: Vec<i32> = (1..=5).collect();
        assert_eq!(Pagination::new(2, 3, 5).slice(&items), &[4, 5]);
        assert!(Pagination::new(4, 3, 5).slice(&items).is_empty());
    }

    #[test]
    fn test_huge_page_and_page_size_do_not_overflow() {
        let items: Vec<i32> = (1..=5).collect();

        let far = Pagination::new(i64::MAX, 12, 5);
        assert_eq!(far.offset(), i64::MAX);
        assert_eq!(far.start_item(), 0);
        assert_eq!(far.end_item(), 5);
        assert!(far.slice(&items).is_empty());
        assert!(!far.has_next);

        let wide = Pagination::new(1, i64::MAX, 5);
        assert_eq!(wide.total_pages, 1);
        assert_eq!(wide.slice(&items), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_facet_counting() {
        let mut facet = Facet::terms("Color", "color");
        facet.count("Black", true);
        facet.count("Blue", false);
        facet.count("Black", true);
        assert_eq!(facet.count_of("Black"), 2);
        assert_eq!(facet.count_of("Red"), 0);
        assert_eq!(facet.values[0].value, "Black");
    }
}
