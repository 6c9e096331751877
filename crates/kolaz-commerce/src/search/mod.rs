//! Shop listing module.
//!
//! Contains the shop sidebar filters, sort options, and pagination.

mod filter;
mod query;
mod results;

pub use filter::{PriceRange, ShopFilter, DEFAULT_MAX_PRICE};
pub use query::{ShopQuery, SortOption, DEFAULT_PER_PAGE, PER_PAGE_OPTIONS};
pub use results::{Facet, FacetValue, Pagination, SearchResults};
