//! Product API client for Kolaz.
//!
//! Talks to the backend's `/products` endpoints, maps the nested denim
//! records into storefront [`Product`](kolaz_commerce::catalog::Product)s and
//! caches reads per query.
//!
//! # Example
//!
//! ```rust,ignore
//! use kolaz_data::{CachedCatalog, FetchClient, PrefetchPlan, ProductApi};
//! use std::time::Duration;
//!
//! let client = FetchClient::http("https://api.kolaz.com/api/v1", Duration::from_secs(10))?;
//! let catalog = CachedCatalog::new(ProductApi::new(client));
//!
//! catalog.prefetch(&PrefetchPlan::default()).await;
//! let featured = catalog.featured().await?;
//! ```

mod api;
mod catalog;
mod client;
mod error;
mod query;
mod request;
mod response;

pub mod mapper;
pub mod wire;

pub use api::{ProductApi, BEST_SELLER_LIMIT, FEATURED_LIMIT, NEW_ARRIVAL_LIMIT};
pub use catalog::{keys, CachedCatalog, CatalogValue, PrefetchPlan, PrefetchReport};
pub use client::{ClientRequestBuilder, FetchClient, ReqwestTransport, Transport, DEFAULT_TIMEOUT};
pub use error::FetchError;
pub use query::ProductQuery;
pub use request::{Method, RequestBuilder};
pub use response::Response;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::wire::{DenimProduct, ProductInput};
    pub use crate::{CachedCatalog, FetchClient, FetchError, PrefetchPlan, ProductApi, ProductQuery};
}
