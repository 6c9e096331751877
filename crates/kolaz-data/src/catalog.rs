//! Product API reads behind the query cache.

use crate::wire::ProductInput;
use crate::{FetchError, ProductApi};
use futures::future::{join_all, BoxFuture, FutureExt};
use kolaz_cache::{QueryCache, QueryKey, QueryPolicy};
use kolaz_commerce::catalog::{Product, ProductColor};
use std::future::Future;
use tracing::{info, instrument, warn};

/// Query keys of the catalog.
pub mod keys {
    use kolaz_cache::QueryKey;

    /// Prefix shared by every catalog query.
    pub fn products() -> QueryKey {
        QueryKey::new(["products"])
    }

    pub fn all() -> QueryKey {
        products().with("all")
    }

    pub fn featured() -> QueryKey {
        products().with("featured")
    }

    pub fn best_sellers() -> QueryKey {
        products().with("best-sellers")
    }

    pub fn new_arrivals() -> QueryKey {
        products().with("new-arrivals")
    }

    pub fn colors() -> QueryKey {
        products().with("colors")
    }

    pub fn categories() -> QueryKey {
        products().with("categories")
    }

    pub fn single(id: &str) -> QueryKey {
        products().with("single").with(id)
    }

    pub fn by_category(category: &str) -> QueryKey {
        products().with("by-category").with(category)
    }

    pub fn related(id: &str) -> QueryKey {
        products().with("related").with(id)
    }
}

/// A cached query result.
#[derive(Debug, Clone)]
pub enum CatalogValue {
    Products(Vec<Product>),
    Product(Box<Product>),
    Colors(Vec<ProductColor>),
    Categories(Vec<String>),
}

/// What to warm on startup besides the fixed listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefetchPlan {
    /// Category section shown on the homepage.
    pub category: String,
    /// Product whose related items are warmed.
    pub related_id: String,
}

impl Default for PrefetchPlan {
    fn default() -> Self {
        Self {
            category: "Jeans".to_string(),
            related_id: "IRT-DJ-001".to_string(),
        }
    }
}

/// Outcome of a prefetch: every query settles, successful or not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefetchReport {
    pub loaded: Vec<QueryKey>,
    pub failed: Vec<(QueryKey, String)>,
}

impl PrefetchReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// [`ProductApi`] reads cached per query with their stale times.
///
/// Admin mutations go straight to the API and then drop every cached
/// product query.
#[derive(Debug, Clone)]
pub struct CachedCatalog {
    api: ProductApi,
    cache: QueryCache<CatalogValue>,
}

impl CachedCatalog {
    pub fn new(api: ProductApi) -> Self {
        Self {
            api,
            cache: QueryCache::new(),
        }
    }

    pub fn api(&self) -> &ProductApi {
        &self.api
    }

    pub fn cache(&self) -> &QueryCache<CatalogValue> {
        &self.cache
    }

    async fn cached<Fut>(
        &self,
        key: QueryKey,
        policy: QueryPolicy,
        fetch: Fut,
    ) -> Result<CatalogValue, FetchError>
    where
        Fut: Future<Output = Result<CatalogValue, FetchError>>,
    {
        self.cache.get_or_fetch(key, policy, || fetch).await
    }

    async fn product_list<Fut>(
        &self,
        key: QueryKey,
        policy: QueryPolicy,
        fetch: Fut,
    ) -> Result<Vec<Product>, FetchError>
    where
        Fut: Future<Output = Result<Vec<Product>, FetchError>>,
    {
        let label = key.to_string();
        match self
            .cached(key, policy, async { fetch.await.map(CatalogValue::Products) })
            .await?
        {
            CatalogValue::Products(products) => Ok(products),
            _ => Err(FetchError::MissingData(label)),
        }
    }

    pub async fn all(&self) -> Result<Vec<Product>, FetchError> {
        self.product_list(keys::all(), QueryPolicy::all_products(), self.api.all())
            .await
    }

    pub async fn featured(&self) -> Result<Vec<Product>, FetchError> {
        self.product_list(keys::featured(), QueryPolicy::featured(), self.api.featured())
            .await
    }

    pub async fn best_sellers(&self) -> Result<Vec<Product>, FetchError> {
        self.product_list(
            keys::best_sellers(),
            QueryPolicy::best_sellers(),
            self.api.best_sellers(),
        )
        .await
    }

    pub async fn new_arrivals(&self) -> Result<Vec<Product>, FetchError> {
        self.product_list(
            keys::new_arrivals(),
            QueryPolicy::featured(),
            self.api.new_arrivals(),
        )
        .await
    }

    pub async fn by_category(&self, category: &str) -> Result<Vec<Product>, FetchError> {
        self.product_list(
            keys::by_category(category),
            QueryPolicy::by_category(),
            self.api.by_category(category),
        )
        .await
    }

    pub async fn related(&self, id: &str) -> Result<Vec<Product>, FetchError> {
        self.product_list(keys::related(id), QueryPolicy::related(), self.api.related(id))
            .await
    }

    pub async fn by_id(&self, id: &str) -> Result<Product, FetchError> {
        let fetch = async {
            self.api
                .by_id(id)
                .await
                .map(|p| CatalogValue::Product(Box::new(p)))
        };
        match self.cached(keys::single(id), QueryPolicy::single(), fetch).await? {
            CatalogValue::Product(product) => Ok(*product),
            _ => Err(FetchError::MissingData(keys::single(id).to_string())),
        }
    }

    pub async fn colors(&self) -> Result<Vec<ProductColor>, FetchError> {
        let fetch = async { self.api.colors().await.map(CatalogValue::Colors) };
        match self.cached(keys::colors(), QueryPolicy::colors(), fetch).await? {
            CatalogValue::Colors(colors) => Ok(colors),
            _ => Err(FetchError::MissingData(keys::colors().to_string())),
        }
    }

    pub async fn categories(&self) -> Result<Vec<String>, FetchError> {
        let fetch = async { self.api.categories().await.map(CatalogValue::Categories) };
        match self
            .cached(keys::categories(), QueryPolicy::categories(), fetch)
            .await?
        {
            CatalogValue::Categories(categories) => Ok(categories),
            _ => Err(FetchError::MissingData(keys::categories().to_string())),
        }
    }

    /// Warm the startup queries concurrently. Failures are logged and
    /// reported, never returned as errors.
    #[instrument(skip(self))]
    pub async fn prefetch(&self, plan: &PrefetchPlan) -> PrefetchReport {
        fn settle<'a, T, Fut>(key: QueryKey, fut: Fut) -> BoxFuture<'a, (QueryKey, Result<(), FetchError>)>
        where
            Fut: Future<Output = Result<T, FetchError>> + Send + 'a,
        {
            async move { (key, fut.await.map(|_| ())) }.boxed()
        }

        let tasks = vec![
            settle(keys::all(), self.all()),
            settle(keys::featured(), self.featured()),
            settle(keys::best_sellers(), self.best_sellers()),
            settle(keys::colors(), self.colors()),
            settle(keys::categories(), self.categories()),
            settle(keys::by_category(&plan.category), self.by_category(&plan.category)),
            settle(keys::related(&plan.related_id), self.related(&plan.related_id)),
        ];

        let mut report = PrefetchReport::default();
        for (key, result) in join_all(tasks).await {
            match result {
                Ok(()) => report.loaded.push(key),
                Err(e) => {
                    warn!(key = %key, error = %e, "prefetch failed");
                    report.failed.push((key, e.to_string()));
                }
            }
        }
        info!(
            loaded = report.loaded.len(),
            failed = report.failed.len(),
            "prefetch settled"
        );
        report
    }

    /// Drop every cached product query.
    pub fn invalidate_products(&self) {
        if let Err(e) = self.cache.invalidate_prefix(&keys::products()) {
            warn!(error = %e, "prefix invalidation failed, clearing cache");
            self.cache.clear();
        }
    }

    pub async fn create(&self, input: &ProductInput) -> Result<Product, FetchError> {
        let product = self.api.create(input).await?;
        self.invalidate_products();
        Ok(product)
    }

    pub async fn update(&self, id: &str, input: &ProductInput) -> Result<Product, FetchError> {
        let product = self.api.update(id, input).await?;
        self.invalidate_products();
        Ok(product)
    }

    pub async fn delete(&self, id: &str) -> Result<(), FetchError> {
        self.api.delete(id).await?;
        self.invalidate_products();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockTransport;
    use crate::wire::fixtures::denim_json;
    use crate::{FetchClient, Method, Response};
    use serde_json::json;
    use std::sync::Arc;

    fn catalog(transport: Arc<MockTransport>) -> CachedCatalog {
        CachedCatalog::new(ProductApi::new(FetchClient::new("http://api.test", transport)))
    }

    fn listing() -> Response {
        Response::json_body(
            200,
            &json!({"data": [denim_json("IRT-DJ-001", "Jeans", 3500.0), denim_json("IRT-DJ-002", "Jeans", 2800.0)]}),
        )
    }

    #[tokio::test]
    async fn test_reads_are_cached() {
        let transport = MockTransport::new();
        transport.route(Method::Get, "/products", listing());
        let catalog = catalog(transport.clone());

        assert_eq!(catalog.all().await.unwrap().len(), 2);
        assert_eq!(catalog.all().await.unwrap().len(), 2);
        assert_eq!(transport.request_count(), 1);

        // A different key is a separate query.
        catalog.featured().await.unwrap();
        assert_eq!(transport.request_count(), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let transport = MockTransport::new();
        let catalog = catalog(transport.clone());

        assert!(catalog.by_id("IRT-DJ-001").await.is_err());

        transport.route(
            Method::Get,
            "/products/IRT-DJ-001",
            Response::json_body(200, &json!({"data": denim_json("IRT-DJ-001", "Jeans", 3500.0)})),
        );
        assert_eq!(catalog.by_id("IRT-DJ-001").await.unwrap().id.as_str(), "IRT-DJ-001");
        assert_eq!(transport.request_count(), 2);
    }

    #[tokio::test]
    async fn test_prefetch_settles_every_query() {
        let transport = MockTransport::new();
        transport.route(Method::Get, "/products", listing());
        // No route for /products/IRT-DJ-001, so the related query fails.
        let catalog = catalog(transport.clone());

        let report = catalog.prefetch(&PrefetchPlan::default()).await;
        assert_eq!(report.loaded.len(), 6);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, keys::related("IRT-DJ-001"));
        assert!(!report.is_complete());

        let before = transport.request_count();
        catalog.all().await.unwrap();
        catalog.colors().await.unwrap();
        catalog.by_category("Jeans").await.unwrap();
        assert_eq!(transport.request_count(), before);
    }

    #[tokio::test]
    async fn test_mutations_invalidate_product_queries() {
        let transport = MockTransport::new();
        transport.route(Method::Get, "/products", listing());
        transport.route(
            Method::Post,
            "/products",
            Response::json_body(201, &json!({"data": denim_json("NEW-1", "Jeans", 1500.0)})),
        );
        let catalog = catalog(transport.clone());

        catalog.all().await.unwrap();
        catalog.categories().await.unwrap();
        let before = transport.request_count();

        let input = ProductInput {
            sku: Some("NEW-1".into()),
            ..Default::default()
        };
        catalog.create(&input).await.unwrap();

        catalog.all().await.unwrap();
        catalog.categories().await.unwrap();
        // One POST plus two refetches.
        assert_eq!(transport.request_count(), before + 3);
    }
}
