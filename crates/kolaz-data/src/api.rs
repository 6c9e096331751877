//! Typed access to the product endpoints.

use crate::mapper::{to_product, to_products};
use crate::wire::{DenimProduct, ProductInput};
use crate::{FetchClient, FetchError, ProductQuery};
use kolaz_commerce::catalog::{self, FeatureFlag, Product, ProductColor};
use kolaz_commerce::Currency;
use tracing::{info, instrument};

/// Products shown in the homepage featured strip.
pub const FEATURED_LIMIT: u32 = 8;
/// Products shown in the best seller grid.
pub const BEST_SELLER_LIMIT: u32 = 12;
/// Products shown in the new arrivals strip.
pub const NEW_ARRIVAL_LIMIT: u32 = 8;

const PRODUCTS_PATH: &str = "/products";

/// `/products/{id}` with the id encoded as one path segment.
fn product_path(id: &str) -> String {
    format!("{}/{}", PRODUCTS_PATH, urlencoding::encode(id))
}

/// Product API client. Every read returns storefront [`Product`]s.
#[derive(Debug, Clone)]
pub struct ProductApi {
    client: FetchClient,
    currency: Currency,
}

impl ProductApi {
    pub fn new(client: FetchClient) -> Self {
        Self {
            client,
            currency: Currency::default(),
        }
    }

    /// Currency assumed for records whose pricing carries no known code.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn client(&self) -> &FetchClient {
        &self.client
    }

    /// Raw backend records for a listing query.
    #[instrument(skip(self))]
    pub async fn records(&self, query: &ProductQuery) -> Result<Vec<DenimProduct>, FetchError> {
        self.client
            .get(PRODUCTS_PATH)
            .query(query.to_params())
            .send()
            .await?
            .error_for_status()?
            .data()
    }

    pub async fn list(&self, query: &ProductQuery) -> Result<Vec<Product>, FetchError> {
        let records = self.records(query).await?;
        Ok(to_products(&records, self.currency))
    }

    pub async fn all(&self) -> Result<Vec<Product>, FetchError> {
        self.list(&ProductQuery::all()).await
    }

    pub async fn featured(&self) -> Result<Vec<Product>, FetchError> {
        self.list(&ProductQuery::new().flag(FeatureFlag::Featured).limit(FEATURED_LIMIT))
            .await
    }

    pub async fn best_sellers(&self) -> Result<Vec<Product>, FetchError> {
        self.list(
            &ProductQuery::new()
                .flag(FeatureFlag::BestSeller)
                .limit(BEST_SELLER_LIMIT),
        )
        .await
    }

    pub async fn new_arrivals(&self) -> Result<Vec<Product>, FetchError> {
        self.list(
            &ProductQuery::new()
                .flag(FeatureFlag::NewArrival)
                .limit(NEW_ARRIVAL_LIMIT),
        )
        .await
    }

    /// Every product in a main category.
    pub async fn by_category(&self, category: &str) -> Result<Vec<Product>, FetchError> {
        self.list(&ProductQuery::all().category(category)).await
    }

    #[instrument(skip(self))]
    pub async fn by_id(&self, id: &str) -> Result<Product, FetchError> {
        let record: DenimProduct = self
            .client
            .get(product_path(id))
            .send()
            .await?
            .error_for_status()?
            .data()?;
        Ok(to_product(&record, self.currency))
    }

    /// Distinct colors across the catalog, by name.
    pub async fn colors(&self) -> Result<Vec<ProductColor>, FetchError> {
        let products = self.list(&ProductQuery::all().fields(["color"])).await?;
        Ok(catalog::distinct_colors(&products))
    }

    /// Distinct main categories across the catalog.
    pub async fn categories(&self) -> Result<Vec<String>, FetchError> {
        let products = self.list(&ProductQuery::all().fields(["category"])).await?;
        Ok(catalog::distinct_categories(&products))
    }

    /// Products sharing the category of `id`, excluding it.
    #[instrument(skip(self))]
    pub async fn related(&self, id: &str) -> Result<Vec<Product>, FetchError> {
        let product = self.by_id(id).await?;
        let siblings = self.by_category(&product.category).await?;
        Ok(catalog::related_products(
            &product,
            &siblings,
            catalog::RELATED_PRODUCTS_LIMIT,
        ))
    }

    #[instrument(skip_all)]
    pub async fn create(&self, input: &ProductInput) -> Result<Product, FetchError> {
        let record: DenimProduct = self
            .client
            .post(PRODUCTS_PATH)
            .json(input)?
            .send()
            .await?
            .error_for_status()?
            .data()?;
        info!(sku = %record.sku, "product created");
        Ok(to_product(&record, self.currency))
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: &str, input: &ProductInput) -> Result<Product, FetchError> {
        let record: DenimProduct = self
            .client
            .patch(product_path(id))
            .json(input)?
            .send()
            .await?
            .error_for_status()?
            .data()?;
        info!("product updated");
        Ok(to_product(&record, self.currency))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), FetchError> {
        self.client
            .delete(product_path(id))
            .send()
            .await?
            .error_for_status()?;
        info!("product deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockTransport;
    use crate::wire::fixtures::denim_json;
    use crate::{Method, Response};
    use serde_json::json;
    use std::sync::Arc;

    fn api(transport: Arc<MockTransport>) -> ProductApi {
        ProductApi::new(FetchClient::new("http://api.test/api/v1", transport))
    }

    #[tokio::test]
    async fn test_listing_queries() {
        let transport = MockTransport::new();
        let listing = Response::json_body(
            200,
            &json!({"data": [denim_json("A", "Jeans", 2000.0), denim_json("B", "Jackets", 4000.0)]}),
        );
        transport.route(Method::Get, "/api/v1/products", listing);
        let api = api(transport.clone());

        assert_eq!(api.all().await.unwrap().len(), 2);
        assert_eq!(transport.last_request().unwrap().query_param("limit"), Some("0"));

        api.featured().await.unwrap();
        let req = transport.last_request().unwrap();
        assert_eq!(req.query_param("isFeatured"), Some("true"));
        assert_eq!(req.query_param("limit"), Some("8"));

        api.best_sellers().await.unwrap();
        let req = transport.last_request().unwrap();
        assert_eq!(req.query_param("isBestSeller"), Some("true"));
        assert_eq!(req.query_param("limit"), Some("12"));

        api.by_category("Jeans").await.unwrap();
        assert_eq!(transport.last_request().unwrap().query_param("category"), Some("Jeans"));
    }

    #[tokio::test]
    async fn test_colors_and_categories_are_distinct() {
        let transport = MockTransport::new();
        transport.route(
            Method::Get,
            "/api/v1/products",
            Response::json_body(
                200,
                &json!({"data": [
                    {"color": [{"name": "Indigo", "hex": "#191970"}], "category": {"main": "Jeans"}},
                    {"color": [{"name": "Indigo", "hex": "#111111"}, {"name": "Black", "hex": "#000"}], "category": {"main": "Jeans"}},
                    {"color": [], "category": {"main": "Jackets"}}
                ]}),
            ),
        );
        let api = api(transport.clone());

        let colors = api.colors().await.unwrap();
        assert_eq!(colors, vec![
            ProductColor::new("Indigo", "#191970"),
            ProductColor::new("Black", "#000"),
        ]);
        assert_eq!(transport.last_request().unwrap().query_param("fields"), Some("color"));

        assert_eq!(api.categories().await.unwrap(), vec!["Jeans", "Jackets"]);
    }

    #[tokio::test]
    async fn test_by_id_and_related() {
        let transport = MockTransport::new();
        transport.route(
            Method::Get,
            "/api/v1/products/IRT-DJ-001",
            Response::json_body(200, &json!({"data": denim_json("IRT-DJ-001", "Jeans", 3500.0)})),
        );
        transport.route(
            Method::Get,
            "/api/v1/products",
            Response::json_body(200, &json!({"data": [
                denim_json("IRT-DJ-001", "Jeans", 3500.0),
                denim_json("IRT-DJ-002", "Jeans", 3000.0),
            ]})),
        );
        let api = api(transport);

        let product = api.by_id("IRT-DJ-001").await.unwrap();
        assert_eq!(product.name, "IRT-DJ-001 Selvedge Jeans");

        let related = api.related("IRT-DJ-001").await.unwrap();
        let ids: Vec<_> = related.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["IRT-DJ-002"]);
    }

    #[test]
    fn test_product_path_encodes_id() {
        assert_eq!(product_path("IRT-DJ-001"), "/products/IRT-DJ-001");
        assert_eq!(product_path("a/b?c"), "/products/a%2Fb%3Fc");
        assert_eq!(product_path("jeans #2"), "/products/jeans%20%232");
    }

    #[tokio::test]
    async fn test_id_with_reserved_characters_stays_one_segment() {
        let transport = MockTransport::new();
        transport.route(
            Method::Delete,
            "/api/v1/products/a%2Fb%3Fc",
            Response::json_body(200, &json!({"data": null})),
        );
        api(transport.clone()).delete("a/b?c").await.unwrap();

        let req = transport.last_request().unwrap();
        assert_eq!(req.url, "http://api.test/api/v1/products/a%2Fb%3Fc");
        assert_eq!(req.query_param("c"), None);
    }

    #[tokio::test]
    async fn test_not_found_surfaces_http_error() {
        let transport = MockTransport::new();
        transport.route(
            Method::Get,
            "/api/v1/products/NOPE",
            Response::json_body(404, &json!({"message": "Product not found"})),
        );
        let err = api(transport).by_id("NOPE").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_admin_mutations() {
        let transport = MockTransport::new();
        let created = Response::json_body(201, &json!({"data": denim_json("NEW-1", "Jeans", 2500.0)}));
        transport.route(Method::Post, "/api/v1/products", created.clone());
        transport.route(Method::Patch, "/api/v1/products/NEW-1", created);
        transport.route(Method::Delete, "/api/v1/products/NEW-1", Response::json_body(200, &json!({"data": null})));
        let api = api(transport.clone());

        let input = ProductInput {
            sku: Some("NEW-1".into()),
            name: Some("New Jeans".into()),
            ..Default::default()
        };
        assert_eq!(api.create(&input).await.unwrap().id.as_str(), "NEW-1");
        let body = transport.last_request().unwrap().body.unwrap();
        assert_eq!(
            serde_json::from_slice::<serde_json::Value>(&body).unwrap(),
            json!({"sku": "NEW-1", "name": "New Jeans"})
        );

        let patch = ProductInput {
            stock: Some(0),
            ..Default::default()
        };
        api.update("NEW-1", &patch).await.unwrap();
        assert_eq!(transport.last_request().unwrap().method, Method::Patch);

        api.delete("NEW-1").await.unwrap();
        assert_eq!(transport.last_request().unwrap().method, Method::Delete);
    }
}
