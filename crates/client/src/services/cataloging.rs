//! Cataloging service: products.

use std::sync::Arc;

use async_trait::async_trait;
use boutique_core::{
    CatalogingError, CreateProductRequest, Product, ProductId, ProductList, ProductListParams,
    UpdateProductRequest,
};
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use url::Url;

use super::collection::Collection;
use super::fixtures;
use crate::http::{ApiRequest, RestClient};
use crate::latency::Latency;

/// Product catalog operations.
#[async_trait]
pub trait CatalogingService: Send + Sync + std::fmt::Debug {
    /// List products, optionally filtered by name.
    async fn list_products(&self, params: &ProductListParams)
    -> Result<ProductList, CatalogingError>;

    /// Fetch one product.
    async fn get_product(&self, id: &ProductId) -> Result<Product, CatalogingError>;

    /// Add a product to the catalog.
    async fn create_product(
        &self,
        request: &CreateProductRequest,
    ) -> Result<Product, CatalogingError>;

    /// Change some fields of a product.
    async fn update_product(
        &self,
        id: &ProductId,
        request: &UpdateProductRequest,
    ) -> Result<Product, CatalogingError>;
}

fn not_found(id: &ProductId) -> CatalogingError {
    CatalogingError::not_found(format!("Product with ID {id} not found"))
}

// =============================================================================
// Remote
// =============================================================================

/// Cataloging backend over HTTP.
#[derive(Debug, Clone)]
pub struct RemoteCatalogingService {
    client: RestClient<CatalogingError>,
}

impl RemoteCatalogingService {
    /// Client for the cataloging API at `base_url`.
    #[must_use]
    pub const fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            client: RestClient::new(http, base_url),
        }
    }
}

#[async_trait]
impl CatalogingService for RemoteCatalogingService {
    #[instrument(skip(self))]
    async fn list_products(
        &self,
        params: &ProductListParams,
    ) -> Result<ProductList, CatalogingError> {
        let request = ApiRequest::get("fetch products", &["products"])
            .query("name", params.name.as_deref());
        let products: Vec<Product> = self.client.send(request).await?.list("products")?;
        Ok(ProductList::from(products))
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn get_product(&self, id: &ProductId) -> Result<Product, CatalogingError> {
        let request = ApiRequest::get("fetch product", &["products", id.as_str()])
            .on_not_found(format!("Product with ID {id} not found"));
        self.client.send(request).await?.item("product")
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    async fn create_product(
        &self,
        request: &CreateProductRequest,
    ) -> Result<Product, CatalogingError> {
        let request = ApiRequest::post("create product", &["products"]).json(request);
        self.client.send(request).await?.item("product")
    }

    #[instrument(skip(self, request), fields(product_id = %id))]
    async fn update_product(
        &self,
        id: &ProductId,
        request: &UpdateProductRequest,
    ) -> Result<Product, CatalogingError> {
        let request = ApiRequest::put("update product", &["products", id.as_str()])
            .json(request)
            .on_not_found(format!("Product with ID {id} not found"));
        self.client.send(request).await?.item("product")
    }
}

// =============================================================================
// In-memory
// =============================================================================

/// Cataloging backed by fixture products. Clones share state.
#[derive(Debug, Clone)]
pub struct InMemoryCatalogingService {
    products: Arc<RwLock<Collection<Product>>>,
    latency: Latency,
}

impl InMemoryCatalogingService {
    /// Seeded with the fixture catalog.
    #[must_use]
    pub fn new(latency: Latency) -> Self {
        Self::with_products(fixtures::products(), latency)
    }

    /// Seeded with `products`.
    #[must_use]
    pub fn with_products(products: Vec<Product>, latency: Latency) -> Self {
        Self {
            products: Arc::new(RwLock::new(Collection::seeded(products))),
            latency,
        }
    }
}

impl Default for InMemoryCatalogingService {
    fn default() -> Self {
        Self::new(Latency::default())
    }
}

#[async_trait]
impl CatalogingService for InMemoryCatalogingService {
    async fn list_products(
        &self,
        params: &ProductListParams,
    ) -> Result<ProductList, CatalogingError> {
        self.latency.wait(300).await;

        let products = self.products.read().await;
        let term = params
            .name
            .as_deref()
            .map(|name| name.trim().to_lowercase())
            .filter(|term| !term.is_empty());

        let matches = match term {
            Some(term) => products.filter(|p| p.name.to_lowercase().contains(&term)),
            None => products.records().to_vec(),
        };
        Ok(ProductList::from(matches))
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, CatalogingError> {
        self.latency.wait(200).await;

        self.products
            .read()
            .await
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn create_product(
        &self,
        request: &CreateProductRequest,
    ) -> Result<Product, CatalogingError> {
        self.latency.wait(400).await;

        let mut products = self.products.write().await;
        let now = Utc::now();
        let product = Product {
            id: ProductId::new(products.next_id().to_string()),
            name: request.name.clone(),
            description: request.description.clone(),
            price: request.price,
            image_url: request.image_url.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        };
        debug!(product_id = %product.id, "Created mock product");
        Ok(products.insert(product))
    }

    async fn update_product(
        &self,
        id: &ProductId,
        request: &UpdateProductRequest,
    ) -> Result<Product, CatalogingError> {
        self.latency.wait(300).await;

        let mut products = self.products.write().await;
        let product = products.find_mut(|p| &p.id == id).ok_or_else(|| not_found(id))?;
        request.apply_to(product);
        product.updated_at = Some(Utc::now());
        debug!(product_id = %id, "Updated mock product");
        Ok(product.clone())
    }
}
