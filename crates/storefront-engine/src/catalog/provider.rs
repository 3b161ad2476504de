//! Catalog provider contract and the loaders that consume it.
//!
//! The provider is an external collaborator. Loaders turn its failures into
//! state the rendering layer can show (an empty grid with an error, a
//! not-found detail view) instead of propagating them.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::catalog::record::{ProductDetailRecord, ProductRecord};
use crate::catalog::{Product, ProductDetail};
use crate::config::CatalogConfig;
use crate::error::CommerceError;
use crate::guard::LoadSlot;
use crate::ids::ProductId;
use crate::search::{self, CatalogQuery, CategoryFilter, Pagination, SortKey};

/// Result type for provider calls.
pub type ProviderResult<T> = Result<T, CommerceError>;

/// Listing request sent to a provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderQuery {
    /// Page to fetch (1-indexed).
    pub page: usize,
    /// Page size.
    pub limit: usize,
    /// Search text; empty for none.
    pub search: String,
    pub category: CategoryFilter,
    pub sort: SortKey,
}

impl From<&CatalogQuery> for ProviderQuery {
    fn from(query: &CatalogQuery) -> Self {
        Self {
            page: query.page,
            limit: query.page_size,
            search: query.search_text.clone(),
            category: query.category.clone(),
            sort: query.sort,
        }
    }
}

impl From<&ProviderQuery> for CatalogQuery {
    fn from(query: &ProviderQuery) -> Self {
        CatalogQuery::new(query.limit)
            .with_search(query.search.clone())
            .with_category(query.category.clone())
            .with_sort(query.sort)
            .with_page(query.page)
    }
}

/// One page of provider records plus the unpaginated match count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderPage {
    pub products: Vec<ProductRecord>,
    pub total: usize,
}

/// Source of catalog data.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// List one page of products matching the query.
    async fn list_products(&self, query: &ProviderQuery) -> ProviderResult<ProviderPage>;

    /// Fetch a product with its detail relations. `Ok(None)` when absent.
    async fn get_product(&self, id: &ProductId) -> ProviderResult<Option<ProductDetailRecord>>;
}

#[async_trait]
impl<P: CatalogProvider + ?Sized> CatalogProvider for std::sync::Arc<P> {
    async fn list_products(&self, query: &ProviderQuery) -> ProviderResult<ProviderPage> {
        (**self).list_products(query).await
    }

    async fn get_product(&self, id: &ProductId) -> ProviderResult<Option<ProductDetailRecord>> {
        (**self).get_product(id).await
    }
}

/// A provider over records held in memory, filtered and paginated with the
/// same engine the storefront uses locally.
#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
    records: HashMap<ProductId, ProductDetailRecord>,
}

impl InMemoryCatalog {
    /// Build the catalog. Every record must map cleanly.
    pub fn new(
        records: Vec<ProductDetailRecord>,
        config: &CatalogConfig,
    ) -> Result<Self, CommerceError> {
        let mut products = Vec::with_capacity(records.len());
        let mut by_id = HashMap::with_capacity(records.len());
        for record in records {
            let product = record.product.to_product(config)?;
            if by_id.contains_key(&product.id) {
                return Err(CommerceError::Provider(format!(
                    "duplicate product id: {}",
                    product.id
                )));
            }
            by_id.insert(product.id.clone(), record);
            products.push(product);
        }
        Ok(Self {
            products,
            records: by_id,
        })
    }

    /// Build from listing records with no detail relations.
    pub fn from_products(
        records: Vec<ProductRecord>,
        config: &CatalogConfig,
    ) -> Result<Self, CommerceError> {
        Self::new(records.into_iter().map(Into::into).collect(), config)
    }

    /// Parse a JSON array of detail records.
    pub fn from_json(json: &str, config: &CatalogConfig) -> Result<Self, CommerceError> {
        let records: Vec<ProductDetailRecord> = serde_json::from_str(json)?;
        Self::new(records, config)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[async_trait]
impl CatalogProvider for InMemoryCatalog {
    async fn list_products(&self, query: &ProviderQuery) -> ProviderResult<ProviderPage> {
        let page = search::query(&self.products, &CatalogQuery::from(query));
        let products = page
            .items
            .iter()
            .filter_map(|p| self.records.get(&p.id))
            .map(|r| r.product.clone())
            .collect();
        Ok(ProviderPage {
            products,
            total: page.pagination.total,
        })
    }

    async fn get_product(&self, id: &ProductId) -> ProviderResult<Option<ProductDetailRecord>> {
        Ok(self.records.get(id).cloned())
    }
}

/// Outcome of a catalog listing load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogLoad {
    pub products: Vec<Product>,
    pub total: usize,
    pub total_pages: usize,
    /// Set when the load failed; `products` is then empty.
    pub error: Option<String>,
}

impl CatalogLoad {
    fn failed(error: &CommerceError) -> Self {
        Self {
            products: Vec::new(),
            total: 0,
            total_pages: 0,
            error: Some(error.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Loads product grid pages from a provider.
pub struct CatalogLoader<P> {
    provider: P,
    config: CatalogConfig,
}

impl<P: CatalogProvider> CatalogLoader<P> {
    pub fn new(provider: P, config: CatalogConfig) -> Self {
        Self { provider, config }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Load the page `query` asks for. Never fails: provider or mapping
    /// errors produce an empty load carrying the error.
    pub async fn load(&self, query: &CatalogQuery) -> CatalogLoad {
        match self.try_load(query).await {
            Ok(load) => load,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    page = query.page,
                    search = %query.search_text,
                    "catalog load failed"
                );
                CatalogLoad::failed(&e)
            }
        }
    }

    async fn try_load(&self, query: &CatalogQuery) -> Result<CatalogLoad, CommerceError> {
        let page = self
            .provider
            .list_products(&ProviderQuery::from(query))
            .await?;
        let products = page
            .products
            .iter()
            .map(|r| r.to_product(&self.config))
            .collect::<Result<Vec<_>, _>>()?;
        let pagination = Pagination::new(query.page, query.page_size, page.total);

        Ok(CatalogLoad {
            products,
            total: page.total,
            total_pages: pagination.total_pages,
            error: None,
        })
    }
}

/// State of a product detail view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum DetailState {
    Loaded(Box<ProductDetail>),
    NotFound(ProductId),
    Failed(String),
}

impl DetailState {
    pub fn detail(&self) -> Option<&ProductDetail> {
        match self {
            DetailState::Loaded(detail) => Some(detail.as_ref()),
            _ => None,
        }
    }
}

/// Loads product detail views.
pub struct DetailLoader<P> {
    provider: P,
    config: CatalogConfig,
}

impl<P: CatalogProvider> DetailLoader<P> {
    pub fn new(provider: P, config: CatalogConfig) -> Self {
        Self { provider, config }
    }

    /// Fetch and map one product's detail.
    pub async fn fetch(&self, id: &ProductId) -> DetailState {
        let record = match self.provider.get_product(id).await {
            Ok(Some(record)) => record,
            Ok(None) => return DetailState::NotFound(id.clone()),
            Err(e) => {
                tracing::warn!(product_id = %id, error = %e, "product detail load failed");
                return DetailState::Failed(e.to_string());
            }
        };
        match record.to_detail(&self.config) {
            Ok(detail) => DetailState::Loaded(Box::new(detail)),
            Err(e) => {
                tracing::warn!(product_id = %id, error = %e, "product detail rejected");
                DetailState::Failed(e.to_string())
            }
        }
    }

    /// Open a detail view into `slot`, superseding any load already in
    /// flight for it. Returns whether the result was applied.
    pub async fn open(&self, id: &ProductId, slot: &mut LoadSlot<DetailState>) -> bool {
        let ticket = slot.begin();
        let state = self.fetch(id).await;
        slot.complete(&ticket, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};
    use std::sync::Arc;

    fn records() -> Vec<ProductDetailRecord> {
        serde_json::from_value(serde_json::json!([
            { "id": "p1", "title": "Oak Table", "price": "400", "category": { "id": "c-home", "name": "Home" } },
            { "id": "p2", "title": "Silk Scarf", "price": "120", "featured": true },
            { "id": "p3", "title": "Brass Lamp", "price": "90.50", "category": { "id": "c-home", "name": "Home" },
              "reviews": [ { "id": "r1", "rating": 5, "comment": "Lovely glow", "createdAt": "2025-01-02T00:00:00Z" } ] }
        ]))
        .unwrap()
    }

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new(records(), &CatalogConfig::default()).unwrap()
    }

    struct FailingProvider;

    #[async_trait]
    impl CatalogProvider for FailingProvider {
        async fn list_products(&self, _query: &ProviderQuery) -> ProviderResult<ProviderPage> {
            Err(CommerceError::Provider("connection refused".to_string()))
        }

        async fn get_product(&self, _id: &ProductId) -> ProviderResult<Option<ProductDetailRecord>> {
            Err(CommerceError::Provider("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_in_memory_listing_paginates() {
        let catalog = catalog();
        let query = ProviderQuery::from(&CatalogQuery::new(2));
        let page = catalog.list_products(&query).await.unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.products.len(), 2);
        assert_eq!(page.products[0].id, "p2");
    }

    #[tokio::test]
    async fn test_loader_maps_records() {
        let loader = CatalogLoader::new(catalog(), CatalogConfig::default());
        let query = CatalogQuery::new(8).with_category(CategoryFilter::name("home"));
        let load = loader.load(&query).await;

        assert!(!load.is_error());
        assert_eq!(load.total, 2);
        assert_eq!(load.total_pages, 1);
        assert_eq!(load.products[1].price, Money::new(9050, Currency::USD));
    }

    #[tokio::test]
    async fn test_loader_recovers_from_provider_failure() {
        let loader = CatalogLoader::new(FailingProvider, CatalogConfig::default());
        let load = loader.load(&CatalogQuery::default()).await;
        assert!(load.is_error());
        assert!(load.products.is_empty());
        assert_eq!(load.total_pages, 0);
        assert!(load.error.unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_detail_states() {
        let loader = DetailLoader::new(Arc::new(catalog()), CatalogConfig::default());

        let state = loader.fetch(&ProductId::new("p3")).await;
        let detail = state.detail().unwrap();
        assert_eq!(detail.reviews[0].title, "Lovely glow");
        assert_eq!(detail.reviews[0].user_name, "Anonymous User");

        let missing = loader.fetch(&ProductId::new("nope")).await;
        assert_eq!(missing, DetailState::NotFound(ProductId::new("nope")));

        let failing = DetailLoader::new(FailingProvider, CatalogConfig::default());
        assert!(matches!(
            failing.fetch(&ProductId::new("p1")).await,
            DetailState::Failed(_)
        ));
    }

    #[tokio::test]
    async fn test_open_applies_to_slot() {
        let loader = DetailLoader::new(catalog(), CatalogConfig::default());
        let mut slot = LoadSlot::new();
        assert!(loader.open(&ProductId::new("p1"), &mut slot).await);
        assert_eq!(slot.get().and_then(|s| s.detail()).unwrap().product.title, "Oak Table");
    }

    #[tokio::test]
    async fn test_superseded_detail_is_dropped() {
        let loader = DetailLoader::new(catalog(), CatalogConfig::default());
        let mut slot = LoadSlot::new();

        let stale = slot.begin();
        let stale_state = loader.fetch(&ProductId::new("p1")).await;
        assert!(loader.open(&ProductId::new("p2"), &mut slot).await);
        assert!(!slot.complete(&stale, stale_state));

        let shown = slot.get().and_then(|s| s.detail()).unwrap();
        assert_eq!(shown.product.id.as_str(), "p2");
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut dup = records();
        dup.push(dup[0].clone());
        let result = InMemoryCatalog::new(dup, &CatalogConfig::default());
        assert!(matches!(result, Err(CommerceError::Provider(_))));
    }
}
