//! Product catalog module.
//!
//! Contains product and category types, the provider record mapping layer,
//! and the provider contract with its loaders.

mod category;
mod product;
pub mod provider;
pub mod record;

pub use category::{category_menu, Category};
pub use product::{Product, ProductDetail, RelatedProduct, Review};
pub use provider::{
    CatalogLoad, CatalogLoader, CatalogProvider, DetailLoader, DetailState, InMemoryCatalog,
    ProviderPage, ProviderQuery, ProviderResult,
};
pub use record::{ProductDetailRecord, ProductRecord};
