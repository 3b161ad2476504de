//! Search module.
//!
//! Contains the catalog query, filters, pagination and the pure query engine.

mod browser;
pub mod engine;
mod filter;
mod query;
mod results;

pub use browser::CatalogBrowser;
pub use engine::query;
pub use filter::{matches_text, CategoryFilter};
pub use query::{CatalogQuery, SortKey};
pub use results::{Pagination, QueryPage};
