//! Browsing state behind the product grid.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::config::CatalogConfig;
use crate::search::{engine, CatalogQuery, CategoryFilter, QueryPage, SortKey};

/// Current search, category, sort and page of a catalog view.
///
/// Changing the search text, category or sort returns to page 1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogBrowser {
    query: CatalogQuery,
}

impl CatalogBrowser {
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            query: CatalogQuery::new(config.page_size),
        }
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.query.search_text = text.into();
        self.query.page = 1;
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.query.category = category;
        self.query.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.query.sort = sort;
        self.query.page = 1;
    }

    /// Jump to a page. Pages below 1 become 1.
    pub fn set_page(&mut self, page: usize) {
        self.query.page = page.max(1);
    }

    pub fn next_page(&mut self) {
        self.query.page = self.query.page.saturating_add(1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.query.page.saturating_sub(1));
    }

    pub fn page(&self) -> usize {
        self.query.page
    }

    /// The query for the current state.
    pub fn current_query(&self) -> CatalogQuery {
        self.query.clone()
    }

    /// Run the current query over a locally held collection.
    pub fn view(&self, products: &[Product]) -> QueryPage<Product> {
        engine::query(products, &self.query)
    }
}

impl Default for CatalogBrowser {
    fn default() -> Self {
        Self::new(&CatalogConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_changes_reset_page() {
        let mut browser = CatalogBrowser::default();
        browser.set_page(3);
        browser.set_search("lamp");
        assert_eq!(browser.page(), 1);

        browser.set_page(2);
        browser.set_category(CategoryFilter::name("Home"));
        assert_eq!(browser.page(), 1);

        browser.set_page(4);
        browser.set_sort(SortKey::Rating);
        assert_eq!(browser.page(), 1);

        let query = browser.current_query();
        assert_eq!(query.search_text, "lamp");
        assert_eq!(query.sort, SortKey::Rating);
        assert_eq!(query.page_size, 8);
    }

    #[test]
    fn test_set_page_clamps() {
        let mut browser = CatalogBrowser::default();
        browser.set_page(0);
        assert_eq!(browser.page(), 1);
        browser.prev_page();
        assert_eq!(browser.page(), 1);
        browser.next_page();
        assert_eq!(browser.page(), 2);
    }
}
