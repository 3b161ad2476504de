//! Catalog query builder.

use crate::search::CategoryFilter;
use serde::{Deserialize, Serialize};

/// Sort options for catalog results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Featured products first, otherwise collection order.
    #[default]
    Featured,
    /// Sort by effective price, low to high.
    PriceLow,
    /// Sort by effective price, high to low.
    PriceHigh,
    /// Sort by highest rated.
    Rating,
}

impl SortKey {
    /// Wire token used by the rendering layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Featured => "featured",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Rating => "rating",
        }
    }

    /// Parse a wire token. Unknown tokens fall back to [`SortKey::Featured`].
    pub fn from_token(token: &str) -> Self {
        match token {
            "price-low" => SortKey::PriceLow,
            "price-high" => SortKey::PriceHigh,
            "rating" => SortKey::Rating,
            _ => SortKey::Featured,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::Featured => "Featured",
            SortKey::PriceLow => "Price: Low to High",
            SortKey::PriceHigh => "Price: High to Low",
            SortKey::Rating => "Highest Rated",
        }
    }
}

/// A catalog query. Rebuilt from browsing state on every render.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogQuery {
    /// Case-insensitive substring matched against title and description.
    pub search_text: String,
    /// Category restriction.
    pub category: CategoryFilter,
    /// Sort option.
    pub sort: SortKey,
    /// Current page (1-indexed).
    pub page: usize,
    /// Items per page.
    pub page_size: usize,
}

impl CatalogQuery {
    /// Create a query for the first page with no filters.
    pub fn new(page_size: usize) -> Self {
        Self {
            search_text: String::new(),
            category: CategoryFilter::All,
            sort: SortKey::Featured,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Set the search text.
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    /// Set the category filter.
    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Set the page; pages below 1 become 1.
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    /// Index of the first item on the current page.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self::new(8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_builder() {
        let query = CatalogQuery::new(8)
            .with_search("lamp")
            .with_category(CategoryFilter::name("Home"))
            .with_sort(SortKey::PriceLow)
            .with_page(3);

        assert_eq!(query.page, 3);
        assert_eq!(query.offset(), 16);
        assert_eq!(query.sort, SortKey::PriceLow);
        assert_eq!(query.search_text, "lamp");
    }

    #[test]
    fn test_page_floor() {
        let query = CatalogQuery::new(0).with_page(0);
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 1);
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn test_sort_tokens() {
        for key in [
            SortKey::Featured,
            SortKey::PriceLow,
            SortKey::PriceHigh,
            SortKey::Rating,
        ] {
            assert_eq!(SortKey::from_token(key.as_str()), key);
        }
        assert_eq!(SortKey::from_token("newest"), SortKey::Featured);
    }

    #[test]
    fn test_sort_serde_matches_tokens() {
        let json = serde_json::to_string(&SortKey::PriceHigh).unwrap();
        assert_eq!(json, "\"price-high\"");
    }
}
