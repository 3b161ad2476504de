//! Catalog filter types.

use crate::catalog::Product;
use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// Restricts a query to one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    /// No restriction.
    #[default]
    All,
    /// Case-insensitive exact match against the category name.
    Name(String),
    /// Equality against the relational category id.
    Id(CategoryId),
}

impl CategoryFilter {
    /// Create a name filter.
    pub fn name(name: impl Into<String>) -> Self {
        CategoryFilter::Name(name.into())
    }

    /// Create an id filter.
    pub fn id(id: impl Into<CategoryId>) -> Self {
        CategoryFilter::Id(id.into())
    }

    /// Parse a name token from the rendering layer. `all` (any case) and the
    /// empty string mean no restriction.
    pub fn from_token(token: &str) -> Self {
        if token.is_empty() || token.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Name(token.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Name(name) => product.category.to_lowercase() == name.to_lowercase(),
            CategoryFilter::Id(id) => product.category_id.as_ref() == Some(id),
        }
    }
}

/// Whether `product` matches a search text. Empty text matches everything.
///
/// The text is not trimmed.
pub fn matches_text(product: &Product, text: &str) -> bool {
    if text.is_empty() {
        return true;
    }
    let needle = text.to_lowercase();
    product.title.to_lowercase().contains(&needle)
        || product.description.to_lowercase().contains(&needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};

    fn lamp() -> Product {
        Product::new("p1", "Brass Lamp", Money::from_major(40, Currency::USD))
            .with_description("Warm light for the study")
            .with_category("Home")
            .with_category_id("cat-home")
    }

    #[test]
    fn test_category_name_is_case_insensitive() {
        assert!(CategoryFilter::name("home").matches(&lamp()));
        assert!(CategoryFilter::name("HOME").matches(&lamp()));
        assert!(!CategoryFilter::name("hom").matches(&lamp()));
    }

    #[test]
    fn test_category_id_equality() {
        assert!(CategoryFilter::id("cat-home").matches(&lamp()));
        assert!(!CategoryFilter::id("home").matches(&lamp()));
        let bare = Product::new("p2", "Pen", Money::zero(Currency::USD));
        assert!(!CategoryFilter::id("cat-home").matches(&bare));
    }

    #[test]
    fn test_category_token() {
        assert_eq!(CategoryFilter::from_token("All"), CategoryFilter::All);
        assert_eq!(CategoryFilter::from_token(""), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from_token("Audio"),
            CategoryFilter::Name("Audio".to_string())
        );
    }

    #[test]
    fn test_text_matches_title_or_description() {
        assert!(matches_text(&lamp(), "brass"));
        assert!(matches_text(&lamp(), "STUDY"));
        assert!(matches_text(&lamp(), ""));
        assert!(!matches_text(&lamp(), "chair"));
        assert!(!matches_text(&lamp(), " brass "));
    }
}
