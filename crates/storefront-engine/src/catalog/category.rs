//! Category types for product organization.

use serde::{Deserialize, Serialize};

use crate::ids::CategoryId;

/// A product category as offered in the catalog's filter bar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// The pseudo-category that disables category filtering.
    pub fn all() -> Self {
        Self::new("all", "All Products")
    }

    /// Check if this is the "all" pseudo-category.
    pub fn is_all(&self) -> bool {
        self.id.as_str().eq_ignore_ascii_case("all")
    }
}

/// Build the filter-bar list: "All Products" first, then `categories` in
/// the given order with duplicates by id dropped.
pub fn category_menu(categories: impl IntoIterator<Item = Category>) -> Vec<Category> {
    let mut menu = vec![Category::all()];
    for category in categories {
        if !menu.iter().any(|c| c.id == category.id) {
            menu.push(category);
        }
    }
    menu
}
