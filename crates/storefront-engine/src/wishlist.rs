//! Saved products.
//!
//! Unlike the cart, adding toggles: adding an entry that is already saved
//! removes it.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::Money;

/// A saved product reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WishlistEntry {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    pub image: Option<String>,
    pub description: Option<String>,
    pub rating: Option<f64>,
}

impl WishlistEntry {
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: None,
            description: None,
            rating: None,
        }
    }
}

impl From<&Product> for WishlistEntry {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.title.clone(),
            price: product.price,
            image: product.primary_image().map(str::to_string),
            description: Some(product.description.clone()).filter(|d| !d.is_empty()),
            rating: Some(product.rating_average),
        }
    }
}

/// The saved-products set. No id appears twice.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WishlistStore {
    entries: Vec<WishlistEntry>,
}

impl WishlistStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle membership. Returns true if the entry is now saved.
    pub fn add_item(&mut self, entry: impl Into<WishlistEntry>) -> bool {
        let entry = entry.into();
        if self.remove_item(&entry.id) {
            return false;
        }
        tracing::debug!(product_id = %entry.id, "wishlist entry added");
        self.entries.push(entry);
        true
    }

    /// Remove an entry. Returns whether it was present.
    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        let len_before = self.entries.len();
        self.entries.retain(|e| &e.id != id);
        let removed = self.entries.len() < len_before;
        if removed {
            tracing::debug!(product_id = %id, "wishlist entry removed");
        }
        removed
    }

    pub fn is_in_wishlist(&self, id: &ProductId) -> bool {
        self.entries.iter().any(|e| &e.id == id)
    }

    /// Number of distinct entries.
    pub fn total_items(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[WishlistEntry] {
        &self.entries
    }

    pub fn get(&self, id: &ProductId) -> Option<&WishlistEntry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn entry(id: &str) -> WishlistEntry {
        WishlistEntry::new(id, "Silk Scarf", Money::from_major(120, Currency::USD))
    }

    #[test]
    fn test_add_toggles() {
        let mut wishlist = WishlistStore::new();
        assert!(wishlist.add_item(entry("a")));
        assert!(wishlist.is_in_wishlist(&ProductId::new("a")));
        assert!(!wishlist.add_item(entry("a")));
        assert!(!wishlist.is_in_wishlist(&ProductId::new("a")));
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_membership_parity() {
        for calls in 1..=7 {
            let mut wishlist = WishlistStore::new();
            wishlist.add_item(entry("other"));
            for _ in 0..calls {
                wishlist.add_item(entry("a"));
                let count = wishlist
                    .entries()
                    .iter()
                    .filter(|e| e.id.as_str() == "a")
                    .count();
                assert!(count <= 1);
            }
            assert_eq!(wishlist.is_in_wishlist(&ProductId::new("a")), calls % 2 == 1);
            assert_eq!(wishlist.total_items(), 1 + calls % 2);
        }
    }

    #[test]
    fn test_remove_is_unconditional() {
        let mut wishlist = WishlistStore::new();
        assert!(!wishlist.remove_item(&ProductId::new("a")));
        wishlist.add_item(entry("a"));
        assert!(wishlist.remove_item(&ProductId::new("a")));
        assert_eq!(wishlist.total_items(), 0);
    }

    #[test]
    fn test_entry_from_product() {
        let product = Product::new("p1", "Lamp", Money::from_major(90, Currency::USD))
            .with_rating(4.5)
            .with_image("/lamp.png");
        let entry = WishlistEntry::from(&product);
        assert_eq!(entry.name, "Lamp");
        assert_eq!(entry.image.as_deref(), Some("/lamp.png"));
        assert_eq!(entry.description, None);
        assert_eq!(entry.rating, Some(4.5));
    }
}
