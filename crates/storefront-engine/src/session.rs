//! Per-session commerce state.

use serde::{Deserialize, Serialize};

use crate::cart::{CartItem, CartStore};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::{ProductId, SessionId};
use crate::money::Currency;
use crate::wishlist::WishlistStore;

/// The cart and wishlist of one browsing session.
///
/// Sessions share nothing; the rendering layer owns one per visitor and
/// passes it by reference to whatever needs it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShopSession {
    pub id: SessionId,
    pub cart: CartStore,
    pub wishlist: WishlistStore,
}

impl ShopSession {
    /// Create an empty session under an opaque token.
    pub fn new(id: impl Into<SessionId>) -> Self {
        Self {
            id: id.into(),
            cart: CartStore::new(Currency::USD),
            wishlist: WishlistStore::new(),
        }
    }

    /// Create an empty session with a generated token.
    pub fn anonymous() -> Self {
        Self::new(SessionId::generate())
    }

    /// Add one unit of `product` to the cart.
    pub fn add_to_cart(&mut self, product: &Product) -> Result<u32, CommerceError> {
        self.cart.add_item(product)
    }

    /// Toggle `product` in the wishlist. Returns whether it is now saved.
    pub fn toggle_wishlist(&mut self, product: &Product) -> bool {
        self.wishlist.add_item(product)
    }

    /// Add a saved entry to the cart, leaving it in the wishlist.
    ///
    /// Returns `Ok(None)` when `id` is not saved.
    pub fn move_to_cart(&mut self, id: &ProductId) -> Result<Option<u32>, CommerceError> {
        let item = match self.wishlist.get(id) {
            Some(entry) => CartItem::from(entry),
            None => return Ok(None),
        };
        self.cart.add_item(item).map(Some)
    }
}

impl Default for ShopSession {
    fn default() -> Self {
        Self::anonymous()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn lamp() -> Product {
        Product::new("p1", "Brass Lamp", Money::from_major(90, Currency::USD))
    }

    #[test]
    fn test_sessions_are_isolated() {
        let mut first = ShopSession::new("s-1");
        let second = ShopSession::new("s-2");

        first.add_to_cart(&lamp()).unwrap();
        first.toggle_wishlist(&lamp());

        assert_eq!(first.cart.total_items(), 1);
        assert_eq!(second.cart.total_items(), 0);
        assert!(second.wishlist.is_empty());
    }

    #[test]
    fn test_move_to_cart_keeps_wishlist_entry() {
        let mut session = ShopSession::anonymous();
        assert_eq!(session.move_to_cart(&ProductId::new("p1")).unwrap(), None);

        session.toggle_wishlist(&lamp());
        assert_eq!(session.move_to_cart(&ProductId::new("p1")).unwrap(), Some(1));
        assert_eq!(session.move_to_cart(&ProductId::new("p1")).unwrap(), Some(2));
        assert!(session.wishlist.is_in_wishlist(&ProductId::new("p1")));
    }
}
