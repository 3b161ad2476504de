//! Cart store and line types.

use crate::cart::{CartPricing, LinePricing};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use crate::wishlist::WishlistEntry;
use serde::{Deserialize, Serialize};

/// What the rendering layer hands to [`CartStore::add_item`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub image: Option<String>,
}

impl CartItem {
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, unit_price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Carts are priced at list price.
impl From<&Product> for CartItem {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.title.clone(),
            unit_price: product.price,
            image: product.primary_image().map(str::to_string),
        }
    }
}

impl From<&WishlistEntry> for CartItem {
    fn from(entry: &WishlistEntry) -> Self {
        Self {
            id: entry.id.clone(),
            name: entry.name.clone(),
            unit_price: entry.price,
            image: entry.image.clone(),
        }
    }
}

/// A line in the cart. One per product id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product id.
    pub id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    pub unit_price: Money,
    pub image: Option<String>,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLine {
    fn new(item: CartItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            unit_price: item.unit_price,
            image: item.image,
            quantity: 1,
        }
    }

    /// unit_price * quantity.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        self.unit_price.try_multiply(i64::from(self.quantity))
    }
}

/// A shopping cart.
///
/// Lines keep insertion order. No line ever has a quantity below 1: every
/// path that would take it there removes the line instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartStore {
    lines: Vec<CartLine>,
    currency: Currency,
}

impl CartStore {
    /// Create an empty cart priced in `currency`.
    pub fn new(currency: Currency) -> Self {
        Self {
            lines: Vec::new(),
            currency,
        }
    }

    /// Add one unit of `item`.
    ///
    /// An existing line for the same id gains one unit; otherwise a new line
    /// with quantity 1 is appended. Returns the line's new quantity.
    pub fn add_item(&mut self, item: impl Into<CartItem>) -> Result<u32, CommerceError> {
        let item = item.into();
        if item.unit_price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: item.unit_price.currency.code().to_string(),
            });
        }

        if let Some(existing) = self.lines.iter_mut().find(|l| l.id == item.id) {
            existing.quantity = existing
                .quantity
                .checked_add(1)
                .ok_or(CommerceError::Overflow)?;
            tracing::debug!(product_id = %existing.id, quantity = existing.quantity, "cart line incremented");
            return Ok(existing.quantity);
        }

        tracing::debug!(product_id = %item.id, "cart line added");
        self.lines.push(CartLine::new(item));
        Ok(1)
    }

    /// Add `count` units as `count` sequential single adds.
    pub fn add_quantity(
        &mut self,
        item: impl Into<CartItem>,
        count: u32,
    ) -> Result<u32, CommerceError> {
        let item = item.into();
        let mut quantity = self.get(&item.id).map(|l| l.quantity).unwrap_or(0);
        for _ in 0..count {
            quantity = self.add_item(item.clone())?;
        }
        Ok(quantity)
    }

    /// Remove a line. Returns whether it existed.
    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| &l.id != id);
        let removed = self.lines.len() < len_before;
        if removed {
            tracing::debug!(product_id = %id, "cart line removed");
        }
        removed
    }

    /// Set a line's quantity.
    ///
    /// A quantity below 1 removes the line. There is no upper bound here.
    /// Returns whether a line with `id` existed.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) -> Result<bool, CommerceError> {
        if quantity < 1 {
            return Ok(self.remove_item(id));
        }
        let quantity = u32::try_from(quantity).map_err(|_| CommerceError::Overflow)?;

        match self.lines.iter_mut().find(|l| &l.id == id) {
            Some(line) => {
                line.quantity = quantity;
                tracing::debug!(product_id = %id, quantity, "cart line quantity set");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// The cart page's "+" control.
    pub fn increment(&mut self, id: &ProductId) -> Result<bool, CommerceError> {
        match self.get(id).map(|l| l.quantity) {
            Some(quantity) => self.update_quantity(id, i64::from(quantity) + 1),
            None => Ok(false),
        }
    }

    /// The cart page's "-" control. At quantity 1 the line is removed.
    pub fn decrement(&mut self, id: &ProductId) -> bool {
        match self.get(id).map(|l| l.quantity) {
            Some(quantity) => matches!(self.update_quantity(id, i64::from(quantity) - 1), Ok(true)),
            None => false,
        }
    }

    /// Sum of quantities across lines.
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of unit_price * quantity across lines.
    pub fn total_price(&self) -> Result<Money, CommerceError> {
        self.lines
            .iter()
            .try_fold(Money::zero(self.currency), |acc, line| {
                acc.try_add(&line.subtotal()?)
            })
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn get(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.id == id)
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        tracing::debug!("cart cleared");
    }

    /// Per-line and total pricing for the order summary.
    pub fn pricing(&self) -> Result<CartPricing, CommerceError> {
        let lines = self
            .lines
            .iter()
            .map(|line| {
                Ok(LinePricing {
                    id: line.id.clone(),
                    unit_price: line.unit_price,
                    quantity: line.quantity,
                    subtotal: line.subtotal()?,
                })
            })
            .collect::<Result<Vec<_>, CommerceError>>()?;

        let total_price = Money::try_sum(lines.iter().map(|l| &l.subtotal), self.currency)?;

        Ok(CartPricing {
            lines,
            total_items: self.total_items(),
            total_price,
        })
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new(Currency::USD)
    }
}
