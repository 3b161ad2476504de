//! Cart pricing breakdown.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Pricing breakdown for the cart page's order summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Per-line breakdown, in cart order.
    pub lines: Vec<LinePricing>,
    /// Sum of quantities.
    pub total_items: u64,
    /// Sum of line subtotals.
    pub total_price: Money,
}

impl CartPricing {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line for a product, if it is in the cart.
    pub fn line(&self, id: &ProductId) -> Option<&LinePricing> {
        self.lines.iter().find(|l| &l.id == id)
    }
}

/// Pricing for a single cart line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinePricing {
    pub id: ProductId,
    pub unit_price: Money,
    pub quantity: u32,
    /// unit_price * quantity.
    pub subtotal: Money,
}
