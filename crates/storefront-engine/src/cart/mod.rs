//! Shopping cart module.
//!
//! Contains the cart store, its lines, and the pricing breakdown.

mod store;
mod pricing;

pub use store::{CartItem, CartLine, CartStore};
pub use pricing::{CartPricing, LinePricing};
