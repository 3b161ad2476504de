//! The order being built by the checkout wizard.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::record::CATALOG_CURRENCY;
use crate::catalog::Product;
use crate::checkout::{AddOn, AddOnId};
use crate::error::CommerceError;
use crate::money::{format_price, Currency, DigitGrouping, Money};

/// A single product, its quantity and the chosen add-ons, priced in one
/// currency. Lives only for the duration of a checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub product: Product,
    /// Effective product price in `currency`.
    pub unit_price: Money,
    pub quantity: u32,
    /// In the order they were selected.
    pub selected_add_ons: Vec<AddOn>,
    pub currency: Currency,
}

impl Order {
    /// Start an order for one unit of `product`.
    ///
    /// Catalog prices are USD; an INR order converts the effective price at
    /// `inr_per_usd`. Products priced in any other currency are rejected.
    pub fn new(product: Product, currency: Currency, inr_per_usd: Decimal) -> Result<Self, CommerceError> {
        let price_currency = product.effective_price().currency;
        if price_currency != CATALOG_CURRENCY {
            return Err(CommerceError::CurrencyMismatch {
                expected: CATALOG_CURRENCY.code().to_string(),
                got: price_currency.code().to_string(),
            });
        }
        let unit_price = product.effective_price().convert(currency, inr_per_usd)?;
        Ok(Self {
            product,
            unit_price,
            quantity: 1,
            selected_add_ons: Vec::new(),
            currency,
        })
    }

    pub fn is_selected(&self, id: AddOnId) -> bool {
        self.selected_add_ons.iter().any(|a| a.id == id)
    }

    /// Select `add_on`, or deselect it if already selected. Returns whether
    /// it is selected afterwards.
    pub(crate) fn toggle(&mut self, add_on: &AddOn) -> bool {
        if self.is_selected(add_on.id) {
            self.selected_add_ons.retain(|a| a.id != add_on.id);
            false
        } else {
            self.selected_add_ons.push(add_on.clone());
            true
        }
    }

    /// unit_price * quantity.
    pub fn line_subtotal(&self) -> Result<Money, CommerceError> {
        self.unit_price.try_multiply(i64::from(self.quantity))
    }

    /// Sum of selected add-on prices. Add-ons are charged once, whatever
    /// the quantity.
    pub fn add_ons_total(&self) -> Result<Money, CommerceError> {
        self.selected_add_ons
            .iter()
            .try_fold(Money::zero(self.currency), |acc, a| acc.try_add(&a.price(self.currency)))
    }

    pub fn total(&self) -> Result<Money, CommerceError> {
        self.line_subtotal()?.try_add(&self.add_ons_total()?)
    }

    /// Display-ready breakdown.
    pub fn summary(&self, grouping: DigitGrouping) -> Result<OrderSummary, CommerceError> {
        let total = self.total()?;
        Ok(OrderSummary {
            product_name: self.product.title.clone(),
            unit_price: format_price(&self.unit_price, grouping),
            quantity: self.quantity,
            line_subtotal: format_price(&self.line_subtotal()?, grouping),
            add_ons: self
                .selected_add_ons
                .iter()
                .map(|a| SummaryLine {
                    name: a.name.clone(),
                    price: format_price(&a.price(self.currency), grouping),
                })
                .collect(),
            total,
            total_display: format_price(&total, grouping),
        })
    }
}

/// An order rendered for the summary step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderSummary {
    pub product_name: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_subtotal: String,
    pub add_ons: Vec<SummaryLine>,
    pub total: Money,
    pub total_display: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummaryLine {
    pub name: String,
    pub price: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::AddOnCatalog;

    fn watch() -> Product {
        Product::new("w1", "Obsidian Void Watch", Money::from_major(300, Currency::USD))
    }

    #[test]
    fn test_usd_total() {
        let catalog = AddOnCatalog::luxury();
        let mut order = Order::new(watch(), Currency::USD, Decimal::from(83)).unwrap();
        order.quantity = 2;
        order.toggle(catalog.get(AddOnId::Warranty).unwrap());

        assert_eq!(order.total().unwrap(), Money::from_major(699, Currency::USD));
        let summary = order.summary(DigitGrouping::Thousands).unwrap();
        assert_eq!(summary.total_display, "$699");
        assert_eq!(summary.line_subtotal, "$600");
        assert_eq!(summary.add_ons[0].price, "$99");
    }

    #[test]
    fn test_inr_uses_converted_effective_price() {
        let product = watch().with_discount_price(Money::from_major(250, Currency::USD));
        let order = Order::new(product, Currency::INR, Decimal::from(100)).unwrap();
        assert_eq!(order.unit_price, Money::from_major(25_000, Currency::INR));
        assert_eq!(order.summary(DigitGrouping::Thousands).unwrap().unit_price, "\u{20b9}25,000");
    }

    #[test]
    fn test_non_catalog_currency_rejected() {
        let rupees = Product::new("k1", "Kashmiri Shawl", Money::from_major(8_000, Currency::INR));
        for currency in [Currency::USD, Currency::INR] {
            let result = Order::new(rupees.clone(), currency, Decimal::from(83));
            assert!(matches!(result, Err(CommerceError::CurrencyMismatch { .. })));
        }
    }

    #[test]
    fn test_add_ons_charged_once() {
        let catalog = AddOnCatalog::luxury();
        let mut order = Order::new(watch(), Currency::USD, Decimal::from(83)).unwrap();
        order.quantity = 3;
        order.toggle(catalog.get(AddOnId::Shipping).unwrap());
        assert_eq!(order.add_ons_total().unwrap(), Money::from_major(250, Currency::USD));
        assert_eq!(order.total().unwrap(), Money::from_major(1_150, Currency::USD));
    }

    #[test]
    fn test_toggle_twice_deselects() {
        let catalog = AddOnCatalog::luxury();
        let concierge = catalog.get(AddOnId::Concierge).unwrap();
        let mut order = Order::new(watch(), Currency::USD, Decimal::from(83)).unwrap();
        assert!(order.toggle(concierge));
        assert!(!order.toggle(concierge));
        assert!(order.selected_add_ons.is_empty());
    }
}
