//! Checkout wizard state machine.
//!
//! Three steps over one in-memory [`Order`]: review the product and pick a
//! quantity, choose add-ons, confirm the summary. Going back from the first
//! step leaves the wizard; confirming consumes it.

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogProvider, Product};
use crate::checkout::{AddOnCatalog, AddOnId, Order, OrderHandoff, OrderSummary};
use crate::config::{CheckoutConfig, StorefrontConfig};
use crate::currency::{CurrencyResolver, GeoLookup};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Currency;

/// Steps in the checkout wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckoutStep {
    /// Product, unit price and quantity.
    ProductReview,
    /// Optional add-ons.
    AddOnSelection,
    /// Priced summary before confirmation.
    Summary,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::ProductReview => "product_review",
            CheckoutStep::AddOnSelection => "add_on_selection",
            CheckoutStep::Summary => "summary",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutStep::ProductReview => "Review Selection",
            CheckoutStep::AddOnSelection => "Enhancements",
            CheckoutStep::Summary => "Final Confirmation",
        }
    }

    /// Get the step number (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStep::ProductReview => 1,
            CheckoutStep::AddOnSelection => 2,
            CheckoutStep::Summary => 3,
        }
    }

    fn following(&self) -> Option<CheckoutStep> {
        match self {
            CheckoutStep::ProductReview => Some(CheckoutStep::AddOnSelection),
            CheckoutStep::AddOnSelection => Some(CheckoutStep::Summary),
            CheckoutStep::Summary => None,
        }
    }

    fn preceding(&self) -> Option<CheckoutStep> {
        match self {
            CheckoutStep::ProductReview => None,
            CheckoutStep::AddOnSelection => Some(CheckoutStep::ProductReview),
            CheckoutStep::Summary => Some(CheckoutStep::AddOnSelection),
        }
    }
}

/// Where a back transition landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardTransition {
    Moved(CheckoutStep),
    /// Left the wizard; the caller navigates away.
    Exited,
}

/// Checkout wizard state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutWizard {
    step: CheckoutStep,
    order: Order,
    config: CheckoutConfig,
}

impl CheckoutWizard {
    /// Start at the first step with one unit of `product`.
    ///
    /// Fails with `ProductNotFound` when there is no product; the wizard
    /// cannot render without one.
    pub fn start(
        product: Option<Product>,
        currency: Currency,
        config: &CheckoutConfig,
    ) -> Result<Self, CommerceError> {
        let product = product
            .ok_or_else(|| CommerceError::ProductNotFound("no product selected".to_string()))?;
        let order = Order::new(product, currency, config.inr_per_usd)?;
        tracing::debug!(
            product_id = %order.product.id,
            currency = currency.code(),
            "checkout started"
        );
        Ok(Self {
            step: CheckoutStep::ProductReview,
            order,
            config: config.clone(),
        })
    }

    /// Fetch the product from `provider` and start.
    pub async fn from_provider<P: CatalogProvider + ?Sized>(
        provider: &P,
        id: &ProductId,
        currency: Currency,
        config: &StorefrontConfig,
    ) -> Result<Self, CommerceError> {
        let product = match provider.get_product(id).await? {
            Some(record) => Some(record.product.to_product(&config.catalog)?),
            None => None,
        };
        Self::start(product, currency, &config.checkout)
            .map_err(|e| not_found_for(e, id))
    }

    /// Resolve the currency and fetch the product concurrently, then start.
    pub async fn launch<G: GeoLookup, P: CatalogProvider + ?Sized>(
        resolver: &CurrencyResolver<G>,
        provider: &P,
        id: &ProductId,
        config: &StorefrontConfig,
    ) -> Result<Self, CommerceError> {
        let (currency, record) = futures::join!(resolver.resolve(), provider.get_product(id));
        let product = match record? {
            Some(record) => Some(record.product.to_product(&config.catalog)?),
            None => None,
        };
        Self::start(product, currency, &config.checkout)
            .map_err(|e| not_found_for(e, id))
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    pub fn currency(&self) -> Currency {
        self.order.currency
    }

    /// The add-ons offered in the second step.
    pub fn add_ons(&self) -> &AddOnCatalog {
        &self.config.add_ons
    }

    /// Move forward one step.
    pub fn advance(&mut self) -> Result<CheckoutStep, CommerceError> {
        let next = self
            .step
            .following()
            .ok_or_else(|| CommerceError::InvalidCheckoutTransition {
                from: self.step.as_str().to_string(),
                to: "none".to_string(),
            })?;
        self.step = next;
        Ok(next)
    }

    /// Move back one step, or leave the wizard from the first.
    pub fn go_back(&mut self) -> WizardTransition {
        match self.step.preceding() {
            Some(prev) => {
                self.step = prev;
                WizardTransition::Moved(prev)
            }
            None => WizardTransition::Exited,
        }
    }

    /// Set the quantity if it lies in `1..=max_quantity`; anything outside
    /// leaves it untouched. Returns whether it changed.
    pub fn set_quantity(&mut self, quantity: i64) -> bool {
        let max = i64::from(self.config.max_quantity.max(1));
        if !(1..=max).contains(&quantity) || quantity == i64::from(self.order.quantity) {
            return false;
        }
        self.order.quantity = quantity as u32;
        true
    }

    /// No-op at the maximum.
    pub fn increment_quantity(&mut self) -> bool {
        if self.order.quantity >= self.config.max_quantity {
            return false;
        }
        self.set_quantity(i64::from(self.order.quantity) + 1)
    }

    /// No-op at 1.
    pub fn decrement_quantity(&mut self) -> bool {
        if self.order.quantity <= 1 {
            return false;
        }
        self.set_quantity(i64::from(self.order.quantity) - 1)
    }

    /// Toggle an add-on. Returns whether it is selected afterwards.
    ///
    /// Ids the configured catalog does not offer are logged and ignored.
    pub fn toggle_add_on(&mut self, id: AddOnId) -> bool {
        match self.config.add_ons.get(id) {
            Some(add_on) => self.order.toggle(add_on),
            None => {
                tracing::warn!(add_on = id.as_str(), "add-on not offered, ignoring toggle");
                false
            }
        }
    }

    /// Toggle by wire token. Unknown tokens are logged and ignored.
    pub fn toggle_add_on_token(&mut self, token: &str) -> bool {
        match AddOnId::from_token(token) {
            Some(id) => self.toggle_add_on(id),
            None => {
                tracing::warn!(token, "unknown add-on token, ignoring toggle");
                false
            }
        }
    }

    pub fn is_add_on_selected(&self, id: AddOnId) -> bool {
        self.order.is_selected(id)
    }

    /// Progress through the wizard: 33, 66 or 100.
    pub fn progress_percent(&self) -> u8 {
        (u32::from(self.step.number()) * 100 / 3) as u8
    }

    /// Priced summary in the active currency.
    pub fn summary(&self) -> Result<OrderSummary, CommerceError> {
        self.order.summary(self.config.grouping)
    }

    /// Confirm from the summary step and produce the handoff.
    pub fn confirm(self) -> Result<OrderHandoff, CommerceError> {
        if self.step != CheckoutStep::Summary {
            return Err(CommerceError::InvalidCheckoutTransition {
                from: self.step.as_str().to_string(),
                to: "confirmed".to_string(),
            });
        }
        let summary = self.summary()?;
        tracing::info!(
            product_id = %self.order.product.id,
            quantity = self.order.quantity,
            add_ons = self.order.selected_add_ons.len(),
            total = %summary.total_display,
            "checkout confirmed"
        );
        Ok(OrderHandoff::new(&summary, &self.config.handoff_base_url))
    }
}

fn not_found_for(error: CommerceError, id: &ProductId) -> CommerceError {
    match error {
        CommerceError::ProductNotFound(_) => CommerceError::ProductNotFound(id.to_string()),
        other => other,
    }
}
