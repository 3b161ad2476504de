//! Checkout module.
//!
//! Contains the add-on catalog, the order, the wizard and the handoff
//! message produced on confirmation.

mod addon;
mod flow;
mod handoff;
mod order;

pub use addon::{AddOn, AddOnCatalog, AddOnId};
pub use flow::{CheckoutStep, CheckoutWizard, WizardTransition};
pub use handoff::{compose_message, encode_component, OrderHandoff};
pub use order::{Order, OrderSummary, SummaryLine};
