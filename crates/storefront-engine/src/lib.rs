//! Commerce state engine for a storefront.
//!
//! This crate owns the rules a storefront's rendering layer calls into:
//!
//! - **Cart / Wishlist**: per-session collections with additive and toggle semantics
//! - **Catalog / Search**: provider records mapped to products, filtered, sorted, paginated
//! - **Currency**: USD or INR from a geo lookup with a locale fallback
//! - **Checkout**: a three-step wizard that prices an order and writes the handoff message
//!
//! # Example
//!
//! ```rust
//! use storefront_engine::prelude::*;
//!
//! let config = CheckoutConfig::default();
//! let watch = Product::new("w1", "Obsidian Void Watch", Money::from_major(300, Currency::USD));
//!
//! let mut session = ShopSession::anonymous();
//! session.add_to_cart(&watch).unwrap();
//!
//! let mut wizard = CheckoutWizard::start(Some(watch), Currency::USD, &config).unwrap();
//! wizard.increment_quantity();
//! wizard.advance().unwrap();
//! wizard.toggle_add_on(AddOnId::Warranty);
//! wizard.advance().unwrap();
//!
//! assert_eq!(wizard.summary().unwrap().total_display, "$699");
//! let handoff = wizard.confirm().unwrap();
//! assert!(handoff.url.starts_with("https://wa.me/"));
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod config;
pub mod guard;

pub mod catalog;
pub mod cart;
pub mod checkout;
pub mod currency;
pub mod search;
pub mod session;
pub mod wishlist;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{format_price, Currency, DigitGrouping, Money};

    pub use crate::config::{CatalogConfig, CheckoutConfig, StorefrontConfig};
    pub use crate::guard::{LoadCanceller, LoadSlot, LoadTicket};

    // Catalog
    pub use crate::catalog::{
        category_menu, CatalogLoad, CatalogLoader, CatalogProvider, Category, DetailLoader,
        DetailState, InMemoryCatalog, Product, ProductDetail, ProductDetailRecord, ProductRecord,
        ProviderPage, ProviderQuery, RelatedProduct, Review,
    };

    // Search
    pub use crate::search::{
        CatalogBrowser, CatalogQuery, CategoryFilter, Pagination, QueryPage, SortKey,
    };

    // Cart / wishlist
    pub use crate::cart::{CartItem, CartLine, CartPricing, CartStore, LinePricing};
    pub use crate::session::ShopSession;
    pub use crate::wishlist::{WishlistEntry, WishlistStore};

    // Currency
    pub use crate::currency::{
        fallback_currency, ClientLocale, CurrencyResolver, GeoLookup, GeoResponse, NoGeoLookup,
    };

    // Checkout
    pub use crate::checkout::{
        AddOn, AddOnCatalog, AddOnId, CheckoutStep, CheckoutWizard, Order, OrderHandoff,
        OrderSummary, SummaryLine, WizardTransition,
    };
}
