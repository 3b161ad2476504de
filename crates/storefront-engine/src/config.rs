//! Storefront configuration.
//!
//! Loaded from TOML, or JSON when the file name ends in `.json`. Every field
//! has a default, so an empty file is a valid configuration.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::checkout::AddOnCatalog;
use crate::money::DigitGrouping;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorefrontConfig {
    /// Catalog browsing settings.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Checkout wizard settings.
    #[serde(default)]
    pub checkout: CheckoutConfig,
}

impl StorefrontConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            Self::from_toml_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Parse config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Catalog browsing configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// Products per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Records without an explicit `featured` flag are featured when their
    /// rating is strictly above this.
    #[serde(default = "default_featured_rating_threshold")]
    pub featured_rating_threshold: f64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            featured_rating_threshold: default_featured_rating_threshold(),
        }
    }
}

fn default_page_size() -> usize {
    8
}

fn default_featured_rating_threshold() -> f64 {
    4.8
}

/// Checkout wizard configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutConfig {
    /// Upper bound of the quantity control (lower bound is always 1).
    #[serde(default = "default_max_quantity")]
    pub max_quantity: u32,

    /// Rupees per dollar used to price USD catalog items in INR.
    #[serde(default = "default_inr_per_usd")]
    pub inr_per_usd: Decimal,

    /// Digit grouping for rendered prices.
    #[serde(default)]
    pub grouping: DigitGrouping,

    /// Add-ons offered in the second step.
    #[serde(default)]
    pub add_ons: AddOnCatalog,

    /// Messaging link the confirmed order summary is appended to.
    #[serde(default = "default_handoff_base_url")]
    pub handoff_base_url: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            max_quantity: default_max_quantity(),
            inr_per_usd: default_inr_per_usd(),
            grouping: DigitGrouping::default(),
            add_ons: AddOnCatalog::default(),
            handoff_base_url: default_handoff_base_url(),
        }
    }
}

fn default_max_quantity() -> u32 {
    10
}

fn default_inr_per_usd() -> Decimal {
    Decimal::from(83)
}

fn default_handoff_base_url() -> String {
    "https://wa.me/1234567890".to_string()
}
