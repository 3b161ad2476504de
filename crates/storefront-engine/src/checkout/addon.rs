//! Optional add-ons offered during checkout.
//!
//! The set of add-on identifiers is closed: configuration can choose which
//! ones are offered and at what price, but cannot invent new ids. Unknown
//! tokens are rejected when configuration is parsed and ignored (with a
//! warning) when they arrive from the rendering layer.

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::money::{Currency, Money};
use rust_decimal::Decimal;

/// Known add-on identifiers across both product lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddOnId {
    Concierge,
    Warranty,
    Shipping,
    Modeling,
    Renders,
    Animation,
}

impl AddOnId {
    /// Every known id.
    pub const ALL: [AddOnId; 6] = [
        AddOnId::Concierge,
        AddOnId::Warranty,
        AddOnId::Shipping,
        AddOnId::Modeling,
        AddOnId::Renders,
        AddOnId::Animation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AddOnId::Concierge => "concierge",
            AddOnId::Warranty => "warranty",
            AddOnId::Shipping => "shipping",
            AddOnId::Modeling => "modeling",
            AddOnId::Renders => "renders",
            AddOnId::Animation => "animation",
        }
    }

    /// Parse a wire token. Matching is exact.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == token)
    }
}

/// An add-on with its price in both currencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AddOnEntry", into = "AddOnEntry")]
pub struct AddOn {
    pub id: AddOnId,
    pub name: String,
    pub price_usd: Money,
    pub price_inr: Money,
    pub description: String,
}

impl AddOn {
    /// Create an add-on priced in whole dollars and rupees.
    pub fn new(
        id: AddOnId,
        name: impl Into<String>,
        price_usd: i64,
        price_inr: i64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price_usd: Money::from_major(price_usd, Currency::USD),
            price_inr: Money::from_major(price_inr, Currency::INR),
            description: description.into(),
        }
    }

    /// Price in the active currency.
    pub fn price(&self, currency: Currency) -> Money {
        match currency {
            Currency::USD => self.price_usd,
            Currency::INR => self.price_inr,
        }
    }
}

/// Serialized form of an [`AddOn`], with decimal prices in major units.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AddOnEntry {
    id: AddOnId,
    name: String,
    price_usd: Decimal,
    price_inr: Decimal,
    #[serde(default)]
    description: String,
}

impl TryFrom<AddOnEntry> for AddOn {
    type Error = CommerceError;

    fn try_from(entry: AddOnEntry) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entry.id,
            name: entry.name,
            price_usd: Money::from_decimal(entry.price_usd, Currency::USD)?,
            price_inr: Money::from_decimal(entry.price_inr, Currency::INR)?,
            description: entry.description,
        })
    }
}

impl From<AddOn> for AddOnEntry {
    fn from(add_on: AddOn) -> Self {
        Self {
            id: add_on.id,
            name: add_on.name,
            price_usd: add_on.price_usd.to_decimal(),
            price_inr: add_on.price_inr.to_decimal(),
            description: add_on.description,
        }
    }
}

/// The add-ons a storefront offers, in display order. Ids are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<AddOn>", into = "Vec<AddOn>")]
pub struct AddOnCatalog {
    entries: Vec<AddOn>,
}

impl AddOnCatalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn new(entries: Vec<AddOn>) -> Result<Self, CommerceError> {
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.id == entry.id) {
                return Err(CommerceError::Config(format!(
                    "duplicate add-on id: {}",
                    entry.id.as_str()
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Services offered with the luxury goods line.
    pub fn luxury() -> Self {
        Self {
            entries: vec![
                AddOn::new(
                    AddOnId::Concierge,
                    "VIP Concierge Service",
                    150,
                    12_000,
                    "24/7 personal support for your acquisition",
                ),
                AddOn::new(
                    AddOnId::Warranty,
                    "Lifetime Authenticity Warranty",
                    99,
                    8_000,
                    "Verified certificate of authenticity on blockchain",
                ),
                AddOn::new(
                    AddOnId::Shipping,
                    "Secure Armored Shipping",
                    250,
                    20_000,
                    "Insured, tracked, and guarded delivery",
                ),
            ],
        }
    }

    /// Extras offered with the 3D services line.
    pub fn studio() -> Self {
        Self {
            entries: vec![
                AddOn::new(
                    AddOnId::Modeling,
                    "Custom Model Revisions",
                    199,
                    16_000,
                    "Two extra rounds of model changes",
                ),
                AddOn::new(
                    AddOnId::Renders,
                    "Additional Render Angles",
                    149,
                    12_000,
                    "Five more high-resolution stills",
                ),
                AddOn::new(
                    AddOnId::Animation,
                    "Turntable Animation",
                    299,
                    24_000,
                    "A 15-second 360 degree product spin",
                ),
            ],
        }
    }

    pub fn get(&self, id: AddOnId) -> Option<&AddOn> {
        self.entries.iter().find(|a| a.id == id)
    }

    pub fn contains(&self, id: AddOnId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AddOn> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AddOnCatalog {
    fn default() -> Self {
        Self::luxury()
    }
}

impl TryFrom<Vec<AddOn>> for AddOnCatalog {
    type Error = CommerceError;

    fn try_from(entries: Vec<AddOn>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<AddOnCatalog> for Vec<AddOn> {
    fn from(catalog: AddOnCatalog) -> Self {
        catalog.entries
    }
}
