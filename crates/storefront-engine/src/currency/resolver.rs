//! Currency resolution through a geo lookup with a local fallback.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::currency::ClientLocale;
use crate::error::CommerceError;
use crate::guard::LoadSlot;
use crate::money::Currency;

/// Reply from the geo service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeoResponse {
    #[serde(default)]
    pub currency: Option<String>,
}

impl GeoResponse {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: Some(currency.into()),
        }
    }

    /// INR only for an exact `"INR"`; anything else, or nothing, is USD.
    pub fn currency(&self) -> Currency {
        match self.currency.as_deref() {
            Some("INR") => Currency::INR,
            _ => Currency::USD,
        }
    }
}

/// Geo service keyed on the caller's address.
#[async_trait]
pub trait GeoLookup: Send + Sync {
    async fn lookup(&self) -> Result<GeoResponse, CommerceError>;
}

/// Stands in when no geo service is configured; every lookup fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeoLookup;

#[async_trait]
impl GeoLookup for NoGeoLookup {
    async fn lookup(&self) -> Result<GeoResponse, CommerceError> {
        Err(CommerceError::GeoLookup("no geo service configured".to_string()))
    }
}

/// Decides whether the storefront prices in USD or INR.
#[derive(Debug, Clone)]
pub struct CurrencyResolver<G> {
    geo: G,
    client: ClientLocale,
}

impl<G: GeoLookup> CurrencyResolver<G> {
    pub fn new(geo: G, client: ClientLocale) -> Self {
        Self { geo, client }
    }

    /// Ask the geo service; on failure fall back to the client locale.
    /// Never fails and never retries.
    pub async fn resolve(&self) -> Currency {
        match self.geo.lookup().await {
            Ok(response) => response.currency(),
            Err(e) => {
                let currency = self.client.fallback_currency();
                tracing::debug!(
                    error = %e,
                    locale = %self.client.locale,
                    timezone = %self.client.timezone,
                    currency = currency.code(),
                    "geo lookup failed, using locale fallback"
                );
                currency
            }
        }
    }

    /// Resolve into `slot` under the cancellation guard. Returns whether the
    /// result was applied.
    pub async fn resolve_into(&self, slot: &mut LoadSlot<Currency>) -> bool {
        let ticket = slot.begin();
        let currency = self.resolve().await;
        slot.complete(&ticket, currency)
    }

    pub fn client(&self) -> &ClientLocale {
        &self.client
    }
}

impl CurrencyResolver<NoGeoLookup> {
    /// A resolver that always uses the locale fallback.
    pub fn offline(client: ClientLocale) -> Self {
        Self::new(NoGeoLookup, client)
    }
}
