//! Active currency resolution.

mod locale;
mod resolver;

pub use locale::{fallback_currency, ClientLocale};
pub use resolver::{CurrencyResolver, GeoLookup, GeoResponse, NoGeoLookup};
