//! Locale heuristic used when the geo lookup is unavailable.

use serde::{Deserialize, Serialize};

use crate::money::Currency;

const INR_REGIONS: [&str; 3] = ["in", "pk", "bd"];
const INR_TIMEZONE_CITIES: [&str; 3] = ["kolkata", "karachi", "dhaka"];

/// Locale and timezone reported by the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientLocale {
    /// BCP 47 language tag, e.g. `en-IN`.
    pub locale: String,
    /// IANA timezone name, e.g. `Asia/Kolkata`.
    pub timezone: String,
}

impl ClientLocale {
    pub fn new(locale: impl Into<String>, timezone: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            timezone: timezone.into(),
        }
    }

    pub fn fallback_currency(&self) -> Currency {
        fallback_currency(&self.locale, &self.timezone)
    }
}

/// INR when the locale carries an `-IN`, `-PK` or `-BD` region subtag or
/// the timezone names Kolkata, Karachi or Dhaka; USD otherwise.
///
/// Both checks ignore case.
pub fn fallback_currency(locale: &str, timezone: &str) -> Currency {
    if has_inr_region(locale) || has_inr_city(timezone) {
        Currency::INR
    } else {
        Currency::USD
    }
}

fn has_inr_region(locale: &str) -> bool {
    let locale = locale.to_ascii_lowercase();
    let bytes = locale.as_bytes();
    INR_REGIONS.iter().any(|region| {
        let needle = format!("-{}", region);
        locale.match_indices(&needle).any(|(start, _)| {
            // the region must end at a word boundary
            match bytes.get(start + needle.len()) {
                Some(&b) => !(b.is_ascii_alphanumeric() || b == b'_'),
                None => true,
            }
        })
    })
}

fn has_inr_city(timezone: &str) -> bool {
    let timezone = timezone.to_ascii_lowercase();
    INR_TIMEZONE_CITIES
        .iter()
        .any(|city| timezone.contains(city))
}
