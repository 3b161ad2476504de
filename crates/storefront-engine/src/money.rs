//! Money type for representing monetary values.
//!
//! Amounts are integers in the currency's minor unit (cents, paise), so
//! catalog prices survive the provider boundary without floating-point drift.
//! Decimal input from providers and configuration goes through
//! [`Money::from_decimal`], which rounds half away from zero.

use crate::error::CommerceError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Currencies the storefront can price in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    INR,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::INR => "INR",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::INR => "\u{20b9}",
        }
    }

    /// Number of minor-unit digits.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "INR" => Some(Currency::INR),
            _ => None,
        }
    }

    fn minor_per_major(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// How digits of the whole part are grouped when a price is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DigitGrouping {
    /// `1,234,567`
    #[default]
    Thousands,
    /// `12,34,567`
    Lakh,
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in the smallest currency unit.
    pub amount_minor: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a Money value from whole major units (dollars, rupees).
    pub fn from_major(amount: i64, currency: Currency) -> Self {
        Self::new(amount.saturating_mul(currency.minor_per_major()), currency)
    }

    /// Create a Money value from a decimal amount in major units.
    ///
    /// ```
    /// use rust_decimal::Decimal;
    /// use storefront_engine::money::{Currency, Money};
    /// let price = Money::from_decimal(Decimal::new(4999, 2), Currency::USD).unwrap();
    /// assert_eq!(price.amount_minor, 4999);
    /// ```
    pub fn from_decimal(amount: Decimal, currency: Currency) -> Result<Self, CommerceError> {
        let scaled = amount
            .checked_mul(Decimal::from(currency.minor_per_major()))
            .ok_or(CommerceError::Overflow)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        scaled
            .to_i64()
            .map(|minor| Self::new(minor, currency))
            .ok_or(CommerceError::Overflow)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_minor < 0
    }

    /// Convert to a decimal value in major units.
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.amount_minor, self.currency.decimal_places())
    }

    /// Add another Money value, returning None on currency mismatch or overflow.
    pub fn checked_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_minor
            .checked_add(other.amount_minor)
            .map(|sum| Money::new(sum, self.currency))
    }

    /// Add another Money value.
    pub fn try_add(&self, other: &Money) -> Result<Money, CommerceError> {
        if self.currency != other.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: other.currency.code().to_string(),
            });
        }
        self.checked_add(other).ok_or(CommerceError::Overflow)
    }

    /// Multiply by a scalar, returning None on overflow.
    pub fn checked_mul(&self, factor: i64) -> Option<Money> {
        self.amount_minor
            .checked_mul(factor)
            .map(|product| Money::new(product, self.currency))
    }

    /// Multiply by a scalar.
    pub fn try_multiply(&self, factor: i64) -> Result<Money, CommerceError> {
        self.checked_mul(factor).ok_or(CommerceError::Overflow)
    }

    /// Sum an iterator of Money values in one currency.
    pub fn try_sum<'a>(
        mut iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Result<Money, CommerceError> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }

    /// Convert into another currency at `rate` units of `to` per unit of
    /// this currency.
    pub fn convert(&self, to: Currency, rate: Decimal) -> Result<Money, CommerceError> {
        if self.currency == to {
            return Ok(*self);
        }
        let converted = self
            .to_decimal()
            .checked_mul(rate)
            .ok_or(CommerceError::Overflow)?;
        Money::from_decimal(converted, to)
    }

    /// Format with the default thousands grouping (e.g., "$1,299.5", "₹35,000").
    pub fn display(&self) -> String {
        format_price(self, DigitGrouping::Thousands)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Render a price for display.
///
/// INR shows whole rupees only, rounded half away from zero. USD keeps the
/// fractional digits it has, without trailing zeros.
pub fn format_price(money: &Money, grouping: DigitGrouping) -> String {
    let sign = if money.is_negative() { "-" } else { "" };
    let magnitude = money.amount_minor.unsigned_abs();
    let divisor = money.currency.minor_per_major() as u64;
    let symbol = money.currency.symbol();

    match money.currency {
        Currency::INR => {
            let whole = magnitude.saturating_add(divisor / 2) / divisor;
            format!("{}{}{}", symbol, sign, group_digits(whole, grouping))
        }
        Currency::USD => {
            let whole = magnitude / divisor;
            let fraction = magnitude % divisor;
            let mut out = format!("{}{}{}", symbol, sign, group_digits(whole, grouping));
            if fraction != 0 {
                let width = money.currency.decimal_places() as usize;
                let digits = format!("{:0width$}", fraction, width = width);
                out.push('.');
                out.push_str(digits.trim_end_matches('0'));
            }
            out
        }
    }
}

fn group_digits(value: u64, grouping: DigitGrouping) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let step = match grouping {
        DigitGrouping::Thousands => 3,
        DigitGrouping::Lakh => 2,
    };

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(step);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.push(tail);
    groups.join(",")
}
