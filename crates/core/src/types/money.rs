//! Type-safe money representation using decimal arithmetic.
//!
//! All money paths use `rust_decimal::Decimal` - never floats. Amounts are
//! in the currency's standard unit (dollars, not cents), matching what the
//! commerce API serializes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: CurrencyCode,
}

impl Money {
    /// Create a new amount in the given currency.
    #[must_use]
    pub const fn new(amount: Decimal, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }

    /// Zero in the default currency.
    #[must_use]
    pub fn zero() -> Self {
        Self::new(Decimal::ZERO, CurrencyCode::default())
    }

    /// Create an amount from whole currency units (e.g., dollars).
    #[must_use]
    pub fn from_major(units: i64) -> Self {
        Self::new(Decimal::from(units), CurrencyCode::default())
    }

    /// Create an amount from minor units (e.g., cents).
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self::new(Decimal::new(cents, 2), CurrencyCode::default())
    }

    /// Whether the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Multiply by a quantity, keeping the currency.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self::new(self.amount * Decimal::from(quantity), self.currency)
    }

    /// Add another amount. The right-hand currency is assumed to match;
    /// the left-hand currency is kept.
    #[must_use]
    pub fn plus(&self, other: &Self) -> Self {
        Self::new(self.amount + other.amount, self.currency)
    }

    /// Round to two decimal places (banker's rounding).
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self::new(self.amount.round_dp(2), self.currency)
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency.symbol(), self.amount)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "\u{20ac}",
            Self::GBP => "\u{a3}",
        }
    }

    /// ISO 4217 code string.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let price = Money::from_cents(1999);
        assert_eq!(price.display(), "$19.99");
    }

    #[test]
    fn test_times_and_plus() {
        let unit = Money::from_major(100);
        let line = unit.times(2);
        assert_eq!(line.amount, Decimal::from(200));

        let sum = line.plus(&Money::from_cents(50));
        assert_eq!(sum.display(), "$200.50");
    }

    #[test]
    fn test_zero() {
        assert!(Money::zero().is_zero());
        assert_eq!(Money::zero().display(), "$0.00");
    }

    #[test]
    fn test_display_currencies() {
        let eur = Money::new(Decimal::new(500, 2), CurrencyCode::EUR);
        assert_eq!(eur.display(), "\u{20ac}5.00");
        assert_eq!(CurrencyCode::GBP.code(), "GBP");
    }
}
