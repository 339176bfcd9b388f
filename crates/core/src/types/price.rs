//! Type-safe price representation using decimal arithmetic.
//!
//! Backend rows carry bare numeric prices; [`Price`] pairs an amount with a
//! currency once a total has been computed (e.g. at checkout).

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Unit price multiplied by a quantity, or `None` if the product does
    /// not fit in a [`Decimal`].
    #[must_use]
    pub fn checked_times(self, quantity: u32) -> Option<Self> {
        self.amount
            .checked_mul(Decimal::from(quantity))
            .map(|amount| Self::new(amount, self.currency_code))
    }

    /// Sum of two prices, or `None` on overflow or a currency mismatch.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        if self.currency_code != other.currency_code {
            return None;
        }
        self.amount
            .checked_add(other.amount)
            .map(|amount| Self::new(amount, self.currency_code))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:.2}",
            self.currency_code.symbol(),
            self.amount.round_dp(2)
        )
    }
}

/// ISO 4217 currency codes accepted by the booking backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    /// US dollar, the default pricing currency for listings.
    #[default]
    USD,
    /// Zimbabwe Gold.
    ZWG,
    /// South African rand.
    ZAR,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD => "$",
            Self::ZWG => "ZWG ",
            Self::ZAR => "R",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_times_quantity() {
        let unit = Price::new(Decimal::new(12_550, 2), CurrencyCode::USD);
        assert_eq!(
            unit.checked_times(2).map(|p| p.amount),
            Some(Decimal::new(25_100, 2))
        );
        assert!(Price::new(Decimal::MAX, CurrencyCode::USD).checked_times(2).is_none());
    }

    #[test]
    fn test_price_checked_add() {
        let ten = Price::new(Decimal::TEN, CurrencyCode::USD);
        assert_eq!(ten.checked_add(ten).map(|p| p.amount), Some(Decimal::new(20, 0)));
        assert!(Price::new(Decimal::MAX, CurrencyCode::USD).checked_add(ten).is_none());
        assert!(ten.checked_add(Price::new(Decimal::TEN, CurrencyCode::ZAR)).is_none());
    }

    #[test]
    fn test_price_display() {
        let price = Price::new(Decimal::new(45, 0), CurrencyCode::USD);
        assert_eq!(price.to_string(), "$45.00");

        let rand = Price::new(Decimal::new(1999, 2), CurrencyCode::ZAR);
        assert_eq!(rand.to_string(), "R19.99");
    }
}
