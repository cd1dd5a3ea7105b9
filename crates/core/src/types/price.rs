//! Type-safe price representation using decimal arithmetic.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., rupees, not paise).
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

    /// Amount in the currency's minor unit (paise for INR, cents for USD).
    ///
    /// Payment gateways take amounts in minor units. Fractions beyond the
    /// minor unit are truncated. Returns `None` on overflow.
    #[must_use]
    pub fn minor_units(&self) -> Option<i64> {
        (self.amount * Decimal::from(100)).trunc().to_i64()
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    INR,
    USD,
    EUR,
}

impl CurrencyCode {
    /// The ISO 4217 code as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::INR => "INR",
            Self::USD => "USD",
            Self::EUR => "EUR",
        }
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_minor_units() {
        let price = Price::new(Decimal::new(49999, 2), CurrencyCode::INR);
        assert_eq!(price.minor_units(), Some(49999));
    }

    #[test]
    fn test_minor_units_truncates_sub_paise() {
        // 10.999 rupees -> 1099 paise, sub-paise fraction dropped
        let price = Price::new(Decimal::new(10999, 3), CurrencyCode::INR);
        assert_eq!(price.minor_units(), Some(1099));
    }

    #[test]
    fn test_default_currency_is_inr() {
        assert_eq!(CurrencyCode::default(), CurrencyCode::INR);
        assert_eq!(CurrencyCode::INR.to_string(), "INR");
    }
}
