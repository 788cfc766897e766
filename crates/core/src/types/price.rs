//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices are whole Rupiah amounts in practice, but they are kept as
//! [`Decimal`] so that arithmetic never goes through floating point. On the
//! wire a price is a plain JSON number (`45000`).

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price in the store currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// Zero Rupiah.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a whole Rupiah amount.
    #[must_use]
    pub fn from_rupiah(amount: i64) -> Self {
        Self(Decimal::from(amount))
    }

    /// Whether the amount is below zero.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Self)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_price_serializes_as_number() {
        let price = Price::from_rupiah(45_000);
        assert_eq!(serde_json::to_string(&price).unwrap(), "45000.0");

        let parsed: Price = serde_json::from_str("38000").unwrap();
        assert_eq!(parsed, Price::from_rupiah(38_000));
    }

    #[test]
    fn test_price_ordering() {
        assert!(Price::from_rupiah(38_000) < Price::from_rupiah(45_000));
    }

    #[test]
    fn test_price_from_str() {
        assert_eq!("25000".parse::<Price>().unwrap(), Price::from_rupiah(25_000));
        assert!("dua puluh".parse::<Price>().is_err());
    }

    #[test]
    fn test_price_negative() {
        assert!(Price::from_rupiah(-1).is_negative());
        assert!(!Price::ZERO.is_negative());
    }
}
