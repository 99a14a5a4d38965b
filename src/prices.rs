//! Prices

use std::ops::Deref;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, iso};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to price parsing or formatting.
#[derive(Debug, Error, PartialEq)]
pub enum PriceError {
    /// The currency code is not a known ISO alpha code.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    /// The price text could not be parsed as a decimal amount.
    #[error("invalid price: {text}")]
    InvalidPrice {
        /// The offending price text.
        text: String,
        /// The underlying decimal parse error.
        #[source]
        source: rust_decimal::Error,
    },

    /// The amount is negative or has sub-minor-unit precision for the currency.
    #[error("amount not representable in minor units: {0}")]
    NotMinorUnits(String),

    /// The minor-unit amount exceeds the displayable range.
    #[error("minor-unit amount out of range: {minor_units}")]
    OutOfRange {
        /// Minor-unit amount that could not be converted.
        minor_units: u64,
    },
}

/// Represents a price in pence/cents.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price {
    value: u64,
}

impl Price {
    /// Creates a new Price
    #[must_use]
    pub fn new(value: u64) -> Self {
        Price { value }
    }

    /// Whether the price is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.value > 0
    }

    /// Looks up an ISO currency by alpha code.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::UnknownCurrency`] if the code is not a known ISO currency.
    pub fn currency(code: &str) -> Result<&'static iso::Currency, PriceError> {
        iso::find(code).ok_or_else(|| PriceError::UnknownCurrency(code.to_string()))
    }

    /// Parses a decimal amount such as `"2.50"` into minor units of the given currency.
    ///
    /// # Errors
    ///
    /// - [`PriceError::InvalidPrice`]: the text is not a decimal amount.
    /// - [`PriceError::NotMinorUnits`]: the amount is negative or carries more
    ///   fractional digits than the currency's exponent allows.
    pub fn parse(text: &str, currency: &iso::Currency) -> Result<Self, PriceError> {
        let amount = text
            .trim()
            .parse::<Decimal>()
            .map_err(|source| PriceError::InvalidPrice {
                text: text.to_string(),
                source,
            })?;

        let minor = amount * Decimal::from(10u64.pow(currency.exponent));

        if amount.is_sign_negative() || minor.fract() != Decimal::ZERO {
            return Err(PriceError::NotMinorUnits(text.to_string()));
        }

        minor
            .to_u64()
            .map(Price::new)
            .ok_or_else(|| PriceError::NotMinorUnits(text.to_string()))
    }

    /// Formats the price with the currency's symbol, e.g. `$2.50`.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::OutOfRange`] if the minor-unit amount does not fit
    /// the formatter's range.
    pub fn formatted(&self, currency: &iso::Currency) -> Result<String, PriceError> {
        let minor_units = i64::try_from(self.value).map_err(|_err| PriceError::OutOfRange {
            minor_units: self.value,
        })?;

        Ok(Money::from_minor(minor_units, currency).to_string())
    }
}

impl Deref for Price {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn new_price() {
        let price = Price::new(1000);

        assert_eq!(price.value, 1000);
    }

    #[test]
    fn price_derefs_to_u64() {
        let price = Price { value: 100 };

        assert_eq!(*price, 100);
    }

    #[test]
    fn parse_decimal_string_to_minor_units() -> TestResult {
        assert_eq!(Price::parse("2.50", USD)?, Price::new(250));
        assert_eq!(Price::parse("3", USD)?, Price::new(300));
        assert_eq!(Price::parse("0.99", USD)?, Price::new(99));

        Ok(())
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = Price::parse("cheap", USD).err();

        assert!(matches!(err, Some(PriceError::InvalidPrice { .. })));
    }

    #[test]
    fn parse_rejects_sub_minor_precision() {
        let err = Price::parse("2.505", USD).err();

        assert!(matches!(err, Some(PriceError::NotMinorUnits(_))));
    }

    #[test]
    fn parse_rejects_negative_amounts() {
        let err = Price::parse("-1.00", USD).err();

        assert!(matches!(err, Some(PriceError::NotMinorUnits(_))));
    }

    #[test]
    fn unknown_currency_code_errors() {
        let err = Price::currency("ZZZ").err();

        assert!(matches!(err, Some(PriceError::UnknownCurrency(_))));
    }

    #[test]
    fn formatted_renders_symbol_and_decimals() -> TestResult {
        assert_eq!(Price::new(250).formatted(USD)?, "$2.50");

        Ok(())
    }

    #[test]
    fn is_positive_excludes_zero() {
        assert!(Price::new(1).is_positive());
        assert!(!Price::new(0).is_positive());
    }
}
