//! Fixed-precision monetary values held as integer minor units.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of minor-unit digits carried by a currency. Used for display
/// scaling only; arithmetic never consults it.
pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

/// Raised when two amounts in different currencies meet in one computation.
/// Normalizing to a single ledger currency happens upstream of this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("currency mismatch: expected {expected}, found {found}")]
pub struct CurrencyMismatch {
    pub expected: CurrencyCode,
    pub found: CurrencyCode,
}

/// Monetary amount as a signed count of minor units in one currency.
///
/// Immutable; operations return new values. Arithmetic between two amounts
/// requires equal currency codes and fails with [`CurrencyMismatch`]
/// otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Money {
    minor_units: i64,
    currency: CurrencyCode,
}

impl Money {
    pub fn new(minor_units: i64, currency: CurrencyCode) -> Self {
        Self {
            minor_units,
            currency,
        }
    }

    pub fn zero(currency: CurrencyCode) -> Self {
        Self::new(0, currency)
    }

    pub fn minor_units(&self) -> i64 {
        self.minor_units
    }

    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.minor_units == 0
    }

    pub fn signum(&self) -> i64 {
        self.minor_units.signum()
    }

    pub fn abs(&self) -> Self {
        Self::new(self.minor_units.abs(), self.currency.clone())
    }

    pub fn neg(&self) -> Self {
        Self::new(-self.minor_units, self.currency.clone())
    }

    /// Adds two amounts of the same currency.
    pub fn checked_add(&self, other: &Money) -> Result<Money, CurrencyMismatch> {
        self.expect_currency(other)?;
        Ok(Self::new(
            self.minor_units + other.minor_units,
            self.currency.clone(),
        ))
    }

    /// Subtracts an amount of the same currency.
    pub fn checked_sub(&self, other: &Money) -> Result<Money, CurrencyMismatch> {
        self.expect_currency(other)?;
        Ok(Self::new(
            self.minor_units - other.minor_units,
            self.currency.clone(),
        ))
    }

    /// Fails unless `other` is denominated in this amount's currency.
    pub fn expect_currency(&self, other: &Money) -> Result<(), CurrencyMismatch> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(CurrencyMismatch {
                expected: self.currency.clone(),
                found: other.currency.clone(),
            })
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let exponent = minor_units_for(self.currency.as_str()) as u32;
        if exponent == 0 {
            return write!(f, "{} {}", self.currency, self.minor_units);
        }
        let scale = 10i64.pow(exponent);
        let major = (self.minor_units / scale).abs();
        let frac = (self.minor_units % scale).abs();
        let sign = if self.minor_units < 0 { "-" } else { "" };
        write!(
            f,
            "{} {}{}.{:0width$}",
            self.currency,
            sign,
            major,
            frac,
            width = exponent as usize
        )
    }
}
