//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is negative.
    #[error("price cannot be negative")]
    Negative,
    /// The amount exceeds the catalog maximum.
    #[error("price cannot exceed {max}")]
    TooLarge {
        /// Maximum allowed amount.
        max: Decimal,
    },
    /// The amount could not be represented as a decimal.
    #[error("price is not a representable number")]
    NotRepresentable,
}

/// A non-negative catalog price in USD.
///
/// Listings are priced between 0 and 100 dollars; the bound matches what
/// the add-listing form accepts. Stored as a `Decimal` so arithmetic on
/// cart subtotals never drifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Maximum listing price.
    pub const MAX: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] for negative amounts and
    /// [`PriceError::TooLarge`] for amounts above [`Price::MAX`].
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() {
            return Err(PriceError::Negative);
        }
        if amount > Self::MAX {
            return Err(PriceError::TooLarge { max: Self::MAX });
        }
        Ok(Self(amount))
    }

    /// Create a price from an `f64`, as decoded from a backend double field.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NotRepresentable`] for NaN/infinite input, plus
    /// the range errors from [`Price::new`].
    pub fn from_f64(amount: f64) -> Result<Self, PriceError> {
        let decimal = Decimal::from_f64(amount).ok_or(PriceError::NotRepresentable)?;
        // Backend doubles carry float noise; two decimal places is the
        // resolution the catalog displays and charges at.
        Self::new(decimal.round_dp(2))
    }

    /// The amount as a decimal.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Multiply by a cart quantity.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Decimal {
        self.0 * Decimal::from(quantity)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}
