//! Minor-unit (cent) normalization for monetary amounts.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts arrive as `rust_decimal::Decimal` and are converted to integer
//! minor units (1/100 of the major unit) before any equality or sum check.
//! All validation arithmetic in the engine happens on `i64` cents.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Minor units per major currency unit.
const MINOR_UNITS: Decimal = Decimal::ONE_HUNDRED;

/// Errors from minor-unit conversion.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    /// Amount cannot be represented in integer minor units.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

/// Converts a decimal monetary value to integer minor units (cents).
///
/// Rounds half away from zero, matching the convention "round to
/// nearest, .5 rounds up".
///
/// # Errors
///
/// Returns `MoneyError::InvalidAmount` if the value does not fit an
/// `i64` after scaling.
pub fn to_minor_units(amount: Decimal) -> Result<i64, MoneyError> {
    let scaled = amount
        .checked_mul(MINOR_UNITS)
        .ok_or_else(|| MoneyError::InvalidAmount(format!("amount too large: {amount}")))?;
    scaled
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(|| MoneyError::InvalidAmount(format!("amount too large: {amount}")))
}

/// Converts integer minor units (cents) back to a decimal value.
///
/// Exact inverse of [`to_minor_units`] for two-decimal amounts.
#[must_use]
pub fn from_minor_units(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}
