//! Fixed-point amount helpers.
//!
//! Every quantity, rate and money value is a `Decimal`; these helpers keep the
//! positivity checks and rounding consistent across ledgers.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{DomainError, DomainResult};

/// Scale money values are rounded to when a product or ratio is stored.
pub const MONEY_SCALE: u32 = 2;

/// Require `value > 0`.
pub fn ensure_positive(value: Decimal, field: &str) -> DomainResult<Decimal> {
    if value <= Decimal::ZERO {
        return Err(DomainError::validation(format!(
            "{field} must be positive (got {value})"
        )));
    }
    Ok(value)
}

/// Require `value >= 0`.
pub fn ensure_non_negative(value: Decimal, field: &str) -> DomainResult<Decimal> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(DomainError::validation(format!(
            "{field} cannot be negative (got {value})"
        )));
    }
    Ok(value)
}

/// Round a money value half-away-from-zero to `scale` decimal places.
pub fn round_money(value: Decimal, scale: u32) -> Decimal {
    value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}
