//! Product price rules
//!
//! Prices travel as `f64` on the wire; every comparison and the discount
//! percentage are computed with `Decimal`.

use rust_decimal::prelude::*;
use shared::error::{AppError, ErrorCode};

/// Upper bound for a single price
const MAX_PRICE: f64 = 1_000_000.0;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

fn invalid_price(msg: impl Into<String>) -> AppError {
    AppError::with_message(ErrorCode::ProductInvalidPrice, msg)
}

fn require_price(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() {
        return Err(invalid_price(format!("{field} must be a finite number")));
    }
    if value <= 0.0 {
        return Err(invalid_price(format!("{field} must be greater than 0")));
    }
    if value > MAX_PRICE {
        return Err(invalid_price(format!(
            "{field} exceeds maximum allowed ({MAX_PRICE})"
        )));
    }
    Ok(())
}

/// Both prices positive and `discount_price < original_price`
pub fn validate_prices(original_price: f64, discount_price: f64) -> Result<(), AppError> {
    require_price(original_price, "original_price")?;
    require_price(discount_price, "discount_price")?;
    if to_decimal(discount_price) >= to_decimal(original_price) {
        return Err(invalid_price(
            "discount_price must be lower than original_price",
        ));
    }
    Ok(())
}

/// `round((original - discount) / original * 100)`, half away from zero
///
/// Callers validate the prices first; a zero original price yields 0.
pub fn discount_percentage(original_price: f64, discount_price: f64) -> u32 {
    let original = to_decimal(original_price);
    if original.is_zero() {
        return 0;
    }
    let discount = to_decimal(discount_price);
    ((original - discount) / original * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or_default()
}
