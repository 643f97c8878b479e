pub mod customers;
pub mod orders;
pub mod payments;
pub mod products;
pub mod reports;

use std::str::FromStr;

use bigdecimal::BigDecimal;

use crate::errors::AppError;

/// Decimal amounts travel as strings to avoid floating-point issues.
pub(crate) fn parse_decimal(field: &str, value: &str) -> Result<BigDecimal, AppError> {
    BigDecimal::from_str(value)
        .map_err(|e| AppError::BadRequest(format!("Invalid {} '{}': {}", field, value, e)))
}
