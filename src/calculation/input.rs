//! Strict parsing of free-text monetary and hour fields.
//!
//! Form fields arrive as text. Anything that is not a plain, finite,
//! non-negative decimal number is rejected with
//! [`EngineError::InvalidInput`]; nothing is silently coerced to zero.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// Parses a non-negative monetary amount.
///
/// # Examples
///
/// ```
/// use tip_engine::calculation::parse_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_amount("cash_tips", " 512.50 ").unwrap(), Decimal::new(51250, 2));
/// assert!(parse_amount("cash_tips", "").is_err());
/// assert!(parse_amount("cash_tips", "12abc").is_err());
/// assert!(parse_amount("cash_tips", "-3").is_err());
/// ```
pub fn parse_amount(field: &str, raw: &str) -> EngineResult<Decimal> {
    let value = parse_decimal(field, raw)?;
    ensure_non_negative(field, value)?;
    Ok(value)
}

/// Parses a strictly positive number of hours.
///
/// # Examples
///
/// ```
/// use tip_engine::calculation::parse_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_hours("hours", "7.5").unwrap(), Decimal::new(75, 1));
/// assert!(parse_hours("hours", "0").is_err());
/// ```
pub fn parse_hours(field: &str, raw: &str) -> EngineResult<Decimal> {
    let value = parse_decimal(field, raw)?;
    if value <= Decimal::ZERO {
        return Err(EngineError::invalid_input(
            field,
            format!("hours must be greater than zero, got {}", value),
        ));
    }
    Ok(value)
}

/// Rejects a negative monetary amount.
pub fn ensure_non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(EngineError::invalid_input(
            field,
            format!("must not be negative, got {}", value),
        ));
    }
    Ok(())
}

fn parse_decimal(field: &str, raw: &str) -> EngineResult<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EngineError::invalid_input(field, "a value is required"));
    }
    Decimal::from_str(trimmed).map_err(|_| {
        EngineError::invalid_input(field, format!("'{}' is not a decimal number", trimmed))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_amount_accepts_plain_numbers() {
        assert_eq!(parse_amount("cash_tips", "0").unwrap(), Decimal::ZERO);
        assert_eq!(parse_amount("cash_tips", "1000").unwrap(), dec("1000"));
        assert_eq!(parse_amount("cash_tips", "99.99").unwrap(), dec("99.99"));
    }

    #[test]
    fn test_parse_amount_rejects_garbage_instead_of_zero() {
        for raw in ["", "   ", "abc", "12,5", "NaN", "Infinity", "1.2.3"] {
            let result = parse_amount("credit_tips", raw);
            match result {
                Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "credit_tips"),
                other => panic!("Expected InvalidInput for {:?}, got {:?}", raw, other),
            }
        }
    }

    #[test]
    fn test_parse_amount_rejects_negative() {
        let error = parse_amount("cash_tips", "-0.01").unwrap_err();
        assert!(error.to_string().contains("must not be negative"));
    }

    #[test]
    fn test_negative_zero_is_accepted() {
        assert_eq!(parse_amount("cash_tips", "-0").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_parse_hours_requires_positive() {
        assert_eq!(parse_hours("hours", "0.25").unwrap(), dec("0.25"));
        assert!(parse_hours("hours", "0").is_err());
        assert!(parse_hours("hours", "-4").is_err());
        assert!(parse_hours("hours", "eight").is_err());
    }
}
