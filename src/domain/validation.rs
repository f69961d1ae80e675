//! Field rules shared by the domain types.

use rust_decimal::Decimal;

use crate::config::{MAX_PRICE_HUNDREDTHS, MAX_TEXT_LENGTH, PRICE_DECIMAL_PLACES};
use crate::errors::{AppError, AppResult};

/// Trim a required text field and check it is non-empty and short enough.
pub fn required_text(field: &str, value: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{} may not be blank", field)));
    }
    if trimmed.chars().count() > MAX_TEXT_LENGTH {
        return Err(AppError::validation(format!(
            "{} must be at most {} characters",
            field, MAX_TEXT_LENGTH
        )));
    }
    Ok(trimmed.to_string())
}

/// Like [`required_text`] but an empty value is allowed.
pub fn optional_text(field: &str, value: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    required_text(field, trimmed)
}

/// Check a price is non-negative, has at most two decimal places and
/// fits the stored precision; returns it rescaled to two places.
pub fn price(value: Decimal) -> AppResult<Decimal> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(AppError::validation("Price must not be negative"));
    }
    if value.normalize().scale() > PRICE_DECIMAL_PLACES {
        return Err(AppError::validation(format!(
            "Price must have at most {} decimal places",
            PRICE_DECIMAL_PLACES
        )));
    }
    if value > Decimal::new(MAX_PRICE_HUNDREDTHS, PRICE_DECIMAL_PLACES) {
        return Err(AppError::validation(format!(
            "Price must be at most {}",
            Decimal::new(MAX_PRICE_HUNDREDTHS, PRICE_DECIMAL_PLACES)
        )));
    }

    let mut rescaled = value;
    rescaled.rescale(PRICE_DECIMAL_PLACES);
    Ok(rescaled)
}

/// Preparation time in minutes may not be negative.
pub fn time_minutes(value: i32) -> AppResult<i32> {
    if value < 0 {
        return Err(AppError::validation("Time must not be negative"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_trims() {
        assert_eq!(required_text("Name", "  Olive oil ").unwrap(), "Olive oil");
    }

    #[test]
    fn test_required_text_rejects_blank() {
        assert!(matches!(required_text("Name", ""), Err(AppError::Validation(_))));
        assert!(matches!(required_text("Name", " \t"), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_required_text_rejects_long_values() {
        let long = "x".repeat(MAX_TEXT_LENGTH + 1);
        assert!(required_text("Title", &long).is_err());
        assert!(required_text("Title", &long[1..]).is_ok());
    }

    #[test]
    fn test_optional_text_allows_blank() {
        assert_eq!(optional_text("Name", "  ").unwrap(), "");
        assert!(optional_text("Name", &"x".repeat(MAX_TEXT_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_price_rules() {
        assert_eq!(price(Decimal::new(5, 0)).unwrap().to_string(), "5.00");
        assert_eq!(price(Decimal::new(99_999, 2)).unwrap().to_string(), "999.99");
        assert_eq!(price(Decimal::new(5_000, 3)).unwrap().to_string(), "5.00");
        assert!(price(Decimal::new(-1, 2)).is_err());
        assert!(price(Decimal::new(1_001, 3)).is_err());
        assert!(price(Decimal::new(100_000, 2)).is_err());
    }

    #[test]
    fn test_time_minutes_rules() {
        assert_eq!(time_minutes(0).unwrap(), 0);
        assert!(time_minutes(-5).is_err());
    }
}
