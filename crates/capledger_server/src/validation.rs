use capledger_core::date_math;
use jiff::civil::Date;
use rust_decimal::Decimal;

use crate::error::{ApiError, ApiResult};

/// Validate a company or investor display name
pub fn validate_name(field: &str, name: &str) -> ApiResult<()> {
    if name.trim().is_empty() {
        return Err(ApiError::ValidationError {
            field: field.to_string(),
            message: "Name cannot be empty".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ApiError::ValidationError {
            field: field.to_string(),
            message: "Name cannot exceed 200 characters".to_string(),
        });
    }

    Ok(())
}

/// Validate an annual percent rate
pub fn validate_rate(field: &str, rate: Decimal) -> ApiResult<()> {
    if rate <= Decimal::ZERO {
        return Err(ApiError::ValidationError {
            field: field.to_string(),
            message: "Rate must be positive".to_string(),
        });
    }

    if rate > Decimal::ONE_HUNDRED {
        return Err(ApiError::ValidationError {
            field: field.to_string(),
            message: "Rate cannot exceed 100 percent".to_string(),
        });
    }

    Ok(())
}

/// Parse a date accepting both `YYYY-MM-DD` and `DD-MMM-YYYY`
pub fn parse_date_param(value: &str) -> ApiResult<Date> {
    Ok(date_math::parse_date(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;
    use rust_decimal::Decimal;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("name", "Valid Name").is_ok());
        assert!(validate_name("name", "").is_err());
        assert!(validate_name("name", "   ").is_err());
        assert!(validate_name("name", &"a".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_rate() {
        assert!(validate_rate("rate", Decimal::from(12)).is_ok());
        assert!(validate_rate("rate", Decimal::new(1050, 2)).is_ok());
        assert!(validate_rate("rate", Decimal::ZERO).is_err());
        assert!(validate_rate("rate", Decimal::from(-5)).is_err());
        assert!(validate_rate("rate", Decimal::from(101)).is_err());
    }

    #[test]
    fn test_parse_date_param() {
        assert_eq!(parse_date_param("2023-06-15").unwrap(), date(2023, 6, 15));
        assert_eq!(parse_date_param("15-Jun-2023").unwrap(), date(2023, 6, 15));
        assert!(parse_date_param("June 15th").is_err());
    }
}
