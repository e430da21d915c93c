// src/common/validation.rs

use rust_decimal::Decimal;
use validator::{ValidationError, ValidationErrors};

// As mensagens são chaves do catálogo de idiomas

pub fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() && !val.is_zero() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("must_not_be_negative".into());
        return Err(err);
    }
    Ok(())
}

pub fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.add_param("exclusive_min".into(), &0.0);
        err.message = Some("must_be_positive".into());
        return Err(err);
    }
    Ok(())
}

/// Erro de regra entre campos, anexado a um campo só, no mesmo formato do validator.
pub fn field_error(field: &'static str, code: &'static str) -> ValidationErrors {
    let mut err = ValidationError::new(code);
    err.message = Some(code.into());
    let mut errors = ValidationErrors::new();
    errors.add(field, err);
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn zero_is_not_negative() {
        assert!(validate_not_negative(&dec("0")).is_ok());
        assert!(validate_not_negative(&dec("-0.00")).is_ok());
        assert!(validate_not_negative(&dec("12.5")).is_ok());
        assert!(validate_not_negative(&dec("-0.01")).is_err());
    }

    #[test]
    fn positive_rejects_zero() {
        assert!(validate_positive(&dec("0")).is_err());
        assert!(validate_positive(&dec("-3")).is_err());
        assert!(validate_positive(&dec("0.5")).is_ok());
    }

    #[test]
    fn field_error_uses_the_code_as_message() {
        let errors = field_error("endTime", "end_before_start");
        let field = &errors.field_errors()["endTime"];
        assert_eq!(field[0].message.as_deref(), Some("end_before_start"));
    }
}
