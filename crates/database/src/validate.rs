//! Field-level constraint checks shared by the store services.
//!
//! Each check reports failures as [`StoreError`] variants carrying the name
//! of the offending field. String checks also normalize their input
//! (surrounding whitespace is stripped, empty optional text becomes `None`)
//! and hand the normalized value back to the caller.

use crate::error::StoreError;
use models::grade_type::GradeType;
use sea_orm::prelude::Decimal;

/// Checks that a required string is non-blank and within the length cap,
/// returning it trimmed
pub fn required_string(
    field: &'static str,
    value: String,
    max_chars: usize,
) -> Result<String, StoreError> {
    let value = value.trim().to_owned();
    if value.is_empty() {
        return Err(StoreError::Validation {
            field,
            message: "this field may not be blank".to_owned(),
        });
    }
    check_length(field, &value, max_chars)?;
    Ok(value)
}

/// Checks an optional string against the length cap, returning it
/// normalized (blank collapses to `None`)
pub fn optional_string(
    field: &'static str,
    value: Option<String>,
    max_chars: usize,
) -> Result<Option<String>, StoreError> {
    let value = normalize_optional(value);
    if let Some(text) = &value {
        check_length(field, text, max_chars)?;
    }
    Ok(value)
}

/// Strips surrounding whitespace and collapses blank text to `None`
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

fn check_length(field: &'static str, value: &str, max_chars: usize) -> Result<(), StoreError> {
    if value.chars().count() > max_chars {
        return Err(StoreError::Validation {
            field,
            message: format!("no more than {max_chars} characters allowed"),
        });
    }
    Ok(())
}

/// Checks the rough shape of an email address: one `@`, a non-empty local
/// part, and a dotted domain
pub fn email(field: &'static str, value: &str) -> Result<(), StoreError> {
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.contains(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(StoreError::Validation {
            field,
            message: "enter a valid email address".to_owned(),
        });
    }
    Ok(())
}

/// Credit hours must fall between 1 and 6
pub fn credits(value: i32) -> Result<(), StoreError> {
    if !(1..=6).contains(&value) {
        return Err(StoreError::Validation {
            field: "credits",
            message: "must be between 1 and 6".to_owned(),
        });
    }
    Ok(())
}

/// Scores are recorded on a 0 to 100 scale with at most 2 decimal places
pub fn score(value: Decimal) -> Result<(), StoreError> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(StoreError::Validation {
            field: "score",
            message: "must be between 0 and 100".to_owned(),
        });
    }
    check_decimal_places("score", value)
}

/// The maximum score must be at least 1 and fit a 5-digit decimal
pub fn max_score(value: Decimal) -> Result<(), StoreError> {
    if value < Decimal::ONE {
        return Err(StoreError::Validation {
            field: "max_score",
            message: "must be at least 1".to_owned(),
        });
    }
    if value > Decimal::new(99_999, 2) {
        return Err(StoreError::Validation {
            field: "max_score",
            message: "must be no greater than 999.99".to_owned(),
        });
    }
    check_decimal_places("max_score", value)
}

fn check_decimal_places(field: &'static str, value: Decimal) -> Result<(), StoreError> {
    if value.normalize().scale() > 2 {
        return Err(StoreError::Validation {
            field,
            message: "no more than 2 decimal places allowed".to_owned(),
        });
    }
    Ok(())
}

/// Parses a grade type label, rejecting anything outside the known choices
pub fn grade_type(value: &str) -> Result<GradeType, StoreError> {
    value.parse().map_err(|_| StoreError::Validation {
        field: "grade_type",
        message: format!("\"{value}\" is not a valid grade type"),
    })
}
