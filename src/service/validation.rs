//! Field checks used by `Resource::validate` implementations.

use crate::error::AppError;
use regex::Regex;
use std::sync::OnceLock;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

/// Compiled once per process. Errors only if `EMAIL_PATTERN` itself is malformed.
fn email_regex() -> Result<&'static Regex, &'static regex::Error> {
    static EMAIL: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN)).as_ref()
}

pub struct RecordValidator;

impl RecordValidator {
    pub fn required(field: &str, value: &str) -> Result<(), AppError> {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{} is required", field)));
        }
        Ok(())
    }

    pub fn max_length(field: &str, value: &str, max: usize) -> Result<(), AppError> {
        if value.chars().count() > max {
            return Err(AppError::Validation(format!(
                "{} must be at most {} characters",
                field, max
            )));
        }
        Ok(())
    }

    pub fn email(field: &str, value: &str) -> Result<(), AppError> {
        let re = email_regex().map_err(|_| AppError::Validation(format!("invalid pattern for {}", field)))?;
        if !re.is_match(value) {
            return Err(AppError::Validation(format!("{} must be a valid email", field)));
        }
        Ok(())
    }

    /// Like [`RecordValidator::email`] but accepts an absent value.
    pub fn optional_email(field: &str, value: Option<&str>) -> Result<(), AppError> {
        match value {
            Some(v) => Self::email(field, v),
            None => Ok(()),
        }
    }

    pub fn minimum(field: &str, value: i64, min: i64) -> Result<(), AppError> {
        if value < min {
            return Err(AppError::Validation(format!("{} must be at least {}", field, min)));
        }
        Ok(())
    }
}
