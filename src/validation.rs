use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::consts::consts::MAX_VALID_AGE;

/// Latin letters, Thai characters (ก..๙) and whitespace
static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z\x{0E01}-\x{0E59}\s]+$").expect("name pattern should compile")
});

/// Inline error shown under a form field. The message doubles as the translation key.
#[derive(Error, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldError {
    #[error("This field is required")]
    Required,
    #[error("Please enter letters only")]
    LettersOnly,
    #[error("Please enter numbers only")]
    NumbersOnly,
    #[error("Age must be greater than 0")]
    AgeNotPositive,
    #[error("Please enter a valid age")]
    AgeOutOfRange,
}

impl FieldError {
    pub fn message_key(&self) -> &'static str {
        match self {
            FieldError::Required => "This field is required",
            FieldError::LettersOnly => "Please enter letters only",
            FieldError::NumbersOnly => "Please enter numbers only",
            FieldError::AgeNotPositive => "Age must be greater than 0",
            FieldError::AgeOutOfRange => "Please enter a valid age",
        }
    }
}

pub fn validate_name(value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::Required);
    }

    if !NAME_PATTERN.is_match(value) {
        return Err(FieldError::LettersOnly);
    }

    Ok(())
}

pub fn validate_age(value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::Required);
    }

    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(FieldError::NumbersOnly);
    }

    // Only digits remain, so the parse can only fail on overflow
    let age = match value.parse::<u64>() {
        Ok(age) => age,
        Err(_) => return Err(FieldError::AgeOutOfRange),
    };

    if age == 0 {
        return Err(FieldError::AgeNotPositive);
    }

    if age > MAX_VALID_AGE {
        return Err(FieldError::AgeOutOfRange);
    }

    Ok(())
}
