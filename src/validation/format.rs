use crate::models::{FieldVerdict, Gender};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EMAIL: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    static ref CITIZENSHIP_NUMBER: Regex = Regex::new(r"^[0-9]{6,10}$").unwrap();
    static ref PASSPORT_NUMBER: Regex = Regex::new(r"^[A-Z][0-9]{7}$").unwrap();
    static ref WARD_NUMBER: Regex = Regex::new(r"^[0-9]{1,2}$").unwrap();
}

pub const MIN_FULL_NAME_CHARS: usize = 3;

pub const FULL_NAME_TOO_SHORT: &str = "Full name is too short.";
pub const INVALID_EMAIL: &str = "Invalid email format.";
pub const INVALID_CITIZENSHIP_NUMBER: &str = "6–10 digits required.";
pub const INVALID_PASSPORT_NUMBER: &str = "Format like P1234567.";
pub const INVALID_WARD_NUMBER: &str = "Ward must be 1–2 digits.";
pub const FIELD_REQUIRED: &str = "This field is required.";
pub const DECLARATION_REQUIRED: &str = "You must accept the declaration.";

/// Single-value format rules that need no other part of the record.
pub struct FormatValidator;

impl FormatValidator {
    pub fn full_name(value: &str) -> FieldVerdict {
        FieldVerdict::check(
            value.trim().chars().count() >= MIN_FULL_NAME_CHARS,
            FULL_NAME_TOO_SHORT,
        )
    }

    pub fn email(value: &str) -> FieldVerdict {
        FieldVerdict::check(EMAIL.is_match(value), INVALID_EMAIL)
    }

    pub fn citizenship_number(value: &str) -> FieldVerdict {
        FieldVerdict::check(CITIZENSHIP_NUMBER.is_match(value), INVALID_CITIZENSHIP_NUMBER)
    }

    pub fn passport_number(value: &str) -> FieldVerdict {
        FieldVerdict::check(PASSPORT_NUMBER.is_match(value), INVALID_PASSPORT_NUMBER)
    }

    pub fn ward_number(value: &str) -> FieldVerdict {
        FieldVerdict::check(WARD_NUMBER.is_match(value), INVALID_WARD_NUMBER)
    }

    // Fallback for free-text fields without a dedicated format
    pub fn required_text(value: &str) -> FieldVerdict {
        FieldVerdict::check(!value.trim().is_empty(), FIELD_REQUIRED)
    }

    pub fn gender(value: Option<Gender>) -> FieldVerdict {
        FieldVerdict::check(value.is_some(), FIELD_REQUIRED)
    }

    pub fn declaration(accepted: bool) -> FieldVerdict {
        FieldVerdict::check(accepted, DECLARATION_REQUIRED)
    }
}
