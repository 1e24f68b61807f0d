use crate::models::{Country, Field, FieldOutcome, FieldVerdict};

pub const SELECT_COUNTRY_FIRST: &str = "Select country for phone validation.";
pub const COUNTRY_REQUIRED: &str = "Country is required.";

pub fn phone_format_message(country: Country) -> String {
    format!("Phone must match {} format, include country code.", country)
}

/// Rules linking the current country to the phone number format.
pub struct PhoneValidator;

impl PhoneValidator {
    /// Without a country both fields are flagged, since the phone cannot be judged.
    pub fn validate_phone(phone: &str, country: Option<Country>) -> Vec<FieldOutcome> {
        match country {
            None => vec![
                FieldOutcome::new(Field::Country, FieldVerdict::invalid(SELECT_COUNTRY_FIRST)),
                FieldOutcome::new(Field::Phone, FieldVerdict::invalid(SELECT_COUNTRY_FIRST)),
            ],
            Some(country) => {
                let verdict = if country.phone_matches(phone) {
                    FieldVerdict::Valid
                } else {
                    FieldVerdict::Invalid(phone_format_message(country))
                };
                vec![FieldOutcome::new(Field::Phone, verdict)]
            }
        }
    }

    /// A country change re-checks any phone number already entered.
    pub fn validate_country(country: Option<Country>, phone: &str) -> Vec<FieldOutcome> {
        let mut outcomes = vec![FieldOutcome::new(
            Field::Country,
            FieldVerdict::check(country.is_some(), COUNTRY_REQUIRED),
        )];
        if !phone.is_empty() {
            outcomes.extend(Self::validate_phone(phone, country));
        }
        outcomes
    }
}
