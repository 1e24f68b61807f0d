use crate::handoff::Handoff;
use crate::models::*;
use crate::registration_validator::RegistrationValidator;
use crate::utils::RegistrationError;

/// Snapshot of an in-progress registration form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub record: RegistrationRecord,
    pub errors: ErrorMap,
}

#[derive(Debug)]
pub enum SubmitError {
    Invalid(RegistrationReport),
    Handoff(RegistrationError),
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one user edit and returns the resulting state.
    pub fn update(&self, validator: &RegistrationValidator, value: FieldValue) -> FormState {
        let mut record = self.record.with_value(value.clone());

        // Selecting a country pre-fills its dialing code
        if let FieldValue::Country(Some(country)) = &value {
            record.phone = country.dialing_code().to_string();
        }

        let mut errors = self.errors.clone();
        errors.apply_all(validator.validate_field(&value, &record));

        FormState { record, errors }
    }

    pub fn submit(&self, validator: &RegistrationValidator) -> Result<Handoff, SubmitError> {
        let report = validator.validate_all(&self.record);
        if !report.is_valid {
            return Err(SubmitError::Invalid(report));
        }
        Handoff::from_record(&self.record).map_err(SubmitError::Handoff)
    }
}
