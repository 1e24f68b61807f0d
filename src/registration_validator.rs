use crate::models::*;
use crate::validation::*;
use chrono::{Local, NaiveDate};
use log::{debug, info, warn};

pub struct RegistrationValidator {
    today: NaiveDate,
}

impl RegistrationValidator {
    pub fn new() -> Self {
        Self::with_reference_date(Local::now().naive_local().date())
    }

    /// Pins the date used for age and future-date checks.
    pub fn with_reference_date(today: NaiveDate) -> Self {
        RegistrationValidator { today }
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.today
    }

    // Validates one field change against the record as it would be after the change
    pub fn validate_field(
        &self,
        value: &FieldValue,
        record: &RegistrationRecord,
    ) -> Vec<FieldOutcome> {
        let field = value.field();
        let single = |verdict: FieldVerdict| vec![FieldOutcome::new(field, verdict)];

        let outcomes = match value {
            FieldValue::FullName(v) => single(FormatValidator::full_name(v)),
            FieldValue::Email(v) => single(FormatValidator::email(v)),
            FieldValue::Phone(v) => PhoneValidator::validate_phone(v, record.country),
            FieldValue::Country(c) => PhoneValidator::validate_country(*c, &record.phone),
            FieldValue::CitizenshipNumber(v) => single(FormatValidator::citizenship_number(v)),
            FieldValue::PassportNumber(v) => single(FormatValidator::passport_number(v)),
            FieldValue::WardNumber(v) => single(FormatValidator::ward_number(v)),
            FieldValue::CitizenshipFile(f)
            | FieldValue::PassportFile(f)
            | FieldValue::PhotoFile(f) => single(DocumentValidator::validate(f.as_ref())),
            FieldValue::DateOfBirth(d) => single(BirthDateValidator::validate(*d, self.today)),
            FieldValue::Gender(g) => single(FormatValidator::gender(*g)),
            FieldValue::Declaration(accepted) => single(FormatValidator::declaration(*accepted)),
            FieldValue::VoterId(_) => single(FieldVerdict::Valid),
            FieldValue::CitizenshipDistrict(v)
            | FieldValue::Province(v)
            | FieldValue::District(v)
            | FieldValue::Municipality(v) => single(FormatValidator::required_text(v)),
        };

        for outcome in &outcomes {
            debug!("{} -> {:?}", outcome.field, outcome.verdict);
        }
        outcomes
    }

    /// Builds a fresh error map for the whole record, then applies the cross-field checks.
    pub fn validate_all(&self, record: &RegistrationRecord) -> RegistrationReport {
        let mut errors = ErrorMap::new();

        for field in Field::ALL {
            errors.apply_all(self.validate_field(&record.value_of(field), record));
        }

        let cross = DocumentValidator::cross_check(record);
        for outcome in &cross {
            if let Some(message) = outcome.verdict.message() {
                warn!("Cross-field check failed for {}: {}", outcome.field, message);
            }
        }
        errors.apply_all(cross);

        let is_valid = errors.is_empty();
        info!(
            "Registration record is {} ({} field error(s))",
            if is_valid { "valid" } else { "invalid" },
            errors.len()
        );

        RegistrationReport { is_valid, errors }
    }
}

impl Default for RegistrationValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::documents::SAME_FILE;
    use crate::validation::format::FIELD_REQUIRED;
    use crate::validation::phone::SELECT_COUNTRY_FIRST;

    fn validator() -> RegistrationValidator {
        RegistrationValidator::with_reference_date(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
    }

    fn complete_record() -> RegistrationRecord {
        RegistrationRecord {
            full_name: "Sita Sharma".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 14),
            gender: Some(Gender::Female),
            citizenship_number: "12345678".to_string(),
            citizenship_district: "Kaski".to_string(),
            voter_id: String::new(),
            passport_number: "P1234567".to_string(),
            country: Some(Country::Australia),
            province: "Gandaki".to_string(),
            district: "Kaski".to_string(),
            municipality: "Pokhara".to_string(),
            ward_number: "8".to_string(),
            email: "sita@example.com".to_string(),
            phone: "+61412345678".to_string(),
            citizenship_file: Some(DocumentFile::new("ctz.jpg", "image/jpeg")),
            passport_file: Some(DocumentFile::new("pp.pdf", "application/pdf")),
            photo_file: Some(DocumentFile::new("me.png", "image/png")),
            declaration: true,
        }
    }

    #[test]
    fn complete_record_is_valid_on_first_pass() {
        let report = validator().validate_all(&complete_record());
        assert!(report.is_valid, "{:?}", report.errors);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn empty_record_reports_every_required_field() {
        let report = validator().validate_all(&RegistrationRecord::new());
        assert!(!report.is_valid);
        assert!(!report.errors.contains(Field::VoterId));
        assert_eq!(report.errors.get(Field::Province), Some(FIELD_REQUIRED));
        assert_eq!(report.errors.get(Field::Gender), Some(FIELD_REQUIRED));
        assert_eq!(report.errors.get(Field::Country), Some(SELECT_COUNTRY_FIRST));
        assert_eq!(report.errors.get(Field::Phone), Some(SELECT_COUNTRY_FIRST));
        assert_eq!(report.errors.len(), Field::ALL.len() - 1);
    }

    #[test]
    fn validate_field_is_idempotent() {
        let v = validator();
        let record = complete_record();
        let value = FieldValue::Phone("+6141234".to_string());
        assert_eq!(v.validate_field(&value, &record), v.validate_field(&value, &record));
    }

    #[test]
    fn identical_document_names_fail_both_fields() {
        let mut record = complete_record();
        record.passport_file = Some(DocumentFile::new("ctz.jpg", "image/jpeg"));
        let report = validator().validate_all(&record);
        assert!(!report.is_valid);
        assert_eq!(report.errors.get(Field::CitizenshipFile), Some(SAME_FILE));
        assert_eq!(report.errors.get(Field::PassportFile), Some(SAME_FILE));
        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn undeclared_record_is_rejected() {
        let mut record = complete_record();
        record.declaration = false;
        let report = validator().validate_all(&record);
        assert!(report.errors.contains(Field::Declaration));
    }
}
