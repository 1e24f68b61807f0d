use crate::models::{DocumentFile, Field, FieldOutcome, FieldVerdict, RegistrationRecord};

pub const UNSUPPORTED_FILE_TYPE: &str = "Allowed: JPG, PNG, or PDF.";
pub const SAME_FILE: &str = "Citizenship and Passport cannot be the same file.";
pub const LOOKS_LIKE_PASSPORT: &str =
    "Filename suggests a passport. Upload correct citizenship document.";
pub const LOOKS_LIKE_CITIZENSHIP: &str =
    "Filename suggests a citizenship document. Upload the passport file.";

pub struct DocumentValidator;

impl DocumentValidator {
    pub fn validate(file: Option<&DocumentFile>) -> FieldVerdict {
        FieldVerdict::check(
            file.map(DocumentFile::has_accepted_type).unwrap_or(false),
            UNSUPPORTED_FILE_TYPE,
        )
    }

    /// Checks that only make sense across the two identity documents.
    /// Later checks overwrite earlier ones for the same field.
    pub fn cross_check(record: &RegistrationRecord) -> Vec<FieldOutcome> {
        let mut outcomes = Vec::new();
        let citizenship = record.citizenship_file.as_ref();
        let passport = record.passport_file.as_ref();

        if let (Some(c), Some(p)) = (citizenship, passport) {
            if c.name == p.name {
                for field in [Field::CitizenshipFile, Field::PassportFile] {
                    outcomes.push(FieldOutcome::new(field, FieldVerdict::invalid(SAME_FILE)));
                }
            }
        }

        if citizenship.map(|f| name_mentions(f, "passport")).unwrap_or(false) {
            outcomes.push(FieldOutcome::new(
                Field::CitizenshipFile,
                FieldVerdict::invalid(LOOKS_LIKE_PASSPORT),
            ));
        }

        if passport.map(|f| name_mentions(f, "citizenship")).unwrap_or(false) {
            outcomes.push(FieldOutcome::new(
                Field::PassportFile,
                FieldVerdict::invalid(LOOKS_LIKE_CITIZENSHIP),
            ));
        }

        outcomes
    }
}

fn name_mentions(file: &DocumentFile, word: &str) -> bool {
    file.name.to_lowercase().contains(word)
}
