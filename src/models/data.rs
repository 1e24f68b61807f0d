use super::rules::Country;
use crate::utils::RegistrationError;
use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub const ACCEPTED_MEDIA_TYPES: [&str; 3] = ["image/jpeg", "image/png", "application/pdf"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl FromStr for Gender {
    type Err = RegistrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(RegistrationError::UnsupportedGender(s.trim().to_string())),
        }
    }
}

// The form stores an unset select or date input as "".
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None => Ok(None),
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(value) => T::deserialize(value).map(Some).map_err(D::Error::custom),
    }
}

/// Metadata of an uploaded document. Contents are never inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFile {
    pub name: String,
    #[serde(rename = "type")]
    pub media_type: String,
}

impl DocumentFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>) -> Self {
        DocumentFile {
            name: name.into(),
            media_type: media_type.into(),
        }
    }

    /// Builds a handle for a local file, inferring the media type from its extension.
    pub fn from_path(path: &Path) -> Result<Self, RegistrationError> {
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(RegistrationError::NotAFile(path.display().to_string()));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| RegistrationError::NotAFile(path.display().to_string()))?;

        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        let media_type = match extension.as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "pdf" => "application/pdf",
            _ => "application/octet-stream",
        };

        Ok(DocumentFile::new(name, media_type))
    }

    pub fn has_accepted_type(&self) -> bool {
        ACCEPTED_MEDIA_TYPES.contains(&self.media_type.as_str())
    }
}

/// Everything the applicant has entered into the registration form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistrationRecord {
    pub full_name: String,
    #[serde(rename = "dob", deserialize_with = "empty_as_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(deserialize_with = "empty_as_none")]
    pub gender: Option<Gender>,
    #[serde(rename = "citizenshipNo")]
    pub citizenship_number: String,
    pub citizenship_district: String,
    pub voter_id: String,
    #[serde(rename = "passportNo")]
    pub passport_number: String,
    #[serde(deserialize_with = "empty_as_none")]
    pub country: Option<Country>,
    pub province: String,
    pub district: String,
    pub municipality: String,
    #[serde(rename = "wardNo")]
    pub ward_number: String,
    pub email: String,
    pub phone: String,
    pub citizenship_file: Option<DocumentFile>,
    pub passport_file: Option<DocumentFile>,
    pub photo_file: Option<DocumentFile>,
    pub declaration: bool,
}

/// Form fields in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    FullName,
    DateOfBirth,
    Gender,
    CitizenshipNumber,
    CitizenshipDistrict,
    VoterId,
    PassportNumber,
    Country,
    Province,
    District,
    Municipality,
    WardNumber,
    Email,
    Phone,
    CitizenshipFile,
    PassportFile,
    PhotoFile,
    Declaration,
}

impl Field {
    pub const ALL: [Field; 18] = [
        Field::FullName,
        Field::DateOfBirth,
        Field::Gender,
        Field::CitizenshipNumber,
        Field::CitizenshipDistrict,
        Field::VoterId,
        Field::PassportNumber,
        Field::Country,
        Field::Province,
        Field::District,
        Field::Municipality,
        Field::WardNumber,
        Field::Email,
        Field::Phone,
        Field::CitizenshipFile,
        Field::PassportFile,
        Field::PhotoFile,
        Field::Declaration,
    ];

    /// Key used in the serialized record and in the error map.
    pub fn key(&self) -> &'static str {
        match self {
            Field::FullName => "fullName",
            Field::DateOfBirth => "dob",
            Field::Gender => "gender",
            Field::CitizenshipNumber => "citizenshipNo",
            Field::CitizenshipDistrict => "citizenshipDistrict",
            Field::VoterId => "voterId",
            Field::PassportNumber => "passportNo",
            Field::Country => "country",
            Field::Province => "province",
            Field::District => "district",
            Field::Municipality => "municipality",
            Field::WardNumber => "wardNo",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::CitizenshipFile => "citizenshipFile",
            Field::PassportFile => "passportFile",
            Field::PhotoFile => "photoFile",
            Field::Declaration => "declaration",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::FullName => "Full Name",
            Field::DateOfBirth => "Date of Birth",
            Field::Gender => "Gender",
            Field::CitizenshipNumber => "Citizenship Number",
            Field::CitizenshipDistrict => "Citizenship Issued District",
            Field::VoterId => "Voter ID",
            Field::PassportNumber => "Passport Number",
            Field::Country => "Current Country",
            Field::Province => "Province",
            Field::District => "District",
            Field::Municipality => "Municipality",
            Field::WardNumber => "Ward No.",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::CitizenshipFile => "Citizenship Document",
            Field::PassportFile => "Passport Document",
            Field::PhotoFile => "Recent Photo",
            Field::Declaration => "Declaration",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = RegistrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .iter()
            .find(|field| field.key() == s)
            .copied()
            .ok_or_else(|| RegistrationError::UnknownField(s.to_string()))
    }
}

/// A new value for exactly one field, typed per field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    FullName(String),
    DateOfBirth(Option<NaiveDate>),
    Gender(Option<Gender>),
    CitizenshipNumber(String),
    CitizenshipDistrict(String),
    VoterId(String),
    PassportNumber(String),
    Country(Option<Country>),
    Province(String),
    District(String),
    Municipality(String),
    WardNumber(String),
    Email(String),
    Phone(String),
    CitizenshipFile(Option<DocumentFile>),
    PassportFile(Option<DocumentFile>),
    PhotoFile(Option<DocumentFile>),
    Declaration(bool),
}

impl FieldValue {
    pub fn field(&self) -> Field {
        match self {
            FieldValue::FullName(_) => Field::FullName,
            FieldValue::DateOfBirth(_) => Field::DateOfBirth,
            FieldValue::Gender(_) => Field::Gender,
            FieldValue::CitizenshipNumber(_) => Field::CitizenshipNumber,
            FieldValue::CitizenshipDistrict(_) => Field::CitizenshipDistrict,
            FieldValue::VoterId(_) => Field::VoterId,
            FieldValue::PassportNumber(_) => Field::PassportNumber,
            FieldValue::Country(_) => Field::Country,
            FieldValue::Province(_) => Field::Province,
            FieldValue::District(_) => Field::District,
            FieldValue::Municipality(_) => Field::Municipality,
            FieldValue::WardNumber(_) => Field::WardNumber,
            FieldValue::Email(_) => Field::Email,
            FieldValue::Phone(_) => Field::Phone,
            FieldValue::CitizenshipFile(_) => Field::CitizenshipFile,
            FieldValue::PassportFile(_) => Field::PassportFile,
            FieldValue::PhotoFile(_) => Field::PhotoFile,
            FieldValue::Declaration(_) => Field::Declaration,
        }
    }

    /// Parses raw form input for a field. Document fields cannot be entered as text.
    pub fn parse(field: Field, raw: &str) -> Result<Self, RegistrationError> {
        let text = raw.to_string();
        let value = match field {
            Field::FullName => FieldValue::FullName(text),
            Field::DateOfBirth => {
                if raw.trim().is_empty() {
                    FieldValue::DateOfBirth(None)
                } else {
                    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                        .map_err(|e| RegistrationError::InvalidDate(format!("{}: {}", raw, e)))?;
                    FieldValue::DateOfBirth(Some(date))
                }
            }
            Field::Gender => {
                if raw.trim().is_empty() {
                    FieldValue::Gender(None)
                } else {
                    FieldValue::Gender(Some(raw.parse()?))
                }
            }
            Field::CitizenshipNumber => FieldValue::CitizenshipNumber(text),
            Field::CitizenshipDistrict => FieldValue::CitizenshipDistrict(text),
            Field::VoterId => FieldValue::VoterId(text),
            Field::PassportNumber => FieldValue::PassportNumber(text),
            Field::Country => {
                if raw.trim().is_empty() {
                    FieldValue::Country(None)
                } else {
                    FieldValue::Country(Some(raw.parse()?))
                }
            }
            Field::Province => FieldValue::Province(text),
            Field::District => FieldValue::District(text),
            Field::Municipality => FieldValue::Municipality(text),
            Field::WardNumber => FieldValue::WardNumber(text),
            Field::Email => FieldValue::Email(text),
            Field::Phone => FieldValue::Phone(text),
            Field::Declaration => FieldValue::Declaration(matches!(
                raw.trim().to_ascii_lowercase().as_str(),
                "true" | "yes" | "on" | "1"
            )),
            Field::CitizenshipFile | Field::PassportFile | Field::PhotoFile => {
                return Err(RegistrationError::UnknownField(format!(
                    "{} takes a file, not text",
                    field.key()
                )))
            }
        };
        Ok(value)
    }
}

impl RegistrationRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value_of(&self, field: Field) -> FieldValue {
        match field {
            Field::FullName => FieldValue::FullName(self.full_name.clone()),
            Field::DateOfBirth => FieldValue::DateOfBirth(self.date_of_birth),
            Field::Gender => FieldValue::Gender(self.gender),
            Field::CitizenshipNumber => {
                FieldValue::CitizenshipNumber(self.citizenship_number.clone())
            }
            Field::CitizenshipDistrict => {
                FieldValue::CitizenshipDistrict(self.citizenship_district.clone())
            }
            Field::VoterId => FieldValue::VoterId(self.voter_id.clone()),
            Field::PassportNumber => FieldValue::PassportNumber(self.passport_number.clone()),
            Field::Country => FieldValue::Country(self.country),
            Field::Province => FieldValue::Province(self.province.clone()),
            Field::District => FieldValue::District(self.district.clone()),
            Field::Municipality => FieldValue::Municipality(self.municipality.clone()),
            Field::WardNumber => FieldValue::WardNumber(self.ward_number.clone()),
            Field::Email => FieldValue::Email(self.email.clone()),
            Field::Phone => FieldValue::Phone(self.phone.clone()),
            Field::CitizenshipFile => FieldValue::CitizenshipFile(self.citizenship_file.clone()),
            Field::PassportFile => FieldValue::PassportFile(self.passport_file.clone()),
            Field::PhotoFile => FieldValue::PhotoFile(self.photo_file.clone()),
            Field::Declaration => FieldValue::Declaration(self.declaration),
        }
    }

    /// Returns a copy of the record with one field replaced.
    pub fn with_value(&self, value: FieldValue) -> RegistrationRecord {
        let mut next = self.clone();
        match value {
            FieldValue::FullName(v) => next.full_name = v,
            FieldValue::DateOfBirth(v) => next.date_of_birth = v,
            FieldValue::Gender(v) => next.gender = v,
            FieldValue::CitizenshipNumber(v) => next.citizenship_number = v,
            FieldValue::CitizenshipDistrict(v) => next.citizenship_district = v,
            FieldValue::VoterId(v) => next.voter_id = v,
            FieldValue::PassportNumber(v) => next.passport_number = v,
            FieldValue::Country(v) => next.country = v,
            FieldValue::Province(v) => next.province = v,
            FieldValue::District(v) => next.district = v,
            FieldValue::Municipality(v) => next.municipality = v,
            FieldValue::WardNumber(v) => next.ward_number = v,
            FieldValue::Email(v) => next.email = v,
            FieldValue::Phone(v) => next.phone = v,
            FieldValue::CitizenshipFile(v) => next.citizenship_file = v,
            FieldValue::PassportFile(v) => next.passport_file = v,
            FieldValue::PhotoFile(v) => next.photo_file = v,
            FieldValue::Declaration(v) => next.declaration = v,
        }
        next
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldVerdict {
    Valid,
    Invalid(String),
}

impl FieldVerdict {
    pub fn invalid(message: impl Into<String>) -> Self {
        FieldVerdict::Invalid(message.into())
    }

    /// Valid when `ok`, otherwise invalid with `message`.
    pub fn check(ok: bool, message: &str) -> Self {
        if ok {
            FieldVerdict::Valid
        } else {
            FieldVerdict::invalid(message)
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, FieldVerdict::Valid)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            FieldVerdict::Valid => None,
            FieldVerdict::Invalid(message) => Some(message.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOutcome {
    pub field: Field,
    pub verdict: FieldVerdict,
}

impl FieldOutcome {
    pub fn new(field: Field, verdict: FieldVerdict) -> Self {
        FieldOutcome { field, verdict }
    }
}

/// Messages for the fields that currently fail validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap {
    entries: BTreeMap<Field, String>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, outcome: FieldOutcome) {
        match outcome.verdict {
            FieldVerdict::Valid => self.clear(outcome.field),
            FieldVerdict::Invalid(message) => self.set(outcome.field, message),
        }
    }

    pub fn apply_all(&mut self, outcomes: impl IntoIterator<Item = FieldOutcome>) {
        for outcome in outcomes {
            self.apply(outcome);
        }
    }

    pub fn set(&mut self, field: Field, message: impl Into<String>) {
        self.entries.insert(field, message.into());
    }

    pub fn clear(&mut self, field: Field) {
        self.entries.remove(&field);
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.entries.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.entries.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.entries.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl Serialize for ErrorMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, message) in &self.entries {
            map.serialize_entry(field.key(), message)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationReport {
    pub is_valid: bool,
    pub errors: ErrorMap,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn every_field_round_trips_through_its_key() {
        for field in Field::ALL {
            assert_eq!(field.key().parse::<Field>().unwrap(), field);
        }
        assert!("nickname".parse::<Field>().is_err());
    }

    #[test]
    fn value_of_matches_field() {
        let record = RegistrationRecord::new();
        for field in Field::ALL {
            assert_eq!(record.value_of(field).field(), field);
        }
    }

    #[test]
    fn with_value_leaves_original_untouched() {
        let record = RegistrationRecord::new();
        let next = record.with_value(FieldValue::Email("a@b.co".to_string()));
        assert_eq!(next.email, "a@b.co");
        assert!(record.email.is_empty());
    }

    #[test]
    fn error_map_apply_sets_and_clears() {
        let mut errors = ErrorMap::new();
        errors.apply(FieldOutcome::new(
            Field::Email,
            FieldVerdict::invalid("Invalid email format."),
        ));
        assert_eq!(errors.get(Field::Email), Some("Invalid email format."));

        errors.apply(FieldOutcome::new(Field::Email, FieldVerdict::Valid));
        assert!(errors.is_empty());
    }

    #[test]
    fn error_map_serializes_with_form_keys() {
        let mut errors = ErrorMap::new();
        errors.set(Field::WardNumber, "Ward must be 1–2 digits.");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({ "wardNo": "Ward must be 1–2 digits." }));
    }

    #[test]
    fn record_uses_session_keys() {
        let record = RegistrationRecord {
            passport_number: "P1234567".to_string(),
            country: Some(Country::UK),
            photo_file: Some(DocumentFile::new("me.png", "image/png")),
            ..RegistrationRecord::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["passportNo"], "P1234567");
        assert_eq!(json["country"], "UK");
        assert_eq!(json["photoFile"]["type"], "image/png");
        assert_eq!(json["dob"], serde_json::Value::Null);
    }

    #[test]
    fn parse_raw_input() {
        assert_eq!(
            FieldValue::parse(Field::DateOfBirth, "2000-02-29").unwrap(),
            FieldValue::DateOfBirth(NaiveDate::from_ymd_opt(2000, 2, 29))
        );
        assert_eq!(
            FieldValue::parse(Field::Country, "").unwrap(),
            FieldValue::Country(None)
        );
        assert!(FieldValue::parse(Field::DateOfBirth, "29/02/2000").is_err());
        assert!(FieldValue::parse(Field::PhotoFile, "me.png").is_err());
    }

    #[test]
    fn gender_accepts_only_form_options() {
        assert_eq!(
            FieldValue::parse(Field::Gender, "Other").unwrap(),
            FieldValue::Gender(Some(Gender::Other))
        );
        assert_eq!(
            FieldValue::parse(Field::Gender, " female ").unwrap(),
            FieldValue::Gender(Some(Gender::Female))
        );
        assert_eq!(FieldValue::parse(Field::Gender, "").unwrap(), FieldValue::Gender(None));
        assert!(matches!(
            FieldValue::parse(Field::Gender, "banana"),
            Err(RegistrationError::UnsupportedGender(value)) if value == "banana"
        ));
    }

    #[test]
    fn document_from_path_infers_media_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Citizenship.JPG");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"not really a jpeg").unwrap();

        let doc = DocumentFile::from_path(&path).unwrap();
        assert_eq!(doc.name, "Citizenship.JPG");
        assert_eq!(doc.media_type, "image/jpeg");
        assert!(doc.has_accepted_type());

        let txt = dir.path().join("notes.txt");
        std::fs::File::create(&txt).unwrap();
        assert!(!DocumentFile::from_path(&txt).unwrap().has_accepted_type());
    }

    #[test]
    fn document_from_path_rejects_directories() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            DocumentFile::from_path(dir.path()),
            Err(RegistrationError::NotAFile(_))
        ));
        assert!(matches!(
            DocumentFile::from_path(&dir.path().join("missing.pdf")),
            Err(RegistrationError::IoError(_))
        ));
    }
}
