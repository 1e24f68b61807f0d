//! Serialized hand-off of a validated record to the next step of the flow.

use crate::models::RegistrationRecord;
use crate::utils::RegistrationError;
use serde::Serialize;
use std::path::Path;

pub const SESSION_KEY: &str = "voterRegistrationData";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Handoff {
    pub key: &'static str,
    pub payload: String,
}

impl Handoff {
    pub fn from_record(record: &RegistrationRecord) -> Result<Self, RegistrationError> {
        Ok(Handoff {
            key: SESSION_KEY,
            payload: serde_json::to_string(record)?,
        })
    }
}

pub fn restore(payload: &str) -> Result<RegistrationRecord, RegistrationError> {
    Ok(serde_json::from_str(payload)?)
}

pub fn load_record(path: &Path) -> Result<RegistrationRecord, RegistrationError> {
    let contents = std::fs::read_to_string(path)?;
    log::debug!("Loaded {} bytes of record data from {:?}", contents.len(), path);
    restore(&contents)
}
