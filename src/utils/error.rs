use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Unsupported country: {0}")]
    UnsupportedCountry(String),
    #[error("Unsupported gender: {0}")]
    UnsupportedGender(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Unknown field: {0}")]
    UnknownField(String),
    #[error("Not a document file: {0}")]
    NotAFile(String),
}
