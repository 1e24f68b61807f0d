pub mod error;

pub use error::RegistrationError;
