pub mod form;
pub mod handoff;
pub mod models;
pub mod registration_validator;
pub mod utils;
pub mod validation;

pub use form::FormState;
pub use registration_validator::RegistrationValidator;
