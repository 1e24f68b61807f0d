pub mod birth_date;
pub mod documents;
pub mod format;
pub mod phone;

pub use birth_date::BirthDateValidator;
pub use documents::DocumentValidator;
pub use format::FormatValidator;
pub use phone::PhoneValidator;
