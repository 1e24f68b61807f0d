use crate::models::FieldVerdict;
use chrono::{Datelike, NaiveDate};

pub const MINIMUM_VOTING_AGE: i32 = 18;

pub const DOB_REQUIRED: &str = "DOB required.";
pub const DOB_IN_FUTURE: &str = "DOB must be in the past.";
pub const UNDERAGE: &str = "Must be at least 18 years old.";

pub struct BirthDateValidator;

impl BirthDateValidator {
    pub fn validate(date_of_birth: Option<NaiveDate>, today: NaiveDate) -> FieldVerdict {
        let date = match date_of_birth {
            Some(date) => date,
            None => return FieldVerdict::invalid(DOB_REQUIRED),
        };

        if date > today {
            return FieldVerdict::invalid(DOB_IN_FUTURE);
        }

        FieldVerdict::check(Self::age_on(date, today) >= MINIMUM_VOTING_AGE, UNDERAGE)
    }

    // Whole years elapsed. A 29 February birthday counts as reached on 1 March
    // in non-leap years.
    pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
        let birthday_pending =
            (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day());
        today.year() - date_of_birth.year() - if birthday_pending { 1 } else { 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn missing_date_is_required() {
        assert_eq!(
            BirthDateValidator::validate(None, date(2026, 10, 19)).message(),
            Some(DOB_REQUIRED)
        );
    }

    #[test]
    fn future_date_rejected() {
        assert_eq!(
            BirthDateValidator::validate(Some(date(2026, 10, 20)), date(2026, 10, 19)).message(),
            Some(DOB_IN_FUTURE)
        );
    }

    #[test]
    fn born_today_is_not_future_but_underage() {
        let today = date(2026, 10, 19);
        assert_eq!(BirthDateValidator::validate(Some(today), today).message(), Some(UNDERAGE));
    }

    #[test]
    fn eighteenth_birthday_boundary() {
        let today = date(2026, 10, 19);
        assert!(BirthDateValidator::validate(Some(date(2008, 10, 19)), today).is_valid());
        assert_eq!(
            BirthDateValidator::validate(Some(date(2008, 10, 20)), today).message(),
            Some(UNDERAGE)
        );
    }

    #[test]
    fn leap_day_birthday_reached_on_first_of_march() {
        let dob = date(2008, 2, 29);
        assert_eq!(BirthDateValidator::age_on(dob, date(2026, 2, 28)), 17);
        assert_eq!(BirthDateValidator::age_on(dob, date(2026, 3, 1)), 18);
        assert_eq!(BirthDateValidator::age_on(dob, date(2028, 2, 29)), 20);
    }
}
