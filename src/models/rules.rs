use crate::utils::RegistrationError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Countries an overseas voter can currently reside in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Country {
    Nepal,
    USA,
    Canada,
    Australia,
    UK,
    Germany,
}

lazy_static! {
    static ref PHONE_PATTERNS: HashMap<Country, Regex> = Country::ALL
        .iter()
        .map(|country| (*country, Regex::new(&country.phone_pattern()).unwrap()))
        .collect();
}

impl Country {
    pub const ALL: [Country; 6] = [
        Country::Nepal,
        Country::USA,
        Country::Canada,
        Country::Australia,
        Country::UK,
        Country::Germany,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Country::Nepal => "Nepal",
            Country::USA => "USA",
            Country::Canada => "Canada",
            Country::Australia => "Australia",
            Country::UK => "UK",
            Country::Germany => "Germany",
        }
    }

    pub fn dialing_code(&self) -> &'static str {
        match self {
            Country::Nepal => "+977",
            Country::USA => "+1",
            Country::Canada => "+1",
            Country::Australia => "+61",
            Country::UK => "+44",
            Country::Germany => "+49",
        }
    }

    /// Inclusive range of digits expected after the dialing code.
    pub fn subscriber_digits(&self) -> (usize, usize) {
        match self {
            Country::Nepal => (10, 10),
            Country::USA => (10, 10),
            Country::Canada => (10, 10),
            Country::Australia => (9, 9),
            Country::UK => (10, 10),
            Country::Germany => (10, 11),
        }
    }

    pub fn phone_pattern(&self) -> String {
        let code = self.dialing_code().trim_start_matches('+');
        match self.subscriber_digits() {
            (min, max) if min == max => format!(r"^\+{}\d{{{}}}$", code, min),
            (min, max) => format!(r"^\+{}\d{{{},{}}}$", code, min, max),
        }
    }

    pub fn phone_matches(&self, phone: &str) -> bool {
        PHONE_PATTERNS
            .get(self)
            .map(|pattern| pattern.is_match(phone))
            .unwrap_or(false)
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Country {
    type Err = RegistrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Country::ALL
            .iter()
            .find(|country| country.name().eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| RegistrationError::UnsupportedCountry(wanted.to_string()))
    }
}
