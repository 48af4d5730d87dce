//! Employee record model.
//!
//! This module defines the read-only [`EmployeeRecord`] returned by searches
//! and the [`Ssn`] wrapper that keeps social security numbers out of logs.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Numeric employee identifier (`employees.empid`).
pub type EmployeeId = u32;

/// A social security number.
///
/// Serializes as the plain string so authorized callers receive it, but
/// `Debug` and `Display` never print the digits.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ssn(String);

impl Ssn {
    /// Wraps a raw SSN string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw SSN. Callers must not log the result.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// The SSN with every digit except the last four replaced by `*`.
    ///
    /// ```
    /// use personnel_records::models::Ssn;
    ///
    /// assert_eq!(Ssn::new("123-45-6789").masked(), "***-**-6789");
    /// ```
    pub fn masked(&self) -> String {
        let digits = self.0.chars().filter(char::is_ascii_digit).count();
        let mut seen = 0;
        self.0
            .chars()
            .map(|c| {
                if c.is_ascii_digit() {
                    seen += 1;
                    if digits - seen < 4 { c } else { '*' }
                } else {
                    c
                }
            })
            .collect()
    }
}

impl fmt::Debug for Ssn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Ssn(<redacted>)")
    }
}

impl fmt::Display for Ssn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

/// An employee as surfaced by a search.
///
/// Attributes that come from optional relations (address, city, state,
/// division, job title) are `None` when the relation is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Unique employee id.
    pub id: EmployeeId,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// Social security number.
    pub ssn: Ssn,
    /// Base salary.
    pub salary: Decimal,
    /// Current job title.
    pub job_title: Option<String>,
    /// Current division.
    pub division: Option<String>,
    /// Street address.
    pub street: Option<String>,
    /// City name.
    pub city: Option<String>,
    /// State abbreviation.
    pub state: Option<String>,
    /// Postal code.
    pub zip: Option<String>,
    /// Mobile phone number.
    pub mobile: Option<String>,
}

impl EmployeeRecord {
    /// Returns "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns true when an address row was on file.
    pub fn has_address(&self) -> bool {
        self.street.is_some() || self.zip.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_record() -> EmployeeRecord {
        EmployeeRecord {
            id: 101,
            first_name: "John".to_string(),
            last_name: "Smith".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1985, 3, 15).unwrap(),
            ssn: Ssn::new("123-45-6789"),
            salary: Decimal::new(8500000, 2),
            job_title: Some("Engineer".to_string()),
            division: None,
            street: None,
            city: None,
            state: None,
            zip: None,
            mobile: None,
        }
    }

    #[test]
    fn test_debug_never_prints_ssn() {
        let record = create_test_record();
        let debug = format!("{:?}", record);
        assert!(!debug.contains("6789"));
        assert!(debug.contains("Ssn(<redacted>)"));
    }

    #[test]
    fn test_display_masks_leading_digits() {
        assert_eq!(Ssn::new("123456789").to_string(), "*****6789");
        assert_eq!(Ssn::new("123-45-6789").to_string(), "***-**-6789");
    }

    #[test]
    fn test_masked_short_ssn_is_left_alone() {
        assert_eq!(Ssn::new("789").masked(), "789");
    }

    #[test]
    fn test_ssn_serializes_as_plain_string() {
        let json = serde_json::to_string(&create_test_record()).unwrap();
        assert!(json.contains("\"ssn\":\"123-45-6789\""));
    }

    #[test]
    fn test_full_name() {
        assert_eq!(create_test_record().full_name(), "John Smith");
    }

    #[test]
    fn test_has_address_false_without_relation() {
        assert!(!create_test_record().has_address());
    }
}
