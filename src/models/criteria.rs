//! Search criteria model.
//!
//! [`SearchCriteria`] is an immutable bag of optional filters. Absent fields
//! place no constraint on the search; an empty bag matches every employee
//! the caller is allowed to see.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::EmployeeId;

/// Optional filters describing an employee search.
///
/// Construction never fails and performs no validation.
///
/// # Example
///
/// ```
/// use personnel_records::models::SearchCriteria;
///
/// let criteria = SearchCriteria::new()
///     .with_last_name("Sm")
///     .with_ssn_fragment("6789");
///
/// assert_eq!(criteria.last_name(), Some("Sm"));
/// assert_eq!(criteria.populated_fields(), 2);
/// assert!(SearchCriteria::new().is_empty());
/// ```
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    #[serde(default)]
    employee_id: Option<EmployeeId>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    ssn_fragment: Option<String>,
}

impl SearchCriteria {
    /// Creates criteria with no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Criteria matching exactly one employee id.
    pub fn by_employee_id(employee_id: EmployeeId) -> Self {
        Self::new().with_employee_id(employee_id)
    }

    /// Builds criteria from raw form input, treating blank strings as absent.
    pub fn from_form(
        employee_id: Option<EmployeeId>,
        first_name: Option<&str>,
        last_name: Option<&str>,
        date_of_birth: Option<NaiveDate>,
        ssn_fragment: Option<&str>,
    ) -> Self {
        Self {
            employee_id,
            first_name: non_blank(first_name),
            last_name: non_blank(last_name),
            date_of_birth,
            ssn_fragment: non_blank(ssn_fragment),
        }
    }

    /// Constrains the search to one employee id.
    pub fn with_employee_id(mut self, employee_id: EmployeeId) -> Self {
        self.employee_id = Some(employee_id);
        self
    }

    /// Constrains first names to those starting with `prefix`.
    pub fn with_first_name(mut self, prefix: impl Into<String>) -> Self {
        self.first_name = Some(prefix.into());
        self
    }

    /// Constrains last names to those starting with `prefix`.
    pub fn with_last_name(mut self, prefix: impl Into<String>) -> Self {
        self.last_name = Some(prefix.into());
        self
    }

    /// Constrains the date of birth exactly.
    pub fn with_date_of_birth(mut self, date_of_birth: NaiveDate) -> Self {
        self.date_of_birth = Some(date_of_birth);
        self
    }

    /// Constrains SSNs to those ending in `fragment`.
    pub fn with_ssn_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.ssn_fragment = Some(fragment.into());
        self
    }

    /// The requested employee id.
    pub fn employee_id(&self) -> Option<EmployeeId> {
        self.employee_id
    }

    /// The requested first-name prefix.
    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    /// The requested last-name prefix.
    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    /// The requested date of birth.
    pub fn date_of_birth(&self) -> Option<NaiveDate> {
        self.date_of_birth
    }

    /// The requested SSN suffix.
    pub fn ssn_fragment(&self) -> Option<&str> {
        self.ssn_fragment.as_deref()
    }

    /// Number of fields carrying a constraint.
    pub fn populated_fields(&self) -> usize {
        [
            self.employee_id.is_some(),
            self.first_name.is_some(),
            self.last_name.is_some(),
            self.date_of_birth.is_some(),
            self.ssn_fragment.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }

    /// Returns true when no field is constrained.
    pub fn is_empty(&self) -> bool {
        self.populated_fields() == 0
    }
}

// The SSN fragment is sensitive and must not reach logs through `{:?}`.
impl std::fmt::Debug for SearchCriteria {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchCriteria")
            .field("employee_id", &self.employee_id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("date_of_birth", &self.date_of_birth)
            .field(
                "ssn_fragment",
                &self.ssn_fragment.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
