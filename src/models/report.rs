//! Grouped payroll report models.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::RecordsError;

use super::ReportPeriod;

/// The attribute a grouped earnings report is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingDimension {
    /// Group by the employee's job title.
    JobTitle,
    /// Group by the employee's division.
    Division,
}

impl GroupingDimension {
    /// Every supported dimension.
    pub const ALL: [GroupingDimension; 2] = [GroupingDimension::JobTitle, GroupingDimension::Division];

    /// The name used in operation names and URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupingDimension::JobTitle => "job_title",
            GroupingDimension::Division => "division",
        }
    }
}

impl fmt::Display for GroupingDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupingDimension {
    type Err = RecordsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "job_title" => Ok(GroupingDimension::JobTitle),
            "division" => Ok(GroupingDimension::Division),
            _ => Err(RecordsError::invalid_input(
                "dimension",
                format!("unknown grouping dimension '{}'", s),
            )),
        }
    }
}

/// Total earnings for one dimension label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupTotal {
    /// The job title or division name.
    pub label: String,
    /// Sum of gross earnings.
    pub total: Decimal,
}

impl GroupTotal {
    /// Creates a group total.
    pub fn new(label: impl Into<String>, total: Decimal) -> Self {
        Self {
            label: label.into(),
            total,
        }
    }
}

/// Earnings totals for one period, ordered by total descending then label
/// ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedReport {
    /// The reported month.
    pub period: ReportPeriod,
    /// The grouping dimension.
    pub dimension: GroupingDimension,
    /// Ordered totals.
    pub totals: Vec<GroupTotal>,
}

impl GroupedReport {
    /// Sum of every group's total.
    pub fn grand_total(&self) -> Decimal {
        self.totals.iter().map(|t| t.total).sum()
    }

    /// Returns true when no payroll line fell in the period.
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Looks up the total for one label.
    pub fn total_for(&self, label: &str) -> Option<Decimal> {
        self.totals
            .iter()
            .find(|t| t.label == label)
            .map(|t| t.total)
    }
}
