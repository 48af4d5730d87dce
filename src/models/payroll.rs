//! Payroll line model.
//!
//! This module contains the [`PayStatement`] type: one payroll line joined
//! with the employee's display name. Net pay is derived on demand and never
//! stored.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EmployeeId;

/// One payroll line for one employee on one pay date.
///
/// # Example
///
/// ```
/// use personnel_records::models::PayStatement;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let statement = PayStatement {
///     payroll_id: 1,
///     employee_id: 101,
///     employee_name: "John Smith".to_string(),
///     pay_date: NaiveDate::from_ymd_opt(2026, 10, 15).unwrap(),
///     earnings: Decimal::from_str("1000.00").unwrap(),
///     federal_tax: Decimal::from_str("100.00").unwrap(),
///     federal_medicare: Decimal::from_str("14.50").unwrap(),
///     federal_social_security: Decimal::from_str("62.00").unwrap(),
///     state_tax: Decimal::from_str("40.00").unwrap(),
///     retirement: Decimal::from_str("50.00").unwrap(),
///     healthcare: Decimal::from_str("30.00").unwrap(),
/// };
///
/// assert_eq!(statement.net_pay(), Decimal::from_str("703.50").unwrap());
/// assert_eq!(statement.formatted_pay_date(), "10/15/2026");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayStatement {
    /// Payroll line id.
    pub payroll_id: u32,
    /// The employee this line was paid to.
    pub employee_id: EmployeeId,
    /// "First Last" of the employee.
    pub employee_name: String,
    /// The pay date.
    pub pay_date: NaiveDate,
    /// Gross earnings.
    pub earnings: Decimal,
    /// Federal income tax withheld.
    pub federal_tax: Decimal,
    /// Federal medicare withheld.
    pub federal_medicare: Decimal,
    /// Federal social security withheld.
    pub federal_social_security: Decimal,
    /// State income tax withheld.
    pub state_tax: Decimal,
    /// Retirement plan contribution.
    pub retirement: Decimal,
    /// Healthcare premium.
    pub healthcare: Decimal,
}

impl PayStatement {
    /// Sum of the six deductions.
    pub fn total_deductions(&self) -> Decimal {
        self.federal_tax
            + self.federal_medicare
            + self.federal_social_security
            + self.state_tax
            + self.retirement
            + self.healthcare
    }

    /// Earnings minus all deductions. Not clamped: may be negative.
    pub fn net_pay(&self) -> Decimal {
        self.earnings - self.total_deductions()
    }

    /// The pay date as `MM/DD/YYYY`.
    pub fn formatted_pay_date(&self) -> String {
        self.pay_date.format("%m/%d/%Y").to_string()
    }
}
