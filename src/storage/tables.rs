//! Normalized table rows loaded into the SQLite store.
//!
//! The row types mirror the personnel schema: `employees`, `addresses`,
//! `cities`, `states`, `division`, `employee_division`, `job_titles`,
//! `employee_job_titles` and `payroll`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{EmployeeId, Ssn};

/// A row of `employees`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EmployeeRow {
    /// Primary key.
    pub empid: EmployeeId,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Social security number.
    pub ssn: Ssn,
    /// Date of birth.
    pub dob: NaiveDate,
    /// Base salary.
    pub salary: Decimal,
}

/// A row of `addresses`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddressRow {
    /// Owning employee.
    pub empid: EmployeeId,
    /// Street line.
    pub street: String,
    /// City reference.
    pub city_id: u32,
    /// Postal code.
    pub zip: String,
    /// Mobile phone number.
    #[serde(default)]
    pub mobile: Option<String>,
}

/// A row of `cities`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CityRow {
    /// Primary key.
    pub city_id: u32,
    /// City name.
    pub city_name: String,
    /// State reference.
    pub state_id: u32,
}

/// A row of `states`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StateRow {
    /// Primary key.
    pub state_id: u32,
    /// Two-letter abbreviation.
    pub state_abbr: String,
}

/// A row of `division`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DivisionRow {
    /// Primary key.
    pub div_id: u32,
    /// Division name.
    pub div_name: String,
}

/// A row of `employee_division`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EmployeeDivisionRow {
    /// Employee reference.
    pub empid: EmployeeId,
    /// Division reference.
    pub div_id: u32,
}

/// A row of `job_titles`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JobTitleRow {
    /// Primary key.
    pub job_title_id: u32,
    /// Title text.
    pub job_title: String,
}

/// A row of `employee_job_titles`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EmployeeJobTitleRow {
    /// Employee reference.
    pub empid: EmployeeId,
    /// Job title reference.
    pub job_title_id: u32,
}

/// A row of `payroll`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PayrollRow {
    /// Primary key.
    pub payroll_id: u32,
    /// Employee reference.
    pub empid: EmployeeId,
    /// Pay date.
    pub pay_date: NaiveDate,
    /// Gross earnings.
    pub earnings: Decimal,
    /// Federal tax.
    pub fed_tax: Decimal,
    /// Federal medicare.
    pub fed_med: Decimal,
    /// Federal social security.
    pub fed_ss: Decimal,
    /// State tax.
    pub state_tax: Decimal,
    /// Retirement contribution.
    pub retire_401k: Decimal,
    /// Healthcare premium.
    pub healthcare: Decimal,
}

/// Every table of the personnel schema.
///
/// Each table defaults to empty so a YAML file may carry any subset.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Dataset {
    /// `employees`
    #[serde(default)]
    pub employees: Vec<EmployeeRow>,
    /// `addresses`
    #[serde(default)]
    pub addresses: Vec<AddressRow>,
    /// `cities`
    #[serde(default)]
    pub cities: Vec<CityRow>,
    /// `states`
    #[serde(default)]
    pub states: Vec<StateRow>,
    /// `division`
    #[serde(default)]
    pub division: Vec<DivisionRow>,
    /// `employee_division`
    #[serde(default)]
    pub employee_division: Vec<EmployeeDivisionRow>,
    /// `job_titles`
    #[serde(default)]
    pub job_titles: Vec<JobTitleRow>,
    /// `employee_job_titles`
    #[serde(default)]
    pub employee_job_titles: Vec<EmployeeJobTitleRow>,
    /// `payroll`
    #[serde(default)]
    pub payroll: Vec<PayrollRow>,
}

impl Dataset {
    /// Appends every row of `other`.
    pub fn merge(&mut self, other: Dataset) {
        self.employees.extend(other.employees);
        self.addresses.extend(other.addresses);
        self.cities.extend(other.cities);
        self.states.extend(other.states);
        self.division.extend(other.division);
        self.employee_division.extend(other.employee_division);
        self.job_titles.extend(other.job_titles);
        self.employee_job_titles.extend(other.employee_job_titles);
        self.payroll.extend(other.payroll);
    }
}
