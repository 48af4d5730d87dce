//! Storage collaborator boundary.
//!
//! The engine talks to storage only through [`PersonnelStore`], handing it
//! composed, parameterized queries. Every operation is a read: nothing in
//! this crate mutates employee, division, job title or payroll data.
//!
//! [`SqliteStore`] is the bundled implementation: tables read by
//! [`DatasetLoader`] are loaded into an embedded SQLite database and every
//! composed query runs there as prepared SQL.

mod loader;
mod sqlite;
mod tables;

pub use loader::DatasetLoader;
pub use sqlite::SqliteStore;
pub use tables::{
    AddressRow, CityRow, Dataset, DivisionRow, EmployeeDivisionRow, EmployeeJobTitleRow,
    EmployeeRow, JobTitleRow, PayrollRow, StateRow,
};

use crate::error::RecordsResult;
use crate::models::{EmployeeRecord, GroupTotal, PayStatement};
use crate::query::{EarningsTotalsQuery, EmployeeQuery, PayrollHistoryQuery};

/// Executes composed queries against personnel storage.
///
/// Implementations acquire whatever connection they need per call and
/// release it before returning, on success and on failure. Failures are
/// reported as [`crate::error::RecordsError::StorageFailure`] and are never
/// retried by the engine.
pub trait PersonnelStore: Send + Sync {
    /// Runs an employee search, returning rows in storage order.
    fn fetch_employees(&self, query: &EmployeeQuery) -> RecordsResult<Vec<EmployeeRecord>>;

    /// Runs a pay statement history query, ordered by employee id then pay date.
    fn fetch_pay_statements(&self, query: &PayrollHistoryQuery)
    -> RecordsResult<Vec<PayStatement>>;

    /// Sums earnings per group label. Order is unspecified.
    fn sum_earnings(&self, query: &EarningsTotalsQuery) -> RecordsResult<Vec<GroupTotal>>;
}
