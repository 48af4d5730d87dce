//! Access policy for every engine operation.
//!
//! This module holds the single decision table consulted by each entry
//! point before any query is composed. A refusal is an explicit
//! [`Decision::Deny`], never an empty result.
//!
//! | Role     | Search | Lookup by id | Grouped reports | Payroll history |
//! |----------|--------|--------------|-----------------|-----------------|
//! | Admin    | all    | any id       | yes             | all employees   |
//! | Employee | no     | own id only  | no              | own rows only   |

use crate::error::{RecordsError, RecordsResult};
use crate::models::{CallerIdentity, EmployeeId, GroupingDimension, Role};

/// The shape of an operation a caller asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Search by arbitrary criteria.
    Search,
    /// Fetch one employee by id.
    LookupById {
        /// The requested employee.
        employee_id: EmployeeId,
    },
    /// Earnings totals grouped by a dimension.
    GroupedReport(GroupingDimension),
    /// Earnings totals whose dimension has not been parsed yet.
    AnyGroupedReport,
    /// Pay statement history.
    PayrollHistory,
}

impl Operation {
    /// The name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Search => "search_employees",
            Operation::LookupById { .. } => "lookup_employee",
            Operation::GroupedReport(GroupingDimension::JobTitle) => "total_pay_by_job_title",
            Operation::GroupedReport(GroupingDimension::Division) => "total_pay_by_division",
            Operation::AnyGroupedReport => "grouped_totals",
            Operation::PayrollHistory => "payroll_history",
        }
    }
}

/// The rows an authorized operation may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// No narrowing.
    All,
    /// Only rows belonging to this employee.
    Employee(EmployeeId),
}

/// Outcome of a policy check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Proceed, narrowed to the scope.
    Permit(Scope),
    /// Refuse.
    Deny,
}

/// Decides whether `caller` may perform `operation`, and over which rows.
///
/// # Example
///
/// ```
/// use personnel_records::models::CallerIdentity;
/// use personnel_records::policy::{authorize, Decision, Operation, Scope};
///
/// let caller = CallerIdentity::employee(101);
/// assert_eq!(
///     authorize(&caller, &Operation::PayrollHistory),
///     Decision::Permit(Scope::Employee(101))
/// );
/// assert_eq!(authorize(&caller, &Operation::Search), Decision::Deny);
/// ```
pub fn authorize(caller: &CallerIdentity, operation: &Operation) -> Decision {
    match (caller.role(), operation) {
        (Role::Admin, _) => Decision::Permit(Scope::All),
        (Role::Employee, Operation::Search) => Decision::Deny,
        (Role::Employee, Operation::GroupedReport(_) | Operation::AnyGroupedReport) => {
            Decision::Deny
        }
        (Role::Employee, Operation::LookupById { employee_id }) => {
            match caller.employee_id() {
                Some(own) if own == *employee_id => Decision::Permit(Scope::Employee(own)),
                _ => Decision::Deny,
            }
        }
        (Role::Employee, Operation::PayrollHistory) => match caller.employee_id() {
            Some(own) => Decision::Permit(Scope::Employee(own)),
            None => Decision::Deny,
        },
    }
}

/// Like [`authorize`], but turns a denial into [`RecordsError::AccessDenied`].
pub fn require(caller: &CallerIdentity, operation: &Operation) -> RecordsResult<Scope> {
    match authorize(caller, operation) {
        Decision::Permit(scope) => Ok(scope),
        Decision::Deny => Err(RecordsError::access_denied(operation.name(), caller.role())),
    }
}
