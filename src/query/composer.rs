//! Query composition.
//!
//! The [`QueryComposer`] turns search criteria and authorized scopes into
//! parameterized queries. Composition is a pure transform and cannot fail.

use crate::models::{GroupingDimension, ReportPeriod, SearchCriteria};
use crate::policy::Scope;

use super::clause::{BoundValue, Clause, Column, NameMatching};
use super::report::{EarningsTotalsQuery, PayrollHistoryQuery};

/// Every search selects through one set of outer joins so that employees
/// without an address, division or job title still come back.
const EMPLOYEE_SELECT: &str = "SELECT e.empid, e.first_name, e.last_name, e.dob, e.ssn, e.salary, \
jt.job_title, d.div_name AS division, \
a.street, ci.city_name, st.state_abbr, a.zip, a.mobile \
FROM employees e \
LEFT JOIN addresses a ON e.empid = a.empid \
LEFT JOIN cities ci ON a.city_id = ci.city_id \
LEFT JOIN states st ON ci.state_id = st.state_id \
LEFT JOIN employee_division ed ON e.empid = ed.empid \
LEFT JOIN division d ON ed.div_id = d.div_id \
LEFT JOIN employee_job_titles ejt ON e.empid = ejt.empid \
LEFT JOIN job_titles jt ON ejt.job_title_id = jt.job_title_id \
WHERE 1=1";

/// A composed employee search: AND-combined clauses over the joined rows.
///
/// # Example
///
/// ```
/// use personnel_records::models::SearchCriteria;
/// use personnel_records::query::{BoundValue, QueryComposer};
///
/// let query = QueryComposer::default().compose(&SearchCriteria::by_employee_id(101));
/// assert!(query.sql().ends_with("WHERE 1=1 AND e.empid = ?"));
/// assert_eq!(query.parameters(), vec![BoundValue::Integer(101)]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeQuery {
    clauses: Vec<Clause>,
}

impl EmployeeQuery {
    /// The ordered clauses.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Returns true when no clause constrains the search.
    pub fn matches_all(&self) -> bool {
        self.clauses.is_empty()
    }

    /// The SQL text, with one `?` per clause.
    pub fn sql(&self) -> String {
        let mut sql = String::from(EMPLOYEE_SELECT);
        for clause in &self.clauses {
            sql.push_str(" AND ");
            sql.push_str(&clause.render());
        }
        sql
    }

    /// The bound parameters in placeholder order.
    pub fn parameters(&self) -> Vec<BoundValue> {
        self.clauses.iter().map(Clause::parameter).collect()
    }
}

/// Builds parameterized queries under a name-matching policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryComposer {
    name_matching: NameMatching,
}

impl QueryComposer {
    /// Creates a composer with the given name-matching policy.
    pub fn new(name_matching: NameMatching) -> Self {
        Self { name_matching }
    }

    /// The name-matching policy in effect.
    pub fn name_matching(&self) -> NameMatching {
        self.name_matching
    }

    /// Composes an employee search.
    ///
    /// Each present field contributes exactly one clause, in the order
    /// id, first name, last name, date of birth, SSN fragment.
    ///
    /// The SSN fragment is matched as a suffix. This is the loosest match in
    /// the engine: a short fragment can match many employees.
    pub fn compose(&self, criteria: &SearchCriteria) -> EmployeeQuery {
        let fold_case = self.name_matching == NameMatching::CaseInsensitive;
        let mut clauses = Vec::with_capacity(criteria.populated_fields());

        if let Some(id) = criteria.employee_id() {
            clauses.push(Clause::exact(
                Column::EmployeeId,
                BoundValue::Integer(i64::from(id)),
            ));
        }
        if let Some(first_name) = criteria.first_name() {
            clauses.push(Clause::prefix(Column::FirstName, first_name, fold_case));
        }
        if let Some(last_name) = criteria.last_name() {
            clauses.push(Clause::prefix(Column::LastName, last_name, fold_case));
        }
        if let Some(dob) = criteria.date_of_birth() {
            clauses.push(Clause::exact(Column::DateOfBirth, BoundValue::Date(dob)));
        }
        if let Some(fragment) = criteria.ssn_fragment() {
            clauses.push(Clause::suffix(Column::Ssn, fragment));
        }

        EmployeeQuery { clauses }
    }

    /// Composes the pay statement history query for an authorized scope.
    pub fn payroll_history(&self, scope: Scope) -> PayrollHistoryQuery {
        match scope {
            Scope::All => PayrollHistoryQuery::all(),
            Scope::Employee(id) => PayrollHistoryQuery::for_employee(id),
        }
    }

    /// Composes the grouped earnings query.
    pub fn earnings_totals(
        &self,
        period: ReportPeriod,
        dimension: GroupingDimension,
    ) -> EarningsTotalsQuery {
        EarningsTotalsQuery::new(period, dimension)
    }
}
