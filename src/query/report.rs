//! Payroll report queries.

use crate::models::{EmployeeId, GroupingDimension, ReportPeriod};

use super::clause::BoundValue;

/// Pay statement history, optionally constrained to one employee.
///
/// The constraint is part of the query itself; callers never fetch every
/// row and filter afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayrollHistoryQuery {
    employee_id: Option<EmployeeId>,
}

impl PayrollHistoryQuery {
    /// History for every employee.
    pub fn all() -> Self {
        Self { employee_id: None }
    }

    /// History for one employee.
    pub fn for_employee(employee_id: EmployeeId) -> Self {
        Self {
            employee_id: Some(employee_id),
        }
    }

    /// The employee constraint, if any.
    pub fn employee_id(&self) -> Option<EmployeeId> {
        self.employee_id
    }

    /// The SQL text.
    pub fn sql(&self) -> String {
        let mut sql = String::from(
            "SELECT p.payroll_id, e.empid, e.first_name, e.last_name, \
p.pay_date, p.earnings, p.fed_tax, p.fed_med, p.fed_ss, \
p.state_tax, p.retire_401k, p.healthcare \
FROM payroll p JOIN employees e ON p.empid = e.empid",
        );
        if self.employee_id.is_some() {
            sql.push_str(" WHERE e.empid = ?");
        }
        sql.push_str(" ORDER BY e.empid, p.pay_date");
        sql
    }

    /// The bound parameters in placeholder order.
    pub fn parameters(&self) -> Vec<BoundValue> {
        self.employee_id
            .map(|id| BoundValue::Integer(i64::from(id)))
            .into_iter()
            .collect()
    }
}

/// Sum of earnings for one month, grouped by job title or division.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EarningsTotalsQuery {
    period: ReportPeriod,
    dimension: GroupingDimension,
}

impl EarningsTotalsQuery {
    /// Creates the query.
    pub fn new(period: ReportPeriod, dimension: GroupingDimension) -> Self {
        Self { period, dimension }
    }

    /// The reported month.
    pub fn period(&self) -> ReportPeriod {
        self.period
    }

    /// The grouping dimension.
    pub fn dimension(&self) -> GroupingDimension {
        self.dimension
    }

    /// The SQL text.
    pub fn sql(&self) -> String {
        let (label, joins, group_by) = match self.dimension {
            GroupingDimension::JobTitle => (
                "jt.job_title AS label",
                "JOIN employee_job_titles ejt ON e.empid = ejt.empid \
JOIN job_titles jt ON ejt.job_title_id = jt.job_title_id",
                "jt.job_title",
            ),
            GroupingDimension::Division => (
                "d.div_name AS label",
                "JOIN employee_division ed ON e.empid = ed.empid \
JOIN division d ON ed.div_id = d.div_id",
                "d.div_name",
            ),
        };
        format!(
            "SELECT {}, SUM(p.earnings) AS total_pay \
FROM payroll p JOIN employees e ON p.empid = e.empid {} \
WHERE p.pay_date BETWEEN ? AND ? \
GROUP BY {}",
            label, joins, group_by
        )
    }

    /// The bound parameters: first day of the month, then last day.
    pub fn parameters(&self) -> Vec<BoundValue> {
        let (first, last) = self.period.date_range();
        vec![BoundValue::Date(first), BoundValue::Date(last)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_unscoped_history_has_no_where() {
        let query = PayrollHistoryQuery::all();
        assert!(!query.sql().contains("WHERE"));
        assert!(query.sql().ends_with("ORDER BY e.empid, p.pay_date"));
        assert!(query.parameters().is_empty());
    }

    #[test]
    fn test_scoped_history_binds_employee() {
        let query = PayrollHistoryQuery::for_employee(202);
        assert!(query.sql().contains("WHERE e.empid = ? ORDER BY"));
        assert_eq!(query.parameters(), vec![BoundValue::Integer(202)]);
    }

    #[test]
    fn test_totals_by_job_title_sql() {
        let period = ReportPeriod::new(2026, 10).unwrap();
        let query = EarningsTotalsQuery::new(period, GroupingDimension::JobTitle);
        let sql = query.sql();
        assert!(sql.contains("SUM(p.earnings)"));
        assert!(sql.contains("GROUP BY jt.job_title"));
        assert!(sql.contains("WHERE p.pay_date BETWEEN ? AND ?"));
        assert_eq!(
            query.parameters(),
            vec![
                BoundValue::Date(NaiveDate::from_ymd_opt(2026, 10, 1).unwrap()),
                BoundValue::Date(NaiveDate::from_ymd_opt(2026, 10, 31).unwrap()),
            ]
        );
    }

    #[test]
    fn test_totals_by_division_sql() {
        let period = ReportPeriod::new(2026, 10).unwrap();
        let sql = EarningsTotalsQuery::new(period, GroupingDimension::Division).sql();
        assert!(sql.contains("GROUP BY d.div_name"));
        assert!(!sql.contains("2026"));
    }
}
