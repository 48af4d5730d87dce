//! Payroll report aggregation.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use rust_decimal::Decimal;
use tracing::info;

use crate::error::RecordsResult;
use crate::models::{
    CallerIdentity, GroupTotal, GroupedReport, GroupingDimension, PayStatement, ReportPeriod,
};
use crate::policy::Operation;
use crate::query::QueryComposer;
use crate::storage::PersonnelStore;

use super::{gate, in_operation};

/// Role-gated payroll reports.
#[derive(Clone)]
pub struct ReportAggregator {
    store: Arc<dyn PersonnelStore>,
    composer: QueryComposer,
}

impl ReportAggregator {
    /// Creates a report aggregator over `store`.
    pub fn new(store: Arc<dyn PersonnelStore>, composer: QueryComposer) -> Self {
        Self { store, composer }
    }

    /// Pay statement history, ordered by employee id then pay date.
    ///
    /// Admins see every employee. Employees see only their own lines: the
    /// restriction is applied in the query, not by filtering afterwards.
    pub fn payroll_history(&self, caller: &CallerIdentity) -> RecordsResult<Vec<PayStatement>> {
        let operation = Operation::PayrollHistory;
        let scope = gate(caller, &operation)?;
        let start_time = Instant::now();

        let query = self.composer.payroll_history(scope);
        let statements = self
            .store
            .fetch_pay_statements(&query)
            .map_err(|e| in_operation(e, &operation))?;

        info!(
            operation = operation.name(),
            role = %caller.role(),
            scoped = query.employee_id().is_some(),
            rows = statements.len(),
            duration_us = start_time.elapsed().as_micros(),
            "Payroll history generated"
        );
        Ok(statements)
    }

    /// Gross earnings for `period`, grouped by `dimension`.
    ///
    /// Admin only: any other caller gets `AccessDenied` before storage is
    /// touched. A period without payroll lines yields an empty report.
    pub fn grouped_totals(
        &self,
        caller: &CallerIdentity,
        period: ReportPeriod,
        dimension: GroupingDimension,
    ) -> RecordsResult<GroupedReport> {
        let operation = Operation::GroupedReport(dimension);
        gate(caller, &operation)?;
        let start_time = Instant::now();

        let query = self.composer.earnings_totals(period, dimension);
        let raw = self
            .store
            .sum_earnings(&query)
            .map_err(|e| in_operation(e, &operation))?;
        let report = GroupedReport {
            period,
            dimension,
            totals: rank_totals(raw),
        };

        info!(
            operation = operation.name(),
            period = %period,
            groups = report.totals.len(),
            grand_total = %report.grand_total(),
            duration_us = start_time.elapsed().as_micros(),
            "Grouped payroll report generated"
        );
        Ok(report)
    }

    /// Like [`Self::grouped_totals`], parsing the dimension and the `YYYY-MM`
    /// period first.
    ///
    /// The role gate runs before either is parsed, so a caller without report
    /// rights gets `AccessDenied` whatever they sent. Malformed input from an
    /// admin is `InvalidInput`. Storage is untouched in both cases.
    pub fn grouped_totals_for(
        &self,
        caller: &CallerIdentity,
        period: &str,
        dimension: &str,
    ) -> RecordsResult<GroupedReport> {
        gate(caller, &Operation::AnyGroupedReport)?;
        let dimension: GroupingDimension = dimension.parse()?;
        let period: ReportPeriod = period.parse()?;
        self.grouped_totals(caller, period, dimension)
    }

    /// Gross earnings for `period` by job title.
    pub fn total_pay_by_job_title(
        &self,
        caller: &CallerIdentity,
        period: ReportPeriod,
    ) -> RecordsResult<GroupedReport> {
        self.grouped_totals(caller, period, GroupingDimension::JobTitle)
    }

    /// Gross earnings for `period` by division.
    pub fn total_pay_by_division(
        &self,
        caller: &CallerIdentity,
        period: ReportPeriod,
    ) -> RecordsResult<GroupedReport> {
        self.grouped_totals(caller, period, GroupingDimension::Division)
    }
}

/// Merges totals sharing a label and orders them by total descending, then
/// label ascending.
///
/// The order never depends on the order the store returned rows in.
///
/// # Example
///
/// ```
/// use personnel_records::models::GroupTotal;
/// use personnel_records::service::rank_totals;
/// use rust_decimal::Decimal;
///
/// let ranked = rank_totals(vec![
///     GroupTotal::new("Engineer", Decimal::new(500, 0)),
///     GroupTotal::new("Clerk", Decimal::new(500, 0)),
///     GroupTotal::new("Manager", Decimal::new(700, 0)),
/// ]);
/// let labels: Vec<&str> = ranked.iter().map(|t| t.label.as_str()).collect();
/// assert_eq!(labels, vec!["Manager", "Clerk", "Engineer"]);
/// ```
pub fn rank_totals(totals: Vec<GroupTotal>) -> Vec<GroupTotal> {
    let mut merged: BTreeMap<String, Decimal> = BTreeMap::new();
    for GroupTotal { label, total } in totals {
        *merged.entry(label).or_insert(Decimal::ZERO) += total;
    }

    let mut ranked: Vec<GroupTotal> = merged
        .into_iter()
        .map(|(label, total)| GroupTotal { label, total })
        .collect();
    ranked.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.label.cmp(&b.label)));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecordsError;
    use crate::service::test_support::{CannedTotalsStore, FailingStore, fixture_store};
    use crate::storage::SqliteStore;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn october() -> ReportPeriod {
        ReportPeriod::new(2026, 10).unwrap()
    }

    fn create_aggregator(store: Arc<SqliteStore>) -> ReportAggregator {
        ReportAggregator::new(store, QueryComposer::default())
    }

    fn labels(report: &GroupedReport) -> Vec<&str> {
        report.totals.iter().map(|t| t.label.as_str()).collect()
    }

    #[test]
    fn test_rank_totals_breaks_ties_by_label() {
        let ranked = rank_totals(vec![
            GroupTotal::new("Engineer", dec("500")),
            GroupTotal::new("Clerk", dec("500")),
            GroupTotal::new("Manager", dec("700")),
        ]);
        assert_eq!(
            ranked,
            vec![
                GroupTotal::new("Manager", dec("700")),
                GroupTotal::new("Clerk", dec("500")),
                GroupTotal::new("Engineer", dec("500")),
            ]
        );
    }

    #[test]
    fn test_rank_totals_ignores_input_order() {
        let forward = rank_totals(vec![
            GroupTotal::new("B", dec("1")),
            GroupTotal::new("A", dec("1")),
            GroupTotal::new("C", dec("2")),
        ]);
        let backward = rank_totals(vec![
            GroupTotal::new("C", dec("2")),
            GroupTotal::new("A", dec("1")),
            GroupTotal::new("B", dec("1")),
        ]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_rank_totals_merges_duplicate_labels() {
        let ranked = rank_totals(vec![
            GroupTotal::new("Clerk", dec("100")),
            GroupTotal::new("Clerk", dec("250.50")),
        ]);
        assert_eq!(ranked, vec![GroupTotal::new("Clerk", dec("350.50"))]);
    }

    #[test]
    fn test_rank_totals_empty() {
        assert!(rank_totals(Vec::new()).is_empty());
    }

    #[test]
    fn test_admin_totals_by_job_title() {
        let aggregator = create_aggregator(fixture_store());
        let report = aggregator
            .total_pay_by_job_title(&CallerIdentity::admin(), october())
            .unwrap();

        assert_eq!(
            labels(&report),
            vec!["Manager", "Clerk", "Engineer", "Account Executive"]
        );
        assert_eq!(report.total_for("Manager"), Some(dec("10000.00")));
        assert_eq!(report.total_for("Clerk"), Some(dec("7000.00")));
        assert_eq!(report.total_for("Engineer"), Some(dec("7000.00")));
        assert_eq!(report.total_for("Account Executive"), Some(dec("3666.67")));
    }

    #[test]
    fn test_admin_totals_by_division() {
        let aggregator = create_aggregator(fixture_store());
        let report = aggregator
            .total_pay_by_division(&CallerIdentity::admin(), october())
            .unwrap();

        assert_eq!(labels(&report), vec!["Engineering", "Operations", "Sales"]);
        assert_eq!(report.total_for("Engineering"), Some(dec("17000.00")));
        assert_eq!(report.grand_total(), dec("27666.67"));
    }

    #[test]
    fn test_totals_sum_earnings_not_net_pay() {
        let aggregator = create_aggregator(fixture_store());
        let september = ReportPeriod::new(2026, 9).unwrap();
        let report = aggregator
            .total_pay_by_job_title(&CallerIdentity::admin(), september)
            .unwrap();
        assert_eq!(report.total_for("Engineer"), Some(dec("3500.00")));
        assert_eq!(report.total_for("Clerk"), Some(dec("1750.00")));
    }

    #[test]
    fn test_empty_period_yields_empty_report() {
        let aggregator = create_aggregator(fixture_store());
        let period = ReportPeriod::new(2019, 1).unwrap();
        for dimension in GroupingDimension::ALL {
            let report = aggregator
                .grouped_totals(&CallerIdentity::admin(), period, dimension)
                .unwrap();
            assert!(report.is_empty());
            assert_eq!(report.grand_total(), Decimal::ZERO);
        }
    }

    #[test]
    fn test_employee_grouped_report_denied_without_storage_call() {
        let store = fixture_store();
        let aggregator = create_aggregator(store.clone());
        let caller = CallerIdentity::employee(101);

        for period in [october(), ReportPeriod::new(2019, 1).unwrap()] {
            for dimension in GroupingDimension::ALL {
                let result = aggregator.grouped_totals(&caller, period, dimension);
                assert!(
                    matches!(result, Err(RecordsError::AccessDenied { .. })),
                    "expected denial for {} {}",
                    period,
                    dimension
                );
            }
        }
        assert_eq!(store.query_count(), 0);
    }

    #[test]
    fn test_storage_order_does_not_leak_into_report() {
        let canned = CannedTotalsStore(vec![
            GroupTotal::new("Engineer", dec("500")),
            GroupTotal::new("Clerk", dec("500")),
            GroupTotal::new("Manager", dec("700")),
        ]);
        let aggregator = ReportAggregator::new(Arc::new(canned), QueryComposer::default());
        let report = aggregator
            .total_pay_by_job_title(&CallerIdentity::admin(), october())
            .unwrap();
        assert_eq!(labels(&report), vec!["Manager", "Clerk", "Engineer"]);
    }

    #[test]
    fn test_malformed_period_is_invalid_input_before_storage() {
        let store = fixture_store();
        let aggregator = create_aggregator(store.clone());
        let result =
            aggregator.grouped_totals_for(&CallerIdentity::admin(), "2026-13", "division");
        assert!(matches!(result, Err(RecordsError::InvalidInput { .. })));
        assert_eq!(store.query_count(), 0);
    }

    #[test]
    fn test_unknown_dimension_is_invalid_input_for_admin() {
        let aggregator = create_aggregator(fixture_store());
        let result = aggregator.grouped_totals_for(&CallerIdentity::admin(), "2026-10", "city");
        match result {
            Err(RecordsError::InvalidInput { field, .. }) => assert_eq!(field, "dimension"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_employee_denied_before_report_input_is_parsed() {
        let store = fixture_store();
        let aggregator = create_aggregator(store.clone());
        let caller = CallerIdentity::employee(101);

        for (period, dimension) in [
            ("2026-10", "division"),
            ("2026-13", "division"),
            ("not-a-period", "job_title"),
            ("2026-10", "city"),
            ("", ""),
        ] {
            let result = aggregator.grouped_totals_for(&caller, period, dimension);
            match result {
                Err(RecordsError::AccessDenied { operation, .. }) => {
                    assert_eq!(operation, "grouped_totals");
                }
                other => panic!(
                    "Expected AccessDenied for {:?} {:?}, got {:?}",
                    period, dimension, other
                ),
            }
        }
        assert_eq!(store.query_count(), 0);
    }

    #[test]
    fn test_grouped_totals_for_parses_period() {
        let aggregator = create_aggregator(fixture_store());
        let report = aggregator
            .grouped_totals_for(&CallerIdentity::admin(), "2026-10", "division")
            .unwrap();
        assert_eq!(report.period, october());
        assert_eq!(report.dimension, GroupingDimension::Division);
    }

    #[test]
    fn test_admin_history_covers_everyone_in_order() {
        let aggregator = create_aggregator(fixture_store());
        let history = aggregator
            .payroll_history(&CallerIdentity::admin())
            .unwrap();

        assert_eq!(history.len(), 12);
        let keys: Vec<_> = history.iter().map(|s| (s.employee_id, s.pay_date)).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(history[0].employee_id, 101);
        assert_eq!(history[0].employee_name, "John Smith");
    }

    #[test]
    fn test_employee_history_is_restricted_in_query() {
        let aggregator = create_aggregator(fixture_store());
        let history = aggregator
            .payroll_history(&CallerIdentity::employee(202))
            .unwrap();

        assert_eq!(history.len(), 4);
        assert!(history.iter().all(|s| s.employee_id == 202));
        assert_eq!(history[0].net_pay(), dec("-32.65"));
        assert_eq!(history[1].net_pay(), dec("1111.12"));
    }

    #[test]
    fn test_employee_without_payroll_gets_empty_history() {
        let aggregator = create_aggregator(fixture_store());
        let history = aggregator
            .payroll_history(&CallerIdentity::employee(606))
            .unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn test_report_storage_failure_names_operation() {
        let aggregator = ReportAggregator::new(Arc::new(FailingStore), QueryComposer::default());
        let result = aggregator.total_pay_by_division(&CallerIdentity::admin(), october());
        match result {
            Err(RecordsError::StorageFailure { operation, message }) => {
                assert_eq!(operation, "total_pay_by_division");
                assert!(message.contains("statement timeout"));
            }
            other => panic!("Expected StorageFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_repeated_report_is_idempotent() {
        let aggregator = create_aggregator(fixture_store());
        let caller = CallerIdentity::admin();
        let first = aggregator.total_pay_by_job_title(&caller, october()).unwrap();
        let second = aggregator.total_pay_by_job_title(&caller, october()).unwrap();
        assert_eq!(first, second);
    }
}
