//! Employee search service.

use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::error::{RecordsError, RecordsResult};
use crate::models::{CallerIdentity, EmployeeId, EmployeeRecord, SearchCriteria};
use crate::policy::{Operation, Scope};
use crate::query::QueryComposer;
use crate::storage::PersonnelStore;

use super::{gate, in_operation};

/// Role-gated employee search.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use personnel_records::error::RecordsError;
/// use personnel_records::models::{CallerIdentity, SearchCriteria};
/// use personnel_records::query::QueryComposer;
/// use personnel_records::service::SearchService;
/// use personnel_records::storage::{Dataset, SqliteStore};
///
/// let store = Arc::new(SqliteStore::from_dataset(&Dataset::default()).unwrap());
/// let service = SearchService::new(store, QueryComposer::default());
///
/// let admin = CallerIdentity::admin();
/// assert!(service.search(&admin, &SearchCriteria::new()).unwrap().is_empty());
///
/// let employee = CallerIdentity::employee(101);
/// assert!(matches!(
///     service.search(&employee, &SearchCriteria::new()),
///     Err(RecordsError::AccessDenied { .. })
/// ));
/// ```
#[derive(Clone)]
pub struct SearchService {
    store: Arc<dyn PersonnelStore>,
    composer: QueryComposer,
}

impl SearchService {
    /// Creates a search service over `store`.
    pub fn new(store: Arc<dyn PersonnelStore>, composer: QueryComposer) -> Self {
        Self { store, composer }
    }

    /// Searches employees by arbitrary criteria.
    ///
    /// An empty result is a normal outcome. Callers without search rights
    /// get `AccessDenied` before any query runs.
    pub fn search(
        &self,
        caller: &CallerIdentity,
        criteria: &SearchCriteria,
    ) -> RecordsResult<Vec<EmployeeRecord>> {
        let operation = Operation::Search;
        let criteria = match gate(caller, &operation)? {
            Scope::All => criteria.clone(),
            Scope::Employee(own) => SearchCriteria::by_employee_id(own),
        };
        self.execute(caller, &operation, &criteria)
    }

    /// Fetches one employee by id.
    ///
    /// Runs the general search with only the id populated and returns the
    /// first row. `NotFound` when no row matches; `AccessDenied` when an
    /// employee asks for anyone but themselves.
    pub fn find_by_id(
        &self,
        caller: &CallerIdentity,
        employee_id: EmployeeId,
    ) -> RecordsResult<EmployeeRecord> {
        let operation = Operation::LookupById { employee_id };
        let target = match gate(caller, &operation)? {
            Scope::All => employee_id,
            Scope::Employee(own) => own,
        };

        self.execute(caller, &operation, &SearchCriteria::by_employee_id(target))?
            .into_iter()
            .next()
            .ok_or(RecordsError::NotFound {
                employee_id: target,
            })
    }

    /// Fetches the caller's own record.
    ///
    /// Callers without an associated employee id get `InvalidInput`.
    pub fn view_own_record(&self, caller: &CallerIdentity) -> RecordsResult<EmployeeRecord> {
        let own = caller.employee_id().ok_or_else(|| {
            RecordsError::invalid_input(
                "employee_id",
                "caller has no associated employee record",
            )
        })?;
        self.find_by_id(caller, own)
    }

    fn execute(
        &self,
        caller: &CallerIdentity,
        operation: &Operation,
        criteria: &SearchCriteria,
    ) -> RecordsResult<Vec<EmployeeRecord>> {
        let start_time = Instant::now();
        let query = self.composer.compose(criteria);

        let records = self
            .store
            .fetch_employees(&query)
            .map_err(|e| in_operation(e, operation))?;

        info!(
            operation = operation.name(),
            role = %caller.role(),
            clauses = query.clauses().len(),
            rows = records.len(),
            duration_us = start_time.elapsed().as_micros(),
            "Employee search completed"
        );
        Ok(records)
    }
}
