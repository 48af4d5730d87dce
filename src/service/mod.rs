//! Search and report services.
//!
//! Both services follow the same path for every call: consult the access
//! policy, compose a query narrowed to the permitted scope, execute it
//! against the store, and hand back value records.

mod reports;
mod search;

pub use reports::{ReportAggregator, rank_totals};
pub use search::SearchService;

use tracing::warn;

use crate::error::RecordsError;
use crate::models::CallerIdentity;
use crate::policy::{self, Operation, Scope};

/// Runs the policy gate, logging refusals.
fn gate(caller: &CallerIdentity, operation: &Operation) -> Result<Scope, RecordsError> {
    policy::require(caller, operation).inspect_err(|_| {
        warn!(
            operation = operation.name(),
            role = %caller.role(),
            caller_employee_id = ?caller.employee_id(),
            "Access denied"
        );
    })
}

/// Re-labels a storage failure with the engine operation that issued it.
fn in_operation(error: RecordsError, operation: &Operation) -> RecordsError {
    match error {
        RecordsError::StorageFailure {
            operation: storage_operation,
            message,
        } => {
            warn!(
                operation = operation.name(),
                storage_operation = %storage_operation,
                error = %message,
                "Storage failure"
            );
            RecordsError::storage(
                operation.name(),
                format!("{}: {}", storage_operation, message),
            )
        }
        other => other,
    }
}
