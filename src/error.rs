//! Error types for the personnel records engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Every failure surfaces as its own variant so callers can tell
//! "not authorized" apart from "authorized, nothing found" and from
//! "storage is unavailable".

use thiserror::Error;

use crate::models::{EmployeeId, Role};

/// The main error type for the personnel records engine.
///
/// # Example
///
/// ```
/// use personnel_records::error::RecordsError;
///
/// let error = RecordsError::NotFound { employee_id: 101 };
/// assert_eq!(error.to_string(), "Employee not found: 101");
/// ```
#[derive(Debug, Error)]
pub enum RecordsError {
    /// The caller's role does not permit the requested operation.
    #[error("Access denied: {role} callers may not perform '{operation}'")]
    AccessDenied {
        /// The operation that was refused.
        operation: String,
        /// The role of the refused caller.
        role: Role,
    },

    /// A single-record lookup found no matching row.
    #[error("Employee not found: {employee_id}")]
    NotFound {
        /// The employee id that was looked up.
        employee_id: EmployeeId,
    },

    /// Input was malformed and rejected before any storage access.
    #[error("Invalid input for '{field}': {message}")]
    InvalidInput {
        /// The offending field.
        field: String,
        /// A description of what made the input invalid.
        message: String,
    },

    /// The storage collaborator failed while executing a query.
    ///
    /// The message never carries bound parameter values.
    #[error("Storage failure during '{operation}': {message}")]
    StorageFailure {
        /// The operation that was being executed.
        operation: String,
        /// A description of the failure.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl RecordsError {
    /// Builds an [`RecordsError::AccessDenied`] for the given operation and role.
    pub fn access_denied(operation: impl Into<String>, role: Role) -> Self {
        Self::AccessDenied {
            operation: operation.into(),
            role,
        }
    }

    /// Builds an [`RecordsError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Builds a [`RecordsError::StorageFailure`].
    pub fn storage(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StorageFailure {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Returns true for failures an outer layer may sensibly retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageFailure { .. })
    }
}

/// A type alias for Results that return RecordsError.
pub type RecordsResult<T> = Result<T, RecordsError>;
