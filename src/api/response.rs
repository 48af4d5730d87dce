//! Response types for the personnel records API.
//!
//! This module defines the JSON bodies returned by the handlers and the
//! mapping from [`RecordsError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::RecordsError;
use crate::models::{
    EmployeeId, GroupTotal, GroupedReport, GroupingDimension, PayStatement, ReportPeriod,
};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 401 for requests whose identity headers are missing or malformed.
    pub fn unauthenticated(cause: &RecordsError) -> Self {
        ApiErrorResponse {
            status: StatusCode::UNAUTHORIZED,
            error: ApiError::with_details(
                "UNAUTHENTICATED",
                "Caller identity is missing or malformed",
                cause.to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<RecordsError> for ApiErrorResponse {
    fn from(error: RecordsError) -> Self {
        match error {
            RecordsError::AccessDenied { operation, role } => ApiErrorResponse {
                status: StatusCode::FORBIDDEN,
                error: ApiError::with_details(
                    "ACCESS_DENIED",
                    "You are not permitted to perform this operation",
                    format!("{} callers may not perform '{}'", role, operation),
                ),
            },
            RecordsError::NotFound { employee_id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("NOT_FOUND", format!("Employee not found: {}", employee_id)),
            },
            RecordsError::InvalidInput { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_INPUT",
                    format!("Invalid value for '{}'", field),
                    message,
                ),
            },
            RecordsError::StorageFailure { operation, .. } => ApiErrorResponse {
                status: StatusCode::SERVICE_UNAVAILABLE,
                error: ApiError::with_details(
                    "STORAGE_UNAVAILABLE",
                    "Personnel records are temporarily unavailable, please retry",
                    format!("operation: {}", operation),
                ),
            },
            RecordsError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            RecordsError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
        }
    }
}

/// One pay statement as presented, with derived amounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayStatementView {
    /// Payroll line id.
    pub payroll_id: u32,
    /// Employee id.
    pub employee_id: EmployeeId,
    /// Employee display name.
    pub employee_name: String,
    /// Pay date.
    pub pay_date: NaiveDate,
    /// Pay date as `MM/DD/YYYY`.
    pub pay_date_display: String,
    /// Gross earnings.
    pub earnings: Decimal,
    /// Sum of the six deductions.
    pub total_deductions: Decimal,
    /// Earnings minus deductions.
    pub net_pay: Decimal,
}

impl From<&PayStatement> for PayStatementView {
    fn from(statement: &PayStatement) -> Self {
        Self {
            payroll_id: statement.payroll_id,
            employee_id: statement.employee_id,
            employee_name: statement.employee_name.clone(),
            pay_date: statement.pay_date,
            pay_date_display: statement.formatted_pay_date(),
            earnings: statement.earnings,
            total_deductions: statement.total_deductions(),
            net_pay: statement.net_pay(),
        }
    }
}

/// Body of `GET /reports/payroll-history`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollHistoryResponse {
    /// Statements ordered by employee id then pay date.
    pub statements: Vec<PayStatementView>,
}

/// Body of `GET /reports/totals/:dimension`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupedReportResponse {
    /// The reported month, `YYYY-MM`.
    pub period: ReportPeriod,
    /// Display label such as "October 2026".
    pub period_label: String,
    /// The grouping dimension.
    pub dimension: GroupingDimension,
    /// Ordered totals.
    pub totals: Vec<GroupTotal>,
    /// Sum of all totals.
    pub grand_total: Decimal,
}

impl From<GroupedReport> for GroupedReportResponse {
    fn from(report: GroupedReport) -> Self {
        Self {
            period: report.period,
            period_label: report.period.label(),
            dimension: report.dimension,
            grand_total: report.grand_total(),
            totals: report.totals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use std::str::FromStr;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_status_mapping_keeps_kinds_distinct() {
        let cases = [
            (
                RecordsError::access_denied("search_employees", Role::Employee),
                StatusCode::FORBIDDEN,
                "ACCESS_DENIED",
            ),
            (
                RecordsError::NotFound { employee_id: 7 },
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
            ),
            (
                RecordsError::invalid_input("period", "bad"),
                StatusCode::BAD_REQUEST,
                "INVALID_INPUT",
            ),
            (
                RecordsError::storage("search_employees", "down"),
                StatusCode::SERVICE_UNAVAILABLE,
                "STORAGE_UNAVAILABLE",
            ),
        ];
        for (error, status, code) in cases {
            let response: ApiErrorResponse = error.into();
            assert_eq!(response.status, status);
            assert_eq!(response.error.code, code);
        }
    }

    #[test]
    fn test_storage_failure_details_omit_backend_message() {
        let response: ApiErrorResponse =
            RecordsError::storage("search_employees", "host db-7 refused").into();
        let details = response.error.details.unwrap();
        assert!(!details.contains("db-7"));
        assert!(details.contains("search_employees"));
    }

    #[test]
    fn test_pay_statement_view_carries_net_pay() {
        let dec = |s: &str| Decimal::from_str(s).unwrap();
        let statement = PayStatement {
            payroll_id: 1,
            employee_id: 202,
            employee_name: "Joanna Doe".to_string(),
            pay_date: NaiveDate::from_ymd_opt(2026, 8, 31).unwrap(),
            earnings: dec("100.00"),
            federal_tax: dec("0"),
            federal_medicare: dec("1.45"),
            federal_social_security: dec("6.20"),
            state_tax: dec("0"),
            retirement: dec("5.00"),
            healthcare: dec("120.00"),
        };
        let view = PayStatementView::from(&statement);
        assert_eq!(view.net_pay, dec("-32.65"));
        assert_eq!(view.total_deductions, dec("132.65"));
        assert_eq!(view.pay_date_display, "08/31/2026");
    }
}
