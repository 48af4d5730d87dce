//! HTTP request handlers for the personnel records API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::RecordsResult;
use crate::models::CallerIdentity;

use super::request::{SearchParams, TotalsParams, caller_from_headers, parse_employee_id};
use super::response::{
    ApiError, ApiErrorResponse, GroupedReportResponse, PayStatementView, PayrollHistoryResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/employees", get(search_handler))
        .route("/employees/:id", get(lookup_handler))
        .route("/me", get(own_record_handler))
        .route("/reports/payroll-history", get(payroll_history_handler))
        .route("/reports/totals/:dimension", get(totals_handler))
        .with_state(state)
}

/// Handler for GET /employees.
async fn search_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing employee search request");

    let caller = match identify(&correlation_id, &headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => return query_rejected(&correlation_id, rejection),
    };

    let result = params
        .into_criteria()
        .and_then(|criteria| state.search().search(&caller, &criteria));
    respond(&correlation_id, "search_employees", result)
}

/// Handler for GET /employees/:id.
async fn lookup_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing employee lookup request");

    let caller = match identify(&correlation_id, &headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };

    let result = parse_employee_id("id", &raw_id)
        .and_then(|employee_id| state.search().find_by_id(&caller, employee_id));
    respond(&correlation_id, "lookup_employee", result)
}

/// Handler for GET /me.
async fn own_record_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing own record request");

    let caller = match identify(&correlation_id, &headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };

    respond(
        &correlation_id,
        "view_own_record",
        state.search().view_own_record(&caller),
    )
}

/// Handler for GET /reports/payroll-history.
async fn payroll_history_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll history request");

    let caller = match identify(&correlation_id, &headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };

    let result = state
        .reports()
        .payroll_history(&caller)
        .map(|statements| PayrollHistoryResponse {
            statements: statements.iter().map(PayStatementView::from).collect(),
        });
    respond(&correlation_id, "payroll_history", result)
}

/// Handler for GET /reports/totals/:dimension.
async fn totals_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_dimension): Path<String>,
    params: Result<Query<TotalsParams>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        dimension = %raw_dimension,
        "Processing grouped totals request"
    );

    let caller = match identify(&correlation_id, &headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    // Report rights are checked before any request input is parsed.
    let period = match params {
        Ok(Query(params)) => params.period,
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "Query string rejected, treating period as blank"
            );
            String::new()
        }
    };

    let result = state
        .reports()
        .grouped_totals_for(&caller, &period, &raw_dimension)
        .map(GroupedReportResponse::from);
    respond(&correlation_id, "grouped_totals", result)
}

/// Reads the caller identity, producing a 401 response when it is unusable.
fn identify(correlation_id: &Uuid, headers: &HeaderMap) -> Result<CallerIdentity, Response> {
    caller_from_headers(headers).map_err(|err| {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            "Rejected request without a usable caller identity"
        );
        error_response(ApiErrorResponse::unauthenticated(&err))
    })
}

fn query_rejected(correlation_id: &Uuid, rejection: QueryRejection) -> Response {
    let body_text = rejection.body_text();
    warn!(
        correlation_id = %correlation_id,
        error = %body_text,
        "Query string rejected"
    );
    error_response(ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error: ApiError::new("INVALID_INPUT", body_text),
    })
}

fn respond<T: Serialize>(
    correlation_id: &Uuid,
    operation: &'static str,
    result: RecordsResult<T>,
) -> Response {
    match result {
        Ok(body) => {
            info!(
                correlation_id = %correlation_id,
                operation,
                "Request completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(body),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                operation,
                error = %err,
                retryable = err.is_retryable(),
                "Request failed"
            );
            error_response(err.into())
        }
    }
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}
