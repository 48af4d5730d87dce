//! HTTP API module for the personnel records engine.
//!
//! This module exposes employee search and payroll reports over REST.
//! Caller identity arrives in trusted headers set by the auth gateway.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{EMPLOYEE_ID_HEADER, ROLE_HEADER, SearchParams, TotalsParams};
pub use response::{
    ApiError, GroupedReportResponse, PayStatementView, PayrollHistoryResponse,
};
pub use state::AppState;
