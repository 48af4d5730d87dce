//! Request types for the personnel records API.
//!
//! This module defines the query-string structures and the trusted caller
//! identity headers set by the upstream auth gateway.

use axum::http::HeaderMap;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{RecordsError, RecordsResult};
use crate::models::{CallerIdentity, EmployeeId, Role, SearchCriteria};

/// Header carrying the caller's role.
pub const ROLE_HEADER: &str = "x-caller-role";

/// Header carrying the caller's employee id.
pub const EMPLOYEE_ID_HEADER: &str = "x-caller-employee-id";

/// Query string for `GET /employees`.
///
/// Every field is optional; blank values are treated as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    /// Exact employee id.
    #[serde(default)]
    pub emp_id: Option<String>,
    /// First-name prefix.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Last-name prefix.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Exact date of birth, `YYYY-MM-DD`.
    #[serde(default)]
    pub dob: Option<String>,
    /// SSN suffix.
    #[serde(default)]
    pub ssn: Option<String>,
}

impl SearchParams {
    /// Converts the raw parameters into search criteria.
    ///
    /// Returns `InvalidInput` when the id or date cannot be parsed.
    pub fn into_criteria(self) -> RecordsResult<SearchCriteria> {
        let employee_id = match self.emp_id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_employee_id("emp_id", raw)?),
        };
        let date_of_birth = match self.dob.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                RecordsError::invalid_input("dob", format!("'{}' is not a YYYY-MM-DD date", raw))
            })?),
        };

        Ok(SearchCriteria::from_form(
            employee_id,
            self.first_name.as_deref(),
            self.last_name.as_deref(),
            date_of_birth,
            self.ssn.as_deref(),
        ))
    }
}

/// Query string for `GET /reports/totals/:dimension`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TotalsParams {
    /// The reported month, `YYYY-MM`. Missing is treated as blank and
    /// rejected after the role check.
    #[serde(default)]
    pub period: String,
}

/// Parses an employee id from a path segment or query value.
pub fn parse_employee_id(field: &str, raw: &str) -> RecordsResult<EmployeeId> {
    raw.trim().parse::<EmployeeId>().map_err(|_| {
        RecordsError::invalid_input(field, format!("'{}' is not an employee id", raw))
    })
}

/// Reads the caller identity from the trusted gateway headers.
pub fn caller_from_headers(headers: &HeaderMap) -> RecordsResult<CallerIdentity> {
    let role = headers
        .get(ROLE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| RecordsError::invalid_input(ROLE_HEADER, "missing caller role"))?
        .parse::<Role>()?;

    let employee_id = match headers.get(EMPLOYEE_ID_HEADER) {
        None => None,
        Some(value) => {
            let raw = value.to_str().map_err(|_| {
                RecordsError::invalid_input(EMPLOYEE_ID_HEADER, "header is not valid text")
            })?;
            Some(parse_employee_id(EMPLOYEE_ID_HEADER, raw)?)
        }
    };

    CallerIdentity::from_parts(role, employee_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(role: Option<&str>, employee_id: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(role) = role {
            headers.insert(ROLE_HEADER, HeaderValue::from_str(role).unwrap());
        }
        if let Some(id) = employee_id {
            headers.insert(EMPLOYEE_ID_HEADER, HeaderValue::from_str(id).unwrap());
        }
        headers
    }

    #[test]
    fn test_deserialize_search_params() {
        let params: SearchParams =
            serde_json::from_str(r#"{"first_name": "Jo", "dob": "1985-03-15"}"#).unwrap();
        let criteria = params.into_criteria().unwrap();
        assert_eq!(criteria.first_name(), Some("Jo"));
        assert_eq!(
            criteria.date_of_birth(),
            NaiveDate::from_ymd_opt(1985, 3, 15)
        );
        assert_eq!(criteria.employee_id(), None);
    }

    #[test]
    fn test_blank_params_are_absent() {
        let params = SearchParams {
            emp_id: Some(" ".to_string()),
            first_name: Some("".to_string()),
            ..SearchParams::default()
        };
        assert!(params.into_criteria().unwrap().is_empty());
    }

    #[test]
    fn test_bad_emp_id_is_invalid_input() {
        let params = SearchParams {
            emp_id: Some("abc".to_string()),
            ..SearchParams::default()
        };
        assert!(matches!(
            params.into_criteria(),
            Err(RecordsError::InvalidInput { ref field, .. }) if field == "emp_id"
        ));
    }

    #[test]
    fn test_bad_dob_is_invalid_input() {
        let params = SearchParams {
            dob: Some("15/03/1985".to_string()),
            ..SearchParams::default()
        };
        assert!(matches!(
            params.into_criteria(),
            Err(RecordsError::InvalidInput { ref field, .. }) if field == "dob"
        ));
    }

    #[test]
    fn test_caller_from_headers() {
        let caller = caller_from_headers(&headers(Some("employee"), Some("202"))).unwrap();
        assert_eq!(caller, CallerIdentity::employee(202));

        let admin = caller_from_headers(&headers(Some("admin"), None)).unwrap();
        assert_eq!(admin, CallerIdentity::admin());
    }

    #[test]
    fn test_missing_role_header_is_rejected() {
        assert!(caller_from_headers(&headers(None, Some("202"))).is_err());
    }

    #[test]
    fn test_employee_without_id_header_is_rejected() {
        assert!(caller_from_headers(&headers(Some("employee"), None)).is_err());
    }

    #[test]
    fn test_malformed_id_header_is_rejected() {
        assert!(caller_from_headers(&headers(Some("employee"), Some("x1"))).is_err());
    }
}
