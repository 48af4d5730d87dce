//! Caller identity and role types.
//!
//! A [`CallerIdentity`] is supplied per request by the external auth
//! collaborator and passed explicitly to every operation. The engine never
//! creates identities on its own behalf, stores them, or mutates them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RecordsError;

use super::EmployeeId;

/// The role an authenticated caller acts under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Administrative staff with unrestricted read access.
    Admin,
    /// A regular employee restricted to their own records.
    Employee,
}

impl Role {
    /// Returns the lowercase wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Employee => "employee",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RecordsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "employee" => Ok(Role::Employee),
            other => Err(RecordsError::invalid_input(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

/// The authenticated caller of an operation.
///
/// An `Employee` caller always carries its associated employee id. An
/// `Admin` may carry one as well, which is only used for the self-view.
///
/// # Example
///
/// ```
/// use personnel_records::models::{CallerIdentity, Role};
///
/// let caller = CallerIdentity::employee(101);
/// assert_eq!(caller.role(), Role::Employee);
/// assert_eq!(caller.employee_id(), Some(101));
///
/// let admin = CallerIdentity::admin();
/// assert!(admin.is_admin());
/// assert_eq!(admin.employee_id(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerIdentity {
    role: Role,
    employee_id: Option<EmployeeId>,
}

impl CallerIdentity {
    /// An administrator without an associated employee record.
    pub fn admin() -> Self {
        Self {
            role: Role::Admin,
            employee_id: None,
        }
    }

    /// An administrator who is also employee `employee_id`.
    pub fn admin_with_employee(employee_id: EmployeeId) -> Self {
        Self {
            role: Role::Admin,
            employee_id: Some(employee_id),
        }
    }

    /// A regular employee.
    pub fn employee(employee_id: EmployeeId) -> Self {
        Self {
            role: Role::Employee,
            employee_id: Some(employee_id),
        }
    }

    /// Builds an identity from a role and an optional employee id.
    ///
    /// Returns `InvalidInput` when an `Employee` role comes without an id.
    pub fn from_parts(role: Role, employee_id: Option<EmployeeId>) -> Result<Self, RecordsError> {
        match (role, employee_id) {
            (Role::Admin, id) => Ok(Self {
                role,
                employee_id: id,
            }),
            (Role::Employee, Some(id)) => Ok(Self::employee(id)),
            (Role::Employee, None) => Err(RecordsError::invalid_input(
                "employee_id",
                "employee callers must carry an employee id",
            )),
        }
    }

    /// The caller's role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// The caller's associated employee id, if any.
    pub fn employee_id(&self) -> Option<EmployeeId> {
        self.employee_id
    }

    /// Returns true for administrators.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
