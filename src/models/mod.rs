//! Core data models for the personnel records engine.
//!
//! This module contains the value types passed between the services, the
//! query composer and the storage collaborator.

mod criteria;
mod employee;
mod identity;
mod payroll;
mod period;
mod report;

pub use criteria::SearchCriteria;
pub use employee::{EmployeeId, EmployeeRecord, Ssn};
pub use identity::{CallerIdentity, Role};
pub use payroll::PayStatement;
pub use period::ReportPeriod;
pub use report::{GroupTotal, GroupedReport, GroupingDimension};
