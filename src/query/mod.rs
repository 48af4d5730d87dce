//! Parameterized query composition.
//!
//! This module turns search criteria into AND-combined, parameterized
//! clauses and builds the payroll report queries. Only column and operator
//! tokens owned by this module ever appear in query text; caller-supplied
//! values are always bound parameters.

mod clause;
mod composer;
mod report;

pub use clause::{BoundValue, Clause, Column, MatchMode, NameMatching, escape_like};
pub use composer::{EmployeeQuery, QueryComposer};
pub use report::{EarningsTotalsQuery, PayrollHistoryQuery};
