//! Predicate clauses and bound values.
//!
//! A [`Clause`] pairs a composer-controlled column token and match mode with
//! the value the caller supplied. Rendering only ever emits the column token,
//! the operator and a `?` placeholder: the value travels separately as a
//! bound parameter.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How personal names are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameMatching {
    /// Fold case on both sides before comparing.
    #[default]
    CaseInsensitive,
    /// Compare names exactly as stored.
    CaseSensitive,
}

/// Employee columns a search may constrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// `employees.empid`
    EmployeeId,
    /// `employees.first_name`
    FirstName,
    /// `employees.last_name`
    LastName,
    /// `employees.dob`
    DateOfBirth,
    /// `employees.ssn`
    Ssn,
}

impl Column {
    /// The qualified column token used in rendered SQL.
    pub fn sql(&self) -> &'static str {
        match self {
            Column::EmployeeId => "e.empid",
            Column::FirstName => "e.first_name",
            Column::LastName => "e.last_name",
            Column::DateOfBirth => "e.dob",
            Column::Ssn => "e.ssn",
        }
    }
}

/// The comparison a clause performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchMode {
    /// Column equals the value.
    Exact,
    /// Column starts with the value.
    Prefix,
    /// Column ends with the value.
    Suffix,
}

/// A typed value bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundValue {
    /// An integer parameter.
    Integer(i64),
    /// A text parameter.
    Text(String),
    /// A date parameter.
    Date(NaiveDate),
}

/// One AND-combined condition derived from one populated criterion.
#[derive(Clone, PartialEq, Eq)]
pub struct Clause {
    column: Column,
    mode: MatchMode,
    value: BoundValue,
    fold_case: bool,
}

impl Clause {
    /// Exact equality on `column`.
    pub fn exact(column: Column, value: BoundValue) -> Self {
        Self {
            column,
            mode: MatchMode::Exact,
            value,
            fold_case: false,
        }
    }

    /// `column` starts with `fragment`.
    pub fn prefix(column: Column, fragment: &str, fold_case: bool) -> Self {
        Self {
            column,
            mode: MatchMode::Prefix,
            value: BoundValue::Text(fragment.to_string()),
            fold_case,
        }
    }

    /// `column` ends with `fragment`.
    pub fn suffix(column: Column, fragment: &str) -> Self {
        Self {
            column,
            mode: MatchMode::Suffix,
            value: BoundValue::Text(fragment.to_string()),
            fold_case: false,
        }
    }

    /// The constrained column.
    pub fn column(&self) -> Column {
        self.column
    }

    /// The comparison performed.
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// The caller-supplied value, before any LIKE decoration.
    pub fn value(&self) -> &BoundValue {
        &self.value
    }

    /// Whether the comparison folds case.
    pub fn folds_case(&self) -> bool {
        self.fold_case
    }

    /// The SQL fragment for this clause, with a single `?` placeholder.
    pub fn render(&self) -> String {
        match self.mode {
            MatchMode::Exact => format!("{} = ?", self.column.sql()),
            MatchMode::Prefix | MatchMode::Suffix if self.fold_case => {
                format!("LOWER({}) LIKE LOWER(?) ESCAPE '\\'", self.column.sql())
            }
            MatchMode::Prefix | MatchMode::Suffix => {
                format!("{} LIKE ? ESCAPE '\\'", self.column.sql())
            }
        }
    }

    /// The value bound to this clause's placeholder.
    ///
    /// LIKE patterns get their metacharacters escaped and the wildcard added
    /// on the open side.
    pub fn parameter(&self) -> BoundValue {
        match (&self.mode, &self.value) {
            (MatchMode::Prefix, BoundValue::Text(fragment)) => {
                BoundValue::Text(format!("{}%", escape_like(fragment)))
            }
            (MatchMode::Suffix, BoundValue::Text(fragment)) => {
                BoundValue::Text(format!("%{}", escape_like(fragment)))
            }
            (_, value) => value.clone(),
        }
    }
}

// SSN fragments never reach logs.
impl fmt::Debug for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Clause");
        debug.field("column", &self.column).field("mode", &self.mode);
        if self.column == Column::Ssn {
            debug.field("value", &"<redacted>");
        } else {
            debug.field("value", &self.value);
        }
        debug.field("fold_case", &self.fold_case).finish()
    }
}

/// Escapes LIKE metacharacters so the fragment matches literally.
pub fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
