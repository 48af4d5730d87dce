//! SQLite-backed personnel store.
//!
//! [`SqliteStore`] loads the normalized tables into an embedded database and
//! executes composed queries exactly as rendered: the SQL text is prepared
//! and the bound parameters are passed alongside it, never spliced in.
//!
//! Money columns hold integer cents so `SUM` stays exact.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use rusqlite::types::{ToSqlOutput, Value};
use rusqlite::{Connection, Row, ToSql, Transaction, params, params_from_iter};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::{RecordsError, RecordsResult};
use crate::models::{EmployeeRecord, GroupTotal, PayStatement, Ssn};
use crate::query::{BoundValue, EarningsTotalsQuery, EmployeeQuery, PayrollHistoryQuery};

use super::PersonnelStore;
use super::tables::Dataset;

// One address, division and job title per employee: the link tables are
// keyed by employee so every join yields at most one row.
const SCHEMA: &str = "
PRAGMA case_sensitive_like = ON;
CREATE TABLE states (
    state_id INTEGER PRIMARY KEY,
    state_abbr TEXT NOT NULL
);
CREATE TABLE cities (
    city_id INTEGER PRIMARY KEY,
    city_name TEXT NOT NULL,
    state_id INTEGER NOT NULL
);
CREATE TABLE division (
    div_id INTEGER PRIMARY KEY,
    div_name TEXT NOT NULL
);
CREATE TABLE job_titles (
    job_title_id INTEGER PRIMARY KEY,
    job_title TEXT NOT NULL
);
CREATE TABLE employees (
    empid INTEGER PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    ssn TEXT NOT NULL,
    dob TEXT NOT NULL,
    salary INTEGER NOT NULL
);
CREATE TABLE addresses (
    empid INTEGER PRIMARY KEY,
    street TEXT NOT NULL,
    city_id INTEGER NOT NULL,
    zip TEXT NOT NULL,
    mobile TEXT
);
CREATE TABLE employee_division (
    empid INTEGER PRIMARY KEY,
    div_id INTEGER NOT NULL
);
CREATE TABLE employee_job_titles (
    empid INTEGER PRIMARY KEY,
    job_title_id INTEGER NOT NULL
);
CREATE TABLE payroll (
    payroll_id INTEGER PRIMARY KEY,
    empid INTEGER NOT NULL,
    pay_date TEXT NOT NULL,
    earnings INTEGER NOT NULL,
    fed_tax INTEGER NOT NULL,
    fed_med INTEGER NOT NULL,
    fed_ss INTEGER NOT NULL,
    state_tax INTEGER NOT NULL,
    retire_401k INTEGER NOT NULL,
    healthcare INTEGER NOT NULL
);
CREATE INDEX payroll_by_employee ON payroll (empid, pay_date);
CREATE INDEX payroll_by_date ON payroll (pay_date);
";

/// A personnel store backed by an embedded SQLite database.
///
/// # Example
///
/// ```
/// use personnel_records::query::QueryComposer;
/// use personnel_records::models::SearchCriteria;
/// use personnel_records::storage::{Dataset, PersonnelStore, SqliteStore};
///
/// let store = SqliteStore::from_dataset(&Dataset::default())?;
/// let query = QueryComposer::default().compose(&SearchCriteria::new());
/// assert!(store.fetch_employees(&query)?.is_empty());
/// assert_eq!(store.query_count(), 1);
/// # Ok::<(), personnel_records::error::RecordsError>(())
/// ```
#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
    queries: AtomicUsize,
}

impl SqliteStore {
    /// Creates an in-memory database holding every row of `dataset`.
    ///
    /// Fails with `StorageFailure` when a row breaks the schema, such as a
    /// second address for one employee.
    pub fn from_dataset(dataset: &Dataset) -> RecordsResult<Self> {
        let mut conn = Connection::open_in_memory().map_err(failure("open_database"))?;
        conn.execute_batch(SCHEMA).map_err(failure("create_schema"))?;

        let tx = conn.transaction().map_err(failure("load_tables"))?;
        insert_rows(&tx, dataset).map_err(failure("load_tables"))?;
        tx.commit().map_err(failure("load_tables"))?;

        info!(
            employees = dataset.employees.len(),
            payroll_lines = dataset.payroll.len(),
            "Personnel tables loaded"
        );
        Ok(Self {
            conn: Mutex::new(conn),
            queries: AtomicUsize::new(0),
        })
    }

    /// Number of queries executed so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn acquire(&self, operation: &str) -> RecordsResult<MutexGuard<'_, Connection>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.conn
            .lock()
            .map_err(|_| RecordsError::storage(operation, "connection lock poisoned"))
    }
}

impl PersonnelStore for SqliteStore {
    fn fetch_employees(&self, query: &EmployeeQuery) -> RecordsResult<Vec<EmployeeRecord>> {
        let operation = "fetch_employees";
        let conn = self.acquire(operation)?;
        let sql = query.sql();

        let mut statement = conn.prepare_cached(&sql).map_err(failure(operation))?;
        let records = statement
            .query_map(params_from_iter(query.parameters()), employee_from_row)
            .map_err(failure(operation))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(failure(operation))?;

        debug!(
            sql = %sql,
            clauses = query.clauses().len(),
            rows = records.len(),
            "Executed employee query"
        );
        Ok(records)
    }

    fn fetch_pay_statements(
        &self,
        query: &PayrollHistoryQuery,
    ) -> RecordsResult<Vec<PayStatement>> {
        let operation = "fetch_pay_statements";
        let conn = self.acquire(operation)?;
        let sql = query.sql();

        let mut statement = conn.prepare_cached(&sql).map_err(failure(operation))?;
        let statements = statement
            .query_map(params_from_iter(query.parameters()), statement_from_row)
            .map_err(failure(operation))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(failure(operation))?;

        debug!(
            sql = %sql,
            scoped = query.employee_id().is_some(),
            rows = statements.len(),
            "Executed payroll history query"
        );
        Ok(statements)
    }

    fn sum_earnings(&self, query: &EarningsTotalsQuery) -> RecordsResult<Vec<GroupTotal>> {
        let operation = "sum_earnings";
        let conn = self.acquire(operation)?;
        let sql = query.sql();

        let mut statement = conn.prepare_cached(&sql).map_err(failure(operation))?;
        let totals = statement
            .query_map(params_from_iter(query.parameters()), |row| {
                Ok(GroupTotal::new(
                    row.get::<_, String>(0)?,
                    from_cents(row.get(1)?),
                ))
            })
            .map_err(failure(operation))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(failure(operation))?;

        debug!(
            sql = %sql,
            groups = totals.len(),
            "Executed earnings totals query"
        );
        Ok(totals)
    }
}

impl ToSql for BoundValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            BoundValue::Integer(value) => Ok(ToSqlOutput::Owned(Value::Integer(*value))),
            BoundValue::Text(value) => value.to_sql(),
            BoundValue::Date(value) => value.to_sql(),
        }
    }
}

/// A money amount bound as integer cents.
struct Cents(Decimal);

impl ToSql for Cents {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let mut amount = self.0;
        amount.rescale(2);
        i64::try_from(amount.mantissa())
            .map(|cents| ToSqlOutput::Owned(Value::Integer(cents)))
            .map_err(|_| {
                rusqlite::Error::ToSqlConversionFailure(
                    format!("amount {} does not fit in cents", self.0).into(),
                )
            })
    }
}

fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn failure(operation: &'static str) -> impl Fn(rusqlite::Error) -> RecordsError {
    move |e| RecordsError::storage(operation, e.to_string())
}

fn employee_from_row(row: &Row<'_>) -> rusqlite::Result<EmployeeRecord> {
    Ok(EmployeeRecord {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        date_of_birth: row.get(3)?,
        ssn: Ssn::new(row.get::<_, String>(4)?),
        salary: from_cents(row.get(5)?),
        job_title: row.get(6)?,
        division: row.get(7)?,
        street: row.get(8)?,
        city: row.get(9)?,
        state: row.get(10)?,
        zip: row.get(11)?,
        mobile: row.get(12)?,
    })
}

fn statement_from_row(row: &Row<'_>) -> rusqlite::Result<PayStatement> {
    let first_name: String = row.get(2)?;
    let last_name: String = row.get(3)?;
    Ok(PayStatement {
        payroll_id: row.get(0)?,
        employee_id: row.get(1)?,
        employee_name: format!("{} {}", first_name, last_name),
        pay_date: row.get(4)?,
        earnings: from_cents(row.get(5)?),
        federal_tax: from_cents(row.get(6)?),
        federal_medicare: from_cents(row.get(7)?),
        federal_social_security: from_cents(row.get(8)?),
        state_tax: from_cents(row.get(9)?),
        retirement: from_cents(row.get(10)?),
        healthcare: from_cents(row.get(11)?),
    })
}

fn insert_rows(tx: &Transaction<'_>, dataset: &Dataset) -> rusqlite::Result<()> {
    let mut insert = tx.prepare("INSERT INTO states (state_id, state_abbr) VALUES (?1, ?2)")?;
    for row in &dataset.states {
        insert.execute(params![row.state_id, row.state_abbr])?;
    }

    let mut insert =
        tx.prepare("INSERT INTO cities (city_id, city_name, state_id) VALUES (?1, ?2, ?3)")?;
    for row in &dataset.cities {
        insert.execute(params![row.city_id, row.city_name, row.state_id])?;
    }

    let mut insert = tx.prepare("INSERT INTO division (div_id, div_name) VALUES (?1, ?2)")?;
    for row in &dataset.division {
        insert.execute(params![row.div_id, row.div_name])?;
    }

    let mut insert =
        tx.prepare("INSERT INTO job_titles (job_title_id, job_title) VALUES (?1, ?2)")?;
    for row in &dataset.job_titles {
        insert.execute(params![row.job_title_id, row.job_title])?;
    }

    let mut insert = tx.prepare(
        "INSERT INTO employees (empid, first_name, last_name, ssn, dob, salary) \
VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;
    for row in &dataset.employees {
        insert.execute(params![
            row.empid,
            row.first_name,
            row.last_name,
            row.ssn.expose(),
            row.dob,
            Cents(row.salary),
        ])?;
    }

    let mut insert = tx.prepare(
        "INSERT INTO addresses (empid, street, city_id, zip, mobile) VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    for row in &dataset.addresses {
        insert.execute(params![row.empid, row.street, row.city_id, row.zip, row.mobile])?;
    }

    let mut insert = tx.prepare("INSERT INTO employee_division (empid, div_id) VALUES (?1, ?2)")?;
    for row in &dataset.employee_division {
        insert.execute(params![row.empid, row.div_id])?;
    }

    let mut insert =
        tx.prepare("INSERT INTO employee_job_titles (empid, job_title_id) VALUES (?1, ?2)")?;
    for row in &dataset.employee_job_titles {
        insert.execute(params![row.empid, row.job_title_id])?;
    }

    let mut insert = tx.prepare(
        "INSERT INTO payroll (payroll_id, empid, pay_date, earnings, fed_tax, fed_med, fed_ss, \
state_tax, retire_401k, healthcare) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
    )?;
    for row in &dataset.payroll {
        insert.execute(params![
            row.payroll_id,
            row.empid,
            row.pay_date,
            Cents(row.earnings),
            Cents(row.fed_tax),
            Cents(row.fed_med),
            Cents(row.fed_ss),
            Cents(row.state_tax),
            Cents(row.retire_401k),
            Cents(row.healthcare),
        ])?;
    }

    Ok(())
}
