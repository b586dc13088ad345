//! Storage adapters.
//!
//! The export reads named tables and template descriptors through the
//! [`Storage`] trait. Absence is explicit: a missing table or template is
//! `Ok(None)`, and only real I/O failures are errors.

mod columns;
mod directory;
mod memory;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::templates::TemplateKind;

pub use columns::{
    adapt_cost_codes, adapt_jobs, adapt_pay_codes, adapt_roster, adapt_time_entries,
    parse_date_value, Adapted,
};
pub use directory::DirectoryStore;
pub use memory::InMemoryStore;

/// Accepted names of the time entry table.
pub const TIME_DATA_TABLES: &[&str] = &["Time Data"];
/// Accepted names of the roster table.
pub const EMPLOYEE_LIST_TABLES: &[&str] = &["Employee List", "Employees"];
/// Accepted names of the cost code table.
pub const COST_CODES_TABLES: &[&str] = &["Cost Codes", "CostCodes"];
/// Accepted names of the job list table.
pub const JOB_NUMBERS_TABLES: &[&str] = &["Job Numbers", "Jobs"];
/// Accepted names of the optional pay code table.
pub const PAY_CODES_TABLES: &[&str] = &["Pay Codes", "PayCodes"];

/// One cell as read from storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// An empty cell.
    Blank,
    /// A numeric cell.
    Number(f64),
    /// A text cell.
    Text(String),
}

impl RawValue {
    /// Renders the value as trimmed text.
    ///
    /// Integral numbers print without a fractional part, so a job number
    /// stored as `2224.0` reads back as `"2224"`.
    ///
    /// # Example
    ///
    /// ```
    /// use timesheet_export::storage::RawValue;
    ///
    /// assert_eq!(RawValue::Number(2224.0).as_text(), "2224");
    /// assert_eq!(RawValue::Number(7.5).as_text(), "7.5");
    /// assert_eq!(RawValue::Text(" 5 ".into()).as_text(), "5");
    /// assert_eq!(RawValue::Blank.as_text(), "");
    /// ```
    pub fn as_text(&self) -> String {
        match self {
            RawValue::Blank => String::new(),
            RawValue::Text(text) => text.trim().to_string(),
            RawValue::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                format!("{}", *n as i64)
            }
            RawValue::Number(n) => n.to_string(),
        }
    }

    /// Returns true for blank cells and blank text.
    pub fn is_blank(&self) -> bool {
        match self {
            RawValue::Blank => true,
            RawValue::Text(text) => text.trim().is_empty(),
            RawValue::Number(_) => false,
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            RawValue::Blank
        } else {
            RawValue::Text(value.to_string())
        }
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        if value.is_empty() {
            RawValue::Blank
        } else {
            RawValue::Text(value)
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

/// One table row: column header to cell value.
pub type RawRow = BTreeMap<String, RawValue>;

/// Builds a row from header/value pairs.
///
/// # Example
///
/// ```
/// use timesheet_export::storage::{raw_row, RawValue};
///
/// let row = raw_row([("Name", RawValue::from("Dana Reyes")), ("RT Hours", RawValue::from(8.0))]);
/// assert_eq!(row["RT Hours"].as_text(), "8");
/// ```
pub fn raw_row<K, I>(pairs: I) -> RawRow
where
    K: Into<String>,
    I: IntoIterator<Item = (K, RawValue)>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}

/// Read access to the tables and templates an export needs.
///
/// Implementations must be shareable across request handlers.
pub trait Storage: Send + Sync {
    /// Reads a table by name. `Ok(None)` means the table does not exist.
    fn read_table(&self, name: &str) -> EngineResult<Option<Vec<RawRow>>>;

    /// Reads a template descriptor. `Ok(None)` means it is not available.
    fn read_template(&self, kind: TemplateKind) -> EngineResult<Option<String>>;
}

/// Reads the first table that exists among `names`.
///
/// Returns the name that matched together with its rows.
pub fn read_first_table<S: Storage + ?Sized>(
    storage: &S,
    names: &[&str],
) -> EngineResult<Option<(String, Vec<RawRow>)>> {
    for name in names {
        if let Some(rows) = storage.read_table(name)? {
            return Ok(Some((name.to_string(), rows)));
        }
    }
    Ok(None)
}
