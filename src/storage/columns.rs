//! Column-alias resolution and row adapters.
//!
//! Raw tables arrive with whatever headers the spreadsheet happens to use.
//! Each adapter resolves its columns once per table (ignoring case and
//! spacing), then converts rows into typed records. Rows that cannot be
//! converted are rejected with a notice instead of failing the export.

use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;

use chrono::{Days, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use tracing::warn;

use crate::config::PayCodes;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    clean_text, CostCodeRecord, EmployeeRecord, ExportNotice, JobRecord, NoticeCode,
    PayCodeKind, TimeEntry,
};

use super::{RawRow, RawValue};

/// Records adapted from a table, plus notices for the rows that were rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct Adapted<T> {
    /// The converted records, in table order.
    pub records: Vec<T>,
    /// One notice per rejected row.
    pub notices: Vec<ExportNotice>,
}

impl<T> Default for Adapted<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            notices: Vec::new(),
        }
    }
}

type Aliases = (&'static str, &'static [&'static str]);

const JOB_NUMBER: Aliases = ("job_number", &["Job Number", "Job #", "Job"]);
const JOB_AREA: Aliases = ("job_area", &["Job Area", "Area #", "Area"]);
const DATE: Aliases = ("date", &["Date"]);
const NAME: Aliases = ("name", &["Name", "Employee Name", "Employee"]);
const TRADE_CLASS: Aliases = ("trade_class", &["Trade Class", "Override Trade Class"]);
const OVERRIDE_TRADE_CLASS: Aliases = (
    "override_trade_class",
    &["Override Trade Class", "Trade Class"],
);
const EMPLOYEE_NUMBER: Aliases = (
    "employee_number",
    &["Employee Number", "Person Number", "Emp #"],
);
const RT_HOURS: Aliases = ("rt_hours", &["RT Hours", "RT"]);
const OT_HOURS: Aliases = ("ot_hours", &["OT Hours", "OT"]);
const DESCRIPTION_OF_WORK: Aliases = (
    "description_of_work",
    &["Description of work", "Description"],
);
const COMMENTS: Aliases = ("comments", &["Comments", "Comment"]);
const NIGHT_SHIFT: Aliases = ("night_shift", &["Night Shift"]);
const PREMIUM_RATE: Aliases = ("premium_rate", &["Premium Rate"]);
const SUBSISTENCE_RATE: Aliases = ("subsistence_rate", &["Subsistence Rate"]);
const TRAVEL_RATE: Aliases = ("travel_rate", &["Travel Rate"]);
const COST_CODE: Aliases = ("cost_code", &["Cost Code", "Cost Code / Phase", "Code"]);
const INDIRECT: Aliases = (
    "indirect",
    &["Indirect / Direct", "Indirect/Direct", "Indirect"],
);
const TIME_RECORD_TYPE: Aliases = ("time_record_type", &["Time Record Type"]);
const COST_DESCRIPTION: Aliases = (
    "description",
    &["Description", "Cost Code Description"],
);
const JOB_LIST_NUMBER: Aliases = ("job_number", &["JOB #", "Job Number", "Job"]);
const JOB_LIST_AREA: Aliases = ("job_area", &["AREA #", "Job Area", "Area"]);
const JOB_LIST_DESCRIPTION: Aliases = (
    "description",
    &["DESCRIPTION", "Area Description", "Description"],
);
const PAY_LABEL: Aliases = ("label", &["Pay Type", "Type", "Label", "Name", "Description"]);
const PAY_CODE: Aliases = ("code", &["Pay Code", "Code"]);

/// Normalizes a header for comparison: lowercase, single spaces.
fn normalize_header(header: &str) -> String {
    header
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Field-to-header mapping resolved once per table.
struct ColumnMap {
    resolved: HashMap<&'static str, String>,
}

impl ColumnMap {
    fn resolve(rows: &[RawRow], fields: &[Aliases]) -> Self {
        let headers: BTreeSet<&String> = rows.iter().flat_map(|row| row.keys()).collect();
        let mut resolved = HashMap::new();

        for (field, aliases) in fields {
            let found = aliases.iter().find_map(|alias| {
                let alias = normalize_header(alias);
                headers
                    .iter()
                    .find(|header| normalize_header(header) == alias)
            });
            if let Some(header) = found {
                resolved.insert(*field, (*header).clone());
            }
        }

        Self { resolved }
    }

    fn value<'r>(&self, row: &'r RawRow, field: Aliases) -> Option<&'r RawValue> {
        self.resolved.get(field.0).and_then(|header| row.get(header))
    }

    fn text(&self, row: &RawRow, field: Aliases) -> String {
        self.value(row, field)
            .map(|value| clean_text(&value.as_text()))
            .unwrap_or_default()
    }
}

fn is_blank_row(row: &RawRow) -> bool {
    row.values().all(RawValue::is_blank)
}

/// Returns true for `Y`, `YES`, `TRUE` and `1`, ignoring case.
pub(crate) fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_uppercase().as_str(),
        "Y" | "YES" | "TRUE" | "1"
    )
}

/// Interprets a date cell.
///
/// Accepts ISO dates, ISO date-times (the time is dropped), `MM/DD/YYYY`,
/// and Excel serial day numbers, stored as numbers or as text.
///
/// # Errors
///
/// Returns `InvalidDate` for anything else, including blank cells.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use timesheet_export::storage::{parse_date_value, RawValue};
///
/// let expected = NaiveDate::from_ymd_opt(2025, 9, 23).unwrap();
/// assert_eq!(parse_date_value(&RawValue::from("2025-09-23")).unwrap(), expected);
/// assert_eq!(parse_date_value(&RawValue::from("09/23/2025")).unwrap(), expected);
/// assert_eq!(parse_date_value(&RawValue::Number(45923.0)).unwrap(), expected);
/// ```
pub fn parse_date_value(value: &RawValue) -> EngineResult<NaiveDate> {
    let invalid = || EngineError::InvalidDate {
        value: value.as_text(),
    };

    match value {
        RawValue::Blank => Err(invalid()),
        RawValue::Number(serial) => excel_serial_date(*serial).ok_or_else(invalid),
        RawValue::Text(text) => {
            let text = text.trim();
            if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
                return Ok(date);
            }
            for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"] {
                if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
                    return Ok(datetime.date());
                }
            }
            if let Ok(date) = NaiveDate::parse_from_str(text, "%m/%d/%Y") {
                return Ok(date);
            }
            text.parse::<f64>()
                .ok()
                .and_then(excel_serial_date)
                .ok_or_else(invalid)
        }
    }
}

/// Converts an Excel serial day number (1900 date system) to a date.
fn excel_serial_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || !(1.0..=2_958_465.0).contains(&serial) {
        return None;
    }
    NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_days(Days::new(serial.floor() as u64))
}

/// Parses an hours cell. Blank is zero; negative or non-numeric is an error.
fn parse_hours(value: Option<&RawValue>, column: &str) -> Result<Decimal, String> {
    let text = value.map(RawValue::as_text).unwrap_or_default();
    let text = clean_text(&text);
    if text.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let hours = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| format!("{} '{}' is not a number", column, text))?;
    if hours.is_sign_negative() && !hours.is_zero() {
        return Err(format!("{} '{}' is negative", column, text));
    }
    Ok(hours.normalize())
}

fn reject(table: &str, row: usize, message: impl Into<String>) -> EngineError {
    EngineError::InvalidRow {
        table: table.to_string(),
        row,
        message: message.into(),
    }
}

fn rejected_notice(error: &EngineError) -> ExportNotice {
    warn!(error = %error, "Row rejected");
    ExportNotice::warning(NoticeCode::RowRejected, error.to_string())
}

/// Adapts "Time Data" rows into time entries.
///
/// Fully blank rows are skipped. Rows without an employee name, with an
/// unusable date, or with invalid hours are rejected with a notice.
pub fn adapt_time_entries(table: &str, rows: &[RawRow]) -> Adapted<TimeEntry> {
    let columns = ColumnMap::resolve(
        rows,
        &[
            JOB_NUMBER,
            JOB_AREA,
            DATE,
            NAME,
            TRADE_CLASS,
            EMPLOYEE_NUMBER,
            RT_HOURS,
            OT_HOURS,
            DESCRIPTION_OF_WORK,
            COMMENTS,
            NIGHT_SHIFT,
            PREMIUM_RATE,
            SUBSISTENCE_RATE,
            TRAVEL_RATE,
            COST_CODE,
        ],
    );

    let mut adapted = Adapted::default();
    for (index, row) in rows.iter().enumerate() {
        if is_blank_row(row) {
            continue;
        }
        match adapt_time_entry(&columns, table, index + 1, row) {
            Ok(entry) => adapted.records.push(entry),
            Err(error) => adapted.notices.push(rejected_notice(&error)),
        }
    }
    adapted
}

fn adapt_time_entry(
    columns: &ColumnMap,
    table: &str,
    row_number: usize,
    row: &RawRow,
) -> EngineResult<TimeEntry> {
    let name = columns.text(row, NAME);
    if name.is_empty() {
        return Err(reject(table, row_number, "missing employee name"));
    }

    let date = columns
        .value(row, DATE)
        .ok_or_else(|| EngineError::InvalidDate {
            value: String::new(),
        })
        .and_then(parse_date_value)
        .map_err(|e| reject(table, row_number, e.to_string()))?;

    let mut entry = TimeEntry::new(name, date);
    entry.rt_hours = parse_hours(columns.value(row, RT_HOURS), "RT Hours")
        .map_err(|message| reject(table, row_number, message))?;
    entry.ot_hours = parse_hours(columns.value(row, OT_HOURS), "OT Hours")
        .map_err(|message| reject(table, row_number, message))?;
    entry.job_number = columns.text(row, JOB_NUMBER);
    entry.job_area = columns.text(row, JOB_AREA);
    entry.employee_number = columns.text(row, EMPLOYEE_NUMBER);
    entry.trade_class = columns.text(row, TRADE_CLASS);
    entry.description_of_work = columns.text(row, DESCRIPTION_OF_WORK);
    entry.comments = columns.text(row, COMMENTS);
    entry.night_shift_flag = if is_truthy(&columns.text(row, NIGHT_SHIFT)) {
        "Y".to_string()
    } else {
        String::new()
    };
    entry.premium_rate = columns.text(row, PREMIUM_RATE);
    entry.subsistence_rate = columns.text(row, SUBSISTENCE_RATE);
    entry.travel_rate = columns.text(row, TRAVEL_RATE);
    entry.cost_code = columns.text(row, COST_CODE);
    Ok(entry)
}

/// Adapts "Employee List" rows into roster records.
///
/// An employee is indirect when the "Indirect / Direct" column reads
/// `INDIRECT` or an "Indirect" column is truthy.
pub fn adapt_roster(table: &str, rows: &[RawRow]) -> Adapted<EmployeeRecord> {
    let columns = ColumnMap::resolve(
        rows,
        &[
            NAME,
            EMPLOYEE_NUMBER,
            OVERRIDE_TRADE_CLASS,
            PREMIUM_RATE,
            SUBSISTENCE_RATE,
            TRAVEL_RATE,
            INDIRECT,
            NIGHT_SHIFT,
            TIME_RECORD_TYPE,
        ],
    );

    let mut adapted = Adapted::default();
    for (index, row) in rows.iter().enumerate() {
        if is_blank_row(row) {
            continue;
        }
        let name = columns.text(row, NAME);
        if name.is_empty() {
            let error = reject(table, index + 1, "missing employee name");
            adapted.notices.push(rejected_notice(&error));
            continue;
        }
        let indirect = columns.text(row, INDIRECT);
        adapted.records.push(EmployeeRecord {
            name,
            employee_number: columns.text(row, EMPLOYEE_NUMBER),
            indirect: indirect.eq_ignore_ascii_case("INDIRECT") || is_truthy(&indirect),
            override_trade_class: columns.text(row, OVERRIDE_TRADE_CLASS),
            premium_rate: columns.text(row, PREMIUM_RATE),
            subsistence_rate: columns.text(row, SUBSISTENCE_RATE),
            travel_rate: columns.text(row, TRAVEL_RATE),
            night_shift: is_truthy(&columns.text(row, NIGHT_SHIFT)),
            time_record_type: columns.text(row, TIME_RECORD_TYPE),
        });
    }
    adapted
}

/// Adapts "Cost Codes" rows. Rows without a code are skipped.
pub fn adapt_cost_codes(rows: &[RawRow]) -> Vec<CostCodeRecord> {
    let columns = ColumnMap::resolve(rows, &[COST_CODE, COST_DESCRIPTION]);
    rows.iter()
        .map(|row| CostCodeRecord {
            code: columns.text(row, COST_CODE),
            description: columns.text(row, COST_DESCRIPTION),
        })
        .filter(|record| !record.code.is_empty())
        .collect()
}

/// Adapts "Job Numbers" rows. Rows without a job number are skipped.
pub fn adapt_jobs(rows: &[RawRow]) -> Vec<JobRecord> {
    let columns = ColumnMap::resolve(rows, &[JOB_LIST_NUMBER, JOB_LIST_AREA, JOB_LIST_DESCRIPTION]);
    rows.iter()
        .map(|row| JobRecord {
            job_number: columns.text(row, JOB_LIST_NUMBER),
            job_area: columns.text(row, JOB_LIST_AREA),
            description: columns.text(row, JOB_LIST_DESCRIPTION),
        })
        .filter(|record| !record.job_number.is_empty())
        .collect()
}

/// Maps a pay code label to its kind.
fn pay_code_kind(label: &str) -> Option<PayCodeKind> {
    let key: String = label
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    match key.as_str() {
        "regular" | "regulartime" | "reg" | "rt" | "straighttime" | "st" => {
            Some(PayCodeKind::Regular)
        }
        "overtime" | "ot" => Some(PayCodeKind::Overtime),
        "subsistence" | "subs" | "sub" => Some(PayCodeKind::Subsistence),
        _ => None,
    }
}

/// Applies a "Pay Codes" table on top of `defaults`.
///
/// Labels are matched as whole words (`RT`, `Regular`, `OT`, `Overtime`,
/// `Subsistence`); unknown labels and blank codes are rejected with a notice.
pub fn adapt_pay_codes(
    table: &str,
    rows: &[RawRow],
    defaults: &PayCodes,
) -> (PayCodes, Vec<ExportNotice>) {
    let columns = ColumnMap::resolve(rows, &[PAY_LABEL, PAY_CODE]);
    let mut codes = defaults.clone();
    let mut notices = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        if is_blank_row(row) {
            continue;
        }
        let label = columns.text(row, PAY_LABEL);
        let code = columns.text(row, PAY_CODE);
        match (pay_code_kind(&label), code.is_empty()) {
            (Some(PayCodeKind::Regular), false) => codes.regular = code,
            (Some(PayCodeKind::Overtime), false) => codes.overtime = code,
            (Some(PayCodeKind::Subsistence), false) => codes.subsistence = code,
            (Some(_), true) => {
                let error = reject(table, index + 1, format!("pay code for '{}' is blank", label));
                notices.push(rejected_notice(&error));
            }
            (None, _) => {
                let error = reject(table, index + 1, format!("unknown pay type '{}'", label));
                notices.push(rejected_notice(&error));
            }
        }
    }

    (codes, notices)
}
