//! Export request and result models.
//!
//! This module contains [`ExportRequest`], the explicit input of one export
//! action, and [`ExportResult`], the files it produced together with the
//! notices explaining anything that was skipped.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CostCodeTable, JobTable, Roster, TimeEntry};

/// Everything one export action reads.
///
/// The request only borrows the tables; it is built fresh for every export
/// and never stored.
#[derive(Debug, Clone, Copy)]
pub struct ExportRequest<'a> {
    /// The calendar date to export.
    pub export_date: NaiveDate,
    /// The full time-entry table (all dates).
    pub time_entries: &'a [TimeEntry],
    /// The employee roster.
    pub roster: &'a Roster,
    /// Cost code descriptions.
    pub cost_codes: &'a CostCodeTable,
    /// Job area descriptions.
    pub jobs: &'a JobTable,
}

impl<'a> ExportRequest<'a> {
    /// Creates a request for a date over the given tables.
    pub fn new(
        export_date: NaiveDate,
        time_entries: &'a [TimeEntry],
        roster: &'a Roster,
        cost_codes: &'a CostCodeTable,
        jobs: &'a JobTable,
    ) -> Self {
        Self {
            export_date,
            time_entries,
            roster,
            cost_codes,
            jobs,
        }
    }

    /// Returns the entries dated on the export date, in table order.
    pub fn entries_for_date(&self) -> Vec<&'a TimeEntry> {
        self.time_entries
            .iter()
            .filter(|e| e.date == self.export_date)
            .collect()
    }
}

/// Which layout produced a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFileKind {
    /// The combined Daily Time workbook.
    DailyTime,
    /// A per-job Daily Import workbook.
    DailyImport,
}

/// One produced workbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportFile {
    /// The download file name.
    pub file_name: String,
    /// The layout that produced the file.
    pub kind: ExportFileKind,
    /// The job number for Daily Import files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_number: Option<String>,
    /// Number of data rows written.
    pub row_count: usize,
    /// The workbook bytes.
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

/// How serious a notice is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeSeverity {
    /// Expected absence (nothing to do).
    Info,
    /// Something was dropped or skipped.
    Warning,
    /// An output could not be produced.
    Error,
}

/// Machine-readable reason for a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NoticeCode {
    /// No entries exist for the export date.
    NoEntries,
    /// A storage table was not present.
    TableMissing,
    /// A storage row was rejected while adapting it.
    RowRejected,
    /// A template was not available.
    TemplateMissing,
    /// A template could not be parsed.
    TemplateInvalid,
    /// A template did not match the expected layout.
    TemplateMismatch,
    /// The date label cell was not found in the Daily Time template.
    DateLabelMissing,
    /// A job produced no line items.
    JobEmpty,
    /// Employees did not fit in a Daily Time band.
    BandOverflow,
    /// The Daily Time comment summary hit its row ceiling.
    SummaryTruncated,
    /// The workbook writer failed.
    WorkbookFailed,
}

/// A human-readable note about something skipped or dropped.
///
/// Notices are returned to the caller for display; they are the export's
/// equivalent of an audit warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportNotice {
    /// Why the notice was raised.
    pub code: NoticeCode,
    /// A description for the user.
    pub message: String,
    /// How serious it is.
    pub severity: NoticeSeverity,
}

impl ExportNotice {
    /// Creates an informational notice.
    pub fn info(code: NoticeCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            severity: NoticeSeverity::Info,
        }
    }

    /// Creates a warning notice.
    pub fn warning(code: NoticeCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            severity: NoticeSeverity::Warning,
        }
    }

    /// Creates an error notice.
    pub fn error(code: NoticeCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            severity: NoticeSeverity::Error,
        }
    }
}

/// Everything one export action produced.
///
/// # Example
///
/// ```
/// use timesheet_export::models::ExportResult;
/// use chrono::NaiveDate;
///
/// let result = ExportResult::empty(NaiveDate::from_ymd_opt(2025, 9, 23).unwrap());
/// assert!(result.is_empty());
/// assert!(result.files().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    /// The date that was exported.
    pub export_date: NaiveDate,
    /// The Daily Time workbook, if produced.
    pub daily_time: Option<ExportFile>,
    /// Daily Import workbooks, one per job, in first-appearance order.
    pub daily_imports: Vec<ExportFile>,
    /// Notes about everything skipped or dropped.
    pub notices: Vec<ExportNotice>,
}

impl ExportResult {
    /// Creates a result with no files and no notices.
    pub fn empty(export_date: NaiveDate) -> Self {
        Self {
            export_date,
            daily_time: None,
            daily_imports: Vec::new(),
            notices: Vec::new(),
        }
    }

    /// Returns true if no file was produced.
    pub fn is_empty(&self) -> bool {
        self.daily_time.is_none() && self.daily_imports.is_empty()
    }

    /// Returns every produced file, Daily Time first.
    pub fn files(&self) -> Vec<&ExportFile> {
        self.daily_time
            .iter()
            .chain(self.daily_imports.iter())
            .collect()
    }

    /// Finds the Daily Import file for a job number.
    pub fn daily_import_for(&self, job_number: &str) -> Option<&ExportFile> {
        self.daily_imports
            .iter()
            .find(|f| f.job_number.as_deref() == Some(job_number))
    }

    /// Builds the serializable summary of this result.
    pub fn manifest(&self, export_id: Uuid) -> ExportManifest {
        ExportManifest {
            export_id,
            export_date: self.export_date,
            files: self
                .files()
                .into_iter()
                .map(|f| ManifestFile {
                    file_name: f.file_name.clone(),
                    kind: f.kind,
                    job_number: f.job_number.clone(),
                    row_count: f.row_count,
                    size_bytes: f.bytes.len(),
                })
                .collect(),
            notices: self.notices.clone(),
        }
    }
}

/// A file entry in an [`ExportManifest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestFile {
    /// The download file name.
    pub file_name: String,
    /// The layout that produced the file.
    pub kind: ExportFileKind,
    /// The job number for Daily Import files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_number: Option<String>,
    /// Number of data rows written.
    pub row_count: usize,
    /// Size of the workbook in bytes.
    pub size_bytes: usize,
}

/// Serializable summary of an export, without the workbook bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportManifest {
    /// Identifier of this export action.
    pub export_id: Uuid,
    /// The date that was exported.
    pub export_date: NaiveDate,
    /// The produced files.
    pub files: Vec<ManifestFile>,
    /// Notes about everything skipped or dropped.
    pub notices: Vec<ExportNotice>,
}

/// Returns `"<MM-DD-YYYY> - Daily Time.xlsx"`.
pub fn daily_time_file_name(date: NaiveDate) -> String {
    format!("{} - Daily Time.xlsx", date.format("%m-%d-%Y"))
}

/// Returns `"<MM-DD-YYYY> - <job> - Daily Import.xlsx"`.
pub fn daily_import_file_name(date: NaiveDate, job_number: &str) -> String {
    format!("{} - {} - Daily Import.xlsx", date.format("%m-%d-%Y"), job_number)
}
