//! Export orchestration.
//!
//! Filters the time entries to one date, enriches them, and runs the Daily
//! Time engine once and the Daily Import engine once per job. Every output
//! that cannot be produced is reported as a notice; nothing here aborts the
//! whole export except a storage failure while reading the input tables.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::config::{ExportSettings, PayCodes};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    daily_import_file_name, daily_time_file_name, CostCodeTable, ExportFile, ExportFileKind,
    ExportNotice, ExportRequest, ExportResult, JobTable, NoticeCode, Roster, TimeEntry,
};
use crate::storage::{
    adapt_cost_codes, adapt_jobs, adapt_pay_codes, adapt_roster, adapt_time_entries,
    read_first_table, Storage, COST_CODES_TABLES, EMPLOYEE_LIST_TABLES, JOB_NUMBERS_TABLES,
    PAY_CODES_TABLES, TIME_DATA_TABLES,
};
use crate::templates::{
    render_workbook, DailyTimeLayout, TemplateDefinition, TemplateKind, TimeEntriesLayout,
    LAYOUT_VERSION,
};

use super::daily_import::{distinct_jobs, layout_daily_import};
use super::daily_time::layout_daily_time;
use super::enrichment::enrich_entries;

/// Typed tables read from storage, plus notices about what was missing.
#[derive(Debug, Clone, Default)]
pub struct ExportInputs {
    /// Every adapted time entry (all dates).
    pub time_entries: Vec<TimeEntry>,
    /// The roster.
    pub roster: Roster,
    /// Cost code descriptions.
    pub cost_codes: CostCodeTable,
    /// Job area descriptions.
    pub jobs: JobTable,
    /// Pay codes after applying any "Pay Codes" table.
    pub pay_codes: PayCodes,
    /// Missing tables and rejected rows.
    pub notices: Vec<ExportNotice>,
}

impl ExportInputs {
    /// Borrows the inputs as a request for one date.
    pub fn request(&self, export_date: NaiveDate) -> ExportRequest<'_> {
        ExportRequest::new(
            export_date,
            &self.time_entries,
            &self.roster,
            &self.cost_codes,
            &self.jobs,
        )
    }
}

fn table_missing(names: &[&str], consequence: &str, notices: &mut Vec<ExportNotice>) {
    let table = names.first().copied().unwrap_or_default();
    warn!(table = %table, "Table not found");
    notices.push(ExportNotice::warning(
        NoticeCode::TableMissing,
        format!("Table '{}' was not found; {}", table, consequence),
    ));
}

/// Reads and adapts every table the export uses.
///
/// Missing tables become notices and empty data. The "Pay Codes" table is
/// optional and silently falls back to the configured codes.
///
/// # Errors
///
/// Propagates `StorageError` if a table exists but cannot be read.
pub fn load_export_inputs<S: Storage + ?Sized>(
    storage: &S,
    settings: &ExportSettings,
) -> EngineResult<ExportInputs> {
    let mut inputs = ExportInputs {
        pay_codes: settings.pay_codes.clone(),
        ..Default::default()
    };

    match read_first_table(storage, TIME_DATA_TABLES)? {
        Some((table, rows)) => {
            let adapted = adapt_time_entries(&table, &rows);
            inputs.time_entries = adapted.records;
            inputs.notices.extend(adapted.notices);
        }
        None => table_missing(TIME_DATA_TABLES, "there is nothing to export", &mut inputs.notices),
    }

    match read_first_table(storage, EMPLOYEE_LIST_TABLES)? {
        Some((table, rows)) => {
            let adapted = adapt_roster(&table, &rows);
            inputs.roster = Roster::new(adapted.records);
            inputs.notices.extend(adapted.notices);
        }
        None => table_missing(
            EMPLOYEE_LIST_TABLES,
            "every employee is treated as direct",
            &mut inputs.notices,
        ),
    }

    match read_first_table(storage, COST_CODES_TABLES)? {
        Some((_, rows)) => inputs.cost_codes = CostCodeTable::new(adapt_cost_codes(&rows)),
        None => table_missing(
            COST_CODES_TABLES,
            "cost code descriptions are left blank",
            &mut inputs.notices,
        ),
    }

    match read_first_table(storage, JOB_NUMBERS_TABLES)? {
        Some((_, rows)) => inputs.jobs = JobTable::new(adapt_jobs(&rows)),
        None => debug!("Job list not present"),
    }

    match read_first_table(storage, PAY_CODES_TABLES)? {
        Some((table, rows)) => {
            let (pay_codes, notices) = adapt_pay_codes(&table, &rows, &settings.pay_codes);
            inputs.pay_codes = pay_codes;
            inputs.notices.extend(notices);
        }
        None => debug!("Pay code table not present, using configured codes"),
    }

    debug!(
        entries = inputs.time_entries.len(),
        employees = inputs.roster.len(),
        cost_codes = inputs.cost_codes.len(),
        jobs = inputs.jobs.len(),
        "Export inputs loaded"
    );
    Ok(inputs)
}

/// The two templates of an export, or the notice explaining why one is unusable.
#[derive(Debug, Clone)]
pub struct ExportTemplates {
    /// The Daily Time template.
    pub daily_time: Result<TemplateDefinition, ExportNotice>,
    /// The TimeEntries template.
    pub time_entries: Result<TemplateDefinition, ExportNotice>,
}

impl ExportTemplates {
    /// Reads, parses and validates both templates from storage.
    pub fn load<S: Storage + ?Sized>(storage: &S) -> Self {
        let daily = DailyTimeLayout::STANDARD;
        let entries = TimeEntriesLayout::STANDARD;
        Self {
            daily_time: load_template(
                storage,
                TemplateKind::DailyTime,
                daily.header_row,
                &daily.required_headers(),
            ),
            time_entries: load_template(
                storage,
                TemplateKind::TimeEntries,
                entries.header_row,
                &entries.required_headers(),
            ),
        }
    }

    /// The bundled standard templates.
    pub fn standard() -> EngineResult<Self> {
        Ok(Self {
            daily_time: Ok(TemplateDefinition::standard(TemplateKind::DailyTime)?),
            time_entries: Ok(TemplateDefinition::standard(TemplateKind::TimeEntries)?),
        })
    }
}

fn load_template<S: Storage + ?Sized>(
    storage: &S,
    kind: TemplateKind,
    header_row: u32,
    required_headers: &[(u16, &str)],
) -> Result<TemplateDefinition, ExportNotice> {
    let source = match storage.read_template(kind) {
        Ok(Some(source)) => source,
        Ok(None) => {
            warn!(template = kind.name(), "Template not available");
            return Err(ExportNotice::warning(
                NoticeCode::TemplateMissing,
                format!("{} template is not available; its files were not produced", kind.name()),
            ));
        }
        Err(error) => {
            warn!(template = kind.name(), error = %error, "Template could not be read");
            return Err(ExportNotice::error(NoticeCode::TemplateMissing, error.to_string()));
        }
    };

    let template = TemplateDefinition::parse(kind, &source).map_err(|error| {
        warn!(template = kind.name(), error = %error, "Template invalid");
        ExportNotice::error(NoticeCode::TemplateInvalid, error.to_string())
    })?;

    template
        .validate(LAYOUT_VERSION, header_row, required_headers)
        .map_err(|error| {
            warn!(template = kind.name(), error = %error, "Template mismatch");
            ExportNotice::error(NoticeCode::TemplateMismatch, error.to_string())
        })?;

    Ok(template)
}

fn workbook_failed(error: EngineError) -> ExportNotice {
    warn!(error = %error, "Workbook could not be written");
    ExportNotice::error(NoticeCode::WorkbookFailed, error.to_string())
}

/// Runs one export over an explicit request.
///
/// `settings.pay_codes` must already include any storage overrides.
pub fn export_request(
    request: &ExportRequest<'_>,
    templates: &ExportTemplates,
    settings: &ExportSettings,
) -> ExportResult {
    let export_date = request.export_date;
    let mut result = ExportResult::empty(export_date);

    let day_entries = request.entries_for_date();
    if day_entries.is_empty() {
        info!(export_date = %export_date, "No entries for export date");
        result.notices.push(ExportNotice::info(
            NoticeCode::NoEntries,
            format!("No time entries for {}; nothing to export", export_date),
        ));
        return result;
    }

    let enriched = enrich_entries(day_entries, request.roster, request.jobs);

    match &templates.daily_time {
        Ok(template) => {
            let laid_out = layout_daily_time(
                template,
                &DailyTimeLayout::STANDARD,
                &enriched,
                request.cost_codes,
                export_date,
                &settings.date_label,
            );
            result.notices.extend(laid_out.notices.iter().cloned());

            if laid_out.placements.is_empty() && laid_out.dropped.is_empty() {
                result.notices.push(ExportNotice::info(
                    NoticeCode::NoEntries,
                    format!("No hours recorded for {}; Daily Time was not produced", export_date),
                ));
            } else {
                let file_name = daily_time_file_name(export_date);
                match render_workbook(&laid_out.sheet, &file_name, export_date) {
                    Ok(bytes) => {
                        result.daily_time = Some(ExportFile {
                            file_name,
                            kind: ExportFileKind::DailyTime,
                            job_number: None,
                            row_count: laid_out.placements.iter().map(|p| p.rows_used as usize).sum(),
                            bytes,
                        });
                    }
                    Err(error) => result.notices.push(workbook_failed(error)),
                }
            }
        }
        Err(notice) => result.notices.push(notice.clone()),
    }

    let jobs = distinct_jobs(&enriched);
    match &templates.time_entries {
        Ok(template) => {
            for job_number in &jobs {
                let laid_out = layout_daily_import(
                    template,
                    &TimeEntriesLayout::STANDARD,
                    job_number,
                    &enriched,
                    settings,
                    export_date,
                );
                let Some(laid_out) = laid_out else {
                    result.notices.push(ExportNotice::info(
                        NoticeCode::JobEmpty,
                        format!("Job {} has no hours; no Daily Import file", job_number),
                    ));
                    continue;
                };

                let file_name = daily_import_file_name(export_date, job_number);
                match render_workbook(&laid_out.sheet, &file_name, export_date) {
                    Ok(bytes) => result.daily_imports.push(ExportFile {
                        file_name,
                        kind: ExportFileKind::DailyImport,
                        job_number: Some(job_number.clone()),
                        row_count: laid_out.row_count,
                        bytes,
                    }),
                    Err(error) => result.notices.push(workbook_failed(error)),
                }
            }
        }
        Err(notice) if !jobs.is_empty() => result.notices.push(notice.clone()),
        Err(_) => {}
    }

    info!(
        export_date = %export_date,
        entries = enriched.len(),
        jobs = jobs.len(),
        files = result.files().len(),
        notices = result.notices.len(),
        "Export completed"
    );
    result
}

/// Reads everything from storage and exports one date.
///
/// Input notices (missing tables, rejected rows) come first in the result.
///
/// # Errors
///
/// Propagates `StorageError` from reading the input tables.
pub fn export_day<S: Storage + ?Sized>(
    storage: &S,
    settings: &ExportSettings,
    export_date: NaiveDate,
) -> EngineResult<ExportResult> {
    let inputs = load_export_inputs(storage, settings)?;
    let templates = ExportTemplates::load(storage);

    let settings = ExportSettings {
        pay_codes: inputs.pay_codes.clone(),
        ..settings.clone()
    };

    let mut result = export_request(&inputs.request(export_date), &templates, &settings);
    let mut notices = inputs.notices;
    notices.append(&mut result.notices);
    result.notices = notices;
    Ok(result)
}
