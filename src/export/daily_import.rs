//! Per-job Daily Import layout engine.
//!
//! One TimeEntries sheet per job number, one row per pay-code line item,
//! starting at the template's first data row.

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::debug;

use crate::config::ExportSettings;
use crate::models::{clean_text, EnrichedEntry, PayCodeLineItem};
use crate::templates::{time_entries_columns as col, Sheet, TemplateDefinition, TimeEntriesLayout};

use super::pay_codes::classify_entry;

/// A laid-out Daily Import sheet for one job.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyImportSheet {
    /// The job number.
    pub job_number: String,
    /// The filled sheet.
    pub sheet: Sheet,
    /// Line item rows written.
    pub row_count: usize,
}

/// Distinct non-blank job numbers in first-appearance order.
pub fn distinct_jobs(entries: &[EnrichedEntry]) -> Vec<String> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .map(|e| clean_text(&e.entry.job_number))
        .filter(|job| !job.is_empty())
        .filter(|job| seen.insert(job.clone()))
        .collect()
}

/// Line items of one job's entries, in entry order.
pub fn job_line_items<'a>(entries: &'a [EnrichedEntry], job_number: &str) -> Vec<PayCodeLineItem<'a>> {
    entries
        .iter()
        .filter(|e| e.entry.job_number.trim() == job_number)
        .flat_map(classify_entry)
        .collect()
}

fn write_line_item(
    sheet: &mut Sheet,
    row: u32,
    item: &PayCodeLineItem<'_>,
    settings: &ExportSettings,
    export_date: NaiveDate,
) {
    let enriched = item.source;
    let entry = &enriched.entry;

    sheet.write_text(row, col::DATE, export_date.format("%Y-%m-%d").to_string());
    sheet.write_text(row, col::TIME_RECORD_TYPE, enriched.time_record_type());
    sheet.write_text(row, col::PERSON_NUMBER, entry.employee_number.clone());
    sheet.write_text(row, col::EMPLOYEE_NAME, entry.employee_name.clone());
    sheet.write_text(row, col::TRADE_CLASS, entry.trade_class.clone());
    sheet.write_text(row, col::POST_TO_PAYROLL, settings.post_to_payroll.clone());
    sheet.write_text(row, col::COST_CODE, entry.cost_code.clone());
    sheet.write_text(row, col::JOB_AREA, entry.padded_job_area());
    sheet.write_text(row, col::PAY_CODE, settings.pay_codes.code_for(item.kind));
    sheet.write_number(row, col::HOURS, item.hours);
    sheet.write_text(row, col::NIGHT_SHIFT, entry.night_shift_flag.clone());
    sheet.write_text(row, col::RATE, item.rate_field.clone());
}

/// Lays out the Daily Import sheet for one job.
///
/// Returns `None` when the job has no line items; an empty job produces no
/// file.
pub fn layout_daily_import(
    template: &TemplateDefinition,
    layout: &TimeEntriesLayout,
    job_number: &str,
    entries: &[EnrichedEntry],
    settings: &ExportSettings,
    export_date: NaiveDate,
) -> Option<DailyImportSheet> {
    let items = job_line_items(entries, job_number);
    if items.is_empty() {
        debug!(job_number = %job_number, "Job has no line items");
        return None;
    }

    let mut sheet = template.to_sheet();
    for (offset, item) in items.iter().enumerate() {
        write_line_item(
            &mut sheet,
            layout.first_data_row + offset as u32,
            item,
            settings,
            export_date,
        );
    }

    debug!(job_number = %job_number, rows = items.len(), "Daily Import laid out");
    Some(DailyImportSheet {
        job_number: job_number.to_string(),
        sheet,
        row_count: items.len(),
    })
}
