//! Export engines.
//!
//! This module contains:
//! - [`enrich_entries`]: roster and job enrichment of raw entries
//! - [`classify_entry`]: pay-code line items for one entry
//! - [`layout_daily_time`]: the combined Daily Time sheet
//! - [`layout_daily_import`]: one TimeEntries sheet per job
//! - [`export_day`]: the orchestrator tying them together

mod daily_import;
mod daily_time;
mod enrichment;
mod job_summary;
mod orchestrator;
mod pay_codes;

pub use daily_import::{distinct_jobs, job_line_items, layout_daily_import, DailyImportSheet};
pub use daily_time::{
    layout_daily_time, rows_needed, DailyTimeSheet, DroppedEmployee, EmployeePlacement,
};
pub use enrichment::{enrich_entries, enrich_entry, fill_job_description};
pub use job_summary::{group_job_comments, write_job_summary, JobCommentGroup, SummaryOutcome};
pub use orchestrator::{
    export_day, export_request, load_export_inputs, ExportInputs, ExportTemplates,
};
pub use pay_codes::{classify_entries, classify_entry, is_visible};
