//! Core data models for the timesheet export engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod export;
mod pay_code;
mod time_entry;

pub use employee::{CostCodeRecord, CostCodeTable, EmployeeRecord, JobRecord, JobTable, Roster};
pub use export::{
    daily_import_file_name, daily_time_file_name, ExportFile, ExportFileKind, ExportManifest,
    ExportNotice, ExportRequest, ExportResult, ManifestFile, NoticeCode, NoticeSeverity,
};
pub use pay_code::{EnrichedEntry, PayCodeKind, PayCodeLineItem};
pub use time_entry::{clean_text, is_blank, pad_job_area, parse_rate, TimeEntry, JOB_AREA_WIDTH};
