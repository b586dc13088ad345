//! Timesheet export engine.
//!
//! This crate turns a day of field time entries into the workbooks a payroll
//! office imports: one combined "Daily Time" sheet grouping employees into
//! indirect and direct bands, and one "Daily Import" sheet per job listing
//! regular, overtime and subsistence line items.
//!
//! Tables and templates are read through a [`storage::Storage`] adapter; the
//! export itself is [`export::export_day`].

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod storage;
pub mod templates;
