//! Request types for the timesheet export API.
//!
//! This module defines the JSON body of `POST /export` and the parsing of
//! dates taken from download paths.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Request body for the `/export` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequestBody {
    /// The calendar date to export.
    pub export_date: NaiveDate,
}

/// Parses a `YYYY-MM-DD` path segment.
///
/// # Errors
///
/// Returns `InvalidDate` carrying the raw segment.
pub fn parse_export_date(value: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| EngineError::InvalidDate {
        value: value.to_string(),
    })
}
