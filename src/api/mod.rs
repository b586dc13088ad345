//! HTTP API module for the timesheet export engine.
//!
//! This module exposes the export over REST: a JSON manifest endpoint and
//! download endpoints for the produced workbooks.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{create_router, XLSX_CONTENT_TYPE};
pub use request::{parse_export_date, ExportRequestBody};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
