//! HTTP request handlers for the timesheet export API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::export::export_day;
use crate::models::{daily_import_file_name, daily_time_file_name, ExportFile, ExportResult};

use super::request::{parse_export_date, ExportRequestBody};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Media type of `.xlsx` downloads.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/export", post(export_handler))
        .route("/exports/:date/daily-time", get(daily_time_handler))
        .route("/exports/:date/jobs/:job", get(daily_import_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

fn error_response(error: ApiErrorResponse) -> Response {
    (
        error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error.error),
    )
        .into_response()
}

fn file_response(file: &ExportFile) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.file_name),
            ),
        ],
        file.bytes.clone(),
    )
        .into_response()
}

/// Runs one export and logs its outcome.
fn run_export(
    state: &AppState,
    export_date: NaiveDate,
    correlation_id: Uuid,
) -> Result<ExportResult, ApiErrorResponse> {
    let start_time = Instant::now();
    match export_day(state.storage(), state.config().settings(), export_date) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                export_date = %export_date,
                files = result.files().len(),
                notices = result.notices.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Export completed successfully"
            );
            Ok(result)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                export_date = %export_date,
                error = %err,
                "Export failed"
            );
            Err(err.into())
        }
    }
}

/// Handler for POST /export endpoint.
///
/// Runs the export for the requested date and returns the manifest.
async fn export_handler(
    State(state): State<AppState>,
    payload: Result<Json<ExportRequestBody>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing export request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return error_response(ApiErrorResponse::new(StatusCode::BAD_REQUEST, error));
        }
    };

    match run_export(&state, request.export_date, correlation_id) {
        Ok(result) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            Json(result.manifest(correlation_id)),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

/// Handler for GET /exports/:date/daily-time.
async fn daily_time_handler(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, date = %date, "Daily Time download requested");

    let export_date = match parse_export_date(&date) {
        Ok(export_date) => export_date,
        Err(err) => return error_response(err.into()),
    };

    match run_export(&state, export_date, correlation_id) {
        Ok(result) => match &result.daily_time {
            Some(file) => file_response(file),
            None => error_response(ApiErrorResponse::new(
                StatusCode::NOT_FOUND,
                ApiError::file_not_found(&daily_time_file_name(export_date)),
            )),
        },
        Err(error) => error_response(error),
    }
}

/// Handler for GET /exports/:date/jobs/:job.
async fn daily_import_handler(
    State(state): State<AppState>,
    Path((date, job)): Path<(String, String)>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        date = %date,
        job_number = %job,
        "Daily Import download requested"
    );

    let export_date = match parse_export_date(&date) {
        Ok(export_date) => export_date,
        Err(err) => return error_response(err.into()),
    };

    match run_export(&state, export_date, correlation_id) {
        Ok(result) => match result.daily_import_for(job.trim()) {
            Some(file) => file_response(file),
            None => error_response(ApiErrorResponse::new(
                StatusCode::NOT_FOUND,
                ApiError::file_not_found(&daily_import_file_name(export_date, job.trim())),
            )),
        },
        Err(error) => error_response(error),
    }
}

/// Handler for GET /health.
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}
