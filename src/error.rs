//! Error types for the timesheet export engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine can report. Most export problems are not
//! errors at all (see [`crate::models::ExportNotice`]); the variants here are
//! the conditions that stop a single output file or a storage read.

use thiserror::Error;

/// The main error type for the export engine.
///
/// # Example
///
/// ```
/// use timesheet_export::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/export.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/export.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The storage adapter failed while reading a table or template.
    #[error("Storage error reading '{table}': {message}")]
    StorageError {
        /// The table or template being read.
        table: String,
        /// A description of the failure.
        message: String,
    },

    /// A storage row could not be adapted into a typed record.
    #[error("Invalid row {row} in '{table}': {message}")]
    InvalidRow {
        /// The table the row came from.
        table: String,
        /// The 1-based data row number within the table.
        row: usize,
        /// A description of what made the row invalid.
        message: String,
    },

    /// A template document could not be parsed.
    #[error("Failed to parse template '{template}': {message}")]
    TemplateParseError {
        /// The template name.
        template: String,
        /// A description of the parse error.
        message: String,
    },

    /// A template was found but its geometry does not match the layout.
    #[error("Template '{template}' does not match the expected layout: {message}")]
    TemplateMismatch {
        /// The template name.
        template: String,
        /// What did not match.
        message: String,
    },

    /// The workbook writer failed while producing an output file.
    #[error("Failed to write workbook '{file}': {message}")]
    WorkbookError {
        /// The output file name.
        file: String,
        /// The writer's error message.
        message: String,
    },

    /// A date value could not be interpreted.
    #[error("Invalid date: {value}")]
    InvalidDate {
        /// The offending value.
        value: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/export.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/export.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/export.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/export.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_storage_error_displays_table_and_message() {
        let error = EngineError::StorageError {
            table: "Time Data".to_string(),
            message: "permission denied".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Storage error reading 'Time Data': permission denied"
        );
    }

    #[test]
    fn test_invalid_row_displays_table_row_and_message() {
        let error = EngineError::InvalidRow {
            table: "Time Data".to_string(),
            row: 7,
            message: "unrecognised date 'tomorrow'".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid row 7 in 'Time Data': unrecognised date 'tomorrow'"
        );
    }

    #[test]
    fn test_template_mismatch_displays_template_and_message() {
        let error = EngineError::TemplateMismatch {
            template: "TimeEntries".to_string(),
            message: "column 10 header is 'Code', expected 'Pay Code'".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Template 'TimeEntries' does not match the expected layout: column 10 header is 'Code', expected 'Pay Code'"
        );
    }

    #[test]
    fn test_workbook_error_displays_file_and_message() {
        let error = EngineError::WorkbookError {
            file: "09-23-2025 - Daily Time.xlsx".to_string(),
            message: "row out of range".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to write workbook '09-23-2025 - Daily Time.xlsx': row out of range"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_date() -> EngineResult<()> {
            Err(EngineError::InvalidDate {
                value: "31/31/2025".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_date()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
