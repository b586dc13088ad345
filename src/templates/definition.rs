//! Template descriptors.
//!
//! A template is a YAML document describing the static content of one
//! workbook: sheet name, header row, header columns and any fixed cells
//! (titles, the date label). The layout engines replay a descriptor into a
//! [`Sheet`] and then place data on top of it.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::sheet::{CellStyle, CellValue, Sheet};

/// The standard Daily Time descriptor shipped with the crate.
pub const STANDARD_DAILY_TIME: &str = include_str!("../../data/templates/daily_time.yaml");

/// The standard TimeEntries descriptor shipped with the crate.
pub const STANDARD_TIME_ENTRIES: &str = include_str!("../../data/templates/time_entries.yaml");

/// Which template a descriptor describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    /// The combined Daily Time workbook.
    DailyTime,
    /// The per-job TimeEntries (Daily Import) workbook.
    TimeEntries,
}

impl TemplateKind {
    /// The display name used in notices and errors.
    pub fn name(self) -> &'static str {
        match self {
            TemplateKind::DailyTime => "Daily Time",
            TemplateKind::TimeEntries => "TimeEntries",
        }
    }

    /// File name of the descriptor inside a templates directory.
    pub fn file_name(self) -> &'static str {
        match self {
            TemplateKind::DailyTime => "daily_time.yaml",
            TemplateKind::TimeEntries => "time_entries.yaml",
        }
    }

    /// The bundled standard descriptor source.
    pub fn standard_source(self) -> &'static str {
        match self {
            TemplateKind::DailyTime => STANDARD_DAILY_TIME,
            TemplateKind::TimeEntries => STANDARD_TIME_ENTRIES,
        }
    }
}

/// One header column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateColumn {
    /// 1-based column.
    pub column: u16,
    /// Header text.
    pub header: String,
    /// Width in character units.
    #[serde(default)]
    pub width: Option<f64>,
}

/// One fixed cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateCell {
    /// 1-based row.
    pub row: u32,
    /// 1-based column.
    pub column: u16,
    /// Cell text.
    pub value: String,
    /// Bold font.
    #[serde(default)]
    pub bold: bool,
}

/// A parsed template descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateDefinition {
    /// Template name.
    pub name: String,
    /// Geometry version the template was drawn for.
    pub layout_version: u32,
    /// Worksheet name.
    pub sheet_name: String,
    /// Row carrying the column headers.
    pub header_row: u32,
    /// Header columns.
    #[serde(default)]
    pub columns: Vec<TemplateColumn>,
    /// Fixed cells.
    #[serde(default)]
    pub cells: Vec<TemplateCell>,
}

impl TemplateDefinition {
    /// Parses a descriptor.
    ///
    /// # Errors
    ///
    /// Returns `TemplateParseError` if the YAML is invalid.
    pub fn parse(kind: TemplateKind, source: &str) -> EngineResult<Self> {
        serde_yaml::from_str(source).map_err(|e| EngineError::TemplateParseError {
            template: kind.name().to_string(),
            message: e.to_string(),
        })
    }

    /// Parses the bundled standard descriptor for a kind.
    pub fn standard(kind: TemplateKind) -> EngineResult<Self> {
        Self::parse(kind, kind.standard_source())
    }

    /// Returns the header text declared for a column.
    pub fn header(&self, column: u16) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.column == column)
            .map(|c| c.header.as_str())
    }

    /// Checks the descriptor against the engine's geometry.
    ///
    /// Header text is compared ignoring case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `TemplateMismatch` naming the first difference found.
    pub fn validate(
        &self,
        layout_version: u32,
        header_row: u32,
        required_headers: &[(u16, &str)],
    ) -> EngineResult<()> {
        let mismatch = |message: String| EngineError::TemplateMismatch {
            template: self.name.clone(),
            message,
        };

        if self.layout_version != layout_version {
            return Err(mismatch(format!(
                "layout_version is {}, expected {}",
                self.layout_version, layout_version
            )));
        }
        if self.header_row != header_row {
            return Err(mismatch(format!(
                "header_row is {}, expected {}",
                self.header_row, header_row
            )));
        }
        for (column, expected) in required_headers {
            match self.header(*column) {
                Some(actual) if actual.trim().eq_ignore_ascii_case(expected.trim()) => {}
                Some(actual) => {
                    return Err(mismatch(format!(
                        "column {} header is '{}', expected '{}'",
                        column, actual, expected
                    )));
                }
                None => {
                    return Err(mismatch(format!(
                        "column {} header is missing, expected '{}'",
                        column, expected
                    )));
                }
            }
        }
        Ok(())
    }

    /// Replays the descriptor into a fresh sheet.
    pub fn to_sheet(&self) -> Sheet {
        let mut sheet = Sheet::new(&self.sheet_name);
        for cell in &self.cells {
            let style = if cell.bold {
                CellStyle::BOLD
            } else {
                CellStyle::PLAIN
            };
            sheet.write(
                cell.row,
                cell.column,
                CellValue::Text(cell.value.clone()),
                style,
            );
        }
        for column in &self.columns {
            if !column.header.is_empty() {
                sheet.write(
                    self.header_row,
                    column.column,
                    CellValue::Text(column.header.clone()),
                    CellStyle::BOLD,
                );
            }
            if let Some(width) = column.width {
                sheet.set_column_width(column.column, width);
            }
        }
        sheet
    }
}
