//! Renders a [`Sheet`] as an `.xlsx` workbook.

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, FormatUnderline, Workbook, XlsxError};

use crate::error::{EngineError, EngineResult};

use super::sheet::{CellValue, Sheet};

/// Writes a sheet into a single-sheet workbook and returns its bytes.
///
/// The document creation time is set to `created`, so rendering the same
/// sheet for the same date always yields the same bytes.
///
/// # Errors
///
/// Returns `WorkbookError` naming `file_name` if the writer fails.
pub fn render_workbook(sheet: &Sheet, file_name: &str, created: NaiveDate) -> EngineResult<Vec<u8>> {
    write_workbook(sheet, created).map_err(|e| EngineError::WorkbookError {
        file: file_name.to_string(),
        message: e.to_string(),
    })
}

fn write_workbook(sheet: &Sheet, created: NaiveDate) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();

    let created = ExcelDateTime::from_ymd(
        created.year() as u16,
        created.month() as u8,
        created.day() as u8,
    )?;
    let properties = DocProperties::new().set_creation_datetime(&created);
    workbook.set_properties(&properties);

    let bold = Format::new().set_bold();
    let underline = Format::new().set_underline(FormatUnderline::Single);
    let heading = Format::new()
        .set_bold()
        .set_underline(FormatUnderline::Single);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet.name())?;

    for (column, width) in sheet.column_widths() {
        worksheet.set_column_width(column.saturating_sub(1), width)?;
    }

    for ((row, column), cell) in sheet.cells() {
        let (row, column) = (row.saturating_sub(1), column.saturating_sub(1));
        let format = match (cell.style.bold, cell.style.underline) {
            (false, false) => None,
            (true, false) => Some(&bold),
            (false, true) => Some(&underline),
            (true, true) => Some(&heading),
        };

        match (&cell.value, format) {
            (CellValue::Text(text), Some(format)) => {
                worksheet.write_string_with_format(row, column, text, format)?;
            }
            (CellValue::Text(text), None) => {
                worksheet.write_string(row, column, text)?;
            }
            (CellValue::Number(number), Some(format)) => {
                let number = number.to_f64().unwrap_or_default();
                worksheet.write_number_with_format(row, column, number, format)?;
            }
            (CellValue::Number(number), None) => {
                worksheet.write_number(row, column, number.to_f64().unwrap_or_default())?;
            }
        }
    }

    for row in sheet.hidden_rows() {
        worksheet.set_row_hidden(row.saturating_sub(1))?;
    }

    workbook.save_to_buffer()
}
