//! In-memory worksheet model.
//!
//! Layout engines write into a [`Sheet`]; the xlsx writer renders it. Keeping
//! the two apart lets tests inspect placements cell by cell.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;

/// A cell value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    /// Text.
    Text(String),
    /// A number, kept exact until rendering.
    Number(Decimal),
}

impl CellValue {
    /// Returns the text if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) => Some(text),
            CellValue::Number(_) => None,
        }
    }

    /// Returns the number if this is a number cell.
    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(_) => None,
        }
    }
}

/// Font flags of a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellStyle {
    /// Bold font.
    pub bold: bool,
    /// Single underline.
    pub underline: bool,
}

impl CellStyle {
    /// Plain text.
    pub const PLAIN: Self = Self {
        bold: false,
        underline: false,
    };
    /// Bold text.
    pub const BOLD: Self = Self {
        bold: true,
        underline: false,
    };
    /// Bold, single-underlined text.
    pub const HEADING: Self = Self {
        bold: true,
        underline: true,
    };
}

/// A value with its style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// The value.
    pub value: CellValue,
    /// The font flags.
    pub style: CellStyle,
}

/// One worksheet: cells, hidden rows and column widths, all 1-indexed.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    cells: BTreeMap<(u32, u16), Cell>,
    hidden_rows: BTreeSet<u32>,
    column_widths: BTreeMap<u16, f64>,
}

impl Sheet {
    /// Creates an empty sheet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
            hidden_rows: BTreeSet::new(),
            column_widths: BTreeMap::new(),
        }
    }

    /// The worksheet name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Writes a plain text cell.
    pub fn write_text(&mut self, row: u32, column: u16, text: impl Into<String>) {
        self.write(row, column, CellValue::Text(text.into()), CellStyle::PLAIN);
    }

    /// Writes a plain number cell.
    pub fn write_number(&mut self, row: u32, column: u16, number: Decimal) {
        self.write(row, column, CellValue::Number(number), CellStyle::PLAIN);
    }

    /// Writes a cell, replacing whatever was there.
    pub fn write(&mut self, row: u32, column: u16, value: CellValue, style: CellStyle) {
        self.cells.insert((row, column), Cell { value, style });
    }

    /// Returns the cell at a position.
    pub fn cell(&self, row: u32, column: u16) -> Option<&Cell> {
        self.cells.get(&(row, column))
    }

    /// Returns the text at a position, if it is a text cell.
    pub fn text(&self, row: u32, column: u16) -> Option<&str> {
        self.cell(row, column).and_then(|c| c.value.as_text())
    }

    /// Returns the number at a position, if it is a number cell.
    pub fn number(&self, row: u32, column: u16) -> Option<Decimal> {
        self.cell(row, column).and_then(|c| c.value.as_number())
    }

    /// Iterates all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = ((u32, u16), &Cell)> {
        self.cells.iter().map(|(pos, cell)| (*pos, cell))
    }

    /// Returns true if any cell is written on `row`.
    pub fn row_has_cells(&self, row: u32) -> bool {
        self.cells
            .range((row, 0)..=(row, u16::MAX))
            .next()
            .is_some()
    }

    /// Finds the first cell (row-major) whose text contains `needle`,
    /// ignoring case, within `1..=max_row` and `1..=max_column`.
    pub fn find_text(&self, needle: &str, max_row: u32, max_column: u16) -> Option<(u32, u16)> {
        let needle = needle.to_uppercase();
        self.cells
            .iter()
            .filter(|((row, column), _)| *row <= max_row && *column <= max_column)
            .find(|(_, cell)| {
                cell.value
                    .as_text()
                    .is_some_and(|text| text.to_uppercase().contains(&needle))
            })
            .map(|(pos, _)| *pos)
    }

    /// Hides a row.
    pub fn hide_row(&mut self, row: u32) {
        self.hidden_rows.insert(row);
    }

    /// Returns true if the row is hidden.
    pub fn is_row_hidden(&self, row: u32) -> bool {
        self.hidden_rows.contains(&row)
    }

    /// Iterates hidden rows in ascending order.
    pub fn hidden_rows(&self) -> impl Iterator<Item = u32> + '_ {
        self.hidden_rows.iter().copied()
    }

    /// Sets a column width in character units.
    pub fn set_column_width(&mut self, column: u16, width: f64) {
        self.column_widths.insert(column, width);
    }

    /// Iterates column widths in ascending column order.
    pub fn column_widths(&self) -> impl Iterator<Item = (u16, f64)> + '_ {
        self.column_widths.iter().map(|(c, w)| (*c, *w))
    }
}
