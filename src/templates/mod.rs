//! Template descriptors, geometry and workbook rendering.
//!
//! This module contains:
//! - [`TemplateDefinition`]: the YAML descriptor of a template's static content
//! - [`DailyTimeLayout`] and [`TimeEntriesLayout`]: fixed row/column geometry
//! - [`Sheet`]: the in-memory worksheet the layout engines write to
//! - [`render_workbook`]: the `.xlsx` writer

mod definition;
mod geometry;
mod sheet;
mod xlsx;

pub use definition::{
    TemplateCell, TemplateColumn, TemplateDefinition, TemplateKind, STANDARD_DAILY_TIME,
    STANDARD_TIME_ENTRIES,
};
pub use geometry::{
    time_entries_columns, DailyTimeLayout, RowBand, SlotColumns, TimeEntriesLayout,
    LAYOUT_VERSION, TIME_ENTRIES_HEADERS,
};
pub use sheet::{Cell, CellStyle, CellValue, Sheet};
pub use xlsx::render_workbook;
