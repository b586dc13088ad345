//! In-memory storage, for tests and in-process callers.

use std::collections::HashMap;

use crate::error::EngineResult;
use crate::templates::TemplateKind;

use super::{RawRow, Storage};

/// Tables and templates held in memory.
///
/// # Example
///
/// ```
/// use timesheet_export::storage::{raw_row, InMemoryStore, RawValue, Storage};
/// use timesheet_export::templates::TemplateKind;
///
/// let store = InMemoryStore::with_standard_templates()
///     .with_table("Cost Codes", vec![raw_row([("Cost Code", RawValue::from("01-100"))])]);
///
/// assert!(store.read_table("Cost Codes").unwrap().is_some());
/// assert!(store.read_table("Time Data").unwrap().is_none());
/// assert!(store.read_template(TemplateKind::DailyTime).unwrap().is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: HashMap<String, Vec<RawRow>>,
    templates: HashMap<TemplateKind, String>,
}

impl InMemoryStore {
    /// Creates an empty store with no tables and no templates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the bundled standard templates.
    pub fn with_standard_templates() -> Self {
        Self::new()
            .with_template(
                TemplateKind::DailyTime,
                TemplateKind::DailyTime.standard_source(),
            )
            .with_template(
                TemplateKind::TimeEntries,
                TemplateKind::TimeEntries.standard_source(),
            )
    }

    /// Adds or replaces a table.
    pub fn with_table(mut self, name: impl Into<String>, rows: Vec<RawRow>) -> Self {
        self.insert_table(name, rows);
        self
    }

    /// Adds or replaces a template descriptor.
    pub fn with_template(mut self, kind: TemplateKind, source: impl Into<String>) -> Self {
        self.templates.insert(kind, source.into());
        self
    }

    /// Adds or replaces a table in place.
    pub fn insert_table(&mut self, name: impl Into<String>, rows: Vec<RawRow>) {
        self.tables.insert(name.into(), rows);
    }

    /// Removes a template.
    pub fn remove_template(&mut self, kind: TemplateKind) {
        self.templates.remove(&kind);
    }
}

impl Storage for InMemoryStore {
    fn read_table(&self, name: &str) -> EngineResult<Option<Vec<RawRow>>> {
        Ok(self.tables.get(name).cloned())
    }

    fn read_template(&self, kind: TemplateKind) -> EngineResult<Option<String>> {
        Ok(self.templates.get(&kind).cloned())
    }
}
