//! Directory-backed storage.
//!
//! Tables are CSV files named after the table (`<root>/Time Data.csv`);
//! template descriptors live under `<root>/templates/`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::templates::TemplateKind;

use super::{RawRow, RawValue, Storage};

/// Name of the templates sub-directory.
pub const TEMPLATES_DIR: &str = "templates";

/// Reads tables and templates from a directory.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Creates a store rooted at `root`. The directory is not touched until
    /// the first read.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the CSV file backing a table.
    pub fn table_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.csv", name))
    }

    /// Path of a template descriptor.
    pub fn template_path(&self, kind: TemplateKind) -> PathBuf {
        self.root.join(TEMPLATES_DIR).join(kind.file_name())
    }
}

fn storage_error(table: &str, message: impl ToString) -> EngineError {
    EngineError::StorageError {
        table: table.to_string(),
        message: message.to_string(),
    }
}

impl Storage for DirectoryStore {
    fn read_table(&self, name: &str) -> EngineResult<Option<Vec<RawRow>>> {
        let path = self.table_path(name);
        if !path.is_file() {
            debug!(table = %name, path = %path.display(), "Table file not present");
            return Ok(None);
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_path(&path)
            .map_err(|e| storage_error(name, e))?;

        let headers = reader.headers().map_err(|e| storage_error(name, e))?.clone();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| storage_error(name, e))?;
            let row: RawRow = headers
                .iter()
                .zip(record.iter())
                .filter(|(header, _)| !header.is_empty())
                .map(|(header, value)| (header.to_string(), RawValue::from(value)))
                .collect();
            rows.push(row);
        }

        debug!(table = %name, rows = rows.len(), "Table read");
        Ok(Some(rows))
    }

    fn read_template(&self, kind: TemplateKind) -> EngineResult<Option<String>> {
        let path = self.template_path(kind);
        match fs::read_to_string(&path) {
            Ok(source) => Ok(Some(source)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_error(kind.name(), e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_csv_table() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("Time Data.csv"),
            "Name,Date,RT Hours,Comments\nDana Reyes,2025-09-23,8,\nLee Park,2025-09-23,4,Rain delay\n",
        )
        .unwrap();

        let store = DirectoryStore::new(dir.path());
        let rows = store.read_table("Time Data").unwrap().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Name"], RawValue::Text("Dana Reyes".to_string()));
        assert_eq!(rows[0]["Comments"], RawValue::Blank);
        assert_eq!(rows[1]["Comments"].as_text(), "Rain delay");
    }

    #[test]
    fn test_missing_table_and_template_are_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirectoryStore::new(dir.path());

        assert!(store.read_table("Cost Codes").unwrap().is_none());
        assert!(store.read_template(TemplateKind::DailyTime).unwrap().is_none());
    }

    #[test]
    fn test_reads_template_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(TEMPLATES_DIR)).unwrap();
        fs::write(
            dir.path().join(TEMPLATES_DIR).join("time_entries.yaml"),
            TemplateKind::TimeEntries.standard_source(),
        )
        .unwrap();

        let store = DirectoryStore::new(dir.path());
        let source = store.read_template(TemplateKind::TimeEntries).unwrap();
        assert_eq!(
            source.as_deref(),
            Some(TemplateKind::TimeEntries.standard_source())
        );
    }

    #[test]
    fn test_table_path_is_named_after_table() {
        let store = DirectoryStore::new("/data");
        assert_eq!(store.table_path("Employee List"), Path::new("/data/Employee List.csv"));
    }
}
