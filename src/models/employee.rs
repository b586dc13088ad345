//! Roster and reference-data models.
//!
//! This module defines the [`EmployeeRecord`] roster entry, the
//! [`CostCodeRecord`] and [`JobRecord`] lookup rows, and the lookup tables
//! the export consults while enriching entries.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{clean_text, is_blank, pad_job_area};

/// Represents one employee on the roster.
///
/// Roster records supply defaults for any field a time entry left blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// The employee's name, the lookup key.
    pub name: String,
    /// The employee's person number.
    #[serde(default)]
    pub employee_number: String,
    /// True places the employee in the indirect band of Daily Time.
    #[serde(default)]
    pub indirect: bool,
    /// Trade class used when the entry has none.
    #[serde(default)]
    pub override_trade_class: String,
    /// Default premium rate.
    #[serde(default)]
    pub premium_rate: String,
    /// Default subsistence rate.
    #[serde(default)]
    pub subsistence_rate: String,
    /// Default travel rate.
    #[serde(default)]
    pub travel_rate: String,
    /// Whether the employee normally works nights.
    #[serde(default)]
    pub night_shift: bool,
    /// Passed through verbatim to the Daily Import "Time Record Type" column.
    #[serde(default)]
    pub time_record_type: String,
}

/// One cost code and its description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCodeRecord {
    /// The cost code.
    pub code: String,
    /// The human-readable description.
    pub description: String,
}

/// The employee roster, keyed by exact employee name.
///
/// Matching is case-sensitive: `"dana reyes"` does not find `"Dana Reyes"`.
/// When two records share a name the first one wins.
///
/// # Example
///
/// ```
/// use timesheet_export::models::{EmployeeRecord, Roster};
///
/// let roster = Roster::new(vec![EmployeeRecord {
///     name: "Dana Reyes".to_string(),
///     indirect: true,
///     ..Default::default()
/// }]);
///
/// assert!(roster.get("Dana Reyes").is_some_and(|e| e.indirect));
/// assert!(roster.get("dana reyes").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Roster {
    records: HashMap<String, EmployeeRecord>,
}

impl Roster {
    /// Builds a roster from records.
    pub fn new(records: Vec<EmployeeRecord>) -> Self {
        let mut map = HashMap::with_capacity(records.len());
        for record in records {
            map.entry(record.name.clone()).or_insert(record);
        }
        Self { records: map }
    }

    /// Looks up an employee by exact name.
    pub fn get(&self, name: &str) -> Option<&EmployeeRecord> {
        self.records.get(name)
    }

    /// Returns the number of employees on the roster.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the roster has no employees.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Cost code descriptions keyed by code.
#[derive(Debug, Clone, Default)]
pub struct CostCodeTable {
    descriptions: HashMap<String, String>,
}

impl CostCodeTable {
    /// Builds the table from records. Blank codes are ignored.
    pub fn new(records: Vec<CostCodeRecord>) -> Self {
        let descriptions = records
            .into_iter()
            .filter(|r| !r.code.trim().is_empty())
            .map(|r| (r.code.trim().to_string(), r.description))
            .collect();
        Self { descriptions }
    }

    /// Returns the description for a code, or an empty string.
    pub fn description(&self, code: &str) -> &str {
        self.descriptions
            .get(code.trim())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Returns the number of known cost codes.
    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    /// Returns true if no cost codes are known.
    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }
}

/// One job/area combination from the job list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    /// The job number.
    pub job_number: String,
    /// The job area, as entered.
    #[serde(default)]
    pub job_area: String,
    /// The area description.
    #[serde(default)]
    pub description: String,
}

/// Area descriptions keyed by job number and padded job area.
///
/// Entries that leave `description_of_work` blank take the description of
/// their job/area from this table.
#[derive(Debug, Clone, Default)]
pub struct JobTable {
    descriptions: HashMap<(String, String), String>,
}

impl JobTable {
    /// Builds the table from records. Records without a job number are ignored.
    pub fn new(records: Vec<JobRecord>) -> Self {
        let mut descriptions = HashMap::with_capacity(records.len());
        for record in records {
            let job = clean_text(&record.job_number);
            if job.is_empty() {
                continue;
            }
            descriptions
                .entry((job, pad_job_area(&record.job_area)))
                .or_insert(record.description);
        }
        Self { descriptions }
    }

    /// Returns the description for a job and area, if one is known.
    pub fn description(&self, job_number: &str, job_area: &str) -> Option<&str> {
        self.descriptions
            .get(&(clean_text(job_number), pad_job_area(job_area)))
            .map(String::as_str)
            .filter(|d| !is_blank(d))
    }

    /// Returns the number of known job areas.
    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    /// Returns true if no job areas are known.
    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, indirect: bool) -> EmployeeRecord {
        EmployeeRecord {
            name: name.to_string(),
            indirect,
            ..Default::default()
        }
    }

    #[test]
    fn test_roster_lookup_is_exact() {
        let roster = Roster::new(vec![record("Dana Reyes", true)]);
        assert!(roster.get("Dana Reyes").is_some());
        assert!(roster.get("DANA REYES").is_none());
        assert!(roster.get("Dana Reyes ").is_none());
    }

    #[test]
    fn test_roster_first_duplicate_wins() {
        let roster = Roster::new(vec![record("Sam Ito", true), record("Sam Ito", false)]);
        assert_eq!(roster.len(), 1);
        assert!(roster.get("Sam Ito").unwrap().indirect);
    }

    #[test]
    fn test_cost_code_description_lookup() {
        let table = CostCodeTable::new(vec![
            CostCodeRecord {
                code: "0100".to_string(),
                description: "Cable Install".to_string(),
            },
            CostCodeRecord {
                code: "  ".to_string(),
                description: "ignored".to_string(),
            },
        ]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.description("0100"), "Cable Install");
        assert_eq!(table.description(" 0100 "), "Cable Install");
        assert_eq!(table.description("9999"), "");
    }

    #[test]
    fn test_deserialize_employee_record_defaults() {
        let json = r#"{"name": "Lee Park", "indirect": true}"#;
        let employee: EmployeeRecord = serde_json::from_str(json).unwrap();
        assert!(employee.indirect);
        assert!(!employee.night_shift);
        assert!(employee.time_record_type.is_empty());
    }

    #[test]
    fn test_job_table_matches_padded_area() {
        let jobs = JobTable::new(vec![
            JobRecord {
                job_number: "2224".to_string(),
                job_area: "5".to_string(),
                description: "Boiler House".to_string(),
            },
            JobRecord {
                job_number: " ".to_string(),
                job_area: "1".to_string(),
                description: "ignored".to_string(),
            },
        ]);

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs.description("2224", "005"), Some("Boiler House"));
        assert_eq!(jobs.description("2224", "5"), Some("Boiler House"));
        assert_eq!(jobs.description("2224", "6"), None);
    }
}
