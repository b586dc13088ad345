//! Employee enrichment.
//!
//! Joins a time entry with its roster record (exact name match) and fills
//! every blank entry field the roster knows. Values already on the entry
//! always win.

use crate::models::{clean_text, is_blank, EnrichedEntry, JobTable, Roster, TimeEntry};

fn fill(target: &mut String, fallback: &str) {
    if is_blank(target) {
        *target = clean_text(fallback);
    }
}

/// Enriches one entry from the roster.
///
/// Fills trade class (from the roster's override trade class), employee
/// number, the three rates, and the night shift flag. Employees missing from
/// the roster pass through unchanged with no matched record.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use timesheet_export::export::enrich_entry;
/// use timesheet_export::models::{EmployeeRecord, Roster, TimeEntry};
///
/// let roster = Roster::new(vec![EmployeeRecord {
///     name: "Dana Reyes".to_string(),
///     override_trade_class: "Pipefitter".to_string(),
///     ..Default::default()
/// }]);
/// let entry = TimeEntry::new("Dana Reyes", NaiveDate::from_ymd_opt(2025, 9, 23).unwrap());
///
/// let enriched = enrich_entry(&entry, &roster);
/// assert_eq!(enriched.entry.trade_class, "Pipefitter");
/// ```
pub fn enrich_entry(entry: &TimeEntry, roster: &Roster) -> EnrichedEntry {
    let employee = roster.get(&entry.employee_name).cloned();
    let mut entry = entry.clone();

    if let Some(employee) = &employee {
        fill(&mut entry.trade_class, &employee.override_trade_class);
        fill(&mut entry.employee_number, &employee.employee_number);
        fill(&mut entry.premium_rate, &employee.premium_rate);
        fill(&mut entry.subsistence_rate, &employee.subsistence_rate);
        fill(&mut entry.travel_rate, &employee.travel_rate);
        if employee.night_shift {
            fill(&mut entry.night_shift_flag, "Y");
        }
    }

    for field in [
        &mut entry.trade_class,
        &mut entry.employee_number,
        &mut entry.premium_rate,
        &mut entry.subsistence_rate,
        &mut entry.travel_rate,
        &mut entry.night_shift_flag,
        &mut entry.comments,
    ] {
        *field = clean_text(field);
    }

    EnrichedEntry { entry, employee }
}

/// Fills a blank description of work from the job list.
pub fn fill_job_description(entry: &mut TimeEntry, jobs: &JobTable) {
    if is_blank(&entry.description_of_work) {
        if let Some(description) = jobs.description(&entry.job_number, &entry.job_area) {
            entry.description_of_work = description.to_string();
        }
    }
}

/// Enriches entries in order, filling job descriptions first.
pub fn enrich_entries<'a, I>(entries: I, roster: &Roster, jobs: &JobTable) -> Vec<EnrichedEntry>
where
    I: IntoIterator<Item = &'a TimeEntry>,
{
    entries
        .into_iter()
        .map(|entry| {
            let mut enriched = enrich_entry(entry, roster);
            fill_job_description(&mut enriched.entry, jobs);
            enriched
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmployeeRecord, JobRecord};
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 23).unwrap()
    }

    fn roster() -> Roster {
        Roster::new(vec![EmployeeRecord {
            name: "Dana Reyes".to_string(),
            employee_number: "1001".to_string(),
            indirect: true,
            override_trade_class: "Foreman".to_string(),
            premium_rate: "2.50".to_string(),
            subsistence_rate: "75".to_string(),
            travel_rate: String::new(),
            night_shift: true,
            time_record_type: "Hourly".to_string(),
        }])
    }

    /// ENR-001: Blank entry fields are filled from the roster.
    #[test]
    fn test_blank_fields_filled_from_roster() {
        let entry = TimeEntry::new("Dana Reyes", date());
        let enriched = enrich_entry(&entry, &roster());

        assert_eq!(enriched.entry.trade_class, "Foreman");
        assert_eq!(enriched.entry.employee_number, "1001");
        assert_eq!(enriched.entry.premium_rate, "2.50");
        assert_eq!(enriched.entry.subsistence_rate, "75");
        assert_eq!(enriched.entry.night_shift_flag, "Y");
        assert!(enriched.is_indirect());
    }

    /// ENR-002: Explicit entry values win over roster values.
    #[test]
    fn test_entry_values_win() {
        let mut entry = TimeEntry::new("Dana Reyes", date());
        entry.trade_class = "Welder".to_string();
        entry.subsistence_rate = "50".to_string();

        let enriched = enrich_entry(&entry, &roster());
        assert_eq!(enriched.entry.trade_class, "Welder");
        assert_eq!(enriched.entry.subsistence_rate, "50");
    }

    /// ENR-003: Placeholder text counts as blank.
    #[test]
    fn test_placeholder_values_are_replaced() {
        let mut entry = TimeEntry::new("Dana Reyes", date());
        entry.premium_rate = "nan".to_string();
        entry.travel_rate = "None".to_string();

        let enriched = enrich_entry(&entry, &roster());
        assert_eq!(enriched.entry.premium_rate, "2.50");
        assert_eq!(enriched.entry.travel_rate, "");
    }

    /// ENR-004: Name matching is exact; unmatched employees pass through.
    #[test]
    fn test_unmatched_employee_passes_through() {
        let entry = TimeEntry::new("dana reyes", date());
        let enriched = enrich_entry(&entry, &roster());

        assert!(enriched.employee.is_none());
        assert!(!enriched.is_indirect());
        assert_eq!(enriched.entry.trade_class, "");
        assert_eq!(enriched.time_record_type(), "");
    }

    #[test]
    fn test_job_description_filled_from_job_list() {
        let jobs = JobTable::new(vec![JobRecord {
            job_number: "2224".to_string(),
            job_area: "5".to_string(),
            description: "Boiler House".to_string(),
        }]);
        let mut blank = TimeEntry::new("Dana Reyes", date());
        blank.job_number = "2224".to_string();
        blank.job_area = "005".to_string();
        let mut explicit = blank.clone();
        explicit.description_of_work = "Pipe rack".to_string();

        let enriched = enrich_entries([&blank, &explicit], &Roster::default(), &jobs);
        assert_eq!(enriched[0].entry.description_of_work, "Boiler House");
        assert_eq!(enriched[1].entry.description_of_work, "Pipe rack");
    }
}
