//! Time entry model and text helpers.
//!
//! This module defines [`TimeEntry`], the canonical shape of one labor entry
//! (employee, date, job, cost code), together with the small text rules the
//! export layouts share: blank detection, job-area padding and rate parsing.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Width job areas are zero-padded to on every output.
pub const JOB_AREA_WIDTH: usize = 3;

/// Represents one (employee, date, job, cost code) labor entry.
///
/// Text fields are stored trimmed, with spreadsheet placeholders such as
/// `"nan"` already cleared (see [`clean_text`]). Rates are kept as text
/// because storage holds them as text; use [`parse_rate`] to read them.
///
/// # Example
///
/// ```
/// use timesheet_export::models::TimeEntry;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut entry = TimeEntry::new("Dana Reyes", NaiveDate::from_ymd_opt(2025, 9, 23).unwrap());
/// entry.job_number = "100".to_string();
/// entry.job_area = "5".to_string();
/// entry.description_of_work = "Cable pull".to_string();
/// entry.rt_hours = Decimal::new(8, 0);
///
/// assert_eq!(entry.job_display(), "100 - 005 - Cable pull");
/// assert!(entry.has_hours());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// The job number the hours are charged to.
    pub job_number: String,
    /// The area within the job (padded on output).
    pub job_area: String,
    /// The calendar date the hours were worked.
    pub date: NaiveDate,
    /// The employee's name, used as the roster key.
    pub employee_name: String,
    /// The employee's person number.
    #[serde(default)]
    pub employee_number: String,
    /// The trade class recorded on the entry.
    #[serde(default)]
    pub trade_class: String,
    /// Regular-time hours.
    #[serde(default)]
    pub rt_hours: Decimal,
    /// Overtime hours.
    #[serde(default)]
    pub ot_hours: Decimal,
    /// Free-text description of the work (part of the job key).
    #[serde(default)]
    pub description_of_work: String,
    /// Free-text comment shown in the Daily Time summary.
    #[serde(default)]
    pub comments: String,
    /// `"Y"` for night shift, otherwise empty.
    #[serde(default)]
    pub night_shift_flag: String,
    /// Premium rate as entered.
    #[serde(default)]
    pub premium_rate: String,
    /// Subsistence rate as entered.
    #[serde(default)]
    pub subsistence_rate: String,
    /// Travel rate as entered.
    #[serde(default)]
    pub travel_rate: String,
    /// The cost code the hours are charged to.
    #[serde(default)]
    pub cost_code: String,
}

impl TimeEntry {
    /// Creates an entry for an employee and date with every other field blank.
    pub fn new(employee_name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            job_number: String::new(),
            job_area: String::new(),
            date,
            employee_name: employee_name.into(),
            employee_number: String::new(),
            trade_class: String::new(),
            rt_hours: Decimal::ZERO,
            ot_hours: Decimal::ZERO,
            description_of_work: String::new(),
            comments: String::new(),
            night_shift_flag: String::new(),
            premium_rate: String::new(),
            subsistence_rate: String::new(),
            travel_rate: String::new(),
            cost_code: String::new(),
        }
    }

    /// Returns the job area zero-padded to three characters.
    pub fn padded_job_area(&self) -> String {
        pad_job_area(&self.job_area)
    }

    /// Returns `"<job> - <area> - <description>"`, the job display string
    /// used in Daily Time slots and summary headers.
    pub fn job_display(&self) -> String {
        format!(
            "{} - {} - {}",
            self.job_number,
            self.padded_job_area(),
            self.description_of_work
        )
    }

    /// Returns true if the entry carries any RT or OT hours.
    pub fn has_hours(&self) -> bool {
        self.rt_hours > Decimal::ZERO || self.ot_hours > Decimal::ZERO
    }

    /// Returns true if any of the three rate fields is non-blank.
    pub fn has_any_rate(&self) -> bool {
        [&self.premium_rate, &self.subsistence_rate, &self.travel_rate]
            .iter()
            .any(|rate| !is_blank(rate))
    }
}

/// Returns true for text the spreadsheet layer uses to mean "no value".
///
/// Empty strings, whitespace, and the placeholders `nan` / `none` (any case)
/// are all blank.
pub fn is_blank(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("nan")
        || trimmed.eq_ignore_ascii_case("none")
}

/// Trims a value and clears spreadsheet placeholders.
///
/// # Example
///
/// ```
/// use timesheet_export::models::clean_text;
///
/// assert_eq!(clean_text("  45.50 "), "45.50");
/// assert_eq!(clean_text("NaN"), "");
/// ```
pub fn clean_text(value: &str) -> String {
    if is_blank(value) {
        String::new()
    } else {
        value.trim().to_string()
    }
}

/// Zero-pads a job area to [`JOB_AREA_WIDTH`] characters.
///
/// Blank areas render as `"000"`; values already three characters or longer
/// are returned unchanged.
///
/// # Example
///
/// ```
/// use timesheet_export::models::pad_job_area;
///
/// assert_eq!(pad_job_area("5"), "005");
/// assert_eq!(pad_job_area("12"), "012");
/// assert_eq!(pad_job_area("1200"), "1200");
/// assert_eq!(pad_job_area(""), "000");
/// ```
pub fn pad_job_area(area: &str) -> String {
    let area = clean_text(area);
    format!("{:0>width$}", area, width = JOB_AREA_WIDTH)
}

/// Parses a rate field as a number.
///
/// Returns `None` for blank or non-numeric text; this is absence, not an
/// error. Plain decimals and scientific notation are accepted.
///
/// # Example
///
/// ```
/// use timesheet_export::models::parse_rate;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_rate("45.5"), Some(Decimal::new(455, 1)));
/// assert_eq!(parse_rate("not-a-number"), None);
/// assert_eq!(parse_rate(""), None);
/// ```
pub fn parse_rate(value: &str) -> Option<Decimal> {
    if is_blank(value) {
        return None;
    }
    let trimmed = value.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_entry() -> TimeEntry {
        let mut entry = TimeEntry::new(
            "Dana Reyes",
            NaiveDate::from_ymd_opt(2025, 9, 23).unwrap(),
        );
        entry.job_number = "100".to_string();
        entry.job_area = "5".to_string();
        entry.description_of_work = "Cable pull".to_string();
        entry
    }

    #[test]
    fn test_job_display_pads_area() {
        let entry = make_entry();
        assert_eq!(entry.job_display(), "100 - 005 - Cable pull");
    }

    #[test]
    fn test_job_display_with_blank_description_keeps_separators() {
        let mut entry = make_entry();
        entry.description_of_work = String::new();
        assert_eq!(entry.job_display(), "100 - 005 - ");
    }

    #[test]
    fn test_pad_job_area_variants() {
        assert_eq!(pad_job_area("5"), "005");
        assert_eq!(pad_job_area(" 12 "), "012");
        assert_eq!(pad_job_area("123"), "123");
        assert_eq!(pad_job_area("4500"), "4500");
        assert_eq!(pad_job_area("A"), "00A");
        assert_eq!(pad_job_area("nan"), "000");
    }

    #[test]
    fn test_has_hours() {
        let mut entry = make_entry();
        assert!(!entry.has_hours());

        entry.ot_hours = dec("0.25");
        assert!(entry.has_hours());
    }

    #[test]
    fn test_has_any_rate_ignores_placeholders() {
        let mut entry = make_entry();
        entry.premium_rate = "nan".to_string();
        entry.travel_rate = "None".to_string();
        assert!(!entry.has_any_rate());

        entry.travel_rate = "12.00".to_string();
        assert!(entry.has_any_rate());
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(is_blank("NaN"));
        assert!(is_blank("none"));
        assert!(!is_blank("0"));
    }

    #[test]
    fn test_parse_rate_accepts_decimals_and_scientific() {
        assert_eq!(parse_rate("45.50"), Some(dec("45.50")));
        assert_eq!(parse_rate(" 60 "), Some(dec("60")));
        assert_eq!(parse_rate("1e2"), Some(dec("100")));
        assert_eq!(parse_rate("-5"), Some(dec("-5")));
    }

    #[test]
    fn test_parse_rate_rejects_text() {
        assert_eq!(parse_rate("not-a-number"), None);
        assert_eq!(parse_rate("$45"), None);
        assert_eq!(parse_rate("nan"), None);
    }

    #[test]
    fn test_deserialize_entry_with_defaults() {
        let json = r#"{
            "job_number": "100",
            "job_area": "5",
            "date": "2025-09-23",
            "employee_name": "Dana Reyes",
            "rt_hours": "8"
        }"#;

        let entry: TimeEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.rt_hours, dec("8"));
        assert_eq!(entry.ot_hours, Decimal::ZERO);
        assert!(entry.comments.is_empty());
    }
}
