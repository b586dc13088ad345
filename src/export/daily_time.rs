//! Daily Time layout engine.
//!
//! Places every employee with at least one line item into the Daily Time
//! template: indirect employees in the indirect band, direct employees in
//! the direct band, both in first-appearance order. Each visible entry takes
//! one five-column slot; two slots fit on a row, so an employee with `n`
//! entries uses `ceil(n / 2)` rows and an odd count leaves the last row's
//! secondary slot empty. Band rows left unused are hidden, and the job
//! comment summary is written below the bands.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::models::{CostCodeTable, EnrichedEntry, ExportNotice, NoticeCode};
use crate::templates::{DailyTimeLayout, Sheet, SlotColumns, TemplateDefinition};

use super::job_summary::{group_job_comments, write_job_summary, SummaryOutcome};
use super::pay_codes::is_visible;

/// Where one employee landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeePlacement {
    /// The employee name.
    pub employee_name: String,
    /// Which band the employee went to.
    pub indirect: bool,
    /// First row written.
    pub first_row: u32,
    /// Rows written.
    pub rows_used: u32,
    /// Entries written into slots.
    pub entries_placed: usize,
}

/// An employee (or part of one) that did not fit in its band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedEmployee {
    /// The employee name.
    pub employee_name: String,
    /// Which band the employee belonged to.
    pub indirect: bool,
    /// Entries that were not written.
    pub entries_dropped: usize,
}

/// A laid-out Daily Time sheet and what happened while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyTimeSheet {
    /// The filled sheet.
    pub sheet: Sheet,
    /// Employees placed, indirect band first.
    pub placements: Vec<EmployeePlacement>,
    /// Employees fully or partly dropped by band overflow.
    pub dropped: Vec<DroppedEmployee>,
    /// How much of the comment summary was written.
    pub summary: SummaryOutcome,
    /// Notices raised while laying out.
    pub notices: Vec<ExportNotice>,
}

impl DailyTimeSheet {
    /// Returns the placement of an employee, if placed.
    pub fn placement(&self, employee_name: &str) -> Option<&EmployeePlacement> {
        self.placements
            .iter()
            .find(|p| p.employee_name == employee_name)
    }

    /// Total entries written into slots.
    pub fn entries_placed(&self) -> usize {
        self.placements.iter().map(|p| p.entries_placed).sum()
    }
}

/// Rows needed for `entry_count` slots, two per row.
///
/// # Example
///
/// ```
/// use timesheet_export::export::rows_needed;
///
/// assert_eq!(rows_needed(0), 0);
/// assert_eq!(rows_needed(1), 1);
/// assert_eq!(rows_needed(2), 1);
/// assert_eq!(rows_needed(3), 2);
/// assert_eq!(rows_needed(5), 3);
/// ```
pub fn rows_needed(entry_count: usize) -> u32 {
    entry_count.div_ceil(2) as u32
}

struct EmployeeGroup<'a> {
    name: &'a str,
    indirect: bool,
    entries: Vec<&'a EnrichedEntry>,
}

/// Groups visible entries by employee name in first-appearance order.
fn group_by_employee(entries: &[EnrichedEntry]) -> Vec<EmployeeGroup<'_>> {
    let mut groups: Vec<EmployeeGroup<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for enriched in entries.iter().filter(|e| is_visible(e)) {
        let name = enriched.entry.employee_name.as_str();
        let position = *index.entry(name).or_insert_with(|| {
            groups.push(EmployeeGroup {
                name,
                indirect: enriched.is_indirect(),
                entries: Vec::new(),
            });
            groups.len() - 1
        });
        groups[position].entries.push(enriched);
    }

    groups
}

fn write_slot(
    sheet: &mut Sheet,
    row: u32,
    slot: SlotColumns,
    enriched: &EnrichedEntry,
    cost_codes: &CostCodeTable,
) {
    let entry = &enriched.entry;
    sheet.write_text(row, slot.description, cost_codes.description(&entry.cost_code));
    sheet.write_text(row, slot.cost_code, entry.cost_code.clone());
    sheet.write_text(row, slot.job, entry.job_display());
    sheet.write_number(row, slot.rt_hours, entry.rt_hours);
    sheet.write_number(row, slot.ot_hours, entry.ot_hours);
}

/// Writes an employee's rows starting at `first_row`, using at most
/// `max_rows` rows. Returns the number of entries written.
fn write_employee(
    sheet: &mut Sheet,
    layout: &DailyTimeLayout,
    group: &EmployeeGroup<'_>,
    first_row: u32,
    max_rows: u32,
    cost_codes: &CostCodeTable,
) -> usize {
    let capacity = max_rows as usize * 2;
    let placed = group.entries.len().min(capacity);

    sheet.write_text(first_row, layout.name_column, group.name);
    let trade_class = group
        .entries
        .first()
        .map(|e| e.entry.trade_class.as_str())
        .unwrap_or("");
    sheet.write_text(first_row, layout.trade_class_column, trade_class);
    if group.entries.iter().any(|e| e.entry.has_any_rate()) {
        sheet.write_text(
            first_row,
            layout.rate_marker_column,
            DailyTimeLayout::RATE_MARKER,
        );
    }

    for (i, enriched) in group.entries.iter().take(placed).enumerate() {
        let row = first_row + (i / 2) as u32;
        let slot = if i % 2 == 0 {
            layout.primary_slot
        } else {
            layout.secondary_slot
        };
        if row != first_row && i % 2 == 0 {
            sheet.write_text(row, layout.name_column, group.name);
        }
        write_slot(sheet, row, slot, enriched, cost_codes);
    }

    placed
}

/// Fills one band with its employees. Returns the first unused row.
fn fill_band(
    sheet: &mut Sheet,
    layout: &DailyTimeLayout,
    groups: &[EmployeeGroup<'_>],
    indirect: bool,
    cost_codes: &CostCodeTable,
    placements: &mut Vec<EmployeePlacement>,
    dropped: &mut Vec<DroppedEmployee>,
) -> u32 {
    let band = layout.band(indirect);
    let mut cursor = band.first;

    for group in groups.iter().filter(|g| g.indirect == indirect) {
        if cursor > band.last {
            dropped.push(DroppedEmployee {
                employee_name: group.name.to_string(),
                indirect,
                entries_dropped: group.entries.len(),
            });
            continue;
        }

        let needed = rows_needed(group.entries.len());
        let rows = needed.min(band.last - cursor + 1);
        let placed = write_employee(sheet, layout, group, cursor, rows, cost_codes);

        placements.push(EmployeePlacement {
            employee_name: group.name.to_string(),
            indirect,
            first_row: cursor,
            rows_used: rows,
            entries_placed: placed,
        });
        if placed < group.entries.len() {
            dropped.push(DroppedEmployee {
                employee_name: group.name.to_string(),
                indirect,
                entries_dropped: group.entries.len() - placed,
            });
        }
        cursor += rows;
    }

    cursor
}

/// Lays out the Daily Time sheet.
///
/// `entries` are the enriched entries of the export date. Entries without
/// line items are ignored. The export date is written to the right of the
/// first cell containing `date_label`.
pub fn layout_daily_time(
    template: &TemplateDefinition,
    layout: &DailyTimeLayout,
    entries: &[EnrichedEntry],
    cost_codes: &CostCodeTable,
    export_date: NaiveDate,
    date_label: &str,
) -> DailyTimeSheet {
    let mut sheet = template.to_sheet();
    let mut notices = Vec::new();

    match sheet.find_text(date_label, layout.date_search_rows, layout.date_search_columns) {
        Some((row, column)) => {
            sheet.write_text(row, column + 1, export_date.format("%Y-%m-%d").to_string());
        }
        None => {
            warn!(label = %date_label, "Date label not found in Daily Time template");
            notices.push(ExportNotice::warning(
                NoticeCode::DateLabelMissing,
                format!(
                    "Daily Time template has no '{}' cell; the export date was not stamped",
                    date_label
                ),
            ));
        }
    }

    let groups = group_by_employee(entries);
    let mut placements = Vec::new();
    let mut dropped = Vec::new();

    for indirect in [true, false] {
        let band = layout.band(indirect);
        let next_free = fill_band(
            &mut sheet,
            layout,
            &groups,
            indirect,
            cost_codes,
            &mut placements,
            &mut dropped,
        );
        for row in next_free..=band.last {
            sheet.hide_row(row);
        }
    }

    for employee in &dropped {
        warn!(
            employee = %employee.employee_name,
            indirect = employee.indirect,
            entries_dropped = employee.entries_dropped,
            "Daily Time band overflow"
        );
        let band = if employee.indirect { "indirect" } else { "direct" };
        notices.push(ExportNotice::warning(
            NoticeCode::BandOverflow,
            format!(
                "{} entr{} for {} did not fit in the {} band of Daily Time",
                employee.entries_dropped,
                if employee.entries_dropped == 1 { "y" } else { "ies" },
                employee.employee_name,
                band
            ),
        ));
    }

    let comment_groups = group_job_comments(entries.iter().filter(|e| is_visible(e)));
    let summary = write_job_summary(
        &mut sheet,
        &comment_groups,
        layout.name_column,
        layout.summary_start,
        layout.summary_ceiling,
    );
    if summary.truncated {
        warn!(ceiling = layout.summary_ceiling, "Daily Time comment summary truncated");
        notices.push(ExportNotice::warning(
            NoticeCode::SummaryTruncated,
            format!(
                "Daily Time job comments were cut off at row {}",
                layout.summary_ceiling
            ),
        ));
    }

    debug!(
        placed = placements.len(),
        dropped = dropped.len(),
        summary_groups = summary.groups_written,
        "Daily Time laid out"
    );

    DailyTimeSheet {
        sheet,
        placements,
        dropped,
        summary,
        notices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CostCodeRecord, EmployeeRecord, TimeEntry};
    use crate::templates::TemplateKind;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 23).unwrap()
    }

    fn template() -> TemplateDefinition {
        TemplateDefinition::standard(TemplateKind::DailyTime).unwrap()
    }

    fn entry(name: &str, indirect: bool, job: &str, rt: &str, ot: &str) -> EnrichedEntry {
        let mut entry = TimeEntry::new(name, date());
        entry.job_number = job.to_string();
        entry.job_area = "5".to_string();
        entry.description_of_work = "Boiler".to_string();
        entry.cost_code = "01-100".to_string();
        entry.trade_class = "Pipefitter".to_string();
        entry.rt_hours = dec(rt);
        entry.ot_hours = dec(ot);
        EnrichedEntry {
            entry,
            employee: Some(EmployeeRecord {
                name: name.to_string(),
                indirect,
                ..Default::default()
            }),
        }
    }

    fn cost_codes() -> CostCodeTable {
        CostCodeTable::new(vec![CostCodeRecord {
            code: "01-100".to_string(),
            description: "Supervision".to_string(),
        }])
    }

    fn lay_out(entries: &[EnrichedEntry]) -> DailyTimeSheet {
        layout_daily_time(
            &template(),
            &DailyTimeLayout::STANDARD,
            entries,
            &cost_codes(),
            date(),
            "DATA DATE",
        )
    }

    /// DT-001: A direct employee with 8 RT hours lands on the first direct row.
    #[test]
    fn test_direct_entry_placed_in_direct_band() {
        let result = lay_out(&[entry("Dana Reyes", false, "100", "8", "0")]);
        let sheet = &result.sheet;

        assert_eq!(sheet.text(32, 1), Some("Dana Reyes"));
        assert_eq!(sheet.text(32, 2), Some("Pipefitter"));
        assert_eq!(sheet.text(32, 5), Some("Supervision"));
        assert_eq!(sheet.text(32, 6), Some("01-100"));
        assert_eq!(sheet.text(32, 7), Some("100 - 005 - Boiler"));
        assert_eq!(sheet.number(32, 8), Some(dec("8")));
        assert_eq!(sheet.number(32, 9), Some(dec("0")));
        assert!(!sheet.is_row_hidden(32));
        assert!(sheet.is_row_hidden(33));
        assert!(sheet.is_row_hidden(8));
        assert!(result.notices.is_empty());
    }

    /// DT-002: Two entries for one employee share a row.
    #[test]
    fn test_two_entries_fill_both_slots() {
        let result = lay_out(&[
            entry("Dana Reyes", false, "100", "4", "0"),
            entry("Dana Reyes", false, "200", "0", "3"),
        ]);
        let sheet = &result.sheet;

        assert_eq!(sheet.text(32, 7), Some("100 - 005 - Boiler"));
        assert_eq!(sheet.text(32, 13), Some("200 - 005 - Boiler"));
        assert_eq!(sheet.number(32, 15), Some(dec("3")));
        assert_eq!(result.placement("Dana Reyes").unwrap().rows_used, 1);
        assert!(sheet.is_row_hidden(33));
    }

    /// DT-003: Spill rows repeat the name and the last row may be half full.
    #[test]
    fn test_three_entries_spill_to_second_row() {
        let result = lay_out(&[
            entry("Dana Reyes", true, "100", "1", "0"),
            entry("Dana Reyes", true, "200", "2", "0"),
            entry("Dana Reyes", true, "300", "3", "0"),
            entry("Lee Park", true, "100", "8", "0"),
        ]);
        let sheet = &result.sheet;

        assert_eq!(sheet.text(9, 1), Some("Dana Reyes"));
        assert_eq!(sheet.text(9, 7), Some("300 - 005 - Boiler"));
        assert!(sheet.cell(9, 11).is_none());
        assert!(sheet.cell(9, 2).is_none());
        assert_eq!(sheet.text(10, 1), Some("Lee Park"));
        assert!(sheet.is_row_hidden(11));
        assert!(!sheet.is_row_hidden(9));
    }

    /// DT-004: Rate marker follows any non-blank rate.
    #[test]
    fn test_rate_marker() {
        let mut with_rate = entry("Dana Reyes", false, "100", "8", "0");
        with_rate.entry.travel_rate = "12.00".to_string();
        let result = lay_out(&[with_rate, entry("Lee Park", false, "100", "8", "0")]);

        assert_eq!(result.sheet.text(32, 4), Some("*"));
        assert!(result.sheet.cell(33, 4).is_none());
    }

    /// DT-005: The export date is stamped beside the label.
    #[test]
    fn test_date_stamp() {
        let result = lay_out(&[entry("Dana Reyes", false, "100", "8", "0")]);
        let (row, column) = result.sheet.find_text("DATA DATE", 14, 14).unwrap();
        assert_eq!(result.sheet.text(row, column + 1), Some("2025-09-23"));
    }

    #[test]
    fn test_missing_date_label_is_noticed() {
        let mut template = template();
        template.cells.retain(|c| !c.value.contains("DATA DATE"));
        let result = layout_daily_time(
            &template,
            &DailyTimeLayout::STANDARD,
            &[entry("Dana Reyes", false, "100", "8", "0")],
            &cost_codes(),
            date(),
            "DATA DATE",
        );
        assert_eq!(result.notices[0].code, NoticeCode::DateLabelMissing);
        assert_eq!(result.sheet.text(32, 1), Some("Dana Reyes"));
    }

    /// DT-006: 25 indirect employees; 23 fit, 2 are dropped with notices.
    #[test]
    fn test_indirect_band_overflow() {
        let entries: Vec<EnrichedEntry> = (0..25)
            .map(|i| entry(&format!("Worker {:02}", i), true, "100", "8", "0"))
            .collect();
        let result = lay_out(&entries);

        assert_eq!(result.placements.len(), 23);
        assert_eq!(result.sheet.text(30, 1), Some("Worker 22"));
        assert!(result.sheet.cell(31, 5).is_none());
        assert_eq!(result.dropped.len(), 2);
        assert_eq!(result.dropped[0].employee_name, "Worker 23");
        assert_eq!(
            result
                .notices
                .iter()
                .filter(|n| n.code == NoticeCode::BandOverflow)
                .count(),
            2
        );
        assert!(!(8..=30).any(|row| result.sheet.is_row_hidden(row)));
    }

    #[test]
    fn test_spilling_employee_truncated_at_band_end() {
        let mut entries: Vec<EnrichedEntry> = (0..22)
            .map(|i| entry(&format!("Worker {:02}", i), true, "100", "8", "0"))
            .collect();
        for job in ["1", "2", "3", "4"] {
            entries.push(entry("Dana Reyes", true, job, "1", "0"));
        }
        let result = lay_out(&entries);

        let dana = result.placement("Dana Reyes").unwrap();
        assert_eq!(dana.first_row, 30);
        assert_eq!(dana.rows_used, 1);
        assert_eq!(dana.entries_placed, 2);
        assert_eq!(result.dropped[0].entries_dropped, 2);
        assert!(result.sheet.cell(31, 5).is_none());
    }

    /// DT-007: Zero-hour entries are invisible.
    #[test]
    fn test_zero_hour_entries_invisible() {
        let mut silent = entry("Lee Park", false, "100", "0", "0");
        silent.entry.comments = "should not show".to_string();
        silent.entry.subsistence_rate = "not-a-number".to_string();
        let result = lay_out(&[silent]);

        assert!(result.placements.is_empty());
        assert!((32..=261).all(|row| result.sheet.is_row_hidden(row)));
        assert!(result.sheet.cell(264, 1).is_none());
    }

    #[test]
    fn test_summary_written_below_bands() {
        let mut first = entry("Dana Reyes", false, "100", "8", "0");
        first.entry.comments = "Check valve leak".to_string();
        let mut second = entry("Lee Park", false, "100", "8", "0");
        second.entry.comments = "Check valve leak".to_string();
        let mut third = entry("Sam Ortiz", false, "100", "8", "0");
        third.entry.comments = "Replaced gasket".to_string();

        let result = lay_out(&[first, second, third]);
        let sheet = &result.sheet;

        assert_eq!(sheet.text(264, 1), Some("100 - 005 - Boiler"));
        assert_eq!(sheet.text(265, 1), Some("Check valve leak"));
        assert_eq!(sheet.text(266, 1), Some("Replaced gasket"));
        assert!(sheet.cell(267, 1).is_none());
        assert_eq!(result.summary.comments_written, 2);
    }

    proptest! {
        #[test]
        fn prop_bands_are_exclusive(flags in prop::collection::vec(any::<bool>(), 1..60)) {
            let entries: Vec<EnrichedEntry> = flags
                .iter()
                .enumerate()
                .map(|(i, indirect)| entry(&format!("E{}", i), *indirect, "100", "8", "0"))
                .collect();
            let result = lay_out(&entries);
            let layout = DailyTimeLayout::STANDARD;

            for placement in &result.placements {
                let band = layout.band(placement.indirect);
                prop_assert!(band.contains(placement.first_row));
                prop_assert!(band.contains(placement.first_row + placement.rows_used - 1));
                let expected = flags[placement.employee_name[1..].parse::<usize>().unwrap()];
                prop_assert_eq!(placement.indirect, expected);
            }
            prop_assert_eq!(result.placements.len() + result.dropped.len(), flags.len());
        }

        #[test]
        fn prop_slots_conserve_entries(counts in prop::collection::vec(1usize..6, 1..20)) {
            let entries: Vec<EnrichedEntry> = counts
                .iter()
                .enumerate()
                .flat_map(|(i, n)| {
                    (0..*n).map(move |j| entry(&format!("E{}", i), false, &format!("{}", j), "1", "0"))
                })
                .collect();
            let result = lay_out(&entries);

            prop_assert_eq!(result.entries_placed(), entries.len());
            for (i, n) in counts.iter().enumerate() {
                let placement = result.placement(&format!("E{}", i)).unwrap();
                prop_assert_eq!(placement.rows_used, rows_needed(*n));
            }
        }
    }
}
