//! Fixed template geometry.
//!
//! Every row and column position the layout engines write to lives here, as
//! named constants in one structure per template. Positions are 1-indexed, as
//! spreadsheet users read them.

/// Version of the row/column contract below. Template descriptors must
/// declare the same `layout_version`.
pub const LAYOUT_VERSION: u32 = 1;

/// A contiguous, inclusive range of template rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBand {
    /// First row of the band.
    pub first: u32,
    /// Last row of the band (inclusive).
    pub last: u32,
}

impl RowBand {
    /// Creates a band.
    pub const fn new(first: u32, last: u32) -> Self {
        Self { first, last }
    }

    /// Number of rows in the band.
    pub const fn capacity(&self) -> u32 {
        self.last - self.first + 1
    }

    /// Returns true if `row` lies inside the band.
    pub const fn contains(&self, row: u32) -> bool {
        row >= self.first && row <= self.last
    }

    /// Iterates the rows of the band.
    pub fn rows(&self) -> std::ops::RangeInclusive<u32> {
        self.first..=self.last
    }
}

/// The five columns of one Daily Time slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotColumns {
    /// Cost code description.
    pub description: u16,
    /// Cost code.
    pub cost_code: u16,
    /// Job display string.
    pub job: u16,
    /// Regular-time hours.
    pub rt_hours: u16,
    /// Overtime hours.
    pub ot_hours: u16,
}

impl SlotColumns {
    const fn starting_at(first: u16) -> Self {
        Self {
            description: first,
            cost_code: first + 1,
            job: first + 2,
            rt_hours: first + 3,
            ot_hours: first + 4,
        }
    }
}

/// Geometry of the Daily Time template.
///
/// # Example
///
/// ```
/// use timesheet_export::templates::DailyTimeLayout;
///
/// let layout = DailyTimeLayout::STANDARD;
/// assert_eq!(layout.indirect_band.capacity(), 23);
/// assert_eq!(layout.direct_band.first, 32);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTimeLayout {
    /// Row holding the column headers.
    pub header_row: u32,
    /// Rows reserved for indirect employees.
    pub indirect_band: RowBand,
    /// Rows reserved for direct employees.
    pub direct_band: RowBand,
    /// First row of the job comment summary.
    pub summary_start: u32,
    /// Last row the summary may write to.
    pub summary_ceiling: u32,
    /// Employee name column (A).
    pub name_column: u16,
    /// Trade class column (B).
    pub trade_class_column: u16,
    /// Rate marker column (D).
    pub rate_marker_column: u16,
    /// First slot of a row (E through I).
    pub primary_slot: SlotColumns,
    /// Second slot of a row (K through O).
    pub secondary_slot: SlotColumns,
    /// The date label is searched for in rows `1..=date_search_rows`.
    pub date_search_rows: u32,
    /// The date label is searched for in columns `1..=date_search_columns`.
    pub date_search_columns: u16,
}

impl DailyTimeLayout {
    /// The standard Daily Time geometry.
    pub const STANDARD: Self = Self {
        header_row: 7,
        indirect_band: RowBand::new(8, 30),
        direct_band: RowBand::new(32, 261),
        summary_start: 264,
        summary_ceiling: 500,
        name_column: 1,
        trade_class_column: 2,
        rate_marker_column: 4,
        primary_slot: SlotColumns::starting_at(5),
        secondary_slot: SlotColumns::starting_at(11),
        date_search_rows: 14,
        date_search_columns: 14,
    };

    /// Marker written in the rate column for employees with any rate.
    pub const RATE_MARKER: &'static str = "*";

    /// Returns the band for an indirect or direct employee.
    pub fn band(&self, indirect: bool) -> RowBand {
        if indirect {
            self.indirect_band
        } else {
            self.direct_band
        }
    }

    /// Header text the template must carry on the header row, by column.
    pub fn required_headers(&self) -> Vec<(u16, &'static str)> {
        let mut headers = vec![
            (self.name_column, "Employee Name"),
            (self.trade_class_column, "Trade Class"),
            (self.rate_marker_column, "Rates"),
        ];
        for slot in [self.primary_slot, self.secondary_slot] {
            headers.push((slot.description, "Cost Code Description"));
            headers.push((slot.cost_code, "Cost Code"));
            headers.push((slot.job, "Job"));
            headers.push((slot.rt_hours, "RT"));
            headers.push((slot.ot_hours, "OT"));
        }
        headers
    }
}

/// Column headers of the TimeEntries template, columns A through N.
pub const TIME_ENTRIES_HEADERS: [&str; 14] = [
    "Date",
    "Time Record Type",
    "Person Number",
    "Employee Name",
    "Override Trade Class",
    "Post To Payroll",
    "Cost Code / Phase",
    "JobArea",
    "Scope Change",
    "Pay Code",
    "Hours",
    "Night Shift",
    "Premium Rate / Subsistence Rate / Travel Rate",
    "Comments",
];

/// Geometry of the TimeEntries (Daily Import) template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeEntriesLayout {
    /// Row holding the column headers.
    pub header_row: u32,
    /// First row that receives line items.
    pub first_data_row: u32,
}

impl TimeEntriesLayout {
    /// The standard TimeEntries geometry.
    pub const STANDARD: Self = Self {
        header_row: 3,
        first_data_row: 4,
    };

    /// Header text the template must carry on the header row, by column.
    pub fn required_headers(&self) -> Vec<(u16, &'static str)> {
        TIME_ENTRIES_HEADERS
            .iter()
            .enumerate()
            .map(|(i, header)| (i as u16 + 1, *header))
            .collect()
    }
}

/// Columns of one Daily Import row.
pub mod time_entries_columns {
    /// A: export date.
    pub const DATE: u16 = 1;
    /// B: time record type.
    pub const TIME_RECORD_TYPE: u16 = 2;
    /// C: person number.
    pub const PERSON_NUMBER: u16 = 3;
    /// D: employee name.
    pub const EMPLOYEE_NAME: u16 = 4;
    /// E: trade class.
    pub const TRADE_CLASS: u16 = 5;
    /// F: post-to-payroll flag.
    pub const POST_TO_PAYROLL: u16 = 6;
    /// G: cost code.
    pub const COST_CODE: u16 = 7;
    /// H: padded job area.
    pub const JOB_AREA: u16 = 8;
    /// I: scope change, always empty.
    pub const SCOPE_CHANGE: u16 = 9;
    /// J: pay code.
    pub const PAY_CODE: u16 = 10;
    /// K: hours.
    pub const HOURS: u16 = 11;
    /// L: night shift flag.
    pub const NIGHT_SHIFT: u16 = 12;
    /// M: rate display.
    pub const RATE: u16 = 13;
    /// N: comments, always empty.
    pub const COMMENTS: u16 = 14;
}
