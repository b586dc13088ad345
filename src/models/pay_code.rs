//! Enriched entries and pay-code line items.
//!
//! This module contains the derived (never stored) shapes the export works
//! with after enrichment: [`EnrichedEntry`], an entry joined with its roster
//! record, and [`PayCodeLineItem`], one classified unit of pay.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{is_blank, EmployeeRecord, TimeEntry};

/// The kind of pay a line item represents.
///
/// The declaration order is the emission order used by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayCodeKind {
    /// Regular-time hours.
    Regular,
    /// Overtime hours.
    Overtime,
    /// A daily subsistence payment, always one unit.
    Subsistence,
}

/// A time entry after roster enrichment.
///
/// Blank entry fields have been filled from the roster; the matched roster
/// record (if any) is kept for the fields that only the roster knows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedEntry {
    /// The entry with blank fields filled from the roster.
    pub entry: TimeEntry,
    /// The roster record matched by exact name, if any.
    pub employee: Option<EmployeeRecord>,
}

impl EnrichedEntry {
    /// Returns true if the matched roster record marks the employee indirect.
    ///
    /// Employees missing from the roster are direct.
    pub fn is_indirect(&self) -> bool {
        self.employee.as_ref().is_some_and(|e| e.indirect)
    }

    /// Returns the roster's time record type, or an empty string.
    pub fn time_record_type(&self) -> &str {
        self.employee
            .as_ref()
            .map(|e| e.time_record_type.as_str())
            .unwrap_or("")
    }

    /// Returns the first non-blank of subsistence, premium and travel rate.
    pub fn rate_display(&self) -> &str {
        [
            &self.entry.subsistence_rate,
            &self.entry.premium_rate,
            &self.entry.travel_rate,
        ]
        .into_iter()
        .find(|rate| !is_blank(rate))
        .map(String::as_str)
        .unwrap_or("")
    }
}

/// One classified unit of pay derived from a single entry.
///
/// Line items borrow the entry they came from, so they live only as long as
/// the export that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayCodeLineItem<'a> {
    /// The kind of pay.
    pub kind: PayCodeKind,
    /// Hours for regular/overtime, `1` for subsistence.
    pub hours: Decimal,
    /// The rate text shown beside the item.
    pub rate_field: String,
    /// The entry the item was derived from.
    pub source: &'a EnrichedEntry,
}
