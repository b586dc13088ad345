//! Pay-code classification.
//!
//! Turns one enriched entry into zero to three line items, always in the
//! order regular, overtime, subsistence.

use rust_decimal::Decimal;

use crate::models::{parse_rate, EnrichedEntry, PayCodeKind, PayCodeLineItem};

/// Classifies an entry into pay-code line items.
///
/// - REGULAR when RT hours are positive, carrying those hours.
/// - OVERTIME when OT hours are positive, carrying those hours.
/// - SUBSISTENCE when the resolved subsistence rate parses as a positive
///   number, with hours fixed at one. A rate that does not parse yields no
///   item and no error.
///
/// Hours are never rounded.
pub fn classify_entry(enriched: &EnrichedEntry) -> Vec<PayCodeLineItem<'_>> {
    let entry = &enriched.entry;
    let mut items = Vec::with_capacity(3);

    if entry.rt_hours > Decimal::ZERO {
        items.push(PayCodeLineItem {
            kind: PayCodeKind::Regular,
            hours: entry.rt_hours,
            rate_field: enriched.rate_display().to_string(),
            source: enriched,
        });
    }

    if entry.ot_hours > Decimal::ZERO {
        items.push(PayCodeLineItem {
            kind: PayCodeKind::Overtime,
            hours: entry.ot_hours,
            rate_field: enriched.rate_display().to_string(),
            source: enriched,
        });
    }

    if parse_rate(&entry.subsistence_rate).is_some_and(|rate| rate > Decimal::ZERO) {
        items.push(PayCodeLineItem {
            kind: PayCodeKind::Subsistence,
            hours: Decimal::ONE,
            rate_field: entry.subsistence_rate.trim().to_string(),
            source: enriched,
        });
    }

    items
}

/// Classifies entries in order, concatenating their line items.
pub fn classify_entries(entries: &[EnrichedEntry]) -> Vec<PayCodeLineItem<'_>> {
    entries.iter().flat_map(classify_entry).collect()
}

/// Returns true if the entry produces at least one line item.
pub fn is_visible(enriched: &EnrichedEntry) -> bool {
    !classify_entry(enriched).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeEntry;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn enriched(rt: &str, ot: &str, subsistence: &str) -> EnrichedEntry {
        let mut entry = TimeEntry::new(
            "Dana Reyes",
            NaiveDate::from_ymd_opt(2025, 9, 23).unwrap(),
        );
        entry.rt_hours = dec(rt);
        entry.ot_hours = dec(ot);
        entry.subsistence_rate = subsistence.to_string();
        EnrichedEntry {
            entry,
            employee: None,
        }
    }

    fn kinds(items: &[PayCodeLineItem<'_>]) -> Vec<PayCodeKind> {
        items.iter().map(|i| i.kind).collect()
    }

    /// PC-001: RT only gives one regular item.
    #[test]
    fn test_regular_only() {
        let entry = enriched("8", "0", "");
        let items = classify_entry(&entry);
        assert_eq!(kinds(&items), vec![PayCodeKind::Regular]);
        assert_eq!(items[0].hours, dec("8"));
    }

    /// PC-002: All three kinds, in order.
    #[test]
    fn test_all_three_in_order() {
        let entry = enriched("8", "2.25", "75.00");
        let items = classify_entry(&entry);
        assert_eq!(
            kinds(&items),
            vec![
                PayCodeKind::Regular,
                PayCodeKind::Overtime,
                PayCodeKind::Subsistence
            ]
        );
        assert_eq!(items[1].hours, dec("2.25"));
        assert_eq!(items[2].hours, Decimal::ONE);
        assert_eq!(items[2].rate_field, "75.00");
        assert_eq!(items[0].rate_field, "75.00");
    }

    /// PC-003: A non-numeric subsistence rate yields nothing.
    #[test]
    fn test_non_numeric_subsistence_is_absent() {
        let entry = enriched("0", "0", "not-a-number");
        assert!(classify_entry(&entry).is_empty());
        assert!(!is_visible(&entry));
    }

    /// PC-004: Zero or negative subsistence yields nothing.
    #[test]
    fn test_zero_subsistence_is_absent() {
        assert!(classify_entry(&enriched("0", "0", "0")).is_empty());
        assert!(classify_entry(&enriched("0", "0", "-5")).is_empty());
    }

    /// PC-005: Hours keep their full precision.
    #[test]
    fn test_hours_not_rounded() {
        let entry = enriched("7.3333", "0", "");
        assert_eq!(classify_entry(&entry)[0].hours, dec("7.3333"));
    }

    proptest! {
        #[test]
        fn prop_item_count_matches_positive_fields(
            rt in 0u32..2000,
            ot in 0u32..2000,
            subsistence in prop::option::of(0u32..500),
        ) {
            let rt = Decimal::new(rt as i64, 2);
            let ot = Decimal::new(ot as i64, 2);
            let sub_text = subsistence.map(|s| s.to_string()).unwrap_or_default();
            let entry = enriched(&rt.to_string(), &ot.to_string(), &sub_text);

            let expected = usize::from(rt > Decimal::ZERO)
                + usize::from(ot > Decimal::ZERO)
                + usize::from(subsistence.is_some_and(|s| s > 0));
            let items = classify_entry(&entry);

            prop_assert_eq!(items.len(), expected);
            let mut sorted = kinds(&items);
            sorted.sort();
            prop_assert_eq!(sorted, kinds(&items));
        }
    }
}
