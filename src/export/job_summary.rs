//! Job comment summary written below the Daily Time bands.

use std::collections::{BTreeSet, HashMap};

use crate::models::EnrichedEntry;
use crate::templates::{CellStyle, CellValue, Sheet};

/// Distinct comments for one job/area/description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCommentGroup {
    /// `"<job> - <area> - <description>"`.
    pub job_key: String,
    /// Distinct non-blank comments, sorted.
    pub comments: BTreeSet<String>,
}

/// How much of the summary fit under the ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryOutcome {
    /// Groups whose header was written.
    pub groups_written: usize,
    /// Comment rows written.
    pub comments_written: usize,
    /// True if anything was cut off by the ceiling.
    pub truncated: bool,
}

/// Groups entries by job key in first-appearance order.
///
/// Groups whose entries carry no comments are kept (with an empty set) so
/// callers can see every job; only groups with comments are written.
pub fn group_job_comments<'a, I>(entries: I) -> Vec<JobCommentGroup>
where
    I: IntoIterator<Item = &'a EnrichedEntry>,
{
    let mut groups: Vec<JobCommentGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for enriched in entries {
        let job_key = enriched.entry.job_display();
        let position = *index.entry(job_key.clone()).or_insert_with(|| {
            groups.push(JobCommentGroup {
                job_key,
                comments: BTreeSet::new(),
            });
            groups.len() - 1
        });

        let comment = enriched.entry.comments.trim();
        if !crate::models::is_blank(comment) {
            groups[position].comments.insert(comment.to_string());
        }
    }

    groups
}

/// Writes the summary from `start` down to `ceiling` (inclusive).
///
/// Each group with comments gets a bold, underlined header in column A, one
/// row per comment, then a blank row. Nothing is written past the ceiling.
pub fn write_job_summary(
    sheet: &mut Sheet,
    groups: &[JobCommentGroup],
    column: u16,
    start: u32,
    ceiling: u32,
) -> SummaryOutcome {
    let mut row = start;
    let mut outcome = SummaryOutcome {
        groups_written: 0,
        comments_written: 0,
        truncated: false,
    };

    for group in groups.iter().filter(|g| !g.comments.is_empty()) {
        if row > ceiling {
            outcome.truncated = true;
            break;
        }
        sheet.write(
            row,
            column,
            CellValue::Text(group.job_key.clone()),
            CellStyle::HEADING,
        );
        outcome.groups_written += 1;
        row += 1;

        for comment in &group.comments {
            if row > ceiling {
                outcome.truncated = true;
                break;
            }
            sheet.write_text(row, column, comment.clone());
            outcome.comments_written += 1;
            row += 1;
        }

        row += 1;
    }

    outcome
}
