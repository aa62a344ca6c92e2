//! Fixed-offset subject block location.

use serde::Serialize;
use std::ops::Range;
use tracing::debug;

use super::table::RawTable;

/// A subject's slice of the table: header row, topic row, then data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectBlock {
    pub start_row: usize,
    pub subject: String,
    pub data_rows: Range<usize>,
}

impl SubjectBlock {
    pub fn header_row(&self) -> usize {
        self.start_row
    }

    pub fn topic_row(&self) -> usize {
        self.start_row + 1
    }
}

/// Why a configured offset produced no block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    OutOfRange,
    BlankSubject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkippedBlock {
    pub start_row: usize,
    pub reason: SkipReason,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BlockLayout {
    pub blocks: Vec<SubjectBlock>,
    pub skipped: Vec<SkippedBlock>,
}

/// Resolves each configured offset into a [`SubjectBlock`].
///
/// Data rows of block *i* end at offset *i+1*, or at the table end for the
/// last configured offset. Offsets past the table and blocks whose header
/// has no subject name are reported in [`BlockLayout::skipped`].
pub fn locate_blocks(table: &RawTable, offsets: &[usize]) -> BlockLayout {
    let mut layout = BlockLayout::default();
    let total = table.len();

    for (i, &start_row) in offsets.iter().enumerate() {
        if start_row >= total {
            debug!(start_row, total, "Block offset beyond table, skipping");
            layout.skipped.push(SkippedBlock {
                start_row,
                reason: SkipReason::OutOfRange,
            });
            continue;
        }

        let subject = table.cell(start_row, 0);
        if subject.is_empty() {
            debug!(start_row, "Block has no subject name, skipping");
            layout.skipped.push(SkippedBlock {
                start_row,
                reason: SkipReason::BlankSubject,
            });
            continue;
        }

        let end = offsets.get(i + 1).map_or(total, |&next| next.min(total));
        let first_data = (start_row + 2).min(end.max(start_row));

        layout.blocks.push(SubjectBlock {
            start_row,
            subject: subject.to_string(),
            data_rows: first_data..end.max(first_data),
        });
    }

    layout
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(lines: &[&str]) -> RawTable {
        RawTable::parse(&lines.join("\n"))
    }

    #[test]
    fn test_spans_end_at_next_offset() {
        let t = table(&[
            "Math,,,1.9", ",,,Quiz", "u1,A,,5", "u2,B,,4",
            "Art,,,2.9", ",,,Draw", "u1,A,,3",
        ]);
        let layout = locate_blocks(&t, &[0, 4]);

        assert_eq!(layout.blocks.len(), 2);
        assert_eq!(layout.blocks[0].subject, "Math");
        assert_eq!(layout.blocks[0].data_rows, 2..4);
        assert_eq!(layout.blocks[1].subject, "Art");
        assert_eq!(layout.blocks[1].topic_row(), 5);
        assert_eq!(layout.blocks[1].data_rows, 6..7);
        assert!(layout.skipped.is_empty());
    }

    #[test]
    fn test_blank_subject_is_skipped() {
        let t = table(&[",,,1.9", ",,,Quiz", "u1,A,,5", "Art,,,2.9", ",,,Draw", "u1,A,,3"]);
        let layout = locate_blocks(&t, &[0, 3]);

        assert_eq!(layout.blocks.len(), 1);
        assert_eq!(layout.blocks[0].subject, "Art");
        assert_eq!(
            layout.skipped,
            vec![SkippedBlock { start_row: 0, reason: SkipReason::BlankSubject }]
        );
    }

    #[test]
    fn test_offsets_beyond_table_are_omitted() {
        let t = table(&["Math,,,1.9", ",,,Quiz", "u1,A,,5"]);
        let layout = locate_blocks(&t, &[0, 18, 36]);

        assert_eq!(layout.blocks.len(), 1);
        assert_eq!(layout.blocks[0].data_rows, 2..3);
        assert_eq!(layout.skipped.len(), 2);
        assert!(layout.skipped.iter().all(|s| s.reason == SkipReason::OutOfRange));
    }

    #[test]
    fn test_header_only_block_has_no_data_rows() {
        let t = table(&["Math,,,1.9"]);
        let layout = locate_blocks(&t, &[0]);

        assert_eq!(layout.blocks.len(), 1);
        assert!(layout.blocks[0].data_rows.is_empty());
    }
}
