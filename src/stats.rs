use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::parser::blocks::SkippedBlock;

/// Counts for one subject block: what was scanned and what was dropped.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct BlockStats {
    pub subject: String,
    pub start_row: usize,

    // rows
    pub data_rows: usize,
    pub blank_rows: usize,
    pub rows_without_id: usize,

    // cells
    pub cells_without_date: usize,
    pub unrecognized_cells: usize,
    pub records: usize,
}

impl BlockStats {
    pub fn new(subject: &str, start_row: usize) -> Self {
        Self {
            subject: subject.to_string(),
            start_row,
            ..Default::default()
        }
    }

    /// Cells that held something but produced no record.
    pub fn dropped_cells(&self) -> usize {
        self.cells_without_date + self.unrecognized_cells
    }
}

/// Diagnostics for one parse. Never affects the returned records.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct IngestStats {
    pub timestamp: DateTime<Utc>,
    pub total_rows: usize,
    /// Set when the table had fewer rows than the configured minimum.
    pub treated_as_empty: bool,
    pub blocks: Vec<BlockStats>,
    pub skipped_blocks: Vec<SkippedBlock>,
    pub total_records: usize,
}

impl IngestStats {
    pub fn new(total_rows: usize) -> Self {
        Self {
            timestamp: Utc::now(),
            total_rows,
            ..Default::default()
        }
    }

    pub fn pct(part: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }

    /// Share of non-blank score cells that became records.
    pub fn recognized_pct(&self) -> f64 {
        let dropped: usize = self.blocks.iter().map(BlockStats::dropped_cells).sum();
        Self::pct(self.total_records, self.total_records + dropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pct_with_zero_total() {
        assert_eq!(IngestStats::pct(10, 0), 0.0);
    }

    #[test]
    fn test_recognized_pct() {
        let mut stats = IngestStats::new(10);
        let mut block = BlockStats::new("Math", 0);
        block.records = 3;
        block.unrecognized_cells = 1;
        stats.blocks.push(block);
        stats.total_records = 3;

        assert_eq!(stats.recognized_pct(), 75.0);
    }

    #[test]
    fn test_empty_stats_serialize() {
        let json = serde_json::to_value(IngestStats::new(0)).unwrap();
        assert_eq!(json["total_records"], 0);
        assert!(json["blocks"].as_array().unwrap().is_empty());
    }
}
