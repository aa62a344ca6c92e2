//! Block-pivot extraction of grade records from the sheet export.
//!
//! The stages run in order and each is a pure function of the previous one:
//! [`table`] splits rows and fields, [`blocks`] locates subject blocks at
//! fixed offsets, and the row scanner here reads every data row right to
//! left, normalizing dates with [`dates`] and classifying cells with
//! [`scores`]. Irregular input only ever drops the affected block, row or
//! cell; parsing itself cannot fail.

pub mod blocks;
pub mod dates;
pub mod scores;
pub mod table;

use chrono::{Datelike, Local};
use tracing::{debug, trace};

use crate::config::IngestConfig;
use crate::records::GradeRecord;
use crate::stats::{BlockStats, IngestStats};
use blocks::{SubjectBlock, locate_blocks};
use dates::normalize_date_in_year;
use scores::classify_score;
use table::{RawTable, is_blank_row};

/// Records from one parse together with its diagnostics.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub records: Vec<GradeRecord>,
    pub stats: IngestStats,
}

/// Parses the export into grade records for every user in the sheet.
pub fn parse_grades(text: &str, config: &IngestConfig) -> Vec<GradeRecord> {
    parse_with_report(text, config).records
}

/// Like [`parse_grades`], also returning per-block drop counts.
pub fn parse_with_report(text: &str, config: &IngestConfig) -> ParseOutcome {
    parse_with_report_in_year(text, config, Local::now().year())
}

/// Parses with `current_year` standing in for dates written without a year.
pub fn parse_grades_in_year(text: &str, config: &IngestConfig, current_year: i32) -> Vec<GradeRecord> {
    parse_with_report_in_year(text, config, current_year).records
}

#[tracing::instrument(skip(text, config), fields(bytes = text.len()))]
pub fn parse_with_report_in_year(
    text: &str,
    config: &IngestConfig,
    current_year: i32,
) -> ParseOutcome {
    let table = RawTable::parse(text);
    let mut stats = IngestStats::new(table.len());
    let mut records = Vec::new();

    if table.len() < config.min_rows {
        debug!(rows = table.len(), min_rows = config.min_rows, "Table too short, treating as empty");
        stats.treated_as_empty = true;
        return ParseOutcome { records, stats };
    }

    let layout = locate_blocks(&table, &config.block_offsets);
    stats.skipped_blocks = layout.skipped;

    for block in &layout.blocks {
        let block_stats = scan_block(&table, block, config, current_year, &mut records);
        debug!(
            subject = %block.subject,
            start_row = block.start_row,
            records = block_stats.records,
            dropped = block_stats.dropped_cells(),
            "Block scanned"
        );
        stats.blocks.push(block_stats);
    }

    stats.total_records = records.len();
    debug!(records = records.len(), blocks = stats.blocks.len(), "Parse complete");

    ParseOutcome { records, stats }
}

/// Emits a record for every classifiable, dated score cell in the block.
fn scan_block(
    table: &RawTable,
    block: &SubjectBlock,
    config: &IngestConfig,
    current_year: i32,
    records: &mut Vec<GradeRecord>,
) -> BlockStats {
    let mut stats = BlockStats::new(&block.subject, block.start_row);

    for row_index in block.data_rows.clone() {
        let Some(row) = table.row(row_index) else {
            continue;
        };
        stats.data_rows += 1;

        if is_blank_row(row) {
            stats.blank_rows += 1;
            continue;
        }

        let user_id = table.cell(row_index, 0);
        if user_id.is_empty() {
            trace!(row = row_index, "Row has no user id, skipping");
            stats.rows_without_id += 1;
            continue;
        }
        let user_name = Some(table.cell(row_index, 1))
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        for col in (config.reserved_columns..row.len()).rev() {
            let raw_score = &row[col];
            if raw_score.is_empty() {
                continue;
            }

            let raw_date = table.cell(block.header_row(), col);
            if raw_date.is_empty() {
                trace!(row = row_index, col, "Score without date, skipping");
                stats.cells_without_date += 1;
                continue;
            }

            let Some(score) = classify_score(raw_score, &config.absence_token, &config.pass_token)
            else {
                trace!(row = row_index, col, cell = %raw_score, "Unrecognized score, skipping");
                stats.unrecognized_cells += 1;
                continue;
            };

            let topic = match table.cell(block.topic_row(), col) {
                "" => config.topic_placeholder.clone(),
                t => t.to_string(),
            };

            trace!(row = row_index, col, %score, "Record emitted");
            records.push(GradeRecord {
                user_id: user_id.to_string(),
                user_name: user_name.clone(),
                subject: block.subject.clone(),
                topic,
                date: normalize_date_in_year(raw_date, current_year),
                score,
            });
            stats.records += 1;
        }
    }

    stats
}
