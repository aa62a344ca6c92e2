//! Output formatting and persistence for parsed grade records.
//!
//! Supports pretty JSON and CSV, either to a writer or appended to a file.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use crate::records::GradeRecord;
use csv::WriterBuilder;
use std::fs::{self, OpenOptions};
use std::io::Write;

/// Renders any serializable value as pretty JSON.
pub fn to_json(value: &impl Serialize) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Writes records as CSV, with a header row, to any writer.
pub fn write_csv<W: Write>(writer: W, records: &[GradeRecord]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(writer);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Appends records as rows to a CSV file.
///
/// Writes the header row only when the file is missing or empty.
pub fn append_records(path: &str, records: &[GradeRecord]) -> Result<()> {
    let has_content = fs::metadata(path).map(|m| m.len() > 0).unwrap_or(false);
    debug!(path, has_content, rows = records.len(), "Appending CSV records");

    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .with_context(|| format!("opening '{path}' for append"))?;

    let mut writer = WriterBuilder::new()
        .has_headers(!has_content) // IMPORTANT when appending
        .from_writer(file);

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}
