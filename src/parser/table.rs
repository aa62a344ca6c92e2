//! Row splitting and quote-aware field parsing for the sheet export.

const DELIMITER: char = ',';
const QUOTE: char = '"';
const BOM: char = '\u{feff}';

/// The export as ordered rows of trimmed fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Splits `text` into rows and parses every row into fields.
    ///
    /// Blank lines are kept so row indices match the sheet's geometry.
    pub fn parse(text: &str) -> Self {
        let rows = split_rows(text).map(parse_row).collect();
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Returns the trimmed cell at `(row, col)`, or `""` when out of range.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Splits raw export text into lines, dropping a leading byte-order mark
/// and the `\r` of CRLF line endings.
pub fn split_rows(text: &str) -> impl Iterator<Item = &str> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Parses one line into trimmed fields.
///
/// Quoted fields may contain the delimiter, and `""` inside a quoted field
/// is a literal quote. The trailing field is always emitted, so an empty
/// line yields a single empty field.
pub fn parse_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            QUOTE if in_quotes && chars.peek() == Some(&QUOTE) => {
                current.push(QUOTE);
                chars.next();
            }
            QUOTE => in_quotes = !in_quotes,
            DELIMITER if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());

    fields
}

/// True when every field of the row is empty.
pub fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|f| f.is_empty())
}
