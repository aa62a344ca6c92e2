//! Classification of raw score cells.

use crate::records::Score;

/// Classifies a score cell, or returns `None` when it should be discarded.
///
/// Precedence: absence token (exact, case-insensitive), then a finite
/// number, then the pass token as a case-insensitive substring.
pub fn classify_score(raw: &str, absence_token: &str, pass_token: &str) -> Option<Score> {
    let cell = raw.trim().trim_matches('"').trim();
    if cell.is_empty() {
        return None;
    }

    let lowered = cell.to_lowercase();
    if lowered == absence_token.to_lowercase() {
        return Some(Score::Absent);
    }

    if let Some(n) = parse_number(cell) {
        return Some(Score::Numeric(n));
    }

    let pass = pass_token.to_lowercase();
    if !pass.is_empty() && lowered.contains(&pass) {
        return Some(Score::Pass);
    }

    None
}

/// Parses a finite number, accepting a single decimal comma.
fn parse_number(cell: &str) -> Option<f64> {
    let parsed = cell.parse::<f64>().ok().or_else(|| {
        if cell.matches(',').count() == 1 {
            cell.replace(',', ".").parse::<f64>().ok()
        } else {
            None
        }
    })?;

    parsed.is_finite().then_some(parsed)
}
