//! Data types produced by the per-subject summaries.

use serde::Serialize;

/// Per-subject roll-up of one user's records, as the portal's grade view
/// shows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectSummary {
    pub(crate) subject: String,
    pub(crate) numeric_count: usize,
    /// Mean of numeric scores; `None` when the subject has none.
    pub(crate) average: Option<f64>,
    pub(crate) stddev: f64,
    pub(crate) passes: usize,
    pub(crate) absences: usize,
    /// Latest canonical `YYYY-MM-DD` date among the records.
    pub(crate) latest_date: Option<String>,
}

impl SubjectSummary {
    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn average(&self) -> Option<f64> {
        self.average
    }

    pub fn numeric_count(&self) -> usize {
        self.numeric_count
    }

    pub fn passes(&self) -> usize {
        self.passes
    }

    pub fn absences(&self) -> usize {
        self.absences
    }

    pub fn latest_date(&self) -> Option<&str> {
        self.latest_date.as_deref()
    }
}
