//! Adjustable constants describing the grade sheet's layout and sentinels.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Layout and vocabulary of the published grade sheet.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides:
/// ```json
/// {
///   "block_offsets": [0, 20, 40],
///   "pass_token": "зач"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Row indices where each subject block's header row lives.
    pub block_offsets: Vec<usize>,
    /// Tables with fewer rows than this are treated as empty.
    pub min_rows: usize,
    /// Leading columns (id, name, unused) that never hold scores.
    pub reserved_columns: usize,
    /// Cell value marking an absence, compared case-insensitively.
    pub absence_token: String,
    /// Substring marking a pass/credit outcome, compared case-insensitively.
    pub pass_token: String,
    /// Topic used when a scored column has no topic label.
    pub topic_placeholder: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            block_offsets: vec![0, 18, 36, 54, 72],
            min_rows: 2,
            reserved_columns: 3,
            absence_token: "н".to_string(),
            pass_token: "зач".to_string(),
            topic_placeholder: "Без темы".to_string(),
        }
    }
}

impl IngestConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading ingest config '{path}'"))?;
        let config: IngestConfig = serde_json::from_str(&content)
            .with_context(|| format!("parsing ingest config '{path}'"))?;
        Ok(config)
    }

    /// Loads from `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}
