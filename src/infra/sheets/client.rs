use async_trait::async_trait;
use tracing::info;

use crate::config::IngestConfig;
use crate::fetch::{FetchError, HttpClient, fetch_text};
use crate::parser::parse_grades;
use crate::records::GradeRecord;
use crate::services::gradebook::GradebookSource;

const EXPORT_BASE_URL: &str = "https://docs.google.com/spreadsheets/d";

/// Fetches a published sheet export and parses it on every load.
pub struct SheetsClient<C> {
    client: C,
    url: String,
    config: IngestConfig,
}

impl<C: HttpClient> SheetsClient<C> {
    pub fn new(client: C, url: impl Into<String>, config: IngestConfig) -> Self {
        Self {
            client,
            url: url.into(),
            config,
        }
    }

    /// Targets the CSV export of one tab (`gid`) of a published spreadsheet.
    pub fn for_sheet(client: C, sheet_id: &str, gid: &str, config: IngestConfig) -> Self {
        let url = format!("{EXPORT_BASE_URL}/{sheet_id}/export?format=csv&gid={gid}");
        Self::new(client, url, config)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl<C: HttpClient> GradebookSource for SheetsClient<C> {
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    async fn load(&self) -> Result<Vec<GradeRecord>, FetchError> {
        let text = fetch_text(&self.client, &self.url).await?;
        let records = parse_grades(&text, &self.config);
        info!(records = records.len(), "Gradebook loaded");
        Ok(records)
    }
}
