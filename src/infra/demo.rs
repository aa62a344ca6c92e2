use async_trait::async_trait;

use crate::config::IngestConfig;
use crate::fetch::FetchError;
use crate::parser::parse_grades;
use crate::records::GradeRecord;
use crate::services::gradebook::GradebookSource;

const DEMO_SHEET: &str = include_str!("demo_gradebook.csv");
const DEMO_OFFSETS: [usize; 2] = [0, 4];

/// Fixed demonstration records, shown when the live sheet is unreachable.
pub struct DemoSource;

impl DemoSource {
    pub fn records() -> Vec<GradeRecord> {
        let config = IngestConfig {
            block_offsets: DEMO_OFFSETS.to_vec(),
            ..IngestConfig::default()
        };
        parse_grades(DEMO_SHEET, &config)
    }
}

#[async_trait]
impl GradebookSource for DemoSource {
    async fn load(&self) -> Result<Vec<GradeRecord>, FetchError> {
        Ok(Self::records())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::tests::StubClient;
    use crate::infra::sheets::SheetsClient;
    use crate::records::Score;
    use crate::services::gradebook::{Provenance, load_or_fallback};

    #[test]
    fn test_demo_records() {
        let records = DemoSource::records();
        assert_eq!(records.len(), 8);
        assert!(records.iter().any(|r| r.score == Score::Absent));
        assert!(records.iter().any(|r| r.topic == "Без темы"));
        assert!(records.iter().all(|r| r.date.starts_with("2024-09-")));
    }

    #[tokio::test]
    async fn test_fallback_on_fetch_failure() {
        let stub = StubClient { status: 503, body: b"" };
        let live = SheetsClient::new(stub, "https://sheets.example/export", IngestConfig::default());

        let (records, provenance) = load_or_fallback(&live, &DemoSource).await.unwrap();
        assert_eq!(provenance, Provenance::Demo);
        assert_eq!(records, DemoSource::records());
    }

    #[tokio::test]
    async fn test_live_data_preferred() {
        let stub = StubClient { status: 200, body: b"Art,,,1.9.2024\n,,,Sketch\nu1,Ann,,5" };
        let live = SheetsClient::new(stub, "https://sheets.example/export", IngestConfig::default());

        let (records, provenance) = load_or_fallback(&live, &DemoSource).await.unwrap();
        assert_eq!(provenance, Provenance::Live);
        assert_eq!(records.len(), 1);
    }
}
