//! Trait and fallback policy for loading grade records.

use async_trait::async_trait;
use tracing::warn;

use crate::fetch::FetchError;
use crate::records::GradeRecord;

/// Where the records came from, for callers that label demo data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Live,
    Demo,
}

/// Abstraction over a provider of the full record list.
#[async_trait]
pub trait GradebookSource: Send + Sync {
    /// Returns every record for every user, freshly built on each call.
    async fn load(&self) -> Result<Vec<GradeRecord>, FetchError>;
}

/// Loads from `primary`, substituting `fallback`'s records on failure.
///
/// The fallback's own error, if any, is returned so that a failure is never
/// silently turned into an empty list.
pub async fn load_or_fallback<P, F>(
    primary: &P,
    fallback: &F,
) -> Result<(Vec<GradeRecord>, Provenance), FetchError>
where
    P: GradebookSource + ?Sized,
    F: GradebookSource + ?Sized,
{
    match primary.load().await {
        Ok(records) => Ok((records, Provenance::Live)),
        Err(e) => {
            warn!(error = %e, "Gradebook load failed, using demonstration data");
            let records = fallback.load().await?;
            Ok((records, Provenance::Demo))
        }
    }
}
