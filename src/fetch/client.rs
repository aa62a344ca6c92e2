use async_trait::async_trait;
use reqwest::{Request, Response};

/// Executes prepared requests; the seam where tests stub the network.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
