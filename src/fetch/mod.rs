//! HTTP retrieval of the published sheet export.

mod basic;
mod client;
mod error;

pub use basic::BasicClient;
pub use client::HttpClient;
pub use error::FetchError;

use tracing::debug;

/// Fetches the raw body at `url`, failing on transport errors and non-2xx
/// statuses.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>, FetchError> {
    let parsed = reqwest::Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    let req = reqwest::Request::new(reqwest::Method::GET, parsed);

    let resp = client
        .execute(req)
        .await
        .map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    let bytes = resp.bytes().await.map_err(|source| FetchError::Body {
        url: url.to_string(),
        source,
    })?;
    debug!(bytes = bytes.len(), %status, "Sheet body received");

    Ok(bytes.to_vec())
}

/// Fetches the export at `url` as UTF-8 text. A byte-order mark, if any, is
/// left in place for the row splitter to drop.
#[tracing::instrument(skip(client))]
pub async fn fetch_text<C: HttpClient>(client: &C, url: &str) -> Result<String, FetchError> {
    let bytes = fetch_bytes(client, url).await?;
    String::from_utf8(bytes).map_err(|source| FetchError::Decode {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Answers every request with the same canned status and body.
    pub(crate) struct StubClient {
        pub status: u16,
        pub body: &'static [u8],
    }

    #[async_trait]
    impl HttpClient for StubClient {
        async fn execute(&self, _req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
            let resp = http::Response::builder()
                .status(self.status)
                .body(self.body)
                .unwrap();
            Ok(reqwest::Response::from(resp))
        }
    }

    #[tokio::test]
    async fn test_fetch_text_success() {
        let client = StubClient { status: 200, body: b"Math,,,1.9" };
        let text = fetch_text(&client, "https://sheets.example/export?format=csv")
            .await
            .unwrap();
        assert_eq!(text, "Math,,,1.9");
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let client = StubClient { status: 404, body: b"not found" };
        let err = fetch_text(&client, "https://sheets.example/export")
            .await
            .unwrap_err();
        match err {
            FetchError::Status { status, .. } => assert_eq!(status.as_u16(), 404),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_utf8_body_is_decode_error() {
        let client = StubClient { status: 200, body: &[0xff, 0xfe] };
        let err = fetch_text(&client, "https://sheets.example/export")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let client = StubClient { status: 200, body: b"" };
        let err = fetch_text(&client, "not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let client = BasicClient::new();
        let err = fetch_text(&client, "http://127.0.0.1:9/export").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
    }
}
