//! HTTP transport seam for tile fetching.
//!
//! The scheduler talks to the network through the [`TileFetcher`] trait so
//! tests can substitute mock transports. Uses boxed futures for trait-object
//! support.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use bytes::Bytes;
use thiserror::Error;

/// Boxed future type for dyn-compatible async methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Errors surfaced by a tile fetch.
///
/// Only transport-level failures are errors. A response with an HTTP error
/// status still delivers its body and counts as a completed fetch.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The HTTP client could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    ClientBuild(String),

    /// The request failed at the transport level.
    #[error("request failed: {0}")]
    Transport(String),
}

/// A fetched tile image and the content type the server declared for it.
#[derive(Debug, Clone)]
pub struct TileImage {
    pub bytes: Bytes,
    /// Empty when the server sent no `Content-Type` header.
    pub content_type: String,
}

/// Transport for tile downloads.
pub trait TileFetcher: Send + Sync {
    /// Performs an HTTP GET for `url`, returning the body and declared
    /// content type.
    fn fetch(&self, url: &str) -> BoxFuture<'_, Result<TileImage, FetchError>>;
}

/// Real transport backed by an async `reqwest` client.
///
/// No request timeout is applied by default, so a stalled request stalls its
/// wave; [`ReqwestFetcher::with_timeout`] opts in to one.
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    /// Creates a fetcher with default client configuration.
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| FetchError::ClientBuild(e.to_string()))?;

        Ok(Self { client })
    }

    /// Creates a fetcher whose requests time out after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::ClientBuild(e.to_string()))?;

        Ok(Self { client })
    }
}

impl TileFetcher for ReqwestFetcher {
    fn fetch(&self, url: &str) -> BoxFuture<'_, Result<TileImage, FetchError>> {
        let request = self.client.get(url);

        Box::pin(async move {
            let response = request
                .send()
                .await
                .map_err(|e| FetchError::Transport(e.to_string()))?;

            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string();

            let bytes = response
                .bytes()
                .await
                .map_err(|e| FetchError::Transport(e.to_string()))?;

            Ok(TileImage {
                bytes,
                content_type,
            })
        })
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    /// Mock transport returning one canned response for every URL.
    pub struct MockFetcher {
        pub response: Result<TileImage, FetchError>,
    }

    impl MockFetcher {
        /// Mock that answers every request with a PNG body.
        pub fn ok() -> Self {
            Self {
                response: Ok(TileImage {
                    bytes: Bytes::from_static(b"\x89PNG"),
                    content_type: "image/png".to_string(),
                }),
            }
        }
    }

    impl TileFetcher for MockFetcher {
        fn fetch(&self, _url: &str) -> BoxFuture<'_, Result<TileImage, FetchError>> {
            let response = self.response.clone();
            Box::pin(async move { response })
        }
    }

    #[tokio::test]
    async fn test_mock_fetcher_success() {
        let mock = MockFetcher::ok();
        let image = mock.fetch("http://example.com").await.unwrap();
        assert_eq!(image.content_type, "image/png");
        assert!(!image.bytes.is_empty());
    }

    #[tokio::test]
    async fn test_mock_fetcher_error() {
        let mock = MockFetcher {
            response: Err(FetchError::Transport("connection refused".to_string())),
        };
        assert!(mock.fetch("http://example.com").await.is_err());
    }
}
