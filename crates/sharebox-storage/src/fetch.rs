//! HTTP pass-through fetcher for permanent object URLs.

use crate::traits::{ByteStream, StorageError, StorageResult, UrlFetcher};
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::StatusCode;

/// Fetches stored objects from their public URL with a shared `reqwest` client.
#[derive(Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UrlFetcher for HttpFetcher {
    async fn open(&self, url: &str) -> StorageResult<ByteStream> {
        let start = std::time::Instant::now();

        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::error!(error = %e, url = %url, "Object fetch failed");
            StorageError::DownloadFailed(e.to_string())
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(StorageError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            tracing::error!(status = %status, url = %url, "Object store returned error status");
            return Err(StorageError::DownloadFailed(format!(
                "unexpected status {}",
                status
            )));
        }

        tracing::debug!(
            url = %url,
            content_length = ?response.content_length(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Object fetch started"
        );

        let url = url.to_string();
        let stream = response.bytes_stream().map(move |chunk| {
            chunk.map_err(|e| {
                tracing::error!(error = %e, url = %url, "Object stream interrupted");
                StorageError::DownloadFailed(e.to_string())
            })
        });

        Ok(Box::pin(stream))
    }
}
