//! HTTP utilities for downloading bundler tools.
//!
//! Downloads go through the [`Downloader`] trait so that callers can be
//! exercised without network access.

use crate::bundler::error::{Context, Error, ErrorExt, Result};
use std::{future::Future, path::Path};
use tokio::io::AsyncWriteExt;

/// Fetches a URL into a local file.
pub trait Downloader: Send + Sync {
    /// Streams the body of `url` into `dest`, creating or truncating it.
    ///
    /// Returns the number of bytes written. Connection failures, non-2xx
    /// responses and bodies shorter than the advertised length are errors;
    /// `dest` may hold partial content afterwards.
    fn download(&self, url: &str, dest: &Path) -> impl Future<Output = Result<u64>> + Send;
}

/// [`Downloader`] backed by reqwest.
///
/// No timeout is applied: a stalled server stalls the download.
#[derive(Debug, Clone)]
pub struct HttpDownloader {
    client: reqwest::Client,
}

impl HttpDownloader {
    /// Creates a downloader with the crate's user agent.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to create HTTP client")?;
        Ok(Self::with_client(client))
    }

    /// Creates a downloader using an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Downloader for HttpDownloader {
    async fn download(&self, url: &str, dest: &Path) -> Result<u64> {
        log::info!("Downloading {}", url);

        let failed = |reason: String| Error::Download {
            url: url.to_string(),
            reason,
        };

        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(failed(format!("server responded with {status}")));
        }

        let expected_len = response.content_length();
        log::debug!("Content-Length: {:?}", expected_len);

        let mut file = tokio::fs::File::create(dest)
            .await
            .fs_context("creating download file", dest)?;

        let mut written: u64 = 0;
        while let Some(chunk) = response.chunk().await.map_err(|e| failed(e.to_string()))? {
            file.write_all(&chunk)
                .await
                .fs_context("writing download", dest)?;
            written += chunk.len() as u64;
        }

        file.flush().await.fs_context("flushing download", dest)?;
        file.sync_all().await.fs_context("syncing download", dest)?;

        if let Some(expected) = expected_len {
            if written != expected {
                return Err(failed(format!(
                    "truncated transfer: received {written} of {expected} bytes"
                )));
            }
        }

        log::debug!("Downloaded {} bytes to {}", written, dest.display());
        Ok(written)
    }
}
