//! Reference document fetching.
//!
//! [`DocumentFetcher`] is the seam between the resolver and the network.
//! [`HttpFetcher`] is the production implementation: one GET, a bounded
//! client timeout, a bounded body size, no retries.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::config::LookupConfig;
use crate::error::FetchError;

/// Something that can fetch a document body by URL.
pub trait DocumentFetcher {
    /// Fetch `url` and return the body text of a 2xx response.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

impl<T: DocumentFetcher + Sync> DocumentFetcher for &T {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send {
        (**self).fetch(url)
    }
}

/// Default cap on a fetched document body (2 MiB).
pub const DEFAULT_MAX_DOCUMENT_BYTES: usize = 2_097_152;

/// HTTP fetcher backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    max_bytes: usize,
}

impl HttpFetcher {
    /// Create a fetcher with the given timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] if the HTTP client cannot be built.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| FetchError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            max_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
        })
    }

    /// Set the largest body accepted, in bytes.
    pub const fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Create a fetcher from lookup configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] if the HTTP client cannot be built.
    pub fn from_config(config: &LookupConfig) -> Result<Self, FetchError> {
        let fetcher = Self::new(config.timeout(), &config.user_agent)?;
        Ok(fetcher.with_max_bytes(config.max_document_bytes))
    }
}

impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!(url = url, "fetching reference page");
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let limit = self.max_bytes;
        if response
            .content_length()
            .is_some_and(|len| usize::try_from(len).ok().is_none_or(|len| len > limit))
        {
            return Err(FetchError::TooLarge { limit });
        }

        // Content-Length may be absent or wrong; enforce the cap while reading.
        let mut body: Vec<u8> = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?
        {
            if chunk.len() > limit.saturating_sub(body.len()) {
                return Err(FetchError::TooLarge { limit });
            }
            body.extend_from_slice(&chunk);
        }

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
