use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::{error::SearchError, traits::Fetcher};

pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 15_000;
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTimeouts {
    pub connect: Duration,
    /// Time allowed after connecting, up to the last body byte.
    pub read:    Duration,
}

impl FetchTimeouts {
    /// Upper bound for a whole request: connecting plus reading.
    pub fn total(&self) -> Duration {
        self.connect + self.read
    }
}

impl Default for FetchTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS),
            read:    Duration::from_millis(DEFAULT_READ_TIMEOUT_MS),
        }
    }
}

/// Plain GET over reqwest.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeouts: FetchTimeouts) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeouts.connect)
            .timeout(timeouts.total())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, SearchError> {
        debug!("GET {url}");
        let resp = self.client.get(url).send().await.map_err(|e| {
            warn!("Request to {url} failed: {e}");
            SearchError::from(e)
        })?;
        let status = resp.status();
        if !status.is_success() {
            warn!("Request to {url} returned {status}");
            return Err(SearchError::HttpStatus(status.as_u16()));
        }
        let body = resp.text().await.map_err(|e| {
            warn!("Reading body of {url} failed: {e}");
            SearchError::from(e)
        })?;
        if body.trim().is_empty() {
            warn!("Request to {url} returned an empty body");
            return Err(SearchError::EmptyResponse);
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn total_covers_connect_and_read() {
        let timeouts = FetchTimeouts::default();
        assert_eq!(timeouts.total(), Duration::from_millis(25_000));
        assert!(timeouts.total() > timeouts.connect);
        assert!(timeouts.total() > timeouts.read);
    }
}
