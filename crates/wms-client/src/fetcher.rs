//! HTTP transport used to reach the WMS endpoint.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::debug;

use wms_common::{WmsError, WmsResult};

/// Performs a GET and returns the response body.
///
/// Implementations must map non-success HTTP statuses to
/// [`WmsError::HttpStatus`] and timeouts to [`WmsError::Timeout`].
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn get(&self, url: &str) -> WmsResult<Bytes>;
}

/// reqwest-backed [`Fetcher`] with bounded request time.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(request_timeout: Duration, connect_timeout: Duration) -> WmsResult<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| WmsError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, url: &str) -> WmsResult<Bytes> {
        debug!(url = %url, "GET");
        let response = self.client.get(url).send().await.map_err(from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(WmsError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await.map_err(from_reqwest)?;
        debug!(url = %url, bytes = body.len(), "Response received");
        Ok(body)
    }
}

fn from_reqwest(err: reqwest::Error) -> WmsError {
    if err.is_timeout() {
        WmsError::Timeout
    } else {
        WmsError::Transport(err.to_string())
    }
}
