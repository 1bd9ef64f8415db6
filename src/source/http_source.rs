// HTTP image source — one bounded GET per identifier against a fixed base URL.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::{debug, warn};

use super::traits::{FetchError, ImageSource};
use crate::roster::ImageId;

pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    /// Build a source with a shared client and a per-request timeout.
    pub fn new(base_url: String, request_timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(request_timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url_for(&self, id: &ImageId) -> String {
        format!("{}/{}", self.base_url, id)
    }
}

#[async_trait]
impl ImageSource for HttpSource {
    async fn fetch(&self, id: &ImageId) -> Result<Bytes, FetchError> {
        let url = self.url_for(id);
        debug!("http fetch url={}", url);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            warn!("http fetch failed id={} status={}", id, status.as_u16());
            return Err(FetchError::Status(status.as_u16()));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        debug!("http fetch ok id={} bytes={}", id, bytes.len());
        Ok(bytes)
    }
}
