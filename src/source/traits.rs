use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::roster::ImageId;

/// Failure classification for a single fetch attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The remote answered, but not with a success status. Nothing is persisted.
    #[error("HTTP {0}")]
    Status(u16),
    /// Timeout, connect, DNS, or body-read fault. Nothing is persisted.
    #[error("transport: {0}")]
    Transport(String),
    /// The body arrived but could not be written to the cache.
    #[error("storage: {0}")]
    Storage(String),
}

#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Fetch the body for one identifier. Exactly one attempt, no retries.
    async fn fetch(&self, id: &ImageId) -> Result<Bytes, FetchError>;
}
