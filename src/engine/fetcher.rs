// Single-identifier fetch — cache probe first, then one bounded network attempt.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::cache::ImageCache;
use super::outcome::FetchOutcome;
use super::stats::StatsCollector;
use crate::roster::ImageId;
use crate::source::traits::{FetchError, ImageSource};

pub struct Fetcher {
    source: Arc<dyn ImageSource>,
    cache: Arc<ImageCache>,
    stats: Arc<StatsCollector>,
}

impl Fetcher {
    pub fn new(
        source: Arc<dyn ImageSource>,
        cache: Arc<ImageCache>,
        stats: Arc<StatsCollector>,
    ) -> Self {
        Self {
            source,
            cache,
            stats,
        }
    }

    /// Resolve one identifier to a terminal outcome. Every fault is converted
    /// to an outcome here; nothing propagates past this boundary, so sibling
    /// fetches are never affected.
    pub async fn fetch(&self, id: &ImageId) -> FetchOutcome {
        if self.cache.contains(id) {
            debug!(
                "image {} found locally at {}",
                id,
                self.cache.path_for(id).display()
            );
            self.stats.record_cache_hit();
            return FetchOutcome::CacheHit;
        }

        info!("image {} not found locally, downloading", id);
        match self.source.fetch(id).await {
            Ok(bytes) => {
                let len = bytes.len() as u64;
                match self.cache.store(id, &bytes) {
                    Ok(()) => {
                        info!(
                            "image {} downloaded and saved to {}",
                            id,
                            self.cache.path_for(id).display()
                        );
                        self.stats.record_downloaded(len);
                        FetchOutcome::Downloaded
                    }
                    Err(e) => {
                        warn!("image {} could not be persisted: {}", id, e);
                        self.stats.record_failed();
                        FetchOutcome::Failed(FetchError::Storage(e.to_string()))
                    }
                }
            }
            Err(e) => {
                warn!("image {} download failed: {}", id, e);
                self.stats.record_failed();
                FetchOutcome::Failed(e)
            }
        }
    }
}
