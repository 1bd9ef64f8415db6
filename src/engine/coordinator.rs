// Fetch coordination — fixed worker pool, per-worker pacing, ordered outcomes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::fetcher::Fetcher;
use super::outcome::FetchOutcome;
use super::stats::StatsCollector;
use crate::roster::ImageId;
use crate::source::traits::FetchError;

pub struct Coordinator {
    fetcher: Arc<Fetcher>,
    stats: Arc<StatsCollector>,
    pool_size: usize,
    per_worker_delay: Duration,
}

impl Coordinator {
    pub fn new(
        fetcher: Arc<Fetcher>,
        stats: Arc<StatsCollector>,
        pool_size: usize,
        per_worker_delay: Duration,
    ) -> Self {
        Self {
            fetcher,
            stats,
            pool_size: pool_size.max(1),
            per_worker_delay,
        }
    }

    /// Sweep every identifier to a terminal outcome. The returned vector is
    /// aligned with the input order; completion order across workers is not.
    ///
    /// At most `pool_size` units are in flight at any instant, and each
    /// worker pauses `per_worker_delay` between consecutive units to keep
    /// the aggregate request rate under the soft ceiling. A failed item
    /// never cancels or blocks any other item.
    pub async fn run(&self, ids: Vec<ImageId>) -> Vec<FetchOutcome> {
        let total = ids.len();
        if total == 0 {
            return Vec::new();
        }

        let ids = Arc::new(ids);
        let next = Arc::new(AtomicUsize::new(0));
        let slots: Arc<Mutex<Vec<Option<FetchOutcome>>>> =
            Arc::new(Mutex::new(vec![None; total]));

        let workers = self.pool_size.min(total);
        let mut handles = Vec::with_capacity(workers);
        for worker in 0..workers {
            let ids = Arc::clone(&ids);
            let next = Arc::clone(&next);
            let slots = Arc::clone(&slots);
            let fetcher = Arc::clone(&self.fetcher);
            let stats = Arc::clone(&self.stats);
            let delay = self.per_worker_delay;

            handles.push(tokio::spawn(async move {
                let mut first = true;
                loop {
                    let index = next.fetch_add(1, Ordering::Relaxed);
                    if index >= ids.len() {
                        break;
                    }

                    // Pace this worker between consecutive units of work.
                    if !first && !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    first = false;

                    stats.increment_workers();
                    let outcome = fetcher.fetch(&ids[index]).await;
                    stats.decrement_workers();

                    debug!("worker {} finished {} -> {:?}", worker, ids[index], outcome);
                    slots.lock()[index] = Some(outcome);
                }
            }));
        }

        for handle in handles {
            if let Err(e) = handle.await {
                warn!("fetch worker terminated abnormally: {}", e);
            }
        }

        let mut slots = slots.lock();
        slots
            .iter_mut()
            .map(|slot| {
                slot.take().unwrap_or_else(|| {
                    // A worker died after claiming this index; report the item
                    // failed rather than aborting the run.
                    FetchOutcome::Failed(FetchError::Transport(
                        "worker aborted before completing this item".to_string(),
                    ))
                })
            })
            .collect()
    }
}
