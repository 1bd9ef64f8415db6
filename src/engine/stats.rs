// Run statistics — outcome counters and worker occupancy.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

#[derive(Debug, Clone)]
pub struct StatsSnapshot {
    pub cache_hits: u64,
    pub downloaded: u64,
    pub failed: u64,
    pub bytes_downloaded: u64,
    pub max_in_flight: u32,
}

pub struct StatsCollector {
    cache_hits: AtomicU64,
    downloaded: AtomicU64,
    failed: AtomicU64,
    bytes_downloaded: AtomicU64,
    active_workers: AtomicU32,
    max_in_flight: AtomicU32,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self {
            cache_hits: AtomicU64::new(0),
            downloaded: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            bytes_downloaded: AtomicU64::new(0),
            active_workers: AtomicU32::new(0),
            max_in_flight: AtomicU32::new(0),
        }
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_downloaded(&self, bytes: u64) {
        self.downloaded.fetch_add(1, Ordering::Relaxed);
        self.bytes_downloaded.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Track worker occupancy, keeping a high-water mark of concurrent units.
    pub fn increment_workers(&self) {
        let now = self.active_workers.fetch_add(1, Ordering::Relaxed) + 1;
        self.max_in_flight.fetch_max(now, Ordering::Relaxed);
    }

    pub fn decrement_workers(&self) {
        self.active_workers.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            downloaded: self.downloaded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            bytes_downloaded: self.bytes_downloaded.load(Ordering::Relaxed),
            max_in_flight: self.max_in_flight.load(Ordering::Relaxed),
        }
    }
}

impl Default for StatsCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_basic() {
        let stats = StatsCollector::new();
        stats.record_cache_hit();
        stats.record_downloaded(1000);
        stats.record_downloaded(500);
        stats.record_failed();

        stats.increment_workers();
        stats.increment_workers();
        stats.decrement_workers();
        stats.increment_workers();

        let snap = stats.snapshot();
        assert_eq!(snap.cache_hits, 1);
        assert_eq!(snap.downloaded, 2);
        assert_eq!(snap.failed, 1);
        assert_eq!(snap.bytes_downloaded, 1500);
        assert_eq!(snap.max_in_flight, 2);
    }
}
