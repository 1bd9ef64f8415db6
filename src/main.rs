// CLI entry — bootstrap, sweep the roster, regenerate the gallery manifest.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use gallery_fetcher::config::{EngineConfig, CONFIG_FILE, DEFAULT_ROSTER_FILE, MANIFEST_PATH};
use gallery_fetcher::engine::cache::ImageCache;
use gallery_fetcher::engine::coordinator::Coordinator;
use gallery_fetcher::engine::fetcher::Fetcher;
use gallery_fetcher::engine::stats::StatsCollector;
use gallery_fetcher::manifest;
use gallery_fetcher::roster;
use gallery_fetcher::source::http_source::HttpSource;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hyper=warn,reqwest=warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = EngineConfig::load(Path::new(CONFIG_FILE))?;
    info!(
        "gallery fetcher starting: base_url={} pool_size={} cache_dir={}",
        config.base_url, config.pool_size, config.cache_dir
    );

    let roster_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_ROSTER_FILE.to_string());
    let ids = roster::load_roster(Path::new(&roster_path));
    if ids.is_empty() {
        warn!("roster is empty, nothing to fetch");
    }

    let cache = Arc::new(ImageCache::open(Path::new(&config.cache_dir))?);
    let source = Arc::new(HttpSource::new(
        config.base_url.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )?);
    let stats = Arc::new(StatsCollector::new());
    let fetcher = Arc::new(Fetcher::new(source, Arc::clone(&cache), Arc::clone(&stats)));
    let coordinator = Coordinator::new(
        fetcher,
        Arc::clone(&stats),
        config.pool_size,
        Duration::from_millis(config.per_worker_delay_ms),
    );

    let outcomes = coordinator.run(ids).await;

    let snap = stats.snapshot();
    info!(
        "run complete: {} items, {} cached, {} downloaded ({} bytes), {} failed",
        outcomes.len(),
        snap.cache_hits,
        snap.downloaded,
        snap.bytes_downloaded,
        snap.failed
    );

    // Manifest trouble never fails the run; partial completion is reported
    // through logs only.
    if let Err(e) = manifest::rebuild(cache.dir(), Path::new(MANIFEST_PATH)) {
        warn!("gallery manifest rebuild failed: {}", e);
    }

    Ok(())
}
