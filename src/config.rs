use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

/// Roster file read when no path is given on the command line.
pub const DEFAULT_ROSTER_FILE: &str = "image_ids.txt";

/// Optional JSON configuration file consulted at startup.
pub const CONFIG_FILE: &str = "gallery.json";

/// Gallery manifest regenerated after every run.
pub const MANIFEST_PATH: &str = "www/js/images.js";

/// Top-level configuration for the fetch engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Base URL the image identifier is appended to.
    pub base_url: String,
    /// Number of concurrent fetch workers.
    pub pool_size: usize,
    /// Pause between two units of work on the same worker, in milliseconds.
    pub per_worker_delay_ms: u64,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Directory holding cached images.
    pub cache_dir: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: "https://images.ygoprodeck.com/images/cards".to_string(),
            pool_size: 4,
            per_worker_delay_ms: 100,
            request_timeout_secs: 10,
            cache_dir: "./images".to_string(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from `path`. A missing file yields the defaults;
    /// fields absent from the file fall back to their field defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}
