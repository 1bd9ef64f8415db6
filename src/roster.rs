// Image roster — validated identifiers read from a newline-delimited file.

use std::fmt;
use std::path::Path;

use anyhow::{anyhow, Result};
use tracing::warn;

/// Built-in roster used when the identifier file is missing.
const FALLBACK_IDS: &[&str] = &[
    "10000.jpg",
    "10000000.jpg",
    "10000001.jpg",
    "10000002.jpg",
    "10000010.jpg",
    "100000101.jpg",
    "10000011.jpg",
    "10000012.jpg",
    "10000020.jpg",
    "10000021.jpg",
];

/// Validated image identifier. Doubles as the cache filename and as the
/// path suffix appended to the source base URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageId(String);

impl ImageId {
    /// Parse a raw token. Rejects empty tokens and anything that could
    /// escape the cache directory.
    pub fn parse(raw: &str) -> Result<Self> {
        let token = raw.trim();
        if token.is_empty() {
            return Err(anyhow!("identifier is empty"));
        }
        if token.starts_with('.') {
            return Err(anyhow!("identifier {:?} starts with '.'", token));
        }
        if token.contains('/') || token.contains('\\') || token.contains("..") {
            return Err(anyhow!("identifier {:?} contains path segments", token));
        }
        Ok(Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read the roster from `path`. Blank lines are skipped and invalid lines
/// are dropped with a warning. A missing or unreadable file falls back to
/// the built-in default roster instead of failing the run.
pub fn load_roster(path: &Path) -> Vec<ImageId> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(
                "roster file {} not readable ({}), using built-in defaults",
                path.display(),
                e
            );
            return FALLBACK_IDS.iter().map(|s| ImageId(s.to_string())).collect();
        }
    };
    parse_roster(&raw)
}

fn parse_roster(raw: &str) -> Vec<ImageId> {
    let mut ids = Vec::new();
    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match ImageId::parse(line) {
            Ok(id) => ids.push(id),
            Err(e) => warn!("skipping invalid identifier: {}", e),
        }
    }
    ids
}
