// On-disk image cache — one file per identifier, existence is the hit signal.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::roster::ImageId;

pub struct ImageCache {
    dir: PathBuf,
}

impl ImageCache {
    /// Open the cache rooted at `dir`, creating the directory if needed.
    /// Idempotent: an existing directory is left untouched.
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("create cache directory {}", dir.display()))?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// Whether an artifact for `id` already exists. No side effects.
    pub fn contains(&self, id: &ImageId) -> bool {
        self.path_for(id).exists()
    }

    /// Final artifact path for `id`.
    pub fn path_for(&self, id: &ImageId) -> PathBuf {
        self.dir.join(id.as_str())
    }

    /// Persist `data` for `id`. The body goes to a `.part` sibling first and
    /// is renamed into place, so a partial write is never observable at the
    /// final path and racing writers of one identifier cannot interleave.
    pub fn store(&self, id: &ImageId, data: &[u8]) -> Result<()> {
        let path = self.path_for(id);
        let tmp = self.dir.join(format!("{}.part", id.as_str()));
        {
            let mut f = fs::File::create(&tmp)
                .with_context(|| format!("create {}", tmp.display()))?;
            f.write_all(data)?;
            f.sync_all()?;
        }
        fs::rename(&tmp, &path)
            .with_context(|| format!("rename {} into place", tmp.display()))?;
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
