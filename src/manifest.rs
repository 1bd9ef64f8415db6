// Gallery manifest — regenerated from the cache directory on every run.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

/// Rebuild the gallery manifest from the `.jpg` files currently in
/// `images_dir`. The file is regenerated from scratch, so rerunning never
/// duplicates entries. Returns the number of images registered.
pub fn rebuild(images_dir: &Path, manifest_path: &Path) -> Result<usize> {
    let entries = fs::read_dir(images_dir)
        .with_context(|| format!("read images directory {}", images_dir.display()))?;

    let mut names: Vec<String> = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable directory entry: {}", e);
                continue;
            }
        };
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(".jpg") {
            names.push(name);
        }
    }
    names.sort();

    // The gallery page resolves image paths relative to the manifest, one
    // directory up from it.
    let dir_name = images_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "images".to_string());

    let mut body = String::from("export const galleryItems = [];\n");
    for name in &names {
        let stem = name.strip_suffix(".jpg").unwrap_or(name);
        body.push_str(&format!("// {}\n", stem));
        body.push_str(&format!(
            "galleryItems.push({{ src: '../{}/{}' }});\n",
            dir_name, name
        ));
    }

    if let Some(parent) = manifest_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create manifest directory {}", parent.display()))?;
        }
    }

    // Same part-then-rename discipline as the cache: never leave a
    // half-written manifest at the final path.
    let file_name = manifest_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("images.js");
    let tmp = manifest_path.with_file_name(format!("{}.part", file_name));
    {
        let mut f = fs::File::create(&tmp)
            .with_context(|| format!("create {}", tmp.display()))?;
        f.write_all(body.as_bytes())?;
        f.sync_all()?;
    }
    fs::rename(&tmp, manifest_path)
        .with_context(|| format!("rename {} into place", tmp.display()))?;

    info!(
        "gallery manifest {} rebuilt with {} entries",
        manifest_path.display(),
        names.len()
    );
    Ok(names.len())
}
