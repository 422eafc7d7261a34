//! Candidate discovery and filename normalization.
//!
//! The scanner operates on one flat base directory — subdirectories are
//! never entered. Discovery is a two-pass affair:
//!
//! 1. **Collect**: list regular files with a recognized source extension,
//!    excluding reserved names (derived outputs, the generated page,
//!    templates). The list is sorted lexicographically by filename and
//!    deduplicated, which makes discovery order an explicit rule rather
//!    than an accident of directory enumeration.
//! 2. **Normalize**: any candidate whose name is outside the `favicon-`
//!    namespace is renamed to the first free `favicon-test-NN.<ext>` slot.
//!    Running the scan again is a no-op — normalization is idempotent.
//!
//! After normalization the directory is collected again; the final sorted
//! list becomes the asset list consumed by the regenerator and the page
//! builder. The first entry of that list is the "first asset" used for the
//! page's icon links.

use crate::naming;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("candidate has no usable filename: {0}")]
    UnusableName(PathBuf),
}

/// One discovered source asset, post-normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// Canonical base name: filename without its extension.
    pub base: String,
    /// Full filename including extension.
    pub file_name: String,
    /// Vector sources (SVG) are used as-is and never resized.
    pub is_vector: bool,
}

impl Asset {
    /// Derived output name at the given pixel size.
    pub fn derived_name(&self, size: u32) -> String {
        naming::derived_name(&self.base, size)
    }
}

/// Discover all source assets in `dir`, normalizing stray filenames into
/// the asset namespace first.
pub fn scan(dir: &Path) -> Result<Vec<Asset>, ScanError> {
    let candidates = collect_sources(dir)?;
    normalize_names(dir, &candidates)?;
    let sources = collect_sources(dir)?;

    let mut assets = Vec::with_capacity(sources.len());
    for path in sources {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ScanError::UnusableName(path.clone()))?
            .to_string();
        let base = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ScanError::UnusableName(path.clone()))?
            .to_string();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        assets.push(Asset {
            base,
            file_name,
            is_vector: naming::is_vector_extension(ext),
        });
    }
    Ok(assets)
}

/// List candidate source files in `dir`: regular files with a recognized
/// extension whose names are not reserved. Sorted and deduplicated.
pub fn collect_sources(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut sources = BTreeSet::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type()?.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        if naming::is_source_extension(ext) && !naming::is_reserved(name) {
            sources.insert(path);
        }
    }
    Ok(sources.into_iter().collect())
}

/// Rename candidates outside the `favicon-` namespace to the first free
/// `favicon-test-NN.<ext>` slot. One-time, idempotent normalization.
fn normalize_names(dir: &Path, candidates: &[PathBuf]) -> Result<(), ScanError> {
    for path in candidates {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with(naming::ASSET_PREFIX) {
            continue;
        }
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase();
        let mut n = 1;
        while slot_taken(dir, n) {
            n += 1;
        }
        fs::rename(path, dir.join(naming::numbered_asset_name(n, &ext)))?;
    }
    Ok(())
}

/// A numbered slot is taken if any source file claims its base name,
/// whatever the extension. Base names stay unique across formats.
fn slot_taken(dir: &Path, n: u32) -> bool {
    naming::SOURCE_EXTENSIONS
        .iter()
        .any(|ext| dir.join(naming::numbered_asset_name(n, ext)).exists())
}
