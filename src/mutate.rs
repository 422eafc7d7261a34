//! Disk mutation: asset deletion and bulk cleanup.
//!
//! Three operations, all scoped to one base directory:
//!
//! - [`delete_asset`]: remove one source asset and its derived outputs.
//!   The name is validated against the asset namespace before any
//!   filesystem access; a missing primary file is a no-op, not an error.
//! - [`clean`]: remove derived outputs only, keeping sources.
//! - [`clean_all`]: remove everything in the asset namespace plus the
//!   generated page, leaving an empty slate.
//!
//! Deleting a source implies deleting its derived outputs — the scanner
//! would otherwise keep finding `-16x16.png` orphans and the page would
//! reference a source that no longer exists.

use crate::naming::{self, NameError};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MutateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Name(#[from] NameError),
}

/// Result of [`delete_asset`].
#[derive(Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Primary file removed, along with any derived outputs listed here.
    Deleted { removed: Vec<String> },
    /// Name was valid but the primary file does not exist.
    Missing,
}

/// Delete `name` and its derived outputs from `dir`.
///
/// The name must pass [`naming::validate_asset_name`]; validation happens
/// before the existence check so traversal attempts are always rejected.
pub fn delete_asset(dir: &Path, name: &str) -> Result<DeleteOutcome, MutateError> {
    naming::validate_asset_name(name)?;

    let path = dir.join(name);
    if !path.is_file() {
        return Ok(DeleteOutcome::Missing);
    }
    fs::remove_file(&path)?;
    let mut removed = vec![name.to_string()];

    if let Some(stem) = Path::new(name).file_stem().and_then(|s| s.to_str()) {
        for &size in naming::TARGET_SIZES {
            let derived = naming::derived_name(stem, size);
            let derived_path = dir.join(&derived);
            if derived_path.is_file() {
                fs::remove_file(&derived_path)?;
                removed.push(derived);
            }
        }
    }
    Ok(DeleteOutcome::Deleted { removed })
}

/// Remove all derived outputs (`*-16x16.png` / `*-32x32.png`) from `dir`.
/// Returns the removed names, sorted.
pub fn clean(dir: &Path) -> Result<Vec<String>, MutateError> {
    remove_matching(dir, |name| naming::is_derived_output(name))
}

/// Remove every file in the asset namespace, all derived outputs, and the
/// generated page. Returns the removed names, sorted.
pub fn clean_all(dir: &Path) -> Result<Vec<String>, MutateError> {
    remove_matching(dir, |name| {
        if naming::is_derived_output(name) || name == naming::PAGE_FILENAME {
            return true;
        }
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        name.starts_with(naming::ASSET_PREFIX) && naming::is_source_extension(ext)
    })
}

fn remove_matching(
    dir: &Path,
    matches: impl Fn(&str) -> bool,
) -> Result<Vec<String>, MutateError> {
    let mut removed = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if matches(&name) {
            fs::remove_file(entry.path())?;
            removed.push(name);
        }
    }
    removed.sort();
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"x").unwrap();
    }

    fn remaining(dir: &Path) -> Vec<String> {
        let mut v: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        v.sort();
        v
    }

    #[test]
    fn delete_removes_source_and_both_outputs() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "favicon-test-01.png");
        touch(tmp.path(), "favicon-test-01-16x16.png");
        touch(tmp.path(), "favicon-test-01-32x32.png");
        touch(tmp.path(), "favicon-test-02.png");

        let outcome = delete_asset(tmp.path(), "favicon-test-01.png").unwrap();
        assert_eq!(
            outcome,
            DeleteOutcome::Deleted {
                removed: vec![
                    "favicon-test-01.png".into(),
                    "favicon-test-01-16x16.png".into(),
                    "favicon-test-01-32x32.png".into(),
                ]
            }
        );
        assert_eq!(remaining(tmp.path()), vec!["favicon-test-02.png"]);
    }

    #[test]
    fn delete_without_outputs_removes_primary_only() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "favicon-logo.svg");

        let outcome = delete_asset(tmp.path(), "favicon-logo.svg").unwrap();
        assert_eq!(
            outcome,
            DeleteOutcome::Deleted {
                removed: vec!["favicon-logo.svg".into()]
            }
        );
    }

    #[test]
    fn delete_missing_primary_is_noop() {
        let tmp = TempDir::new().unwrap();
        let outcome = delete_asset(tmp.path(), "favicon-test-99.png").unwrap();
        assert_eq!(outcome, DeleteOutcome::Missing);
    }

    #[test]
    fn delete_rejects_foreign_prefix() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "logo.png");

        let err = delete_asset(tmp.path(), "logo.png").unwrap_err();
        assert!(matches!(err, MutateError::Name(NameError::MissingPrefix(_))));
        assert_eq!(remaining(tmp.path()), vec!["logo.png"]);
    }

    #[test]
    fn delete_rejects_traversal_before_existence_check() {
        let tmp = TempDir::new().unwrap();
        let err = delete_asset(tmp.path(), "favicon-../../x.png").unwrap_err();
        assert!(matches!(err, MutateError::Name(NameError::PathTraversal(_))));
    }

    #[test]
    fn clean_removes_outputs_keeps_sources() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "favicon-test-01.png");
        touch(tmp.path(), "favicon-test-01-16x16.png");
        touch(tmp.path(), "favicon-test-01-32x32.png");
        touch(tmp.path(), "favicon-tester.html");

        let removed = clean(tmp.path()).unwrap();
        assert_eq!(
            removed,
            vec![
                "favicon-test-01-16x16.png".to_string(),
                "favicon-test-01-32x32.png".to_string(),
            ]
        );
        assert_eq!(
            remaining(tmp.path()),
            vec!["favicon-test-01.png", "favicon-tester.html"]
        );
    }

    #[test]
    fn clean_all_empties_the_namespace() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "favicon-test-01.png");
        touch(tmp.path(), "favicon-test-01-16x16.png");
        touch(tmp.path(), "favicon-test-01-32x32.png");
        touch(tmp.path(), "favicon-logo.svg");
        touch(tmp.path(), "favicon-tester.html");
        touch(tmp.path(), "unrelated.txt");

        clean_all(tmp.path()).unwrap();
        assert_eq!(remaining(tmp.path()), vec!["unrelated.txt"]);
    }
}
