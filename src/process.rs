//! Regeneration of derived outputs from source assets.
//!
//! For every scanned asset the regenerator decides, per target size
//! independently, whether a resize is due:
//!
//! ```text
//! resize when  force
//!           or output missing
//!           or (check mode and source mtime > output mtime)
//! ```
//!
//! Vector sources are never resized — the browser scales SVG to any size,
//! so the page references them directly. The default mode (no flags) only
//! fills in missing outputs; `--check` adds the staleness comparison;
//! `--force` regenerates unconditionally.
//!
//! Events are collected rather than printed so the console formatting
//! stays in [`output`](crate::output) and tests can assert on decisions
//! without capturing stdout.

use crate::imaging::{BackendError, ResizeBackend, ResizeParams};
use crate::naming;
use crate::scan::{self, Asset, ScanError};
use std::fs;
use std::path::Path;
use std::time::SystemTime;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),
    #[error("image processing failed: {0}")]
    Imaging(#[from] BackendError),
}

/// Regeneration mode, straight from the CLI flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegenOptions {
    /// Also regenerate outputs older than their source.
    pub check: bool,
    /// Regenerate everything regardless of timestamps.
    pub force: bool,
}

/// What happened to one derived output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegenEvent {
    /// Output was (re)written by the resize backend.
    Resized { output: String },
    /// Output already existed and was considered fresh.
    Fresh { output: String },
    /// Vector source, used as-is at any size.
    Vector { file_name: String },
}

/// Result of one regeneration pass.
#[derive(Debug)]
pub struct RegenReport {
    /// Assets in discovery order (lexicographic by final filename).
    pub assets: Vec<Asset>,
    pub events: Vec<RegenEvent>,
}

/// Scan `dir` and bring every derived output up to date.
pub fn regenerate(
    dir: &Path,
    backend: &dyn ResizeBackend,
    opts: RegenOptions,
) -> Result<RegenReport, ProcessError> {
    let assets = scan::scan(dir)?;
    let mut events = Vec::new();

    for asset in &assets {
        if asset.is_vector {
            events.push(RegenEvent::Vector {
                file_name: asset.file_name.clone(),
            });
            continue;
        }

        let source = dir.join(&asset.file_name);
        let source_mtime = fs::metadata(&source)?.modified()?;

        for &size in naming::TARGET_SIZES {
            let output_name = asset.derived_name(size);
            let output = dir.join(&output_name);
            let output_mtime = match fs::metadata(&output) {
                Ok(meta) => Some(meta.modified()?),
                Err(_) => None,
            };

            if needs_resize(opts, source_mtime, output_mtime) {
                backend.resize(&ResizeParams {
                    source: source.clone(),
                    output,
                    width: size,
                    height: size,
                })?;
                events.push(RegenEvent::Resized {
                    output: output_name,
                });
            } else {
                events.push(RegenEvent::Fresh {
                    output: output_name,
                });
            }
        }
    }

    Ok(RegenReport { assets, events })
}

/// Per-output resize decision. Pure so the flag matrix is unit-testable.
fn needs_resize(
    opts: RegenOptions,
    source_mtime: SystemTime,
    output_mtime: Option<SystemTime>,
) -> bool {
    if opts.force {
        return true;
    }
    match output_mtime {
        None => true,
        Some(out) => opts.check && source_mtime > out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::MockBackend;
    use std::time::Duration;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"x").unwrap();
    }

    fn set_mtime(path: &Path, time: SystemTime) {
        let file = fs::OpenOptions::new().write(true).open(path).unwrap();
        file.set_modified(time).unwrap();
    }

    #[test]
    fn needs_resize_flag_matrix() {
        let earlier = SystemTime::UNIX_EPOCH;
        let later = earlier + Duration::from_secs(60);
        let default = RegenOptions::default();
        let check = RegenOptions {
            check: true,
            ..Default::default()
        };
        let force = RegenOptions {
            force: true,
            ..Default::default()
        };

        // Missing output always resizes.
        assert!(needs_resize(default, earlier, None));
        // Existing output is left alone by default, even when stale.
        assert!(!needs_resize(default, later, Some(earlier)));
        // Check mode resizes stale, skips fresh.
        assert!(needs_resize(check, later, Some(earlier)));
        assert!(!needs_resize(check, earlier, Some(later)));
        // Force ignores timestamps entirely.
        assert!(needs_resize(force, earlier, Some(later)));
    }

    #[test]
    fn missing_outputs_are_resized_at_both_sizes() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "favicon-test-01.png");

        let backend = MockBackend::new();
        let report = regenerate(tmp.path(), &backend, RegenOptions::default()).unwrap();

        let ops = backend.recorded();
        assert_eq!(ops.len(), 2);
        assert_eq!((ops[0].width, ops[0].height), (16, 16));
        assert_eq!((ops[1].width, ops[1].height), (32, 32));
        assert_eq!(
            report.events,
            vec![
                RegenEvent::Resized {
                    output: "favicon-test-01-16x16.png".into()
                },
                RegenEvent::Resized {
                    output: "favicon-test-01-32x32.png".into()
                },
            ]
        );
    }

    #[test]
    fn existing_outputs_skipped_by_default() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "favicon-test-01.png");
        touch(tmp.path(), "favicon-test-01-16x16.png");
        touch(tmp.path(), "favicon-test-01-32x32.png");

        let backend = MockBackend::new();
        let report = regenerate(tmp.path(), &backend, RegenOptions::default()).unwrap();

        assert!(backend.recorded().is_empty());
        assert!(
            report
                .events
                .iter()
                .all(|e| matches!(e, RegenEvent::Fresh { .. }))
        );
    }

    #[test]
    fn check_mode_resizes_stale_only() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "favicon-test-01.png");
        touch(tmp.path(), "favicon-test-01-16x16.png");
        touch(tmp.path(), "favicon-test-01-32x32.png");

        let old = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000);
        let new = old + Duration::from_secs(1_000);
        set_mtime(&tmp.path().join("favicon-test-01.png"), new);
        set_mtime(&tmp.path().join("favicon-test-01-16x16.png"), old);
        set_mtime(&tmp.path().join("favicon-test-01-32x32.png"), new);

        let backend = MockBackend::new();
        let report = regenerate(
            tmp.path(),
            &backend,
            RegenOptions {
                check: true,
                force: false,
            },
        )
        .unwrap();

        let ops = backend.recorded();
        assert_eq!(ops.len(), 1);
        assert!(ops[0].output.ends_with("favicon-test-01-16x16.png"));
        assert_eq!(
            report.events,
            vec![
                RegenEvent::Resized {
                    output: "favicon-test-01-16x16.png".into()
                },
                RegenEvent::Fresh {
                    output: "favicon-test-01-32x32.png".into()
                },
            ]
        );
    }

    #[test]
    fn force_resizes_fresh_outputs() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "favicon-test-01.png");
        touch(tmp.path(), "favicon-test-01-16x16.png");
        touch(tmp.path(), "favicon-test-01-32x32.png");

        let backend = MockBackend::new();
        regenerate(
            tmp.path(),
            &backend,
            RegenOptions {
                check: false,
                force: true,
            },
        )
        .unwrap();

        assert_eq!(backend.recorded().len(), 2);
    }

    #[test]
    fn vector_sources_are_never_resized() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "favicon-logo.svg");

        let backend = MockBackend::new();
        let report = regenerate(tmp.path(), &backend, RegenOptions::default()).unwrap();

        assert!(backend.recorded().is_empty());
        assert_eq!(
            report.events,
            vec![RegenEvent::Vector {
                file_name: "favicon-logo.svg".into()
            }]
        );
    }

    #[test]
    fn assets_reported_in_lexicographic_order() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "favicon-zz.png");
        touch(tmp.path(), "favicon-aa.png");

        let backend = MockBackend::new();
        let report = regenerate(tmp.path(), &backend, RegenOptions::default()).unwrap();

        let bases: Vec<_> = report.assets.iter().map(|a| a.base.as_str()).collect();
        assert_eq!(bases, vec!["favicon-aa", "favicon-zz"]);
    }
}
