//! # Favicon Tester
//!
//! A local utility for trying out favicon candidates. Drop images into a
//! directory, run the tool, and open the generated `favicon-tester.html`
//! to see every candidate at tab size — or run with `--serve` so the
//! page's Delete buttons remove files from disk.
//!
//! # Architecture: Scan → Regenerate → Render
//!
//! The filesystem is the sole source of truth. Every run re-derives the
//! full picture from disk:
//!
//! ```text
//! 1. Scan        directory  →  asset list    (normalize names, sort)
//! 2. Regenerate  asset list →  -16x16/-32x32 PNGs   (mtime freshness)
//! 3. Render      asset list →  favicon-tester.html  (full rewrite)
//! ```
//!
//! There is no manifest and no partial patching: the page is always
//! regenerable from current disk contents, so a transiently inconsistent
//! state (files changed mid-run) is fixed by simply running again.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`naming`] | Asset namespace rules: prefixes, reserved names, derived output names, delete validation |
//! | [`scan`] | Candidate discovery and one-time filename normalization |
//! | [`imaging`] | Resize capability: library backend, ImageMagick fallback, startup probing |
//! | [`process`] | Per-size regeneration decisions (missing / stale / forced) |
//! | [`generate`] | Maud-rendered preview page with embedded CSS and client script |
//! | [`mutate`] | Asset deletion and bulk cleanup |
//! | [`serve`] | Synchronous tiny_http server with the delete endpoint |
//! | [`output`] | Console formatting for all operations |
//!
//! # Design Decisions
//!
//! ## Explicit base directory
//!
//! Every operation takes the base directory as a parameter (`--dir` on
//! the CLI, default `.`). The process working directory is never changed,
//! so library callers and tests can run against isolated directories.
//!
//! ## Deterministic discovery order
//!
//! Candidates are sorted lexicographically by final filename. The first
//! asset in that order supplies the page's `<link rel="icon">` tags, so
//! "which icon is the tab icon" is a documented rule, not an accident of
//! directory enumeration.
//!
//! ## Nearest-neighbor only
//!
//! Favicons are judged at 16×16 where resampling filters smear pixel
//! detail. Both backends scale without smoothing and keep the alpha
//! channel intact.

pub mod generate;
pub mod imaging;
pub mod mutate;
pub mod naming;
pub mod output;
pub mod process;
pub mod scan;
pub mod serve;
