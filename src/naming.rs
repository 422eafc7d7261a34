//! Asset namespace rules: prefixes, extensions, reserved names, derived
//! output naming, and delete-name validation.
//!
//! Every file the tool touches lives in one flat directory, so collisions
//! are avoided purely by convention:
//!
//! - Source assets are prefixed `favicon-` (`favicon-test-01.png`).
//! - Derived outputs append a size suffix (`favicon-test-01-16x16.png`).
//! - The generated page is always `favicon-tester.html`.
//!
//! The reserved-name check is an explicit predicate rather than a pattern
//! match so the exclusion set is testable and visible in one place.

use thiserror::Error;

/// File name prefix that marks a file as belonging to the asset namespace.
pub const ASSET_PREFIX: &str = "favicon-";

/// Name of the generated preview page.
pub const PAGE_FILENAME: &str = "favicon-tester.html";

/// Recognized source extensions, in the order used to locate a base name's
/// source file. `svg` is the only vector format.
pub const SOURCE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "svg"];

/// Pixel sizes of the derived outputs.
pub const TARGET_SIZES: &[u32] = &[16, 32];

/// Name fragments that mark a file as generated or otherwise off-limits
/// to the scanner.
const RESERVED_FRAGMENTS: &[&str] = &[
    "-16x16.",
    "-32x32.",
    "favicon-tester.",
    ".template.",
    "README",
    "run.sh",
];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NameError {
    #[error("invalid filename {0:?}: must start with \"{ASSET_PREFIX}\"")]
    MissingPrefix(String),
    #[error("invalid filename {0:?}: path traversal not allowed")]
    PathTraversal(String),
}

/// Derived output name for a base: `<base>-16x16.png`, `<base>-32x32.png`.
pub fn derived_name(base: &str, size: u32) -> String {
    format!("{base}-{size}x{size}.png")
}

/// True if `ext` (without dot) names a recognized source format.
pub fn is_source_extension(ext: &str) -> bool {
    SOURCE_EXTENSIONS
        .iter()
        .any(|e| ext.eq_ignore_ascii_case(e))
}

/// True if `ext` (without dot) names a vector format, used as-is at any size.
pub fn is_vector_extension(ext: &str) -> bool {
    ext.eq_ignore_ascii_case("svg")
}

/// True if `name` is generated output, the page itself, or another file the
/// scanner must never treat as a source asset.
pub fn is_reserved(name: &str) -> bool {
    RESERVED_FRAGMENTS.iter().any(|frag| name.contains(frag))
}

/// True if `name` is a derived output file (`*-16x16.png` / `*-32x32.png`).
pub fn is_derived_output(name: &str) -> bool {
    TARGET_SIZES
        .iter()
        .any(|size| name.ends_with(&format!("-{size}x{size}.png")))
}

/// Candidate name for the one-time rename normalization: `favicon-test-NN.ext`.
pub fn numbered_asset_name(n: u32, ext: &str) -> String {
    format!("favicon-test-{n:02}.{ext}")
}

/// Validate a user-supplied asset name for deletion.
///
/// The name must sit inside the asset namespace (`favicon-` prefix) and must
/// be a plain filename: no `..` segments, no path separators. Used by both
/// the CLI `--delete` path and the HTTP delete endpoint.
pub fn validate_asset_name(name: &str) -> Result<(), NameError> {
    if name.contains("..") || name.contains('/') || name.contains('\\') {
        return Err(NameError::PathTraversal(name.to_string()));
    }
    if !name.starts_with(ASSET_PREFIX) {
        return Err(NameError::MissingPrefix(name.to_string()));
    }
    Ok(())
}
