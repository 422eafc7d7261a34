//! Preview page generation.
//!
//! Renders `favicon-tester.html` from the scanned asset list. The page is
//! fully rewritten on every run and never patched in place — disk state is
//! authoritative, the page is derived.
//!
//! ## Page anatomy
//!
//! - **Icon links**: `<link rel="icon">` tags in the head point at the
//!   first discovered asset's derived outputs (or at the SVG itself for a
//!   vector first asset). With no assets, a bare `favicon.ico` link keeps
//!   the markup valid.
//! - **Asset rows**: one row per asset with previews at 16/32/48/64 and
//!   actions (use as tab, delete, per-size download).
//! - **Actual size**: literal 16×16 preview of the first asset plus an
//!   8× zoom, so the tab rendering can be judged at real scale.
//! - **Ad hoc row**: a file input that previews an image via canvas
//!   without writing anything to disk.
//!
//! Server-rendered `src` attributes only ever point at files that exist
//! once regeneration completes; all dynamic scaling and cache busting is
//! the embedded script's job.
//!
//! HTML is generated with [maud](https://maud.lambda.xyz/) — compile-time
//! checked templates with auto-escaped interpolation. The stylesheet and
//! client script are embedded at compile time from `static/`.

use crate::naming;
use crate::scan::Asset;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const CSS: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/tester.js");

/// Render the page and write it to `<dir>/favicon-tester.html`.
///
/// `serve` injects the flag that switches the Delete buttons from
/// copy-a-command mode to POSTing against the local server.
pub fn generate(dir: &Path, assets: &[Asset], serve: bool) -> Result<PathBuf, GenerateError> {
    let page = render_page(assets, serve);
    let path = dir.join(naming::PAGE_FILENAME);
    fs::write(&path, page.into_string())?;
    Ok(path)
}

/// Icon link target derived from the first discovered asset.
enum FirstIcon {
    /// No assets on disk; fall back to a conventional favicon.ico link.
    Fallback,
    /// Vector first asset, linked directly at any size.
    Vector { file_name: String },
    /// Raster first asset, linked via its derived outputs.
    Raster { base: String },
}

impl FirstIcon {
    fn from_assets(assets: &[Asset]) -> Self {
        match assets.first() {
            None => Self::Fallback,
            Some(a) if a.is_vector => Self::Vector {
                file_name: a.file_name.clone(),
            },
            Some(a) => Self::Raster {
                base: a.base.clone(),
            },
        }
    }

    /// The href used by the "actual size" section (16px rendition).
    fn href_16(&self) -> String {
        match self {
            Self::Fallback => "favicon.ico".to_string(),
            Self::Vector { file_name } => file_name.clone(),
            Self::Raster { base } => naming::derived_name(base, 16),
        }
    }

    fn links(&self) -> Markup {
        match self {
            Self::Fallback => html! {
                link rel="icon" href="favicon.ico";
            },
            Self::Vector { file_name } => html! {
                link rel="icon" type="image/svg+xml" href=(file_name);
            },
            Self::Raster { base } => html! {
                link rel="icon" type="image/png" sizes="32x32" href=(naming::derived_name(base, 32));
                link rel="icon" type="image/png" sizes="16x16" href=(naming::derived_name(base, 16));
            },
        }
    }
}

/// Render the full page document.
pub fn render_page(assets: &[Asset], serve: bool) -> Markup {
    let first = FirstIcon::from_assets(assets);
    let first_16 = first.href_16();

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Favicon Tester" }
                (first.links())
                style { (PreEscaped(CSS)) }
            }
            body {
                h1 { "Favicon Tester" }
                p.sub {
                    "Drop images in this folder, run "
                    code { "favicon-tester" }
                    " (or "
                    code { "--check" }
                    "). Each row = one asset."
                }
                section.assets-section aria-label="All assets" {
                    h2 { "All assets — one row each, 4 sizes (16 → 32 → 48 → 64). Scroll down as you add more." }
                    div.asset-list {
                        @for asset in assets {
                            (asset_row(asset))
                        }
                        (add_row())
                    }
                }
                section.actual-tab-section aria-label="Actual tab size" {
                    h2 { "Exactly as in browser tab (16×16 px)" }
                    div.actual-tab-row {
                        div.actual-size-box title="Real tab size" {
                            img id="tab-actual-16" src=(first_16) alt="" width="16" height="16";
                        }
                        div.zoomed-box title="8× zoom" {
                            img id="tab-zoomed-16" src=(first_16) alt="" width="128" height="128";
                        }
                        span.actual-tab-label { "Left = real tab size · Right = 8× zoom" }
                    }
                }
                p.note {
                    "Use \"Use as tab\" on any asset. \"Delete\" removes the row and copies the delete command; with "
                    code { "--serve" }
                    ", Delete removes the file from disk. Reload after running the tool."
                }
                script {
                    @if serve {
                        (PreEscaped("window.__FAVICON_SERVE__=true;"))
                    }
                    (PreEscaped(JS))
                }
            }
        }
    }
}

/// One preview row for an asset on disk.
fn asset_row(asset: &Asset) -> Markup {
    if asset.is_vector {
        // Browsers scale SVG losslessly; every cell references the source.
        html! {
            div.asset-row data-asset-src=(asset.file_name) data-svg="true" {
                span.asset-name { (asset.file_name) }
                div.sizes {
                    (size_cell(16, &asset.file_name))
                    (size_cell(32, &asset.file_name))
                    (size_cell(48, &asset.file_name))
                    (size_cell(64, &asset.file_name))
                }
                div.actions {
                    button type="button" class="use-tab use-tab-svg" { "Use as tab" }
                    button type="button" class="btn-delete" data-filename=(asset.file_name) { "Delete" }
                    a href=(asset.file_name) download class="dl-svg" { "Download SVG" }
                }
            }
        }
    } else {
        let out16 = asset.derived_name(16);
        let out32 = asset.derived_name(32);
        html! {
            div.asset-row data-asset-src=(asset.file_name) {
                span.asset-name { (asset.file_name) }
                div.sizes {
                    (size_cell(16, &out16))
                    (size_cell(32, &out32))
                    // 48 upscales the 32px output; 64 shows the source.
                    (size_cell(48, &out32))
                    (size_cell(64, &asset.file_name))
                }
                div.actions {
                    button type="button" class="use-tab" { "Use as tab" }
                    button type="button" class="btn-delete" data-filename=(asset.file_name) { "Delete" }
                    button type="button" class="dl dl-16" { "Download 16×16" }
                    button type="button" class="dl dl-32" { "Download 32×32" }
                }
            }
        }
    }
}

fn size_cell(size: u32, src: &str) -> Markup {
    html! {
        div.size-cell {
            span.label { (size) }
            img src=(src) alt="" width=(size) height=(size);
        }
    }
}

/// Trailing blank row: client-side preview of a file not yet on disk.
fn add_row() -> Markup {
    html! {
        div.asset-row data-asset-file {
            span.asset-name { "Add another (choose file)" }
            input type="file" accept="image/*" class="third-file" style="font-size: 0.75rem;";
            div.sizes {
                @for size in [16u32, 32, 48, 64] {
                    div.size-cell {
                        span.label { (size) }
                        img alt="" width=(size) height=(size);
                    }
                }
            }
            div.actions {
                button type="button" class="use-tab" disabled { "Use as tab" }
                button type="button" class="dl dl-16" disabled { "Download 16×16" }
                button type="button" class="dl dl-32" disabled { "Download 32×32" }
            }
        }
    }
}
