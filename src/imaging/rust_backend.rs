//! Library resize backend — the `image` crate, statically linked.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (PNG, JPEG, WebP) | `image` crate (pure Rust decoders) |
//! | Resize | `image::imageops::resize` with `FilterType::Nearest` |
//! | Encode → PNG | `image` crate PNG encoder |
//!
//! Sources are converted to RGBA8 before resizing, so alpha channels
//! survive the round trip regardless of the input color type. Scaling is
//! nearest-neighbor: favicons live at 16×16 where smoothing turns crisp
//! pixel art into mush.

use super::backend::{BackendError, ResizeBackend, ResizeParams};
use image::imageops::FilterType;
use image::{ImageFormat, ImageReader};

/// Formats the scanner accepts as raster sources. Checked against the
/// decoders actually compiled in — if a feature is dropped from Cargo.toml
/// the availability probe notices.
const RASTER_FORMATS: &[ImageFormat] = &[ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::WebP];

/// Library backend using the `image` crate.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }

    /// True when all raster source decoders are compiled in.
    pub fn available() -> bool {
        RASTER_FORMATS.iter().all(|fmt| fmt.reading_enabled())
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ResizeBackend for RustBackend {
    fn name(&self) -> &'static str {
        "rust"
    }

    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
        let img = ImageReader::open(&params.source)
            .map_err(BackendError::Io)?
            .decode()
            .map_err(|e| {
                BackendError::ProcessingFailed(format!(
                    "failed to decode {}: {}",
                    params.source.display(),
                    e
                ))
            })?;

        let rgba = img.to_rgba8();
        let resized = image::imageops::resize(&rgba, params.width, params.height, FilterType::Nearest);
        resized
            .save_with_format(&params.output, ImageFormat::Png)
            .map_err(|e| {
                BackendError::ProcessingFailed(format!(
                    "failed to encode {}: {}",
                    params.output.display(),
                    e
                ))
            })
    }
}
