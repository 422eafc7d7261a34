//! Icon resizing — one capability interface, two interchangeable backends.
//!
//! | Backend | Mechanism |
//! |---|---|
//! | [`RustBackend`] | `image` crate decoders + nearest-neighbor resize + PNG encoder |
//! | [`MagickBackend`] | external `magick`/`convert` with `-filter point` |
//!
//! Availability is probed **once at startup** via [`probe`], not per call.
//! The library backend is preferred; the external tool serves as fallback
//! when a source fails to decode in-process. If neither backend is usable
//! the probe fails and the process exits with an install hint.
//!
//! All output is PNG at exactly the requested dimensions, scaled without
//! smoothing so single-pixel detail survives at 16×16.

pub mod backend;
pub mod magick_backend;
pub mod rust_backend;

pub use backend::{BackendError, ResizeBackend, ResizeParams};
pub use magick_backend::MagickBackend;
pub use rust_backend::RustBackend;

/// Resize capability selected at startup: a preferred backend plus an
/// optional fallback tried when the preferred one fails on a given source.
pub struct Resizer {
    primary: Box<dyn ResizeBackend>,
    fallback: Option<Box<dyn ResizeBackend>>,
}

impl Resizer {
    pub fn new(
        primary: Box<dyn ResizeBackend>,
        fallback: Option<Box<dyn ResizeBackend>>,
    ) -> Self {
        Self { primary, fallback }
    }
}

impl ResizeBackend for Resizer {
    fn name(&self) -> &'static str {
        self.primary.name()
    }

    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
        match self.primary.resize(params) {
            Ok(()) => Ok(()),
            Err(err) => match &self.fallback {
                Some(fallback) => fallback.resize(params),
                None => Err(err),
            },
        }
    }
}

/// Probe available backends and build the [`Resizer`] for this run.
///
/// Preference order: library first, external tool as fallback. Errors only
/// when neither is usable — a fatal condition for any run that resizes.
pub fn probe() -> Result<Resizer, BackendError> {
    let library = RustBackend::available().then(RustBackend::new);
    let external = MagickBackend::probe();

    match (library, external) {
        (Some(lib), ext) => Ok(Resizer::new(
            Box::new(lib),
            ext.map(|b| Box::new(b) as Box<dyn ResizeBackend>),
        )),
        (None, Some(ext)) => Ok(Resizer::new(Box::new(ext), None)),
        (None, None) => Err(BackendError::Unavailable),
    }
}
