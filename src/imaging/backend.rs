//! Resize backend trait and shared types.
//!
//! The [`ResizeBackend`] trait is the single capability interface the rest
//! of the codebase programs against. Production implementations are
//! [`RustBackend`](super::rust_backend::RustBackend) and
//! [`MagickBackend`](super::magick_backend::MagickBackend); selection
//! happens once at startup in [`probe`](super::probe).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("resize failed: {0}")]
    ProcessingFailed(String),
    #[error(
        "no resize backend available — the bundled decoders are disabled and \
         neither `magick` nor `convert` was found on PATH"
    )]
    Unavailable,
}

/// One resize operation: source bitmap in, fixed-size PNG out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Trait for resize backends.
///
/// Implementations guarantee the output is a valid PNG at exactly
/// `width`×`height`, scaled nearest-neighbor with alpha preserved.
pub trait ResizeBackend: Sync {
    /// Short identifier for console output ("rust", "magick").
    fn name(&self) -> &'static str;

    /// Execute one resize operation.
    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock backend that records operations without touching the filesystem.
    /// The operation log is shared via `Arc` so tests keep a handle after
    /// boxing the mock behind `dyn ResizeBackend`.
    #[derive(Default, Clone)]
    pub struct MockBackend {
        pub operations: Arc<Mutex<Vec<ResizeParams>>>,
        fail: bool,
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// A mock whose every resize fails, for exercising fallback paths.
        pub fn failing() -> Self {
            Self {
                operations: Arc::default(),
                fail: true,
            }
        }

        pub fn recorded(&self) -> Vec<ResizeParams> {
            self.operations.lock().unwrap().clone()
        }
    }

    impl ResizeBackend for MockBackend {
        fn name(&self) -> &'static str {
            "mock"
        }

        fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
            if self.fail {
                return Err(BackendError::ProcessingFailed("mock failure".into()));
            }
            self.operations.lock().unwrap().push(params.clone());
            Ok(())
        }
    }

    #[test]
    fn mock_records_resize() {
        let backend = MockBackend::new();
        backend
            .resize(&ResizeParams {
                source: "/src.png".into(),
                output: "/src-16x16.png".into(),
                width: 16,
                height: 16,
            })
            .unwrap();

        let ops = backend.recorded();
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].width, 16);
        assert_eq!(ops[0].output, PathBuf::from("/src-16x16.png"));
    }

    #[test]
    fn failing_mock_records_nothing() {
        let backend = MockBackend::failing();
        let result = backend.resize(&ResizeParams {
            source: "/src.png".into(),
            output: "/out.png".into(),
            width: 32,
            height: 32,
        });
        assert!(result.is_err());
        assert!(backend.recorded().is_empty());
    }
}
