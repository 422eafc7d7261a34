//! External resize backend — shells out to ImageMagick.
//!
//! Tries `magick` (IM7) first, then `convert` (IM6). The command is
//! resolved once by [`MagickBackend::probe`] running `<cmd> -version`;
//! per-call invocations use `-filter point` for nearest-neighbor scaling
//! and a `WxH!` geometry so the output is exactly the requested size
//! rather than aspect-fit.

use super::backend::{BackendError, ResizeBackend, ResizeParams};
use std::process::{Command, Stdio};

/// Candidate commands, in preference order.
const COMMANDS: &[&str] = &["magick", "convert"];

/// External backend invoking ImageMagick.
pub struct MagickBackend {
    command: &'static str,
}

impl MagickBackend {
    /// Locate a working ImageMagick command. `None` when neither `magick`
    /// nor `convert` responds to `-version`.
    pub fn probe() -> Option<Self> {
        COMMANDS
            .iter()
            .find(|cmd| {
                Command::new(cmd)
                    .arg("-version")
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .status()
                    .map(|s| s.success())
                    .unwrap_or(false)
            })
            .map(|command| Self { command })
    }
}

impl ResizeBackend for MagickBackend {
    fn name(&self) -> &'static str {
        self.command
    }

    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
        let geometry = format!("{}x{}!", params.width, params.height);
        let output = Command::new(self.command)
            .arg(&params.source)
            .args(["-filter", "point", "-resize", &geometry])
            .arg(&params.output)
            .output()
            .map_err(BackendError::Io)?;

        if output.status.success() {
            Ok(())
        } else {
            Err(BackendError::ProcessingFailed(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )))
        }
    }
}
