//! QR image generation.
//!
//! One request, one attempt:
//!
//! ```text
//! GenerationRequest → resolve_output_path → QrEngine::render → PNG on disk
//! ```
//!
//! Every failure comes back as a [`GenerationResult`] carrying a typed
//! [`GenerationFailure`]; nothing in here panics or returns a raw engine error
//! to the caller. An engine panic is caught at this boundary too.
//!
//! ## Atomic writes
//!
//! The PNG is encoded into a temporary file next to the target and renamed
//! over it only once fully written. A failed run leaves the previous image
//! (if any) untouched and no partial file behind. Re-running with the same
//! filename replaces the image.
//!
//! There are no retries: failures come from the payload or the local
//! filesystem, and a second attempt would fail the same way.

use crate::config::GenerationRequest;
use crate::naming::{PathError, resolve_output_path};
use crate::qr::{EngineError, QrEngine, RenderStyle};
use image::{ImageFormat, RgbImage};
use std::any::Any;
use std::io::{BufWriter, Write};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{error, info};

/// Failure categories surfaced to the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Path,
    Encoding,
}

impl ErrorKind {
    /// Process exit code: 2 for usage errors (like clap's own), 1 otherwise.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::Configuration => 2,
            ErrorKind::Path | ErrorKind::Encoding => 1,
        }
    }
}

/// Why the image couldn't be produced once the path was ready.
#[derive(Error, Debug)]
pub enum EncodingFault {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("PNG encoding failed: {0}")]
    Png(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum GenerationFailure {
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("Error generating QR code for {}: {source}", path.display())]
    Encoding {
        payload: String,
        path: PathBuf,
        #[source]
        source: EncodingFault,
    },
}

impl GenerationFailure {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerationFailure::Path(_) => ErrorKind::Path,
            GenerationFailure::Encoding { .. } => ErrorKind::Encoding,
        }
    }
}

/// Outcome of [`Generator::generate`].
///
/// `path` is the image path on success, and the intended target on failure
/// (the output directory when the path itself couldn't be built).
#[derive(Debug)]
pub struct GenerationResult {
    pub path: PathBuf,
    pub error: Option<GenerationFailure>,
}

impl GenerationResult {
    fn succeeded(path: PathBuf) -> Self {
        Self { path, error: None }
    }

    fn failed(path: PathBuf, error: GenerationFailure) -> Self {
        Self {
            path,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_result(self) -> Result<PathBuf, GenerationFailure> {
        match self.error {
            None => Ok(self.path),
            Some(err) => Err(err),
        }
    }
}

/// Produces QR images with a fixed [`RenderStyle`].
pub struct Generator<E> {
    engine: E,
    style: RenderStyle,
}

impl<E: QrEngine> Generator<E> {
    /// Generator rendering with [`RenderStyle::STANDARD`].
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            style: RenderStyle::STANDARD,
        }
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    pub fn generate(&self, request: &GenerationRequest) -> GenerationResult {
        let target = match resolve_output_path(request.output_directory(), request.filename()) {
            Ok(target) => target,
            Err(err) => {
                error!("Error preparing output directory: {err}");
                return GenerationResult::failed(
                    request.output_directory().to_path_buf(),
                    err.into(),
                );
            }
        };

        match self.render_and_save(request.payload(), &target.full_path) {
            Ok(()) => {
                info!(
                    "QR code generated successfully: {}",
                    target.full_path.display()
                );
                info!("Encoded URL: {}", request.payload());
                GenerationResult::succeeded(target.full_path)
            }
            Err(fault) => {
                error!(
                    payload = request.payload(),
                    path = %target.full_path.display(),
                    "Error generating QR code: {fault}"
                );
                GenerationResult::failed(
                    target.full_path.clone(),
                    GenerationFailure::Encoding {
                        payload: request.payload().to_string(),
                        path: target.full_path,
                        source: fault,
                    },
                )
            }
        }
    }

    fn render_and_save(&self, payload: &str, path: &Path) -> Result<(), EncodingFault> {
        let image = self.render_guarded(payload)?;
        write_png_atomically(&image, path)
    }

    fn render_guarded(&self, payload: &str) -> Result<RgbImage, EngineError> {
        panic::catch_unwind(AssertUnwindSafe(|| self.engine.render(payload, &self.style)))
            .unwrap_or_else(|panic| Err(EngineError::Panicked(panic_message(panic.as_ref()))))
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Write `image` as PNG to `path` via a temporary sibling file and rename.
pub fn write_png_atomically(image: &RgbImage, path: &Path) -> Result<(), EncodingFault> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir)?;
    // Temp files start out owner-only; images should read like any other file.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))?;
    }
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        image.write_to(&mut writer, ImageFormat::Png)?;
        writer.flush()?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
