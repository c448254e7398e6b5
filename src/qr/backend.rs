//! QR encoding engine trait and shared types.
//!
//! The [`QrEngine`] trait is the single operation every engine must support:
//! turn a payload and a [`RenderStyle`] into an in-memory raster. Symbol
//! encoding (version selection, error-correction coding, masking) and pixel
//! rendering both happen behind it, so the rest of the crate never touches a
//! QR library directly.
//!
//! The production implementation is
//! [`QrcodeEngine`](super::qrcode_engine::QrcodeEngine).

use super::style::RenderStyle;
use image::RgbImage;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("payload of {len} bytes exceeds QR capacity at the requested error-correction level")]
    CapacityExceeded { len: usize },
    #[error("payload rejected by encoder: {0}")]
    Rejected(String),
    #[error("encoder panicked: {0}")]
    Panicked(String),
}

/// Trait for QR encoding engines.
///
/// Engines are treated as pure functions: same payload and style, same image.
/// They never touch the filesystem; persisting the image is the caller's job.
pub trait QrEngine {
    /// Encode `payload` at the smallest symbol version that fits (starting at
    /// `style.min_version`) and render it with `style`.
    fn render(&self, payload: &str, style: &RenderStyle) -> Result<RgbImage, EngineError>;
}

impl<E: QrEngine + ?Sized> QrEngine for &E {
    fn render(&self, payload: &str, style: &RenderStyle) -> Result<RgbImage, EngineError> {
        (**self).render(payload, style)
    }
}
