//! Production QR engine.
//!
//! ## Crate mapping
//!
//! | Step | Crate / function |
//! |---|---|
//! | Version fit + RS coding + masking | `qrcode::QrCode::with_error_correction_level` |
//! | Minimum version floor | `qrcode::QrCode::with_version` |
//! | Module shapes | [`calculations`](super::calculations) |
//! | Raster | `image::RgbImage` |

use super::backend::{EngineError, QrEngine};
use super::calculations::{Corners, canvas_side, module_covers, rounded_corners};
use super::style::{ErrorCorrection, ModuleShape, RenderStyle};
use image::RgbImage;
use qrcode::types::QrError;
use qrcode::{Color, EcLevel, QrCode, Version};

/// Engine backed by the `qrcode` crate for encoding and `image` for pixels.
pub struct QrcodeEngine;

impl QrcodeEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Default for QrcodeEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn ec_level(ec: ErrorCorrection) -> EcLevel {
    match ec {
        ErrorCorrection::Low => EcLevel::L,
        ErrorCorrection::Medium => EcLevel::M,
        ErrorCorrection::Quartile => EcLevel::Q,
        ErrorCorrection::High => EcLevel::H,
    }
}

fn map_qr_error(err: QrError, payload: &str) -> EngineError {
    match err {
        QrError::DataTooLong => EngineError::CapacityExceeded { len: payload.len() },
        other => EngineError::Rejected(other.to_string()),
    }
}

/// Encode at the smallest version that fits, but never below `min_version`.
fn encode(payload: &str, style: &RenderStyle) -> Result<QrCode, EngineError> {
    if payload.is_empty() {
        return Err(EngineError::Rejected("payload is empty".into()));
    }
    let ec = ec_level(style.error_correction);
    let code = QrCode::with_error_correction_level(payload.as_bytes(), ec)
        .map_err(|e| map_qr_error(e, payload))?;

    match code.version() {
        Version::Normal(v) if v < style.min_version => {
            QrCode::with_version(payload.as_bytes(), Version::Normal(style.min_version), ec)
                .map_err(|e| map_qr_error(e, payload))
        }
        _ => Ok(code),
    }
}

/// Dark/light modules of an encoded symbol, row-major.
struct ModuleGrid {
    width: usize,
    dark: Vec<bool>,
}

impl ModuleGrid {
    fn from_code(code: &QrCode) -> Self {
        Self {
            width: code.width(),
            dark: code
                .to_colors()
                .into_iter()
                .map(|c| c == Color::Dark)
                .collect(),
        }
    }

    fn is_dark(&self, x: i64, y: i64) -> bool {
        let w = self.width as i64;
        if x < 0 || y < 0 || x >= w || y >= w {
            return false;
        }
        self.dark[(y * w + x) as usize]
    }
}

fn rasterize(grid: &ModuleGrid, style: &RenderStyle) -> RgbImage {
    let side = canvas_side(grid.width as u32, style);
    let mut img = RgbImage::from_pixel(side, side, style.background);
    let size = style.module_size;

    for y in 0..grid.width as i64 {
        for x in 0..grid.width as i64 {
            if !grid.is_dark(x, y) {
                continue;
            }
            let corners = match style.shape {
                ModuleShape::Square => Corners::SQUARE,
                ModuleShape::Rounded => rounded_corners(|nx, ny| grid.is_dark(nx, ny), x, y),
            };
            let origin_x = (x as u32 + style.border) * size;
            let origin_y = (y as u32 + style.border) * size;
            for py in 0..size {
                for px in 0..size {
                    if module_covers(px, py, size, corners) {
                        img.put_pixel(origin_x + px, origin_y + py, style.fill);
                    }
                }
            }
        }
    }

    img
}

impl QrEngine for QrcodeEngine {
    fn render(&self, payload: &str, style: &RenderStyle) -> Result<RgbImage, EngineError> {
        let code = encode(payload, style)?;
        Ok(rasterize(&ModuleGrid::from_code(&code), style))
    }
}
