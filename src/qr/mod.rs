//! QR encoding and rendering: the engine boundary.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Encode** | `qrcode` (version fit, Reed–Solomon, masking) |
//! | **Shape modules** | pure geometry in [`calculations`] |
//! | **Rasterize** | `image::RgbImage` |
//!
//! The module is split into:
//! - **Style**: [`RenderStyle`] and its parameter types
//! - **Calculations**: Pure functions for canvas and module geometry (unit testable)
//! - **Backend**: [`QrEngine`] trait + [`QrcodeEngine`]

pub mod backend;
mod calculations;
pub mod qrcode_engine;
mod style;

pub use backend::{EngineError, QrEngine};
pub use calculations::{Corners, canvas_side, module_covers, rounded_corners};
pub use qrcode_engine::QrcodeEngine;
pub use style::{ErrorCorrection, ModuleShape, RenderStyle};
