//! Rendering parameters for QR images.
//!
//! These types describe *what* a rendered symbol looks like, not *how* it is
//! drawn. They are the interface between the [`generate`](crate::generate)
//! stage (which always asks for [`RenderStyle::STANDARD`]) and the
//! [`backend`](super::backend) (which does the encoding and pixel work).
//!
//! ## Types
//!
//! - [`ErrorCorrection`]: QR redundancy tier (L/M/Q/H).
//! - [`ModuleShape`]: How a single dark module is drawn.
//! - [`RenderStyle`]: The full visual bundle handed to an engine.

use image::Rgb;

/// QR error-correction level, from least to most redundant.
///
/// Higher levels survive more damage but hold less data per symbol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCorrection {
    /// ~7% of codewords recoverable.
    Low,
    /// ~15%.
    Medium,
    /// ~25%.
    Quartile,
    /// ~30%.
    High,
}

/// Shape used to draw each dark module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleShape {
    /// Plain filled squares.
    Square,
    /// Squares whose exposed corners are rounded off. Isolated modules become
    /// discs, straight runs become capsules.
    Rounded,
}

/// Visual configuration applied to every generated symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStyle {
    /// Smallest symbol version to use (1–40). Engines grow past it when the
    /// payload doesn't fit.
    pub min_version: i16,
    pub error_correction: ErrorCorrection,
    /// Edge length of one module, in pixels.
    pub module_size: u32,
    /// Quiet zone around the symbol, in modules.
    pub border: u32,
    pub shape: ModuleShape,
    pub fill: Rgb<u8>,
    pub background: Rgb<u8>,
}

impl RenderStyle {
    /// The only style the tool renders with: version 1 and up, low error
    /// correction, 10px rounded modules, 4-module border, black on white.
    pub const STANDARD: RenderStyle = RenderStyle {
        min_version: 1,
        error_correction: ErrorCorrection::Low,
        module_size: 10,
        border: 4,
        shape: ModuleShape::Rounded,
        fill: Rgb([0, 0, 0]),
        background: Rgb([255, 255, 255]),
    };
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::STANDARD
    }
}
