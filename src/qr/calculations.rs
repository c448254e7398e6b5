//! Pure geometry for rasterizing QR symbols.
//!
//! All functions here are pure and testable without encoding a symbol.

use super::style::RenderStyle;

/// Side length in pixels of the square canvas for a symbol `symbol_width`
/// modules wide, including the quiet zone on both sides.
///
/// ```
/// # use qr_generator::qr::{RenderStyle, canvas_side};
/// // Version 1 (21 modules) + 4-module border each side, 10px modules
/// assert_eq!(canvas_side(21, &RenderStyle::STANDARD), 290);
/// ```
pub fn canvas_side(symbol_width: u32, style: &RenderStyle) -> u32 {
    (symbol_width + 2 * style.border) * style.module_size
}

/// Which corners of a dark module are rounded off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Corners {
    pub top_left: bool,
    pub top_right: bool,
    pub bottom_left: bool,
    pub bottom_right: bool,
}

impl Corners {
    pub const SQUARE: Corners = Corners {
        top_left: false,
        top_right: false,
        bottom_left: false,
        bottom_right: false,
    };
}

/// Pick the rounded corners of the dark module at `(x, y)`.
///
/// A corner is rounded when neither orthogonal neighbour touching it is dark,
/// so joints between adjacent modules stay square. `is_dark` must answer
/// `false` for coordinates outside the symbol.
pub fn rounded_corners(is_dark: impl Fn(i64, i64) -> bool, x: i64, y: i64) -> Corners {
    let up = is_dark(x, y - 1);
    let down = is_dark(x, y + 1);
    let left = is_dark(x - 1, y);
    let right = is_dark(x + 1, y);

    Corners {
        top_left: !up && !left,
        top_right: !up && !right,
        bottom_left: !down && !left,
        bottom_right: !down && !right,
    }
}

/// Whether the pixel at `(px, py)` within a module of side `size` is painted.
///
/// Rounded corners use a radius of half the module, centred on the module
/// centre; pixels are sampled at their centre.
pub fn module_covers(px: u32, py: u32, size: u32, corners: Corners) -> bool {
    let half = size as f64 / 2.0;
    let cx = px as f64 + 0.5;
    let cy = py as f64 + 0.5;

    let rounded = match (cy < half, cx < half) {
        (true, true) => corners.top_left,
        (true, false) => corners.top_right,
        (false, true) => corners.bottom_left,
        (false, false) => corners.bottom_right,
    };
    if !rounded {
        return true;
    }

    let dx = cx - half;
    let dy = cy - half;
    dx * dx + dy * dy <= half * half
}
