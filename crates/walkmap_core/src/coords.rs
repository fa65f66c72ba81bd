//! Pointer-pixel to grid-cell mapping under pan and zoom

use crate::CellIndex;
use crate::{GRID_COLS, GRID_ROWS};

/// Tile edge length in pre-scale pixels
pub const TILE_EDGE: f64 = 16.0;

/// Host-owned viewport rectangle in host pixel space.
///
/// The host supplies this with every viewport update; the core never reads
/// it from ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewportRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> ViewportRect {
        ViewportRect {
            x,
            y,
            width,
            height,
        }
    }
}

/// Map a pointer position to the grid cell under it.
///
/// `(px, py)` is the pointer in host-viewport pixel space, `pan_x`/`pan_y`
/// the document pan offset and `scale` the zoom factor. Axis convention:
/// x maps to column, y maps to row.
///
/// Returns `None` when the pointer lies outside the grid (or `scale` is not
/// a positive finite number). Callers treat `None` as a no-op, never as an
/// error.
pub fn cell_at_pointer(
    px: f64,
    py: f64,
    viewport: &ViewportRect,
    pan_x: f64,
    pan_y: f64,
    scale: f64,
) -> Option<CellIndex> {
    if !(scale.is_finite() && scale > 0.0) {
        return None;
    }

    let world_x = px - viewport.x - pan_x * scale;
    let world_y = py - viewport.y - pan_y * scale;
    let tile_size = TILE_EDGE * scale;

    let col = (world_x / tile_size).floor();
    let row = (world_y / tile_size).floor();

    if !row.is_finite() || !col.is_finite() {
        return None;
    }
    if row < 0.0 || col < 0.0 || row >= GRID_ROWS as f64 || col >= GRID_COLS as f64 {
        return None;
    }
    CellIndex::new(row as usize, col as usize)
}
