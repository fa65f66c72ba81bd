//! Core data structures for the walkmap editor
//!
//! This crate provides the fundamental types for a walkability-grid map:
//! - `TileState` - Walkable/Blocked cell state with its wire tokens
//! - `WalkGrid` / `CellIndex` - the fixed 29x31 grid and its validated index
//! - `ViewportRect` + `cell_at_pointer` - pointer-to-cell mapping under pan/zoom
//! - `MapDocument` - a grid bundled with pan/zoom and its background image
//! - `MapMetadata` - the JSON wire format stored inside map archives

mod coords;
mod document;
mod grid;
mod metadata;
mod tile;

pub use coords::{cell_at_pointer, ViewportRect, TILE_EDGE};
pub use document::MapDocument;
pub use grid::{CellIndex, WalkGrid, GRID_CELLS, GRID_COLS, GRID_ROWS};
pub use metadata::{MapMetadata, MetadataError};
pub use tile::TileState;
