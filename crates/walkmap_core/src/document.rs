//! The in-memory map document

use crate::{MapMetadata, WalkGrid};

/// A loaded map: the walkability grid plus view state and the background
/// image it is overlaid on.
///
/// Documents are replaced wholesale when a new archive is opened, never
/// patched field-by-field.
#[derive(Debug, Clone, PartialEq)]
pub struct MapDocument {
    pub grid: WalkGrid,
    /// Pan offset of the tile layer, in pre-scale pixels
    pub pan_offset_x: f64,
    pub pan_offset_y: f64,
    /// Uniform zoom factor, always > 0
    pub zoom_scale: f64,
    /// Background image bytes, stored as-is (never re-encoded)
    pub image_bytes: Vec<u8>,
    pub image_width: u32,
    pub image_height: u32,
}

impl MapDocument {
    /// A fresh document: all-Blocked grid, no pan, unit zoom, no image.
    pub fn new() -> MapDocument {
        MapDocument {
            grid: WalkGrid::default(),
            pan_offset_x: 0.0,
            pan_offset_y: 0.0,
            zoom_scale: 1.0,
            image_bytes: Vec::new(),
            image_width: 0,
            image_height: 0,
        }
    }

    /// Assemble a document from parsed metadata, the raw image entry and
    /// the decoded image dimensions.
    pub fn from_parts(
        metadata: &MapMetadata,
        image_bytes: Vec<u8>,
        image_width: u32,
        image_height: u32,
    ) -> MapDocument {
        MapDocument {
            grid: metadata.grid(),
            pan_offset_x: metadata.image_offset_x,
            pan_offset_y: metadata.image_offset_y,
            zoom_scale: metadata.canvas_scale,
            image_bytes,
            image_width,
            image_height,
        }
    }
}

impl Default for MapDocument {
    fn default() -> Self {
        MapDocument::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CellIndex, TileState};

    #[test]
    fn test_new_document_defaults() {
        let doc = MapDocument::new();
        assert_eq!(doc.pan_offset_x, 0.0);
        assert_eq!(doc.pan_offset_y, 0.0);
        assert_eq!(doc.zoom_scale, 1.0);
        assert!(doc.image_bytes.is_empty());
        let cell = CellIndex::new(0, 0).unwrap();
        assert_eq!(doc.grid.get(cell), TileState::Blocked);
    }
}
