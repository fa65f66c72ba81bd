//! Archive metadata wire format
//!
//! The JSON entry of a map archive. Field names are wire format and must
//! match exactly for compatibility with existing archives.
//!
//! Parsing is deliberately asymmetric in strictness: the scalar fields
//! (`imageOffsetX`, `imageOffsetY`, `canvasScale`) are hard requirements,
//! while `tiles` is held as a raw JSON value and converted leniently - any
//! shape or type mismatch there is absorbed into the default all-Blocked
//! grid instead of failing the load.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::WalkGrid;

/// Error from parsing archive metadata (malformed JSON or a missing or
/// non-numeric scalar field).
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataError(pub String);

impl std::fmt::Display for MetadataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Metadata parse error: {}", self.0)
    }
}

impl std::error::Error for MetadataError {}

/// The metadata JSON stored in a map archive
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapMetadata {
    #[serde(rename = "imageOffsetX")]
    pub image_offset_x: f64,
    #[serde(rename = "imageOffsetY")]
    pub image_offset_y: f64,
    #[serde(rename = "canvasScale")]
    pub canvas_scale: f64,
    /// Kept as raw JSON so grid-shape problems stay non-fatal
    #[serde(rename = "tiles", default)]
    pub tiles: Value,
}

impl MapMetadata {
    /// Metadata for a bare image with no saved state: no pan, unit zoom,
    /// no tiles (which decodes to the default grid).
    pub fn bare() -> MapMetadata {
        MapMetadata {
            image_offset_x: 0.0,
            image_offset_y: 0.0,
            canvas_scale: 1.0,
            tiles: Value::Null,
        }
    }

    /// Snapshot a document's grid and view state into wire form
    pub fn from_document_state(
        grid: &WalkGrid,
        pan_offset_x: f64,
        pan_offset_y: f64,
        zoom_scale: f64,
    ) -> MapMetadata {
        let rows = grid
            .to_token_rows()
            .into_iter()
            .map(|row| Value::Array(row.into_iter().map(Value::String).collect()))
            .collect();
        MapMetadata {
            image_offset_x: pan_offset_x,
            image_offset_y: pan_offset_y,
            canvas_scale: zoom_scale,
            tiles: Value::Array(rows),
        }
    }

    /// Parse metadata text.
    ///
    /// An exactly-empty JSON object is the bare-image case and yields
    /// [`MapMetadata::bare`]. Anything else must carry all three numeric
    /// scalar fields or the whole parse fails.
    pub fn parse(text: &str) -> Result<MapMetadata, MetadataError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| MetadataError(e.to_string()))?;

        if value.as_object().is_some_and(|obj| obj.is_empty()) {
            return Ok(MapMetadata::bare());
        }

        serde_json::from_value(value).map_err(|e| MetadataError(e.to_string()))
    }

    /// Serialize to the metadata entry text
    pub fn to_json(&self) -> Result<String, MetadataError> {
        serde_json::to_string(self).map_err(|e| MetadataError(e.to_string()))
    }

    /// Decode the `tiles` value into a grid, falling back to the default
    /// all-Blocked grid on any shape or type mismatch.
    pub fn grid(&self) -> WalkGrid {
        match token_rows(&self.tiles) {
            Some(rows) => WalkGrid::from_token_rows(&rows),
            None => {
                log::warn!("tiles entry is not an array of string rows; substituting default grid");
                WalkGrid::default()
            }
        }
    }
}

/// Convert the raw tiles value to token rows, or `None` if any element is
/// not a string (or the nesting is wrong).
fn token_rows(value: &Value) -> Option<Vec<Vec<String>>> {
    value
        .as_array()?
        .iter()
        .map(|row| {
            row.as_array()?
                .iter()
                .map(|token| token.as_str().map(str::to_string))
                .collect()
        })
        .collect()
}
