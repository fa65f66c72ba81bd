//! Map archive encode/decode
//!
//! A map archive is a zip container with exactly two entries, looked up by
//! exact name: `map.json` (metadata, see [`MapMetadata`]) and `map.png`
//! (the background image, stored byte-for-byte). This is the one supported
//! layout; legacy archives with a jpg entry or un-namespaced metadata are
//! not read.

use std::io::{Cursor, Read, Write};

use walkmap_core::{MapDocument, MapMetadata};
use zip::write::SimpleFileOptions;

use crate::probe::probe_dimensions;

/// Name of the metadata entry
pub const METADATA_ENTRY: &str = "map.json";
/// Name of the background image entry
pub const IMAGE_ENTRY: &str = "map.png";

/// Errors that abort a document load
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentLoadError {
    /// The container is unreadable or an entry is missing
    ArchiveRead(String),
    /// Metadata JSON is malformed or a required scalar is missing/non-numeric
    MetadataParse(String),
    /// The background image could not be decoded
    ImageDecode(String),
}

impl std::fmt::Display for DocumentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentLoadError::ArchiveRead(e) => write!(f, "Archive read error: {}", e),
            DocumentLoadError::MetadataParse(e) => write!(f, "Metadata parse error: {}", e),
            DocumentLoadError::ImageDecode(e) => write!(f, "Image decode error: {}", e),
        }
    }
}

impl std::error::Error for DocumentLoadError {}

/// Error from encoding a document into archive bytes
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveWriteError(pub String);

impl std::fmt::Display for ArchiveWriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Archive write error: {}", self.0)
    }
}

impl std::error::Error for ArchiveWriteError {}

/// The two raw entries of a map archive, before metadata parsing and image
/// decoding have happened.
#[derive(Debug, Clone)]
pub struct ArchiveEntries {
    pub metadata_text: String,
    pub image_bytes: Vec<u8>,
}

/// Encode a document into archive bytes.
///
/// The image entry is the document's background bytes passed through
/// unmodified - no re-encoding.
pub fn encode(document: &MapDocument) -> Result<Vec<u8>, ArchiveWriteError> {
    let metadata = MapMetadata::from_document_state(
        &document.grid,
        document.pan_offset_x,
        document.pan_offset_y,
        document.zoom_scale,
    );
    let json = metadata.to_json().map_err(|e| ArchiveWriteError(e.to_string()))?;

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    writer
        .start_file(METADATA_ENTRY, options)
        .map_err(|e| ArchiveWriteError(e.to_string()))?;
    writer
        .write_all(json.as_bytes())
        .map_err(|e| ArchiveWriteError(e.to_string()))?;

    writer
        .start_file(IMAGE_ENTRY, options)
        .map_err(|e| ArchiveWriteError(e.to_string()))?;
    writer
        .write_all(&document.image_bytes)
        .map_err(|e| ArchiveWriteError(e.to_string()))?;

    let cursor = writer
        .finish()
        .map_err(|e| ArchiveWriteError(e.to_string()))?;
    Ok(cursor.into_inner())
}

/// Extract the two entries from archive bytes.
pub fn read_entries(bytes: &[u8]) -> Result<ArchiveEntries, DocumentLoadError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| DocumentLoadError::ArchiveRead(e.to_string()))?;

    let metadata_text = {
        let mut entry = archive
            .by_name(METADATA_ENTRY)
            .map_err(|e| DocumentLoadError::ArchiveRead(format!("{}: {}", METADATA_ENTRY, e)))?;
        let mut text = String::new();
        entry
            .read_to_string(&mut text)
            .map_err(|e| DocumentLoadError::ArchiveRead(e.to_string()))?;
        text
    };

    let image_bytes = {
        let mut entry = archive
            .by_name(IMAGE_ENTRY)
            .map_err(|e| DocumentLoadError::ArchiveRead(format!("{}: {}", IMAGE_ENTRY, e)))?;
        let mut bytes = Vec::new();
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| DocumentLoadError::ArchiveRead(e.to_string()))?;
        bytes
    };

    Ok(ArchiveEntries {
        metadata_text,
        image_bytes,
    })
}

/// Decode archive bytes into a document in one synchronous step.
///
/// Scalars are strict, the tile grid is lenient (a malformed grid becomes
/// the default all-Blocked grid), and an undecodable image aborts the load.
pub fn decode(bytes: &[u8]) -> Result<MapDocument, DocumentLoadError> {
    let entries = read_entries(bytes)?;
    let metadata = MapMetadata::parse(&entries.metadata_text)
        .map_err(|e| DocumentLoadError::MetadataParse(e.0))?;
    let (width, height) =
        probe_dimensions(&entries.image_bytes).map_err(DocumentLoadError::ImageDecode)?;
    Ok(MapDocument::from_parts(
        &metadata,
        entries.image_bytes,
        width,
        height,
    ))
}
