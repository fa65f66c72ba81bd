//! walkmap_editor - editing core for walkability-grid maps
//!
//! This crate provides the editing logic on top of `walkmap_core`:
//! - Archive save/load (zip container with metadata JSON + background image)
//! - Paint tools (toggle, brush, erase, fill) as an explicit state machine
//! - The document session lifecycle driving load/decode/edit/save
//!
//! Rendering, file pickers and the event loop are host responsibilities;
//! the host feeds [`EditorEvent`]s in and acts on [`EditorOutput`]s.

pub mod archive;
pub mod paint;
pub mod probe;
pub mod session;

pub use archive::{ArchiveWriteError, DocumentLoadError, IMAGE_ENTRY, METADATA_ENTRY};
pub use paint::{PaintController, PaintMode};
pub use probe::probe_dimensions;
pub use session::{DocumentSession, EditorEvent, EditorOutput, SessionState};

// Re-export the data model for convenience
pub use walkmap_core;
