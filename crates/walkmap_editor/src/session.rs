//! Document session lifecycle
//!
//! Orchestrates load/decode/edit/save around a single resident document.
//! The session is single-threaded and event-driven; the only asynchronous
//! step it models is image decoding, which the host performs between the
//! `DecodeImage` output and the `image_decoded` callback. A monotonically
//! increasing load generation guards against a stale decode completion
//! overwriting a newer load.

use walkmap_core::{MapDocument, MapMetadata, ViewportRect};

use crate::archive;
use crate::paint::{PaintController, PaintMode};

/// Inbound events delivered by the host
#[derive(Debug, Clone)]
pub enum EditorEvent {
    RequestOpenArchive(Vec<u8>),
    RequestOpenImage(Vec<u8>),
    RequestSave,
    Click { x: f64, y: f64 },
    PointerDown,
    PointerUp,
    PointerMove { x: f64, y: f64 },
    PointerCancel,
    ChangeMode(PaintMode),
    ViewportRectUpdated(ViewportRect),
}

/// Outbound results the host must act on
#[derive(Debug, Clone, PartialEq)]
pub enum EditorOutput {
    /// Run the image decoder on these bytes and report back through
    /// [`DocumentSession::image_decoded`] with the same generation.
    DecodeImage {
        generation: u64,
        image_bytes: Vec<u8>,
    },
    /// Encoded archive from a save request, ready to persist
    ArchiveBytes(Vec<u8>),
    DocumentReady,
    DocumentFailed(String),
}

/// Lifecycle state of the session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Unloaded,
    /// Holding the extracted entries until the host's decoder reports back
    AwaitingImageDecode {
        metadata_text: String,
        image_bytes: Vec<u8>,
    },
    Editing(MapDocument),
    Failed(String),
}

/// Top-level editing session: one resident document, one paint controller,
/// the host-owned viewport rect, and the load-generation counter.
#[derive(Debug)]
pub struct DocumentSession {
    state: SessionState,
    generation: u64,
    viewport: ViewportRect,
    controller: PaintController,
}

impl DocumentSession {
    pub fn new() -> DocumentSession {
        DocumentSession {
            state: SessionState::Unloaded,
            generation: 0,
            viewport: ViewportRect::default(),
            controller: PaintController::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The resident document, if the session is editing
    pub fn document(&self) -> Option<&MapDocument> {
        match &self.state {
            SessionState::Editing(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn paint_mode(&self) -> PaintMode {
        self.controller.mode()
    }

    /// Dispatch one host event. At most one output is produced per event.
    pub fn handle_event(&mut self, event: EditorEvent) -> Option<EditorOutput> {
        match event {
            EditorEvent::RequestOpenArchive(bytes) => match archive::read_entries(&bytes) {
                Ok(entries) => self.begin_decode(entries.metadata_text, entries.image_bytes),
                Err(e) => self.fail(e.to_string()),
            },
            // A bare image is an archive with empty metadata
            EditorEvent::RequestOpenImage(bytes) => self.begin_decode("{}".to_string(), bytes),
            EditorEvent::RequestSave => self.save(),
            EditorEvent::Click { x, y } => {
                if let SessionState::Editing(doc) = &mut self.state {
                    self.controller.click(doc, &self.viewport, x, y);
                }
                None
            }
            EditorEvent::PointerDown => {
                if matches!(self.state, SessionState::Editing(_)) {
                    self.controller.pointer_down();
                }
                None
            }
            EditorEvent::PointerUp => {
                if matches!(self.state, SessionState::Editing(_)) {
                    self.controller.pointer_up();
                }
                None
            }
            EditorEvent::PointerMove { x, y } => {
                if let SessionState::Editing(doc) = &mut self.state {
                    self.controller.pointer_move(doc, &self.viewport, x, y);
                }
                None
            }
            EditorEvent::PointerCancel => {
                if matches!(self.state, SessionState::Editing(_)) {
                    self.controller.pointer_cancel();
                }
                None
            }
            EditorEvent::ChangeMode(mode) => {
                if let SessionState::Editing(doc) = &mut self.state {
                    self.controller.change_mode(mode, doc);
                }
                None
            }
            EditorEvent::ViewportRectUpdated(rect) => {
                self.viewport = rect;
                None
            }
        }
    }

    /// Completion callback for the host's image decoder.
    ///
    /// A completion whose generation does not match the current load is
    /// discarded; it belongs to a load that has since been superseded.
    pub fn image_decoded(
        &mut self,
        generation: u64,
        result: Result<(u32, u32), String>,
    ) -> Option<EditorOutput> {
        if generation != self.generation {
            log::debug!(
                "discarding stale image decode (generation {} != {})",
                generation,
                self.generation
            );
            return None;
        }

        match std::mem::replace(&mut self.state, SessionState::Unloaded) {
            SessionState::AwaitingImageDecode {
                metadata_text,
                image_bytes,
            } => match result {
                Ok((width, height)) => {
                    let metadata = match MapMetadata::parse(&metadata_text) {
                        Ok(metadata) => metadata,
                        Err(e) => {
                            return self
                                .fail(archive::DocumentLoadError::MetadataParse(e.0).to_string())
                        }
                    };
                    let document = MapDocument::from_parts(&metadata, image_bytes, width, height);
                    // Metadata and dimensions join atomically into Editing;
                    // the paint tool resets to its initial state.
                    self.controller = PaintController::new();
                    self.state = SessionState::Editing(document);
                    Some(EditorOutput::DocumentReady)
                }
                Err(e) => self.fail(archive::DocumentLoadError::ImageDecode(e).to_string()),
            },
            other => {
                log::warn!("image decode completed while not awaiting one; ignoring");
                self.state = other;
                None
            }
        }
    }

    /// Start a load: hold the entries, bump the generation, hand the image
    /// bytes to the host decoder. Any previous document or pending load is
    /// abandoned.
    fn begin_decode(&mut self, metadata_text: String, image_bytes: Vec<u8>) -> Option<EditorOutput> {
        self.generation += 1;
        let for_host = image_bytes.clone();
        self.state = SessionState::AwaitingImageDecode {
            metadata_text,
            image_bytes,
        };
        Some(EditorOutput::DecodeImage {
            generation: self.generation,
            image_bytes: for_host,
        })
    }

    /// Snapshot the resident document through the codec. Read-only with
    /// respect to session state and never waits on a pending load.
    fn save(&self) -> Option<EditorOutput> {
        let SessionState::Editing(doc) = &self.state else {
            log::warn!("save requested while no document is loaded");
            return None;
        };
        match archive::encode(doc) {
            Ok(bytes) => Some(EditorOutput::ArchiveBytes(bytes)),
            Err(e) => {
                log::warn!("save failed: {}", e);
                None
            }
        }
    }

    fn fail(&mut self, reason: String) -> Option<EditorOutput> {
        self.state = SessionState::Failed(reason.clone());
        Some(EditorOutput::DocumentFailed(reason))
    }
}

impl Default for DocumentSession {
    fn default() -> Self {
        DocumentSession::new()
    }
}
