//! Inputs consumed from and events produced for the UI boundary.

use std::path::PathBuf;

/// Raw edit request. Offsets are absolute char offsets into the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditIntent {
    /// Typed character or IME composition result
    Insert { offset: usize, text: String },
    /// Delete the char before the caret
    Backspace { caret: usize },
    /// Delete `count` chars starting at `offset` (selection or single char)
    Delete { offset: usize, count: usize },
    /// Move the selection `[offset, offset + count)` to the clipboard
    Cut { offset: usize, count: usize },
    /// Put `[offset, offset + count)` on the clipboard, leaving the document alone
    Copy { offset: usize, count: usize },
    /// Insert text the boundary already read from the clipboard
    Paste { caret: usize, text: String },
    /// Insert whatever the clipboard collaborator holds
    PasteClipboard { caret: usize },
    Undo,
    Redo,
}

/// Everything the boundary can ask of a [`crate::SessionHost`]
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryInput {
    CreateDocument(PathBuf),
    OpenDocument(PathBuf),
    Edit(EditIntent),
    /// Scroll offset and scrollable height reported by the view.
    /// Grows the window once `position` crosses the expansion threshold.
    Scrolled { position: f64, height: f64 },
    /// Grow the window unconditionally
    ExpandWindow,
    Save,
}

/// Events emitted to the boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryEvent {
    DocumentCreated {
        path: PathBuf,
    },
    DocumentOpened {
        path: PathBuf,
        content: String,
    },
    ContentLoaded {
        path: PathBuf,
        content: String,
        caret_offset: usize,
    },
}

/// Rendered window plus the caret the boundary should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub content: String,
    pub caret_offset: usize,
}
