//! Owns the current document session and talks to the boundary.

use std::path::{Path, PathBuf};

use lineview_buffer::{RopeStore, TextStore};
use lineview_clipboard::ClipboardProvider;

use crate::dispatcher::EditDispatcher;
use crate::event::{BoundaryEvent, BoundaryInput, EditIntent, Rendered};
use crate::file_io::{self, LineEnding};
use crate::notify::Notifier;
use crate::session::{DocumentSession, SessionOptions};

const ERROR_TITLE: &str = "Error";

/// Holds at most one open document and turns boundary inputs into events.
///
/// A replacement session is fully built before it is swapped in, so a failed
/// open leaves the current document untouched.
#[derive(Debug)]
pub struct SessionHost<C, N> {
    dispatcher: EditDispatcher<C>,
    notifier: N,
    options: SessionOptions,
    session: Option<DocumentSession>,
}

impl<C: ClipboardProvider, N: Notifier> SessionHost<C, N> {
    pub fn new(clipboard: C, notifier: N, options: SessionOptions) -> Self {
        Self {
            dispatcher: EditDispatcher::new(clipboard),
            notifier,
            options,
            session: None,
        }
    }

    pub fn session(&self) -> Option<&DocumentSession> {
        self.session.as_ref()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Route one boundary input
    pub fn handle(&mut self, input: BoundaryInput) -> Option<BoundaryEvent> {
        match input {
            BoundaryInput::CreateDocument(path) => self.create(path),
            BoundaryInput::OpenDocument(path) => self.open(path),
            BoundaryInput::Edit(intent) => self.edit(intent),
            BoundaryInput::Scrolled { position, height } => self.scrolled(position, height),
            BoundaryInput::ExpandWindow => self.expand(),
            BoundaryInput::Save => {
                self.save();
                None
            }
        }
    }

    /// Create an empty file and start a session for it
    pub fn create(&mut self, path: PathBuf) -> Option<BoundaryEvent> {
        if let Err(e) = file_io::create_empty(&path) {
            self.report(&e);
            return None;
        }

        let session = DocumentSession::new(RopeStore::new(), &self.options)
            .with_file(path.clone(), LineEnding::LF);
        self.session = Some(session);
        log::info!("Created {}", path.display());
        Some(BoundaryEvent::DocumentCreated { path })
    }

    /// Load a file into a fresh session
    pub fn open(&mut self, path: PathBuf) -> Option<BoundaryEvent> {
        let loaded = match file_io::read_document(&path) {
            Ok(loaded) => loaded,
            Err(e) => {
                self.report(&e);
                return None;
            }
        };

        let session = DocumentSession::from_text(&loaded.text, &self.options)
            .with_file(path.clone(), loaded.line_ending);
        let content = session.content();
        log::info!(
            "Opened {} ({} lines)",
            path.display(),
            session.store().line_count()
        );
        self.session = Some(session);
        Some(BoundaryEvent::DocumentOpened { path, content })
    }

    /// Apply an edit intent to the current session
    pub fn edit(&mut self, intent: EditIntent) -> Option<BoundaryEvent> {
        let session = self.session.as_mut()?;
        match self.dispatcher.dispatch(session, intent) {
            Ok(Some(rendered)) => {
                if self.options.autosave {
                    self.save();
                }
                self.loaded(rendered)
            }
            Ok(None) => None,
            Err(e) => {
                self.report(&e);
                None
            }
        }
    }

    /// Grow the window of the current session
    pub fn expand(&mut self) -> Option<BoundaryEvent> {
        let rendered = self.session.as_mut()?.expand_window()?;
        self.loaded(rendered)
    }

    /// Expand only if the scroll position passed the threshold
    pub fn scrolled(&mut self, position: f64, height: f64) -> Option<BoundaryEvent> {
        if !self.session.as_ref()?.wants_more(position, height) {
            return None;
        }
        self.expand()
    }

    /// Write the current document to its file. Returns true on success.
    pub fn save(&mut self) -> bool {
        let Some(session) = &self.session else {
            return false;
        };
        let Some(path) = session.path() else {
            return false;
        };

        match file_io::write_document(path, &session.document(), session.line_ending()) {
            Ok(()) => {
                log::info!("Saved {}", path.display());
                true
            }
            Err(e) => {
                self.report(&e);
                false
            }
        }
    }

    fn loaded(&self, rendered: Rendered) -> Option<BoundaryEvent> {
        let path = self
            .session
            .as_ref()
            .and_then(DocumentSession::path)
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Some(BoundaryEvent::ContentLoaded {
            path,
            content: rendered.content,
            caret_offset: rendered.caret_offset,
        })
    }

    fn report(&mut self, error: &anyhow::Error) {
        self.notifier.notify(ERROR_TITLE, &format!("{:#}", error));
    }
}
