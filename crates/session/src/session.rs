//! Per-document session context.

use std::path::{Path, PathBuf};

use anyhow::Result;
use lineview_buffer::{
    Command, CommandEngine, RopeStore, StoreContractViolation, TextStore, Viewport,
};
use lineview_config::Config;

use crate::event::Rendered;
use crate::file_io::LineEnding;
use crate::gate::SingleFlight;

/// Tunables a session is created with
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOptions {
    pub initial_window: usize,
    pub scroll_increment: usize,
    pub expand_threshold: f64,
    pub history_limit: usize,
    pub autosave: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for SessionOptions {
    fn from(config: &Config) -> Self {
        Self {
            initial_window: config.viewport.initial_window,
            scroll_increment: config.viewport.scroll_increment,
            expand_threshold: config.viewport.expand_threshold,
            history_limit: config.editor.history_limit,
            autosave: config.editor.autosave,
        }
    }
}

/// Everything that belongs to one open document: store, history, line
/// window, caret, and the expansion gate.
#[derive(Debug)]
pub struct DocumentSession<S = RopeStore> {
    path: Option<PathBuf>,
    line_ending: LineEnding,
    engine: CommandEngine<S>,
    viewport: Viewport,
    /// Absolute char offset of the caret
    caret: usize,
    scroll_gate: SingleFlight,
    /// Set after the store misbehaved; no further input is accepted
    failed: bool,
}

impl DocumentSession<RopeStore> {
    /// Session over an in-memory text with `\n` line endings
    pub fn from_text(text: &str, options: &SessionOptions) -> Self {
        Self::new(RopeStore::from_text(text), options)
    }
}

impl<S: TextStore> DocumentSession<S> {
    pub fn new(store: S, options: &SessionOptions) -> Self {
        let mut viewport = Viewport::new(
            options.initial_window,
            options.scroll_increment,
            options.expand_threshold,
        );
        viewport.initialize();
        Self {
            path: None,
            line_ending: LineEnding::LF,
            engine: CommandEngine::with_capacity(store, options.history_limit),
            viewport,
            caret: 0,
            scroll_gate: SingleFlight::new(),
            failed: false,
        }
    }

    /// Attach the file this session was loaded from
    pub fn with_file(mut self, path: impl Into<PathBuf>, line_ending: LineEnding) -> Self {
        self.path = Some(path.into());
        self.line_ending = line_ending;
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub fn engine(&self) -> &CommandEngine<S> {
        &self.engine
    }

    pub fn store(&self) -> &S {
        self.engine.store()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Handle to this session's expansion gate
    pub fn scroll_gate(&self) -> &SingleFlight {
        &self.scroll_gate
    }

    /// Materialized window text
    pub fn content(&self) -> String {
        self.viewport.render(self.engine.store())
    }

    /// Full document text
    pub fn document(&self) -> String {
        self.engine.document()
    }

    /// Current window and caret
    pub fn rendered(&self) -> Rendered {
        Rendered {
            content: self.content(),
            caret_offset: self.caret,
        }
    }

    /// Check whether the boundary's scroll position asks for more lines
    pub fn wants_more(&self, scroll_position: f64, scrollable_height: f64) -> bool {
        self.viewport.should_expand(scroll_position, scrollable_height)
    }

    /// Grow the window by one increment and re-render.
    ///
    /// Returns `None` if another expansion holds the gate or the session failed.
    pub fn expand_window(&mut self) -> Option<Rendered> {
        let _ticket = self.scroll_gate.try_begin()?;
        if self.failed {
            return None;
        }
        let line_count = self.engine.store().line_count();
        if self.viewport.expand(line_count) {
            log::debug!("Window expanded to {} lines", self.viewport.last_line());
        }
        Some(self.rendered())
    }

    /// Execute a validated command, then resync the window.
    pub(crate) fn apply(&mut self, command: Command) -> Result<Rendered> {
        let old_count = self.engine.store().line_count();
        let caret = command.caret_after_apply();
        log::debug!("Executing {:?}", command);

        let result = self.engine.execute(command);
        self.track(result)?;
        Ok(self.settle(old_count, caret))
    }

    /// Undo the last command. `None` when the undo stack is empty.
    pub(crate) fn undo(&mut self) -> Result<Option<Rendered>> {
        let old_count = self.engine.store().line_count();
        let result = self
            .engine
            .undo()
            .map(|undone| undone.map(Command::caret_after_revert));
        Ok(self
            .track(result)?
            .map(|caret| self.settle(old_count, caret)))
    }

    /// Redo the last undone command. `None` when the redo stack is empty.
    pub(crate) fn redo(&mut self) -> Result<Option<Rendered>> {
        let old_count = self.engine.store().line_count();
        let result = self
            .engine
            .redo()
            .map(|redone| redone.map(Command::caret_after_apply));
        Ok(self
            .track(result)?
            .map(|caret| self.settle(old_count, caret)))
    }

    fn settle(&mut self, old_count: usize, caret: usize) -> Rendered {
        let store = self.engine.store();
        let new_count = store.line_count();
        let caret_line = store.line_of_offset(caret);
        self.viewport.resync(old_count, new_count, caret_line);
        self.caret = caret;
        self.rendered()
    }

    /// Any store failure ends the session: offsets can no longer be trusted.
    fn track<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            self.failed = true;
            match e.downcast_ref::<StoreContractViolation>() {
                Some(violation) => log::error!("{}", violation),
                None => log::error!("Store rejected edit: {:#}", e),
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(initial_window: usize) -> SessionOptions {
        SessionOptions {
            initial_window,
            scroll_increment: 2,
            ..SessionOptions::default()
        }
    }

    #[test]
    fn test_new_session_renders_initial_window() {
        let session = DocumentSession::from_text("a\nb\nc\nd\ne", &options(2));
        assert_eq!(session.content(), "a\nb\n");
        assert_eq!(session.caret(), 0);
        assert_eq!(session.path(), None);
    }

    #[test]
    fn test_expand_window() {
        let mut session = DocumentSession::from_text("a\nb\nc\nd\ne", &options(2));
        let rendered = session.expand_window().unwrap();
        assert_eq!(rendered.content, "a\nb\nc\nd\n");

        let rendered = session.expand_window().unwrap();
        assert_eq!(rendered.content, "a\nb\nc\nd\ne");
        assert_eq!(session.viewport().last_line(), 5);
    }

    #[test]
    fn test_expand_is_dropped_while_in_flight() {
        let mut session = DocumentSession::from_text("a\nb\nc\nd\ne", &options(2));
        let gate = session.scroll_gate().clone();
        let ticket = gate.try_begin().unwrap();

        assert!(session.expand_window().is_none());
        assert_eq!(session.viewport().last_line(), 2);

        drop(ticket);
        assert!(session.expand_window().is_some());
        assert_eq!(session.viewport().last_line(), 4);
    }

    #[test]
    fn test_newline_insert_grows_window() {
        let mut session = DocumentSession::from_text("a\nb\nc\nd\ne", &options(2));
        let rendered = session.apply(Command::insert(1, "\n")).unwrap();
        assert_eq!(rendered.caret_offset, 2);
        assert_eq!(session.viewport().last_line(), 3);
        assert_eq!(rendered.content, "a\n\nb\n");
    }

    #[test]
    fn test_undo_redo_carets() {
        let mut session = DocumentSession::from_text("hello world", &SessionOptions::default());
        session.apply(Command::delete(5, 6)).unwrap();

        let undone = session.undo().unwrap().unwrap();
        assert_eq!(undone.content, "hello world");
        assert_eq!(undone.caret_offset, 11);

        let redone = session.redo().unwrap().unwrap();
        assert_eq!(redone.content, "hello");
        assert_eq!(redone.caret_offset, 5);

        session.undo().unwrap();
        session.undo().unwrap();
        assert!(session.undo().unwrap().is_none());
    }

    #[test]
    fn test_store_error_fails_session() {
        let mut session = DocumentSession::from_text("abc", &SessionOptions::default());
        assert!(session.apply(Command::delete(2, 5)).is_err());
        assert!(session.is_failed());
        assert!(session.expand_window().is_none());
    }

    #[test]
    fn test_options_from_config() {
        let mut config = Config::default();
        config.viewport.initial_window = 7;
        config.editor.autosave = true;
        let options = SessionOptions::from(&config);
        assert_eq!(options.initial_window, 7);
        assert!(options.autosave);
    }
}
