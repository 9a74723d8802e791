//! Turns raw edit intents into commands and drives the edit cycle.

use std::borrow::Cow;

use anyhow::{bail, Result};
use lineview_buffer::{Command, TextStore};
use lineview_clipboard::ClipboardProvider;

use crate::event::{EditIntent, Rendered};
use crate::session::DocumentSession;

/// What a validated intent turned into
#[derive(Debug)]
enum Plan {
    Execute(Command),
    Copied,
    Undo,
    Redo,
}

/// Validates intents against the session's store and runs them.
///
/// Out-of-range intents are dropped before any command is built.
#[derive(Debug)]
pub struct EditDispatcher<C> {
    clipboard: C,
}

impl<C: ClipboardProvider> EditDispatcher<C> {
    pub fn new(clipboard: C) -> Self {
        Self { clipboard }
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn clipboard_mut(&mut self) -> &mut C {
        &mut self.clipboard
    }

    /// Run one intent to completion.
    ///
    /// Returns `Ok(None)` when the intent was dropped (failed precondition,
    /// empty undo/redo stack) and `Err` when the store failed, which also
    /// marks the session as failed.
    pub fn dispatch<S: TextStore>(
        &mut self,
        session: &mut DocumentSession<S>,
        intent: EditIntent,
    ) -> Result<Option<Rendered>> {
        if session.is_failed() {
            bail!("Session stopped accepting edits after a store failure");
        }

        let Some(plan) = self.plan(session.store(), &intent) else {
            log::debug!("Dropped {:?}", intent);
            return Ok(None);
        };

        match plan {
            Plan::Execute(command) => session.apply(command).map(Some),
            Plan::Copied => Ok(None),
            Plan::Undo => session.undo(),
            Plan::Redo => session.redo(),
        }
    }

    fn plan<S: TextStore>(&mut self, store: &S, intent: &EditIntent) -> Option<Plan> {
        let len = store.len_chars();
        match intent {
            EditIntent::Insert { offset, text } | EditIntent::Paste { caret: offset, text } => {
                insertion(*offset, text, len)
            }
            EditIntent::PasteClipboard { caret } => {
                let text = self.clipboard.paste()?;
                insertion(*caret, &text, len)
            }
            EditIntent::Backspace { caret } => {
                if *caret == 0 || *caret > len {
                    return None;
                }
                Some(Plan::Execute(Command::delete(caret - 1, 1)))
            }
            EditIntent::Delete { offset, count } => {
                let count = clamp_span(*offset, *count, len)?;
                Some(Plan::Execute(Command::delete(*offset, count)))
            }
            EditIntent::Cut { offset, count } => {
                let count = clamp_span(*offset, *count, len)?;
                let text = store.slice(*offset, count).ok()?;
                if let Err(e) = self.clipboard.cut(&text) {
                    log::warn!("Cut dropped, clipboard refused text: {:#}", e);
                    return None;
                }
                Some(Plan::Execute(Command::delete(*offset, count)))
            }
            EditIntent::Copy { offset, count } => {
                let count = clamp_span(*offset, *count, len)?;
                let text = store.slice(*offset, count).ok()?;
                if let Err(e) = self.clipboard.copy(&text) {
                    log::warn!("Copy dropped, clipboard refused text: {:#}", e);
                    return None;
                }
                Some(Plan::Copied)
            }
            EditIntent::Undo => Some(Plan::Undo),
            EditIntent::Redo => Some(Plan::Redo),
        }
    }
}

fn insertion(offset: usize, text: &str, len: usize) -> Option<Plan> {
    if offset > len || text.is_empty() {
        return None;
    }
    Some(Plan::Execute(Command::insert(offset, normalize_line_endings(text))))
}

/// Shrink `count` so the span ends inside the document. `None` if nothing is left.
fn clamp_span(offset: usize, count: usize, len: usize) -> Option<usize> {
    let count = count.min(len.checked_sub(offset)?);
    (count > 0).then_some(count)
}

/// `\r\n` and lone `\r` become `\n`, the only separator the store knows.
fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}
