use std::fmt;

use anyhow::Result;

use super::command::Footprint;
use super::{Command, TextStore};

/// Default maximum number of commands kept for undo
pub const DEFAULT_HISTORY_LIMIT: usize = 1000;

/// The store reported a state that does not match the edit just applied.
///
/// Every later offset depends on the store being consistent, so the session
/// that owns the store cannot continue after this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreContractViolation {
    pub expected_len: usize,
    pub actual_len: usize,
    pub expected_lines: usize,
    pub actual_lines: usize,
}

impl fmt::Display for StoreContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Store contract violated: length {} (expected {}), lines {} (expected {})",
            self.actual_len, self.expected_len, self.actual_lines, self.expected_lines
        )
    }
}

impl std::error::Error for StoreContractViolation {}

/// Executes commands against a store and keeps undo/redo stacks
#[derive(Debug, Clone)]
pub struct CommandEngine<S> {
    store: S,
    /// Executed commands, most recent last
    undo_stack: Vec<Command>,
    /// Undone commands, most recent last
    redo_stack: Vec<Command>,
    /// Maximum undo depth
    max_size: usize,
}

impl<S: TextStore> CommandEngine<S> {
    pub fn new(store: S) -> Self {
        Self::with_capacity(store, DEFAULT_HISTORY_LIMIT)
    }

    /// Create engine with specified undo depth
    pub fn with_capacity(store: S, max_size: usize) -> Self {
        Self {
            store,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size: max_size.max(1),
        }
    }

    /// Run a new command. Clears the redo stack.
    pub fn execute(&mut self, mut command: Command) -> Result<()> {
        let len_before = self.store.len_chars();
        let footprint = self.checked(|store| command.apply(store))?;
        if let Command::Delete { count, .. } = &command {
            if footprint.chars_removed != *count {
                let lines = self.store.line_count();
                return Err(StoreContractViolation {
                    expected_len: len_before.saturating_sub(*count),
                    actual_len: self.store.len_chars(),
                    expected_lines: lines,
                    actual_lines: lines,
                }
                .into());
            }
        }

        self.redo_stack.clear();
        self.undo_stack.push(command);
        if self.undo_stack.len() > self.max_size {
            self.undo_stack.remove(0);
        }
        Ok(())
    }

    /// Revert the most recent command. `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Result<Option<&Command>> {
        let Some(command) = self.undo_stack.pop() else {
            return Ok(None);
        };
        if let Err(e) = self.checked(|store| command.revert(store)) {
            self.undo_stack.push(command);
            return Err(e);
        }
        self.redo_stack.push(command);
        Ok(self.redo_stack.last())
    }

    /// Re-run the most recently undone command. `None` when there is nothing to redo.
    pub fn redo(&mut self) -> Result<Option<&Command>> {
        let Some(mut command) = self.redo_stack.pop() else {
            return Ok(None);
        };
        if let Err(e) = self.checked(|store| command.apply(store)) {
            self.redo_stack.push(command);
            return Err(e);
        }
        self.undo_stack.push(command);
        Ok(self.undo_stack.last())
    }

    /// Full document text (diagnostics and tests)
    pub fn document(&self) -> String {
        self.store.text()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Run a mutation and check that length and line count moved by exactly
    /// what the mutation reports.
    fn checked(&mut self, mutate: impl FnOnce(&mut S) -> Result<Footprint>) -> Result<Footprint> {
        let len_before = self.store.len_chars();
        let lines_before = self.store.line_count();
        let footprint = mutate(&mut self.store)?;

        let expected_len =
            (len_before + footprint.chars_added).saturating_sub(footprint.chars_removed);
        let expected_lines =
            (lines_before + footprint.lines_added).saturating_sub(footprint.lines_removed);
        let actual_len = self.store.len_chars();
        let actual_lines = self.store.line_count();
        if expected_len != actual_len || expected_lines != actual_lines {
            return Err(StoreContractViolation {
                expected_len,
                actual_len,
                expected_lines,
                actual_lines,
            }
            .into());
        }
        Ok(footprint)
    }
}
