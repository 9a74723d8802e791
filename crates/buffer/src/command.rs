use anyhow::Result;

use super::TextStore;

/// Reversible edit against a [`TextStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Text insertion at a char offset
    Insert { offset: usize, text: String },
    /// Deletion of `count` chars at a char offset.
    ///
    /// `captured` holds the removed text and is filled by the first forward
    /// run; later runs never overwrite it.
    Delete {
        offset: usize,
        count: usize,
        captured: Option<String>,
    },
}

/// Length and line changes produced by one application of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Footprint {
    pub chars_added: usize,
    pub chars_removed: usize,
    pub lines_added: usize,
    pub lines_removed: usize,
}

impl Command {
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Command::Insert {
            offset,
            text: text.into(),
        }
    }

    pub fn delete(offset: usize, count: usize) -> Self {
        Command::Delete {
            offset,
            count,
            captured: None,
        }
    }

    /// Offset where the edit starts
    pub fn offset(&self) -> usize {
        match self {
            Command::Insert { offset, .. } | Command::Delete { offset, .. } => *offset,
        }
    }

    /// Text removed by a delete, once it has run
    pub fn captured(&self) -> Option<&str> {
        match self {
            Command::Delete { captured, .. } => captured.as_deref(),
            Command::Insert { .. } => None,
        }
    }

    /// Caret after the forward action (execute or redo)
    pub fn caret_after_apply(&self) -> usize {
        match self {
            Command::Insert { offset, text } => offset + text.chars().count(),
            Command::Delete { offset, .. } => *offset,
        }
    }

    /// Caret after the inverse action (undo)
    pub fn caret_after_revert(&self) -> usize {
        match self {
            Command::Insert { offset, .. } => *offset,
            Command::Delete {
                offset, captured, ..
            } => offset + captured.as_deref().map_or(0, |t| t.chars().count()),
        }
    }

    /// Run the forward action
    pub(crate) fn apply<S: TextStore + ?Sized>(&mut self, store: &mut S) -> Result<Footprint> {
        match self {
            Command::Insert { offset, text } => {
                store.insert(*offset, text)?;
                Ok(Footprint::added(text))
            }
            Command::Delete {
                offset,
                count,
                captured,
            } => {
                let removed = store.delete(*offset, *count)?;
                let footprint = Footprint::removed(&removed);
                if let Some(first) = captured.as_deref() {
                    if first != removed {
                        log::warn!(
                            "Delete at {} removed different text on redo ({} vs {} chars)",
                            offset,
                            removed.chars().count(),
                            first.chars().count()
                        );
                    }
                } else {
                    *captured = Some(removed);
                }
                Ok(footprint)
            }
        }
    }

    /// Run the inverse action
    pub(crate) fn revert<S: TextStore + ?Sized>(&self, store: &mut S) -> Result<Footprint> {
        match self {
            Command::Insert { offset, text } => {
                let removed = store.delete(*offset, text.chars().count())?;
                Ok(Footprint::removed(&removed))
            }
            Command::Delete {
                offset, captured, ..
            } => {
                let text = captured.as_deref().unwrap_or_default();
                store.insert(*offset, text)?;
                Ok(Footprint::added(text))
            }
        }
    }
}

impl Footprint {
    fn added(text: &str) -> Self {
        Self {
            chars_added: text.chars().count(),
            chars_removed: 0,
            lines_added: newlines(text),
            lines_removed: 0,
        }
    }

    fn removed(text: &str) -> Self {
        Self {
            chars_added: 0,
            chars_removed: text.chars().count(),
            lines_added: 0,
            lines_removed: newlines(text),
        }
    }
}

fn newlines(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RopeStore;

    #[test]
    fn test_insert_apply_revert() {
        let mut store = RopeStore::from_text("abc\ndef");
        let mut cmd = Command::insert(3, "X");

        cmd.apply(&mut store).unwrap();
        assert_eq!(store.text(), "abcX\ndef");

        cmd.revert(&mut store).unwrap();
        assert_eq!(store.text(), "abc\ndef");
    }

    #[test]
    fn test_delete_captures_on_first_apply() {
        let mut store = RopeStore::from_text("hello world");
        let mut cmd = Command::delete(5, 6);
        assert_eq!(cmd.captured(), None);

        cmd.apply(&mut store).unwrap();
        assert_eq!(cmd.captured(), Some(" world"));
        assert_eq!(store.text(), "hello");

        cmd.revert(&mut store).unwrap();
        assert_eq!(store.text(), "hello world");
    }

    #[test]
    fn test_captured_text_is_not_recomputed() {
        let mut store = RopeStore::from_text("hello world");
        let mut cmd = Command::delete(0, 5);
        cmd.apply(&mut store).unwrap();
        cmd.revert(&mut store).unwrap();

        // Content under the span changes between runs
        store.delete(0, 5).unwrap();
        store.insert(0, "HOWDY").unwrap();

        cmd.apply(&mut store).unwrap();
        assert_eq!(cmd.captured(), Some("hello"));
        cmd.revert(&mut store).unwrap();
        assert_eq!(store.text(), "hello world");
    }

    #[test]
    fn test_footprint_counts_lines() {
        let mut store = RopeStore::from_text("a\nb\nc");
        let mut cmd = Command::delete(1, 3);
        let footprint = cmd.apply(&mut store).unwrap();
        assert_eq!(footprint.chars_removed, 3);
        assert_eq!(footprint.lines_removed, 2);
        assert_eq!(store.text(), "ac");
    }

    #[test]
    fn test_carets() {
        let insert = Command::insert(2, "ñx");
        assert_eq!(insert.caret_after_apply(), 4);
        assert_eq!(insert.caret_after_revert(), 2);

        let mut store = RopeStore::from_text("hello");
        let mut delete = Command::delete(1, 3);
        delete.apply(&mut store).unwrap();
        assert_eq!(delete.caret_after_apply(), 1);
        assert_eq!(delete.caret_after_revert(), 4);
    }
}
