use anyhow::{bail, Result};
use ropey::Rope;

/// Line-indexed text container the command engine mutates.
///
/// Offsets and counts are measured in chars. Lines are 1-based and only `\n`
/// separates them, so a document always has `count('\n') + 1` lines.
pub trait TextStore {
    /// Insert `text` so that its first char lands at `offset`.
    fn insert(&mut self, offset: usize, text: &str) -> Result<()>;

    /// Remove `count` chars starting at `offset` and return them.
    fn delete(&mut self, offset: usize, count: usize) -> Result<String>;

    /// Content of a 1-based line without its terminator.
    fn line_content(&self, line: usize) -> Option<String>;

    /// Total number of lines (never zero).
    fn line_count(&self) -> usize;

    /// Total length in chars.
    fn len_chars(&self) -> usize;

    /// Copy of `count` chars starting at `offset`.
    fn slice(&self, offset: usize, count: usize) -> Result<String>;

    /// 1-based line that contains the char at `offset`.
    /// `offset == len_chars()` maps to the last line.
    fn line_of_offset(&self, offset: usize) -> usize;

    /// Whole document. Cost grows with document size.
    fn text(&self) -> String;

    fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }
}

/// Text store based on Rope for efficient work with large files
#[derive(Debug, Clone, Default)]
pub struct RopeStore {
    rope: Rope,
}

impl RopeStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from already normalized text (`\n` line endings)
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    fn check_range(&self, offset: usize, count: usize) -> Result<()> {
        let len = self.rope.len_chars();
        match offset.checked_add(count) {
            Some(end) if end <= len => Ok(()),
            _ => bail!("Range {}+{} out of bounds (length {})", offset, count, len),
        }
    }
}

impl TextStore for RopeStore {
    fn insert(&mut self, offset: usize, text: &str) -> Result<()> {
        self.check_range(offset, 0)?;
        self.rope.insert(offset, text);
        Ok(())
    }

    fn delete(&mut self, offset: usize, count: usize) -> Result<String> {
        self.check_range(offset, count)?;
        let removed = self.rope.slice(offset..offset + count).to_string();
        self.rope.remove(offset..offset + count);
        Ok(removed)
    }

    fn line_content(&self, line: usize) -> Option<String> {
        if line == 0 || line > self.rope.len_lines() {
            return None;
        }
        let mut content = self.rope.line(line - 1).to_string();
        if content.ends_with('\n') {
            content.pop();
        }
        Some(content)
    }

    fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn slice(&self, offset: usize, count: usize) -> Result<String> {
        self.check_range(offset, count)?;
        Ok(self.rope.slice(offset..offset + count).to_string())
    }

    fn line_of_offset(&self, offset: usize) -> usize {
        self.rope.char_to_line(offset.min(self.rope.len_chars())) + 1
    }

    fn text(&self) -> String {
        self.rope.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store() {
        let store = RopeStore::new();
        assert_eq!(store.line_count(), 1);
        assert_eq!(store.len_chars(), 0);
        assert_eq!(store.line_content(1).as_deref(), Some(""));
        assert!(store.is_empty());
    }

    #[test]
    fn test_lines_are_one_based() {
        let store = RopeStore::from_text("abc\ndef");
        assert_eq!(store.line_count(), 2);
        assert_eq!(store.line_content(0), None);
        assert_eq!(store.line_content(1).as_deref(), Some("abc"));
        assert_eq!(store.line_content(2).as_deref(), Some("def"));
        assert_eq!(store.line_content(3), None);
    }

    #[test]
    fn test_trailing_newline_adds_empty_line() {
        let store = RopeStore::from_text("abc\n");
        assert_eq!(store.line_count(), 2);
        assert_eq!(store.line_content(2).as_deref(), Some(""));
    }

    #[test]
    fn test_carriage_return_is_not_a_separator() {
        let store = RopeStore::from_text("a\rb");
        assert_eq!(store.line_count(), 1);
        assert_eq!(store.line_content(1).as_deref(), Some("a\rb"));
    }

    #[test]
    fn test_insert_and_delete() {
        let mut store = RopeStore::from_text("hello world");
        store.insert(5, ",").unwrap();
        assert_eq!(store.text(), "hello, world");

        let removed = store.delete(5, 7).unwrap();
        assert_eq!(removed, ", world");
        assert_eq!(store.text(), "hello");
    }

    #[test]
    fn test_multibyte_offsets_are_chars() {
        let mut store = RopeStore::from_text("héllo");
        assert_eq!(store.len_chars(), 5);
        let removed = store.delete(1, 1).unwrap();
        assert_eq!(removed, "é");
        assert_eq!(store.text(), "hllo");
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let mut store = RopeStore::from_text("abc");
        assert!(store.insert(4, "x").is_err());
        assert!(store.delete(2, 2).is_err());
        assert!(store.delete(usize::MAX, 2).is_err());
        assert!(store.slice(3, 1).is_err());
        assert_eq!(store.text(), "abc");
    }

    #[test]
    fn test_line_of_offset() {
        let store = RopeStore::from_text("ab\ncd\n");
        assert_eq!(store.line_of_offset(0), 1);
        assert_eq!(store.line_of_offset(2), 1);
        assert_eq!(store.line_of_offset(3), 2);
        assert_eq!(store.line_of_offset(6), 3);
        assert_eq!(store.line_of_offset(100), 3);
    }
}
