//! File loading and saving for document sessions.

use std::path::Path;

use anyhow::{Context, Result};

/// Line ending type (for saving)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::upper_case_acronyms)]
pub enum LineEnding {
    #[default]
    LF, // Unix \n
    CRLF, // Windows \r\n
}

/// File contents with `\n` line endings and the ending found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedText {
    pub text: String,
    pub line_ending: LineEnding,
}

/// Read a UTF-8 file and normalize `\r\n` to `\n`.
///
/// A file counts as CRLF only when every `\n` is preceded by `\r`. Files with
/// mixed endings load as LF with their `\r` bytes kept in the text, so saving
/// without edits writes them back unchanged.
pub fn read_document(path: &Path) -> Result<LoadedText> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    if detect_line_ending(&contents) == LineEnding::CRLF {
        Ok(LoadedText {
            text: contents.replace("\r\n", "\n"),
            line_ending: LineEnding::CRLF,
        })
    } else {
        Ok(LoadedText {
            text: contents,
            line_ending: LineEnding::LF,
        })
    }
}

fn detect_line_ending(contents: &str) -> LineEnding {
    let newlines = contents.matches('\n').count();
    if newlines > 0 && contents.matches("\r\n").count() == newlines {
        LineEnding::CRLF
    } else {
        LineEnding::LF
    }
}

/// Write text back, converting `\n` to the requested line ending.
pub fn write_document(path: &Path, text: &str, line_ending: LineEnding) -> Result<()> {
    let result = match line_ending {
        LineEnding::LF => std::fs::write(path, text),
        LineEnding::CRLF => std::fs::write(path, text.replace('\n', "\r\n")),
    };
    result.with_context(|| format!("Failed to write file: {}", path.display()))
}

/// Create (or truncate) an empty file.
pub fn create_empty(path: &Path) -> Result<()> {
    std::fs::write(path, "").with_context(|| format!("Failed to create file: {}", path.display()))
}
