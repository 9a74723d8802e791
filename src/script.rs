//! Line commands accepted on stdin by the headless driver.

use anyhow::{anyhow, bail, Context, Result};
use lineview_session::{BoundaryInput, EditIntent};

/// One parsed stdin line
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Input(BoundaryInput),
    Quit,
}

/// Usage text printed on `help` or a parse error
pub const HELP: &str = "\
commands:
  i OFFSET TEXT        insert TEXT at OFFSET
  bs CARET             delete the char before CARET
  del OFFSET COUNT     delete COUNT chars at OFFSET
  cut OFFSET COUNT     cut COUNT chars at OFFSET to the clipboard
  copy OFFSET COUNT    copy COUNT chars at OFFSET to the clipboard
  paste CARET [TEXT]   paste TEXT (or the clipboard) at CARET
  scroll POS HEIGHT    report a scroll position, expands past the threshold
  undo | redo | more | save | quit
TEXT understands \\n, \\t and \\\\";

/// Parse one command line.
pub fn parse(line: &str) -> Result<Step> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));

    let intent = match verb {
        "i" | "insert" => {
            let (offset, text) = split_number(rest)?;
            EditIntent::Insert {
                offset,
                text: unescape(text.context("Missing TEXT")?),
            }
        }
        "bs" | "backspace" => EditIntent::Backspace {
            caret: number(rest)?,
        },
        "del" | "delete" => {
            let (offset, count) = two_numbers(rest)?;
            EditIntent::Delete { offset, count }
        }
        "cut" => {
            let (offset, count) = two_numbers(rest)?;
            EditIntent::Cut { offset, count }
        }
        "copy" => {
            let (offset, count) = two_numbers(rest)?;
            EditIntent::Copy { offset, count }
        }
        "paste" => match split_number(rest)? {
            (caret, Some(text)) if !text.is_empty() => EditIntent::Paste {
                caret,
                text: unescape(text),
            },
            (caret, _) => EditIntent::PasteClipboard { caret },
        },
        "undo" => EditIntent::Undo,
        "redo" => EditIntent::Redo,
        "scroll" => {
            let (position, height) = rest
                .trim()
                .split_once(' ')
                .ok_or_else(|| anyhow!("Expected POS and HEIGHT"))?;
            return Ok(Step::Input(BoundaryInput::Scrolled {
                position: position.trim().parse().context("Bad scroll position")?,
                height: height.trim().parse().context("Bad scroll height")?,
            }));
        }
        "more" => return Ok(Step::Input(BoundaryInput::ExpandWindow)),
        "save" => return Ok(Step::Input(BoundaryInput::Save)),
        "quit" | "q" => return Ok(Step::Quit),
        "" => bail!("Empty command"),
        other => bail!("Unknown command: {}", other),
    };
    Ok(Step::Input(BoundaryInput::Edit(intent)))
}

fn number(text: &str) -> Result<usize> {
    let text = text.trim();
    text.parse()
        .with_context(|| format!("Expected a number, got {:?}", text))
}

/// Leading number plus the untouched remainder (if any)
fn split_number(text: &str) -> Result<(usize, Option<&str>)> {
    match text.split_once(' ') {
        Some((n, rest)) => Ok((number(n)?, Some(rest))),
        None => Ok((number(text)?, None)),
    }
}

fn two_numbers(text: &str) -> Result<(usize, usize)> {
    let (first, second) = text
        .trim()
        .split_once(' ')
        .ok_or_else(|| anyhow!("Expected two numbers"))?;
    Ok((number(first)?, number(second)?))
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
