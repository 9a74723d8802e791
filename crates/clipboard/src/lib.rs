//! Clipboard collaborators for lineview.
//!
//! [`SystemClipboard`] talks to the OS clipboard through arboard. On Linux it
//! writes both CLIPBOARD and PRIMARY selections. [`MemoryClipboard`] keeps the
//! text in process for headless runs and tests.

use anyhow::{anyhow, bail, Result};
use arboard::Clipboard;

#[cfg(target_os = "linux")]
use arboard::{GetExtLinux, LinuxClipboardKind, SetExtLinux};

/// Where cut text goes and pasted text comes from.
pub trait ClipboardProvider {
    /// Store text. Fails on empty text.
    fn copy(&mut self, text: &str) -> Result<()>;

    /// Current clipboard text, if any.
    fn paste(&mut self) -> Option<String>;

    /// Same as copy - actual deletion is handled by the caller.
    fn cut(&mut self, text: &str) -> Result<()> {
        self.copy(text)
    }

    /// Check if clipboard contains text.
    fn has_text(&mut self) -> bool {
        self.paste().is_some_and(|t| !t.is_empty())
    }
}

/// OS clipboard
pub struct SystemClipboard {
    inner: Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let inner =
            Clipboard::new().map_err(|e| anyhow!("Failed to initialize clipboard: {}", e))?;
        Ok(Self { inner })
    }
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard").finish_non_exhaustive()
    }
}

impl ClipboardProvider for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            bail!("Cannot copy empty text");
        }

        #[cfg(target_os = "linux")]
        {
            // Copy to CLIPBOARD selection (Ctrl+C/V)
            self.inner
                .set()
                .clipboard(LinuxClipboardKind::Clipboard)
                .text(text.to_string())
                .map_err(|e| anyhow!("Failed to set clipboard text: {}", e))?;

            // Copy to PRIMARY selection (middle-click/Shift+Insert)
            let _ = self
                .inner
                .set()
                .clipboard(LinuxClipboardKind::Primary)
                .text(text.to_string());
        }

        #[cfg(not(target_os = "linux"))]
        self.inner
            .set_text(text)
            .map_err(|e| anyhow!("Failed to set clipboard text: {}", e))?;

        Ok(())
    }

    /// On Linux, tries CLIPBOARD selection first, then falls back to PRIMARY.
    fn paste(&mut self) -> Option<String> {
        #[cfg(target_os = "linux")]
        {
            if let Ok(text) = self
                .inner
                .get()
                .clipboard(LinuxClipboardKind::Clipboard)
                .text()
            {
                if !text.is_empty() {
                    return Some(text);
                }
            }

            self.inner
                .get()
                .clipboard(LinuxClipboardKind::Primary)
                .text()
                .ok()
        }

        #[cfg(not(target_os = "linux"))]
        self.inner.get_text().ok()
    }
}

/// In-process clipboard
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    text: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last copied text without consuming it
    pub fn contents(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl ClipboardProvider for MemoryClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            bail!("Cannot copy empty text");
        }
        self.text = Some(text.to_string());
        Ok(())
    }

    fn paste(&mut self) -> Option<String> {
        self.text.clone()
    }
}

impl<C: ClipboardProvider + ?Sized> ClipboardProvider for Box<C> {
    fn copy(&mut self, text: &str) -> Result<()> {
        (**self).copy(text)
    }

    fn paste(&mut self) -> Option<String> {
        (**self).paste()
    }
}
