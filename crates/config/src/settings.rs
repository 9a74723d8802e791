//! Configuration structures for lineview settings.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Application configuration with nested sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Line window settings
    #[serde(default)]
    pub viewport: ViewportSettings,

    /// Editing settings
    #[serde(default)]
    pub editor: EditorSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Line window settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewportSettings {
    /// Lines rendered right after opening a document
    #[serde(default = "default_initial_window")]
    pub initial_window: usize,

    /// Lines added per scroll expansion
    #[serde(default = "default_scroll_increment")]
    pub scroll_increment: usize,

    /// Scroll fraction (0.0..=1.0) that requests more content
    #[serde(default = "default_expand_threshold")]
    pub expand_threshold: f64,
}

/// Editing settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditorSettings {
    /// Maximum number of undo steps
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Write the document back after every edit
    #[serde(default)]
    pub autosave: bool,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSettings {
    /// Log file path (optional)
    #[serde(default)]
    pub file_path: Option<String>,

    /// Minimum log level (debug, info, warn, error)
    #[serde(default = "default_min_level")]
    pub min_level: String,

    /// Log entries kept in memory
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

// Default value functions for serde
fn default_initial_window() -> usize {
    defaults::INITIAL_WINDOW
}

fn default_scroll_increment() -> usize {
    defaults::SCROLL_INCREMENT
}

fn default_expand_threshold() -> f64 {
    defaults::EXPAND_THRESHOLD
}

fn default_history_limit() -> usize {
    defaults::HISTORY_LIMIT
}

fn default_min_level() -> String {
    defaults::MIN_LOG_LEVEL.to_string()
}

fn default_max_entries() -> usize {
    defaults::MAX_LOG_ENTRIES
}

// Default implementations
impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            initial_window: default_initial_window(),
            scroll_increment: default_scroll_increment(),
            expand_threshold: default_expand_threshold(),
        }
    }
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            autosave: false,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file_path: None,
            min_level: default_min_level(),
            max_entries: default_max_entries(),
        }
    }
}
