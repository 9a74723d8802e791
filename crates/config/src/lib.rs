//! Configuration management for lineview.
//!
//! This crate provides configuration loading, saving, and validation
//! with support for TOML format and XDG directory conventions.

mod settings;
mod xdg;

pub use settings::{Config, EditorSettings, LoggingSettings, ViewportSettings};
pub use xdg::{get_cache_dir, get_config_dir};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default values as constants
pub mod defaults {
    pub const INITIAL_WINDOW: usize = 50;
    pub const SCROLL_INCREMENT: usize = 20;
    pub const EXPAND_THRESHOLD: f64 = 0.8;
    pub const HISTORY_LIMIT: usize = 1000;
    pub const MIN_LOG_LEVEL: &str = "info";
    pub const MAX_LOG_ENTRIES: usize = 500;
    pub const LOG_FILE_NAME: &str = "lineview.log";
}

impl Config {
    /// Load configuration from the XDG config file.
    ///
    /// On first run, creates config file with default values.
    /// Auto-completes missing keys with default values.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load configuration from an explicit path (same rules as [`Config::load`]).
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let original_content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
        let config = Self::validate_content(&original_content)?;

        // Serialize back to get normalized content
        let normalized_content = toml::to_string_pretty(&config)?;

        // If content changed, save the updated config
        if original_content != normalized_content {
            config.save_to(config_path)?;
        }

        Ok(config)
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        Ok(())
    }

    /// Get path to config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(get_config_dir()?.join("config.toml"))
    }

    /// Log file path: the configured one, or one in the cache directory.
    pub fn log_file_path(&self) -> Result<PathBuf> {
        match &self.logging.file_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => Ok(get_cache_dir()?.join(defaults::LOG_FILE_NAME)),
        }
    }

    /// Validate config content.
    pub fn validate_content(content: &str) -> Result<Config> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("{}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.viewport.initial_window, 50);
        assert_eq!(config.viewport.scroll_increment, 20);
        assert_eq!(config.editor.history_limit, 1000);
        assert!(!config.editor.autosave);
        assert_eq!(config.logging.min_level, "info");
    }

    #[test]
    fn test_partial_content_is_completed() {
        let config = Config::validate_content("[viewport]\ninitial_window = 10\n").unwrap();
        assert_eq!(config.viewport.initial_window, 10);
        assert_eq!(config.viewport.scroll_increment, 20);
        assert_eq!(config.editor, EditorSettings::default());
    }

    #[test]
    fn test_invalid_content_is_rejected() {
        assert!(Config::validate_content("[viewport]\ninitial_window = \"many\"\n").is_err());
    }

    #[test]
    fn test_first_load_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn test_load_normalizes_missing_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[editor]\nautosave = true\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.editor.autosave);

        let rewritten = std::fs::read_to_string(&path).unwrap();
        assert!(rewritten.contains("history_limit"));
        assert!(rewritten.contains("initial_window"));
    }

    #[test]
    fn test_explicit_log_file_path() {
        let mut config = Config::default();
        config.logging.file_path = Some("/tmp/lineview-test.log".to_string());
        assert_eq!(
            config.log_file_path().unwrap(),
            PathBuf::from("/tmp/lineview-test.log")
        );
    }
}
