//! Configuration for which-key sessions.
//!
//! Configuration is loaded from `<config dir>/whichkey/config.toml` (on Linux
//! `~/.config/whichkey/config.toml`) and selects the curation strategy, the
//! leader and cancel keys, and logging settings.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use whichkey_core::{CurationStrategy, KeyCode};

/// Configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WhichKeyConfig {
    pub curation: CurationConfig,
    pub keys: KeysConfig,
    pub logging: LoggingConfig,
}

/// Which strategy builds the active trie.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CurationConfig {
    pub strategy: CurationStrategy,
}

/// Keys that start and abort a recording.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeysConfig {
    pub leader: KeyCode,
    pub cancel: KeyCode,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_file: Option<PathBuf>,
    pub level: String,
    pub suppressed_patterns: Vec<String>,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            leader: KeyCode::Char(' '),
            cancel: KeyCode::Esc,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_file: None,
            level: "info".to_string(),
            suppressed_patterns: Vec::new(),
        }
    }
}

impl WhichKeyConfig {
    /// Path of the default configuration file, if the platform has a config dir.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("whichkey").join("config.toml"))
    }

    /// Load configuration from the default location.
    ///
    /// Falls back to defaults if the file doesn't exist.
    /// Returns an error only if the file exists but is malformed.
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = toml::from_str::<WhichKeyConfig>(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Set the curation strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: CurationStrategy) -> Self {
        self.curation.strategy = strategy;
        self
    }

    /// Set the leader key.
    #[must_use]
    pub fn with_leader(mut self, leader: KeyCode) -> Self {
        self.keys.leader = leader;
        self
    }

    /// Set the log file path.
    #[must_use]
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.logging.log_file = Some(path.into());
        self
    }

    /// Set the log level (e.g., "info", "debug", "warn").
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging.level = level.into();
        self
    }
}
