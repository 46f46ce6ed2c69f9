//! Configuration for the textguard agent.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the monitoring agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the append-only log files.
    pub log_dir: PathBuf,

    /// Directory screenshots are written into.
    pub screenshot_dir: PathBuf,

    /// Path to the classifier model artifact.
    pub model_path: PathBuf,

    /// Clipboard poll interval in seconds.
    pub poll_interval_secs: u64,

    /// Which input sources to monitor.
    pub sources: SourceConfig,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("textguard-agent");

        Self {
            log_dir: data_dir.join("logs"),
            screenshot_dir: data_dir.join("screens"),
            model_path: data_dir.join("suspicious_classifier.json"),
            poll_interval_secs: 1,
            sources: SourceConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::IoError(e.to_string()))?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(&config_path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("textguard-agent")
            .join("config.json")
    }

    /// Ensure log and screenshot directories exist. The model artifact is
    /// deliberately not created here; a missing model is a fatal startup
    /// error, not something to paper over.
    pub fn ensure_directories(&self) -> Result<(), ConfigError> {
        std::fs::create_dir_all(&self.log_dir).map_err(|e| ConfigError::IoError(e.to_string()))?;
        std::fs::create_dir_all(&self.screenshot_dir)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Ok(())
    }

    pub fn keystroke_log_path(&self) -> PathBuf {
        self.log_dir.join("logs.txt")
    }

    pub fn clipboard_log_path(&self) -> PathBuf {
        self.log_dir.join("clipboard_logs.txt")
    }

    pub fn alert_log_path(&self) -> PathBuf {
        self.log_dir.join("alert_logs.txt")
    }

    pub fn stats_path(&self) -> PathBuf {
        self.log_dir.join("session_stats.json")
    }
}

/// Configuration for which input sources to monitor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub keyboard: bool,
    pub clipboard: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            keyboard: true,
            clipboard: true,
        }
    }
}

impl SourceConfig {
    /// Parse source configuration from a comma-separated string.
    pub fn from_csv(s: &str) -> Self {
        let sources: Vec<String> = s.split(',').map(|s| s.trim().to_lowercase()).collect();

        Self {
            keyboard: sources.iter().any(|s| s == "keyboard" || s == "all"),
            clipboard: sources.iter().any(|s| s == "clipboard" || s == "all"),
        }
    }

    /// Check if at least one source is enabled.
    pub fn any_enabled(&self) -> bool {
        self.keyboard || self.clipboard
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::ParseError(e) => write!(f, "Parse error: {e}"),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}
