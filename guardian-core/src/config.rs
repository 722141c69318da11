//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/health-guardian/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/health-guardian/` (~/.config/health-guardian/)
//! - State/Logs: `$XDG_STATE_HOME/health-guardian/` (~/.local/state/health-guardian/)
//!
//! Nothing else is written to disk; readings live only in memory.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Directory name used under the XDG base directories.
const APP_DIR: &str = "health-guardian";

/// Primary environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "API_KEY";

/// Fallback environment variable holding the Gemini API key.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Gemini backend configuration
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Dashboard configuration
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Gemini backend configuration
#[derive(Debug, Deserialize, Clone)]
pub struct GeminiConfig {
    /// API key (the `API_KEY` / `GEMINI_API_KEY` env vars take precedence)
    pub api_key: Option<String>,

    /// API base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model used for structured meal analysis
    #[serde(default = "default_model")]
    pub analysis_model: String,

    /// Model used for the health assistant conversation
    #[serde(default = "default_model")]
    pub chat_model: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_endpoint(),
            analysis_model: default_model(),
            chat_model: default_model(),
            timeout_secs: default_timeout(),
        }
    }
}

impl GeminiConfig {
    /// Resolve the API key from the process environment, then the config file.
    ///
    /// A missing key is a configuration error; callers treat it as fatal.
    pub fn resolve_api_key(&self) -> Result<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    /// Resolve the API key using a custom environment lookup.
    pub fn resolve_api_key_with<F>(&self, lookup: F) -> Result<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &String| !key.trim().is_empty();
        [API_KEY_ENV, GEMINI_API_KEY_ENV]
            .iter()
            .find_map(|name| lookup(name).filter(present))
            .or_else(|| self.api_key.clone().filter(present))
            .ok_or_else(|| Error::Config(format!("{API_KEY_ENV} environment variable not set")))
    }
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_timeout() -> u64 {
    60
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

/// Dashboard configuration
#[derive(Debug, Deserialize)]
pub struct DashboardConfig {
    /// Pre-populate the store with demonstration readings at startup
    #[serde(default = "default_seed_demo_data")]
    pub seed_demo_data: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            seed_demo_data: default_seed_demo_data(),
        }
    }
}

fn default_seed_demo_data() -> bool {
    true
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/health-guardian/config.toml` (~/.config/health-guardian/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join(APP_DIR).join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/health-guardian/` (~/.local/state/health-guardian/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join(APP_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.gemini.api_key.is_none());
        assert_eq!(config.gemini.analysis_model, "gemini-2.5-flash");
        assert_eq!(config.gemini.chat_model, "gemini-2.5-flash");
        assert_eq!(config.gemini.timeout_secs, 60);
        assert_eq!(config.logging.level, "info");
        assert!(config.dashboard.seed_demo_data);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[gemini]
api_key = "from-file"
chat_model = "gemini-2.0-flash"
timeout_secs = 15

[logging]
level = "debug"

[dashboard]
seed_demo_data = false
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.gemini.api_key.as_deref(), Some("from-file"));
        assert_eq!(config.gemini.chat_model, "gemini-2.0-flash");
        assert_eq!(config.gemini.analysis_model, "gemini-2.5-flash");
        assert_eq!(config.gemini.timeout_secs, 15);
        assert_eq!(
            config.gemini.endpoint,
            "https://generativelanguage.googleapis.com/v1beta"
        );
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.max_files, 5);
        assert!(!config.dashboard.seed_demo_data);
    }

    #[test]
    fn test_api_key_prefers_env_over_file() {
        let config = GeminiConfig {
            api_key: Some("from-file".to_string()),
            ..Default::default()
        };

        let key = config
            .resolve_api_key_with(|name| (name == API_KEY_ENV).then(|| "from-env".to_string()))
            .unwrap();
        assert_eq!(key, "from-env");

        let key = config
            .resolve_api_key_with(|name| {
                (name == GEMINI_API_KEY_ENV).then(|| "from-gemini-env".to_string())
            })
            .unwrap();
        assert_eq!(key, "from-gemini-env");

        let key = config.resolve_api_key_with(|_| None).unwrap();
        assert_eq!(key, "from-file");
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let config = GeminiConfig::default();
        let err = config.resolve_api_key_with(|_| None).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("API_KEY environment variable not set"));

        // Blank values count as missing
        let err = config
            .resolve_api_key_with(|_| Some("   ".to_string()))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_blank_env_key_falls_through() {
        let config = GeminiConfig {
            api_key: Some("from-file".to_string()),
            ..Default::default()
        };

        let key = config
            .resolve_api_key_with(|name| match name {
                API_KEY_ENV => Some(String::new()),
                GEMINI_API_KEY_ENV => Some("real-key".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(key, "real-key");

        let key = config
            .resolve_api_key_with(|_| Some(" ".to_string()))
            .unwrap();
        assert_eq!(key, "from-file");

        let blank_file = GeminiConfig {
            api_key: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            blank_file.resolve_api_key_with(|_| None),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.logging.level, "warn");

        std::fs::write(&path, "[logging\nlevel = ").unwrap();
        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }
}
