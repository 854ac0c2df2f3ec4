//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::DEFAULT_API_BASE;
use crate::views::default_quiz_start;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub quiz: QuizConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Where the CLI keeps the session
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_dir")]
    pub dir: String,
}

fn default_session_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("birjuram").join("session").to_string_lossy().to_string())
        .unwrap_or_else(|| "./.birjuram/session".to_string())
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            dir: default_session_dir(),
        }
    }
}

/// Quiz week numbering
#[derive(Debug, Clone, Deserialize)]
pub struct QuizConfig {
    /// First day of week 1 when the roadmap has no start date
    #[serde(default = "default_quiz_start")]
    pub start_date: NaiveDate,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            start_date: default_quiz_start(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }

    /// Filter directive used when `RUST_LOG` is unset
    pub fn filter(&self) -> String {
        format!("birjuram={}", self.level)
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("birjuram").join("config.toml")),
            Some(PathBuf::from("./birjuram.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        Self::from_env()
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply `BIRJURAM_*` overrides from a variable lookup
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("BIRJURAM_API_URL") {
            self.api.base_url = url;
        }

        if let Some(dir) = var("BIRJURAM_SESSION_DIR") {
            self.session.dir = dir;
        }

        if let Some(start) = var("BIRJURAM_QUIZ_START") {
            match NaiveDate::parse_from_str(start.trim(), "%Y-%m-%d") {
                Ok(date) => self.quiz.start_date = date,
                Err(e) => tracing::warn!("Ignoring BIRJURAM_QUIZ_START={:?}: {}", start, e),
            }
        }

        if let Some(level) = var("BIRJURAM_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("BIRJURAM_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    format!(
        r#"# Birjuram Configuration
#
# Environment variables override these settings:
# - BIRJURAM_API_URL
# - BIRJURAM_SESSION_DIR
# - BIRJURAM_QUIZ_START
# - BIRJURAM_LOG_LEVEL
# - BIRJURAM_LOG_FORMAT

[api]
# Career guidance service
base_url = "{base_url}"

[session]
# Directory holding the saved token and user profile
dir = "{session_dir}"

[quiz]
# Week 1 starts on this date unless the roadmap has its own start date
start_date = "{quiz_start}"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty or json
format = "pretty"
"#,
        base_url = DEFAULT_API_BASE,
        session_dir = default_session_dir().replace('\\', "/"),
        quiz_start = default_quiz_start(),
    )
}
