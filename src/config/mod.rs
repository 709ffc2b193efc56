//! Configuration file support
//!
//! Handles parsing of the INI configuration files passed to the exporter and
//! environment variable overrides for credentials.

pub mod jira;
pub mod polarion;

use ini::{Ini, Properties};
use std::path::Path;

pub use jira::JiraConfig;
pub use polarion::{PolarionConfig, sample_config};

/// Error raised while reading a configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Failed to parse config: {0}")]
    ParseError(String),
    #[error("Missing [{0}] section")]
    MissingSection(String),
    #[error("Missing key '{1}' in [{0}] section")]
    MissingKey(String, String),
    #[error("Invalid value for '{1}' in [{0}] section: {2}")]
    InvalidValue(String, String, String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

pub(crate) fn read_ini(path: &Path) -> ConfigResult<Ini> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::IoError(format!("Failed to read {}: {}", path.display(), e))
    })?;
    parse_ini(&content)
}

pub(crate) fn parse_ini(content: &str) -> ConfigResult<Ini> {
    Ini::load_from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// A named section of a parsed INI document
pub(crate) struct Section<'a> {
    name: &'static str,
    props: &'a Properties,
}

impl<'a> Section<'a> {
    pub(crate) fn find(ini: &'a Ini, name: &'static str) -> Option<Self> {
        ini.section(Some(name)).map(|props| Self { name, props })
    }

    pub(crate) fn require(ini: &'a Ini, name: &'static str) -> ConfigResult<Self> {
        Self::find(ini, name).ok_or_else(|| ConfigError::MissingSection(name.to_string()))
    }

    pub(crate) fn required(&self, key: &str) -> ConfigResult<String> {
        self.props
            .get(key)
            .map(|v| v.trim().to_string())
            .ok_or_else(|| ConfigError::MissingKey(self.name.to_string(), key.to_string()))
    }

    pub(crate) fn optional(&self, key: &str) -> Option<String> {
        self.props
            .get(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Boolean key, `default` when absent
    ///
    /// Accepts the usual INI spellings: `1/0`, `yes/no`, `true/false`, `on/off`.
    pub(crate) fn flag(&self, key: &str, default: bool) -> ConfigResult<bool> {
        let Some(value) = self.optional(key) else {
            return Ok(default);
        };
        match value.to_lowercase().as_str() {
            "1" | "yes" | "true" | "on" => Ok(true),
            "0" | "no" | "false" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue(
                self.name.to_string(),
                key.to_string(),
                value,
            )),
        }
    }
}
