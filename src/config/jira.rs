//! `[jira]` section of the exporter configuration
//!
//! The section may live in the main configuration file or in a separate file
//! passed with `--jira-config`.

use super::{ConfigResult, Section, parse_ini, read_ini};
use std::path::Path;

/// Section name holding the JIRA settings
pub const SECTION: &str = "jira";

/// Environment variable overriding the JIRA username
pub const ENV_JIRA_USERNAME: &str = "FMF_JIRA_USERNAME";

/// Environment variable overriding the JIRA password
pub const ENV_JIRA_PASSWORD: &str = "FMF_JIRA_PASSWORD";

/// JIRA connection settings and the custom field ids touched on each issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JiraConfig {
    pub project: String,
    pub url: String,
    pub username: String,
    pub password: String,
    /// Custom field holding the linked test case work item URLs
    pub testcase_work_item: String,
    /// Custom field holding the QE test coverage flag
    pub qe_test_coverage: String,
    /// Custom field holding the "verified in release" flag, when used
    pub verified_in_release: Option<String>,
}

impl JiraConfig {
    /// Load the `[jira]` section from an INI file, then apply env overrides
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let ini = read_ini(path)?;
        let mut config = Self::from_section(&Section::require(&ini, SECTION)?)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Like `load`, but `None` when the file has no `[jira]` section
    pub fn load_optional(path: &Path) -> ConfigResult<Option<Self>> {
        let ini = read_ini(path)?;
        let Some(section) = Section::find(&ini, SECTION) else {
            return Ok(None);
        };
        let mut config = Self::from_section(&section)?;
        config.apply_env_overrides();
        Ok(Some(config))
    }

    /// Parse the `[jira]` section from INI text
    pub fn parse(content: &str) -> ConfigResult<Self> {
        let ini = parse_ini(content)?;
        Self::from_section(&Section::require(&ini, SECTION)?)
    }

    fn from_section(section: &Section<'_>) -> ConfigResult<Self> {
        Ok(Self {
            project: section.required("project")?,
            url: section.required("url")?.trim_end_matches('/').to_string(),
            username: section.required("username")?,
            password: section.required("password")?,
            testcase_work_item: section.required("testcase_work_item")?,
            qe_test_coverage: section.required("qe_test_coverage")?,
            verified_in_release: section.optional("verified_in_release"),
        })
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(username) = std::env::var(ENV_JIRA_USERNAME) {
            self.username = username;
        }
        if let Ok(password) = std::env::var(ENV_JIRA_PASSWORD) {
            self.password = password;
        }
    }

    /// Browser URL of an issue
    pub fn browse_url(&self, key: &str) -> String {
        format!("{}/browse/{}", self.url, key)
    }
}
