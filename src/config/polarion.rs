//! `[polarion]` section of the exporter configuration

use super::{ConfigResult, Section, parse_ini, read_ini};
use crate::convert::VerifiesPolicy;
use std::path::Path;

/// Section name holding the importer settings
pub const SECTION: &str = "polarion";

/// Environment variable overriding the Polarion user
pub const ENV_POLARION_USER: &str = "FMF_POLARION_USER";

/// Environment variable overriding the Polarion password
pub const ENV_POLARION_PASS: &str = "FMF_POLARION_PASS";

/// Settings for the Polarion test case importer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolarionConfig {
    /// Test case importer endpoint
    pub test_case_url: String,
    /// xUnit importer endpoint, kept for configuration compatibility
    pub xunit_url: String,
    pub username: String,
    pub password: String,
    /// Polarion base URL used to build work item links
    pub url: Option<String>,
    /// Whether defects are linked as verified work items next to requirements
    pub verify_defects: bool,
}

impl PolarionConfig {
    /// Load the `[polarion]` section from an INI file, then apply env overrides
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let ini = read_ini(path)?;
        let mut config = Self::from_ini(&ini)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse the `[polarion]` section from INI text
    pub fn parse(content: &str) -> ConfigResult<Self> {
        Self::from_ini(&parse_ini(content)?)
    }

    fn from_ini(ini: &ini::Ini) -> ConfigResult<Self> {
        let section = Section::require(ini, SECTION)?;
        Ok(Self {
            test_case_url: section.required("TestCaseImporterUrl")?,
            xunit_url: section.required("XunitImporterUrl")?,
            username: section.required("user")?,
            password: section.required("pass")?,
            url: section.optional("url"),
            verify_defects: section.flag("verify_defects", true)?,
        })
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(user) = std::env::var(ENV_POLARION_USER) {
            self.username = user;
        }
        if let Ok(pass) = std::env::var(ENV_POLARION_PASS) {
            self.password = pass;
        }
    }

    /// Polarion base URL
    ///
    /// The `url` key when present, otherwise the importer URL cut before `/import`.
    pub fn polarion_url(&self) -> String {
        if let Some(url) = &self.url {
            return url.trim_end_matches('/').to_string();
        }
        match self.test_case_url.find("/import") {
            Some(idx) => self.test_case_url[..idx].to_string(),
            None => self.test_case_url.trim_end_matches('/').to_string(),
        }
    }

    /// Job log URL for an import job id
    pub fn job_log_url(&self, job_id: &str) -> String {
        format!("{}-log?jobId={}", self.test_case_url, job_id)
    }

    /// Work item URL of an imported test case
    pub fn work_item_url(&self, project: &str, work_item_id: &str) -> String {
        format!(
            "{}/#/project/{}/workitem?id={}",
            self.polarion_url(),
            project,
            work_item_id
        )
    }

    /// Which relationships become verified work items
    pub fn verifies_policy(&self) -> VerifiesPolicy {
        if self.verify_defects {
            VerifiesPolicy::RequirementsAndDefects
        } else {
            VerifiesPolicy::RequirementsOnly
        }
    }
}

/// Generate a sample configuration file content
pub fn sample_config() -> &'static str {
    r#"[polarion]
TestCaseImporterUrl=https://127.0.0.1/polarion/import/testcase
XunitImporterUrl=https://127.0.0.1/polarion/import/xunit
user=user
pass=pass
"#
}
