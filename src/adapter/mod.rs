//! ALM adapters
//!
//! An adapter takes the test case records selected from an FMF tree and
//! delivers them to an ALM tool. Adapters are looked up by id in an
//! `AdapterRegistry`, which is filled from an explicit list at startup.

pub mod polarion;

use crate::config::ConfigError;
use crate::export::ExportError;
use crate::jira::JiraError;
use crate::models::testcase::TestCaseRecord;
use crate::reporter::ReporterError;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

pub use polarion::PolarionAdapter;

/// Error raised by an adapter
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("Unknown adapter: {0}")]
    UnknownAdapter(String),
    #[error("{0}")]
    Unsupported(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Reporter(#[from] ReporterError),
    #[error(transparent)]
    Jira(#[from] JiraError),
}

/// Options shared by every adapter run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSettings {
    /// Adapter configuration file
    pub config: Option<PathBuf>,
    /// Send test cases to the ALM tool instead of dumping them
    pub submit: bool,
    /// One document per test case instead of a single batch
    pub one_by_one: bool,
    /// Cross-link imported test cases into JIRA
    pub jira_populate: bool,
    /// Separate file holding the `[jira]` section
    pub jira_config: Option<PathBuf>,
    /// Directory receiving a copy of the generated document
    pub save_xml: Option<PathBuf>,
}

/// Counters reported after an adapter run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub converted: usize,
    pub submitted: usize,
    pub linked: usize,
}

/// An ALM tool that test cases can be exported to
pub trait Adapter {
    /// Unique id, also used as CLI sub-command name
    fn id(&self) -> &'static str;

    /// Export the records, writing any dumped document to `out`
    fn export(
        &self,
        records: &[TestCaseRecord],
        out: &mut dyn Write,
    ) -> Result<ExportSummary, AdapterError>;
}

/// Builds an adapter out of the run settings
pub type AdapterFactory = fn(&ExportSettings) -> Result<Box<dyn Adapter>, AdapterError>;

/// Adapter id to factory map
#[derive(Default)]
pub struct AdapterRegistry {
    factories: BTreeMap<&'static str, AdapterFactory>,
}

impl AdapterRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every adapter shipped with the crate
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(polarion::ADAPTER_ID, polarion::create);
        registry
    }

    pub fn register(&mut self, id: &'static str, factory: AdapterFactory) {
        self.factories.insert(id, factory);
    }

    /// Ids of the registered adapters, sorted
    pub fn ids(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    /// Instantiate the adapter registered under `id`
    pub fn create(
        &self,
        id: &str,
        settings: &ExportSettings,
    ) -> Result<Box<dyn Adapter>, AdapterError> {
        let factory = self
            .factories
            .get(id)
            .ok_or_else(|| AdapterError::UnknownAdapter(id.to_string()))?;
        factory(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Listing;

    impl Adapter for Listing {
        fn id(&self) -> &'static str {
            "list"
        }

        fn export(
            &self,
            records: &[TestCaseRecord],
            out: &mut dyn Write,
        ) -> Result<ExportSummary, AdapterError> {
            for record in records {
                writeln!(out, "{}", record.name).map_err(|e| AdapterError::IoError(e.to_string()))?;
            }
            Ok(ExportSummary {
                converted: records.len(),
                ..Default::default()
            })
        }
    }

    fn listing(_: &ExportSettings) -> Result<Box<dyn Adapter>, AdapterError> {
        Ok(Box::new(Listing))
    }

    #[test]
    fn test_builtin_registry() {
        let registry = AdapterRegistry::with_builtin();
        assert_eq!(registry.ids(), vec!["polarion"]);
        assert!(registry.contains("polarion"));
    }

    #[test]
    fn test_register_and_create() {
        let mut registry = AdapterRegistry::new();
        registry.register("list", listing);

        let adapter = registry.create("list", &ExportSettings::default()).unwrap();
        let mut out = Vec::new();
        let summary = adapter
            .export(&[TestCaseRecord::new("/a/b")], &mut out)
            .unwrap();
        assert_eq!(summary.converted, 1);
        assert_eq!(String::from_utf8(out).unwrap(), "/a/b\n");
    }

    #[test]
    fn test_unknown_adapter() {
        let registry = AdapterRegistry::with_builtin();
        assert!(matches!(
            registry.create("testlink", &ExportSettings::default()),
            Err(AdapterError::UnknownAdapter(id)) if id == "testlink"
        ));
    }
}
