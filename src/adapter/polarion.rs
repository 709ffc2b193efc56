//! Polarion adapter
//!
//! Converts records into Polarion test cases and either dumps the importer XML
//! or submits it, optionally cross-linking the imported test cases into JIRA.

use super::{Adapter, AdapterError, ExportSettings, ExportSummary};
use crate::config::{JiraConfig, PolarionConfig};
use crate::convert::PolarionConverter;
use crate::export::{PolarionXmlExporter, write_testcase_xml};
use crate::jira::JiraPopulator;
use crate::models::polarion::PolarionTestCase;
use crate::models::testcase::TestCaseRecord;
use crate::reporter::PolarionReporter;
use std::io::Write;
use tracing::{info, warn};

/// Adapter id, also the CLI sub-command name
pub const ADAPTER_ID: &str = "polarion";

/// Factory registered in the `AdapterRegistry`
pub fn create(settings: &ExportSettings) -> Result<Box<dyn Adapter>, AdapterError> {
    Ok(Box::new(PolarionAdapter::from_settings(settings)?))
}

pub struct PolarionAdapter {
    settings: ExportSettings,
    converter: PolarionConverter,
    exporter: PolarionXmlExporter,
    reporter: Option<PolarionReporter>,
    populator: Option<JiraPopulator>,
}

impl PolarionAdapter {
    /// Adapter with explicit collaborators
    pub fn new(
        settings: ExportSettings,
        converter: PolarionConverter,
        reporter: Option<PolarionReporter>,
        populator: Option<JiraPopulator>,
    ) -> Self {
        Self {
            settings,
            converter,
            exporter: PolarionXmlExporter::new(),
            reporter,
            populator,
        }
    }

    /// Build the adapter out of the configuration files named in `settings`
    ///
    /// The `[jira]` section is read from `--jira-config` when given, otherwise
    /// from the main configuration file.
    pub fn from_settings(settings: &ExportSettings) -> Result<Self, AdapterError> {
        let Some(config_path) = &settings.config else {
            if settings.submit {
                return Err(AdapterError::Unsupported(
                    "A configuration file is required to submit test cases".to_string(),
                ));
            }
            return Ok(Self::new(
                settings.clone(),
                PolarionConverter::default(),
                None,
                None,
            ));
        };

        let config = PolarionConfig::load(config_path)?;
        let converter = PolarionConverter::new(config.verifies_policy());

        let jira = if settings.jira_populate {
            match &settings.jira_config {
                Some(path) => Some(JiraConfig::load(path)?),
                None => JiraConfig::load_optional(config_path)?,
            }
        } else {
            None
        };

        let reporter = if settings.submit {
            Some(connect_reporter(config)?)
        } else {
            None
        };
        let populator = jira.map(connect_populator).transpose()?;

        Ok(Self::new(settings.clone(), converter, reporter, populator))
    }

    /// Convert records keeping their order
    pub fn convert(&self, records: &[TestCaseRecord]) -> Vec<PolarionTestCase> {
        self.converter.convert_all(records)
    }

    fn submit(
        &self,
        reporter: &PolarionReporter,
        testcases: &mut [PolarionTestCase],
    ) -> Result<usize, AdapterError> {
        for tc in testcases.iter() {
            info!("Submitting test case: {}", tc.id);
        }

        if self.settings.one_by_one {
            for tc in testcases.iter_mut() {
                reporter.submit_testcase(tc)?;
            }
        } else {
            reporter.submit_testcases(testcases)?;
        }

        Ok(testcases
            .iter()
            .filter(|tc| tc.test_case_work_item_url.is_some())
            .count())
    }

    fn dump(&self, testcases: &[PolarionTestCase], out: &mut dyn Write) -> Result<(), AdapterError> {
        let io_error = |e: std::io::Error| AdapterError::IoError(e.to_string());

        if self.settings.one_by_one {
            for tc in testcases {
                let xml = self.exporter.export_one(tc)?;
                writeln!(out, "Dumping test case: {}\n{}\n", tc.id, xml).map_err(io_error)?;
            }
        } else {
            let xml = self.exporter.export(testcases)?;
            writeln!(out, "Dumping test cases: \n{}\n", xml).map_err(io_error)?;
        }
        Ok(())
    }
}

impl Adapter for PolarionAdapter {
    fn id(&self) -> &'static str {
        ADAPTER_ID
    }

    fn export(
        &self,
        records: &[TestCaseRecord],
        out: &mut dyn Write,
    ) -> Result<ExportSummary, AdapterError> {
        let mut testcases = self.convert(records);
        let mut summary = ExportSummary {
            converted: testcases.len(),
            ..Default::default()
        };

        if let Some(dir) = &self.settings.save_xml {
            let path = write_testcase_xml(dir, &self.exporter.export(&testcases)?)?;
            info!("Saved importer document to {}", path.display());
        }

        let Some(reporter) = self.reporter.as_ref().filter(|_| self.settings.submit) else {
            self.dump(&testcases, out)?;
            return Ok(summary);
        };

        summary.submitted = self.submit(reporter, &mut testcases)?;

        if self.settings.jira_populate {
            match &self.populator {
                Some(populator) => {
                    populator.populate_testcases(&testcases)?;
                    summary.linked = summary.submitted;
                }
                None => warn!("Jira configuration not provided"),
            }
        }

        Ok(summary)
    }
}

#[cfg(feature = "http")]
fn connect_reporter(config: PolarionConfig) -> Result<PolarionReporter, AdapterError> {
    Ok(PolarionReporter::with_http(config)?)
}

#[cfg(not(feature = "http"))]
fn connect_reporter(_config: PolarionConfig) -> Result<PolarionReporter, AdapterError> {
    Err(AdapterError::Unsupported(
        "Submitting requires the 'http' feature".to_string(),
    ))
}

#[cfg(feature = "http")]
fn connect_populator(config: JiraConfig) -> Result<JiraPopulator, AdapterError> {
    Ok(JiraPopulator::with_http(config)?)
}

#[cfg(not(feature = "http"))]
fn connect_populator(_config: JiraConfig) -> Result<JiraPopulator, AdapterError> {
    Err(AdapterError::Unsupported(
        "JIRA population requires the 'http' feature".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> TestCaseRecord {
        let mut record = TestCaseRecord::new(name);
        record
            .testsuite
            .properties
            .insert("polarion-project-id".into(), "PROJ".into());
        record
    }

    #[test]
    fn test_dump_batch() {
        let adapter = PolarionAdapter::from_settings(&ExportSettings::default()).unwrap();
        let mut out = Vec::new();
        let summary = adapter
            .export(&[record("/a/one"), record("/a/two")], &mut out)
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(summary.converted, 2);
        assert_eq!(summary.submitted, 0);
        assert!(text.starts_with("Dumping test cases: \n<?xml"));
        assert_eq!(text.matches("<testcases ").count(), 1);
        assert!(text.contains("id=\"a.one\""));
        assert!(text.contains("id=\"a.two\""));
    }

    #[test]
    fn test_dump_one_by_one() {
        let settings = ExportSettings {
            one_by_one: true,
            ..Default::default()
        };
        let adapter = PolarionAdapter::from_settings(&settings).unwrap();
        let mut out = Vec::new();
        adapter
            .export(&[record("/a/one"), record("/a/two")], &mut out)
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Dumping test case: a.one\n"));
        assert!(text.contains("Dumping test case: a.two\n"));
        assert_eq!(text.matches("<testcases ").count(), 2);
    }

    #[test]
    fn test_submit_requires_config() {
        let settings = ExportSettings {
            submit: true,
            ..Default::default()
        };
        assert!(matches!(
            PolarionAdapter::from_settings(&settings),
            Err(AdapterError::Unsupported(_))
        ));
    }
}
