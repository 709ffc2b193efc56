//! FMF Exporter - exports FMF test case metadata into ALM tools
//!
//! Provides:
//! - FMF tree loading and test case records (`import`, `models`)
//! - Mapping to the Polarion field set (`convert`)
//! - Polarion test case importer XML (`export`)
//! - Submission and import job polling (`reporter`)
//! - JIRA defect cross-linking (`jira`)
//! - Pluggable adapters selected by id (`adapter`)

pub mod adapter;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod convert;
pub mod export;
pub mod import;
pub mod jira;
pub mod models;
pub mod reporter;
pub mod scheme;

// Re-export commonly used types
pub use adapter::{Adapter, AdapterError, AdapterRegistry, ExportSettings, ExportSummary};
pub use config::{ConfigError, JiraConfig, PolarionConfig};
pub use convert::{PolarionConverter, VerifiesPolicy};
pub use export::{ExportError, PolarionXmlExporter};
pub use import::{FmfNode, FmfTree, TreeLoadError};
pub use jira::{IssueTracker, JiraError, JiraPopulator};
pub use reporter::{ImporterTransport, PollSettings, PolarionReporter, ReporterError};

// Re-export models
pub use models::{
    OneOrMany, PolarionTestCase, Relationship, Step, TestCaseRecord, TestSuite, WorkflowStatus,
};
