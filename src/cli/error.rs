//! CLI-specific error types

use crate::adapter::AdapterError;
use crate::config::ConfigError;
use crate::export::ExportError;
use crate::import::TreeLoadError;
use crate::jira::JiraError;
use crate::reporter::ReporterError;
use std::path::PathBuf;
use thiserror::Error;

/// CLI-specific error type
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid FMF Tree path: {0}")]
    InvalidTreePath(PathBuf),

    #[error("Invalid config file provided: {0}")]
    InvalidConfigFile(PathBuf),

    #[error("Unable to generate config file. Provided file name already exists: {0}")]
    ConfigFileExists(PathBuf),

    #[error("Failed to write file {0}: {1}")]
    FileWriteError(PathBuf, String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Tree load error: {0}")]
    TreeLoadError(#[from] TreeLoadError),

    #[error("Config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Export error: {0}")]
    ExportError(#[from] ExportError),

    #[error("Polarion error: {0}")]
    ReporterError(#[from] ReporterError),

    #[error("JIRA error: {0}")]
    JiraError(#[from] JiraError),

    #[error("Adapter error: {0}")]
    AdapterError(#[from] AdapterError),
}
