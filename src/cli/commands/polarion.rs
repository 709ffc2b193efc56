//! Polarion command implementation

use super::run_adapter;
use crate::adapter::{AdapterRegistry, ExportSettings, ExportSummary, polarion::ADAPTER_ID};
use crate::cli::error::CliError;
use crate::config::{PolarionConfig, sample_config};
use std::path::{Path, PathBuf};

/// Arguments of the `polarion` sub-command
#[derive(Debug, Clone, Default)]
pub struct PolarionArgs {
    pub tree_path: PathBuf,
    pub filters: Vec<String>,
    pub settings: ExportSettings,
}

/// Write a sample configuration file, refusing to overwrite an existing one
pub fn handle_generate_config(path: &Path) -> Result<(), CliError> {
    if path.exists() {
        return Err(CliError::ConfigFileExists(path.to_path_buf()));
    }

    std::fs::write(path, sample_config())
        .map_err(|e| CliError::FileWriteError(path.to_path_buf(), e.to_string()))?;

    println!("Config file has been generated: {}", path.display());
    Ok(())
}

/// Handle the polarion command
pub fn handle_polarion(args: &PolarionArgs) -> Result<ExportSummary, CliError> {
    if !args.tree_path.is_dir() {
        return Err(CliError::InvalidTreePath(args.tree_path.clone()));
    }

    if let Some(config) = &args.settings.config {
        if !config.is_file() {
            return Err(CliError::InvalidConfigFile(config.clone()));
        }
        // Fail early on an unparseable file, before the tree is loaded
        PolarionConfig::load(config)?;
    }

    if let Some(jira_config) = &args.settings.jira_config
        && !jira_config.is_file()
    {
        return Err(CliError::InvalidConfigFile(jira_config.clone()));
    }

    let registry = AdapterRegistry::with_builtin();
    run_adapter(
        &registry,
        ADAPTER_ID,
        &args.tree_path,
        &args.filters,
        &args.settings,
    )
}
