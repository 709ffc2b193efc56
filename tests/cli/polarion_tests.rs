//! Tests for the polarion sub-command handlers

use fmf_exporter::adapter::{AdapterRegistry, ExportSettings};
use fmf_exporter::cli::commands::polarion::{
    PolarionArgs, handle_generate_config, handle_polarion,
};
use fmf_exporter::cli::commands::run_adapter;
use fmf_exporter::cli::error::CliError;
use fmf_exporter::export::TESTCASE_XML_FILE;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

#[test]
fn test_dump_with_filter_and_save_xml() {
    let dir = tempdir().unwrap();
    let args = PolarionArgs {
        tree_path: fixtures().join("tree"),
        filters: vec!["sample_02".to_string()],
        settings: ExportSettings {
            config: Some(fixtures().join("fmfexporter.config.ini")),
            save_xml: Some(dir.path().to_path_buf()),
            ..Default::default()
        },
    };

    let summary = handle_polarion(&args).unwrap();
    assert_eq!(summary.converted, 1);
    assert_eq!(summary.submitted, 0);

    let saved = std::fs::read_to_string(dir.path().join(TESTCASE_XML_FILE)).unwrap();
    assert!(saved.contains("test_foo_sample_02"));
    assert!(!saved.contains("test_foo_sample_01"));
}

#[test]
fn test_invalid_tree_path() {
    let dir = tempdir().unwrap();
    let args = PolarionArgs {
        tree_path: dir.path().join("nowhere"),
        ..Default::default()
    };
    assert!(matches!(
        handle_polarion(&args),
        Err(CliError::InvalidTreePath(_))
    ));
}

#[test]
fn test_missing_jira_config_file() {
    let dir = tempdir().unwrap();
    let args = PolarionArgs {
        tree_path: fixtures().join("tree"),
        settings: ExportSettings {
            config: Some(fixtures().join("fmfexporter.config.ini")),
            jira_populate: true,
            jira_config: Some(dir.path().join("jira.ini")),
            ..Default::default()
        },
        ..Default::default()
    };
    assert!(matches!(
        handle_polarion(&args),
        Err(CliError::InvalidConfigFile(path)) if path.ends_with("jira.ini")
    ));
}

#[test]
fn test_generate_config_refuses_overwrite() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("existing.ini");
    std::fs::write(&path, "[polarion]\n").unwrap();

    assert!(matches!(
        handle_generate_config(&path),
        Err(CliError::ConfigFileExists(_))
    ));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[polarion]\n");
}

#[test]
fn test_unknown_adapter() {
    let result = run_adapter(
        &AdapterRegistry::with_builtin(),
        "testlink",
        &fixtures().join("tree"),
        &[],
        &ExportSettings::default(),
    );
    assert!(matches!(result, Err(CliError::AdapterError(_))));
}
