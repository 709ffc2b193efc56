//! Configuration file tests

use fmf_exporter::config::{ConfigError, JiraConfig, PolarionConfig, sample_config};
use fmf_exporter::convert::VerifiesPolicy;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn fixture_config() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/fmfexporter.config.ini")
}

#[test]
fn test_load_polarion_section() {
    let config = PolarionConfig::load(&fixture_config()).unwrap();
    assert_eq!(
        config.test_case_url,
        "https://polarion.example.com/polarion/import/testcase"
    );
    assert_eq!(
        config.xunit_url,
        "https://polarion.example.com/polarion/import/xunit"
    );
    assert_eq!(config.polarion_url(), "https://polarion.example.com/polarion");
    assert_eq!(config.verifies_policy(), VerifiesPolicy::RequirementsAndDefects);
}

#[test]
fn test_load_jira_section() {
    let config = JiraConfig::load(&fixture_config()).unwrap();
    assert_eq!(config.project, "ENTMQIC");
    assert_eq!(config.testcase_work_item, "customfield_12310440");
    assert_eq!(config.qe_test_coverage, "customfield_12310240");
    assert_eq!(
        config.verified_in_release.as_deref(),
        Some("customfield_12312240")
    );
    assert_eq!(
        config.browse_url("ENTMQIC-1"),
        "https://issues.example.com/browse/ENTMQIC-1"
    );
}

#[test]
fn test_jira_section_is_optional() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("polarion-only.ini");
    std::fs::write(&path, sample_config()).unwrap();

    assert!(JiraConfig::load_optional(&path).unwrap().is_none());
    assert!(matches!(
        JiraConfig::load(&path),
        Err(ConfigError::MissingSection(name)) if name == "jira"
    ));
}

#[test]
fn test_sample_config_is_loadable() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fmfexporter.ini");
    std::fs::write(&path, sample_config()).unwrap();

    let config = PolarionConfig::load(&path).unwrap();
    assert_eq!(config.test_case_url, "https://127.0.0.1/polarion/import/testcase");
    assert_eq!(
        config.job_log_url("42"),
        "https://127.0.0.1/polarion/import/testcase-log?jobId=42"
    );
}

#[test]
fn test_explicit_polarion_url_and_requirements_only() {
    let config = PolarionConfig::parse(
        "[polarion]\n\
         TestCaseImporterUrl=https://alm/import/testcase\n\
         XunitImporterUrl=https://alm/import/xunit\n\
         user=u\n\
         pass=p\n\
         url=https://alm.example.com/polarion/\n\
         verify_defects=no\n",
    )
    .unwrap();
    assert_eq!(
        config.work_item_url("PROJ", "PROJ-7"),
        "https://alm.example.com/polarion/#/project/PROJ/workitem?id=PROJ-7"
    );
    assert_eq!(config.verifies_policy(), VerifiesPolicy::RequirementsOnly);
}

#[test]
fn test_missing_file_and_missing_key() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        PolarionConfig::load(&dir.path().join("absent.ini")),
        Err(ConfigError::IoError(_))
    ));

    assert!(matches!(
        PolarionConfig::parse("[polarion]\nuser=u\n"),
        Err(ConfigError::MissingKey(_, key)) if key == "TestCaseImporterUrl"
    ));
}
