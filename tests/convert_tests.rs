//! FMF to Polarion mapping tests

use fmf_exporter::convert::{PolarionConverter, VerifiesPolicy, derive_status};
use fmf_exporter::import::FmfTree;
use fmf_exporter::models::{PolarionTestCase, Relationship, Step, TestCaseRecord, WorkflowStatus};
use std::path::Path;

fn fixture_testcase(testname: &str) -> TestCaseRecord {
    let tree = FmfTree::load(Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/tree"))
        .unwrap();
    tree.get_testcase("test_path.some_test_class.foo_test.TestFoo", testname)
        .unwrap()
}

mod fixture_mapping_tests {
    use super::*;

    #[test]
    fn test_identification() {
        let tc = PolarionConverter::default().convert(&fixture_testcase("test_foo_sample_01"));
        assert_eq!(
            tc.id,
            "test_path.some_test_class.foo_test.TestFoo.test_foo_sample_01"
        );
        assert_eq!(tc.title, tc.id);
        assert_eq!(tc.description, "This is the summary\nThis is the description");
    }

    #[test]
    fn test_authoring() {
        let tc = PolarionConverter::default().convert(&fixture_testcase("test_foo_sample_01"));
        assert_eq!(tc.assignee, "fgiorget");
        assert_eq!(tc.approvals, vec!["fgiorget", "dlenoch"]);
    }

    #[test]
    fn test_relationships() {
        let tc = PolarionConverter::default().convert(&fixture_testcase("test_foo_sample_01"));
        assert_eq!(
            tc.verifies,
            vec![
                Relationship::polarion("ENTMQIC-3333").with_customer_case(true),
                Relationship::jira("ENTMQIC-4444"),
                Relationship::jira("ENTMQIC-1111").with_customer_case(true),
                Relationship::jira("ENTMQIC-2222"),
            ]
        );
        assert_eq!(tc.defects.len(), 2);
        assert!(tc.is_customer_scenario);
    }

    #[test]
    fn test_classification_and_defaults() {
        let tc = PolarionConverter::default().convert(&fixture_testcase("test_foo_sample_01"));
        assert_eq!(tc.project, "ENTMQIC");
        assert_eq!(tc.component, "router");
        assert_eq!(tc.sub_component, "Core_Engine");
        assert_eq!(tc.level, "component");
        assert_eq!(tc.test_type, "functional");
        assert_eq!(tc.importance, "critical");
        assert_eq!(tc.subtype1, "compliance");
        assert_eq!(tc.subtype2, "-");
        assert_eq!(tc.positive, "positive");
        assert_eq!(tc.automated, "automated");
        assert_eq!(tc.lookup_method, "name");
        assert_eq!(tc.automation_script, "");
        assert_eq!(tc.tags, vec!["TAG1"]);
        assert_eq!(tc.parameters, vec!["router", "broker", "client"]);
        assert_eq!(
            tc.steps,
            vec![Step::new("Step 1", "Expected 1"), Step::new("Step 2", "Expected 2")]
        );
        assert_eq!(tc.status, WorkflowStatus::Proposed);
        assert_eq!(tc.test_case_work_item_url, None);
    }

    #[test]
    fn test_adapter_overrides() {
        let tc = PolarionConverter::default().convert(&fixture_testcase("test_foo_sample_02"));
        assert_eq!(tc.project, "ENTMQIC");
        assert_eq!(tc.positive, "negative");
        assert_eq!(tc.automated, "notautomated");
        assert_eq!(tc.description, "Second sample");
        assert!(!tc.is_customer_scenario);
        assert_eq!(tc.setup.len(), 1);
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let record = fixture_testcase("test_foo_sample_01");
        let converter = PolarionConverter::default();
        assert_eq!(converter.convert(&record), converter.convert(&record));
    }
}

mod derived_field_tests {
    use super::*;

    #[test]
    fn test_assignee_empty_without_email_author() {
        let mut record = TestCaseRecord::new("/a/b");
        record.authors = vec!["Someone Without Email".into()];
        assert_eq!(PolarionConverter::default().convert(&record).assignee, "");
    }

    #[test]
    fn test_customer_scenario_from_requirements() {
        let mut record = TestCaseRecord::new("/a");
        record.requirements = vec![Relationship::jira("X-1").with_customer_case(true)];
        assert!(PolarionConverter::default().convert(&record).is_customer_scenario);

        record.requirements = vec![Relationship::jira("X-1")];
        assert!(!PolarionConverter::default().convert(&record).is_customer_scenario);
    }

    #[test]
    fn test_customer_defect_ignored_when_requirements_only() {
        let mut record = TestCaseRecord::new("/a");
        record.defects = vec![Relationship::jira("X-1").with_customer_case(true)];

        let converter = PolarionConverter::new(VerifiesPolicy::RequirementsOnly);
        let tc = converter.convert(&record);
        assert!(tc.verifies.is_empty());
        assert!(!tc.is_customer_scenario);
    }

    #[test]
    fn test_project_override_wins_over_property() {
        let mut record = TestCaseRecord::new("/a");
        record
            .testsuite
            .properties
            .insert("polarion-project-id".into(), "FROM_SUITE".into());
        record
            .adapter
            .entry("polarion".into())
            .or_default()
            .insert("project".into(), "FROM_ADAPTER".into());
        assert_eq!(PolarionConverter::default().convert(&record).project, "FROM_ADAPTER");
    }

    #[test]
    fn test_status_derivation() {
        let mut tc = PolarionTestCase::default();
        assert_eq!(derive_status(&tc), WorkflowStatus::Draft);

        tc.description = "d".into();
        tc.level = "component".into();
        assert_eq!(derive_status(&tc), WorkflowStatus::Draft);

        tc.importance = "high".into();
        assert_eq!(derive_status(&tc), WorkflowStatus::Proposed);

        tc.verifies = vec![Relationship::polarion("REQ-1")];
        assert_eq!(derive_status(&tc), WorkflowStatus::Proposed);

        tc.automated = "notautomated".into();
        assert_eq!(derive_status(&tc), WorkflowStatus::Approved);

        tc.automated = "automated".into();
        tc.automation_script = "tests/test_a.py".into();
        assert_eq!(derive_status(&tc), WorkflowStatus::Approved);
    }
}
