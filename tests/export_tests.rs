//! Polarion importer XML export tests

use fmf_exporter::convert::PolarionConverter;
use fmf_exporter::export::polarion_xml::DESC_PREFIX_SUFFIX;
use fmf_exporter::export::{PolarionXmlExporter, TESTCASE_XML_FILE, write_testcase_xml};
use fmf_exporter::import::FmfTree;
use fmf_exporter::models::{PolarionTestCase, Relationship, Step};
use std::path::Path;
use tempfile::tempdir;

fn fixture_testcases() -> Vec<PolarionTestCase> {
    let tree = FmfTree::load(Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/tree"))
        .unwrap();
    let records: Vec<_> = tree.testcases_matching(&[]).collect();
    PolarionConverter::default().convert_all(&records)
}

fn minimal(id: &str) -> PolarionTestCase {
    PolarionTestCase {
        id: id.to_string(),
        title: id.to_string(),
        project: "PROJ".to_string(),
        ..Default::default()
    }
}

#[test]
fn test_fixture_document() {
    let testcases = fixture_testcases();
    let xml = PolarionXmlExporter::new().export(&testcases).unwrap();

    assert!(xml.contains("<testcases project-id=\"ENTMQIC\">"));
    assert_eq!(xml.matches("<testcase ").count(), 2);
    assert!(xml.contains(
        "<testcase assignee-id=\"fgiorget\" approver-ids=\"fgiorget:approved,dlenoch:approved\" \
         id=\"test_path.some_test_class.foo_test.TestFoo.test_foo_sample_01\" status-id=\"proposed\">"
    ));
    assert!(xml.contains(&format!(
        "<description>{0}&lt;br&gt;This is the summary&lt;br&gt;This is the description&lt;br&gt;{0}</description>",
        DESC_PREFIX_SUFFIX
    )));
    assert!(xml.contains("<custom-field id=\"casecomponent\" content=\"router\"/>"));
    assert!(xml.contains("<custom-field id=\"subcomponent\" content=\"Core_Engine\"/>"));
    assert!(xml.contains("<custom-field id=\"customerscenario\" content=\"true\"/>"));
    assert!(xml.contains("<custom-field id=\"tags\" content=\"TAG1, TAG2\"/>"));
    assert!(xml.contains("<linked-work-item workitem-id=\"ENTMQIC-3333\" role-id=\"verifies\"/>"));
    assert_eq!(xml.matches("<linked-work-item ").count(), 1);
    assert!(xml.contains("<hyperlink role-id=\"tc_customerdefect\" uri=\"ENTMQIC-1111\"/>"));
    assert_eq!(xml.matches("<hyperlink ").count(), 1);
    assert!(xml.contains("Parameters: router, broker, client =&gt; "));
}

#[test]
fn test_custom_field_order() {
    let mut tc = minimal("a.b");
    tc.component = "router".into();
    tc.test_type = "functional".into();
    tc.level = "component".into();
    tc.importance = "high".into();
    tc.tags = vec!["t1".into()];

    let xml = PolarionXmlExporter::new().export_one(&tc).unwrap();
    let order = [
        "casecomponent",
        "testtype",
        "caselevel",
        "caseimportance",
        "caseposneg",
        "caseautomation",
        "customerscenario",
        "tags",
    ];
    let positions: Vec<usize> = order
        .iter()
        .map(|id| xml.find(&format!("id=\"{}\"", id)).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_empty_subcomponent_omitted() {
    let xml = PolarionXmlExporter::new().export_one(&minimal("a.b")).unwrap();
    assert!(!xml.contains("id=\"subcomponent\""));
    assert!(!xml.contains("id=\"setup\""));
    assert!(!xml.contains("<linked-work-items>"));
    assert!(!xml.contains("approver-ids"));
}

#[test]
fn test_empty_description_is_marker_only() {
    let xml = PolarionXmlExporter::new().export_one(&minimal("a.b")).unwrap();
    assert!(xml.contains(&format!("<description>{}</description>", DESC_PREFIX_SUFFIX)));
}

#[test]
fn test_step_text_is_escaped() {
    let mut tc = minimal("a.b");
    tc.steps = vec![Step::new("x < y\nnext", "ok")];

    let xml = PolarionXmlExporter::new().export_one(&tc).unwrap();
    // html_text yields "x &lt; y<br>next", which is escaped once more as XML text
    assert!(xml.contains("x &amp;lt; y&lt;br&gt;next"));
}

#[test]
fn test_setup_table_in_custom_field() {
    let mut tc = minimal("a.b");
    tc.setup = vec![Step::new("Start", "Up")];

    let xml = PolarionXmlExporter::new().export_one(&tc).unwrap();
    assert!(xml.contains("<custom-field id=\"setup\" content=\"&lt;table style="));
    assert!(!xml.contains("id=\"teardown\""));
}

#[test]
fn test_hyperlink_falls_back_to_bugzilla() {
    let mut tc = minimal("a.b");
    tc.defects = vec![Relationship {
        bugzilla: Some("https://bugzilla.example.com/1".into()),
        customer_case: true,
        ..Default::default()
    }];

    let xml = PolarionXmlExporter::new().export_one(&tc).unwrap();
    assert!(xml.contains(
        "<hyperlink role-id=\"tc_customerdefect\" uri=\"https://bugzilla.example.com/1\"/>"
    ));
}

#[test]
fn test_write_testcase_xml() {
    let dir = tempdir().unwrap();
    let path = write_testcase_xml(dir.path(), "<testcases/>").unwrap();
    assert_eq!(path, dir.path().join(TESTCASE_XML_FILE));
    assert_eq!(std::fs::read_to_string(path).unwrap(), "<testcases/>");
}
