//! Polarion test case importer XML exporter
//!
//! Renders `PolarionTestCase` values into the document accepted by the Polarion
//! test case importer. Element order is significant for the importer and empty
//! values are never emitted: a custom field, linked work item or hyperlink without
//! content is left out, and so is a container that would end up empty.
//!
//! Rendering is side-effect free; the workflow status is derived beforehand by
//! the converter.

use super::ExportError;
use super::html::{html_text, steps_table};
use crate::models::polarion::PolarionTestCase;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

/// Marker placed around descriptions so they are not edited in the Polarion UI
pub const DESC_PREFIX_SUFFIX: &str = "-- DO NOT EDIT THROUGH THE POLARION UI --";

/// Role of linked work items that a test case verifies
pub const ROLE_VERIFIES: &str = "verifies";

/// Role of hyperlinks pointing at customer defects
pub const ROLE_CUSTOMER_DEFECT: &str = "tc_customerdefect";

/// Scope of test step parameters
pub const PARAMETER_SCOPE: &str = "local";

fn xml_error(e: impl std::fmt::Display) -> ExportError {
    ExportError::SerializationError(format!("Failed to write XML: {}", e))
}

/// Thin wrapper over the quick-xml writer with the element shapes we need
struct XmlDocument {
    writer: Writer<Vec<u8>>,
}

impl XmlDocument {
    fn new() -> Result<Self, ExportError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_error)?;
        Ok(Self { writer })
    }

    fn start(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<(), ExportError> {
        let mut element = BytesStart::new(name);
        element.extend_attributes(attributes.iter().copied());
        self.writer
            .write_event(Event::Start(element))
            .map_err(xml_error)
    }

    fn end(&mut self, name: &str) -> Result<(), ExportError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_error)
    }

    fn empty(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<(), ExportError> {
        let mut element = BytesStart::new(name);
        element.extend_attributes(attributes.iter().copied());
        self.writer
            .write_event(Event::Empty(element))
            .map_err(xml_error)
    }

    fn text(&mut self, text: &str) -> Result<(), ExportError> {
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_error)
    }

    fn text_element(
        &mut self,
        name: &str,
        attributes: &[(&str, &str)],
        text: &str,
    ) -> Result<(), ExportError> {
        self.start(name, attributes)?;
        self.text(text)?;
        self.end(name)
    }

    fn finish(self) -> Result<String, ExportError> {
        String::from_utf8(self.writer.into_inner())
            .map_err(|e| ExportError::SerializationError(format!("Invalid UTF-8 output: {}", e)))
    }
}

/// Polarion importer XML exporter
#[derive(Debug, Default)]
pub struct PolarionXmlExporter;

impl PolarionXmlExporter {
    /// Create a new PolarionXmlExporter
    pub fn new() -> Self {
        Self
    }

    /// Export a batch of test cases into a single importer document
    ///
    /// The document level `project-id` and `lookup-method` are taken from the
    /// first test case of the batch.
    pub fn export(&self, testcases: &[PolarionTestCase]) -> Result<String, ExportError> {
        let project = testcases.first().map(|tc| tc.project.as_str()).unwrap_or("");
        let lookup_method = testcases
            .first()
            .map(|tc| tc.lookup_method.as_str())
            .unwrap_or("name");

        let mut doc = XmlDocument::new()?;
        doc.start("testcases", &[("project-id", project)])?;

        doc.start("properties", &[])?;
        doc.empty("property", &[("name", "lookup-method"), ("value", lookup_method)])?;
        doc.end("properties")?;

        for tc in testcases {
            self.write_testcase(&mut doc, tc)?;
        }

        doc.end("testcases")?;
        doc.finish()
    }

    /// Export one test case as a document of its own
    pub fn export_one(&self, testcase: &PolarionTestCase) -> Result<String, ExportError> {
        self.export(std::slice::from_ref(testcase))
    }

    fn write_testcase(
        &self,
        doc: &mut XmlDocument,
        tc: &PolarionTestCase,
    ) -> Result<(), ExportError> {
        let approver_ids = tc.approver_ids();
        let mut attributes = vec![("assignee-id", tc.assignee.as_str())];
        if let Some(approvers) = approver_ids.as_deref() {
            attributes.push(("approver-ids", approvers));
        }
        attributes.push(("id", tc.id.as_str()));
        attributes.push(("status-id", tc.status.as_str()));
        doc.start("testcase", &attributes)?;

        doc.text_element("title", &[], &tc.title)?;
        doc.text_element("description", &[], &description_html(&tc.description))?;

        self.write_custom_fields(doc, tc)?;
        self.write_linked_work_items(doc, tc)?;
        self.write_test_steps(doc, tc)?;
        self.write_hyperlinks(doc, tc)?;

        doc.end("testcase")
    }

    fn write_custom_fields(
        &self,
        doc: &mut XmlDocument,
        tc: &PolarionTestCase,
    ) -> Result<(), ExportError> {
        let fields = custom_fields(tc);
        if fields.is_empty() {
            return Ok(());
        }

        doc.start("custom-fields", &[])?;
        for (id, content) in &fields {
            doc.empty("custom-field", &[("id", *id), ("content", content.as_str())])?;
        }
        doc.end("custom-fields")
    }

    fn write_linked_work_items(
        &self,
        doc: &mut XmlDocument,
        tc: &PolarionTestCase,
    ) -> Result<(), ExportError> {
        let work_items: Vec<&str> = tc.verifies.iter().filter_map(|v| v.polarion_ref()).collect();
        if work_items.is_empty() {
            return Ok(());
        }

        doc.start("linked-work-items", &[])?;
        for work_item in work_items {
            doc.empty(
                "linked-work-item",
                &[("workitem-id", work_item), ("role-id", ROLE_VERIFIES)],
            )?;
        }
        doc.end("linked-work-items")
    }

    fn write_test_steps(
        &self,
        doc: &mut XmlDocument,
        tc: &PolarionTestCase,
    ) -> Result<(), ExportError> {
        if tc.parameters.is_empty() && tc.steps.is_empty() {
            return Ok(());
        }

        doc.start("test-steps", &[])?;

        if !tc.parameters.is_empty() {
            doc.start("test-step", &[])?;
            doc.start("test-step-column", &[("id", "step")])?;
            doc.text(&format!("Parameters: {} => ", tc.parameters.join(", ")))?;
            for parameter in &tc.parameters {
                doc.empty(
                    "parameter",
                    &[("name", parameter.as_str()), ("scope", PARAMETER_SCOPE)],
                )?;
            }
            doc.end("test-step-column")?;
            doc.end("test-step")?;
        }

        for step in &tc.steps {
            doc.start("test-step", &[])?;
            doc.text_element("test-step-column", &[("id", "step")], &html_text(&step.step))?;
            doc.text_element(
                "test-step-column",
                &[("id", "expectedResult")],
                &html_text(&step.expected),
            )?;
            doc.end("test-step")?;
        }

        doc.end("test-steps")
    }

    fn write_hyperlinks(
        &self,
        doc: &mut XmlDocument,
        tc: &PolarionTestCase,
    ) -> Result<(), ExportError> {
        let uris: Vec<&str> = tc
            .defects
            .iter()
            .filter(|defect| defect.customer_case)
            .filter_map(|defect| defect.jira_ref().or_else(|| defect.bugzilla_ref()))
            .collect();
        if uris.is_empty() {
            return Ok(());
        }

        doc.start("hyperlinks", &[])?;
        for uri in uris {
            doc.empty("hyperlink", &[("role-id", ROLE_CUSTOMER_DEFECT), ("uri", uri)])?;
        }
        doc.end("hyperlinks")
    }
}

/// Description wrapped with the do-not-edit marker
pub fn description_html(description: &str) -> String {
    if description.is_empty() {
        return DESC_PREFIX_SUFFIX.to_string();
    }
    format!(
        "{}<br>{}<br>{}",
        DESC_PREFIX_SUFFIX,
        html_text(description),
        DESC_PREFIX_SUFFIX
    )
}

/// Custom fields in importer order, with empty values already dropped
pub fn custom_fields(tc: &PolarionTestCase) -> Vec<(&'static str, String)> {
    let fields = [
        ("casecomponent", tc.component.clone()),
        ("subcomponent", tc.sub_component.clone()),
        ("testtype", tc.test_type.clone()),
        ("subtype1", tc.subtype1.clone()),
        ("subtype2", tc.subtype2.clone()),
        ("caselevel", tc.level.clone()),
        ("caseimportance", tc.importance.clone()),
        ("caseposneg", tc.positive.clone()),
        ("caseautomation", tc.automated.clone()),
        ("setup", steps_table(&tc.setup)),
        ("teardown", steps_table(&tc.teardown)),
        ("automation_script", tc.automation_script.clone()),
        ("customerscenario", tc.is_customer_scenario.to_string()),
        ("tags", tc.tags.join(", ")),
    ];

    fields
        .into_iter()
        .filter(|(_, content)| !content.is_empty())
        .collect()
}
