//! FMF to Polarion converter
//!
//! Pure mapping from a `TestCaseRecord` into a `PolarionTestCase`. No I/O happens
//! here and the same record always yields the same test case.

use crate::models::polarion::{PolarionTestCase, WorkflowStatus};
use crate::models::testcase::{Relationship, TestCaseRecord};
use once_cell::sync::Lazy;
use regex::Regex;

/// Adapter id used for `adapter.polarion.*` overrides
pub const ADAPTER_ID: &str = "polarion";

/// Matches the user part of an author written as `Name Surname <user@domain>`
static RE_USER_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^.*<(.*)@.*").expect("Invalid regex"));

/// Test suite property holding the project when no adapter override exists
pub const PROJECT_PROPERTY: &str = "polarion-project-id";

/// Which relationships end up in the `verifies` list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerifiesPolicy {
    /// Requirements only
    RequirementsOnly,
    /// Requirements followed by defects
    #[default]
    RequirementsAndDefects,
}

/// Extract `user` out of `Name Surname <user@domain>`
pub fn extract_user_id(author: &str) -> Option<String> {
    RE_USER_ID
        .captures(author)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Workflow status implied by the content of a test case
///
/// - `proposed` once description, level and importance are all filled in
/// - `approved` when it also verifies something and is either marked
///   `notautomated` or carries an automation script
/// - `draft` otherwise
pub fn derive_status(tc: &PolarionTestCase) -> WorkflowStatus {
    if tc.description.is_empty() || tc.level.is_empty() || tc.importance.is_empty() {
        return WorkflowStatus::Draft;
    }

    // "notautomated" or a script, either one is enough
    if !tc.verifies.is_empty() && (tc.automated == "notautomated" || !tc.automation_script.is_empty())
    {
        return WorkflowStatus::Approved;
    }

    WorkflowStatus::Proposed
}

/// True when any relationship is flagged as a customer case
pub fn has_customer_case(relationships: &[Relationship]) -> bool {
    relationships.iter().any(|rel| rel.customer_case)
}

/// Converts FMF test case records into Polarion test cases
#[derive(Debug, Clone, Copy, Default)]
pub struct PolarionConverter {
    verifies_policy: VerifiesPolicy,
}

impl PolarionConverter {
    pub fn new(verifies_policy: VerifiesPolicy) -> Self {
        Self { verifies_policy }
    }

    pub fn verifies_policy(&self) -> VerifiesPolicy {
        self.verifies_policy
    }

    /// Map a single record
    ///
    /// # Example
    ///
    /// ```rust
    /// use fmf_exporter::convert::polarion::PolarionConverter;
    /// use fmf_exporter::models::TestCaseRecord;
    ///
    /// let mut record = TestCaseRecord::new("/a/b/c");
    /// record.authors.push("Jane Doe <jdoe@example.com>".to_string());
    ///
    /// let tc = PolarionConverter::default().convert(&record);
    /// assert_eq!(tc.id, "a.b.c");
    /// assert_eq!(tc.assignee, "jdoe");
    /// ```
    pub fn convert(&self, record: &TestCaseRecord) -> PolarionTestCase {
        let setting = |key: &str, default: &str| {
            record
                .adapter_setting(ADAPTER_ID, key)
                .or_else(|| record.adapter_setting(ADAPTER_ID, &key.replace('-', "_")))
                .unwrap_or(default)
                .to_string()
        };

        let id = tree_name_to_id(&record.name);

        let mut verifies = record.requirements.clone();
        if self.verifies_policy == VerifiesPolicy::RequirementsAndDefects {
            verifies.extend(record.defects.iter().cloned());
        }

        let project = record
            .adapter_setting(ADAPTER_ID, "project")
            .or_else(|| record.testsuite.properties.get(PROJECT_PROPERTY).map(String::as_str))
            .unwrap_or("")
            .to_string();

        let mut tc = PolarionTestCase {
            title: id.clone(),
            id,
            description: join_description(&record.summary, &record.description),
            project,
            lookup_method: setting("lookup-method", "name"),
            assignee: record
                .authors
                .first()
                .and_then(|author| extract_user_id(author))
                .unwrap_or_default(),
            approvals: record
                .approvals
                .iter()
                .filter_map(|approver| extract_user_id(approver))
                .collect(),
            is_customer_scenario: has_customer_case(&verifies),
            verifies,
            defects: record.defects.clone(),
            status: WorkflowStatus::Draft,
            component: record.components.first().to_string(),
            sub_component: record.sub_components.first().to_string(),
            test_type: record.test_type.clone(),
            subtype1: record.subtypes.first().cloned().unwrap_or_default(),
            subtype2: record.subtypes.get(1).cloned().unwrap_or_default(),
            level: record.level.clone(),
            importance: record.importance.clone(),
            positive: setting("positive", "positive"),
            automated: setting("automated", "automated"),
            automation_script: setting("automation-script", ""),
            setup: record.test_setup.clone(),
            teardown: record.test_teardown.clone(),
            steps: record.test_steps.clone(),
            parameters: record.parameters.clone(),
            tags: record.tags.iter().cloned().collect(),
            test_case_work_item_url: None,
        };

        tc.status = derive_status(&tc);
        tc
    }

    /// Map every record, keeping the input order
    pub fn convert_all<'a, I>(&self, records: I) -> Vec<PolarionTestCase>
    where
        I: IntoIterator<Item = &'a TestCaseRecord>,
    {
        records.into_iter().map(|r| self.convert(r)).collect()
    }
}

/// `/a/b/c` becomes `a.b.c`
pub fn tree_name_to_id(name: &str) -> String {
    let dotted = name.replace('/', ".");
    let mut chars = dotted.chars();
    chars.next();
    chars.as_str().to_string()
}

fn join_description(summary: &str, description: &str) -> String {
    match (summary.is_empty(), description.is_empty()) {
        (false, false) => format!("{}\n{}", summary, description),
        (false, true) => summary.to_string(),
        _ => description.to_string(),
    }
}
