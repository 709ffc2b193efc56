//! Polarion test case work item
//!
//! Target-schema view of a test case: the exact field set the Polarion test case
//! importer accepts, already normalized and with derived fields filled in.

use super::testcase::{Relationship, Step};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Workflow status of a Polarion test case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStatus {
    #[default]
    Draft,
    Proposed,
    Approved,
}

impl WorkflowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStatus::Draft => "draft",
            WorkflowStatus::Proposed => "proposed",
            WorkflowStatus::Approved => "approved",
        }
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Test case ready to be rendered into the importer XML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolarionTestCase {
    // Identification
    pub id: String,
    pub title: String,
    pub description: String,
    pub project: String,
    pub lookup_method: String,

    // Authoring
    pub assignee: String,
    pub approvals: Vec<String>,

    // Relationships
    pub verifies: Vec<Relationship>,
    pub defects: Vec<Relationship>,

    pub status: WorkflowStatus,

    // Classification
    pub component: String,
    pub sub_component: String,
    #[serde(rename = "type")]
    pub test_type: String,
    pub subtype1: String,
    pub subtype2: String,
    pub level: String,
    pub importance: String,
    pub positive: String,
    pub automated: String,
    pub automation_script: String,
    pub is_customer_scenario: bool,

    // Steps
    pub setup: Vec<Step>,
    pub teardown: Vec<Step>,
    pub steps: Vec<Step>,
    pub parameters: Vec<String>,

    pub tags: Vec<String>,

    /// Work item URL, known only after a confirmed import
    pub test_case_work_item_url: Option<String>,
}

impl Default for PolarionTestCase {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            description: String::new(),
            project: String::new(),
            lookup_method: "name".to_string(),
            assignee: String::new(),
            approvals: Vec::new(),
            verifies: Vec::new(),
            defects: Vec::new(),
            status: WorkflowStatus::Draft,
            component: String::new(),
            sub_component: String::new(),
            test_type: String::new(),
            subtype1: String::new(),
            subtype2: String::new(),
            level: String::new(),
            importance: String::new(),
            positive: "positive".to_string(),
            automated: "automated".to_string(),
            automation_script: String::new(),
            is_customer_scenario: false,
            setup: Vec::new(),
            teardown: Vec::new(),
            steps: Vec::new(),
            parameters: Vec::new(),
            tags: Vec::new(),
            test_case_work_item_url: None,
        }
    }
}

impl PolarionTestCase {
    /// Comma separated `approver-ids` attribute value, `None` when nobody approved
    pub fn approver_ids(&self) -> Option<String> {
        if self.approvals.is_empty() {
            return None;
        }
        Some(
            self.approvals
                .iter()
                .map(|a| format!("{}:approved", a))
                .collect::<Vec<_>>()
                .join(","),
        )
    }
}
