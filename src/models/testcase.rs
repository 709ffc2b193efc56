//! FMF test case record
//!
//! Canonical in-memory representation of a test case as read from an FMF tree.
//! Every field has a default so a node that only defines a handful of keys still
//! produces a complete record.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A field that may be written either as a single string or as a list of strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl Default for OneOrMany {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl OneOrMany {
    /// First element for a list, the raw value for a single string, `""` otherwise.
    pub fn first(&self) -> &str {
        match self {
            OneOrMany::One(value) => value,
            OneOrMany::Many(values) => values.first().map(String::as_str).unwrap_or(""),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            OneOrMany::One(value) => value.is_empty(),
            OneOrMany::Many(values) => values.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            OneOrMany::One(_) => 1,
            OneOrMany::Many(values) => values.len(),
        }
    }

    pub fn contains(&self, needle: &str) -> bool {
        match self {
            OneOrMany::One(value) => value == needle,
            OneOrMany::Many(values) => values.iter().any(|v| v == needle),
        }
    }
}

/// A step paired with its expected result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub step: String,
    #[serde(default)]
    pub expected: String,
}

impl Step {
    pub fn new(step: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            expected: expected.into(),
        }
    }
}

/// Relationship entry used by `defects` and `requirements`
///
/// The recognized keys are `jira`, `polarion`, `bugzilla` and `customer-case`.
/// Any other key is kept in `extra` so nothing from the metadata gets lost.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jira: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polarion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bugzilla: Option<String>,
    #[serde(rename = "customer-case", default)]
    pub customer_case: bool,
    #[serde(flatten, default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl Relationship {
    pub fn jira(key: impl Into<String>) -> Self {
        Self {
            jira: Some(key.into()),
            ..Default::default()
        }
    }

    pub fn polarion(key: impl Into<String>) -> Self {
        Self {
            polarion: Some(key.into()),
            ..Default::default()
        }
    }

    pub fn with_customer_case(mut self, customer_case: bool) -> Self {
        self.customer_case = customer_case;
        self
    }

    /// Non-empty JIRA reference, if any
    pub fn jira_ref(&self) -> Option<&str> {
        self.jira.as_deref().filter(|v| !v.is_empty())
    }

    /// Non-empty Polarion work item reference, if any
    pub fn polarion_ref(&self) -> Option<&str> {
        self.polarion.as_deref().filter(|v| !v.is_empty())
    }

    /// Non-empty Bugzilla reference, if any
    pub fn bugzilla_ref(&self) -> Option<&str> {
        self.bugzilla.as_deref().filter(|v| !v.is_empty())
    }
}

/// The nested `testsuite` mapping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSuite {
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    #[serde(default)]
    pub compatible_topologies: Vec<String>,
}

/// Test case metadata read from a single FMF leaf node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestCaseRecord {
    // Identification
    pub name: String,
    pub summary: String,
    pub description: String,
    pub tags: BTreeSet<String>,

    // Authoring and approvals
    pub authors: Vec<String>,
    pub approvals: Vec<String>,

    // Classification
    #[serde(rename = "type")]
    pub test_type: String,
    pub level: String,
    pub subtypes: Vec<String>,
    pub importance: String,
    pub estimate: String,

    // Components
    pub components: OneOrMany,
    pub sub_components: OneOrMany,

    // Relationships
    pub defects: Vec<Relationship>,
    pub requirements: Vec<Relationship>,

    // Steps
    pub test_setup: Vec<Step>,
    pub test_teardown: Vec<Step>,
    pub test_steps: Vec<Step>,

    // Test case and test suite parameters
    pub parameters: Vec<String>,
    pub testsuite: TestSuite,

    /// Adapter specific overrides, keyed by adapter id then by setting name
    pub adapter: BTreeMap<String, BTreeMap<String, String>>,
}

impl TestCaseRecord {
    /// Create an empty record for the given tree name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Look up an adapter override such as `adapter.polarion.project`
    pub fn adapter_setting(&self, adapter_id: &str, key: &str) -> Option<&str> {
        self.adapter
            .get(adapter_id)
            .and_then(|settings| settings.get(key))
            .map(String::as_str)
    }
}
