//! Appends imported test case work items to the JIRA defects they reference

use super::{IssueTracker, JiraError};
use crate::config::JiraConfig;
use crate::models::polarion::PolarionTestCase;
use serde_json::{Map, Value, json};
use tracing::{info, warn};

/// Value stored in the "verified in release" custom field
pub const VERIFIED_IN_RELEASE: &str = "Verified in a release";

/// Issue key of a JIRA reference, which may be a plain key or a browse URL
///
/// ```rust
/// use fmf_exporter::jira::issue_key;
///
/// assert_eq!(issue_key("https://issues.example.com/browse/ENTMQIC-1"), "ENTMQIC-1");
/// assert_eq!(issue_key("ENTMQIC-1"), "ENTMQIC-1");
/// ```
pub fn issue_key(reference: &str) -> &str {
    if reference.contains("http") {
        reference.rsplit('/').next().unwrap_or(reference)
    } else {
        reference
    }
}

/// Work item URLs already stored in the custom field
///
/// JIRA returns the field as a comma separated string, a list or `null`.
pub fn linked_work_items(value: Option<&Value>) -> Result<Vec<String>, JiraError> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(s)) => Ok(s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()),
        Some(Value::Array(items)) => Ok(items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()),
        Some(other) => Err(JiraError::Parse(format!(
            "Unexpected test case work item field: {}",
            other
        ))),
    }
}

/// Cross-links imported test cases into JIRA
pub struct JiraPopulator {
    config: JiraConfig,
    tracker: Box<dyn IssueTracker>,
}

impl JiraPopulator {
    pub fn new(config: JiraConfig, tracker: Box<dyn IssueTracker>) -> Self {
        Self { config, tracker }
    }

    /// Populator talking to the configured JIRA instance over HTTP
    #[cfg(feature = "http")]
    pub fn with_http(config: JiraConfig) -> Result<Self, JiraError> {
        let client = super::JiraRestClient::new(&config)?;
        Ok(Self::new(config, Box::new(client)))
    }

    /// Link every JIRA defect of the given test cases to the test case work item
    ///
    /// Test cases without a work item URL are skipped. The first failure stops
    /// the remaining updates.
    pub fn populate_testcases(&self, testcases: &[PolarionTestCase]) -> Result<(), JiraError> {
        let total = testcases.len();
        for (idx, tc) in testcases.iter().enumerate() {
            let Some(work_item_url) = tc.test_case_work_item_url.as_deref() else {
                warn!("Skipping {}: no work item URL, was it imported?", tc.id);
                continue;
            };

            for reference in tc.defects.iter().filter_map(|d| d.jira_ref()) {
                let key = issue_key(reference);
                info!(
                    "Populating {} test case {} of {} ({})",
                    self.config.browse_url(key),
                    idx + 1,
                    total,
                    tc.id
                );
                self.link(key, work_item_url)?;
            }
        }
        Ok(())
    }

    fn link(&self, key: &str, work_item_url: &str) -> Result<(), JiraError> {
        let fields = self.tracker.issue_fields(key)?;
        let mut work_items = linked_work_items(fields.get(&self.config.testcase_work_item))?;
        work_items.push(work_item_url.to_string());

        let mut update = Map::new();
        update.insert(
            self.config.testcase_work_item.clone(),
            Value::String(work_items.join(",")),
        );
        update.insert(self.config.qe_test_coverage.clone(), json!({ "value": "+" }));
        if let Some(field) = &self.config.verified_in_release {
            update.insert(field.clone(), json!([{ "value": VERIFIED_IN_RELEASE }]));
        }

        self.tracker.update_fields(key, update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_key() {
        assert_eq!(issue_key("http://jira/browse/ABC-1"), "ABC-1");
        assert_eq!(issue_key("ABC-1"), "ABC-1");
    }

    #[test]
    fn test_linked_work_items_shapes() {
        assert!(linked_work_items(None).unwrap().is_empty());
        assert!(linked_work_items(Some(&Value::Null)).unwrap().is_empty());
        assert_eq!(
            linked_work_items(Some(&json!("a, b"))).unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
        assert_eq!(
            linked_work_items(Some(&json!(["a", "b"]))).unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
        assert!(linked_work_items(Some(&json!(3))).is_err());
    }
}
