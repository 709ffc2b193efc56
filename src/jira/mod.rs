//! JIRA cross-linking
//!
//! After a confirmed import, every JIRA defect referenced by a test case gets the
//! test case work item URL appended to a custom field, along with the QE coverage
//! flag and, when configured, the "verified in release" flag.

#[cfg(feature = "http")]
pub mod client;
pub mod populator;

use serde_json::{Map, Value};

#[cfg(feature = "http")]
pub use client::JiraRestClient;
pub use populator::{JiraPopulator, issue_key, linked_work_items};

/// Error raised while updating JIRA issues
#[derive(Debug, thiserror::Error)]
pub enum JiraError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("JIRA request failed: {0}")]
    Api(String),
    #[error("Failed to parse JIRA response: {0}")]
    Parse(String),
}

/// Issue tracker operations needed for cross-linking
pub trait IssueTracker {
    /// The `fields` object of an issue
    fn issue_fields(&self, key: &str) -> Result<Map<String, Value>, JiraError>;

    /// Update some fields of an issue
    fn update_fields(&self, key: &str, fields: Map<String, Value>) -> Result<(), JiraError>;
}
