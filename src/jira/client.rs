//! JIRA REST API v2 client

use super::{IssueTracker, JiraError};
use crate::config::JiraConfig;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde_json::{Map, Value, json};
use tracing::debug;

/// Blocking JIRA client authenticating with basic auth
pub struct JiraRestClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl JiraRestClient {
    pub fn new(config: &JiraConfig) -> Result<Self, JiraError> {
        let client = Client::builder()
            .build()
            .map_err(|e| JiraError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    fn issue_url(&self, key: &str) -> String {
        format!(
            "{}/rest/api/2/issue/{}",
            self.base_url,
            urlencoding::encode(key)
        )
    }
}

impl IssueTracker for JiraRestClient {
    fn issue_fields(&self, key: &str) -> Result<Map<String, Value>, JiraError> {
        let url = self.issue_url(key);
        let response = self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|e| JiraError::Transport(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| JiraError::Transport(format!("Failed to read response: {}", e)))?;
        if !status.is_success() {
            return Err(JiraError::Api(format!("GET {} returned {}: {}", url, status, body)));
        }

        let mut issue: Value = serde_json::from_str(&body)
            .map_err(|e| JiraError::Parse(format!("Invalid issue {}: {}", key, e)))?;
        match issue.get_mut("fields").map(Value::take) {
            Some(Value::Object(fields)) => Ok(fields),
            _ => Err(JiraError::Parse(format!("Issue {} has no fields", key))),
        }
    }

    fn update_fields(&self, key: &str, fields: Map<String, Value>) -> Result<(), JiraError> {
        let url = self.issue_url(key);
        let body = json!({ "fields": fields });
        debug!("PUT {}: {}", url, body);

        let response = self
            .client
            .put(&url)
            .basic_auth(&self.username, Some(&self.password))
            .json(&body)
            .send()
            .map_err(|e| JiraError::Transport(format!("PUT {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(JiraError::Api(format!("PUT {} returned {}: {}", url, status, body)));
        }
        Ok(())
    }
}
