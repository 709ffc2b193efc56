//! Submission, job polling and reconciliation against the Polarion importer

use super::{ImporterTransport, ReporterError};
use crate::config::PolarionConfig;
use crate::export::{PolarionXmlExporter, TESTCASE_XML_FILE};
use crate::models::polarion::PolarionTestCase;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Log line written by the importer once a job has ended
pub const COMPLETED_MARKER: &str = "Ending import of test cases to Polarion";

/// Log line written by the importer when a job is being rolled back
pub const ROLLBACK_MARKER: &str = "Rolling back test case import due to earlier errors";

/// Marker preceding the JSON summary embedded in the job log
pub const MESSAGE_CONTENT_MARKER: &str = "Message Content:";

/// Response fragments reporting a bad project id (matched case-insensitively)
const INVALID_PROJECT_MARKERS: [&str; 2] = ["invalid project", "project id is not specified"];

const STATUS_PASSED: &str = "passed";

/// How often and how long an import job is polled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_attempts: 120,
        }
    }
}

/// Import job created by a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    /// Name of the submitted file, as echoed back by the importer
    pub file: String,
    pub job_id: String,
    pub job_url: String,
}

/// Per test case entry of an import report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedTestCase {
    /// Work item id assigned by Polarion
    pub id: String,
    /// Test case name as submitted
    pub name: String,
    pub status: String,
}

/// JSON summary embedded in the job log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub status: String,
    #[serde(rename = "import-testcases", default)]
    pub import_testcases: Vec<ImportedTestCase>,
}

/// Extract the JSON summary that follows `Message Content:` in a job log
///
/// The payload runs from right after the marker up to and including the first
/// following line that starts with `}`.
pub fn extract_message_content(log: &str) -> Result<ImportReport, ReporterError> {
    let start = log
        .find(MESSAGE_CONTENT_MARKER)
        .map(|idx| idx + MESSAGE_CONTENT_MARKER.len())
        .ok_or_else(|| {
            ReporterError::Parse(format!("'{}' not found in job log", MESSAGE_CONTENT_MARKER))
        })?;

    let mut payload = String::new();
    for (idx, line) in log[start..].lines().enumerate() {
        payload.push_str(line);
        payload.push('\n');
        if idx > 0 && line.starts_with('}') {
            break;
        }
    }

    serde_json::from_str(&payload)
        .map_err(|e| ReporterError::Parse(format!("Invalid import summary: {}", e)))
}

fn job_ids(body: &str) -> Result<Vec<(String, String)>, ReporterError> {
    let json: Value = serde_json::from_str(body)
        .map_err(|e| ReporterError::Parse(format!("Invalid submission response: {}", e)))?;

    let mut ids = Vec::new();
    if let Some(files) = json.get("files").and_then(Value::as_object) {
        for (file, entry) in files {
            let Some(file_job_ids) = entry.get("job-ids").and_then(Value::as_array) else {
                continue;
            };
            for id in file_job_ids {
                let id = match id {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                ids.push((file.clone(), id));
            }
        }
    }
    Ok(ids)
}

/// Client submitting test cases to the Polarion test case importer
pub struct PolarionReporter {
    config: PolarionConfig,
    transport: Box<dyn ImporterTransport>,
    poll: PollSettings,
    exporter: PolarionXmlExporter,
}

impl PolarionReporter {
    pub fn new(config: PolarionConfig, transport: Box<dyn ImporterTransport>) -> Self {
        Self {
            config,
            transport,
            poll: PollSettings::default(),
            exporter: PolarionXmlExporter::new(),
        }
    }

    /// Reporter talking to the importer over HTTP with the configured credentials
    #[cfg(feature = "http")]
    pub fn with_http(config: PolarionConfig) -> Result<Self, ReporterError> {
        let transport = super::HttpTransport::new(&config.username, &config.password)?;
        Ok(Self::new(config, Box::new(transport)))
    }

    pub fn with_poll_settings(mut self, poll: PollSettings) -> Self {
        self.poll = poll;
        self
    }

    pub fn config(&self) -> &PolarionConfig {
        &self.config
    }

    /// Upload an importer document and return the import job it created
    pub fn submit(&self, xml: &str) -> Result<SubmissionResult, ReporterError> {
        debug!("{}", xml);
        let response =
            self.transport
                .post_file(&self.config.test_case_url, TESTCASE_XML_FILE, xml)?;

        if response.status != 200 {
            return Err(ReporterError::Submission(format!(
                "HTTP {}: {}",
                response.status, response.body
            )));
        }

        let lowered = response.body.to_lowercase();
        if INVALID_PROJECT_MARKERS.iter().any(|m| lowered.contains(m)) {
            return Err(ReporterError::Submission(format!(
                "Invalid project id: {}",
                response.body
            )));
        }

        let mut ids = job_ids(&response.body)?;
        if ids.len() > 1 {
            return Err(ReporterError::Runtime(format!(
                "Expected a single import job, got {}",
                ids.len()
            )));
        }
        let Some((file, job_id)) = ids.pop() else {
            return Err(ReporterError::Submission(format!(
                "No job id returned: {}",
                response.body
            )));
        };

        let job_url = self.config.job_log_url(&job_id);
        info!("Import job URL: {}", job_url);
        Ok(SubmissionResult {
            file,
            job_id,
            job_url,
        })
    }

    /// Poll the job log until the import ends, returning the final log
    ///
    /// A log that reports a rollback is never considered complete.
    pub fn poll(&self, submission: &SubmissionResult) -> Result<String, ReporterError> {
        for attempt in 1..=self.poll.max_attempts {
            let log = self.transport.get_text(&submission.job_url)?;
            if log.contains(COMPLETED_MARKER) && !log.contains(ROLLBACK_MARKER) {
                debug!("Import job {} completed after {} attempt(s)", submission.job_id, attempt);
                return Ok(log);
            }
            if attempt < self.poll.max_attempts {
                std::thread::sleep(self.poll.interval);
            }
        }

        Err(ReporterError::PollTimeout(format!(
            "job {} still not completed after {} attempts ({})",
            submission.job_id, self.poll.max_attempts, submission.job_url
        )))
    }

    /// Check an import report and assign work item URLs to the submitted test cases
    pub fn reconcile(
        &self,
        report: &ImportReport,
        testcases: &mut [PolarionTestCase],
    ) -> Result<(), ReporterError> {
        if report.status != STATUS_PASSED {
            return Err(ReporterError::Import(format!(
                "import status is '{}'",
                report.status
            )));
        }

        if let Some(failed) = report
            .import_testcases
            .iter()
            .find(|entry| entry.status != STATUS_PASSED)
        {
            return Err(ReporterError::Import(format!(
                "test case '{}' has status '{}'",
                failed.name, failed.status
            )));
        }

        for entry in &report.import_testcases {
            match testcases.iter_mut().find(|tc| tc.id == entry.name) {
                Some(tc) => {
                    let url = self.config.work_item_url(&tc.project, &entry.id);
                    info!("{} imported as {}", tc.id, url);
                    tc.test_case_work_item_url = Some(url);
                }
                None => warn!("Imported test case {} was not part of the submission", entry.name),
            }
        }
        Ok(())
    }

    /// Submit test cases as one document and wait for the import to finish
    pub fn submit_testcases(
        &self,
        testcases: &mut [PolarionTestCase],
    ) -> Result<(), ReporterError> {
        if testcases.is_empty() {
            warn!("No test cases to submit");
            return Ok(());
        }

        let xml = self.exporter.export(testcases)?;
        info!(
            "Submitting {} test case(s) to {}",
            testcases.len(),
            self.config.test_case_url
        );
        let submission = self.submit(&xml)?;
        let log = self.poll(&submission)?;
        let report = extract_message_content(&log)?;
        self.reconcile(&report, testcases)
    }

    /// Submit a single test case in a document of its own
    pub fn submit_testcase(&self, testcase: &mut PolarionTestCase) -> Result<(), ReporterError> {
        self.submit_testcases(std::slice::from_mut(testcase))
    }
}
