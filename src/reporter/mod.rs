//! Polarion test case importer client
//!
//! Submits importer documents, follows the resulting import job until it ends
//! and records the work item URL of every imported test case.
//!
//! Network access goes through the `ImporterTransport` trait. The `http` feature
//! provides a `reqwest` implementation; tests plug in an in-memory one.

#[cfg(feature = "http")]
pub mod http;
pub mod polarion;

use crate::export::ExportError;

#[cfg(feature = "http")]
pub use http::HttpTransport;
pub use polarion::{
    ImportReport, ImportedTestCase, PollSettings, PolarionReporter, SubmissionResult,
    extract_message_content,
};

/// Error raised while submitting test cases to Polarion
#[derive(Debug, thiserror::Error)]
pub enum ReporterError {
    #[error("Error submitting test cases to Polarion: {0}")]
    Submission(String),
    #[error("Import job did not complete: {0}")]
    PollTimeout(String),
    #[error("Import failed: {0}")]
    Import(String),
    #[error("Runtime error: {0}")]
    Runtime(String),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Failed to parse importer response: {0}")]
    Parse(String),
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Raw HTTP response as seen by the reporter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Transport used to talk to the importer endpoints
pub trait ImporterTransport {
    /// POST `content` as the multipart file field `file`, named `filename`
    fn post_file(
        &self,
        url: &str,
        filename: &str,
        content: &str,
    ) -> Result<TransportResponse, ReporterError>;

    /// GET `url` and return the body as text
    fn get_text(&self, url: &str) -> Result<String, ReporterError>;
}
