//! Export functionality
//!
//! Provides exporters for ALM importer formats:
//! - Polarion test case importer XML
//! - HTML fragments embedded in Polarion rich text fields

pub mod html;
pub mod polarion_xml;

use std::path::{Path, PathBuf};

/// File name used for the importer document, both on disk and in the upload form
pub const TESTCASE_XML_FILE: &str = "testcase.xml";

/// Error during export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("IO error: {0}")]
    IoError(String),
}

/// Write an importer document as `testcase.xml` inside `dir`
pub fn write_testcase_xml(dir: &Path, content: &str) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir).map_err(|e| {
        ExportError::IoError(format!("Failed to create {}: {}", dir.display(), e))
    })?;

    let path = dir.join(TESTCASE_XML_FILE);
    std::fs::write(&path, content)
        .map_err(|e| ExportError::IoError(format!("Failed to write {}: {}", path.display(), e)))?;
    Ok(path)
}

// Re-export for convenience
pub use polarion_xml::PolarionXmlExporter;
