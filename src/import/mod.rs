//! Import functionality
//!
//! Reads test case metadata out of an FMF (Flexible Metadata Format) tree:
//! - `fmf`: tree discovery, node growth and inheritance
//! - `testcase`: conversion of node data into `TestCaseRecord`

pub mod fmf;
pub mod testcase;

use std::path::PathBuf;

/// Error raised while loading an FMF tree
#[derive(Debug, thiserror::Error)]
pub enum TreeLoadError {
    #[error("Invalid FMF tree path: {0}")]
    InvalidPath(PathBuf),
    #[error("No FMF tree root (.fmf/version) found at or above {0}")]
    RootNotFound(PathBuf),
    #[error("Failed to read {0}: {1}")]
    IoError(PathBuf, String),
    #[error("Failed to parse {0}: {1}")]
    ParseError(PathBuf, String),
    #[error("Unable to merge key '{0}': {1}")]
    MergeError(String, String),
}

pub use fmf::{FmfNode, FmfTree};
