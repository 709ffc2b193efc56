//! Target schema converters
//!
//! Provides the mapping from FMF test case records to the field set of each
//! supported ALM tool.

pub mod polarion;

pub use polarion::{PolarionConverter, VerifiesPolicy, derive_status, extract_user_id};
