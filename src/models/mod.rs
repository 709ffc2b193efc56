//! Models for test case metadata
//!
//! - `testcase`: canonical record read from an FMF tree
//! - `polarion`: Polarion test case work item produced by the mapper

pub mod polarion;
pub mod testcase;

pub use polarion::{PolarionTestCase, WorkflowStatus};
pub use testcase::{OneOrMany, Relationship, Step, TestCaseRecord, TestSuite};
