//! CLI tests module

#[cfg(feature = "cli")]
pub mod polarion_tests;
