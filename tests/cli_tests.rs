//! CLI command tests, compiled with the `cli` feature only

mod cli;
