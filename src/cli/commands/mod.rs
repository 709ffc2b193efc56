//! CLI command implementations

pub mod polarion;

use crate::adapter::{AdapterRegistry, ExportSettings, ExportSummary};
use crate::cli::error::CliError;
use crate::import::FmfTree;
use std::path::Path;
use tracing::{info, warn};

/// Load the tree, select the matching test cases and hand them to an adapter
pub fn run_adapter(
    registry: &AdapterRegistry,
    adapter_id: &str,
    tree_path: &Path,
    filters: &[String],
    settings: &ExportSettings,
) -> Result<ExportSummary, CliError> {
    let tree = FmfTree::load(tree_path)?;
    let records: Vec<_> = tree.testcases_matching(filters).collect();
    if records.is_empty() {
        warn!("No test cases found in {}", tree.root_path().display());
    }

    let adapter = registry.create(adapter_id, settings)?;
    let stdout = std::io::stdout();
    let summary = adapter.export(&records, &mut stdout.lock())?;
    info!(
        "{}: {} converted, {} submitted, {} linked",
        adapter.id(),
        summary.converted,
        summary.submitted,
        summary.linked
    );
    Ok(summary)
}
