use crate::commands::{CmdMessage, CmdResult};
use crate::error::{QuipError, Result};
use crate::merge::MergeReport;
use crate::repository::QuoteRepository;
use crate::schema::{self, Strictness};
use crate::store::StorageBackend;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::info;

/// Imports a JSON array of quotes. Any invalid element rejects the whole file.
pub fn run<B: StorageBackend>(repo: &mut QuoteRepository<B>, path: &Path) -> Result<CmdResult> {
    let content = fs::read_to_string(path)?;
    import_str(repo, &content)
}

pub fn import_str<B: StorageBackend>(
    repo: &mut QuoteRepository<B>,
    content: &str,
) -> Result<CmdResult> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| QuipError::Parse(format!("import file is not valid JSON: {}", e)))?;
    let incoming = schema::validate_all(&value, Strictness::Import)
        .map_err(|e| QuipError::Validation(format!("Import rejected: {}", e)))?;

    let report = repo.merge(&incoming)?;
    info!(
        received = incoming.len(),
        added = report.added,
        updated = report.updated,
        "import merged"
    );

    let mut result = CmdResult::default()
        .with_listed_quotes(repo.filtered())
        .with_changed(report.changed);
    result.add_message(summary(&report));
    Ok(result)
}

fn summary(report: &MergeReport) -> CmdMessage {
    if report.changed {
        CmdMessage::success(format!(
            "Imported: {} added, {} updated",
            report.added, report.updated
        ))
    } else {
        CmdMessage::info("Nothing to import: all quotes are up to date")
    }
}
