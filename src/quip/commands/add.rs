use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::repository::QuoteRepository;
use crate::store::StorageBackend;

/// Adds a quote and returns the refreshed view of the active category.
pub fn run<B: StorageBackend>(
    repo: &mut QuoteRepository<B>,
    text: &str,
    category: &str,
) -> Result<CmdResult> {
    let quote = repo.add(text, category)?;

    let mut result = CmdResult::default()
        .with_affected_quotes(vec![quote])
        .with_listed_quotes(repo.filtered())
        .with_changed(true);
    result.add_message(CmdMessage::success("Quote added successfully!"));
    Ok(result)
}
