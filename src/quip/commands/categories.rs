use crate::commands::{CategoryChoice, CmdResult};
use crate::error::Result;
use crate::repository::QuoteRepository;
use crate::store::StorageBackend;

pub fn run<B: StorageBackend>(repo: &QuoteRepository<B>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_categories(choices(repo)))
}

/// `All` plus every category, flagging the active one.
pub fn choices<B: StorageBackend>(repo: &QuoteRepository<B>) -> Vec<CategoryChoice> {
    let active = repo.current_category().as_str();
    repo.category_choices()
        .into_iter()
        .map(|name| CategoryChoice {
            active: name == active,
            name,
        })
        .collect()
}
