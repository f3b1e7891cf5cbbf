use crate::commands::{CmdMessage, CmdResult, Shown};
use crate::error::Result;
use crate::model::CategoryFilter;
use crate::repository::QuoteRepository;
use crate::store::StorageBackend;
use rand::Rng;

/// Shows a random quote from the active category.
pub fn random<B: StorageBackend, R: Rng + ?Sized>(
    repo: &mut QuoteRepository<B>,
    rng: &mut R,
) -> Result<CmdResult> {
    let shown = match repo.random(rng)? {
        Some(quote) => Shown::Quote(quote),
        None => Shown::NoQuotes(repo.current_category().clone()),
    };
    Ok(CmdResult::default().with_shown(shown))
}

/// Switches the active category, then shows a random quote from it.
pub fn filter<B: StorageBackend, R: Rng + ?Sized>(
    repo: &mut QuoteRepository<B>,
    category: CategoryFilter,
    rng: &mut R,
) -> Result<CmdResult> {
    let filtered = repo.filter(category)?;
    let mut result = random(repo, rng)?;
    result.add_message(CmdMessage::info(format!(
        "Showing {} ({} quote{})",
        repo.current_category(),
        filtered.len(),
        if filtered.len() == 1 { "" } else { "s" }
    )));
    Ok(result.with_listed_quotes(filtered))
}

/// The quote shown last in this session, if any.
pub fn last_viewed<B: StorageBackend>(repo: &QuoteRepository<B>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match repo.last_viewed()? {
        Some(quote) => result.shown = Some(Shown::Quote(quote)),
        None => result.add_message(CmdMessage::info("No quote viewed yet in this session.")),
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Scope;
    use crate::store::mem_backend::MemBackend;
    use crate::store::QuoteStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn repo() -> QuoteRepository<MemBackend> {
        QuoteRepository::open(QuoteStore::with_backend(MemBackend::new()), Scope::Global).unwrap()
    }

    #[test]
    fn random_shows_a_quote() {
        let mut repo = repo();
        let mut rng = StdRng::seed_from_u64(3);
        let result = random(&mut repo, &mut rng).unwrap();
        assert!(matches!(result.shown, Some(Shown::Quote(_))));
    }

    #[test]
    fn filter_to_empty_category_shows_no_quotes_state() {
        let mut repo = repo();
        let mut rng = StdRng::seed_from_u64(3);
        random(&mut repo, &mut rng).unwrap();

        let result = filter(&mut repo, CategoryFilter::parse("Gone"), &mut rng).unwrap();
        assert_eq!(
            result.shown,
            Some(Shown::NoQuotes(CategoryFilter::parse("Gone")))
        );
        assert!(result.listed_quotes.is_empty());
        assert!(repo.last_viewed().unwrap().is_none());
    }

    #[test]
    fn last_viewed_reflects_latest_pick() {
        let mut repo = repo();
        let mut rng = StdRng::seed_from_u64(11);
        let shown = random(&mut repo, &mut rng).unwrap().shown;

        let last = last_viewed(&repo).unwrap();
        assert_eq!(last.shown, shown);
    }

    #[test]
    fn last_viewed_empty_session_reports_message() {
        let repo = repo();
        let result = last_viewed(&repo).unwrap();
        assert!(result.shown.is_none());
        assert_eq!(result.messages.len(), 1);
    }
}
