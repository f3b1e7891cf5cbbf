use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::CategoryFilter;
use crate::repository::QuoteRepository;
use crate::store::StorageBackend;

/// Lists quotes in `category`, or in the active category when `None`.
/// Read-only: the active category is not changed.
pub fn run<B: StorageBackend>(
    repo: &QuoteRepository<B>,
    category: Option<CategoryFilter>,
) -> Result<CmdResult> {
    let listed = match category {
        Some(category) => repo.filtered_by(&category),
        None => repo.filtered(),
    };
    Ok(CmdResult::default().with_listed_quotes(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Quote, Scope};
    use crate::store::mem_backend::MemBackend;
    use crate::store::QuoteStore;

    fn repo_with(quotes: &[Quote]) -> QuoteRepository<MemBackend> {
        let store = QuoteStore::with_backend(MemBackend::new());
        store.save_quotes(Scope::Global, quotes).unwrap();
        QuoteRepository::open(store, Scope::Global).unwrap()
    }

    #[test]
    fn lists_everything_for_all() {
        let quotes = vec![Quote::undated("a", "x"), Quote::undated("b", "y")];
        let repo = repo_with(&quotes);
        let result = run(&repo, Some(CategoryFilter::All)).unwrap();
        assert_eq!(result.listed_quotes, quotes);
    }

    #[test]
    fn lists_nothing_for_absent_category() {
        let repo = repo_with(&[Quote::undated("a", "x")]);
        let result = run(&repo, Some(CategoryFilter::parse("z"))).unwrap();
        assert!(result.listed_quotes.is_empty());
    }

    #[test]
    fn defaults_to_active_category_without_changing_it() {
        let mut repo = repo_with(&[Quote::undated("a", "x"), Quote::undated("b", "y")]);
        repo.filter(CategoryFilter::parse("y")).unwrap();

        let result = run(&repo, None).unwrap();
        assert_eq!(result.listed_quotes, vec![Quote::undated("b", "y")]);

        run(&repo, Some(CategoryFilter::parse("x"))).unwrap();
        assert_eq!(repo.current_category(), &CategoryFilter::parse("y"));
    }
}
